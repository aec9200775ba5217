mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufWriter, Write},
    ops::ControlFlow,
};
use tokalign::{multi_align, AlignStats, Cost};

use cli::Cli;

/// One line of JSON output.
#[derive(Serialize)]
struct Record {
    distance: Cost,
    source_to_target: Vec<i32>,
    target_to_source: Vec<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    multi: Option<MultiRecord>,
}

#[derive(Serialize)]
struct MultiRecord {
    source_to_target: BTreeMap<usize, usize>,
    target_to_source: BTreeMap<usize, usize>,
}

fn char_lengths(tokens: &[&str]) -> Vec<usize> {
    tokens.iter().map(|t| t.chars().count()).collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Cli::parse();

    let aligner = args.config.aligner();
    let mut output = args
        .output
        .as_ref()
        .map(|path| {
            File::create(path)
                .map(BufWriter::new)
                .with_context(|| format!("creating {}", path.display()))
        })
        .transpose()?;

    let mut avg_result = AlignStats::default();

    args.process_input_pairs(|a, b| {
        let (alignment, r) = aligner.align_with_stats(a, b)?;

        if let Some(out) = &mut output {
            let multi = if args.multi {
                let m = multi_align(
                    &alignment.source_to_target,
                    &alignment.target_to_source,
                    &char_lengths(a),
                    &char_lengths(b),
                )?;
                Some(MultiRecord {
                    source_to_target: m.source_to_target,
                    target_to_source: m.target_to_source,
                })
            } else {
                None
            };
            let (distance, source_to_target, target_to_source, _) = alignment.into_raw();
            let record = Record {
                distance,
                source_to_target,
                target_to_source,
                multi,
            };
            serde_json::to_writer(&mut *out, &record)?;
            writeln!(out)?;
        }

        // Record and print stats.
        if args.silent <= 1 {
            print!("\r");
            if args.silent == 0 {
                r.print();
            }
        }
        avg_result += r;
        if args.silent <= 1 {
            avg_result.print_no_newline();
        }
        Ok(ControlFlow::Continue(()))
    })?;

    if let Some(mut out) = output {
        out.flush()?;
    }

    if avg_result.sample_size > 0 {
        print!("\r");
        avg_result.print();
    }
    Ok(())
}
