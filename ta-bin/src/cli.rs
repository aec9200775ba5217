use anyhow::{bail, Context, Result};
use clap::{value_parser, Parser};
use itertools::Itertools;
use log::{debug, info};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    ops::ControlFlow,
    path::{Path, PathBuf},
};
use tokalign::AlignConfig;

#[derive(Parser)]
#[clap(author, about, disable_version_flag(true))]
pub struct Cli {
    /// A .txt or .tsv file with token sequence pairs, or a directory of them.
    ///
    /// .txt files contain a source line followed by a target line for each
    /// pair. .tsv files contain one pair per line, separated by a tab. Tokens
    /// are separated by whitespace.
    #[clap(short, long, value_parser = value_parser!(PathBuf), display_order = 1)]
    pub input: Option<PathBuf>,

    /// Write one JSON object per pair with the distance and both alignments.
    #[clap(short, long, value_parser = value_parser!(PathBuf), display_order = 1)]
    pub output: Option<PathBuf>,

    /// Source tokens, when no input file is given.
    #[clap(long, requires = "target", conflicts_with = "input", display_order = 2)]
    pub source: Option<String>,

    /// Target tokens, when no input file is given.
    #[clap(long, requires = "source", conflicts_with = "input", display_order = 2)]
    pub target: Option<String>,

    /// Also recover many-to-one alignments of unaligned tokens.
    #[clap(long, display_order = 3)]
    pub multi: bool,

    /// Print less stats. Pass twice for summary line only.
    ///
    /// Do not print a new line per alignment, but instead overwrite the previous one.
    /// Pass twice to only print a summary line and avoid all terminal clutter.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub silent: u8,

    #[clap(flatten)]
    pub config: AlignConfig,
}

fn tokens(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

fn process_file(
    f: &Path,
    run_pair: &mut impl FnMut(&[&str], &[&str]) -> Result<ControlFlow<()>>,
) -> Result<ControlFlow<()>> {
    let ext = f
        .extension()
        .and_then(|e| e.to_str())
        .with_context(|| format!("{} has no file extension", f.display()))?;
    let lines = BufReader::new(File::open(f).with_context(|| format!("opening {}", f.display()))?)
        .lines()
        .collect::<std::io::Result<Vec<_>>>()
        .with_context(|| format!("reading {}", f.display()))?;
    debug!("{}: {} lines", f.display(), lines.len());

    match ext {
        "txt" => {
            if lines.len() % 2 != 0 {
                info!("{}: ignoring unpaired last line", f.display());
            }
            for (a, b) in lines.iter().tuples() {
                if run_pair(&tokens(a), &tokens(b))?.is_break() {
                    return Ok(ControlFlow::Break(()));
                }
            }
        }
        "tsv" => {
            for (nr, line) in lines.iter().enumerate() {
                let Some((a, b)) = line.split_once('\t') else {
                    bail!("{}:{}: expected a tab-separated pair", f.display(), nr + 1);
                };
                if run_pair(&tokens(a), &tokens(b))?.is_break() {
                    return Ok(ControlFlow::Break(()));
                }
            }
        }
        ext => bail!("Unknown file extension {ext:?}. Must be in {{txt,tsv}}."),
    }
    Ok(ControlFlow::Continue(()))
}

impl Cli {
    /// Call the given function for each pair in the input.
    pub fn process_input_pairs(
        &self,
        mut run_pair: impl FnMut(&[&str], &[&str]) -> Result<ControlFlow<()>>,
    ) -> Result<()> {
        if let Some(input) = &self.input {
            let files = if input.is_file() {
                vec![input.clone()]
            } else {
                input
                    .read_dir()
                    .with_context(|| format!("{} is not a file or directory", input.display()))?
                    .map(|x| x.map(|x| x.path()))
                    .collect::<std::io::Result<Vec<_>>>()?
                    .into_iter()
                    .sorted()
                    .collect_vec()
            };
            for f in files {
                if process_file(&f, &mut run_pair)?.is_break() {
                    break;
                }
            }
        } else if let (Some(a), Some(b)) = (&self.source, &self.target) {
            run_pair(&tokens(a), &tokens(b))?;
        } else {
            bail!("Pass either --input or both --source and --target.");
        }
        Ok(())
    }
}
