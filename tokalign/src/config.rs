use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::{Aligner, HasherKind, Sweep};

/// What to report for a pair of tokens that the backtrace walks through
/// diagonally.
///
/// The walk is the same for every policy. Only which of the walked pairs are
/// reported as aligned differs.
#[derive(Debug, PartialEq, Eq, Default, Clone, Copy, ValueEnum, Serialize, Deserialize)]
pub enum SubstitutionPolicy {
    /// Only identical tokens are aligned. Substituted tokens are unaligned.
    #[default]
    Unaligned,
    /// Substituted tokens are aligned to each other as well.
    Aligned,
    /// Substituted tokens are aligned when they have the same byte length.
    SameLength,
}

#[derive(Parser, Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[clap(next_help_heading = "Alignment")]
#[serde(default, deny_unknown_fields)]
pub struct AlignConfig {
    /// Order in which the distance matrix is filled.
    #[clap(long, default_value_t, value_enum, display_order = 10)]
    pub sweep: Sweep,

    /// How substituted tokens are reported.
    #[clap(long, default_value_t, value_enum, display_order = 10)]
    pub substitutions: SubstitutionPolicy,

    /// Hash function for text tokens.
    #[clap(long, default_value_t, value_enum, hide_short_help = true)]
    pub hasher: HasherKind,
}

impl AlignConfig {
    pub fn aligner(&self) -> Aligner {
        Aligner::new(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_flags() {
        #[derive(Parser)]
        struct Cli {
            #[clap(flatten)]
            config: AlignConfig,
        }
        let cli = Cli::parse_from(["tokalign", "--sweep", "anti-diagonal", "--substitutions", "same-length"]);
        assert_eq!(
            cli.config,
            AlignConfig {
                sweep: Sweep::AntiDiagonal,
                substitutions: SubstitutionPolicy::SameLength,
                hasher: HasherKind::Murmur3,
            }
        );
        assert_eq!(Cli::parse_from(["tokalign"]).config, AlignConfig::default());
    }
}
