use clap::{Parser, Subcommand};
use coinsieve::config::OutputFormat;
use coinsieve::{ChangeKind, MarketCapCategory, QuickFilter, TopN};
use std::path::PathBuf;

/// Returns the version string, including the git hash for non-release builds.
/// Format for releases: "v0.3.0"
/// Format for dev builds: "v0.3.0 (dev abc1234)"
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            format!("v{}", VERSION)
        } else {
            format!("v{} (dev {})", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "coinsieve",
    bin_name = "coinsieve",
    version = get_version(),
    disable_help_subcommand = true
)]
#[command(about = "Persistent market filters for asset lists", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the persisted filters (defaults to the OS data dir)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the current filters
    #[command(alias = "ls", display_order = 1)]
    Show {
        /// Print the stored JSON only
        #[arg(long)]
        json: bool,
    },

    /// Filter by current price (no bounds disables it)
    #[command(display_order = 10)]
    Price {
        #[arg(long, allow_negative_numbers = true)]
        min: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        max: Option<f64>,
    },

    /// Filter by market cap band or custom range
    #[command(alias = "mcap", display_order = 11)]
    MarketCap {
        /// small, mid, large or custom
        #[arg(long)]
        category: Option<MarketCapCategory>,
        #[arg(long, allow_negative_numbers = true)]
        min: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        max: Option<f64>,
    },

    /// Filter by 24h trading volume (no bounds disables it)
    #[command(alias = "vol", display_order = 12)]
    Volume {
        #[arg(long, allow_negative_numbers = true)]
        min: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        max: Option<f64>,
    },

    /// Filter by 24h price change
    #[command(display_order = 13)]
    Change {
        /// gainers, losers or custom
        #[arg(long = "type", value_name = "TYPE")]
        kind: Option<ChangeKind>,
        #[arg(long, allow_negative_numbers = true)]
        min: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        max: Option<f64>,
    },

    /// Keep only the top N by market cap rank (no value disables it)
    #[command(display_order = 14)]
    Rank {
        /// 10, 50, 100 or 500
        #[arg(long)]
        top: Option<TopN>,
    },

    /// Flip a quick filter: trending, recently-added or high-volume
    #[command(display_order = 15)]
    Toggle { filter: QuickFilter },

    /// Turn every filter off
    #[command(display_order = 20)]
    Clear,

    /// Delete the stored filters
    #[command(display_order = 21)]
    Reset,

    /// Print the assets that pass the current filters
    #[command(display_order = 30)]
    Apply {
        /// JSON array of assets (defaults to the configured assets_file)
        file: Option<PathBuf>,

        /// Output format: table or json
        #[arg(short, long)]
        output: Option<OutputFormat>,
    },

    /// Show configuration values
    #[command(display_order = 40)]
    Config {
        /// A single key to print
        key: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_market_cap_category() {
        let cli = Cli::parse_from(["coinsieve", "market-cap", "--category", "large"]);
        match cli.command {
            Some(Commands::MarketCap { category, min, max }) => {
                assert_eq!(category, Some(MarketCapCategory::Large));
                assert_eq!(min, None);
                assert_eq!(max, None);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn parses_negative_change_bounds() {
        let cli = Cli::parse_from([
            "coinsieve", "change", "--type", "custom", "--min", "-5", "--max", "5",
        ]);
        match cli.command {
            Some(Commands::Change { kind, min, max }) => {
                assert_eq!(kind, Some(ChangeKind::Custom));
                assert_eq!(min, Some(-5.0));
                assert_eq!(max, Some(5.0));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn rejects_unsupported_top_n() {
        assert!(Cli::try_parse_from(["coinsieve", "rank", "--top", "20"]).is_err());
    }

    #[test]
    fn parses_toggle_and_globals() {
        let cli = Cli::parse_from(["coinsieve", "toggle", "high-volume", "--data", "/tmp/x", "-v"]);
        assert!(cli.verbose);
        assert_eq!(cli.data, Some(PathBuf::from("/tmp/x")));
        match cli.command {
            Some(Commands::Toggle { filter }) => assert_eq!(filter, QuickFilter::HighVolume),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
