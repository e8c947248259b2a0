use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "persona")]
#[command(version)]
#[command(about = "Build an evidence-backed persona from a Reddit user's public activity")]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub analyze: AnalyzeArgs,
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Reddit username or profile URL to analyze
    #[arg(required = true)]
    pub target: Option<String>,

    /// Maximum number of posts and of comments to analyze
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..))]
    pub limit: u32,

    /// Where to save the persona JSON (default: persona_<user>_<timestamp>.json)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Only print the report, do not save the persona JSON
    #[arg(long)]
    pub report_only: bool,

    /// Suppress progress messages
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Re-render the report from a saved persona file
    Report {
        /// Path to a persona JSON file
        file: PathBuf,
    },

    /// Print the credentials setup guide
    Setup {
        /// Prompt for credentials and save them to the config file
        #[arg(long)]
        interactive: bool,
    },

    /// Validate the configuration and list missing credentials
    Check,

    /// Print version information
    Version,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_bare_username() {
        let cli = Cli::try_parse_from(["persona", "spez"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.analyze.target.as_deref(), Some("spez"));
        assert_eq!(cli.analyze.limit, 100);
        assert!(!cli.analyze.report_only);
        assert!(!cli.analyze.quiet);
    }

    #[test]
    fn test_cli_parse_analyze_flags() {
        let cli = Cli::try_parse_from([
            "persona",
            "https://www.reddit.com/user/spez/",
            "--limit",
            "25",
            "--output",
            "spez.json",
            "--report-only",
            "--quiet",
        ])
        .unwrap();
        assert_eq!(cli.analyze.limit, 25);
        assert_eq!(cli.analyze.output, Some(PathBuf::from("spez.json")));
        assert!(cli.analyze.report_only);
        assert!(cli.analyze.quiet);
    }

    #[test]
    fn test_cli_rejects_zero_limit() {
        assert!(Cli::try_parse_from(["persona", "spez", "--limit", "0"]).is_err());
    }

    #[test]
    fn test_cli_requires_target() {
        assert!(Cli::try_parse_from(["persona"]).is_err());
    }

    #[test]
    fn test_cli_parse_subcommands() {
        let cli = Cli::try_parse_from(["persona", "report", "persona_spez.json"]).unwrap();
        if let Some(Commands::Report { file }) = cli.command {
            assert_eq!(file, PathBuf::from("persona_spez.json"));
        } else {
            panic!("Expected Report command");
        }

        let cli = Cli::try_parse_from(["persona", "setup", "--interactive"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Setup { interactive: true })));
        let cli = Cli::try_parse_from(["persona", "setup"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Setup { interactive: false })));

        for name in ["setup", "check", "version"] {
            let cli = Cli::try_parse_from(["persona", name]);
            assert!(cli.is_ok(), "Failed to parse {}", name);
            assert!(cli.unwrap().command.is_some());
        }
    }
}
