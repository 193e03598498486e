use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "stackline")]
#[command(bin_name = "stackline")]
#[command(version)]
#[command(about = "Terminal UI for stacked branches managed by gt")]
pub struct Cli {
    #[arg(
        long,
        global = true,
        help = "Write a diagnostics log under ~/.config/stackline/diagnostics"
    )]
    pub diagnostics: bool,

    #[arg(long, help = "Do not refresh automatically when branches change")]
    pub no_watch: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    #[command(about = "Run environment and configuration checks")]
    Doctor,
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Command};

    #[test]
    fn bare_invocation_starts_the_interface() {
        let cli = Cli::try_parse_from(["stackline"]).expect("parse");
        assert!(cli.command.is_none());
        assert!(!cli.no_watch);
        assert!(!cli.diagnostics);
    }

    #[test]
    fn diagnostics_flag_is_accepted_after_subcommand() {
        let cli = Cli::try_parse_from(["stackline", "doctor", "--diagnostics"]).expect("parse");
        assert!(matches!(cli.command, Some(Command::Doctor)));
        assert!(cli.diagnostics);
    }

    #[test]
    fn no_watch_flag_parses() {
        let cli = Cli::try_parse_from(["stackline", "--no-watch"]).expect("parse");
        assert!(cli.no_watch);
    }
}
