use crate::demo::{run_demo, run_report, DemoArgs, ReportArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use investment_scorecard::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Investment Scorecard",
    about = "Rate startups on weighted factors and export scorecard reports",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Build a scorecard from flags and print or export it
    Report(ReportArgs),
    /// Walk through a sample scoring session, including rejected weight updates
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Report(args) => run_report(args),
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve_without_subcommand() {
        let cli = Cli::try_parse_from(["investment-scorecard"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn report_accepts_repeated_assignments() {
        let cli = Cli::try_parse_from([
            "investment-scorecard",
            "report",
            "--score",
            "Team/Ability=5",
            "--score",
            "Team/Speed=4",
            "--comment",
            "Market/Size=Large",
            "--weights",
            "2,1,1",
            "--format",
            "csv",
        ])
        .expect("parses");
        match cli.command {
            Some(Command::Report(args)) => {
                assert_eq!(args.scores.len(), 2);
                assert_eq!(args.comments[0].comment, "Large");
                assert_eq!(args.weights.map(|w| w.0), Some(vec![2.0, 1.0, 1.0]));
            }
            other => panic!("expected report command, got {other:?}"),
        }
    }

    #[test]
    fn weights_and_equal_weights_conflict() {
        let parsed = Cli::try_parse_from([
            "investment-scorecard",
            "report",
            "--weights",
            "1,1,1",
            "--equal-weights",
        ]);
        assert!(parsed.is_err());
    }
}
