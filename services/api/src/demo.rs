use crate::infra::{
    parse_comment_assignment, parse_score_assignment, parse_weights, CommentAssignment,
    ScoreAssignment, WeightList,
};
use clap::{Args, ValueEnum};
use investment_scorecard::error::AppError;
use investment_scorecard::export::ExportFormat;
use investment_scorecard::scorecard::{RadarChart, Scorecard, ScorecardReport};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum ReportFormat {
    #[default]
    Text,
    Csv,
    Pdf,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ReportArgs {
    /// Subfactor rating as FACTOR/SUBFACTOR=N (repeatable)
    #[arg(long = "score", value_parser = parse_score_assignment)]
    pub(crate) scores: Vec<ScoreAssignment>,
    /// Subfactor comment as FACTOR/SUBFACTOR=TEXT (repeatable)
    #[arg(long = "comment", value_parser = parse_comment_assignment)]
    pub(crate) comments: Vec<CommentAssignment>,
    /// Raw factor weights in factor order, e.g. 5,3,2. Normalized to sum to one.
    #[arg(long, value_parser = parse_weights, allow_hyphen_values = true)]
    pub(crate) weights: Option<WeightList>,
    /// Give every factor the same weight
    #[arg(long, conflicts_with = "weights")]
    pub(crate) equal_weights: bool,
    /// Output format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub(crate) format: ReportFormat,
    /// Write to this file instead of stdout. PDF output defaults to investment_scorecard.pdf.
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Also write CSV and PDF exports of the final scorecard into this directory
    #[arg(long)]
    pub(crate) export_dir: Option<PathBuf>,
}

pub(crate) fn build_scorecard(args: &ReportArgs) -> Result<Scorecard, AppError> {
    let mut scorecard = Scorecard::standard()?;

    for assignment in &args.scores {
        scorecard.update_score(&assignment.factor, &assignment.subfactor, assignment.score)?;
    }
    for assignment in &args.comments {
        scorecard.update_comment(
            &assignment.factor,
            &assignment.subfactor,
            assignment.comment.as_str(),
        )?;
    }

    if let Some(WeightList(weights)) = &args.weights {
        scorecard.update_weights(weights)?;
    } else if args.equal_weights {
        scorecard.set_equal_weights()?;
    }

    Ok(scorecard)
}

pub(crate) fn run_report(args: ReportArgs) -> Result<(), AppError> {
    let scorecard = build_scorecard(&args)?;

    let (bytes, default_path) = match args.format {
        ReportFormat::Text => (ScorecardReport::from(&scorecard).to_text().into_bytes(), None),
        ReportFormat::Csv => (ExportFormat::Csv.render(&scorecard)?, None),
        ReportFormat::Pdf => (
            ExportFormat::Pdf.render(&scorecard)?,
            Some(PathBuf::from(ExportFormat::Pdf.file_name())),
        ),
    };

    match args.output.or(default_path) {
        Some(path) => {
            fs::write(&path, &bytes)?;
            println!("Wrote {} bytes to {}", bytes.len(), path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("Investment scorecard demo");
    let mut scorecard = Scorecard::standard()?;
    print_summary("Default scorecard", &scorecard);

    for subfactor in ["Ability", "Speed", "X-factor"] {
        scorecard.update_score("Team", subfactor, 5)?;
    }
    scorecard.update_comment(
        "Team",
        "X-factor",
        "Second-time founders with a prior exit",
    )?;
    println!(
        "\nRated every Team subfactor 5: Team average {:.2}, weighted {:.2}",
        scorecard.average_score("Team")?,
        scorecard.weighted_score("Team")?
    );
    print_summary("After team ratings", &scorecard);

    println!("\nWeight validation");
    let attempts: [&[f64]; 3] = [&[1.0, 1.0], &[-1.0, 1.0, 1.0], &[0.0, 0.0, 0.0]];
    for raw in attempts {
        match scorecard.update_weights(raw) {
            Ok(()) => println!("- {raw:?}: accepted"),
            Err(err) => println!("- {raw:?}: rejected ({}) {err}", err.code()),
        }
    }
    println!("- weights unchanged: {}", format_weights(&scorecard));

    scorecard.update_weights(&[5.0, 3.0, 2.0])?;
    println!("- [5, 3, 2] normalized to {}", format_weights(&scorecard));
    scorecard.set_equal_weights()?;
    println!("- equal weights: {}", format_weights(&scorecard));
    print_summary("With equal weights", &scorecard);

    let chart = RadarChart::from_scorecard(&scorecard);
    println!("\nRadar chart series");
    for series in &chart.series {
        let values: Vec<String> = series.values.iter().map(|v| format!("{v:.2}")).collect();
        println!("- {}: {}", series.name, values.join(", "));
    }

    if let Some(dir) = args.export_dir {
        write_exports(&dir, &scorecard)?;
    }
    Ok(())
}

fn write_exports(dir: &Path, scorecard: &Scorecard) -> Result<(), AppError> {
    fs::create_dir_all(dir)?;
    for format in [ExportFormat::Csv, ExportFormat::Pdf] {
        let path = dir.join(format.file_name());
        fs::write(&path, format.render(scorecard)?)?;
        println!("Exported {format} to {}", path.display());
    }
    Ok(())
}

fn print_summary(title: &str, scorecard: &Scorecard) {
    let summary = ScorecardReport::from(scorecard).summary();
    println!(
        "\n{title}: total {:.2} / {:.2} ({:.2}%), overall {} {}",
        summary.total_score,
        summary.max_possible_score,
        summary.percentage_of_max,
        summary.overall_label,
        summary.overall_emoji
    );
}

fn format_weights(scorecard: &Scorecard) -> String {
    scorecard
        .factors()
        .iter()
        .map(|factor| format!("{} {:.3}", factor.name, factor.weight))
        .collect::<Vec<_>>()
        .join(", ")
}
