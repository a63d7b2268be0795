use super::{format_float, ExportError};
use crate::scorecard::Scorecard;
use std::io::Write;

const HEADER: [&str; 5] = ["Factor", "Subfactor", "Score", "Comment", "Weight"];

/// Write one row per subfactor followed by a blank row and the summary rows.
///
/// Rows end in CRLF. The weight column carries the factor's normalized weight.
pub fn write_csv<W: Write>(scorecard: &Scorecard, writer: W) -> Result<(), ExportError> {
    let mut csv_writer = csv_builder().from_writer(writer);

    csv_writer.write_record(HEADER)?;
    for factor in scorecard.factors() {
        let weight = format_float(factor.weight);
        for subfactor in factor.subfactors() {
            let score = subfactor.score.to_string();
            csv_writer.write_record([
                factor.name.as_str(),
                subfactor.name.as_str(),
                score.as_str(),
                subfactor.comment.as_str(),
                weight.as_str(),
            ])?;
        }
    }

    // An empty record would be quoted as `""`, so the separator row is written raw.
    let mut inner = csv_writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))?;
    inner.write_all(b"\r\n")?;

    let total = format_float(scorecard.total_score());
    let max = format!("{}", scorecard.max_possible_score());
    let percentage = format!("{:.2}%", scorecard.percentage_of_max());
    let mut csv_writer = csv_builder().from_writer(inner);
    csv_writer.write_record(["Total Score", total.as_str()])?;
    csv_writer.write_record(["Max Possible Score", max.as_str()])?;
    csv_writer.write_record(["Percentage of Max Score", percentage.as_str()])?;
    csv_writer.flush()?;
    Ok(())
}

fn csv_builder() -> ::csv::WriterBuilder {
    let mut builder = ::csv::WriterBuilder::new();
    builder.flexible(true).terminator(::csv::Terminator::CRLF);
    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(scorecard: &Scorecard) -> String {
        let mut buffer = Vec::new();
        write_csv(scorecard, &mut buffer).expect("csv renders");
        String::from_utf8(buffer).expect("csv is utf-8")
    }

    #[test]
    fn default_scorecard_renders_fourteen_rows() {
        let scorecard = Scorecard::standard().expect("standard scorecard");
        let csv = render(&scorecard);
        let lines: Vec<_> = csv.split("\r\n").collect();
        // trailing terminator leaves an empty tail
        assert_eq!(lines.len(), 15);
        assert_eq!(lines[0], "Factor,Subfactor,Score,Comment,Weight");
        assert_eq!(lines[1], "Team,Ability,3,,0.5");
        assert_eq!(lines[9], "Market,Dynamics,3,,0.2");
        assert_eq!(lines[10], "");
        assert_eq!(lines[11], "Total Score,3.0");
        assert_eq!(lines[12], "Max Possible Score,5");
        assert_eq!(lines[13], "Percentage of Max Score,60.00%");
        assert_eq!(lines[14], "");
    }

    #[test]
    fn separator_row_is_bare_between_data_and_summary() {
        let scorecard = Scorecard::standard().expect("standard scorecard");
        let csv = render(&scorecard);
        assert!(csv.contains("Market,Dynamics,3,,0.2\r\n\r\nTotal Score,3.0\r\n"));
        assert!(!csv.contains("\"\""));
    }

    #[test]
    fn comments_with_delimiters_are_quoted() {
        let mut scorecard = Scorecard::standard().expect("standard scorecard");
        scorecard
            .update_comment("Team", "Speed", "Fast, \"very\" fast")
            .expect("valid comment");
        let csv = render(&scorecard);
        assert!(csv.contains("Team,Speed,3,\"Fast, \"\"very\"\" fast\",0.5\r\n"));
    }
}
