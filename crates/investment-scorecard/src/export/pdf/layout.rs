use super::metrics::Font;
use crate::scorecard::Scorecard;

pub const PAGE_WIDTH: f64 = 612.0;
pub const PAGE_HEIGHT: f64 = 792.0;
const MARGIN: f64 = 50.0;

const HEADING_INDENT: f64 = 50.0;
const SUBFACTOR_INDENT: f64 = 70.0;
const COMMENT_INDENT: f64 = 90.0;

const TITLE_SIZE: f64 = 16.0;
const HEADING_SIZE: f64 = 14.0;
const BODY_SIZE: f64 = 12.0;

pub const REPORT_TITLE: &str = "Investment Scorecard Report";

/// A single positioned run of text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub x: f64,
    pub y: f64,
    pub font: Font,
    pub size: f64,
    pub text: String,
}

/// Flows wrapped paragraphs top-down onto letter pages.
#[derive(Debug)]
pub struct PageLayout {
    pages: Vec<Vec<TextLine>>,
    y: f64,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl PageLayout {
    pub fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    /// Move the cursor down without drawing.
    pub fn skip(&mut self, gap: f64) {
        self.y -= gap;
    }

    /// Draw `text` wrapped to the space right of `x`, starting new pages as lines overflow.
    pub fn paragraph(&mut self, text: &str, x: f64, font: Font, size: f64) {
        let width = PAGE_WIDTH - 2.0 * x;
        for line in wrap(text, width, font, size) {
            if self.y < MARGIN {
                self.pages.push(Vec::new());
                self.y = PAGE_HEIGHT - MARGIN;
            }
            if let Some(page) = self.pages.last_mut() {
                page.push(TextLine {
                    x,
                    y: self.y,
                    font,
                    size,
                    text: line,
                });
            }
            self.y -= size + 2.0;
        }
    }

    pub fn into_pages(self) -> Vec<Vec<TextLine>> {
        self.pages
    }
}

/// Greedy word wrap: a word joins the line while the line stays narrower than `width`.
///
/// A word that is wider than `width` on its own gets a line to itself.
pub fn wrap(text: &str, width: f64, font: Font, size: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if font.text_width(&candidate, size) < width {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    lines.push(current);
    lines
}

/// Lay out the full report: title, one block per factor, then the summary.
pub fn layout_report(scorecard: &Scorecard) -> Vec<Vec<TextLine>> {
    let mut layout = PageLayout::new();

    layout.paragraph(REPORT_TITLE, HEADING_INDENT, Font::Bold, TITLE_SIZE);
    layout.skip(20.0);

    for factor in scorecard.factors() {
        layout.paragraph(&factor.name, HEADING_INDENT, Font::Bold, HEADING_SIZE);
        layout.skip(10.0);
        for subfactor in factor.subfactors() {
            layout.paragraph(
                &format!("{}: Score {}", subfactor.name, subfactor.score),
                SUBFACTOR_INDENT,
                Font::Regular,
                BODY_SIZE,
            );
            layout.skip(5.0);
            layout.paragraph(
                &format!("Comment: {}", subfactor.comment),
                COMMENT_INDENT,
                Font::Regular,
                BODY_SIZE,
            );
            layout.skip(10.0);
        }
        layout.paragraph(
            &format!(
                "Average Score: {:.2}, Weight: {:.2}",
                factor.average_score(),
                factor.weight
            ),
            HEADING_INDENT,
            Font::Regular,
            BODY_SIZE,
        );
        layout.skip(20.0);
    }

    layout.paragraph("Summary", HEADING_INDENT, Font::Bold, HEADING_SIZE);
    layout.skip(10.0);
    layout.paragraph(
        &format!(
            "Total Score: {:.2} / {:.2}",
            scorecard.total_score(),
            scorecard.max_possible_score()
        ),
        HEADING_INDENT,
        Font::Regular,
        BODY_SIZE,
    );
    layout.skip(5.0);
    layout.paragraph(
        &format!(
            "Percentage of Max Score: {:.2}%",
            scorecard.percentage_of_max()
        ),
        HEADING_INDENT,
        Font::Regular,
        BODY_SIZE,
    );

    layout.into_pages()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_breaks_before_the_line_reaches_the_width() {
        // "aa" is 2 * 556 units = 11.12pt at 10pt; "aa aa" is 25.02pt.
        let lines = wrap("aa aa aa", 25.02, Font::Regular, 10.0);
        assert_eq!(lines, ["aa", "aa", "aa"]);
        let lines = wrap("aa aa aa", 25.03, Font::Regular, 10.0);
        assert_eq!(lines, ["aa aa", "aa"]);
    }

    #[test]
    fn wrap_keeps_overlong_words_and_empty_text() {
        assert_eq!(
            wrap("extraordinarily short", 10.0, Font::Regular, 12.0),
            ["extraordinarily", "short"]
        );
        assert_eq!(wrap("   ", 100.0, Font::Regular, 12.0), [""]);
    }

    #[test]
    fn default_report_fits_on_one_page() {
        let scorecard = Scorecard::standard().expect("standard scorecard");
        let pages = layout_report(&scorecard);
        assert_eq!(pages.len(), 1);

        let lines = &pages[0];
        assert_eq!(lines[0].text, REPORT_TITLE);
        assert_eq!(lines[0].y, 742.0);
        assert_eq!(lines[1].text, "Team");
        assert_eq!(lines[1].y, 704.0);
        assert_eq!(lines[2].text, "Ability: Score 3");
        assert_eq!((lines[2].x, lines[2].y), (70.0, 678.0));
        assert_eq!(lines[3].text, "Comment:");
        assert_eq!((lines[3].x, lines[3].y), (90.0, 659.0));

        let last = lines.last().expect("summary line");
        assert_eq!(last.text, "Percentage of Max Score: 60.00%");
        assert_eq!(last.y, 92.0);
    }

    #[test]
    fn long_comments_spill_onto_new_pages() {
        let mut scorecard = Scorecard::standard().expect("standard scorecard");
        let comment = "growth ".repeat(40);
        for factor in ["Team", "Product", "Market"] {
            let names: Vec<String> = scorecard
                .factor(factor)
                .expect("factor present")
                .subfactors()
                .iter()
                .map(|sf| sf.name.clone())
                .collect();
            for name in names {
                scorecard
                    .update_comment(factor, &name, comment.trim_end())
                    .expect("comment fits");
            }
        }

        let pages = layout_report(&scorecard);
        assert!(pages.len() >= 2);
        for page in &pages {
            assert!(page.iter().all(|line| line.y >= MARGIN));
        }
        assert_eq!(pages[1][0].y, 742.0);
    }
}
