use super::layout::{TextLine, PAGE_HEIGHT, PAGE_WIDTH, REPORT_TITLE};
use super::metrics::Font;
use chrono::{DateTime, Utc};
use std::io::{self, Write};

const FIRST_PAGE_OBJECT: usize = 5;

/// Minimal PDF 1.4 writer for pages of positioned text in the standard fonts.
#[derive(Debug)]
pub struct PdfDocument {
    pages: Vec<Vec<TextLine>>,
    created_at: DateTime<Utc>,
}

impl PdfDocument {
    pub fn new(pages: Vec<Vec<TextLine>>, created_at: DateTime<Utc>) -> Self {
        Self { pages, created_at }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut objects: Vec<Vec<u8>> = Vec::new();
        let page_ids: Vec<usize> = (0..self.pages.len())
            .map(|index| FIRST_PAGE_OBJECT + index * 2)
            .collect();
        let info_id = FIRST_PAGE_OBJECT + self.pages.len() * 2;

        objects.push(b"<< /Type /Catalog /Pages 2 0 R >>".to_vec());
        let kids = page_ids
            .iter()
            .map(|id| format!("{id} 0 R"))
            .collect::<Vec<_>>()
            .join(" ");
        objects.push(
            format!(
                "<< /Type /Pages /Kids [{kids}] /Count {} >>",
                self.pages.len()
            )
            .into_bytes(),
        );
        for font in [Font::Regular, Font::Bold] {
            objects.push(
                format!(
                    "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                    font.base_font()
                )
                .into_bytes(),
            );
        }

        for (page, page_id) in self.pages.iter().zip(&page_ids) {
            let content_id = page_id + 1;
            objects.push(
                format!(
                    "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH} {PAGE_HEIGHT}] \
                     /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {content_id} 0 R >>"
                )
                .into_bytes(),
            );

            let stream = content_stream(page);
            let mut object = format!("<< /Length {} >>\nstream\n", stream.len()).into_bytes();
            object.extend_from_slice(&stream);
            object.extend_from_slice(b"\nendstream");
            objects.push(object);
        }

        let mut info = b"<< /Title (".to_vec();
        info.extend_from_slice(&encode_text(REPORT_TITLE));
        info.extend_from_slice(
            format!(
                ") /Producer (investment-scorecard) /CreationDate ({}) >>",
                self.created_at.format("D:%Y%m%d%H%M%SZ")
            )
            .as_bytes(),
        );
        objects.push(info);

        let mut out = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n".to_vec();
        let mut offsets = Vec::with_capacity(objects.len());
        for (index, body) in objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n", index + 1).as_bytes());
            out.extend_from_slice(body);
            out.extend_from_slice(b"\nendobj\n");
        }

        let xref_offset = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n", objects.len() + 1).as_bytes());
        out.extend_from_slice(b"0000000000 65535 f \n");
        for offset in offsets {
            out.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R /Info {info_id} 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
                objects.len() + 1
            )
            .as_bytes(),
        );
        out
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writer.write_all(&self.to_bytes())?;
        writer.flush()
    }
}

fn content_stream(lines: &[TextLine]) -> Vec<u8> {
    let mut stream = Vec::new();
    for line in lines {
        stream.extend_from_slice(
            format!(
                "BT /{} {} Tf {:.2} {:.2} Td (",
                line.font.resource(),
                line.size,
                line.x,
                line.y
            )
            .as_bytes(),
        );
        stream.extend_from_slice(&encode_text(&line.text));
        stream.extend_from_slice(b") Tj ET\n");
    }
    stream
}

/// Encode `text` as the body of a PDF literal string in WinAnsi.
///
/// Delimiters are escaped; characters without a single-byte Latin-1 form become `?`.
pub(crate) fn encode_text(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '(' | ')' | '\\' => {
                bytes.push(b'\\');
                bytes.push(ch as u8);
            }
            ' '..='~' => bytes.push(ch as u8),
            '\u{a0}'..='\u{ff}' => bytes.push(ch as u32 as u8),
            _ => bytes.push(b'?'),
        }
    }
    bytes
}
