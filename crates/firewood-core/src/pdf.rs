//! # PDF Encoder
//!
//! Writes a [`Document`] as a single-page PDF 1.4 file.
//!
//! ## File Structure
//! ```text
//! %PDF-1.4
//! 1 0 obj  Catalog ──► 2 0 obj  Pages ──► 3 0 obj  Page (A4)
//!                                              │
//!                               ┌──────────────┼──────────────┐
//!                               ▼              ▼              ▼
//!                        4 0 obj content  5 0 obj /F1    6 0 obj /F2
//!                        (BT … ET runs)   Helvetica      Helvetica-Bold
//! 7 0 obj  Info (Title, Producer)
//! xref / trailer / startxref / %%EOF
//! ```
//!
//! Coordinates arrive in millimetres from the top-left corner and are
//! converted to points from the bottom-left. Output depends only on the
//! document, so the same document always yields the same bytes.

use std::fmt::Write as _;

use crate::receipt::{Document, FontWeight, Rgb, TextRun};

/// A4 width in points.
pub const PAGE_WIDTH_PT: f64 = 595.28;
/// A4 height in points.
pub const PAGE_HEIGHT_PT: f64 = 841.89;

const PT_PER_MM: f64 = 72.0 / 25.4;

const PRODUCER: &str = "firewood-core";

fn mm_to_pt(mm: f64) -> f64 {
    mm * PT_PER_MM
}

/// Encodes text for a literal string with the standard fonts' WinAnsi
/// encoding. Characters outside Latin-1 become `?`.
fn encode_literal(text: &str, out: &mut Vec<u8>) {
    out.push(b'(');
    for c in text.chars() {
        let byte = match u32::from(c) {
            code @ 0x20..=0x7E => code as u8,
            code @ 0xA0..=0xFF => code as u8,
            _ => b'?',
        };
        if matches!(byte, b'(' | b')' | b'\\') {
            out.push(b'\\');
        }
        out.push(byte);
    }
    out.push(b')');
}

fn color_component(value: u8) -> String {
    format!("{:.3}", f64::from(value) / 255.0)
}

fn write_run(run: &TextRun, out: &mut Vec<u8>) {
    let font = match run.weight {
        FontWeight::Normal => "F1",
        FontWeight::Bold => "F2",
    };
    let Rgb(r, g, b) = run.color;
    let x = mm_to_pt(run.x_mm);
    let y = PAGE_HEIGHT_PT - mm_to_pt(run.y_mm);

    let mut head = String::new();
    let _ = write!(
        head,
        "BT\n/{font} {:.2} Tf\n{} {} {} rg\n{x:.2} {y:.2} Td\n",
        run.size_pt,
        color_component(r),
        color_component(g),
        color_component(b),
    );
    out.extend_from_slice(head.as_bytes());
    encode_literal(&run.text, out);
    out.extend_from_slice(b" Tj\nET\n");
}

/// Builds the page content stream.
pub fn content_stream(doc: &Document) -> Vec<u8> {
    let mut out = Vec::new();
    for run in &doc.runs {
        write_run(run, &mut out);
    }
    out
}

/// Appends objects and remembers where each one starts.
struct PdfWriter {
    buf: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfWriter {
    fn new() -> Self {
        let mut buf = Vec::new();
        buf.extend_from_slice(b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n");
        PdfWriter {
            buf,
            offsets: Vec::new(),
        }
    }

    fn object(&mut self, body: &[u8]) {
        self.offsets.push(self.buf.len());
        let number = self.offsets.len();
        self.buf
            .extend_from_slice(format!("{number} 0 obj\n").as_bytes());
        self.buf.extend_from_slice(body);
        self.buf.extend_from_slice(b"\nendobj\n");
    }

    fn finish(mut self, root: usize, info: usize) -> Vec<u8> {
        let xref_at = self.buf.len();
        let size = self.offsets.len() + 1;

        let mut tail = format!("xref\n0 {size}\n0000000000 65535 f \n");
        for offset in &self.offsets {
            let _ = write!(tail, "{offset:010} 00000 n \n");
        }
        let _ = write!(
            tail,
            "trailer\n<< /Size {size} /Root {root} 0 R /Info {info} 0 R >>\nstartxref\n{xref_at}\n%%EOF\n"
        );
        self.buf.extend_from_slice(tail.as_bytes());
        self.buf
    }
}

/// Renders the document to PDF bytes.
pub fn to_pdf(doc: &Document) -> Vec<u8> {
    let content = content_stream(doc);
    let mut pdf = PdfWriter::new();

    pdf.object(b"<< /Type /Catalog /Pages 2 0 R >>");
    pdf.object(b"<< /Type /Pages /Kids [3 0 R] /Count 1 >>");
    pdf.object(
        format!(
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {PAGE_WIDTH_PT} {PAGE_HEIGHT_PT}] \
             /Resources << /Font << /F1 5 0 R /F2 6 0 R >> >> /Contents 4 0 R >>"
        )
        .as_bytes(),
    );

    let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
    stream.extend_from_slice(&content);
    stream.extend_from_slice(b"\nendstream");
    pdf.object(&stream);

    pdf.object(b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>");
    pdf.object(
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>",
    );

    let mut info = b"<< /Title ".to_vec();
    encode_literal(&doc.title, &mut info);
    info.extend_from_slice(b" /Producer ");
    encode_literal(PRODUCER, &mut info);
    info.extend_from_slice(b" >>");
    pdf.object(&info);

    pdf.finish(1, 7)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Document {
        Document {
            filename: "sample.pdf".into(),
            title: "Sample".into(),
            runs: vec![
                TextRun {
                    x_mm: 20.0,
                    y_mm: 30.0,
                    size_pt: 18.0,
                    weight: FontWeight::Normal,
                    color: Rgb::BRAND_BROWN,
                    text: "Honest Abe's Firewood".into(),
                },
                TextRun {
                    x_mm: 20.0,
                    y_mm: 70.0,
                    size_pt: 12.0,
                    weight: FontWeight::Bold,
                    color: Rgb::BLACK,
                    text: "Note (see back) \\ café".into(),
                },
            ],
        }
    }

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    #[test]
    fn test_header_and_trailer() {
        let bytes = to_pdf(&sample());
        assert!(bytes.starts_with(b"%PDF-1.4\n"));
        assert!(bytes.ends_with(b"%%EOF\n"));
        assert!(find(&bytes, b"/BaseFont /Helvetica-Bold").is_some());
    }

    #[test]
    fn test_xref_offsets_point_at_objects() {
        let bytes = to_pdf(&sample());
        let xref = find(&bytes, b"xref\n").unwrap();
        let table = std::str::from_utf8(&bytes[xref..]).unwrap();

        let entries: Vec<&str> = table.lines().skip(3).take(7).collect();
        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(entry.len() + 1, 20, "entry {i} must be 20 bytes");
            let offset: usize = entry[..10].parse().unwrap();
            let expected = format!("{} 0 obj", i + 1);
            assert!(bytes[offset..].starts_with(expected.as_bytes()));
        }

        let startxref: usize = table
            .lines()
            .skip_while(|l| *l != "startxref")
            .nth(1)
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(startxref, xref);
    }

    #[test]
    fn test_text_is_escaped_and_positioned() {
        let content = content_stream(&sample());
        let text = String::from_utf8_lossy(&content);
        assert!(text.contains("(Honest Abe's Firewood) Tj"));
        assert!(text.contains("/F2 12.00 Tf"));
        assert!(text.contains("0.290 0.247 0.208 rg"));
        // 20 mm = 56.69 pt, 841.89 - 30 mm (85.04 pt) = 756.85
        assert!(text.contains("56.69 756.85 Td"));
        assert!(find(&content, b"(Note \\(see back\\) \\\\ caf\xE9) Tj").is_some());
    }

    #[test]
    fn test_output_is_deterministic() {
        assert_eq!(to_pdf(&sample()), to_pdf(&sample()));
    }

    #[test]
    fn test_stream_length_matches() {
        let doc = sample();
        let bytes = to_pdf(&doc);
        let content = content_stream(&doc);
        let header = format!("<< /Length {} >>\nstream\n", content.len());
        let start = find(&bytes, header.as_bytes()).unwrap() + header.len();
        assert_eq!(&bytes[start..start + content.len()], content.as_slice());
        assert!(bytes[start + content.len()..].starts_with(b"\nendstream"));
    }
}
