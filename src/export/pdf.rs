//! Cleaned-notes PDF: one flowing block of Helvetica text on A4 pages.

use super::ExportError;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, StringFormat, dictionary};
use unicode_width::UnicodeWidthStr;

/// Page geometry and type settings, in PDF points
#[derive(Debug, Clone, Copy)]
pub struct PdfLayout {
    pub page_width: i64,
    pub page_height: i64,
    pub margin: i64,
    pub font_size: i64,
    pub line_height: i64,
}

impl Default for PdfLayout {
    fn default() -> Self {
        // A4
        Self {
            page_width: 595,
            page_height: 842,
            margin: 50,
            font_size: 12,
            line_height: 16,
        }
    }
}

impl PdfLayout {
    /// Characters per line, assuming Helvetica's average glyph is ~0.55em wide.
    pub fn columns(&self) -> usize {
        let printable = (self.page_width - 2 * self.margin) as f64;
        (printable / (self.font_size as f64 * 0.55)).floor().max(1.0) as usize
    }

    pub fn lines_per_page(&self) -> usize {
        ((self.page_height - 2 * self.margin) / self.line_height).max(1) as usize
    }
}

/// Render `text` with the default layout.
pub fn notes(text: &str) -> Result<Vec<u8>, ExportError> {
    render(text, &PdfLayout::default())
}

pub fn render(text: &str, layout: &PdfLayout) -> Result<Vec<u8>, ExportError> {
    let lines = wrap(text, layout.columns());
    let pages: Vec<&[String]> = if lines.is_empty() {
        vec![&lines[..]]
    } else {
        lines.chunks(layout.lines_per_page()).collect()
    };

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids = Vec::with_capacity(pages.len());
    for page_lines in &pages {
        let page_id = add_page(&mut doc, pages_id, page_lines, layout)?;
        kids.push(Object::Reference(page_id));
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_count,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(layout.page_width),
                Object::Integer(layout.page_height),
            ],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut out = Vec::new();
    doc.save_to(&mut out)
        .map_err(|e| ExportError::Pdf(e.to_string()))?;

    tracing::debug!("Rendered notes PDF: {} page(s), {} bytes", pages.len(), out.len());
    Ok(out)
}

fn add_page(
    doc: &mut Document,
    parent: ObjectId,
    lines: &[String],
    layout: &PdfLayout,
) -> Result<ObjectId, ExportError> {
    let mut operations = vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec!["F1".into(), Object::Integer(layout.font_size)]),
        Operation::new("TL", vec![Object::Integer(layout.line_height)]),
        Operation::new(
            "Td",
            vec![
                Object::Integer(layout.margin),
                Object::Integer(layout.page_height - layout.margin - layout.font_size),
            ],
        ),
    ];
    for line in lines {
        operations.push(Operation::new(
            "Tj",
            vec![Object::String(encode_win_ansi(line), StringFormat::Literal)],
        ));
        operations.push(Operation::new("T*", vec![]));
    }
    operations.push(Operation::new("ET", vec![]));

    let content = Content { operations }
        .encode()
        .map_err(|e| ExportError::Pdf(e.to_string()))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, content));

    Ok(doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => parent,
        "Contents" => content_id,
    }))
}

/// Word-wrap to `columns` display cells. Blank source lines are kept;
/// words longer than a line are split.
pub fn wrap(text: &str, columns: usize) -> Vec<String> {
    let columns = columns.max(1);
    let mut out = Vec::new();

    for source in text.trim_end().lines() {
        let source = source.trim_end();
        if source.is_empty() {
            out.push(String::new());
            continue;
        }

        let mut line: String = source.chars().take_while(|c| c.is_whitespace()).collect();
        for word in source.split_whitespace() {
            for piece in split_long_word(word, columns) {
                let sep = if line.trim().is_empty() { "" } else { " " };
                if line.width() + sep.len() + piece.width() > columns && !line.trim().is_empty() {
                    out.push(std::mem::take(&mut line));
                    line.push_str(&piece);
                } else {
                    line.push_str(sep);
                    line.push_str(&piece);
                }
            }
        }
        out.push(line);
    }
    out
}

fn split_long_word(word: &str, columns: usize) -> Vec<String> {
    if word.width() <= columns {
        return vec![word.to_string()];
    }
    let mut pieces = Vec::new();
    let mut current = String::new();
    for c in word.chars() {
        let w = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
        if current.width() + w > columns && !current.is_empty() {
            pieces.push(std::mem::take(&mut current));
        }
        current.push(c);
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// Encode for the WinAnsi base font. Unmappable characters become `?`.
fn encode_win_ansi(line: &str) -> Vec<u8> {
    line.chars()
        .map(|c| match c {
            '\u{2022}' => 0x95, // bullet
            '\u{2013}' => 0x96, // en dash
            '\u{2014}' => 0x97, // em dash
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2026}' => 0x85, // ellipsis
            '\u{20AC}' => 0x80, // euro
            '\t' => b' ',
            c if (c as u32) >= 0x20 && (c as u32) < 0x7F => c as u8,
            c if (c as u32) >= 0xA0 && (c as u32) <= 0xFF => c as u32 as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_respects_columns() {
        let text = "the quick brown fox jumps over the lazy dog ".repeat(10);
        let lines = wrap(&text, 30);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.width() <= 30, "{line:?} too wide");
        }
        let rejoined = lines.join(" ");
        assert_eq!(
            rejoined.split_whitespace().count(),
            text.split_whitespace().count()
        );
    }

    #[test]
    fn test_wrap_keeps_blank_lines_and_indent() {
        let lines = wrap("# Heading\n\n  - point", 80);
        assert_eq!(lines, vec!["# Heading", "", "  - point"]);
    }

    #[test]
    fn test_wrap_splits_long_words() {
        let lines = wrap(&"x".repeat(25), 10);
        assert_eq!(lines, vec!["x".repeat(10), "x".repeat(10), "x".repeat(5)]);
    }

    #[test]
    fn test_encode_win_ansi() {
        assert_eq!(encode_win_ansi("a\u{2022}é"), vec![b'a', 0x95, 0xE9]);
        assert_eq!(encode_win_ansi("日"), vec![b'?']);
    }

    #[test]
    fn test_notes_pdf_is_loadable() {
        let bytes = notes("# Biology\n\n- Photosynthesis turns light into sugar").unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_long_notes_break_across_pages() {
        let layout = PdfLayout::default();
        let text = (0..layout.lines_per_page() * 2 + 5)
            .map(|i| format!("line {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let doc = Document::load_mem(&notes(&text).unwrap()).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn test_empty_notes_still_one_page() {
        let doc = Document::load_mem(&notes("").unwrap()).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }
}
