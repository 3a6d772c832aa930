//! Minimal SpreadsheetML writer.
//!
//! An `.xlsx` file is a zip of XML parts. Only what a single-sheet table
//! needs is written: inline strings, numeric cells, one `0.00` number style.

use super::ExportError;
use crate::session::ExpenseRow;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::{Cursor, Write};
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const NS_REL: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

// Style 0 = general, style 1 = built-in number format 2 ("0.00")
const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><fonts count="1"><font><sz val="11"/><name val="Calibri"/></font></fonts><fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills><borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="2"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="2" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/></cellXfs></styleSheet>"#;

/// Header of the expense sheet, in column order
pub const EXPENSE_HEADERS: [&str; 4] = ["Description", "Amount", "Category", "Date"];

/// A worksheet cell value
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
}

/// Encode expenses as a one-sheet workbook named `Expenses`.
pub fn expenses(rows: &[ExpenseRow]) -> Result<Vec<u8>, ExportError> {
    let data: Vec<Vec<Cell>> = rows
        .iter()
        .map(|r| {
            vec![
                Cell::Text(r.description.clone()),
                Cell::Number(r.amount),
                Cell::Text(r.category.clone()),
                Cell::Text(r.date.format("%Y-%m-%d").to_string()),
            ]
        })
        .collect();
    workbook("Expenses", &EXPENSE_HEADERS, &data)
}

/// Encode a header row plus data rows as a single-sheet workbook.
pub fn workbook(sheet_name: &str, headers: &[&str], rows: &[Vec<Cell>]) -> Result<Vec<u8>, ExportError> {
    let workbook_xml = workbook_part(sheet_name)?;
    let sheet_xml = sheet_part(headers, rows)?;

    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let parts: [(&str, &[u8]); 5] = [
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
        ("_rels/.rels", ROOT_RELS.as_bytes()),
        ("xl/workbook.xml", &workbook_xml),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.as_bytes()),
        ("xl/styles.xml", STYLES.as_bytes()),
    ];
    for (name, body) in parts {
        zip.start_file(name, options).map_err(zip_err)?;
        zip.write_all(body)?;
    }
    zip.start_file("xl/worksheets/sheet1.xml", options)
        .map_err(zip_err)?;
    zip.write_all(&sheet_xml)?;

    let cursor = zip.finish().map_err(zip_err)?;
    Ok(cursor.into_inner())
}

fn zip_err(e: zip::result::ZipError) -> ExportError {
    ExportError::Spreadsheet(e.to_string())
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), ExportError> {
    writer
        .write_event(event)
        .map_err(|e| ExportError::Spreadsheet(e.to_string()))
}

fn declaration(writer: &mut Writer<Vec<u8>>) -> Result<(), ExportError> {
    emit(
        writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))),
    )
}

fn workbook_part(sheet_name: &str) -> Result<Vec<u8>, ExportError> {
    let mut w = Writer::new(Vec::new());
    declaration(&mut w)?;
    emit(
        &mut w,
        Event::Start(BytesStart::new("workbook").with_attributes([("xmlns", NS_MAIN), ("xmlns:r", NS_REL)])),
    )?;
    emit(&mut w, Event::Start(BytesStart::new("sheets")))?;
    emit(
        &mut w,
        Event::Empty(BytesStart::new("sheet").with_attributes([
            ("name", sheet_name),
            ("sheetId", "1"),
            ("r:id", "rId1"),
        ])),
    )?;
    emit(&mut w, Event::End(BytesEnd::new("sheets")))?;
    emit(&mut w, Event::End(BytesEnd::new("workbook")))?;
    Ok(w.into_inner())
}

fn sheet_part(headers: &[&str], rows: &[Vec<Cell>]) -> Result<Vec<u8>, ExportError> {
    let mut w = Writer::new(Vec::new());
    declaration(&mut w)?;
    emit(
        &mut w,
        Event::Start(BytesStart::new("worksheet").with_attributes([("xmlns", NS_MAIN)])),
    )?;
    emit(&mut w, Event::Start(BytesStart::new("sheetData")))?;

    let header_cells: Vec<Cell> = headers.iter().map(|h| Cell::Text(h.to_string())).collect();
    write_row(&mut w, 1, &header_cells)?;
    for (i, row) in rows.iter().enumerate() {
        write_row(&mut w, i + 2, row)?;
    }

    emit(&mut w, Event::End(BytesEnd::new("sheetData")))?;
    emit(&mut w, Event::End(BytesEnd::new("worksheet")))?;
    Ok(w.into_inner())
}

fn write_row(w: &mut Writer<Vec<u8>>, row_number: usize, cells: &[Cell]) -> Result<(), ExportError> {
    let r = row_number.to_string();
    emit(
        w,
        Event::Start(BytesStart::new("row").with_attributes([("r", r.as_str())])),
    )?;

    for (col, cell) in cells.iter().enumerate() {
        let reference = format!("{}{}", column_name(col), row_number);
        match cell {
            Cell::Text(text) => {
                emit(
                    w,
                    Event::Start(BytesStart::new("c").with_attributes([
                        ("r", reference.as_str()),
                        ("t", "inlineStr"),
                    ])),
                )?;
                emit(w, Event::Start(BytesStart::new("is")))?;
                emit(w, Event::Start(BytesStart::new("t")))?;
                emit(w, Event::Text(BytesText::new(text)))?;
                emit(w, Event::End(BytesEnd::new("t")))?;
                emit(w, Event::End(BytesEnd::new("is")))?;
            }
            Cell::Number(value) => {
                emit(
                    w,
                    Event::Start(BytesStart::new("c").with_attributes([
                        ("r", reference.as_str()),
                        ("s", "1"),
                    ])),
                )?;
                emit(w, Event::Start(BytesStart::new("v")))?;
                emit(w, Event::Text(BytesText::new(&value.to_string())))?;
                emit(w, Event::End(BytesEnd::new("v")))?;
            }
        }
        emit(w, Event::End(BytesEnd::new("c")))?;
    }

    emit(w, Event::End(BytesEnd::new("row")))
}

/// Zero-based column index to spreadsheet letters: 0 → A, 25 → Z, 26 → AA.
pub fn column_name(mut index: usize) -> String {
    let mut name = Vec::new();
    loop {
        name.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    name.reverse();
    String::from_utf8(name).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Read;

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut out = String::new();
        file.read_to_string(&mut out).unwrap();
        out
    }

    /// Numeric `<v>` values in the sheet (text cells are inline strings)
    fn numeric_values(sheet: &str) -> Vec<f64> {
        sheet
            .split("<v>")
            .skip(1)
            .filter_map(|chunk| chunk.split("</v>").next())
            .map(|v| v.parse().unwrap())
            .collect()
    }

    fn row(description: &str, amount: f64, category: &str) -> ExpenseRow {
        ExpenseRow {
            description: description.into(),
            amount,
            category: category.into(),
            date: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
        }
    }

    #[test]
    fn test_column_name() {
        assert_eq!(column_name(0), "A");
        assert_eq!(column_name(3), "D");
        assert_eq!(column_name(25), "Z");
        assert_eq!(column_name(26), "AA");
        assert_eq!(column_name(27), "AB");
        assert_eq!(column_name(701), "ZZ");
        assert_eq!(column_name(702), "AAA");
    }

    #[test]
    fn test_two_expenses_make_two_data_rows() {
        let rows = vec![row("Coffee", 4.50, "Food"), row("Bus", 2.00, "Transport")];
        let bytes = expenses(&rows).unwrap();
        let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");

        // header + 2 data rows
        assert_eq!(sheet.matches("<row ").count(), 3);
        let total: f64 = numeric_values(&sheet).iter().sum();
        assert!((total - 6.50).abs() < 1e-9);
        assert!(sheet.contains(r#"<c r="B2" s="1"><v>4.5</v></c>"#));
        assert!(sheet.contains("<t>Transport</t>"));
    }

    #[test]
    fn test_empty_ledger_is_header_only_workbook() {
        let bytes = expenses(&[]).unwrap();
        let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");
        assert_eq!(sheet.matches("<row ").count(), 1);
        for header in EXPENSE_HEADERS {
            assert!(sheet.contains(&format!("<t>{header}</t>")));
        }
    }

    #[test]
    fn test_package_has_required_parts() {
        let bytes = expenses(&[row("Coffee", 4.5, "Food")]).unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        for part in [
            "[Content_Types].xml",
            "_rels/.rels",
            "xl/workbook.xml",
            "xl/_rels/workbook.xml.rels",
            "xl/styles.xml",
            "xl/worksheets/sheet1.xml",
        ] {
            assert!(names.contains(&part), "missing {part}");
        }
        assert!(read_part(&bytes, "xl/workbook.xml").contains(r#"name="Expenses""#));
    }

    #[test]
    fn test_text_is_escaped() {
        let bytes = expenses(&[row("Fish & <chips>", 3.0, "Food")]).unwrap();
        let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");
        assert!(sheet.contains("Fish &amp; &lt;chips&gt;"));
    }
}
