//! Package-level tests: write a workbook, re-open the ZIP, and inspect the
//! emitted parts.

use std::io::{Cursor, Read};

use pretty_assertions::assert_eq;
use sheetforge_core::{CellValue, RichText, RunStyle, SealedWorkbook, Workbook};
use sheetforge_xlsx::{PackageError, PackageWriter};

fn write_to_buf(sealed: &SealedWorkbook) -> Vec<u8> {
    let mut buf = Vec::new();
    PackageWriter::write(sealed, Cursor::new(&mut buf)).unwrap();
    buf
}

fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut part = archive
        .by_name(name)
        .unwrap_or_else(|_| panic!("missing part {}", name));
    let mut content = String::new();
    part.read_to_string(&mut content).unwrap();
    content
}

fn part_names(bytes: &[u8]) -> Vec<String> {
    let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    archive.file_names().map(|s| s.to_string()).collect()
}

#[test]
fn test_required_parts_present() {
    let mut wb = Workbook::new();
    let idx = wb.add_worksheet("First").unwrap();
    wb.sheet_mut(idx)
        .unwrap()
        .set_shared_text(0, 0, "x", None)
        .unwrap();

    let buf = write_to_buf(&wb.seal());
    let names = part_names(&buf);

    for expected in [
        "[Content_Types].xml",
        "_rels/.rels",
        "xl/workbook.xml",
        "xl/_rels/workbook.xml.rels",
        "xl/styles.xml",
        "xl/sharedStrings.xml",
        "xl/worksheets/sheet1.xml",
    ] {
        assert!(names.iter().any(|n| n == expected), "missing {}", expected);
    }

    let content_types = read_part(&buf, "[Content_Types].xml");
    assert!(content_types.contains("/xl/worksheets/sheet1.xml"));
    assert!(content_types.contains("/xl/sharedStrings.xml"));

    let rels = read_part(&buf, "xl/_rels/workbook.xml.rels");
    assert!(rels.contains("Target=\"worksheets/sheet1.xml\""));
    assert!(rels.contains("Target=\"styles.xml\""));
    assert!(rels.contains("Target=\"sharedStrings.xml\""));
}

#[test]
fn test_shared_strings_part_omitted_when_pool_empty() {
    let mut wb = Workbook::new();
    let idx = wb.add_worksheet("Only").unwrap();
    wb.sheet_mut(idx)
        .unwrap()
        .set_text(0, 0, "inline only", None)
        .unwrap();

    let buf = write_to_buf(&wb.seal());
    let names = part_names(&buf);
    assert!(!names.iter().any(|n| n == "xl/sharedStrings.xml"));

    let content_types = read_part(&buf, "[Content_Types].xml");
    assert!(!content_types.contains("sharedStrings"));
}

#[test]
fn test_empty_workbook_rejected() {
    let sealed = Workbook::new().seal();
    let mut buf = Vec::new();
    let err = PackageWriter::write(&sealed, Cursor::new(&mut buf)).unwrap_err();
    assert!(matches!(err, PackageError::Serialization(_)));
    assert!(buf.is_empty());
}

#[test]
fn test_rows_and_cells_are_one_based() {
    let mut wb = Workbook::new();
    let idx = wb.add_worksheet("Grid").unwrap();
    {
        let mut sheet = wb.sheet_mut(idx).unwrap();
        sheet.set_text(0, 0, "a", None).unwrap();
        sheet.set_text(0, 1, "b", None).unwrap();
        sheet.set_text(2, 0, "c", None).unwrap();
    }

    let buf = write_to_buf(&wb.seal());
    let sheet_xml = read_part(&buf, "xl/worksheets/sheet1.xml");

    assert!(sheet_xml.contains("<row r=\"1\">"));
    assert!(sheet_xml.contains("<row r=\"3\">"));
    assert!(!sheet_xml.contains("<row r=\"0\">"));
    assert!(sheet_xml.contains("<c r=\"A1\""));
    assert!(sheet_xml.contains("<c r=\"B1\""));
    assert!(sheet_xml.contains("<c r=\"A3\""));
}

#[test]
fn test_cell_type_markup() {
    let mut wb = Workbook::new();
    let idx = wb.add_worksheet("Types").unwrap();
    {
        let mut sheet = wb.sheet_mut(idx).unwrap();
        sheet.set_text(0, 0, "inline", None).unwrap();
        sheet.set_shared_text(0, 1, "shared", None).unwrap();
        sheet.set_raw(0, 2, "42", None).unwrap();
    }

    let buf = write_to_buf(&wb.seal());
    let sheet_xml = read_part(&buf, "xl/worksheets/sheet1.xml");

    assert!(sheet_xml.contains("<c r=\"A1\" t=\"inlineStr\"><is><t>inline</t></is></c>"));
    assert!(sheet_xml.contains("<c r=\"B1\" t=\"s\"><v>0</v></c>"));
    assert!(sheet_xml.contains("<c r=\"C1\" t=\"str\"><v>42</v></c>"));
}

#[test]
fn test_shared_string_counts_and_order() {
    let mut wb = Workbook::new();
    let idx = wb.add_worksheet("Data").unwrap();
    {
        let mut sheet = wb.sheet_mut(idx).unwrap();
        sheet.set_shared_text(0, 0, "alpha", None).unwrap();
        sheet.set_shared_text(0, 1, "beta", None).unwrap();
        sheet.set_shared_text(1, 0, "alpha", None).unwrap();
    }

    let buf = write_to_buf(&wb.seal());
    let sst = read_part(&buf, "xl/sharedStrings.xml");

    // Three references, two distinct entries, insertion order preserved
    assert!(sst.contains("count=\"3\""));
    assert!(sst.contains("uniqueCount=\"2\""));
    let alpha = sst.find("<t>alpha</t>").unwrap();
    let beta = sst.find("<t>beta</t>").unwrap();
    assert!(alpha < beta);
}

#[test]
fn test_rich_text_runs_in_shared_table() {
    let mut wb = Workbook::new();
    let idx = wb.add_worksheet("Rich").unwrap();
    {
        let mut sheet = wb.sheet_mut(idx).unwrap();
        let heading = RichText::new()
            .run("Rate (")
            .styled_run(
                "unit: %",
                RunStyle::new()
                    .bold(true)
                    .size(11.0)
                    .color(sheetforge_core::Color::DODGER_BLUE)
                    .font_name("Arial"),
            )
            .run(")");
        sheet.set_shared_rich_text(0, 0, heading, None).unwrap();
    }

    let buf = write_to_buf(&wb.seal());
    let sst = read_part(&buf, "xl/sharedStrings.xml");

    assert!(sst.contains("<si><r><t>Rate (</t></r>"));
    assert!(sst.contains(
        "<r><rPr><b/><sz val=\"11\"/><color rgb=\"FF1E90FF\"/><rFont val=\"Arial\"/></rPr><t>unit: %</t></r>"
    ));
    assert!(sst.contains("<r><t>)</t></r></si>"));
}

#[test]
fn test_inline_rich_text_cell() {
    let mut wb = Workbook::new();
    let idx = wb.add_worksheet("Rich").unwrap();
    {
        let mut sheet = wb.sheet_mut(idx).unwrap();
        let value = RichText::new()
            .styled_run("95", RunStyle::new().color(sheetforge_core::Color::ORANGE))
            .run("%");
        sheet.set_rich_text(0, 0, value, None).unwrap();
    }

    let buf = write_to_buf(&wb.seal());
    let sheet_xml = read_part(&buf, "xl/worksheets/sheet1.xml");

    assert!(sheet_xml.contains("t=\"inlineStr\""));
    assert!(sheet_xml.contains("<rPr><color rgb=\"FFFFA500\"/></rPr><t>95</t>"));
}

#[test]
fn test_merge_records() {
    let mut wb = Workbook::new();
    let idx = wb.add_worksheet("Merged").unwrap();
    {
        let mut sheet = wb.sheet_mut(idx).unwrap();
        sheet.set_text(0, 0, "spanning", None).unwrap();
        sheet.merge("A1:A3").unwrap();
    }

    let buf = write_to_buf(&wb.seal());
    let sheet_xml = read_part(&buf, "xl/worksheets/sheet1.xml");

    assert!(sheet_xml.contains("<mergeCells count=\"1\">"));
    assert_eq!(sheet_xml.matches("<mergeCell ").count(), 1);
    assert!(sheet_xml.contains("<mergeCell ref=\"A1:A3\"/>"));
}

#[test]
fn test_column_widths_and_sheet_format() {
    let mut wb = Workbook::new();
    let idx = wb.add_worksheet("Cols").unwrap();
    {
        let mut sheet = wb.sheet_mut(idx).unwrap();
        sheet.set_default_column_width(15.0).unwrap();
        sheet.set_default_row_height(13.5).unwrap();
        sheet.set_column_width(0, 0, 5.0).unwrap();
        sheet.set_column_width(1, 2, 30.0).unwrap();
        sheet.set_text(0, 0, "x", None).unwrap();
    }

    let buf = write_to_buf(&wb.seal());
    let sheet_xml = read_part(&buf, "xl/worksheets/sheet1.xml");

    assert!(
        sheet_xml.contains("<sheetFormatPr defaultColWidth=\"15\" defaultRowHeight=\"13.5\"/>")
    );
    assert!(sheet_xml.contains("<col min=\"1\" max=\"1\" width=\"5\" customWidth=\"1\"/>"));
    assert!(sheet_xml.contains("<col min=\"2\" max=\"3\" width=\"30\" customWidth=\"1\"/>"));

    // Part order: sheetFormatPr, then cols, then sheetData
    let fmt = sheet_xml.find("<sheetFormatPr").unwrap();
    let cols = sheet_xml.find("<cols>").unwrap();
    let data = sheet_xml.find("<sheetData>").unwrap();
    assert!(fmt < cols && cols < data);
}

#[test]
fn test_styled_empty_cell_is_preserved() {
    let mut wb = Workbook::new();
    let style = {
        let font = wb
            .styles_mut()
            .register_font(sheetforge_core::Font::new().bold(true))
            .unwrap();
        wb.styles_mut().register_style(font, 0, 0, None).unwrap()
    };
    let idx = wb.add_worksheet("Empty").unwrap();
    {
        let mut sheet = wb.sheet_mut(idx).unwrap();
        sheet
            .set_cell(0, 0, CellValue::Empty, Some(style))
            .unwrap();
        sheet.set_cell(0, 1, CellValue::Empty, None).unwrap();
    }

    let buf = write_to_buf(&wb.seal());
    let sheet_xml = read_part(&buf, "xl/worksheets/sheet1.xml");

    assert!(sheet_xml.contains(&format!("<c r=\"A1\" s=\"{}\"/>", style)));
    assert!(!sheet_xml.contains("<c r=\"B1\""));
}

#[test]
fn test_xml_escaping() {
    let mut wb = Workbook::new();
    let idx = wb.add_worksheet("Escapes").unwrap();
    wb.sheet_mut(idx)
        .unwrap()
        .set_text(0, 0, "a<b>&\"c\"", None)
        .unwrap();

    let buf = write_to_buf(&wb.seal());
    let sheet_xml = read_part(&buf, "xl/worksheets/sheet1.xml");
    assert!(sheet_xml.contains("<t>a&lt;b&gt;&amp;&quot;c&quot;</t>"));
}

#[test]
fn test_whitespace_preserved_in_text() {
    let mut wb = Workbook::new();
    let idx = wb.add_worksheet("Ws").unwrap();
    wb.sheet_mut(idx)
        .unwrap()
        .set_shared_text(0, 0, " padded ", None)
        .unwrap();

    let buf = write_to_buf(&wb.seal());
    let sst = read_part(&buf, "xl/sharedStrings.xml");
    assert!(sst.contains("<t xml:space=\"preserve\"> padded </t>"));
}

#[test]
fn test_write_file_produces_readable_package() {
    let mut wb = Workbook::new();
    let idx = wb.add_worksheet("Disk").unwrap();
    wb.sheet_mut(idx)
        .unwrap()
        .set_text(0, 0, "on disk", None)
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.xlsx");
    PackageWriter::write_file(&wb.seal(), &path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    let names = part_names(&bytes);
    assert!(names.iter().any(|n| n == "xl/workbook.xml"));
}

#[test]
fn test_all_parts_are_well_formed_xml() {
    let mut wb = Workbook::new();
    let style = {
        let font = wb
            .styles_mut()
            .register_font(sheetforge_core::Font::new().bold(true))
            .unwrap();
        wb.styles_mut().register_style(font, 0, 0, None).unwrap()
    };
    let idx = wb.add_worksheet("Everything").unwrap();
    {
        let mut sheet = wb.sheet_mut(idx).unwrap();
        sheet.set_column_width(0, 1, 12.0).unwrap();
        sheet.set_shared_text(0, 0, "shared & <escaped>", Some(style)).unwrap();
        sheet
            .set_rich_text(
                1,
                0,
                RichText::new().run("a").styled_run("b", RunStyle::new().bold(true)),
                None,
            )
            .unwrap();
        sheet.merge("A3:B3").unwrap();
    }

    let buf = write_to_buf(&wb.seal());
    for name in part_names(&buf) {
        let content = read_part(&buf, &name);
        let mut reader = quick_xml::reader::Reader::from_str(&content);
        let mut ev_buf = Vec::new();
        loop {
            match reader.read_event_into(&mut ev_buf) {
                Ok(quick_xml::events::Event::Eof) => break,
                Ok(_) => {}
                Err(e) => panic!("part {} is not well-formed: {}", name, e),
            }
            ev_buf.clear();
        }
    }
}

#[test]
fn test_multiple_sheets_are_wired_in_tab_order() {
    let mut wb = Workbook::new();
    for name in ["First", "Second", "Third"] {
        let idx = wb.add_worksheet(name).unwrap();
        wb.sheet_mut(idx)
            .unwrap()
            .set_text(0, 0, name, None)
            .unwrap();
    }

    let buf = write_to_buf(&wb.seal());
    let workbook_xml = read_part(&buf, "xl/workbook.xml");

    let first = workbook_xml.find("name=\"First\"").unwrap();
    let second = workbook_xml.find("name=\"Second\"").unwrap();
    let third = workbook_xml.find("name=\"Third\"").unwrap();
    assert!(first < second && second < third);

    assert!(workbook_xml.contains("<sheet name=\"Second\" sheetId=\"2\" r:id=\"rId2\"/>"));
    assert!(part_names(&buf)
        .iter()
        .any(|n| n == "xl/worksheets/sheet3.xml"));
}
