//! XLSX package writer

use std::fs::File;
use std::io::{Cursor, Seek, Write};
use std::path::Path;

use log::debug;

use crate::error::{PackageError, PackageResult};
use crate::styles;
use sheetforge_core::{CellAddress, CellValue, RichText, SealedWorkbook, Worksheet};

/// Serializes a sealed workbook into the OOXML ZIP container
///
/// The writer resolves the workbook's cross-references (shared-string and
/// style indices) into the package's part layout: content types, the
/// relationship graph, the style sheet, the shared-string table, and one
/// worksheet part per sheet.
pub struct PackageWriter;

impl PackageWriter {
    /// Write a workbook to a file path
    ///
    /// The package is assembled fully in memory and written with a single
    /// call, so a failed serialization never leaves a truncated file
    /// behind.
    pub fn write_file<P: AsRef<Path>>(workbook: &SealedWorkbook, path: P) -> PackageResult<()> {
        let mut buf = Vec::new();
        Self::write(workbook, Cursor::new(&mut buf))?;

        let mut file = File::create(path)?;
        file.write_all(&buf)?;
        file.flush()?;
        Ok(())
    }

    /// Write a workbook to a writer
    pub fn write<W: Write + Seek>(workbook: &SealedWorkbook, writer: W) -> PackageResult<()> {
        Self::verify_references(workbook)?;

        let mut zip = zip::ZipWriter::new(writer);

        Self::write_content_types(&mut zip, workbook)?;
        Self::write_root_rels(&mut zip)?;
        Self::write_workbook_xml(&mut zip, workbook)?;
        Self::write_workbook_rels(&mut zip, workbook)?;
        Self::write_styles_xml(&mut zip, workbook)?;

        if !workbook.strings().is_empty() {
            Self::write_shared_strings(&mut zip, workbook)?;
        }

        for (i, sheet) in workbook.worksheets().enumerate() {
            Self::write_worksheet(&mut zip, sheet, i)?;
        }

        zip.finish()?;

        debug!(
            "wrote package: {} sheet(s), {} shared string(s), {} cell style(s)",
            workbook.sheet_count(),
            workbook.strings().len(),
            workbook.styles().style_count()
        );
        Ok(())
    }

    /// Cross-reference check before any part is emitted
    ///
    /// The builder API already rejects unknown indices and the tables are
    /// grow-only, but a violated index would produce a package the
    /// consuming application rejects, so the writer re-checks every cell.
    fn verify_references(workbook: &SealedWorkbook) -> PackageResult<()> {
        if workbook.sheet_count() == 0 {
            return Err(PackageError::Serialization(
                "workbook has no worksheets".into(),
            ));
        }

        let style_count = workbook.styles().style_count() as u32;
        let string_count = workbook.strings().len() as u32;

        for sheet in workbook.worksheets() {
            for (row, col, cell) in sheet.iter_cells() {
                if let Some(style) = cell.style {
                    if style >= style_count {
                        return Err(PackageError::Serialization(format!(
                            "cell {} on sheet '{}' references style {} out of range",
                            CellAddress::new(row, col),
                            sheet.name(),
                            style
                        )));
                    }
                }
                if let CellValue::Shared(index) = cell.value {
                    if index >= string_count {
                        return Err(PackageError::Serialization(format!(
                            "cell {} on sheet '{}' references shared string {} out of range",
                            CellAddress::new(row, col),
                            sheet.name(),
                            index
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    fn write_content_types<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &SealedWorkbook,
    ) -> PackageResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("[Content_Types].xml", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
    <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
    <Default Extension="xml" ContentType="application/xml"/>
    <Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
    <Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/>"#,
        );

        if !workbook.strings().is_empty() {
            content.push_str(
                r#"
    <Override PartName="/xl/sharedStrings.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml"/>"#,
            );
        }

        for i in 0..workbook.sheet_count() {
            content.push_str(&format!(
                r#"
    <Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
                i + 1
            ));
        }

        content.push_str("\n</Types>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_root_rels<W: Write + Seek>(zip: &mut zip::ZipWriter<W>) -> PackageResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("_rels/.rels", options)?;

        let content = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
    <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_xml<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &SealedWorkbook,
    ) -> PackageResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/workbook.xml", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
    <sheets>"#,
        );

        for (i, sheet) in workbook.worksheets().enumerate() {
            content.push_str(&format!(
                r#"
        <sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                escape_xml(sheet.name()),
                i + 1,
                i + 1
            ));
        }

        content.push_str(
            r#"
    </sheets>
</workbook>"#,
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_workbook_rels<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &SealedWorkbook,
    ) -> PackageResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/_rels/workbook.xml.rels", options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        );

        for i in 0..workbook.sheet_count() {
            content.push_str(&format!(
                r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
                i + 1,
                i + 1
            ));
        }

        let styles_rid = workbook.sheet_count() + 1;
        content.push_str(&format!(
            r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/>"#,
            styles_rid
        ));

        if !workbook.strings().is_empty() {
            content.push_str(&format!(
                r#"
    <Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings" Target="sharedStrings.xml"/>"#,
                styles_rid + 1
            ));
        }

        content.push_str(
            r#"
</Relationships>"#,
        );

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_styles_xml<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &SealedWorkbook,
    ) -> PackageResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/styles.xml", options)?;
        let xml = styles::styles_xml(workbook.styles());
        zip.write_all(xml.as_bytes())?;
        Ok(())
    }

    fn write_shared_strings<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        workbook: &SealedWorkbook,
    ) -> PackageResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file("xl/sharedStrings.xml", options)?;

        let strings = workbook.strings();

        // count = total references from cells, uniqueCount = table size
        let reference_count: usize = workbook
            .worksheets()
            .flat_map(|s| s.iter_cells())
            .filter(|(_, _, cell)| matches!(cell.value, CellValue::Shared(_)))
            .count();

        let mut content = format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="{}" uniqueCount="{}">"#,
            reference_count,
            strings.len()
        );

        for (_, entry) in strings.iter() {
            content.push_str("\n    <si>");
            content.push_str(&rich_text_xml(entry));
            content.push_str("</si>");
        }

        content.push_str("\n</sst>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }

    fn write_worksheet<W: Write + Seek>(
        zip: &mut zip::ZipWriter<W>,
        sheet: &Worksheet,
        index: usize,
    ) -> PackageResult<()> {
        let options = zip::write::SimpleFileOptions::default();
        zip.start_file(format!("xl/worksheets/sheet{}.xml", index + 1), options)?;

        let mut content = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        );

        // sheetFormatPr must precede cols, which must precede sheetData;
        // the consuming application rejects out-of-order children.
        if sheet.default_column_width().is_some() || sheet.default_row_height().is_some() {
            let mut attrs = String::new();
            if let Some(w) = sheet.default_column_width() {
                attrs.push_str(&format!(" defaultColWidth=\"{}\"", w));
            }
            // defaultRowHeight is a required attribute of sheetFormatPr
            attrs.push_str(&format!(
                " defaultRowHeight=\"{}\"",
                sheet.default_row_height().unwrap_or(15.0)
            ));
            content.push_str(&format!("\n    <sheetFormatPr{}/>", attrs));
        }

        let widths = sheet.column_widths();
        if !widths.is_empty() {
            content.push_str("\n    <cols>");
            for cw in widths {
                // col min/max are 1-based in the file
                content.push_str(&format!(
                    "\n        <col min=\"{}\" max=\"{}\" width=\"{}\" customWidth=\"1\"/>",
                    cw.min_col as u32 + 1,
                    cw.max_col as u32 + 1,
                    cw.width
                ));
            }
            content.push_str("\n    </cols>");
        }

        content.push_str("\n    <sheetData>");

        // Sparse row-major emission; row r attributes are 1-based.
        let mut current_row: Option<u32> = None;
        for (row, col, cell) in sheet.iter_cells() {
            if current_row != Some(row) {
                if current_row.is_some() {
                    content.push_str("\n        </row>");
                }
                content.push_str(&format!("\n        <row r=\"{}\">", row + 1));
                current_row = Some(row);
            }

            let cell_ref = CellAddress::new(row, col).to_a1_string();
            let style_attr = match cell.style {
                Some(s) if s != 0 => format!(" s=\"{}\"", s),
                _ => String::new(),
            };

            match &cell.value {
                CellValue::Inline(s) => {
                    content.push_str(&format!(
                        "\n            <c r=\"{}\"{} t=\"inlineStr\"><is>{}</is></c>",
                        cell_ref,
                        style_attr,
                        text_xml(s)
                    ));
                }
                CellValue::Shared(i) => {
                    content.push_str(&format!(
                        "\n            <c r=\"{}\"{} t=\"s\"><v>{}</v></c>",
                        cell_ref, style_attr, i
                    ));
                }
                CellValue::Rich(rt) => {
                    content.push_str(&format!(
                        "\n            <c r=\"{}\"{} t=\"inlineStr\"><is>{}</is></c>",
                        cell_ref,
                        style_attr,
                        rich_text_xml(rt)
                    ));
                }
                CellValue::Raw(s) => {
                    content.push_str(&format!(
                        "\n            <c r=\"{}\"{} t=\"str\"><v>{}</v></c>",
                        cell_ref,
                        style_attr,
                        escape_xml(s)
                    ));
                }
                CellValue::Empty => {
                    // Preserve style-only cells
                    if !style_attr.is_empty() {
                        content.push_str(&format!(
                            "\n            <c r=\"{}\"{}/>",
                            cell_ref, style_attr
                        ));
                    }
                }
            }
        }

        if current_row.is_some() {
            content.push_str("\n        </row>");
        }

        content.push_str("\n    </sheetData>");

        let merges = sheet.merged_ranges();
        if !merges.is_empty() {
            content.push_str(&format!("\n    <mergeCells count=\"{}\">", merges.len()));
            for range in merges {
                content.push_str(&format!(
                    "\n        <mergeCell ref=\"{}\"/>",
                    range.to_a1_string()
                ));
            }
            content.push_str("\n    </mergeCells>");
        }

        content.push_str("\n</worksheet>");

        zip.write_all(content.as_bytes())?;
        Ok(())
    }
}

/// Render rich text as the run content of an `<si>` or `<is>` element
///
/// A plain entry becomes a bare `<t>`; anything else becomes a sequence
/// of `<r>` runs with optional `<rPr>` run properties.
pub(crate) fn rich_text_xml(text: &RichText) -> String {
    if text.is_plain() {
        return text_xml(&text.to_plain_text());
    }

    let mut s = String::new();
    for run in text.runs() {
        s.push_str("<r>");
        if let Some(style) = &run.style {
            s.push_str("<rPr>");
            if style.bold {
                s.push_str("<b/>");
            }
            if let Some(size) = style.size {
                s.push_str(&format!("<sz val=\"{}\"/>", size));
            }
            if let Some(color) = &style.color {
                s.push_str(&format!("<color rgb=\"{}\"/>", color.to_argb_hex()));
            }
            if let Some(name) = &style.font_name {
                s.push_str(&format!("<rFont val=\"{}\"/>", escape_xml(name)));
            }
            s.push_str("</rPr>");
        }
        s.push_str(&text_xml(&run.text));
        s.push_str("</r>");
    }
    s
}

/// Render a `<t>` element, preserving significant whitespace
pub(crate) fn text_xml(text: &str) -> String {
    let needs_preserve = text
        .chars()
        .next()
        .map(char::is_whitespace)
        .unwrap_or(false)
        || text.chars().last().map(char::is_whitespace).unwrap_or(false);

    if needs_preserve {
        format!("<t xml:space=\"preserve\">{}</t>", escape_xml(text))
    } else {
        format!("<t>{}</t>", escape_xml(text))
    }
}

pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
