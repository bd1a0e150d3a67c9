//! Example: Create an xlsx report with shared strings and styles

use sheetforge::prelude::*;

fn main() -> Result<()> {
    let mut workbook = Workbook::new();

    // Styles are workbook-scoped; register them once up front
    let header_style = {
        let styles = workbook.styles_mut();
        let bold = styles.register_font(Font::new().bold(true))?;
        let border = styles.register_border(Border::outline(BorderEdge::thin()))?;
        styles.register_style(bold, 0, border, Some(Alignment::center()))?
    };

    let idx = workbook.add_worksheet("Report")?;
    let mut sheet = workbook.sheet_mut(idx).unwrap();

    sheet.set_column_width(0, 0, 5.0)?;
    sheet.set_column_width(1, 2, 24.0)?;

    // Header row (shared strings)
    for (col, header) in ["No.", "Item", "Status"].iter().enumerate() {
        sheet.set_shared_text(0, col as u16, *header, Some(header_style))?;
    }

    // Data rows
    sheet.set_raw(1, 0, "1", None)?;
    sheet.set_text(1, 1, "Widget", None)?;
    sheet.set_rich_text(
        1,
        2,
        RichText::new()
            .styled_run("OK", RunStyle::new().bold(true).color(Color::GREEN))
            .run(" (verified)"),
        None,
    )?;

    let sealed = workbook
        .save("/tmp/report.xlsx")
        .expect("failed to write /tmp/report.xlsx");
    println!(
        "Created /tmp/report.xlsx ({} shared strings)",
        sealed.strings().len()
    );

    Ok(())
}
