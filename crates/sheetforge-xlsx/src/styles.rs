//! styles.xml emission
//!
//! The style registry already keeps its component tables in file order
//! (fonts, fills with the reserved 0/1 slots, borders) and its composite
//! records map 1:1 onto `cellXfs`, so emission is a straight table walk.

use crate::writer::escape_xml;
use sheetforge_core::style::{
    Alignment, Border, BorderEdge, BorderLineStyle, CellStyle, Color, Fill, Font,
    HorizontalAlignment, PatternType, StyleRegistry, VerticalAlignment,
};

pub(crate) fn styles_xml(registry: &StyleRegistry) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
    );

    let fonts = registry.fonts();
    xml.push_str(&format!("\n  <fonts count=\"{}\">", fonts.len()));
    for font in fonts {
        xml.push_str("\n    ");
        xml.push_str(&write_font(font));
    }
    xml.push_str("\n  </fonts>");

    let fills = registry.fills();
    xml.push_str(&format!("\n  <fills count=\"{}\">", fills.len()));
    for fill in fills {
        xml.push_str("\n    ");
        xml.push_str(&write_fill(fill));
    }
    xml.push_str("\n  </fills>");

    let borders = registry.borders();
    xml.push_str(&format!("\n  <borders count=\"{}\">", borders.len()));
    for border in borders {
        xml.push_str("\n    ");
        xml.push_str(&write_border(border));
    }
    xml.push_str("\n  </borders>");

    xml.push_str(
        r#"
  <cellStyleXfs count="1">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0"/>
  </cellStyleXfs>"#,
    );

    let styles = registry.styles();
    xml.push_str(&format!("\n  <cellXfs count=\"{}\">", styles.len()));
    for style in styles {
        xml.push_str("\n    ");
        xml.push_str(&write_xf(style));
    }
    xml.push_str("\n  </cellXfs>");

    xml.push_str(
        r#"
  <cellStyles count="1">
    <cellStyle name="Normal" xfId="0" builtinId="0"/>
  </cellStyles>"#,
    );

    xml.push_str("\n</styleSheet>");
    xml
}

fn write_color(tag: &str, color: &Color) -> String {
    match color {
        Color::Auto => format!("<{tag} indexed=\"64\"/>"),
        other => format!("<{tag} rgb=\"{}\"/>", other.to_argb_hex()),
    }
}

fn write_font(font: &Font) -> String {
    let mut s = String::from("<font>");
    if font.bold {
        s.push_str("<b/>");
    }
    if font.italic {
        s.push_str("<i/>");
    }
    s.push_str(&format!("<sz val=\"{}\"/>", font.size));
    if !font.color.is_auto() {
        s.push_str(&write_color("color", &font.color));
    }
    s.push_str(&format!("<name val=\"{}\"/>", escape_xml(&font.name)));
    s.push_str("</font>");
    s
}

fn pattern_type_to_str(p: PatternType) -> &'static str {
    match p {
        PatternType::None => "none",
        PatternType::Solid => "solid",
        PatternType::MediumGray => "mediumGray",
        PatternType::DarkGray => "darkGray",
        PatternType::LightGray => "lightGray",
        PatternType::Gray125 => "gray125",
        PatternType::Gray0625 => "gray0625",
    }
}

fn write_fill(fill: &Fill) -> String {
    match fill {
        Fill::None => "<fill><patternFill patternType=\"none\"/></fill>".to_string(),
        Fill::Solid { color } => {
            format!(
                "<fill><patternFill patternType=\"solid\">{}<bgColor indexed=\"64\"/></patternFill></fill>",
                write_color("fgColor", color)
            )
        }
        Fill::Pattern {
            pattern,
            foreground,
            background,
        } => {
            let mut s = format!(
                "<fill><patternFill patternType=\"{}\"",
                pattern_type_to_str(*pattern)
            );
            if foreground.is_auto() && background.is_auto() {
                s.push_str("/></fill>");
                return s;
            }
            s.push('>');
            if !foreground.is_auto() {
                s.push_str(&write_color("fgColor", foreground));
            }
            if !background.is_auto() {
                s.push_str(&write_color("bgColor", background));
            }
            s.push_str("</patternFill></fill>");
            s
        }
    }
}

fn border_style_to_str(s: BorderLineStyle) -> Option<&'static str> {
    match s {
        BorderLineStyle::None => None,
        BorderLineStyle::Thin => Some("thin"),
        BorderLineStyle::Medium => Some("medium"),
        BorderLineStyle::Thick => Some("thick"),
        BorderLineStyle::Dashed => Some("dashed"),
        BorderLineStyle::Dotted => Some("dotted"),
        BorderLineStyle::Double => Some("double"),
        BorderLineStyle::Hair => Some("hair"),
    }
}

fn write_border_edge(tag: &str, edge: &Option<BorderEdge>) -> String {
    match edge {
        None => format!("<{tag}/>"),
        Some(e) => match border_style_to_str(e.style) {
            None => format!("<{tag}/>"),
            Some(style) => format!(
                "<{tag} style=\"{}\">{}</{tag}>",
                style,
                write_color("color", &e.color)
            ),
        },
    }
}

fn write_border(border: &Border) -> String {
    let mut s = String::from("<border>");
    s.push_str(&write_border_edge("left", &border.left));
    s.push_str(&write_border_edge("right", &border.right));
    s.push_str(&write_border_edge("top", &border.top));
    s.push_str(&write_border_edge("bottom", &border.bottom));
    s.push_str(&write_border_edge("diagonal", &border.diagonal));
    s.push_str("</border>");
    s
}

fn horiz_to_str(h: HorizontalAlignment) -> &'static str {
    match h {
        HorizontalAlignment::Left => "left",
        HorizontalAlignment::Center => "center",
        HorizontalAlignment::Right => "right",
        HorizontalAlignment::Justify => "justify",
    }
}

fn vert_to_str(v: VerticalAlignment) -> &'static str {
    match v {
        VerticalAlignment::Top => "top",
        VerticalAlignment::Center => "center",
        VerticalAlignment::Bottom => "bottom",
    }
}

fn write_alignment(al: &Alignment) -> String {
    if al.is_empty() {
        return String::new();
    }

    let mut s = String::from("<alignment");
    if let Some(h) = al.horizontal {
        s.push_str(&format!(" horizontal=\"{}\"", horiz_to_str(h)));
    }
    if let Some(v) = al.vertical {
        s.push_str(&format!(" vertical=\"{}\"", vert_to_str(v)));
    }
    s.push_str("/>");
    s
}

fn write_xf(style: &CellStyle) -> String {
    let mut attrs = String::new();
    if style.font != 0 {
        attrs.push_str(" applyFont=\"1\"");
    }
    if style.fill != 0 {
        attrs.push_str(" applyFill=\"1\"");
    }
    if style.border != 0 {
        attrs.push_str(" applyBorder=\"1\"");
    }

    let alignment_xml = style
        .alignment
        .as_ref()
        .map(write_alignment)
        .unwrap_or_default();
    if !alignment_xml.is_empty() {
        attrs.push_str(" applyAlignment=\"1\"");
    }

    let mut s = format!(
        "<xf numFmtId=\"0\" fontId=\"{}\" fillId=\"{}\" borderId=\"{}\" xfId=\"0\"{}",
        style.font, style.fill, style.border, attrs
    );

    if alignment_xml.is_empty() {
        s.push_str("/>");
    } else {
        s.push('>');
        s.push_str(&alignment_xml);
        s.push_str("</xf>");
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use sheetforge_core::style::{Alignment, Color, Font};

    #[test]
    fn test_reserved_fill_slots() {
        let registry = StyleRegistry::new();
        let xml = styles_xml(&registry);

        let none_pos = xml.find("patternType=\"none\"").unwrap();
        let gray_pos = xml.find("patternType=\"gray125\"").unwrap();
        assert!(none_pos < gray_pos);
        assert!(xml.contains("<fills count=\"2\">"));
    }

    #[test]
    fn test_font_markup() {
        let mut registry = StyleRegistry::new();
        registry
            .register_font(
                Font::new()
                    .bold(true)
                    .size(12.0)
                    .color(Color::RED),
            )
            .unwrap();

        let xml = styles_xml(&registry);
        assert!(xml.contains("<font><b/><sz val=\"12\"/><color rgb=\"FFFF0000\"/><name val=\"Calibri\"/></font>"));
    }

    #[test]
    fn test_xf_apply_flags_and_alignment() {
        let mut registry = StyleRegistry::new();
        let font = registry
            .register_font(Font::new().bold(true))
            .unwrap();
        let border = registry
            .register_border(Border::outline(BorderEdge::thin()))
            .unwrap();
        registry
            .register_style(
                font,
                0,
                border,
                Some(Alignment::new().horizontal(HorizontalAlignment::Center)),
            )
            .unwrap();

        let xml = styles_xml(&registry);
        assert!(xml.contains(
            "<xf numFmtId=\"0\" fontId=\"1\" fillId=\"0\" borderId=\"1\" xfId=\"0\" applyFont=\"1\" applyBorder=\"1\" applyAlignment=\"1\"><alignment horizontal=\"center\"/></xf>"
        ));
    }

    #[test]
    fn test_border_markup() {
        let mut registry = StyleRegistry::new();
        registry
            .register_border(Border::outline(BorderEdge::thin()))
            .unwrap();

        let xml = styles_xml(&registry);
        assert!(xml.contains("<left style=\"thin\"><color rgb=\"FF000000\"/></left>"));
        // Default border stays empty
        assert!(xml.contains("<border><left/><right/><top/><bottom/><diagonal/></border>"));
    }
}
