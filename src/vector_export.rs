//! SVG export of a sewing pattern.
//!
//! The whole document is generated in memory and written in one go, so a failed export
//! never leaves a truncated file behind.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use crate::config::ExportOptions;
use crate::pattern::{Model, PatternPiece, SewingPattern, build_pattern};
use crate::util_3d::Vector2;

/// Text alignment for labels
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextAlign {
    Near,
    Center,
}

/// A text element to render
#[derive(Debug, Clone)]
pub struct PrintableText<'a> {
    pub class: &'static str,
    pub size: f32,
    pub pos: Vector2,
    pub align: TextAlign,
    pub text: &'a str,
}

const STYLE: &str = ".seam{stroke:#000;stroke-width:1px;fill:white;fill-rule:evenodd} \
.sewinguide{stroke-width:1px} \
.alignment{font-family:'ArialMT','Arial';dominant-baseline:hanging} \
.pieceid{font-family:'ArialMT','Arial';dominant-baseline:middle}";

/// Generate the SVG for the given model.
pub fn generate_svg(model: &Model, options: &ExportOptions) -> Result<String> {
    let pattern = build_pattern(model, options);
    let mut output = Vec::new();
    write_svg(&pattern, model.name(), options, &mut output)?;
    Ok(String::from_utf8(output)?)
}

/// Generate the SVG and save it to `path`.
pub fn export_svg_file(model: &Model, options: &ExportOptions, path: &Path) -> Result<()> {
    let svg = generate_svg(model, options)?;
    std::fs::write(path, svg).with_context(|| format!("writing {}", path.display()))?;
    log::info!("sewing pattern written to {}", path.display());
    Ok(())
}

/// Write the whole document to the given writer.
pub fn write_svg(
    pattern: &SewingPattern,
    title: &str,
    options: &ExportOptions,
    w: &mut impl Write,
) -> Result<()> {
    let size = pattern.document_size;
    writeln!(
        w,
        r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>"#
    )?;
    writeln!(
        w,
        r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" viewBox="0 0 {0} {0}" width="{0}mm" height="{0}mm">"#,
        size
    )?;
    if !title.is_empty() {
        writeln!(w, r#"<title>{}</title>"#, html_escape(title))?;
    }
    writeln!(w, r#"<defs><style>{}</style></defs>"#, STYLE)?;

    for piece in &pattern.pieces {
        write_piece(pattern, piece, options, w)?;
    }

    writeln!(w, r#"</svg>"#)?;
    Ok(())
}

fn write_piece(
    pattern: &SewingPattern,
    piece: &PatternPiece,
    options: &ExportOptions,
    w: &mut impl Write,
) -> Result<()> {
    writeln!(w, r#"<g id="piece_{}">"#, piece.name)?;

    write!(w, r#"<path class="seam" d=""#)?;
    for outline in piece.outlines.iter().filter(|o| !o.points.is_empty()) {
        write!(w, "M ")?;
        for p in &outline.points {
            write!(w, "{},{} ", p.x, p.y)?;
        }
    }
    writeln!(w, r#""/>"#)?;

    for guide in &piece.guides {
        writeln!(
            w,
            r#"<line class="sewinguide" stroke="{}" x1="{}" y1="{}" x2="{}" y2="{}"/>"#,
            guide.color.to_hex(),
            guide.start.x,
            guide.start.y,
            guide.end.x,
            guide.end.y
        )?;
        if let Some(label) = guide.label.and_then(|i| pattern.labels.get(i)) {
            write_text(
                w,
                &PrintableText {
                    class: "alignment",
                    size: label.font_size(),
                    pos: label.anchor(),
                    align: TextAlign::Near,
                    text: label.text(),
                },
            )?;
        }
    }

    if options.show_piece_ids {
        write_text(
            w,
            &PrintableText {
                class: "pieceid",
                size: options.piece_id_font_size,
                pos: piece.centroid,
                align: TextAlign::Center,
                text: &piece.name,
            },
        )?;
    }

    writeln!(w, r#"</g>"#)?;
    Ok(())
}

fn write_text(w: &mut impl Write, text: &PrintableText<'_>) -> Result<()> {
    let anchor = match text.align {
        TextAlign::Near => "",
        TextAlign::Center => "text-anchor:middle;",
    };
    writeln!(
        w,
        r#"<text class="{}" x="{}" y="{}" style="{}font-size:{}px">{}</text>"#,
        text.class,
        text.pos.x,
        text.pos.y,
        anchor,
        text.size,
        html_escape(text.text)
    )?;
    Ok(())
}

/// Simple HTML escaping for text content.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(html_escape(r#"a<b & "c">"#), "a&lt;b &amp; &quot;c&quot;&gt;");
    }

    #[test]
    fn centered_text() {
        let mut out = Vec::new();
        write_text(
            &mut out,
            &PrintableText {
                class: "pieceid",
                size: 24.0,
                pos: Vector2::new(1.5, 2.0),
                align: TextAlign::Center,
                text: "AB",
            },
        )
        .unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "<text class=\"pieceid\" x=\"1.5\" y=\"2\" style=\"text-anchor:middle;font-size:24px\">AB</text>\n"
        );
    }
}
