//! Vector (SVG) renderer for a planned design block.
//!
//! Produces the same regions as the raster renderer, with the QR symbol
//! nested as its own viewport. Output is byte-for-byte reproducible for a
//! given plan, QR vector and color pair.

use std::fmt::Write as _;

use qr_engine::{BrandColorPair, QrVector};

use crate::plan::{
    BULLET_COLOR, BULLET_FONT_SIZE, DesignBlockPlan, FOOTER_COLOR, FOOTER_FONT_SIZE, FOOTER_TEXT,
    LABEL_FONT_SIZE, LABEL_LETTER_SPACING, LABEL_TEXT, TITLE_COLOR, TITLE_FONT_SIZE,
};

const FONT_FAMILY: &str = "Inter, system-ui, sans-serif";
const BAR_GRADIENT_ID: &str = "barGrad";
const QR_GRADIENT_ID: &str = "qrGrad";

/// Render the plan as a standalone SVG document.
pub fn render_svg(plan: &DesignBlockPlan, qr: &QrVector, colors: &BrandColorPair) -> String {
    let (w, h) = (plan.width, plan.height);
    let center = w / 2;
    let primary = colors.primary.to_hex();

    let (defs, bar_fill, qr_fill) = match colors.gradient_stops() {
        Some((from, to)) => {
            let (from, to) = (from.to_hex(), to.to_hex());
            // QR stops span the whole module grid, quiet zone included, like the raster.
            let vb = qr.view_box();
            (
                format!(
                    r#"<defs><linearGradient id="{BAR_GRADIENT_ID}" x1="0" y1="0" x2="1" y2="0"><stop offset="0%" stop-color="{from}"/><stop offset="100%" stop-color="{to}"/></linearGradient><linearGradient id="{QR_GRADIENT_ID}" gradientUnits="userSpaceOnUse" x1="0" y1="0" x2="0" y2="{vb}"><stop offset="0%" stop-color="{from}"/><stop offset="100%" stop-color="{to}"/></linearGradient></defs>"#
                ),
                format!("url(#{BAR_GRADIENT_ID})"),
                format!("url(#{QR_GRADIENT_ID})"),
            )
        }
        None => (String::new(), primary.clone(), qr.dark().to_hex()),
    };

    let mut text = String::new();
    let _ = write!(
        text,
        r#"<text x="{center}" y="{y}" text-anchor="middle" fill="{primary}" font-family="{FONT_FAMILY}" font-weight="bold" font-size="{size}" letter-spacing="{spacing}">{label}</text>"#,
        y = plan.label_baseline,
        size = LABEL_FONT_SIZE,
        spacing = LABEL_LETTER_SPACING,
        label = escape_xml(LABEL_TEXT),
    );
    for line in &plan.title_lines {
        let _ = write!(
            text,
            r#"<text x="{center}" y="{y}" text-anchor="middle" fill="{TITLE_COLOR}" font-family="{FONT_FAMILY}" font-weight="bold" font-size="{size}">{body}</text>"#,
            y = line.baseline,
            size = TITLE_FONT_SIZE,
            body = escape_xml(&line.text),
        );
    }
    for line in &plan.bullet_lines {
        let _ = write!(
            text,
            r#"<text x="{center}" y="{y}" text-anchor="middle" fill="{BULLET_COLOR}" font-family="{FONT_FAMILY}" font-size="{size}" xml:space="preserve">{body}</text>"#,
            y = line.baseline,
            size = BULLET_FONT_SIZE,
            body = escape_xml(&line.text),
        );
    }
    let _ = write!(
        text,
        r#"<text x="{center}" y="{y}" text-anchor="middle" fill="{FOOTER_COLOR}" font-family="{FONT_FAMILY}" font-size="{size}">{body}</text>"#,
        y = plan.footer_baseline,
        size = FOOTER_FONT_SIZE,
        body = escape_xml(FOOTER_TEXT),
    );

    let bar = plan.accent_bar_height;
    let vb = qr.view_box();
    format!(
        r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {w} {h}" width="{w}" height="{h}">
  {defs}
  <rect width="{w}" height="{h}" fill="#ffffff"/>
  <rect width="{w}" height="{bar}" fill="{bar_fill}"/>
  <rect y="{bottom}" width="{w}" height="{bar}" fill="{bar_fill}"/>
  {text}
  <g transform="translate({qx}, {qy})">
    <svg width="{qs}" height="{qs}" viewBox="0 0 {vb} {vb}">
      {qr_body}
    </svg>
  </g>
</svg>
"##,
        bottom = h.saturating_sub(bar),
        qx = plan.qr.x,
        qy = plan.qr.y,
        qs = plan.qr.size,
        qr_body = qr.body_markup(&qr_fill),
    )
}

/// Escape the five XML special characters.
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    out
}
