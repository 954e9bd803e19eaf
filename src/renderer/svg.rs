//! SVG generation from placed store layouts

use crate::layout::{BoundingBox, EmptyReason, LayoutResult, PlacedCell, PlacedElement};
use crate::model::CellKind;
use crate::status::Palette;

use super::SvgConfig;

const CAPTION_PADDING: f64 = 8.0;
const TITLE_FONT_SIZE: f64 = 20.0;
const HEADER_FONT_SIZE: f64 = 14.0;
const CELL_FONT_SIZE: f64 = 12.0;

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
}

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            elements: vec![],
            indent: 1,
        }
    }

    fn indent_str(&self) -> String {
        if self.config.standalone {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.standalone {
            "\n"
        } else {
            ""
        }
    }

    fn class_list(&self, classes: &[&str]) -> String {
        classes
            .iter()
            .map(|c| format!("{}{}", self.config.class_prefix, c))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Add a rectangle, optionally with a `<title>` tooltip
    pub fn add_rect(
        &mut self,
        id: Option<&str>,
        bounds: &BoundingBox,
        classes: &[&str],
        styles: &str,
        title: Option<&str>,
    ) {
        let id_attr = id
            .map(|i| format!(r#" id="{}""#, escape_xml(i)))
            .unwrap_or_default();
        let open = format!(
            r#"{}<rect{} class="{}" x="{}" y="{}" width="{}" height="{}"{}"#,
            self.indent_str(),
            id_attr,
            self.class_list(classes),
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height,
            styles
        );
        let rect = match title {
            Some(title) => format!("{}><title>{}</title></rect>", open, escape_xml(title)),
            None => format!("{}/>", open),
        };
        self.elements.push(rect);
    }

    /// Add a text element
    pub fn add_text(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        anchor: TextAnchor,
        classes: &[&str],
        styles: &str,
    ) {
        let (anchor_str, baseline) = match anchor {
            TextAnchor::Start => ("start", "hanging"),
            TextAnchor::Middle => ("middle", "middle"),
        };

        self.elements.push(format!(
            r#"{}<text class="{}" x="{}" y="{}" text-anchor="{}" dominant-baseline="{}"{}>{}</text>"#,
            self.indent_str(),
            self.class_list(classes),
            x,
            y,
            anchor_str,
            baseline,
            styles,
            escape_xml(text)
        ));
    }

    /// Add a group element with optional ID and classes
    pub fn start_group(&mut self, id: Option<&str>, classes: &[&str]) {
        let id_attr = id
            .map(|i| format!(r#" id="{}""#, escape_xml(i)))
            .unwrap_or_default();
        let class_attr = if classes.is_empty() {
            String::new()
        } else {
            format!(r#" class="{}""#, self.class_list(classes))
        };

        self.elements
            .push(format!("{}<g{}{}>", self.indent_str(), id_attr, class_attr));
        self.indent += 1;
    }

    /// Close a group element
    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.elements.push(format!("{}</g>", self.indent_str()));
    }

    /// Build the final SVG string for a `width` x `height` canvas
    pub fn build(self, width: f64, height: f64) -> String {
        let nl = self.newline();

        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = width,
            h = height
        ));
        svg.push_str(nl);

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Render a placed layout to an SVG string
pub fn render_svg(result: &LayoutResult, config: &SvgConfig, palette: &Palette) -> String {
    let mut builder = SvgBuilder::new(config.clone());

    add_background(&mut builder, &result.canvas(), palette);

    if config.show_title {
        builder.add_text(
            &format!("Store Layout - {}", result.store_name),
            result.metrics.padding,
            result.metrics.padding,
            TextAnchor::Start,
            &["title"],
            &format!(
                r#" font-size="{}" fill="{}""#,
                TITLE_FONT_SIZE,
                palette.resolve_or_default("text")
            ),
        );
    }

    // Sections first, anchors on top, matching the interactive map
    for element in result.sections() {
        render_section(element, &mut builder, palette);
    }
    for element in result.anchors() {
        render_anchor(element, result.metrics.label_band, &mut builder, palette);
    }

    builder.build(result.canvas_width, result.canvas_height)
}

/// Render the empty state shown when there is no layout to draw
pub fn render_empty_svg(
    reason: EmptyReason,
    width: f64,
    height: f64,
    config: &SvgConfig,
    palette: &Palette,
) -> String {
    let mut builder = SvgBuilder::new(config.clone());
    let canvas = BoundingBox::new(0.0, 0.0, width, height);
    add_background(&mut builder, &canvas, palette);

    let message = match reason {
        EmptyReason::NoData => "No valid layout data available",
        EmptyReason::NoElements => "This layout has no aisles or sections",
    };
    let center = canvas.center();
    builder.add_text(
        message,
        center.x,
        center.y,
        TextAnchor::Middle,
        &["empty"],
        &format!(r#" fill="{}""#, palette.resolve_or_default("muted")),
    );

    builder.build(width, height)
}

fn add_background(builder: &mut SvgBuilder, canvas: &BoundingBox, palette: &Palette) {
    builder.add_rect(
        None,
        canvas,
        &["background"],
        &format!(r#" fill="{}""#, palette.resolve_or_default("background")),
        None,
    );
}

fn render_section(element: &PlacedElement, builder: &mut SvgBuilder, palette: &Palette) {
    builder.start_group(Some(&element.key), &["section"]);

    builder.add_rect(
        None,
        &element.bounds,
        &["section-border"],
        &format!(
            r#" fill="none" stroke="{}" stroke-width="1""#,
            palette.resolve_or_default("border")
        ),
        None,
    );

    if let Some(header) = &element.header {
        builder.add_rect(
            None,
            header,
            &["section-header"],
            &format!(r#" fill="{}""#, palette.resolve_or_default("header")),
            None,
        );
        builder.add_text(
            &element.caption,
            header.x + CAPTION_PADDING,
            header.y + CAPTION_PADDING,
            TextAnchor::Start,
            &["section-name"],
            &format!(
                r#" font-size="{}" fill="{}""#,
                HEADER_FONT_SIZE,
                palette.resolve_or_default("text")
            ),
        );
    }

    for cell in &element.cells {
        render_cell(cell, builder, palette);
    }

    builder.end_group();
}

fn render_cell(cell: &PlacedCell, builder: &mut SvgBuilder, palette: &Palette) {
    match cell.kind {
        CellKind::Label => {
            let center = cell.bounds.center();
            builder.add_text(
                &cell.product,
                center.x,
                center.y,
                TextAnchor::Middle,
                &["cell-label"],
                &format!(
                    r#" font-size="{}" fill="{}""#,
                    CELL_FONT_SIZE,
                    palette.resolve_or_default("caption")
                ),
            );
        }
        CellKind::Stock => {
            let tooltip = format!(
                "{}: {}",
                cell.product,
                cell.status.as_deref().unwrap_or_default()
            );
            builder.add_rect(
                None,
                &cell.bounds,
                &["cell", cell.category.as_str()],
                &format!(r#" rx="2" fill="{}""#, palette.fill(cell.category)),
                Some(&tooltip),
            );
        }
    }
}

fn render_anchor(
    element: &PlacedElement,
    label_band: f64,
    builder: &mut SvgBuilder,
    palette: &Palette,
) {
    builder.start_group(Some(&element.key), &[element.kind.as_str()]);

    builder.add_rect(
        None,
        &element.bounds,
        &["anchor-border"],
        &format!(
            r#" fill="none" stroke="{}" stroke-width="1""#,
            palette.resolve_or_default("border")
        ),
        None,
    );
    let band = BoundingBox::new(
        element.bounds.x,
        element.bounds.y,
        element.bounds.width,
        label_band.min(element.bounds.height),
    );
    builder.add_rect(
        None,
        &band,
        &["anchor-label"],
        &format!(r#" fill="{}""#, palette.resolve_or_default("header")),
        None,
    );
    builder.add_text(
        &element.caption,
        band.x + CAPTION_PADDING,
        band.y + 6.0,
        TextAnchor::Start,
        &["anchor-name"],
        &format!(
            r#" font-size="{}" fill="{}""#,
            HEADER_FONT_SIZE,
            palette.resolve_or_default("text")
        ),
    );

    builder.end_group();
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
