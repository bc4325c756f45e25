//! Scene export to SVG.
//!
//! Walks one scene of a [`Document`] depth-first and writes each active node
//! as an SVG element nested in a `<g>` carrying its transform. Gradient fills
//! are collected into a single `<defs>` block.

use std::fmt::Write;

use serde::{Deserialize, Serialize};
use vellum_core::geometry::rounded_rect_path;
use vellum_core::node::StrokeCap;
use vellum_core::{Document, EditorConfig, GraphIndex, NodeId, NodeKind, NodeRecord, Rectangle};

use crate::error::{RenderError, RenderResult};
use crate::paint::PaintDefs;

/// Configuration for scene export.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Output width (default: bounds of the scene's roots).
    pub width: Option<f64>,
    /// Output height (default: bounds of the scene's roots).
    pub height: Option<f64>,
    /// Prefix for generated gradient ids.
    pub gradient_id_prefix: String,
    /// Paint the scene background, if it has one.
    pub background: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            gradient_id_prefix: "paint".to_string(),
            background: true,
        }
    }
}

impl From<&EditorConfig> for ExportConfig {
    fn from(config: &EditorConfig) -> Self {
        Self {
            gradient_id_prefix: config.gradient_id_prefix.clone(),
            ..Self::default()
        }
    }
}

/// Exports document scenes to SVG.
#[derive(Debug, Clone, Default)]
pub struct SceneExporter {
    config: ExportConfig,
}

impl SceneExporter {
    /// Create a new exporter with the given configuration.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportConfig::default())
    }

    /// Export one scene to an SVG string.
    ///
    /// Inactive nodes and their subtrees are skipped. Paints with no SVG
    /// representation render as `fill="none"`.
    ///
    /// # Errors
    ///
    /// Returns an error if the scene does not exist or the document breaks
    /// an invariant.
    pub fn render_to_svg(&self, document: &Document, scene_id: &NodeId) -> RenderResult<String> {
        document.validate()?;
        let scene = document
            .scene(scene_id)
            .ok_or_else(|| RenderError::SceneNotFound(scene_id.to_string()))?;
        let graph = GraphIndex::build(document);

        let mut defs = PaintDefs::new(self.config.gradient_id_prefix.clone());
        let mut body = String::with_capacity(4096);
        for root in &scene.children {
            render_node(&mut body, document, &graph, root, &mut defs);
        }

        let roots: Vec<Rectangle> = scene
            .children
            .iter()
            .filter_map(|id| document.node(id))
            .map(NodeRecord::bounds)
            .collect();
        let bounds = Rectangle::union(&roots).unwrap_or_default();
        let width = self.config.width.unwrap_or(bounds.x + bounds.width);
        let height = self.config.height.unwrap_or(bounds.y + bounds.height);

        let mut svg = String::with_capacity(body.len() + 512);
        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">",
        );
        if self.config.background {
            if let Some(background) = &scene.background {
                let fill = defs.reference(background);
                if !fill.is_empty() {
                    let _ = write!(svg, "<rect width=\"100%\" height=\"100%\" fill=\"{fill}\"/>");
                }
            }
        }
        svg.push_str(&defs.to_defs());
        svg.push_str(&body);
        svg.push_str("</svg>");

        tracing::debug!(
            scene = %scene_id,
            gradients = !defs.is_empty(),
            unsupported = defs.unsupported_count(),
            "scene exported"
        );
        Ok(svg)
    }
}

fn render_node(
    svg: &mut String,
    document: &Document,
    graph: &GraphIndex,
    id: &NodeId,
    defs: &mut PaintDefs,
) {
    let Some(node) = document.node(id) else {
        return;
    };
    if !node.active {
        return;
    }

    let matrix = node
        .transform
        .to_svg_matrix()
        .map(|v| v.to_string())
        .join(" ");
    let _ = write!(svg, "<g id=\"{}\" transform=\"matrix({matrix})\"", escape_xml(id.as_str()));
    if node.opacity < 1.0 {
        let _ = write!(svg, " opacity=\"{}\"", node.opacity);
    }
    svg.push('>');

    render_shape(svg, node, defs);
    for child in graph.children_of(id) {
        render_node(svg, document, graph, child, defs);
    }
    svg.push_str("</g>");
}

/// `fill`/`stroke` attributes for a node.
fn paint_attrs(node: &NodeRecord, defs: &mut PaintDefs) -> String {
    let fill = node
        .fill
        .as_ref()
        .map(|p| defs.reference(p))
        .filter(|f| !f.is_empty())
        .unwrap_or_else(|| "none".to_string());
    let mut attrs = format!(" fill=\"{fill}\"");

    if let Some(stroke) = &node.stroke {
        let color = defs.reference(&stroke.paint);
        if !color.is_empty() && stroke.width > 0.0 {
            let cap = match stroke.cap {
                StrokeCap::Butt => "butt",
                StrokeCap::Round => "round",
                StrokeCap::Square => "square",
            };
            let _ = write!(
                attrs,
                " stroke=\"{color}\" stroke-width=\"{}\" stroke-linecap=\"{cap}\"",
                stroke.width
            );
        }
    }
    attrs
}

fn render_shape(svg: &mut String, node: &NodeRecord, defs: &mut PaintDefs) {
    let (w, h) = (node.width, node.height);

    match &node.kind {
        NodeKind::Rectangle { corner_radius }
        | NodeKind::Container { corner_radius, .. }
        | NodeKind::Component { corner_radius } => {
            let attrs = paint_attrs(node, defs);
            if corner_radius.to_array().iter().all(|r| *r <= 0.0) {
                let _ = write!(svg, "<rect width=\"{w}\" height=\"{h}\"{attrs}/>");
            } else {
                let d = rounded_rect_path(w, h, *corner_radius);
                let _ = write!(svg, "<path d=\"{d}\"{attrs}/>");
            }
        }

        NodeKind::Ellipse => {
            let attrs = paint_attrs(node, defs);
            let (rx, ry) = (w / 2.0, h / 2.0);
            let _ = write!(
                svg,
                "<ellipse cx=\"{rx}\" cy=\"{ry}\" rx=\"{rx}\" ry=\"{ry}\"{attrs}/>"
            );
        }

        NodeKind::Vector { path } => {
            let attrs = paint_attrs(node, defs);
            let _ = write!(svg, "<path d=\"{}\"{attrs}/>", escape_xml(path));
        }

        NodeKind::Line => {
            let attrs = paint_attrs(node, defs);
            let _ = write!(svg, "<line x1=\"0\" y1=\"0\" x2=\"{w}\" y2=\"0\"{attrs}/>");
        }

        NodeKind::Polygon { point_count, .. } => {
            let attrs = paint_attrs(node, defs);
            let points = polygon_points(w, h, *point_count, None);
            let _ = write!(svg, "<polygon points=\"{points}\"{attrs}/>");
        }

        NodeKind::Star {
            point_count,
            inner_radius,
            ..
        } => {
            let attrs = paint_attrs(node, defs);
            let points = polygon_points(w, h, *point_count, Some(*inner_radius));
            let _ = write!(svg, "<polygon points=\"{points}\"{attrs}/>");
        }

        NodeKind::Text {
            text,
            font_size,
            font_family,
        } => {
            let attrs = paint_attrs(node, defs);
            let _ = write!(
                svg,
                "<text y=\"{font_size}\" font-size=\"{font_size}\" font-family=\"{}\"{attrs}>{}</text>",
                escape_xml(font_family),
                escape_xml(text),
            );
        }

        NodeKind::Image { src, .. } => {
            let _ = write!(
                svg,
                "<image width=\"{w}\" height=\"{h}\" href=\"{}\" preserveAspectRatio=\"xMidYMid slice\"/>",
                escape_xml(src),
            );
        }

        NodeKind::Video { .. } => {
            let _ = write!(
                svg,
                "<rect width=\"{w}\" height=\"{h}\" fill=\"#e0e0e0\" stroke=\"#999\" stroke-width=\"1\"/>",
            );
            let _ = write!(
                svg,
                "<text x=\"{}\" y=\"{}\" font-size=\"14\" fill=\"#666\" text-anchor=\"middle\" font-family=\"sans-serif\">Video</text>",
                w / 2.0,
                h / 2.0,
            );
        }

        NodeKind::Instance { .. }
        | NodeKind::Boolean { .. }
        | NodeKind::TemplateInstance { .. }
        | NodeKind::Group => {}
    }
}

/// Upper bound on polygon and star points written to SVG.
const MAX_POLYGON_POINTS: u32 = 1024;

/// Vertices of a regular polygon (or a star when `inner` is set) inscribed
/// in a `width × height` box, starting at the top center and going
/// clockwise.
fn polygon_points(width: f64, height: f64, count: u32, inner: Option<f64>) -> String {
    let count = count.clamp(3, MAX_POLYGON_POINTS);
    let (cx, cy) = (width / 2.0, height / 2.0);
    let steps = if inner.is_some() { count * 2 } else { count };
    let step = std::f64::consts::TAU / f64::from(steps);

    let mut points = String::new();
    for i in 0..steps {
        let scale = match inner {
            Some(ratio) if i % 2 == 1 => ratio,
            _ => 1.0,
        };
        let angle = f64::from(i) * step - std::f64::consts::FRAC_PI_2;
        let x = cx + cx * scale * angle.cos();
        let y = cy + cy * scale * angle.sin();
        if i > 0 {
            points.push(' ');
        }
        let _ = write!(points, "{x},{y}");
    }
    points
}

/// Escape special XML characters.
pub(crate) fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_core::geometry::Transform;
    use vellum_core::{Container, CornerRadius, Paint, Rgba8888, Scene};

    fn document() -> Document {
        let mut doc = Document::new();
        let mut scene = Scene::new("s", "Scene");
        scene.background = Some(Paint::solid(Rgba8888::WHITE));
        doc.add_scene(scene).unwrap();
        doc.insert(
            NodeRecord::new(
                "card",
                NodeKind::Rectangle {
                    corner_radius: CornerRadius::Uniform(10.0),
                },
            )
            .with_size(100.0, 50.0)
            .with_fill(Paint::solid(Rgba8888::BLACK)),
            &Container::Scene("s".into()),
            None,
        )
        .unwrap();
        doc
    }

    #[test]
    fn test_svg_export_scene() {
        let svg = SceneExporter::with_defaults()
            .render_to_svg(&document(), &"s".into())
            .expect("svg export");
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("width=\"100\""));
        assert!(svg.contains("height=\"50\""));
        assert!(svg.contains("fill=\"rgba(255, 255, 255, 1)\""));
        assert!(svg.contains(
            "<path d=\"M10 0 H90 Q100 0 100 10 V40 Q100 50 90 50 H10 Q0 50 0 40 V10 Q0 0 10 0 Z\" fill=\"rgba(0, 0, 0, 1)\"/>"
        ));
        assert!(!svg.contains("<defs>"));
    }

    #[test]
    fn test_missing_scene() {
        let err = SceneExporter::with_defaults()
            .render_to_svg(&document(), &"nope".into())
            .unwrap_err();
        assert!(matches!(err, RenderError::SceneNotFound(id) if id == "nope"));
    }

    #[test]
    fn test_inactive_nodes_skipped() {
        let mut doc = document();
        doc.update(&"card".into(), |n| n.active = false).unwrap();
        let svg = SceneExporter::with_defaults()
            .render_to_svg(&doc, &"s".into())
            .unwrap();
        assert!(!svg.contains("id=\"card\""));
    }

    #[test]
    fn test_transform_written_column_major() {
        let mut doc = document();
        doc.update(&"card".into(), |n| {
            n.transform = Transform::new(1.0, 0.0, 20.0, 0.0, 1.0, 30.0);
        })
        .unwrap();
        let svg = SceneExporter::with_defaults()
            .render_to_svg(&doc, &"s".into())
            .unwrap();
        assert!(svg.contains("<g id=\"card\" transform=\"matrix(1 0 0 1 20 30)\">"));
        assert!(svg.contains("width=\"120\" height=\"80\""));
    }

    #[test]
    fn test_polygon_points() {
        let points = polygon_points(100.0, 100.0, 4, None);
        assert_eq!(points.split(' ').count(), 4);
        assert!(points.starts_with("50,0"));
        assert_eq!(polygon_points(10.0, 10.0, 5, Some(0.5)).split(' ').count(), 10);
    }

    #[test]
    fn test_polygon_points_clamped() {
        assert_eq!(polygon_points(10.0, 10.0, 0, None).split(' ').count(), 3);
        assert_eq!(
            polygon_points(10.0, 10.0, u32::MAX, Some(0.5)).split(' ').count(),
            2048
        );
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a<b & \"c\""), "a&lt;b &amp; &quot;c&quot;");
    }
}
