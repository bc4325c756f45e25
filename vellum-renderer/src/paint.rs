//! SVG paint synthesis: inline colors and gradient `<defs>`.

use std::collections::HashSet;
use std::fmt::Write;

use vellum_core::geometry::Transform;
use vellum_core::{GradientStop, Paint};

use crate::css;
use crate::export::escape_xml;

/// An SVG-ready paint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SvgPaint {
    /// A color usable directly as `fill`/`stroke`.
    Inline(String),
    /// A gradient: its definition block and the id it is registered under.
    Gradient {
        /// Definition id, referenced as `url(#id)`.
        id: String,
        /// The `<linearGradient>`/`<radialGradient>` element.
        definition: String,
    },
    /// A paint kind no SVG backend can draw yet.
    Unsupported(&'static str),
}

impl SvgPaint {
    /// The value for a `fill`/`stroke` attribute. Empty for unsupported
    /// paints.
    #[must_use]
    pub fn reference(&self) -> String {
        match self {
            Self::Inline(color) => color.clone(),
            Self::Gradient { id, .. } => format!("url(#{})", escape_xml(id)),
            Self::Unsupported(_) => String::new(),
        }
    }

    /// The definition block, if any.
    #[must_use]
    pub fn definition(&self) -> Option<&str> {
        match self {
            Self::Gradient { definition, .. } => Some(definition),
            _ => None,
        }
    }

    /// Whether the paint could not be rendered.
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }
}

/// Issues gradient definition ids.
///
/// A paint with a non-empty `id` keeps it; anonymous paints get
/// `<prefix>-<n>` with `n` counting from 0, skipping values already taken by
/// named paints. A named paint whose id was already generated for an
/// anonymous one gets a generated id instead.
#[derive(Debug, Clone)]
pub struct GradientIds {
    prefix: String,
    next: u64,
    named: HashSet<String>,
    generated: HashSet<String>,
}

impl GradientIds {
    /// Create a counter with the given prefix.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 0,
            named: HashSet::new(),
            generated: HashSet::new(),
        }
    }

    /// The id for a paint whose own id is `own`.
    pub fn assign(&mut self, own: &str) -> String {
        if !own.is_empty() && !self.generated.contains(own) {
            self.named.insert(own.to_string());
            return own.to_string();
        }
        loop {
            let id = format!("{}-{}", self.prefix, self.next);
            self.next += 1;
            if !self.named.contains(&id) {
                self.generated.insert(id.clone());
                return id;
            }
        }
    }
}

impl Default for GradientIds {
    fn default() -> Self {
        Self::new("paint")
    }
}

/// Convert a paint for SVG output.
#[must_use]
pub fn paint_to_svg(paint: &Paint, ids: &mut GradientIds) -> SvgPaint {
    match paint {
        Paint::Solid { color } => SvgPaint::Inline(css::rgba(*color)),
        Paint::LinearGradient {
            id,
            transform,
            stops,
        } => {
            let id = ids.assign(id);
            let definition = gradient_element("linearGradient", &id, "", transform, stops);
            SvgPaint::Gradient { id, definition }
        }
        Paint::RadialGradient {
            id,
            transform,
            stops,
        } => {
            let id = ids.assign(id);
            let definition = gradient_element(
                "radialGradient",
                &id,
                " cx=\"0.5\" cy=\"0.5\" r=\"0.5\"",
                transform,
                stops,
            );
            SvgPaint::Gradient { id, definition }
        }
        Paint::SweepGradient { .. } => unsupported("sweep_gradient"),
        Paint::DiamondGradient { .. } => unsupported("diamond_gradient"),
    }
}

fn unsupported(kind: &'static str) -> SvgPaint {
    tracing::warn!(kind, "paint kind has no SVG representation");
    SvgPaint::Unsupported(kind)
}

fn gradient_element(
    tag: &str,
    id: &str,
    extra: &str,
    transform: &Transform,
    stops: &[GradientStop],
) -> String {
    let matrix = transform.to_svg_matrix().map(|v| v.to_string()).join(" ");
    let id = escape_xml(id);
    let mut out = String::with_capacity(128 + stops.len() * 64);
    let _ = write!(
        out,
        "<{tag} id=\"{id}\" gradientUnits=\"objectBoundingBox\"{extra} gradientTransform=\"matrix({matrix})\">"
    );
    for stop in stops {
        let color = stop.color;
        let _ = write!(
            out,
            "<stop offset=\"{}\" stop-color=\"rgb({}, {}, {})\" stop-opacity=\"{}\"/>",
            stop.offset, color.r, color.g, color.b, color.a
        );
    }
    let _ = write!(out, "</{tag}>");
    out
}

/// Collects gradient definitions while a document is rendered.
///
/// Each id is defined once; a named paint registered again reuses its first
/// definition.
#[derive(Debug, Clone, Default)]
pub struct PaintDefs {
    ids: GradientIds,
    defined: HashSet<String>,
    definitions: Vec<String>,
    unsupported: usize,
}

impl PaintDefs {
    /// Create an empty collection with the given id prefix.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            ids: GradientIds::new(prefix),
            defined: HashSet::new(),
            definitions: Vec::new(),
            unsupported: 0,
        }
    }

    /// Register `paint` and return its `fill`/`stroke` value.
    pub fn reference(&mut self, paint: &Paint) -> String {
        let svg = paint_to_svg(paint, &mut self.ids);
        if let SvgPaint::Gradient { id, definition } = &svg {
            if self.defined.insert(id.clone()) {
                self.definitions.push(definition.clone());
            }
        }
        if svg.is_unsupported() {
            self.unsupported += 1;
        }
        svg.reference()
    }

    /// Number of paints that could not be rendered.
    #[must_use]
    pub fn unsupported_count(&self) -> usize {
        self.unsupported
    }

    /// Check if no definitions were collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// The `<defs>` block, or an empty string when nothing was registered.
    #[must_use]
    pub fn to_defs(&self) -> String {
        if self.definitions.is_empty() {
            return String::new();
        }
        format!("<defs>{}</defs>", self.definitions.concat())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vellum_core::Rgba8888;

    fn stops() -> Vec<GradientStop> {
        vec![
            GradientStop::new(0.0, Rgba8888::new(255, 0, 0, 1.0)),
            GradientStop::new(1.0, Rgba8888::new(0, 0, 255, 0.5)),
        ]
    }

    #[test]
    fn test_solid_is_inline() {
        let mut ids = GradientIds::default();
        let svg = paint_to_svg(&Paint::solid(Rgba8888::new(1, 2, 3, 0.5)), &mut ids);
        assert_eq!(svg.reference(), "rgba(1, 2, 3, 0.5)");
        assert_eq!(svg.definition(), None);
    }

    #[test]
    fn test_linear_gradient_matrix_order() {
        let mut ids = GradientIds::new("g");
        let paint = Paint::LinearGradient {
            id: String::new(),
            transform: Transform::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0),
            stops: stops(),
        };
        let svg = paint_to_svg(&paint, &mut ids);
        assert_eq!(svg.reference(), "url(#g-0)");
        let def = svg.definition().unwrap();
        assert!(def.starts_with("<linearGradient id=\"g-0\""));
        assert!(def.contains("gradientTransform=\"matrix(1 4 2 5 3 6)\""));
        assert!(def.contains("<stop offset=\"1\" stop-color=\"rgb(0, 0, 255)\" stop-opacity=\"0.5\"/>"));
        assert!(def.ends_with("</linearGradient>"));
    }

    #[test]
    fn test_own_id_wins() {
        let mut ids = GradientIds::new("g");
        let paint = Paint::RadialGradient {
            id: "brand".to_string(),
            transform: Transform::IDENTITY,
            stops: stops(),
        };
        let svg = paint_to_svg(&paint, &mut ids);
        assert_eq!(svg.reference(), "url(#brand)");
        assert!(svg.definition().unwrap().starts_with("<radialGradient id=\"brand\""));
        assert_eq!(ids.assign(""), "g-0");
        assert_eq!(ids.assign(""), "g-1");
    }

    #[test]
    fn test_sweep_and_diamond_unsupported() {
        let mut ids = GradientIds::default();
        for paint in [
            Paint::SweepGradient {
                id: String::new(),
                transform: Transform::IDENTITY,
                stops: stops(),
            },
            Paint::DiamondGradient {
                id: String::new(),
                transform: Transform::IDENTITY,
                stops: stops(),
            },
        ] {
            let svg = paint_to_svg(&paint, &mut ids);
            assert!(svg.is_unsupported());
            assert_eq!(svg.reference(), "");
            assert_eq!(svg.definition(), None);
        }
        assert_eq!(ids.assign(""), "paint-0");
    }

    #[test]
    fn test_defs_ids_unique() {
        let named = |id: &str| Paint::LinearGradient {
            id: id.to_string(),
            transform: Transform::IDENTITY,
            stops: stops(),
        };
        let mut defs = PaintDefs::new("paint");
        assert_eq!(defs.reference(&named("paint-0")), "url(#paint-0)");
        assert_eq!(defs.reference(&named("paint-0")), "url(#paint-0)");
        assert_eq!(defs.reference(&named("")), "url(#paint-1)");
        assert_eq!(defs.reference(&named("a\"b")), "url(#a&quot;b)");

        let out = defs.to_defs();
        assert_eq!(out.matches("id=\"paint-0\"").count(), 1);
        assert_eq!(out.matches("id=\"paint-1\"").count(), 1);
        assert!(out.contains("<linearGradient id=\"a&quot;b\""));
        assert_eq!(out.matches("<linearGradient").count(), 3);
    }

    #[test]
    fn test_generated_id_not_reused_by_name() {
        let mut ids = GradientIds::new("g");
        assert_eq!(ids.assign(""), "g-0");
        assert_eq!(ids.assign("g-0"), "g-1");
        assert_eq!(ids.assign("g-2"), "g-2");
        assert_eq!(ids.assign(""), "g-3");
    }

    #[test]
    fn test_paint_defs_collects() {
        let mut defs = PaintDefs::new("fill");
        assert_eq!(defs.to_defs(), "");
        let linear = Paint::LinearGradient {
            id: String::new(),
            transform: Transform::IDENTITY,
            stops: stops(),
        };
        assert_eq!(defs.reference(&linear), "url(#fill-0)");
        assert_eq!(defs.reference(&linear), "url(#fill-1)");
        assert_eq!(defs.reference(&Paint::solid(Rgba8888::BLACK)), "rgba(0, 0, 0, 1)");
        let out = defs.to_defs();
        assert!(out.starts_with("<defs><linearGradient id=\"fill-0\""));
        assert_eq!(out.matches("<linearGradient").count(), 2);
    }
}
