//! Which node types support which editable features, per rendering backend.
//!
//! The tables are `const` and selected by an explicit [`Backend`] argument.

use serde::{Deserialize, Serialize};

use crate::node::NodeType;
use crate::node::NodeType as T;

/// Rendering backend family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// DOM/HTML-like backend.
    #[default]
    Dom,
    /// Native canvas renderer.
    Canvas,
}

/// An editable feature gated by node type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Uniform corner radius.
    CornerRadius,
    /// Independent per-corner radius.
    CornerRadius4,
    /// CSS-style border.
    Border,
    /// May contain children.
    Children,
    /// Stroke paint.
    Stroke,
    /// Independent per-side stroke width.
    StrokeWidth4,
    /// Drop shadow effect.
    DropShadow,
    /// Stroke end cap.
    StrokeCap,
    /// Editable point count (star/polygon).
    PointCount,
    /// Operand of a boolean operation.
    Boolean,
}

impl Feature {
    /// Every feature.
    pub const ALL: [Self; 10] = [
        Self::CornerRadius,
        Self::CornerRadius4,
        Self::Border,
        Self::Children,
        Self::Stroke,
        Self::StrokeWidth4,
        Self::DropShadow,
        Self::StrokeCap,
        Self::PointCount,
        Self::Boolean,
    ];
}

const BOX_LIKE: &[NodeType] = &[T::Rectangle, T::Image, T::Video, T::Container, T::Component];
const CONTAINERS: &[NodeType] = &[T::Container, T::Component, T::Instance, T::Group, T::Boolean];
const SHAPES: &[NodeType] = &[
    T::Rectangle,
    T::Ellipse,
    T::Vector,
    T::Line,
    T::Polygon,
    T::Star,
    T::Boolean,
];
const OPEN_PATHS: &[NodeType] = &[T::Line, T::Vector];
const POINT_COUNT: &[NodeType] = &[T::Polygon, T::Star];

mod dom {
    use super::{NodeType, T};

    pub(super) const CORNER_RADIUS: &[NodeType] = super::BOX_LIKE;
    pub(super) const CORNER_RADIUS_4: &[NodeType] = super::BOX_LIKE;
    pub(super) const BORDER: &[NodeType] = &[T::Container, T::Component, T::Image, T::Video];
    pub(super) const STROKE: &[NodeType] = &[
        T::Rectangle,
        T::Ellipse,
        T::Vector,
        T::Line,
        T::Polygon,
        T::Star,
        T::Text,
    ];
    pub(super) const STROKE_WIDTH_4: &[NodeType] = &[];
    pub(super) const DROP_SHADOW: &[NodeType] = &[
        T::Rectangle,
        T::Ellipse,
        T::Container,
        T::Component,
        T::Image,
        T::Video,
        T::Text,
    ];
    pub(super) const BOOLEAN: &[NodeType] = &[];
}

mod canvas {
    use super::{NodeType, T};

    pub(super) const CORNER_RADIUS: &[NodeType] = &[
        T::Rectangle,
        T::Image,
        T::Video,
        T::Container,
        T::Component,
        T::Polygon,
        T::Star,
    ];
    pub(super) const CORNER_RADIUS_4: &[NodeType] = super::BOX_LIKE;
    pub(super) const BORDER: &[NodeType] = &[];
    pub(super) const STROKE: &[NodeType] = &[
        T::Rectangle,
        T::Ellipse,
        T::Vector,
        T::Line,
        T::Polygon,
        T::Star,
        T::Text,
        T::Image,
        T::Container,
        T::Component,
        T::Boolean,
    ];
    pub(super) const STROKE_WIDTH_4: &[NodeType] = &[T::Rectangle, T::Container, T::Component];
    pub(super) const DROP_SHADOW: &[NodeType] = &[
        T::Rectangle,
        T::Ellipse,
        T::Vector,
        T::Polygon,
        T::Star,
        T::Text,
        T::Image,
        T::Container,
        T::Component,
        T::Boolean,
    ];
    pub(super) const BOOLEAN: &[NodeType] = super::SHAPES;
}

/// The node types supporting `feature` on `backend`.
#[must_use]
pub const fn types_supporting(feature: Feature, backend: Backend) -> &'static [NodeType] {
    match (feature, backend) {
        (Feature::CornerRadius, Backend::Dom) => dom::CORNER_RADIUS,
        (Feature::CornerRadius, Backend::Canvas) => canvas::CORNER_RADIUS,
        (Feature::CornerRadius4, Backend::Dom) => dom::CORNER_RADIUS_4,
        (Feature::CornerRadius4, Backend::Canvas) => canvas::CORNER_RADIUS_4,
        (Feature::Border, Backend::Dom) => dom::BORDER,
        (Feature::Border, Backend::Canvas) => canvas::BORDER,
        (Feature::Stroke, Backend::Dom) => dom::STROKE,
        (Feature::Stroke, Backend::Canvas) => canvas::STROKE,
        (Feature::StrokeWidth4, Backend::Dom) => dom::STROKE_WIDTH_4,
        (Feature::StrokeWidth4, Backend::Canvas) => canvas::STROKE_WIDTH_4,
        (Feature::DropShadow, Backend::Dom) => dom::DROP_SHADOW,
        (Feature::DropShadow, Backend::Canvas) => canvas::DROP_SHADOW,
        (Feature::Boolean, Backend::Dom) => dom::BOOLEAN,
        (Feature::Boolean, Backend::Canvas) => canvas::BOOLEAN,
        (Feature::Children, _) => CONTAINERS,
        (Feature::StrokeCap, _) => OPEN_PATHS,
        (Feature::PointCount, _) => POINT_COUNT,
    }
}

/// Whether `node_type` supports `feature` on `backend`.
///
/// ```
/// use vellum_core::capability::{supports, Backend, Feature};
/// use vellum_core::NodeType;
///
/// assert!(supports(Feature::Boolean, NodeType::Star, Backend::Canvas));
/// assert!(!supports(Feature::Boolean, NodeType::Star, Backend::Dom));
/// ```
#[must_use]
pub fn supports(feature: Feature, node_type: NodeType, backend: Backend) -> bool {
    types_supporting(feature, backend).contains(&node_type)
}
