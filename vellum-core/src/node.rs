//! Document nodes - the building blocks of scenes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{CornerRadius, Rectangle, Transform};
use crate::paint::Paint;

/// Unique identifier for a node or scene.
///
/// Ids are opaque strings owned by the host; [`NodeId::new`] mints a fresh
/// random one.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a new unique node ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fieldless projection of [`NodeKind`], used for capability lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    /// Rectangle.
    Rectangle,
    /// Ellipse.
    Ellipse,
    /// Free-form vector path.
    Vector,
    /// Straight line.
    Line,
    /// Regular polygon.
    Polygon,
    /// Star.
    Star,
    /// Text block.
    Text,
    /// Raster image.
    Image,
    /// Video.
    Video,
    /// Layout container (frame).
    Container,
    /// Reusable component definition.
    Component,
    /// Instance of a component.
    Instance,
    /// Boolean operation over its children.
    Boolean,
    /// Instance of a hosted template.
    TemplateInstance,
    /// Plain group.
    Group,
}

impl NodeType {
    /// Every node type.
    pub const ALL: [Self; 15] = [
        Self::Rectangle,
        Self::Ellipse,
        Self::Vector,
        Self::Line,
        Self::Polygon,
        Self::Star,
        Self::Text,
        Self::Image,
        Self::Video,
        Self::Container,
        Self::Component,
        Self::Instance,
        Self::Boolean,
        Self::TemplateInstance,
        Self::Group,
    ];
}

/// Line end decoration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeCap {
    /// Flat, ends exactly at the endpoint.
    #[default]
    Butt,
    /// Semicircle past the endpoint.
    Round,
    /// Square past the endpoint.
    Square,
}

/// Stroke placement relative to the outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeAlign {
    /// Centered on the outline.
    Center,
    /// Inside the outline.
    #[default]
    Inside,
    /// Outside the outline.
    Outside,
}

/// A stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Stroke paint.
    pub paint: Paint,
    /// Stroke width in pixels.
    pub width: f64,
    /// End cap.
    #[serde(default)]
    pub cap: StrokeCap,
    /// Placement.
    #[serde(default)]
    pub align: StrokeAlign,
}

/// Boolean path operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BooleanOperation {
    /// A ∪ B.
    Union,
    /// A ∩ B.
    Intersection,
    /// A − B.
    Difference,
    /// A ⊕ B.
    Xor,
}

/// Variant-specific node content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum NodeKind {
    /// A rectangle.
    Rectangle {
        /// Corner radius.
        corner_radius: CornerRadius,
    },
    /// An ellipse filling the node bounds.
    Ellipse,
    /// A vector path.
    Vector {
        /// SVG path data in local coordinates.
        path: String,
    },
    /// A line along the node width.
    Line,
    /// A regular polygon.
    Polygon {
        /// Number of vertices.
        point_count: u32,
        /// Uniform corner radius.
        corner_radius: f64,
    },
    /// A star.
    Star {
        /// Number of outer points.
        point_count: u32,
        /// Inner radius as a fraction of the outer radius.
        inner_radius: f64,
        /// Uniform corner radius.
        corner_radius: f64,
    },
    /// A text block. Layout is resolved by the host's shaping service.
    Text {
        /// Text content.
        text: String,
        /// Font size in pixels.
        font_size: f32,
        /// Font family.
        font_family: String,
    },
    /// A raster image.
    Image {
        /// Image source URI.
        src: String,
        /// Corner radius.
        corner_radius: CornerRadius,
    },
    /// A video.
    Video {
        /// Video source URI.
        src: String,
        /// Corner radius.
        corner_radius: CornerRadius,
    },
    /// A layout container.
    Container {
        /// Corner radius.
        corner_radius: CornerRadius,
        /// Whether children are clipped to the bounds.
        clips_content: bool,
    },
    /// A component definition.
    Component {
        /// Corner radius.
        corner_radius: CornerRadius,
    },
    /// An instance of a component.
    Instance {
        /// The component this instance was created from.
        component_id: NodeId,
    },
    /// Boolean operation over the node's children.
    Boolean {
        /// The operation.
        op: BooleanOperation,
    },
    /// An instance of a hosted template.
    TemplateInstance {
        /// Template identifier.
        template_id: String,
    },
    /// A plain group.
    Group,
}

impl NodeKind {
    /// The fieldless type tag.
    #[must_use]
    pub fn node_type(&self) -> NodeType {
        match self {
            Self::Rectangle { .. } => NodeType::Rectangle,
            Self::Ellipse => NodeType::Ellipse,
            Self::Vector { .. } => NodeType::Vector,
            Self::Line => NodeType::Line,
            Self::Polygon { .. } => NodeType::Polygon,
            Self::Star { .. } => NodeType::Star,
            Self::Text { .. } => NodeType::Text,
            Self::Image { .. } => NodeType::Image,
            Self::Video { .. } => NodeType::Video,
            Self::Container { .. } => NodeType::Container,
            Self::Component { .. } => NodeType::Component,
            Self::Instance { .. } => NodeType::Instance,
            Self::Boolean { .. } => NodeType::Boolean,
            Self::TemplateInstance { .. } => NodeType::TemplateInstance,
            Self::Group => NodeType::Group,
        }
    }

    /// Rectangular corner radius, for the variants that carry one.
    #[must_use]
    pub fn corner_radius(&self) -> Option<CornerRadius> {
        match self {
            Self::Rectangle { corner_radius }
            | Self::Image { corner_radius, .. }
            | Self::Video { corner_radius, .. }
            | Self::Container { corner_radius, .. }
            | Self::Component { corner_radius } => Some(*corner_radius),
            Self::Polygon { corner_radius, .. } | Self::Star { corner_radius, .. } => {
                Some(CornerRadius::Uniform(*corner_radius))
            }
            _ => None,
        }
    }
}

/// A node with content, placement and style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Unique identifier.
    pub id: NodeId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Whether the node is visible and participates in hit testing.
    #[serde(default = "default_true")]
    pub active: bool,
    /// Whether the node is locked against direct manipulation.
    #[serde(default)]
    pub locked: bool,
    /// Position/rotation/scale relative to the parent.
    #[serde(default)]
    pub transform: Transform,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
    /// Opacity in `[0, 1]`.
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    /// Fill paint.
    #[serde(default)]
    pub fill: Option<Paint>,
    /// Stroke.
    #[serde(default)]
    pub stroke: Option<Stroke>,
    /// Variant content.
    pub kind: NodeKind,
}

fn default_true() -> bool {
    true
}

fn default_opacity() -> f32 {
    1.0
}

impl NodeRecord {
    /// Create a node with the given id and kind, 100×100 at the origin.
    #[must_use]
    pub fn new(id: impl Into<NodeId>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            active: true,
            locked: false,
            transform: Transform::IDENTITY,
            width: 100.0,
            height: 100.0,
            opacity: 1.0,
            fill: None,
            stroke: None,
            kind,
        }
    }

    /// Set the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Set the size.
    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the fill.
    #[must_use]
    pub fn with_fill(mut self, fill: Paint) -> Self {
        self.fill = Some(fill);
        self
    }

    /// The fieldless type tag.
    #[must_use]
    pub fn node_type(&self) -> NodeType {
        self.kind.node_type()
    }

    /// Local bounds (position from the transform's translation, unrotated
    /// size).
    #[must_use]
    pub fn bounds(&self) -> Rectangle {
        let t = self.transform.get_translate();
        Rectangle::new(t.x, t.y, self.width, self.height)
    }
}
