//! Paint model: solid colors and gradients.

use serde::{Deserialize, Serialize};

use crate::geometry::Transform;

/// 8-bit RGB with a unit-interval alpha.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba8888 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha in `[0, 1]`.
    pub a: f32,
}

impl Rgba8888 {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0.0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 1.0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 1.0);

    /// Create a new color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

/// A color stop along a gradient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    /// Position along the gradient, `0.0` (start) to `1.0` (end).
    pub offset: f32,
    /// Stop color.
    pub color: Rgba8888,
}

impl GradientStop {
    /// Create a new stop; `offset` is clamped into `[0, 1]`.
    #[must_use]
    pub fn new(offset: f32, color: Rgba8888) -> Self {
        Self {
            offset: offset.clamp(0.0, 1.0),
            color,
        }
    }
}

/// How a fill or stroke is painted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Paint {
    /// A single color.
    Solid {
        /// The color.
        color: Rgba8888,
    },
    /// Linear gradient in a unit box, positioned by `transform`.
    LinearGradient {
        /// Stable id; used as the definition id when rendered.
        #[serde(default)]
        id: String,
        /// Gradient transform.
        #[serde(default)]
        transform: Transform,
        /// Color stops.
        stops: Vec<GradientStop>,
    },
    /// Radial gradient in a unit box, positioned by `transform`.
    RadialGradient {
        /// Stable id; used as the definition id when rendered.
        #[serde(default)]
        id: String,
        /// Gradient transform.
        #[serde(default)]
        transform: Transform,
        /// Color stops.
        stops: Vec<GradientStop>,
    },
    /// Angular (conic) gradient. Not renderable by any backend yet.
    SweepGradient {
        /// Stable id.
        #[serde(default)]
        id: String,
        /// Gradient transform.
        #[serde(default)]
        transform: Transform,
        /// Color stops.
        stops: Vec<GradientStop>,
    },
    /// Diamond gradient. Not renderable by any backend yet.
    DiamondGradient {
        /// Stable id.
        #[serde(default)]
        id: String,
        /// Gradient transform.
        #[serde(default)]
        transform: Transform,
        /// Color stops.
        stops: Vec<GradientStop>,
    },
}

impl Paint {
    /// A solid paint.
    #[must_use]
    pub const fn solid(color: Rgba8888) -> Self {
        Self::Solid { color }
    }

    /// Whether this is a gradient of any kind.
    #[must_use]
    pub fn is_gradient(&self) -> bool {
        !matches!(self, Self::Solid { .. })
    }

    /// Color stops, empty for solid paints.
    #[must_use]
    pub fn stops(&self) -> &[GradientStop] {
        match self {
            Self::Solid { .. } => &[],
            Self::LinearGradient { stops, .. }
            | Self::RadialGradient { stops, .. }
            | Self::SweepGradient { stops, .. }
            | Self::DiamondGradient { stops, .. } => stops,
        }
    }
}

impl Default for Paint {
    fn default() -> Self {
        Self::solid(Rgba8888::TRANSPARENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_serde_tag() {
        let json = r#"{"type":"linear_gradient","stops":[{"offset":0.0,"color":{"r":255,"g":0,"b":0,"a":1.0}}]}"#;
        let paint: Paint = serde_json::from_str(json).unwrap();
        match &paint {
            Paint::LinearGradient { id, transform, stops } => {
                assert!(id.is_empty());
                assert_eq!(*transform, Transform::IDENTITY);
                assert_eq!(stops.len(), 1);
            }
            other => panic!("unexpected paint: {other:?}"),
        }
        assert!(paint.is_gradient());
    }

    #[test]
    fn test_stop_offset_clamped() {
        assert_eq!(GradientStop::new(1.5, Rgba8888::BLACK).offset, 1.0);
        assert_eq!(GradientStop::new(-0.2, Rgba8888::BLACK).offset, 0.0);
    }
}
