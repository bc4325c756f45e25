//! CSS strings for DOM-like backends.

use std::fmt::Write;

use vellum_core::geometry::Transform;
use vellum_core::{CornerRadius, GradientStop, Paint, Rgba8888};

/// `rgba(r, g, b, a)`.
#[must_use]
pub fn rgba(color: Rgba8888) -> String {
    format!("rgba({}, {}, {}, {})", color.r, color.g, color.b, color.a)
}

fn stop_list(stops: &[GradientStop]) -> String {
    let mut out = String::new();
    for (i, stop) in stops.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{} {}%", rgba(stop.color), stop.offset * 100.0);
    }
    out
}

/// `linear-gradient(<deg>deg, <stops>)`.
///
/// CSS gradients take no matrix, so only the rotation of `transform`
/// survives.
#[must_use]
pub fn linear_gradient(transform: &Transform, stops: &[GradientStop]) -> String {
    format!("linear-gradient({}deg, {})", transform.angle(), stop_list(stops))
}

/// `radial-gradient(<stops>)`.
#[must_use]
pub fn radial_gradient(stops: &[GradientStop]) -> String {
    format!("radial-gradient({})", stop_list(stops))
}

/// The CSS `background` value for a paint. `None` for paints CSS cannot
/// express (sweep, diamond).
#[must_use]
pub fn fill(paint: &Paint) -> Option<String> {
    match paint {
        Paint::Solid { color } => Some(rgba(*color)),
        Paint::LinearGradient {
            transform, stops, ..
        } => Some(linear_gradient(transform, stops)),
        Paint::RadialGradient { stops, .. } => Some(radial_gradient(stops)),
        Paint::SweepGradient { .. } | Paint::DiamondGradient { .. } => None,
    }
}

/// `border-radius` shorthand, `tl tr br bl` in pixels.
#[must_use]
pub fn border_radius(radius: CornerRadius) -> String {
    let [tl, tr, br, bl] = radius.to_array();
    format!("{tl}px {tr}px {br}px {bl}px")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stops() -> Vec<GradientStop> {
        vec![
            GradientStop::new(0.0, Rgba8888::new(255, 0, 0, 1.0)),
            GradientStop::new(1.0, Rgba8888::new(0, 0, 255, 0.5)),
        ]
    }

    #[test]
    fn test_rgba() {
        assert_eq!(rgba(Rgba8888::new(12, 34, 56, 0.25)), "rgba(12, 34, 56, 0.25)");
        assert_eq!(rgba(Rgba8888::BLACK), "rgba(0, 0, 0, 1)");
    }

    #[test]
    fn test_linear_gradient_uses_rotation() {
        assert_eq!(
            linear_gradient(&Transform::IDENTITY, &stops()),
            "linear-gradient(0deg, rgba(255, 0, 0, 1) 0%, rgba(0, 0, 255, 0.5) 100%)"
        );
        let rotated = Transform::new(0.0, -1.0, 0.0, 1.0, 0.0, 0.0);
        let prefix = format!("linear-gradient({}deg, ", rotated.angle());
        assert!((rotated.angle() - 90.0).abs() < 1e-9);
        assert!(linear_gradient(&rotated, &stops()).starts_with(&prefix));
    }

    #[test]
    fn test_fill() {
        assert_eq!(
            fill(&Paint::solid(Rgba8888::WHITE)).as_deref(),
            Some("rgba(255, 255, 255, 1)")
        );
        let radial = Paint::RadialGradient {
            id: String::new(),
            transform: Transform::IDENTITY,
            stops: stops(),
        };
        assert_eq!(
            fill(&radial).as_deref(),
            Some("radial-gradient(rgba(255, 0, 0, 1) 0%, rgba(0, 0, 255, 0.5) 100%)")
        );
        let sweep = Paint::SweepGradient {
            id: String::new(),
            transform: Transform::IDENTITY,
            stops: stops(),
        };
        assert_eq!(fill(&sweep), None);
    }

    #[test]
    fn test_border_radius_order() {
        assert_eq!(
            border_radius(CornerRadius::Independent([1.0, 2.0, 3.0, 4.0])),
            "1px 2px 3px 4px"
        );
        assert_eq!(border_radius(CornerRadius::Uniform(6.0)), "6px 6px 6px 6px");
    }
}
