//! # Vellum Renderer
//!
//! Backend-facing string synthesis for Vellum documents.
//!
//! ## Outputs
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              vellum-core Document            │
//! ├───────────────┬───────────────┬──────────────┤
//! │ SVG export    │ Gradient defs │ CSS paints   │
//! │ (scene → svg) │ (<defs>)      │ (DOM hosts)  │
//! └───────────────┴───────────────┴──────────────┘
//! ```
//!
//! Nothing here rasterizes; hosts feed the strings to their own backend.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod css;
pub mod error;
pub mod export;
pub mod paint;

pub use error::{RenderError, RenderResult};
pub use export::{ExportConfig, SceneExporter};
pub use paint::{paint_to_svg, GradientIds, PaintDefs, SvgPaint};

/// Renderer version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
