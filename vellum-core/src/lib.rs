//! # Vellum Core
//!
//! Scene graph, selector algebra and geometry kernel for an interactive
//! design canvas.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │              Editing commands               │
//! ├──────────────────────┬──────────────────────┤
//! │  Query / Selectors   │  Capability Matrix   │
//! │  - ~+ ~- ~ > .. *    │  - feature × type    │
//! │  - top id in scene   │  - per backend       │
//! ├──────────────────────┤                      │
//! │  Graph Index (LUT)   │                      │
//! │  - parent / children │                      │
//! │  - cached by rev     │                      │
//! ├──────────────────────┴──────────────────────┤
//! │  Geometry Kernel                            │
//! │  - snap / align      - transforms           │
//! │  - rectangles        - rounded-rect paths   │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Everything is synchronous and deterministic. The host owns the
//! [`Document`]; the core reads it and answers with id lists, geometry and
//! [`MutationRequest`]s.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod capability;
pub mod command;
pub mod config;
pub mod document;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod node;
pub mod paint;
pub mod query;

pub use capability::{supports, Backend, Feature};
pub use command::{EditorSnapshot, Gated, MutationRequest};
pub use config::EditorConfig;
pub use document::{Axis, Container, Document, Edge, EdgeEndpoint, Guide, Order, Scene};
pub use error::{CoreError, CoreResult};
pub use geometry::{Aligned, Alignment, CornerRadius, Rectangle, Transform, Vector2};
pub use graph::{GraphCache, GraphIndex};
pub use node::{NodeId, NodeKind, NodeRecord, NodeType};
pub use paint::{GradientStop, Paint, Rgba8888};
pub use query::{query, top_id_within_scene, Selector};

/// Vellum core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
