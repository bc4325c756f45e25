//! Editing commands.
//!
//! A command resolves its targets with the selector engine, computes geometry
//! with the kernel, checks the capability matrix and returns
//! [`MutationRequest`]s. Applying them is up to the host.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::capability::{supports, Backend, Feature};
use crate::config::EditorConfig;
use crate::document::{Axis, Document};
use crate::geometry::rect::align_rects;
use crate::geometry::{align, snap, Aligned, Alignment, CornerRadius, Rectangle, Vector2};
use crate::graph::{GraphCache, GraphIndex};
use crate::node::NodeId;
use crate::query::{query, Selector};
use crate::CoreResult;

/// A change the host should apply to its document or editor state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MutationRequest {
    /// Replace the selection.
    Select {
        /// New selection, in order.
        ids: Vec<NodeId>,
    },
    /// Move a node by `delta`.
    Translate {
        /// Target node.
        id: NodeId,
        /// Offset to add to the node position.
        delta: Vector2,
    },
    /// Set a node's corner radius.
    SetCornerRadius {
        /// Target node.
        id: NodeId,
        /// New radius.
        radius: CornerRadius,
    },
}

/// Requests for the nodes that passed a capability check, plus the ids that
/// did not.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Gated {
    /// Requests for supported nodes.
    pub requests: Vec<MutationRequest>,
    /// Nodes that do not support the edit (or no longer exist).
    pub rejected: Vec<NodeId>,
}

/// Read-only view of the editor state a command runs against.
#[derive(Debug, Clone)]
pub struct EditorSnapshot<'a> {
    document: &'a Document,
    graph: Arc<GraphIndex>,
    selection: Vec<NodeId>,
    config: &'a EditorConfig,
}

impl<'a> EditorSnapshot<'a> {
    /// Capture a snapshot, reusing the cached graph index when the document
    /// structure is unchanged.
    pub fn new(
        document: &'a Document,
        cache: &mut GraphCache,
        selection: Vec<NodeId>,
        config: &'a EditorConfig,
    ) -> Self {
        Self {
            document,
            graph: cache.get(document),
            selection,
            config,
        }
    }

    /// The document.
    #[must_use]
    pub fn document(&self) -> &Document {
        self.document
    }

    /// The graph index.
    #[must_use]
    pub fn graph(&self) -> &GraphIndex {
        &self.graph
    }

    /// The current selection.
    #[must_use]
    pub fn selection(&self) -> &[NodeId] {
        &self.selection
    }

    /// Resolve `selector` against the current selection.
    #[must_use]
    pub fn select(&self, selector: &Selector) -> MutationRequest {
        let ids = query(&self.graph, &self.selection, selector);
        tracing::trace!(%selector, count = ids.len(), "select");
        MutationRequest::Select { ids }
    }

    /// Snap `value` to the nearest guide of `scene` along `axis` within the
    /// configured snap threshold.
    ///
    /// Returns `(snapped, signed_distance)`; `(value, +inf)` when nothing is
    /// in range or the scene does not exist.
    #[must_use]
    pub fn snap_offset_to_guides(&self, scene: &NodeId, axis: Axis, value: f64) -> (f64, f64) {
        let guides = self
            .document
            .scene(scene)
            .map(|s| s.guide_offsets(axis))
            .unwrap_or_default();
        snap::scalar(value, &guides, self.config.snap_threshold)
    }

    /// Align `point` to the nearest of `targets` within the configured vector
    /// snap threshold.
    ///
    /// # Errors
    ///
    /// Returns an error if `targets` is empty or the configured threshold is
    /// negative.
    pub fn align_point(&self, point: Vector2, targets: &[Vector2]) -> CoreResult<Aligned<Vector2>> {
        align::vector2(point, targets, self.config.vector_snap_threshold)
    }

    /// Align the selected nodes to their shared bounds.
    ///
    /// `rects` holds the scene-space bounds of the nodes, as laid out by the
    /// host. Nested selections are pruned to their outermost nodes; nodes
    /// without a rect are skipped and nodes already in place yield no request.
    #[must_use]
    pub fn align_selection(
        &self,
        horizontal: Alignment,
        vertical: Alignment,
        rects: &BTreeMap<NodeId, Rectangle>,
    ) -> Vec<MutationRequest> {
        let (ids, before): (Vec<NodeId>, Vec<Rectangle>) = self
            .graph
            .prune_nested(&self.selection)
            .into_iter()
            .filter_map(|id| rects.get(&id).map(|r| (id, *r)))
            .unzip();
        let after = align_rects(&before, horizontal, vertical);

        ids.into_iter()
            .zip(before.iter().zip(&after))
            .filter_map(|(id, (from, to))| {
                let delta = Vector2::new(to.x - from.x, to.y - from.y);
                (delta != Vector2::ZERO).then_some(MutationRequest::Translate { id, delta })
            })
            .collect()
    }

    /// Set the corner radius of every selected node that supports it on
    /// `backend` (the configured default when `None`).
    ///
    /// A uniform radius needs [`Feature::CornerRadius`]; four distinct radii
    /// need [`Feature::CornerRadius4`].
    #[must_use]
    pub fn set_corner_radius(&self, radius: CornerRadius, backend: Option<Backend>) -> Gated {
        let backend = backend.unwrap_or(self.config.default_backend);
        let feature = if radius.is_uniform() {
            Feature::CornerRadius
        } else {
            Feature::CornerRadius4
        };

        let mut gated = Gated::default();
        for id in &self.selection {
            match self.document.node(id) {
                Some(node) if supports(feature, node.node_type(), backend) => {
                    gated.requests.push(MutationRequest::SetCornerRadius {
                        id: id.clone(),
                        radius,
                    });
                }
                _ => gated.rejected.push(id.clone()),
            }
        }
        if !gated.rejected.is_empty() {
            tracing::debug!(?feature, ?backend, rejected = gated.rejected.len(), "corner radius gated");
        }
        gated
    }
}
