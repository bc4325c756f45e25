//! Graph Index: parent/children/sibling lookup tables derived from a
//! [`Document`].
//!
//! The index is read-only and tied to one structural revision of the
//! document. [`GraphCache`] memoizes it so attribute-only edits reuse the same
//! `Arc<GraphIndex>` and structural edits trigger a rebuild.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::document::{Container, Document};
use crate::node::NodeId;

/// Upper bound on any upward walk. Reaching it means the adjacency is corrupt.
pub const HARD_MAX_WALK: usize = 5000;

/// Derived lookup tables over one document revision.
#[derive(Debug, Clone, Default)]
pub struct GraphIndex {
    revision: u64,
    keys: Vec<NodeId>,
    containers: HashMap<NodeId, Container>,
    children: HashMap<NodeId, Vec<NodeId>>,
    roots: HashMap<NodeId, Vec<NodeId>>,
}

impl GraphIndex {
    /// Build the index in O(V + E).
    #[must_use]
    pub fn build(document: &Document) -> Self {
        let keys: Vec<NodeId> = document.node_ids().cloned().collect();
        let mut containers = HashMap::with_capacity(keys.len());
        let mut children = HashMap::new();
        let mut roots = HashMap::new();

        for (parent, list) in document.links() {
            for child in list {
                containers.insert(child.clone(), Container::Node(parent.clone()));
            }
            children.insert(parent.clone(), list.clone());
        }
        for scene in document.scenes() {
            for root in &scene.children {
                containers.insert(root.clone(), Container::Scene(scene.id.clone()));
            }
            roots.insert(scene.id.clone(), scene.children.clone());
        }

        tracing::debug!(
            revision = document.structure_revision(),
            nodes = keys.len(),
            "graph index rebuilt"
        );

        Self {
            revision: document.structure_revision(),
            keys,
            containers,
            children,
            roots,
        }
    }

    /// The document revision this index was built from.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// All node ids in document key order.
    #[must_use]
    pub fn keys(&self) -> &[NodeId] {
        &self.keys
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Check if the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Whether `id` is a node of the indexed document.
    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.keys.binary_search(id).is_ok()
    }

    /// Parent node, `None` for scene roots, detached and unknown ids.
    #[must_use]
    pub fn parent_of(&self, id: &NodeId) -> Option<&NodeId> {
        match self.containers.get(id)? {
            Container::Node(parent) => Some(parent),
            Container::Scene(_) => None,
        }
    }

    /// Ordered children of a node. Empty if unknown.
    #[must_use]
    pub fn children_of(&self, id: &NodeId) -> &[NodeId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Ordered roots of a scene. Empty if unknown.
    #[must_use]
    pub fn roots_of(&self, scene: &NodeId) -> &[NodeId] {
        self.roots.get(scene).map(Vec::as_slice).unwrap_or_default()
    }

    /// The ordered members of a container: a node's children or a scene's
    /// roots.
    #[must_use]
    pub fn members(&self, container: &Container) -> &[NodeId] {
        match container {
            Container::Node(id) => self.children_of(id),
            Container::Scene(id) => self.roots_of(id),
        }
    }

    /// The node's container, `None` if the node is detached or unknown.
    #[must_use]
    pub fn container_of(&self, id: &NodeId) -> Option<&Container> {
        self.containers.get(id)
    }

    /// The full ordered child list of the node's container, the node
    /// included. Empty if the node has no container.
    #[must_use]
    pub fn sibling_list(&self, id: &NodeId) -> &[NodeId] {
        self.container_of(id)
            .map(|c| self.members(c))
            .unwrap_or_default()
    }

    /// Siblings in child order, excluding `id`. Scene roots are siblings of
    /// the other roots of the same scene.
    #[must_use]
    pub fn siblings_of(&self, id: &NodeId) -> Vec<NodeId> {
        self.sibling_list(id)
            .iter()
            .filter(|s| *s != id)
            .cloned()
            .collect()
    }

    /// Walk the parent chain upwards, nearest parent first.
    fn climb<'a>(&'a self, id: &'a NodeId) -> Climb<'a> {
        Climb {
            graph: self,
            current: id,
            steps: 0,
        }
    }

    /// Ancestors in root-first order, excluding `id` itself.
    #[must_use]
    pub fn ancestors(&self, id: &NodeId) -> Vec<NodeId> {
        let mut ancestors: Vec<NodeId> = self.climb(id).cloned().collect();
        ancestors.reverse();
        ancestors
    }

    /// Number of node ancestors. Scene roots have depth 0.
    #[must_use]
    pub fn depth(&self, id: &NodeId) -> usize {
        self.climb(id).count()
    }

    /// Whether `ancestor` is a strict ancestor of `node`.
    #[must_use]
    pub fn is_ancestor(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        self.climb(node).any(|p| p == ancestor)
    }

    /// The outermost node ancestor of `id`, or `id` itself when it has no
    /// parent. `None` for unknown ids.
    #[must_use]
    pub fn top_id(&self, id: &NodeId) -> Option<NodeId> {
        if !self.contains(id) {
            return None;
        }
        Some(self.climb(id).last().unwrap_or(id).clone())
    }

    /// Depth-first flattening of the subtree at `id` as `(id, depth)` pairs,
    /// starting with `(id, 0)`.
    #[must_use]
    pub fn hierarchy(&self, id: &NodeId) -> Vec<(NodeId, usize)> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        let mut stack = vec![(id, 0usize)];
        while let Some((current, depth)) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            out.push((current.clone(), depth));
            for child in self.children_of(current).iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        out
    }

    /// Keep only the outermost ids: when a node and one of its descendants
    /// are both listed, the descendant is dropped. Survivors keep their
    /// first-occurrence order.
    #[must_use]
    pub fn prune_nested(&self, ids: &[NodeId]) -> Vec<NodeId> {
        let mut kept: Vec<NodeId> = Vec::with_capacity(ids.len());
        for id in ids {
            if kept.contains(id) || kept.iter().any(|k| self.is_ancestor(k, id)) {
                continue;
            }
            kept.retain(|k| !self.is_ancestor(id, k));
            kept.push(id.clone());
        }
        kept
    }
}

/// Upward walk over node parents, bounded by [`HARD_MAX_WALK`].
struct Climb<'a> {
    graph: &'a GraphIndex,
    current: &'a NodeId,
    steps: usize,
}

impl<'a> Iterator for Climb<'a> {
    type Item = &'a NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.steps >= HARD_MAX_WALK {
            tracing::error!(start = %self.current, "graph walk hit HARD_MAX_WALK");
            return None;
        }
        let parent = self.graph.parent_of(self.current)?;
        self.steps += 1;
        self.current = parent;
        Some(parent)
    }
}

/// Memoizes the [`GraphIndex`] of a document by structural revision.
#[derive(Debug, Default)]
pub struct GraphCache {
    cached: Option<Arc<GraphIndex>>,
}

impl GraphCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the index for `document`, rebuilding only if its structural
    /// revision changed since the last call.
    pub fn get(&mut self, document: &Document) -> Arc<GraphIndex> {
        if let Some(graph) = &self.cached {
            if graph.revision() == document.structure_revision() {
                return Arc::clone(graph);
            }
        }
        let graph = Arc::new(GraphIndex::build(document));
        self.cached = Some(Arc::clone(&graph));
        graph
    }

    /// Drop the cached index.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Scene;
    use crate::node::{NodeKind, NodeRecord};

    fn ids(list: &[&str]) -> Vec<NodeId> {
        list.iter().map(|s| NodeId::from(*s)).collect()
    }

    /// scene: [a, b]; a: [a1, a2]; a2: [a21]
    fn fixture() -> Document {
        let mut doc = Document::new();
        doc.add_scene(Scene::new("s", "Scene")).unwrap();
        let scene = Container::Scene("s".into());
        for id in ["a", "b"] {
            doc.insert(NodeRecord::new(id, NodeKind::Group), &scene, None)
                .unwrap();
        }
        for id in ["a1", "a2"] {
            doc.insert(
                NodeRecord::new(id, NodeKind::Group),
                &Container::Node("a".into()),
                None,
            )
            .unwrap();
        }
        doc.insert(
            NodeRecord::new("a21", NodeKind::Ellipse),
            &Container::Node("a2".into()),
            None,
        )
        .unwrap();
        doc
    }

    #[test]
    fn test_lookups() {
        let graph = GraphIndex::build(&fixture());
        assert_eq!(graph.len(), 5);
        assert_eq!(graph.parent_of(&"a1".into()), Some(&NodeId::from("a")));
        assert_eq!(graph.parent_of(&"a".into()), None);
        assert_eq!(graph.children_of(&"a".into()), ids(&["a1", "a2"]).as_slice());
        assert_eq!(graph.siblings_of(&"a1".into()), ids(&["a2"]));
        assert_eq!(graph.siblings_of(&"b".into()), ids(&["a"]));
        assert_eq!(graph.roots_of(&"s".into()), ids(&["a", "b"]).as_slice());
        assert!(graph.children_of(&"s".into()).is_empty());
        assert_eq!(
            graph.container_of(&"b".into()),
            Some(&Container::Scene("s".into()))
        );
    }

    #[test]
    fn test_unknown_ids_are_empty() {
        let graph = GraphIndex::build(&fixture());
        let ghost = NodeId::from("ghost");
        assert_eq!(graph.parent_of(&ghost), None);
        assert!(graph.children_of(&ghost).is_empty());
        assert!(graph.siblings_of(&ghost).is_empty());
        assert_eq!(graph.top_id(&ghost), None);
        assert!(!graph.contains(&ghost));
    }

    #[test]
    fn test_ancestry() {
        let graph = GraphIndex::build(&fixture());
        let leaf = NodeId::from("a21");
        assert_eq!(graph.ancestors(&leaf), ids(&["a", "a2"]));
        assert_eq!(graph.depth(&leaf), 2);
        assert!(graph.is_ancestor(&"a".into(), &leaf));
        assert!(!graph.is_ancestor(&leaf, &"a".into()));
        assert_eq!(graph.top_id(&leaf), Some("a".into()));
        assert_eq!(graph.top_id(&"b".into()), Some("b".into()));
    }

    #[test]
    fn test_hierarchy() {
        let graph = GraphIndex::build(&fixture());
        assert_eq!(
            graph.hierarchy(&"a".into()),
            vec![
                ("a".into(), 0),
                ("a1".into(), 1),
                ("a2".into(), 1),
                ("a21".into(), 2),
            ]
        );
    }

    #[test]
    fn test_prune_nested() {
        let graph = GraphIndex::build(&fixture());
        assert_eq!(
            graph.prune_nested(&ids(&["a21", "b", "a", "a1"])),
            ids(&["b", "a"])
        );
    }

    #[test]
    fn test_scene_roots_kept_apart_from_children() {
        let json = r#"{
            "nodes": {
                "x": {"id":"x","width":1,"height":1,"kind":{"type":"group"}},
                "c": {"id":"c","width":1,"height":1,"kind":{"type":"line"}}
            },
            "links": {"x": ["c"]},
            "scenes": {"x": {"id":"x","children":["x"]}}
        }"#;
        let doc: Document = serde_json::from_str(json).unwrap();
        let graph = GraphIndex::build(&doc);

        assert_eq!(graph.children_of(&"x".into()), ids(&["c"]).as_slice());
        assert_eq!(graph.roots_of(&"x".into()), ids(&["x"]).as_slice());
        assert_eq!(
            crate::query::query(&graph, &ids(&["x"]), &crate::query::Selector::Children),
            ids(&["c"])
        );
        assert_eq!(graph.siblings_of(&"x".into()), Vec::<NodeId>::new());
    }

    #[test]
    fn test_cache_identity() {
        let mut doc = fixture();
        let mut cache = GraphCache::new();
        let first = cache.get(&doc);
        assert!(Arc::ptr_eq(&first, &cache.get(&doc)));

        doc.update(&"a1".into(), |n| n.opacity = 0.5).unwrap();
        assert!(Arc::ptr_eq(&first, &cache.get(&doc)));

        doc.move_to(&"a1".into(), &Container::Node("b".into()), None)
            .unwrap();
        let second = cache.get(&doc);
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(second.parent_of(&"a1".into()), Some(&NodeId::from("b")));
    }
}
