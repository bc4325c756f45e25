//! Document model: a flat node map, parent → children adjacency lists, and
//! scenes.
//!
//! The document is owned by the host. Structural edits (insert, remove,
//! reparent, reorder) stamp a new [`Document::structure_revision`];
//! attribute-only edits through [`Document::update`] do not, so derived
//! lookup tables survive them.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::geometry::Vector2;
use crate::node::{NodeId, NodeRecord};
use crate::paint::Paint;
use crate::{CoreError, CoreResult};

static REVISION: AtomicU64 = AtomicU64::new(1);

/// Issue a structural revision stamp, unique across all documents in the
/// process. Clones share their stamp because they share their structure.
fn next_revision() -> u64 {
    REVISION.fetch_add(1, Ordering::Relaxed)
}

/// Canvas axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

/// A ruler guide: an infinite line perpendicular to `axis` at `offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Guide {
    /// The axis the offset is measured along.
    pub axis: Axis,
    /// Offset in scene coordinates.
    pub offset: f64,
}

/// One end of a scene edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EdgeEndpoint {
    /// A free position in scene coordinates.
    Position {
        /// The position.
        point: Vector2,
    },
    /// Attached to a node.
    Node {
        /// The node.
        target: NodeId,
    },
}

impl EdgeEndpoint {
    fn references(&self, id: &NodeId) -> bool {
        matches!(self, Self::Node { target } if target == id)
    }
}

/// An auxiliary connection between two endpoints. Not part of the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Edge id.
    pub id: NodeId,
    /// Start.
    pub a: EdgeEndpoint,
    /// End.
    pub b: EdgeEndpoint,
}

/// A named root context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    /// Scene id.
    pub id: NodeId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Root node ids in order.
    #[serde(default)]
    pub children: Vec<NodeId>,
    /// Background paint.
    #[serde(default)]
    pub background: Option<Paint>,
    /// Ruler guides.
    #[serde(default)]
    pub guides: Vec<Guide>,
    /// Non-tree edges.
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            children: Vec::new(),
            background: None,
            guides: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Guide offsets along one axis, in list order.
    #[must_use]
    pub fn guide_offsets(&self, axis: Axis) -> Vec<f64> {
        self.guides
            .iter()
            .filter(|g| g.axis == axis)
            .map(|g| g.offset)
            .collect()
    }
}

/// Where a node lives: under another node, or at the root of a scene.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum Container {
    /// Child of a node.
    Node(NodeId),
    /// Root of a scene.
    Scene(NodeId),
}

impl Container {
    /// The container's id.
    #[must_use]
    pub fn id(&self) -> &NodeId {
        match self {
            Self::Node(id) | Self::Scene(id) => id,
        }
    }
}

/// Z-order move within a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    /// Last in the child list (drawn on top).
    Front,
    /// First in the child list.
    Back,
    /// One step towards the front.
    Forward,
    /// One step towards the back.
    Backward,
}

/// A document snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    nodes: BTreeMap<NodeId, NodeRecord>,
    #[serde(default)]
    links: BTreeMap<NodeId, Vec<NodeId>>,
    #[serde(default)]
    scenes: BTreeMap<NodeId, Scene>,
    #[serde(skip, default = "next_revision")]
    structure_revision: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            links: BTreeMap::new(),
            scenes: BTreeMap::new(),
            structure_revision: next_revision(),
        }
    }

    /// Structural revision stamp. Changes on every successful structural
    /// edit; never changes on attribute-only edits.
    #[must_use]
    pub fn structure_revision(&self) -> u64 {
        self.structure_revision
    }

    fn touch(&mut self) {
        self.structure_revision = next_revision();
    }

    /// Get a node by id.
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&NodeRecord> {
        self.nodes.get(id)
    }

    /// Whether a node exists.
    #[must_use]
    pub fn contains(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// All nodes in key order.
    pub fn nodes(&self) -> impl Iterator<Item = &NodeRecord> {
        self.nodes.values()
    }

    /// All node ids in key order.
    pub fn node_ids(&self) -> impl Iterator<Item = &NodeId> {
        self.nodes.keys()
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the document has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Raw adjacency: parent id → ordered child ids.
    #[must_use]
    pub fn links(&self) -> &BTreeMap<NodeId, Vec<NodeId>> {
        &self.links
    }

    /// Get a scene by id.
    #[must_use]
    pub fn scene(&self, id: &NodeId) -> Option<&Scene> {
        self.scenes.get(id)
    }

    /// All scenes in key order.
    pub fn scenes(&self) -> impl Iterator<Item = &Scene> {
        self.scenes.values()
    }

    /// Add (or replace) a scene. Its `children` must already exist and be
    /// unowned, or be roots of the scene being replaced. Roots of a replaced
    /// scene that are not listed again become detached.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NodeNotFound`] if a listed child is missing, and
    /// [`CoreError::InvariantViolation`] if the scene id is a node id or a
    /// listed child already has another owner.
    pub fn add_scene(&mut self, scene: Scene) -> CoreResult<()> {
        if self.nodes.contains_key(&scene.id) {
            return Err(CoreError::InvariantViolation(format!(
                "scene id {} is already a node id",
                scene.id
            )));
        }
        let mut listed = HashSet::new();
        for root in &scene.children {
            if !self.nodes.contains_key(root) {
                return Err(CoreError::NodeNotFound(root.to_string()));
            }
            if !listed.insert(root) {
                return Err(CoreError::InvariantViolation(format!(
                    "scene root {root} is listed twice"
                )));
            }
            let parent = self.links.iter().find(|(_, c)| c.contains(root));
            if let Some((parent, _)) = parent {
                return Err(CoreError::InvariantViolation(format!(
                    "scene root {root} is already a child of {parent}"
                )));
            }
            if let Some(other) = self
                .scenes
                .values()
                .find(|s| s.id != scene.id && s.children.contains(root))
            {
                return Err(CoreError::InvariantViolation(format!(
                    "scene root {root} already belongs to scene {}",
                    other.id
                )));
            }
        }
        self.scenes.insert(scene.id.clone(), scene);
        self.touch();
        Ok(())
    }

    /// Insert a node into `container` at `index` (appended if `None` or past
    /// the end).
    ///
    /// # Errors
    ///
    /// Returns an error if the id is taken or the container does not exist.
    pub fn insert(
        &mut self,
        node: NodeRecord,
        container: &Container,
        index: Option<usize>,
    ) -> CoreResult<()> {
        if self.nodes.contains_key(&node.id) || self.scenes.contains_key(&node.id) {
            return Err(CoreError::DuplicateNode(node.id.to_string()));
        }
        self.check_container(container)?;
        let id = node.id.clone();
        self.nodes.insert(id.clone(), node);
        self.attach(id, container, index);
        self.touch();
        Ok(())
    }

    /// Remove a node and its whole subtree. Edges attached to any removed node
    /// are dropped.
    ///
    /// Returns the removed records, the requested node first.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NodeNotFound`] if the node does not exist.
    pub fn remove(&mut self, id: &NodeId) -> CoreResult<Vec<NodeRecord>> {
        if !self.nodes.contains_key(id) {
            return Err(CoreError::NodeNotFound(id.to_string()));
        }
        self.detach(id);

        let mut removed = Vec::new();
        let mut stack = vec![id.clone()];
        let mut gone = HashSet::new();
        while let Some(current) = stack.pop() {
            if !gone.insert(current.clone()) {
                continue;
            }
            if let Some(children) = self.links.remove(&current) {
                stack.extend(children.into_iter().rev());
            }
            if let Some(record) = self.nodes.remove(&current) {
                removed.push(record);
            }
        }

        for scene in self.scenes.values_mut() {
            scene
                .edges
                .retain(|e| !gone.iter().any(|g| e.a.references(g) || e.b.references(g)));
        }
        self.touch();
        Ok(removed)
    }

    /// Reparent a node into `container` at `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if the node or container does not exist, or if the
    /// move would place a node inside itself or its own subtree.
    pub fn move_to(
        &mut self,
        id: &NodeId,
        container: &Container,
        index: Option<usize>,
    ) -> CoreResult<()> {
        if !self.nodes.contains_key(id) {
            return Err(CoreError::NodeNotFound(id.to_string()));
        }
        self.check_container(container)?;
        if let Container::Node(target) = container {
            if target == id || self.is_in_subtree(id, target) {
                return Err(CoreError::InvariantViolation(format!(
                    "cannot move {id} into its own subtree ({target})"
                )));
            }
        }
        self.detach(id);
        self.attach(id.clone(), container, index);
        self.touch();
        Ok(())
    }

    /// Change a node's z-order within its container.
    ///
    /// Returns `false` (and leaves the revision unchanged) when the node has
    /// no container or is already in place.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NodeNotFound`] if the node does not exist.
    pub fn reorder(&mut self, id: &NodeId, order: Order) -> CoreResult<bool> {
        if !self.nodes.contains_key(id) {
            return Err(CoreError::NodeNotFound(id.to_string()));
        }
        let Some(list) = self.sibling_list_mut(id) else {
            return Ok(false);
        };
        let Some(from) = list.iter().position(|c| c == id) else {
            return Ok(false);
        };
        let last = list.len() - 1;
        let to = match order {
            Order::Front => last,
            Order::Back => 0,
            Order::Forward => (from + 1).min(last),
            Order::Backward => from.saturating_sub(1),
        };
        if to == from {
            return Ok(false);
        }
        let item = list.remove(from);
        list.insert(to, item);
        self.touch();
        Ok(true)
    }

    /// Attribute-only edit of a node. The id cannot be changed; the structural
    /// revision is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NodeNotFound`] if the node does not exist.
    pub fn update<F>(&mut self, id: &NodeId, f: F) -> CoreResult<()>
    where
        F: FnOnce(&mut NodeRecord),
    {
        let node = self
            .nodes
            .get_mut(id)
            .ok_or_else(|| CoreError::NodeNotFound(id.to_string()))?;
        f(node);
        node.id = id.clone();
        Ok(())
    }

    /// Attribute-only edit of a scene (name, background, guides, edges). Root
    /// membership cannot be changed here; use [`Document::move_to`].
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::SceneNotFound`] if the scene does not exist.
    pub fn update_scene<F>(&mut self, id: &NodeId, f: F) -> CoreResult<()>
    where
        F: FnOnce(&mut Scene),
    {
        let scene = self
            .scenes
            .get_mut(id)
            .ok_or_else(|| CoreError::SceneNotFound(id.to_string()))?;
        let children = std::mem::take(&mut scene.children);
        f(scene);
        scene.id = id.clone();
        scene.children = children;
        Ok(())
    }

    /// Check the document invariants:
    ///
    /// - every id referenced by `links` or `scene.children` exists;
    /// - every linked node has exactly one parent, scene roots have none and
    ///   belong to exactly one scene;
    /// - scene ids and node ids do not overlap;
    /// - the adjacency is acyclic.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvariantViolation`] describing the first
    /// violation found.
    pub fn validate(&self) -> CoreResult<()> {
        let violation = |msg: String| Err(CoreError::InvariantViolation(msg));
        let mut owner: BTreeMap<&NodeId, &NodeId> = BTreeMap::new();

        for (parent, children) in &self.links {
            if !self.nodes.contains_key(parent) {
                return violation(format!("link source {parent} does not exist"));
            }
            for child in children {
                if !self.nodes.contains_key(child) {
                    return violation(format!("link target {child} does not exist"));
                }
                if let Some(prev) = owner.insert(child, parent) {
                    return violation(format!("{child} has two parents ({prev}, {parent})"));
                }
            }
        }
        for scene in self.scenes.values() {
            if self.nodes.contains_key(&scene.id) {
                return violation(format!("scene id {} is also a node id", scene.id));
            }
            for root in &scene.children {
                if !self.nodes.contains_key(root) {
                    return violation(format!("scene root {root} does not exist"));
                }
                if let Some(prev) = owner.insert(root, &scene.id) {
                    return violation(format!("scene root {root} is also owned by {prev}"));
                }
            }
        }

        // Every upward walk must terminate within the node count.
        for start in owner.keys() {
            let mut current = *start;
            let mut steps = 0usize;
            while let Some(parent) = owner.get(current) {
                if self.scenes.contains_key(*parent) {
                    break;
                }
                steps += 1;
                if steps > self.nodes.len() {
                    return violation(format!("cycle through {start}"));
                }
                current = parent;
            }
        }
        Ok(())
    }

    /// Serialize the document to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> CoreResult<String> {
        serde_json::to_string(self).map_err(CoreError::Serialization)
    }

    /// Deserialize a document from JSON and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails or the snapshot breaks an
    /// invariant.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        let doc: Self = serde_json::from_str(json)?;
        doc.validate()?;
        Ok(doc)
    }

    fn check_container(&self, container: &Container) -> CoreResult<()> {
        match container {
            Container::Node(id) if !self.nodes.contains_key(id) => {
                Err(CoreError::NodeNotFound(id.to_string()))
            }
            Container::Scene(id) if !self.scenes.contains_key(id) => {
                Err(CoreError::SceneNotFound(id.to_string()))
            }
            _ => Ok(()),
        }
    }

    fn attach(&mut self, id: NodeId, container: &Container, index: Option<usize>) {
        let list = match container {
            Container::Node(parent) => self.links.entry(parent.clone()).or_default(),
            Container::Scene(scene) => match self.scenes.get_mut(scene) {
                Some(s) => &mut s.children,
                None => return,
            },
        };
        let at = index.unwrap_or(list.len()).min(list.len());
        list.insert(at, id);
    }

    fn detach(&mut self, id: &NodeId) {
        if let Some(list) = self.sibling_list_mut(id) {
            list.retain(|c| c != id);
        }
    }

    fn sibling_list_mut(&mut self, id: &NodeId) -> Option<&mut Vec<NodeId>> {
        if let Some(list) = self.links.values_mut().find(|c| c.contains(id)) {
            return Some(list);
        }
        self.scenes
            .values_mut()
            .map(|s| &mut s.children)
            .find(|c| c.contains(id))
    }

    /// Whether `node` lies in the subtree rooted at `root`.
    fn is_in_subtree(&self, root: &NodeId, node: &NodeId) -> bool {
        let mut stack: Vec<&NodeId> = vec![root];
        let mut seen = HashSet::new();
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            if let Some(children) = self.links.get(current) {
                for child in children {
                    if child == node {
                        return true;
                    }
                    stack.push(child);
                }
            }
        }
        false
    }
}
