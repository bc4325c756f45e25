//! Selector algebra over a [`GraphIndex`] and the current selection.
//!
//! | Token       | Result                                                   |
//! |-------------|----------------------------------------------------------|
//! | `~+`        | next sibling of each selected id, wrapping               |
//! | `~-`        | previous sibling of each selected id, wrapping           |
//! | `~`         | siblings of the selection (all nodes when empty)         |
//! | `>`         | direct children of each selected id                      |
//! | `..`        | parent of each selected id                               |
//! | `*`         | every node in document key order                         |
//! | `selection` | the selection itself                                     |
//!
//! Explicit id lists are passed through untouched.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::document::Container;
use crate::graph::{GraphIndex, HARD_MAX_WALK};
use crate::node::NodeId;
use crate::{CoreError, CoreResult};

/// A query over the document graph relative to a selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SelectorRepr", into = "SelectorRepr")]
pub enum Selector {
    /// `~+`
    NextSibling,
    /// `~-`
    PreviousSibling,
    /// `~`
    Siblings,
    /// `>`
    Children,
    /// `..`
    Parent,
    /// `*`
    All,
    /// `selection`
    Selection,
    /// Explicit ids, returned verbatim.
    Ids(Vec<NodeId>),
}

impl Selector {
    /// The textual token, `None` for explicit ids.
    #[must_use]
    pub fn token(&self) -> Option<&'static str> {
        Some(match self {
            Self::NextSibling => "~+",
            Self::PreviousSibling => "~-",
            Self::Siblings => "~",
            Self::Children => ">",
            Self::Parent => "..",
            Self::All => "*",
            Self::Selection => "selection",
            Self::Ids(_) => return None,
        })
    }
}

impl FromStr for Selector {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "~+" => Ok(Self::NextSibling),
            "~-" => Ok(Self::PreviousSibling),
            "~" => Ok(Self::Siblings),
            ">" => Ok(Self::Children),
            ".." => Ok(Self::Parent),
            "*" => Ok(Self::All),
            "selection" => Ok(Self::Selection),
            other => {
                tracing::error!(token = other, "unknown selector");
                Err(CoreError::UnknownSelector(other.to_string()))
            }
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ids(ids) => {
                let joined: Vec<&str> = ids.iter().map(NodeId::as_str).collect();
                write!(f, "[{}]", joined.join(", "))
            }
            other => f.write_str(other.token().unwrap_or_default()),
        }
    }
}

impl From<Vec<NodeId>> for Selector {
    fn from(ids: Vec<NodeId>) -> Self {
        Self::Ids(ids)
    }
}

/// Wire form: a token string or an array of ids.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum SelectorRepr {
    Token(String),
    Ids(Vec<NodeId>),
}

impl TryFrom<SelectorRepr> for Selector {
    type Error = CoreError;

    fn try_from(repr: SelectorRepr) -> CoreResult<Self> {
        match repr {
            SelectorRepr::Token(token) => token.parse(),
            SelectorRepr::Ids(ids) => Ok(Self::Ids(ids)),
        }
    }
}

impl From<Selector> for SelectorRepr {
    fn from(selector: Selector) -> Self {
        match selector {
            Selector::Ids(ids) => Self::Ids(ids),
            other => Self::Token(other.token().unwrap_or_default().to_string()),
        }
    }
}

/// Evaluate `selector` against `graph` and `selection`.
///
/// Results are de-duplicated in first-occurrence order, except `selection`
/// and explicit ids which are echoed as given. Unknown ids in the selection
/// contribute nothing.
#[must_use]
pub fn query(graph: &GraphIndex, selection: &[NodeId], selector: &Selector) -> Vec<NodeId> {
    match selector {
        Selector::All => graph.keys().to_vec(),
        Selector::Selection => selection.to_vec(),
        Selector::Ids(ids) => ids.clone(),
        Selector::NextSibling => unique(selection.iter().filter_map(|id| step(graph, id, true))),
        Selector::PreviousSibling => {
            unique(selection.iter().filter_map(|id| step(graph, id, false)))
        }
        Selector::Children => unique(
            selection
                .iter()
                .flat_map(|id| graph.children_of(id).iter().cloned()),
        ),
        Selector::Parent => unique(selection.iter().filter_map(|id| graph.parent_of(id).cloned())),
        Selector::Siblings => siblings(graph, selection),
    }
}

/// The adjacent sibling of `id`, wrapping around the container's child list.
fn step(graph: &GraphIndex, id: &NodeId, forward: bool) -> Option<NodeId> {
    let list = graph.sibling_list(id);
    let index = list.iter().position(|s| s == id)?;
    let len = list.len();
    let next = if forward {
        (index + 1) % len
    } else {
        (index + len - 1) % len
    };
    list.get(next).cloned()
}

fn siblings(graph: &GraphIndex, selection: &[NodeId]) -> Vec<NodeId> {
    let Some(first) = selection.first() else {
        return graph.keys().to_vec();
    };
    let Some(container) = graph.container_of(first) else {
        return Vec::new();
    };
    if selection
        .iter()
        .any(|id| graph.container_of(id) != Some(container))
    {
        return Vec::new();
    }
    // Only the first selected id is excluded; other selected ids stay.
    graph
        .members(container)
        .iter()
        .filter(|id| *id != first)
        .cloned()
        .collect()
}

fn unique(ids: impl IntoIterator<Item = NodeId>) -> Vec<NodeId> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}

/// Climb from `id` to the ancestor whose immediate container is `boundary`
/// (a node or scene id) and return it.
///
/// Returns `None` when `id == boundary`, when `id` is unknown, and when
/// `boundary` is not on `id`'s container chain.
#[must_use]
pub fn top_id_within_scene(graph: &GraphIndex, id: &NodeId, boundary: &NodeId) -> Option<NodeId> {
    if id == boundary {
        return None;
    }
    let mut current = id;
    for _ in 0..HARD_MAX_WALK {
        match graph.container_of(current)? {
            c if c.id() == boundary => return Some(current.clone()),
            Container::Node(parent) => current = parent,
            Container::Scene(_) => return None,
        }
    }
    tracing::error!(%id, %boundary, "top_id_within_scene hit HARD_MAX_WALK");
    None
}
