use std::collections::HashMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::rows::MappingRow;

/// Visual weight given to every node.
pub const SYMBOL_SIZE: f32 = 40.;

pub const MIN_LINK_WEIGHT: f64 = 0.1;
pub const MAX_LINK_WEIGHT: f64 = 1.;

/// Terminology system a code belongs to. Serialized as `0` / `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Category {
    /// NAMASTE code, the mapping source.
    Source,
    /// ICD-11 TM2 code, the mapping target.
    Target,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Category::Source => "NAMASTE",
            Category::Target => "ICD-11-TM2",
        }
    }
}

impl From<Category> for u8 {
    fn from(c: Category) -> Self {
        match c {
            Category::Source => 0,
            Category::Target => 1,
        }
    }
}

impl TryFrom<u8> for Category {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Category::Source),
            1 => Ok(Category::Target),
            other => Err(format!("unknown node category {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingNode {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub status: String,
    pub symbol_size: f32,
}

/// Directed mapping from a source code to a target code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingLink {
    pub source: String,
    pub target: String,
    /// Confidence clamped into `[0.1, 1]`.
    pub value: f64,
}

/// Clamps a raw confidence score into the link weight range.
pub fn clamp_confidence(confidence: f64) -> f64 {
    MIN_LINK_WEIGHT.max(MAX_LINK_WEIGHT.min(confidence))
}

/// The full, unfiltered mapping graph.
///
/// Nodes keep insertion order and are unique by id; the first observation of
/// an id wins and later ones are ignored. Links keep insertion order and are
/// never deduplicated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingGraph {
    nodes: Vec<MappingNode>,
    links: Vec<MappingLink>,
    index: HashMap<String, usize>,
}

impl MappingGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from already shaped nodes and links, e.g. a graph payload.
    pub fn from_parts(nodes: Vec<MappingNode>, links: Vec<MappingLink>) -> Self {
        let mut g = Self::new();
        nodes.into_iter().for_each(|n| {
            g.insert_node(n);
        });
        g.links = links;
        g
    }

    /// Shapes table rows into a graph.
    pub fn from_rows(rows: &[MappingRow]) -> Self {
        let mut g = Self::new();
        for r in rows {
            let status = r.status.to_lowercase();
            g.insert_node(MappingNode {
                id: r.source_code.clone(),
                name: r.source_term.clone(),
                category: Category::Source,
                status: status.clone(),
                symbol_size: SYMBOL_SIZE,
            });
            g.insert_node(MappingNode {
                id: r.target_code.clone(),
                name: r.target_term.clone(),
                category: Category::Target,
                status,
                symbol_size: SYMBOL_SIZE,
            });
            g.links.push(MappingLink {
                source: r.source_code.clone(),
                target: r.target_code.clone(),
                value: clamp_confidence(r.confidence),
            });
        }

        debug!(
            "shaped {} rows into {} nodes and {} links",
            rows.len(),
            g.node_count(),
            g.link_count()
        );

        g
    }

    /// Inserts the node unless its id is already known. Returns whether it was
    /// inserted.
    pub fn insert_node(&mut self, n: MappingNode) -> bool {
        if self.index.contains_key(&n.id) {
            return false;
        }
        self.index.insert(n.id.clone(), self.nodes.len());
        self.nodes.push(n);
        true
    }

    pub fn push_link(&mut self, l: MappingLink) {
        self.links.push(l);
    }

    pub fn node(&self, id: &str) -> Option<&MappingNode> {
        self.index.get(id).map(|&i| &self.nodes[i])
    }

    pub fn nodes(&self) -> &[MappingNode] {
        &self.nodes
    }

    pub fn links(&self) -> &[MappingLink] {
        &self.links
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }

    /// Links whose source or target is `id`, in graph order.
    pub fn links_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a MappingLink> + 'a {
        self.links
            .iter()
            .filter(move |l| l.source == id || l.target == id)
    }
}
