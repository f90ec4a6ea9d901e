use log::debug;
use serde::{Deserialize, Serialize};

use crate::graph::{MappingGraph, MappingLink, MappingNode};

pub const STATUS_VALIDATED: &str = "validated";
pub const STATUS_PENDING: &str = "pending";

/// Which part of the graph the user wants to see.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub show_validated: bool,
    pub show_pending: bool,
    /// Links with a weight below this value are hidden.
    pub min_confidence: f64,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            show_validated: true,
            show_pending: true,
            min_confidence: 0.,
        }
    }
}

impl FilterState {
    pub fn new(show_validated: bool, show_pending: bool, min_confidence: f64) -> Self {
        Self {
            show_validated,
            show_pending,
            min_confidence,
        }
    }

    /// Statuses a link endpoint may have. Empty means any status.
    pub fn allowed_statuses(&self) -> Vec<&'static str> {
        let mut allowed = Vec::with_capacity(2);
        if self.show_validated {
            allowed.push(STATUS_VALIDATED);
        }
        if self.show_pending {
            allowed.push(STATUS_PENDING);
        }
        allowed
    }
}

/// Subset of the graph to render for one pass.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredGraph<'a> {
    pub nodes: Vec<&'a MappingNode>,
    pub links: Vec<&'a MappingLink>,
    /// Set when the filter matched nothing and the full graph is used instead.
    pub fallback: bool,
}

impl<'a> FilteredGraph<'a> {
    /// The whole graph, unfiltered.
    pub fn full(g: &'a MappingGraph) -> Self {
        Self {
            nodes: g.nodes().iter().collect(),
            links: g.links().iter().collect(),
            fallback: true,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }
}

/// Applies `state` to the graph.
///
/// A link is kept when its weight reaches the threshold and both of its
/// endpoints exist with an allowed status. Without any status restriction the
/// endpoints are not checked, so links to unknown ids pass as well. Nodes are
/// kept when at least one kept link references them. If no node or no link survives, the full graph
/// is returned instead.
pub fn filter_graph<'a>(g: &'a MappingGraph, state: &FilterState) -> FilteredGraph<'a> {
    let allowed = state.allowed_statuses();
    // an unrestricted filter does not look the endpoints up at all
    let admissible = |id: &str| {
        allowed.is_empty()
            || g.node(id)
                .is_some_and(|n| allowed.iter().any(|s| *s == n.status))
    };

    let links: Vec<&MappingLink> = g
        .links()
        .iter()
        .filter(|l| {
            l.value >= state.min_confidence
                && admissible(l.source.as_str())
                && admissible(l.target.as_str())
        })
        .collect();

    let nodes: Vec<&MappingNode> = g
        .nodes()
        .iter()
        .filter(|n| links.iter().any(|l| l.source == n.id || l.target == n.id))
        .collect();

    if nodes.is_empty() || links.is_empty() {
        debug!("filter {state:?} matched nothing, using full graph");
        return FilteredGraph::full(g);
    }

    debug!(
        "filter {state:?} kept {}/{} nodes and {}/{} links",
        nodes.len(),
        g.node_count(),
        links.len(),
        g.link_count()
    );

    FilteredGraph {
        nodes,
        links,
        fallback: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Category, SYMBOL_SIZE};
    use crate::rows::MappingRow;

    fn scenario() -> MappingGraph {
        MappingGraph::from_rows(&[
            MappingRow::new(("X", "x"), ("TM1", "tm1"), "validated", 0.95),
            MappingRow::new(("Y", "y"), ("TM2", "tm2"), "pending", 0.05),
        ])
    }

    fn ids<'a>(f: &FilteredGraph<'a>) -> Vec<&'a str> {
        f.nodes.iter().map(|n| n.id.as_str()).collect()
    }

    #[test]
    fn status_excludes_pending() {
        let g = scenario();
        let f = filter_graph(&g, &FilterState::new(true, false, 0.));
        assert!(!f.fallback);
        assert_eq!(ids(&f), vec!["X", "TM1"]);
        assert_eq!(f.links.len(), 1);
        assert_eq!(f.links[0].value, 0.95);
    }

    #[test]
    fn threshold_excludes_weak_link() {
        let g = scenario();
        let f = filter_graph(&g, &FilterState::new(true, true, 0.5));
        assert!(!f.fallback);
        assert_eq!(ids(&f), vec!["X", "TM1"]);
        assert_eq!(f.links.len(), 1);
    }

    #[test]
    fn empty_result_falls_back_to_full_graph() {
        let g = scenario();
        let f = filter_graph(&g, &FilterState::new(true, true, 0.99));
        assert!(f.fallback);
        assert_eq!(f, FilteredGraph::full(&g));
        assert_eq!(f.nodes.len(), 4);
        assert_eq!(f.links.len(), 2);
    }

    #[test]
    fn both_flags_off_is_unrestricted() {
        let g = scenario();
        let off = filter_graph(&g, &FilterState::new(false, false, 0.));
        let on = filter_graph(&g, &FilterState::new(true, true, 0.));
        assert_eq!(off.links, on.links);
        assert_eq!(off.nodes, on.nodes);
        assert_eq!(off.links.len(), 2);
    }

    #[test]
    fn weight_equal_to_threshold_passes() {
        let g = scenario();
        let f = filter_graph(&g, &FilterState::new(true, true, 0.95));
        assert!(!f.fallback);
        assert_eq!(f.links.len(), 1);
    }

    #[test]
    fn clamped_weight_is_compared() {
        // 0.05 is stored as 0.1
        let g = scenario();
        let f = filter_graph(&g, &FilterState::new(false, true, 0.1));
        assert!(!f.fallback);
        assert_eq!(ids(&f), vec!["Y", "TM2"]);
    }

    #[test]
    fn dangling_link_depends_on_restriction() {
        let mut g = MappingGraph::from_rows(&[MappingRow::new(
            ("A", "a"),
            ("B", "b"),
            "validated",
            0.2,
        )]);
        g.push_link(MappingLink {
            source: "A".to_string(),
            target: "GHOST".to_string(),
            value: 0.9,
        });

        let open = filter_graph(&g, &FilterState::new(false, false, 0.5));
        assert!(!open.fallback);
        assert_eq!(open.links.len(), 1);
        assert_eq!(open.links[0].target, "GHOST");
        assert_eq!(ids(&open), vec!["A"]);

        // a restricted filter needs both endpoints, nothing is left
        let restricted = filter_graph(&g, &FilterState::new(true, true, 0.5));
        assert!(restricted.fallback);
        assert_eq!(restricted, FilteredGraph::full(&g));
    }

    #[test]
    fn other_status_only_shows_when_unrestricted() {
        let mut g = MappingGraph::new();
        for id in ["R", "T"] {
            g.insert_node(MappingNode {
                id: id.to_string(),
                name: id.to_string(),
                category: Category::Source,
                status: "review".to_string(),
                symbol_size: SYMBOL_SIZE,
            });
        }
        g.push_link(MappingLink {
            source: "R".to_string(),
            target: "T".to_string(),
            value: 0.5,
        });

        let restricted = filter_graph(&g, &FilterState::new(true, true, 0.));
        assert!(restricted.fallback);
        let open = filter_graph(&g, &FilterState::new(false, false, 0.));
        assert!(!open.fallback);
        assert_eq!(open.links.len(), 1);
    }

    #[test]
    fn filtering_is_idempotent() {
        let g = scenario();
        let state = FilterState::new(true, false, 0.3);
        assert_eq!(filter_graph(&g, &state), filter_graph(&g, &state));
    }

    #[test]
    fn empty_graph_yields_empty_fallback() {
        let g = MappingGraph::new();
        let f = filter_graph(&g, &FilterState::default());
        assert!(f.fallback);
        assert!(f.is_empty());
    }
}
