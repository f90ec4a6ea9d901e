use crate::graph::{Category, MappingGraph, MappingNode};

pub const UNKNOWN_STATUS: &str = "unknown";

/// A node on the other end of a link touching the selected node.
#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    pub id: String,
    pub name: String,
    /// `None` when the id has no node in the graph.
    pub category: Option<Category>,
    pub status: String,
    /// Link weight as stored, not clamped again.
    pub confidence: f64,
}

impl Neighbor {
    /// Numeric category, `-1` for an unknown neighbor.
    pub fn category_code(&self) -> i8 {
        match self.category {
            Some(Category::Source) => 0,
            Some(Category::Target) => 1,
            None => -1,
        }
    }

    pub fn category_label(&self) -> &'static str {
        self.category.map_or("Unknown", Category::label)
    }
}

/// Detail view of one selected node.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDetails<'a> {
    pub node: &'a MappingNode,
    pub neighbors: Vec<Neighbor>,
}

/// Resolves the detail view for `selected` on the full graph.
///
/// Every link touching the node produces one neighbor entry, so parallel
/// links show up more than once. Filters never apply here.
pub fn resolve_selection<'a>(
    g: &'a MappingGraph,
    selected: Option<&str>,
) -> Option<NodeDetails<'a>> {
    let id = selected?;
    let node = g.node(id)?;

    let neighbors = g
        .links_of(id)
        .map(|l| {
            let other_id = if l.source == id { &l.target } else { &l.source };
            let other = g.node(other_id);
            Neighbor {
                id: other_id.clone(),
                name: other
                    .map(|n| n.name.as_str())
                    .filter(|name| !name.is_empty())
                    .unwrap_or(other_id.as_str())
                    .to_string(),
                category: other.map(|n| n.category),
                status: other.map_or_else(|| UNKNOWN_STATUS.to_string(), |n| n.status.clone()),
                confidence: l.value,
            }
        })
        .collect();

    Some(NodeDetails { node, neighbors })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{filter_graph, FilterState};
    use crate::graph::MappingLink;
    use crate::rows::MappingRow;

    fn graph() -> MappingGraph {
        MappingGraph::from_rows(&[
            MappingRow::new(("X", "Vataja"), ("TM1", "Wind"), "validated", 0.95),
            MappingRow::new(("Y", "Pittaja"), ("TM1", "Wind"), "pending", 0.4),
            MappingRow::new(("Y", "Pittaja"), ("TM2", "Heat"), "pending", 0.05),
        ])
    }

    #[test]
    fn no_selection() {
        let g = graph();
        assert!(resolve_selection(&g, None).is_none());
        assert!(resolve_selection(&g, Some("missing")).is_none());
    }

    #[test]
    fn neighbors_from_both_directions() {
        let g = graph();
        let d = resolve_selection(&g, Some("TM1")).unwrap();
        assert_eq!(d.node.name, "Wind");
        let ids: Vec<_> = d.neighbors.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["X", "Y"]);
        assert_eq!(d.neighbors[0].category, Some(Category::Source));
        assert_eq!(d.neighbors[0].category_code(), 0);
        assert_eq!(d.neighbors[1].status, "pending");
        assert_eq!(d.neighbors[1].confidence, 0.4);

        let d = resolve_selection(&g, Some("Y")).unwrap();
        assert_eq!(d.neighbors.len(), 2);
        assert_eq!(d.neighbors[1].id, "TM2");
        assert_eq!(d.neighbors[1].category_code(), 1);
        // stored weight, already clamped at ingestion
        assert_eq!(d.neighbors[1].confidence, 0.1);
    }

    #[test]
    fn missing_neighbor_is_unknown() {
        let mut g = graph();
        g.push_link(MappingLink {
            source: "X".to_string(),
            target: "GHOST".to_string(),
            value: 0.7,
        });
        let d = resolve_selection(&g, Some("X")).unwrap();
        let ghost = d.neighbors.iter().find(|n| n.id == "GHOST").unwrap();
        assert_eq!(ghost.name, "GHOST");
        assert_eq!(ghost.category, None);
        assert_eq!(ghost.category_code(), -1);
        assert_eq!(ghost.category_label(), "Unknown");
        assert_eq!(ghost.status, UNKNOWN_STATUS);
        assert_eq!(ghost.confidence, 0.7);
    }

    #[test]
    fn node_without_links_has_no_neighbors() {
        let mut g = graph();
        g.insert_node(MappingNode {
            id: "LONE".to_string(),
            name: "Lone".to_string(),
            category: Category::Target,
            status: String::new(),
            symbol_size: crate::graph::SYMBOL_SIZE,
        });
        let d = resolve_selection(&g, Some("LONE")).unwrap();
        assert!(d.neighbors.is_empty());
    }

    #[test]
    fn independent_of_filter() {
        let g = graph();
        let before = resolve_selection(&g, Some("Y")).unwrap();
        // a filter hiding every link around Y does not change the details
        let f = filter_graph(&g, &FilterState::new(true, false, 0.9));
        assert!(f.nodes.iter().all(|n| n.id != "Y"));
        let after = resolve_selection(&g, Some("Y")).unwrap();
        assert_eq!(before, after);
    }
}
