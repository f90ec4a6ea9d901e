use crate::graph::{MappingGraph, MappingNode};

/// Case-insensitive substring search over node ids and names.
///
/// A blank query returns nothing rather than every node.
pub fn search_nodes<'a>(g: &'a MappingGraph, query: &str) -> Vec<&'a MappingNode> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return Vec::new();
    }

    g.nodes()
        .iter()
        .filter(|n| n.id.to_lowercase().contains(&q) || n.name.to_lowercase().contains(&q))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::MappingRow;

    fn graph() -> MappingGraph {
        MappingGraph::from_rows(&[
            MappingRow::new(
                ("AAE-16", "Vataja Jvara"),
                ("TM2-SK01", "Wind fever"),
                "validated",
                0.9,
            ),
            MappingRow::new(
                ("AAE-17", "Pittaja Jvara"),
                ("TM2-SK02", "Heat fever"),
                "pending",
                0.4,
            ),
        ])
    }

    #[test]
    fn empty_query_returns_nothing() {
        let g = graph();
        assert!(search_nodes(&g, "").is_empty());
        assert!(search_nodes(&g, "   ").is_empty());
    }

    #[test]
    fn matches_id_and_name_ignoring_case() {
        let g = graph();
        let ids = |q| {
            search_nodes(&g, q)
                .into_iter()
                .map(|n| n.id.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(ids("aae-16"), vec!["AAE-16"]);
        assert_eq!(ids("JVARA"), vec!["AAE-16", "AAE-17"]);
        assert_eq!(ids(" fever "), vec!["TM2-SK01", "TM2-SK02"]);
    }

    #[test]
    fn no_match_returns_nothing() {
        let g = graph();
        assert!(search_nodes(&g, "kapha").is_empty());
    }
}
