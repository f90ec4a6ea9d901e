use serde::{Deserialize, Serialize};

use crate::filter::{STATUS_PENDING, STATUS_VALIDATED};
use crate::graph::{MappingGraph, MappingLink, MappingNode};
use crate::rows::MappingRow;

/// Body of the graph endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphPayload {
    pub nodes: Vec<MappingNode>,
    pub links: Vec<MappingLink>,
}

impl From<&MappingGraph> for GraphPayload {
    fn from(g: &MappingGraph) -> Self {
        Self {
            nodes: g.nodes().to_vec(),
            links: g.links().to_vec(),
        }
    }
}

impl From<GraphPayload> for MappingGraph {
    fn from(p: GraphPayload) -> Self {
        MappingGraph::from_parts(p.nodes, p.links)
    }
}

/// Body returned by either endpoint on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingStats {
    pub total_mappings: u64,
    pub validated_mappings: u64,
    pub pending_validation: u64,
    /// Percentage of validated mappings.
    pub validation_rate: f64,
    pub last_updated: String,
}

impl MappingStats {
    /// Derives the figures from table rows.
    pub fn summarize(rows: &[MappingRow]) -> Self {
        let count = |status: &str| {
            rows.iter()
                .filter(|r| r.status.eq_ignore_ascii_case(status))
                .count() as u64
        };
        let total = rows.len() as u64;
        let validated = count(STATUS_VALIDATED);
        let validation_rate = if total == 0 {
            0.
        } else {
            (validated as f64 / total as f64 * 1000.).round() / 10.
        };

        Self {
            total_mappings: total,
            validated_mappings: validated,
            pending_validation: count(STATUS_PENDING),
            validation_rate,
            last_updated: rows
                .iter()
                .map(|r| r.last_updated.as_str())
                .max()
                .unwrap_or_default()
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AyushSystem {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub terminology_count: u64,
    #[serde(default)]
    pub validated_mappings: u64,
    #[serde(default)]
    pub pending_mappings: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Icd11Module {
    pub module: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub launch_date: String,
    #[serde(default)]
    pub status: String,
}

/// Body of the statistics endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TerminologyData {
    pub mapping_stats: MappingStats,
    #[serde(default)]
    pub ayush_systems: Vec<AyushSystem>,
    #[serde(default)]
    pub icd11_modules: Vec<Icd11Module>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Category;

    #[test]
    fn graph_payload_shape() {
        let g = MappingGraph::from_rows(&[MappingRow::new(
            ("X", "x"),
            ("TM1", "tm1"),
            "Validated",
            2.,
        )]);
        let v = serde_json::to_value(GraphPayload::from(&g)).unwrap();
        assert_eq!(v["nodes"][0]["id"], "X");
        assert_eq!(v["nodes"][0]["category"], 0);
        assert_eq!(v["nodes"][0]["status"], "validated");
        assert_eq!(v["nodes"][0]["symbolSize"], 40.0);
        assert_eq!(v["nodes"][1]["category"], 1);
        assert_eq!(v["links"][0]["source"], "X");
        assert_eq!(v["links"][0]["target"], "TM1");
        assert_eq!(v["links"][0]["value"], 1.0);
    }

    #[test]
    fn graph_payload_into_graph_dedups_nodes() {
        let json = r#"{
            "nodes": [
                {"id":"A","name":"first","category":0,"status":"pending","symbolSize":40},
                {"id":"A","name":"second","category":1,"status":"validated","symbolSize":40}
            ],
            "links": [{"source":"A","target":"B","value":0.5}]
        }"#;
        let p: GraphPayload = serde_json::from_str(json).unwrap();
        let g = MappingGraph::from(p);
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.node("A").unwrap().name, "first");
        assert_eq!(g.node("A").unwrap().category, Category::Source);
        assert_eq!(g.link_count(), 1);
    }

    #[test]
    fn error_payload_shape() {
        let p: ErrorPayload = serde_json::from_str(r#"{"error":"Failed to load mappings"}"#).unwrap();
        assert_eq!(p.error, "Failed to load mappings");
        assert_eq!(
            serde_json::to_string(&p).unwrap(),
            r#"{"error":"Failed to load mappings"}"#
        );
    }

    #[test]
    fn terminology_with_only_stats() {
        let json = r#"{"mappingStats":{"totalMappings":34826,"validatedMappings":24629,
            "pendingValidation":10197,"validationRate":70.7,"lastUpdated":"2024-09-15"}}"#;
        let t: TerminologyData = serde_json::from_str(json).unwrap();
        assert_eq!(t.mapping_stats.total_mappings, 34826);
        assert_eq!(t.mapping_stats.validation_rate, 70.7);
        assert!(t.ayush_systems.is_empty());
        assert!(t.icd11_modules.is_empty());
    }

    #[test]
    fn summarize_rows() {
        let mut rows = vec![
            MappingRow::new(("A", ""), ("B", ""), "Validated", 0.9),
            MappingRow::new(("C", ""), ("D", ""), "pending", 0.4),
            MappingRow::new(("E", ""), ("F", ""), "validated", 0.8),
        ];
        rows[0].last_updated = "2024-09-01".to_string();
        rows[2].last_updated = "2024-09-12".to_string();

        let s = MappingStats::summarize(&rows);
        assert_eq!(s.total_mappings, 3);
        assert_eq!(s.validated_mappings, 2);
        assert_eq!(s.pending_validation, 1);
        assert_eq!(s.validation_rate, 66.7);
        assert_eq!(s.last_updated, "2024-09-12");
    }

    #[test]
    fn summarize_nothing() {
        let s = MappingStats::summarize(&[]);
        assert_eq!(s, MappingStats::default());
    }
}
