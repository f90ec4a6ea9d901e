use std::collections::HashMap;

use egui::{Pos2, Rect, Vec2};
use log::debug;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use rand::Rng;

use crate::filter::FilteredGraph;
use crate::graph::Category;

/// Spread of the initial random placement of new nodes.
const SPAWN_RADIUS: f32 = 200.;

#[derive(Debug, Clone)]
pub struct RenderNode {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub status: String,
    pub radius: f32,
    pub location: Pos2,
}

#[derive(Debug, Clone, Copy)]
pub struct RenderLink {
    pub weight: f32,
}

/// What the graph view currently displays.
///
/// Rebuilt from every filter pass; node positions survive a rebuild as long
/// as the node id stays visible.
#[derive(Debug, Default)]
pub struct RenderGraph {
    g: StableGraph<RenderNode, RenderLink>,
    by_id: HashMap<String, NodeIndex>,
    fallback: bool,
    version: u64,
}

impl RenderGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the displayed graph with `filtered`.
    pub fn sync(&mut self, filtered: &FilteredGraph<'_>) {
        let mut rng = rand::rng();
        let mut g = StableGraph::with_capacity(filtered.nodes.len(), filtered.links.len());
        let mut by_id = HashMap::with_capacity(filtered.nodes.len());

        for n in &filtered.nodes {
            let location = self.location(&n.id).unwrap_or_else(|| {
                Pos2::new(
                    rng.random_range(-SPAWN_RADIUS..SPAWN_RADIUS),
                    rng.random_range(-SPAWN_RADIUS..SPAWN_RADIUS),
                )
            });
            let idx = g.add_node(RenderNode {
                id: n.id.clone(),
                name: n.name.clone(),
                category: n.category,
                status: n.status.clone(),
                radius: n.symbol_size / 2.,
                location,
            });
            by_id.insert(n.id.clone(), idx);
        }

        let mut skipped = 0;
        for l in &filtered.links {
            match (by_id.get(&l.source), by_id.get(&l.target)) {
                (Some(&a), Some(&b)) => {
                    g.add_edge(
                        a,
                        b,
                        RenderLink {
                            weight: l.value as f32,
                        },
                    );
                }
                _ => skipped += 1,
            }
        }
        if skipped > 0 {
            debug!("skipped {skipped} links with unknown endpoints");
        }

        self.g = g;
        self.by_id = by_id;
        self.fallback = filtered.fallback;
        self.version += 1;
    }

    pub fn g(&self) -> &StableGraph<RenderNode, RenderLink> {
        &self.g
    }

    pub fn g_mut(&mut self) -> &mut StableGraph<RenderNode, RenderLink> {
        &mut self.g
    }

    /// Bumped on every [`RenderGraph::sync`].
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Whether the last sync showed the full graph because the filter matched
    /// nothing.
    pub fn is_fallback(&self) -> bool {
        self.fallback
    }

    pub fn node_count(&self) -> usize {
        self.g.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.g.edge_count()
    }

    pub fn node_index(&self, id: &str) -> Option<NodeIndex> {
        self.by_id.get(id).copied()
    }

    pub fn location(&self, id: &str) -> Option<Pos2> {
        self.node_index(id)
            .and_then(|idx| self.g.node_weight(idx))
            .map(|n| n.location)
    }

    /// Canvas rect enclosing every node including its radius.
    pub fn bounds(&self) -> Option<Rect> {
        self.g
            .node_weights()
            .map(|n| Rect::from_center_size(n.location, Vec2::splat(n.radius * 2.)))
            .reduce(|a, b| a.union(b))
    }

    /// Topmost node covering `pos`, in canvas coordinates.
    pub fn node_at(&self, pos: Pos2) -> Option<NodeIndex> {
        self.g
            .node_indices()
            .filter(|&idx| {
                let n = &self.g[idx];
                (n.location - pos).length() <= n.radius
            })
            .last()
    }

    /// Link passing within `tolerance` of `pos`, measured on the straight
    /// segment between its endpoints.
    pub fn link_at(&self, pos: Pos2, tolerance: f32) -> Option<EdgeIndex> {
        self.g.edge_indices().find(|&e| {
            self.g.edge_endpoints(e).is_some_and(|(a, b)| {
                distance_to_segment(pos, self.g[a].location, self.g[b].location) <= tolerance
            })
        })
    }
}

fn distance_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq == 0. {
        return (p - a).length();
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0., 1.);
    (p - (a + ab * t)).length()
}
