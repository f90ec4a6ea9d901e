use egui::{Pos2, Rect, Vec2};
use petgraph::stable_graph::{NodeIndex, StableGraph};
use serde::{Deserialize, Serialize};

use crate::scene::{RenderLink, RenderNode};

type SceneGraph = StableGraph<RenderNode, RenderLink>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutState {
    pub is_running: bool,
    pub dt: f32,
    pub epsilon: f32,
    pub damping: f32,
    pub max_step: f32,
    pub k_scale: f32,
    pub c_attract: f32,
    pub c_repulse: f32,
    /// Pull towards the view center, 0 disables it
    pub c_gravity: f32,
    pub steps_per_frame: usize,
}

impl Default for LayoutState {
    fn default() -> Self {
        LayoutState {
            is_running: true,
            dt: 0.05,
            epsilon: 1e-3,
            damping: 0.3,
            max_step: 10.0,
            k_scale: 1.0,
            c_attract: 1.0,
            c_repulse: 1.0,
            c_gravity: 0.3,
            steps_per_frame: 1,
        }
    }
}

/// Force-directed placement of the mapping graph.
///
/// Nodes repel each other, links pull their endpoints together weighted by
/// the link confidence, and a weak gravity keeps disconnected pairs near the
/// middle of the view.
#[derive(Debug, Default)]
pub struct ForceLayout {
    state: LayoutState,
}

impl ForceLayout {
    pub fn from_state(state: LayoutState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &LayoutState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut LayoutState {
        &mut self.state
    }

    /// Runs the configured number of iterations inside `view`, given in
    /// canvas coordinates.
    pub fn run(&mut self, g: &mut SceneGraph, view: Rect) {
        for _ in 0..self.state.steps_per_frame.max(1) {
            self.step(g, view);
        }
    }

    pub fn step(&mut self, g: &mut SceneGraph, view: Rect) {
        if !self.state.is_running || g.node_count() == 0 {
            return;
        }

        let params = &self.state;
        let Some(k) = prepare_constants(view, g.node_count(), params.k_scale) else {
            return;
        };

        let indices: Vec<_> = g.node_indices().collect();
        let mut disp: Vec<Vec2> = vec![Vec2::ZERO; indices.len()];

        compute_repulsion(g, &indices, &mut disp, k, params.epsilon, params.c_repulse);
        compute_attraction(g, &indices, &mut disp, k, params.epsilon, params.c_attract);
        apply_gravity(g, &indices, &mut disp, view.center(), params.c_gravity);
        apply_displacements(
            g,
            &indices,
            &disp,
            params.dt,
            params.damping,
            params.max_step,
        );
    }
}

fn prepare_constants(canvas: Rect, node_count: usize, k_scale: f32) -> Option<f32> {
    if node_count == 0 {
        return None;
    }
    let n = node_count as f32;
    let area = canvas.area().max(1.0);
    let k_ideal = (area / n).sqrt();
    let k = k_ideal * k_scale;
    if !k.is_finite() {
        return None;
    }
    Some(k)
}

fn compute_repulsion(
    g: &SceneGraph,
    indices: &[NodeIndex],
    disp: &mut [Vec2],
    k: f32,
    epsilon: f32,
    c_repulse: f32,
) {
    for i in 0..indices.len() {
        for j in (i + 1)..indices.len() {
            let delta = g[indices[i]].location - g[indices[j]].location;
            let distance = delta.length().max(epsilon);
            let force = c_repulse * (k * k) / distance;
            let dir = delta / distance;
            disp[i] += dir * force;
            disp[j] -= dir * force;
        }
    }
}

// Attraction scales with the link weight.
fn compute_attraction(
    g: &SceneGraph,
    indices: &[NodeIndex],
    disp: &mut [Vec2],
    k: f32,
    epsilon: f32,
    c_attract: f32,
) {
    let pos_of: std::collections::HashMap<NodeIndex, usize> =
        indices.iter().enumerate().map(|(i, &idx)| (idx, i)).collect();

    for e in g.edge_indices() {
        let Some((a, b)) = g.edge_endpoints(e) else {
            continue;
        };
        if a == b {
            continue;
        }
        let (Some(&ia), Some(&ib)) = (pos_of.get(&a), pos_of.get(&b)) else {
            continue;
        };
        let delta = g[b].location - g[a].location;
        let distance = delta.length().max(epsilon);
        let force = c_attract * g[e].weight * (distance * distance) / k;
        let pull = (delta / distance) * force;
        disp[ia] += pull;
        disp[ib] -= pull;
    }
}

fn apply_gravity(
    g: &SceneGraph,
    indices: &[NodeIndex],
    disp: &mut [Vec2],
    center: Pos2,
    c_gravity: f32,
) {
    if c_gravity == 0. {
        return;
    }
    for (vec_pos, &idx) in indices.iter().enumerate() {
        disp[vec_pos] += (center - g[idx].location) * c_gravity;
    }
}

fn apply_displacements(
    g: &mut SceneGraph,
    indices: &[NodeIndex],
    disp: &[Vec2],
    dt: f32,
    damping: f32,
    max_step: f32,
) {
    for (vec_pos, &idx) in indices.iter().enumerate() {
        let mut step = disp[vec_pos] * dt * damping;
        if step.length() > max_step {
            step = step.normalized() * max_step;
        }
        let new_loc = g[idx].location + step;
        if !new_loc.x.is_finite() || !new_loc.y.is_finite() {
            continue;
        }
        g[idx].location = new_loc;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Category;

    fn view() -> Rect {
        Rect::from_min_max(Pos2::new(0.0, 0.0), Pos2::new(1000.0, 1000.0))
    }

    fn node(id: &str, location: Pos2) -> RenderNode {
        RenderNode {
            id: id.to_string(),
            name: id.to_string(),
            category: Category::Source,
            status: "validated".to_string(),
            radius: 20.,
            location,
        }
    }

    fn pair(a: Pos2, b: Pos2) -> (SceneGraph, Vec<NodeIndex>) {
        let mut g = SceneGraph::default();
        let idxs = vec![g.add_node(node("a", a)), g.add_node(node("b", b))];
        (g, idxs)
    }

    #[test]
    fn repulsion_increases_distance() {
        let (mut g, indices) = pair(Pos2::new(0.0, 0.0), Pos2::new(1.0, 0.0));
        let params = LayoutState::default();
        let k = prepare_constants(view(), 2, params.k_scale).unwrap();
        let mut disp = vec![Vec2::ZERO; indices.len()];
        compute_repulsion(&g, &indices, &mut disp, k, params.epsilon, params.c_repulse);
        apply_displacements(
            &mut g,
            &indices,
            &disp,
            params.dt,
            params.damping,
            params.max_step,
        );
        let a = g[indices[0]].location;
        let b = g[indices[1]].location;
        assert!((b.x - a.x).abs() > 1.0, "Nodes should move apart");
    }

    #[test]
    fn attraction_decreases_distance_when_far() {
        let (mut g, indices) = pair(Pos2::new(0.0, 0.0), Pos2::new(1200.0, 0.0));
        g.add_edge(indices[0], indices[1], RenderLink { weight: 1.0 });
        let params = LayoutState::default();
        let k = prepare_constants(view(), 2, params.k_scale).unwrap();
        let mut disp = vec![Vec2::ZERO; indices.len()];
        compute_repulsion(&g, &indices, &mut disp, k, params.epsilon, params.c_repulse);
        compute_attraction(&g, &indices, &mut disp, k, params.epsilon, params.c_attract);
        apply_displacements(
            &mut g,
            &indices,
            &disp,
            params.dt,
            params.damping,
            params.max_step,
        );
        let new_dist = (g[indices[1]].location - g[indices[0]].location).length();
        assert!(new_dist < 1200.0, "Distance should shrink due to attraction");
    }

    #[test]
    fn weaker_link_pulls_less() {
        let mut pulls = Vec::new();
        for weight in [0.1, 1.0] {
            let (mut g, indices) = pair(Pos2::new(0.0, 0.0), Pos2::new(300.0, 0.0));
            g.add_edge(indices[0], indices[1], RenderLink { weight });
            let k = prepare_constants(view(), 2, 1.0).unwrap();
            let mut disp = vec![Vec2::ZERO; 2];
            compute_attraction(&g, &indices, &mut disp, k, 1e-3, 1.0);
            pulls.push(disp[0].x);
        }
        assert!(pulls[0] > 0.0);
        assert!(pulls[0] < pulls[1]);
    }

    #[test]
    fn gravity_pulls_towards_center() {
        let (g, indices) = pair(Pos2::new(0.0, 0.0), Pos2::new(1000.0, 1000.0));
        let mut disp = vec![Vec2::ZERO; 2];
        apply_gravity(&g, &indices, &mut disp, view().center(), 0.3);
        assert!(disp[0].x > 0.0 && disp[0].y > 0.0);
        assert!(disp[1].x < 0.0 && disp[1].y < 0.0);
    }

    #[test]
    fn paused_layout_keeps_positions() {
        let (mut g, indices) = pair(Pos2::new(0.0, 0.0), Pos2::new(1.0, 0.0));
        let mut layout = ForceLayout::from_state(LayoutState {
            is_running: false,
            ..Default::default()
        });
        layout.run(&mut g, view());
        assert_eq!(g[indices[1]].location, Pos2::new(1.0, 0.0));
    }

    #[test]
    fn step_on_empty_graph_is_noop() {
        let mut g = SceneGraph::default();
        ForceLayout::default().step(&mut g, view());
        assert_eq!(g.node_count(), 0);
    }
}
