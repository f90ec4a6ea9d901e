mod link;
mod node;
mod tooltip;

use egui::Painter;
use petgraph::stable_graph::{EdgeIndex, NodeIndex};

use crate::metadata::Metadata;
use crate::scene::RenderGraph;
use crate::settings::SettingsStyle;
use crate::theme::Palette;

pub use self::tooltip::Tooltip;

/// Everything a single frame of drawing needs.
pub struct DrawContext<'a> {
    pub painter: &'a Painter,
    pub meta: &'a Metadata,
    pub palette: Palette,
    pub style: &'a SettingsStyle,
    pub selected: Option<NodeIndex>,
    pub hovered_node: Option<NodeIndex>,
    pub hovered_link: Option<EdgeIndex>,
}

/// Paints links first and nodes on top of them, then the tooltip of the
/// hovered element if there is one.
pub fn draw_scene(ctx: &DrawContext<'_>, scene: &RenderGraph) {
    let g = scene.g();

    for e in g.edge_indices() {
        let Some((a, b)) = g.edge_endpoints(e) else {
            continue;
        };
        let touches_selected = ctx.selected.is_some_and(|s| s == a || s == b);
        let emphasis = match ctx.selected {
            None => link::Emphasis::Normal,
            Some(_) if touches_selected => link::Emphasis::Highlighted,
            Some(_) if ctx.style.edge_deemphasis => link::Emphasis::Dimmed,
            Some(_) => link::Emphasis::Normal,
        };
        link::draw(ctx, &g[a], &g[b], &g[e], emphasis);
    }

    for idx in g.node_indices() {
        let selected = ctx.selected == Some(idx);
        let hovered = ctx.hovered_node == Some(idx);
        node::draw(ctx, &g[idx], selected, hovered);
    }

    let tip = if let Some(idx) = ctx.hovered_node {
        g.node_weight(idx).map(Tooltip::for_node)
    } else {
        ctx.hovered_link
            .and_then(|e| g.edge_endpoints(e))
            .map(|(a, b)| Tooltip::for_link(&g[a], &g[b]))
    };
    if let Some(tip) = tip {
        if let Some(pointer) = ctx.painter.ctx().pointer_hover_pos() {
            tooltip::draw(ctx, &tip, pointer);
        }
    }
}
