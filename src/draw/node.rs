use egui::{
    epaint::{CircleShape, TextShape},
    FontFamily, FontId, Pos2, Shape, Stroke,
};

use super::DrawContext;
use crate::scene::RenderNode;

const BORDER_WIDTH: f32 = 2.;
const SELECTED_BORDER_WIDTH: f32 = 4.;
const SHADOW_OFFSET: f32 = 2.;
const LABEL_SIZE: f32 = 12.;

pub(super) fn draw(ctx: &DrawContext<'_>, n: &RenderNode, selected: bool, hovered: bool) {
    ctx.painter.extend(shapes(ctx, n, selected, hovered));
}

fn shapes(ctx: &DrawContext<'_>, n: &RenderNode, selected: bool, hovered: bool) -> Vec<Shape> {
    let mut res = Vec::with_capacity(3);

    let center = ctx.meta.canvas_to_screen_pos(n.location);
    let radius = ctx.meta.canvas_to_screen_size(n.radius);

    if selected || hovered {
        res.push(
            CircleShape::filled(
                center + egui::vec2(SHADOW_OFFSET, SHADOW_OFFSET),
                radius,
                ctx.palette.shadow,
            )
            .into(),
        );
    }

    let border = if selected {
        Stroke::new(SELECTED_BORDER_WIDTH, ctx.palette.text)
    } else {
        Stroke::new(BORDER_WIDTH, ctx.palette.node_border)
    };
    res.push(
        CircleShape {
            center,
            radius,
            fill: ctx.palette.category(n.category),
            stroke: border,
        }
        .into(),
    );

    let label_visible = ctx.style.labels_always || selected || hovered;
    if !label_visible {
        return res;
    }

    // label centered under the circle
    let galley = ctx.painter.layout_no_wrap(
        n.name.clone(),
        FontId::new(LABEL_SIZE, FontFamily::Proportional),
        ctx.palette.text,
    );
    let label_pos = Pos2::new(center.x - galley.size().x / 2., center.y + radius + 4.);
    res.push(TextShape::new(label_pos, galley, ctx.palette.text).into());

    res
}
