use egui::{epaint::QuadraticBezierShape, Color32, Pos2, Shape, Stroke, Vec2};

use super::DrawContext;
use crate::scene::{RenderLink, RenderNode};

const MIN_WIDTH: f32 = 1.;
const WIDTH_PER_WEIGHT: f32 = 3.;
const HIGHLIGHT_WIDTH: f32 = 2.;
const TIP_SIZE: f32 = 8.;
const TIP_ANGLE: f32 = std::f32::consts::TAU / 30.;
const LINK_ALPHA: u8 = 153;
const DIMMED_ALPHA: u8 = 38;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Emphasis {
    Normal,
    Highlighted,
    Dimmed,
}

/// Stroke width of a link on the canvas.
pub(super) fn width(weight: f32, emphasis: Emphasis) -> f32 {
    let base = MIN_WIDTH + WIDTH_PER_WEIGHT * weight;
    match emphasis {
        Emphasis::Highlighted => base + HIGHLIGHT_WIDTH,
        _ => base,
    }
}

pub(super) fn draw(
    ctx: &DrawContext<'_>,
    from: &RenderNode,
    to: &RenderNode,
    l: &RenderLink,
    emphasis: Emphasis,
) {
    let alpha = match emphasis {
        Emphasis::Highlighted => 255,
        Emphasis::Normal => LINK_ALPHA,
        Emphasis::Dimmed => DIMMED_ALPHA,
    };
    let base = ctx.palette.category(from.category);
    let color = Color32::from_rgba_unmultiplied(base.r(), base.g(), base.b(), alpha);

    let pos_start = ctx.meta.canvas_to_screen_pos(from.location);
    let pos_end = ctx.meta.canvas_to_screen_pos(to.location);
    let rad_start = ctx.meta.canvas_to_screen_size(from.radius);
    let rad_end = ctx.meta.canvas_to_screen_size(to.radius);

    let vec = pos_end - pos_start;
    let dist = vec.length();
    if dist <= rad_start + rad_end {
        return;
    }
    let dir = vec / dist;

    let edge_start = pos_start + dir * rad_start;
    let tip_end = pos_end - dir * rad_end;

    // bend proportional to the link length
    let dir_perpendicular = Vec2::new(-dir.y, dir.x);
    let center_point = (edge_start.to_vec2() + tip_end.to_vec2()) / 2.;
    let control_point =
        (center_point + dir_perpendicular * dist * ctx.style.edge_curvature / 2.).to_pos2();

    let tip_vec = control_point - tip_end;
    let tip_dir = tip_vec / tip_vec.length();
    let tip_size = TIP_SIZE * ctx.meta.zoom;
    let tip_start_1 = tip_end + rotate_vector(tip_dir, TIP_ANGLE) * tip_size;
    let tip_start_2 = tip_end + rotate_vector(tip_dir, -TIP_ANGLE) * tip_size;
    let edge_end = point_between(tip_start_1, tip_start_2);

    let stroke = Stroke::new(
        ctx.meta.canvas_to_screen_size(width(l.weight, emphasis)),
        color,
    );
    let curve = QuadraticBezierShape::from_points_stroke(
        [edge_start, control_point, edge_end],
        false,
        Color32::TRANSPARENT,
        stroke,
    );
    ctx.painter.add(curve);
    ctx.painter.add(Shape::convex_polygon(
        vec![tip_end, tip_start_1, tip_start_2],
        color,
        Stroke::NONE,
    ));
}

/// rotates vector by angle
fn rotate_vector(vec: Vec2, angle: f32) -> Vec2 {
    let cos = angle.cos();
    let sin = angle.sin();
    Vec2::new(cos * vec.x - sin * vec.y, sin * vec.x + cos * vec.y)
}

fn point_between(p1: Pos2, p2: Pos2) -> Pos2 {
    p1 + (p2 - p1) / 2.
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_grows_with_weight() {
        assert!((width(0.1, Emphasis::Normal) - 1.3).abs() < 1e-6);
        assert_eq!(width(1.0, Emphasis::Normal), 4.0);
        assert!(width(0.5, Emphasis::Highlighted) > width(0.5, Emphasis::Normal));
        assert_eq!(width(0.5, Emphasis::Dimmed), width(0.5, Emphasis::Normal));
    }

    #[test]
    fn test_rotate_vector() {
        let v = rotate_vector(Vec2::new(1.0, 0.0), std::f32::consts::FRAC_PI_2);
        assert!((v.x).abs() < 1e-6);
        assert!((v.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_point_between() {
        assert_eq!(
            point_between(Pos2::new(0.0, 0.0), Pos2::new(4.0, 2.0)),
            Pos2::new(2.0, 1.0)
        );
    }
}
