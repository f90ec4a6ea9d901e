use egui::{CornerRadius, FontFamily, FontId, Pos2, Rect, Stroke, StrokeKind, Vec2};

use super::DrawContext;
use crate::scene::RenderNode;

const FONT_SIZE: f32 = 13.;
const PADDING: f32 = 8.;
const CURSOR_OFFSET: Vec2 = Vec2::new(14., 14.);

/// Text lines shown next to the pointer for the hovered node or link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tooltip {
    pub lines: Vec<String>,
}

impl Tooltip {
    pub fn for_node(n: &RenderNode) -> Self {
        let status = if n.status.is_empty() {
            "Unknown"
        } else {
            n.status.as_str()
        };
        Self {
            lines: vec![
                n.name.clone(),
                format!("Type: {}", n.category.label()),
                format!("Status: {status}"),
            ],
        }
    }

    pub fn for_link(from: &RenderNode, to: &RenderNode) -> Self {
        Self {
            lines: vec![format!("Mapping: {} → {}", from.id, to.id)],
        }
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

pub(super) fn draw(ctx: &DrawContext<'_>, tip: &Tooltip, pointer: Pos2) {
    let galley = ctx.painter.layout_no_wrap(
        tip.text(),
        FontId::new(FONT_SIZE, FontFamily::Proportional),
        ctx.palette.text,
    );

    let size = galley.size() + Vec2::splat(PADDING * 2.);
    let mut rect = Rect::from_min_size(pointer + CURSOR_OFFSET, size);

    // keep the box inside the view
    let clip = ctx.painter.clip_rect();
    if rect.max.x > clip.max.x {
        rect = rect.translate(Vec2::new(-(size.x + CURSOR_OFFSET.x * 2.), 0.));
    }
    if rect.max.y > clip.max.y {
        rect = rect.translate(Vec2::new(0., -(size.y + CURSOR_OFFSET.y * 2.)));
    }

    ctx.painter.rect(
        rect,
        CornerRadius::same(4),
        ctx.palette.tooltip_bg,
        Stroke::new(1., ctx.palette.shadow),
        StrokeKind::Inside,
    );
    ctx.painter
        .galley(rect.min + Vec2::splat(PADDING), galley, ctx.palette.text);
}
