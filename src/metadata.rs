use egui::{Id, Pos2, Rect, Ui, Vec2};
use serde::{Deserialize, Serialize};

const KEY_PREFIX: &str = "namaste_map_metadata";

const MIN_ZOOM: f32 = 0.05;
const MAX_ZOOM: f32 = 20.;

/// Navigation state of one graph view, kept in egui memory between frames.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Metadata {
    /// Whether the frame is the first one
    pub first_frame: bool,
    /// Current zoom factor
    pub zoom: f32,
    /// Screen offset of the canvas origin
    pub pan: Vec2,
    /// Node being dragged, by id
    pub dragged: Option<String>,
}

impl Default for Metadata {
    fn default() -> Self {
        Self {
            first_frame: true,
            zoom: 1.,
            pan: Vec2::ZERO,
            dragged: None,
        }
    }
}

impl Metadata {
    pub fn load(ui: &Ui, id: &str) -> Self {
        ui.data_mut(|data| data.get_persisted::<Metadata>(key(id)).unwrap_or_default())
    }

    pub fn save(self, ui: &mut Ui, id: &str) {
        ui.data_mut(|data| data.insert_persisted(key(id), self));
    }

    pub fn canvas_to_screen_pos(&self, pos: Pos2) -> Pos2 {
        (pos.to_vec2() * self.zoom + self.pan).to_pos2()
    }

    pub fn canvas_to_screen_size(&self, size: f32) -> f32 {
        size * self.zoom
    }

    pub fn screen_to_canvas_pos(&self, pos: Pos2) -> Pos2 {
        ((pos.to_vec2() - self.pan) / self.zoom).to_pos2()
    }

    /// Zooms by `factor` keeping the canvas point under `pointer` in place.
    pub fn zoom_at(&mut self, pointer: Pos2, factor: f32) {
        let anchor = self.screen_to_canvas_pos(pointer);
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        self.pan = pointer.to_vec2() - anchor.to_vec2() * self.zoom;
    }

    /// Centers `bounds` (canvas) inside `view` (screen) leaving `padding`
    /// as a fraction of the graph size.
    pub fn fit_to_screen(&mut self, bounds: Rect, view: Rect, padding: f32) {
        if !bounds.is_finite() || !view.is_positive() {
            return;
        }
        let size = bounds.size() * (1. + padding);
        let zoom = (view.width() / size.x.max(1.)).min(view.height() / size.y.max(1.));
        if !zoom.is_finite() || zoom <= 0. {
            return;
        }
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.pan = view.center().to_vec2() - bounds.center().to_vec2() * self.zoom;
    }
}

fn key(id: &str) -> Id {
    Id::new(format!("{KEY_PREFIX}_{id}"))
}
