use egui::{PointerButton, Pos2, Rect, Response, Sense, Ui, Vec2, Widget};
use instant::Instant;
use log::trace;

use crate::draw::{draw_scene, DrawContext};
use crate::layouts::ForceLayout;
use crate::metadata::Metadata;
use crate::scene::RenderGraph;
use crate::settings::{SettingsInteraction, SettingsNavigation, SettingsStyle};
use crate::theme::Theme;

/// Screen distance within which the pointer counts as hovering a link.
const LINK_HOVER_TOLERANCE: f32 = 4.;

/// What happened inside the view during one frame.
pub struct GraphViewOutput {
    pub response: Response,
    /// Id of the node clicked this frame
    pub clicked: Option<String>,
}

/// Widget drawing the filtered mapping graph.
///
/// The scene and the layout are owned by the caller; the view only borrows
/// them for the frame. Zoom, pan and drag state live in egui memory under the
/// view id.
pub struct MappingGraphView<'a> {
    scene: &'a mut RenderGraph,
    layout: &'a mut ForceLayout,
    selected: Option<&'a str>,
    theme: Theme,
    fit_requested: bool,
    id: String,

    settings_interaction: SettingsInteraction,
    settings_navigation: SettingsNavigation,
    settings_style: SettingsStyle,
}

impl Widget for MappingGraphView<'_> {
    fn ui(self, ui: &mut Ui) -> Response {
        self.show(ui).response
    }
}

impl<'a> MappingGraphView<'a> {
    pub fn new(scene: &'a mut RenderGraph, layout: &'a mut ForceLayout) -> Self {
        Self {
            scene,
            layout,
            selected: None,
            theme: Theme::default(),
            fit_requested: false,
            id: "mapping_graph".to_string(),

            settings_interaction: SettingsInteraction::default(),
            settings_navigation: SettingsNavigation::default(),
            settings_style: SettingsStyle::default(),
        }
    }

    pub fn with_selected(mut self, selected: Option<&'a str>) -> Self {
        self.selected = selected;
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Fits the graph to the view on this frame.
    pub fn with_fit_request(mut self, fit: bool) -> Self {
        self.fit_requested = fit;
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_interactions(mut self, settings_interaction: &SettingsInteraction) -> Self {
        self.settings_interaction = settings_interaction.clone();
        self
    }

    pub fn with_navigations(mut self, settings_navigation: &SettingsNavigation) -> Self {
        self.settings_navigation = settings_navigation.clone();
        self
    }

    pub fn with_styles(mut self, settings_style: &SettingsStyle) -> Self {
        self.settings_style = settings_style.clone();
        self
    }

    pub fn show(mut self, ui: &mut Ui) -> GraphViewOutput {
        let (resp, p) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let mut meta = Metadata::load(ui, &self.id);

        let t0 = Instant::now();
        let layout_area = Rect::from_center_size(Pos2::ZERO, resp.rect.size());
        self.layout.run(self.scene.g_mut(), layout_area);
        trace!(
            "layout step took {:.2}ms",
            t0.elapsed().as_secs_f32() * 1000.
        );

        self.handle_fit_to_screen(&resp, &mut meta);
        self.handle_node_drag(&resp, &mut meta);
        self.handle_navigation(ui, &resp, &mut meta);
        let clicked = self.handle_click(&resp, &meta);

        let (hovered_node, hovered_link) = self.handle_hover(&resp, &meta);

        // drawing works in screen coordinates, navigation in widget-local ones
        let mut meta_draw = meta.clone();
        meta_draw.pan += resp.rect.left_top().to_vec2();

        draw_scene(
            &DrawContext {
                painter: &p,
                meta: &meta_draw,
                palette: self.theme.palette(),
                style: &self.settings_style,
                selected: self.selected.and_then(|id| self.scene.node_index(id)),
                hovered_node,
                hovered_link,
            },
            self.scene,
        );

        meta.save(ui, &self.id);

        if self.layout.state().is_running {
            ui.ctx().request_repaint();
        }

        GraphViewOutput {
            response: resp,
            clicked,
        }
    }

    fn handle_fit_to_screen(&self, resp: &Response, meta: &mut Metadata) {
        let wanted =
            meta.first_frame || self.fit_requested || self.settings_navigation.fit_to_screen;
        if !wanted {
            return;
        }
        // keep waiting for a graph to fit on the first frames
        let Some(bounds) = self.scene.bounds() else {
            return;
        };
        let local = Rect::from_min_size(Pos2::ZERO, resp.rect.size());
        meta.fit_to_screen(bounds, local, self.settings_navigation.screen_padding);
        meta.first_frame = false;
    }

    fn handle_node_drag(&mut self, resp: &Response, meta: &mut Metadata) {
        if !self.settings_interaction.node_drag {
            meta.dragged = None;
            return;
        }

        if resp.is_pointer_button_down_on() {
            if meta.dragged.is_none() {
                meta.dragged = resp
                    .interact_pointer_pos()
                    .map(|p| meta.screen_to_canvas_pos(local_pos(resp, p)))
                    .and_then(|p| self.scene.node_at(p))
                    .map(|idx| self.scene.g()[idx].id.clone());
            }
        } else {
            meta.dragged = None;
            return;
        }

        let Some(idx) = meta.dragged.as_deref().and_then(|id| self.scene.node_index(id)) else {
            return;
        };
        if resp.dragged() {
            let delta = resp.drag_delta() / meta.zoom;
            self.scene.g_mut()[idx].location += delta;
        }
    }

    fn handle_navigation(&self, ui: &Ui, resp: &Response, meta: &mut Metadata) {
        if !self.settings_navigation.zoom_and_pan {
            return;
        }

        if resp.hovered() {
            let (zoom_delta, scroll) = ui.input(|i| (i.zoom_delta(), i.smooth_scroll_delta.y));
            let direction = if zoom_delta != 1. {
                (zoom_delta - 1.).signum()
            } else if scroll != 0. {
                scroll.signum()
            } else {
                0.
            };
            if direction != 0. {
                let center = resp
                    .hover_pos()
                    .map_or((resp.rect.size() / 2.).to_pos2(), |p| local_pos(resp, p));
                meta.zoom_at(center, 1. + self.settings_navigation.zoom_step * direction);
            }
        }

        if (resp.dragged_by(PointerButton::Middle) || resp.dragged_by(PointerButton::Primary))
            && meta.dragged.is_none()
            && resp.drag_delta() != Vec2::ZERO
        {
            meta.pan += resp.drag_delta();
        }
    }

    fn handle_click(&self, resp: &Response, meta: &Metadata) -> Option<String> {
        if !self.settings_interaction.node_select || !resp.clicked() {
            return None;
        }
        let pos = resp.interact_pointer_pos()?;
        let idx = self
            .scene
            .node_at(meta.screen_to_canvas_pos(local_pos(resp, pos)))?;
        Some(self.scene.g()[idx].id.clone())
    }

    fn handle_hover(
        &self,
        resp: &Response,
        meta: &Metadata,
    ) -> (
        Option<petgraph::stable_graph::NodeIndex>,
        Option<petgraph::stable_graph::EdgeIndex>,
    ) {
        if !self.settings_interaction.hover {
            return (None, None);
        }
        let Some(pos) = resp.hover_pos() else {
            return (None, None);
        };
        let canvas = meta.screen_to_canvas_pos(local_pos(resp, pos));
        if let Some(idx) = self.scene.node_at(canvas) {
            return (Some(idx), None);
        }
        let tolerance = LINK_HOVER_TOLERANCE / meta.zoom;
        (None, self.scene.link_at(canvas, tolerance))
    }
}

/// Converts a screen position to a widget-local one.
fn local_pos(resp: &Response, p: Pos2) -> Pos2 {
    (p - resp.rect.left_top()).to_pos2()
}

/// Forgets zoom, pan and drag state of the view with `id`, so the next frame
/// fits the graph again.
pub fn reset_view(ui: &mut Ui, id: &str) {
    Metadata::default().save(ui, id);
}
