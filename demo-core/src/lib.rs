use std::sync::Arc;

use eframe::{App, CreationContext};
use egui::{CentralPanel, Context, RichText, ScrollArea, SidePanel, TopBottomPanel};
use log::{info, warn};
use namaste_map::{
    filter_graph, FetchKind, FetchOutcome, Fetcher, FilterState, ForceLayout, MappingGraph,
    MappingGraphView, MappingSource, RenderGraph, SettingsInteraction, SettingsNavigation,
    SettingsStyle, TerminologyData, Theme, THEME_KEY,
};

mod panels;
mod status;

pub use panels::confidence_label;
pub use status::{StatusKind, StatusMsg, StatusQueue};

const GRAPH_VIEW_ID: &str = "mappings";

/// Interactive explorer of NAMASTE to ICD-11 TM2 mappings.
pub struct MappingApp {
    pub(crate) source: Arc<dyn MappingSource>,
    pub(crate) fetcher: Option<Fetcher>,

    pub(crate) graph: MappingGraph,
    pub(crate) stats: Option<TerminologyData>,
    pub(crate) filter: FilterState,
    pub(crate) scene: RenderGraph,
    pub(crate) layout: ForceLayout,

    pub(crate) selected: Option<String>,
    pub(crate) query: String,
    pub(crate) theme: Theme,
    pub(crate) status: StatusQueue,
    pub(crate) fit_requested: bool,

    pub(crate) settings_interaction: SettingsInteraction,
    pub(crate) settings_navigation: SettingsNavigation,
    pub(crate) settings_style: SettingsStyle,
}

impl MappingApp {
    pub fn new(cc: &CreationContext<'_>, source: Arc<dyn MappingSource>) -> Self {
        let theme = cc
            .storage
            .and_then(|s| s.get_string(THEME_KEY))
            .and_then(|v| Theme::parse(&v))
            .unwrap_or_default();
        theme.apply(&cc.egui_ctx);

        let mut app = Self {
            source,
            fetcher: None,
            graph: MappingGraph::new(),
            stats: None,
            filter: FilterState::default(),
            scene: RenderGraph::new(),
            layout: ForceLayout::default(),
            selected: None,
            query: String::new(),
            theme,
            status: StatusQueue::new(),
            fit_requested: false,
            settings_interaction: SettingsInteraction::default(),
            settings_navigation: SettingsNavigation::default(),
            settings_style: SettingsStyle::default(),
        };
        app.reload();
        app
    }

    /// Starts both fetches again, discarding results of any running ones.
    pub fn reload(&mut self) {
        self.status
            .push_info(format!("Loading mappings from {}", self.source.describe()));
        self.fetcher = Some(Fetcher::start(self.source.clone()));
    }

    pub fn is_loading(&self) -> bool {
        self.fetcher.is_some()
    }

    /// Re-runs the filter and pushes the result into the scene.
    pub fn refresh_scene(&mut self) {
        let filtered = filter_graph(&self.graph, &self.filter);
        self.scene.sync(&filtered);
    }

    pub fn set_theme(&mut self, ctx: &Context, theme: Theme) {
        if self.theme == theme {
            return;
        }
        info!("switching to {} theme", theme.as_str());
        self.theme = theme;
        theme.apply(ctx);
    }

    fn poll_fetcher(&mut self) {
        let Some(fetcher) = self.fetcher.as_mut() else {
            return;
        };
        let outcomes = fetcher.poll();
        if fetcher.is_done() {
            self.fetcher = None;
        }

        for outcome in outcomes {
            match outcome {
                FetchOutcome::Graph(g) => {
                    info!(
                        "loaded {} nodes and {} links",
                        g.node_count(),
                        g.link_count()
                    );
                    self.status
                        .push_success(format!("Loaded {} mappings", g.link_count()));
                    self.graph = g;
                    self.refresh_scene();
                    self.fit_requested = true;
                }
                FetchOutcome::Stats(stats) => {
                    self.stats = Some(stats);
                }
                FetchOutcome::Failed { kind, reason } => {
                    warn!("{kind:?} fetch failed: {reason}");
                    let what = match kind {
                        FetchKind::Graph => "mappings",
                        FetchKind::Stats => "statistics",
                    };
                    self.status.push_error(format!("Could not load {what}"));
                }
            }
        }
    }

    fn ui_status_bar(&mut self, ui: &mut egui::Ui) {
        self.status.retain_active();
        ui.horizontal(|ui| {
            if self.is_loading() {
                ui.spinner();
            }
            if let Some(msg) = self.status.latest() {
                let palette = self.theme.palette();
                let color = match msg.kind {
                    StatusKind::Info => palette.text,
                    StatusKind::Success => palette.validated,
                    StatusKind::Error => ui.visuals().error_fg_color,
                };
                ui.label(RichText::new(&msg.text).color(color));
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!(
                    "{} nodes / {} links shown",
                    self.scene.node_count(),
                    self.scene.edge_count()
                ));
                if self.scene.is_fallback() && !self.graph.is_empty() {
                    ui.label("no mapping matches the filter, showing all");
                }
            });
        });
    }
}

impl App for MappingApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.poll_fetcher();
        if self.is_loading() || !self.status.is_empty() {
            ctx.request_repaint();
        }

        TopBottomPanel::bottom("status").show(ctx, |ui| self.ui_status_bar(ui));

        SidePanel::right("controls")
            .default_width(320.0)
            .min_width(280.0)
            .show(ctx, |ui| {
                ScrollArea::vertical().show(ui, |ui| {
                    self.ui_header(ui);
                    self.ui_stats(ui);
                    self.ui_systems(ui);
                    self.ui_search(ui);
                    self.ui_filters(ui);
                    self.ui_legend(ui);
                    self.ui_details(ui);
                    self.ui_view_settings(ui);
                });
            });

        CentralPanel::default().show(ctx, |ui| {
            let fit = std::mem::take(&mut self.fit_requested);
            let output = MappingGraphView::new(&mut self.scene, &mut self.layout)
                .with_id(GRAPH_VIEW_ID)
                .with_selected(self.selected.as_deref())
                .with_theme(self.theme)
                .with_fit_request(fit)
                .with_interactions(&self.settings_interaction)
                .with_navigations(&self.settings_navigation)
                .with_styles(&self.settings_style)
                .show(ui);
            if let Some(id) = output.clicked {
                self.selected = Some(id);
            }
        });
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        storage.set_string(THEME_KEY, self.theme.as_str().to_string());
    }
}
