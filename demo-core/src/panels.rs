use egui::{CollapsingHeader, Color32, RichText, Ui};
use namaste_map::{reset_view, resolve_selection, search_nodes, FilterState, Neighbor, Theme};

use crate::MappingApp;

const SEARCH_HINT: &str = "Search terms or codes (e.g., AAA-1)";

fn info_icon(ui: &mut Ui, tip: &str) {
    ui.add_space(4.0);
    ui.small_button("ℹ").on_hover_text(tip);
}

/// `Confidence: 83%` as shown next to each connected mapping.
pub fn confidence_label(confidence: f64) -> String {
    format!("Confidence: {}%", (confidence * 100.).round() as i64)
}

fn stat_card(ui: &mut Ui, title: &str, value: String) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_min_width(120.0);
        ui.vertical(|ui| {
            ui.label(RichText::new(title).small().weak());
            ui.label(RichText::new(value).strong().size(18.0));
        });
    });
}

fn color_swatch(ui: &mut Ui, color: Color32) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(12.0, 12.0), egui::Sense::hover());
    ui.painter().circle_filled(rect.center(), 6.0, color);
}

impl MappingApp {
    pub(crate) fn ui_header(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.heading("Mapping explorer");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let label = if self.theme.is_dark() {
                    "☀ Light"
                } else {
                    "🌙 Dark"
                };
                if ui.button(label).on_hover_text("Toggle theme").clicked() {
                    self.set_theme(ui.ctx(), self.theme.toggled());
                }
            });
        });
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!self.is_loading(), egui::Button::new("Reload data"))
                .clicked()
            {
                self.reload();
            }
            ui.label(RichText::new(self.source.describe()).small().weak());
        });
        ui.separator();
    }

    pub(crate) fn ui_stats(&mut self, ui: &mut Ui) {
        let Some(stats) = &self.stats else {
            return;
        };
        let s = &stats.mapping_stats;
        egui::Grid::new("stats").num_columns(2).show(ui, |ui| {
            stat_card(ui, "Total mappings", s.total_mappings.to_string());
            stat_card(ui, "Validated", s.validated_mappings.to_string());
            ui.end_row();
            stat_card(ui, "Pending", s.pending_validation.to_string());
            stat_card(ui, "Validation rate", format!("{}%", s.validation_rate));
            ui.end_row();
        });
        if !s.last_updated.is_empty() {
            ui.label(RichText::new(format!("Last updated {}", s.last_updated)).small());
        }
        ui.separator();
    }

    pub(crate) fn ui_systems(&mut self, ui: &mut Ui) {
        let Some(stats) = &self.stats else {
            return;
        };
        if stats.ayush_systems.is_empty() && stats.icd11_modules.is_empty() {
            return;
        }
        CollapsingHeader::new("Systems overview")
            .default_open(false)
            .show(ui, |ui| {
                for sys in &stats.ayush_systems {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(&sys.name).strong());
                        ui.label(RichText::new(&sys.code).monospace().weak());
                    });
                    if !sys.description.is_empty() {
                        ui.label(RichText::new(&sys.description).small());
                    }
                    ui.label(
                        RichText::new(format!(
                            "{} terms, {} validated, {} pending",
                            sys.terminology_count, sys.validated_mappings, sys.pending_mappings
                        ))
                        .small()
                        .weak(),
                    );
                    ui.add_space(4.0);
                }
                for m in &stats.icd11_modules {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(&m.name).strong());
                        ui.label(RichText::new(&m.module).monospace().weak());
                    });
                    ui.label(
                        RichText::new(format!("{} since {}", m.status, m.launch_date))
                            .small()
                            .weak(),
                    );
                }
            });
    }

    pub(crate) fn ui_search(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.add(
                egui::TextEdit::singleline(&mut self.query)
                    .hint_text(SEARCH_HINT)
                    .desired_width(ui.available_width() - 60.0),
            );
            if ui.button("Clear").clicked() {
                self.query.clear();
            }
        });

        let results = search_nodes(&self.graph, &self.query);
        if results.is_empty() {
            return;
        }
        ui.label(RichText::new("Results").small().weak());
        let mut picked = None;
        egui::ScrollArea::vertical()
            .id_salt("search_results")
            .max_height(160.0)
            .show(ui, |ui| {
                for n in &results {
                    let text = format!("{}\n{}", n.id, n.name);
                    let selected = self.selected.as_deref() == Some(n.id.as_str());
                    if ui.selectable_label(selected, text).clicked() {
                        picked = Some(n.id.clone());
                    }
                }
            });
        if let Some(id) = picked {
            self.selected = Some(id);
        }
    }

    pub(crate) fn ui_filters(&mut self, ui: &mut Ui) {
        CollapsingHeader::new("Filters")
            .default_open(true)
            .show(ui, |ui| {
                let before = self.filter;
                ui.horizontal(|ui| {
                    ui.checkbox(&mut self.filter.show_validated, "Validated");
                    ui.checkbox(&mut self.filter.show_pending, "Pending");
                    info_icon(ui, "With both unchecked every status is shown.");
                });
                ui.label(format!("Min confidence: {:.2}", self.filter.min_confidence));
                ui.add(
                    egui::Slider::new(&mut self.filter.min_confidence, 0.0..=1.0)
                        .step_by(0.01)
                        .show_value(false),
                );
                if ui.button("Reset filters").clicked() {
                    self.filter = FilterState::default();
                }
                if self.filter != before {
                    self.refresh_scene();
                }
            });
    }

    pub(crate) fn ui_legend(&mut self, ui: &mut Ui) {
        let palette = self.theme.palette();
        ui.horizontal_wrapped(|ui| {
            for (label, color) in palette.legend() {
                color_swatch(ui, color);
                ui.label(label);
                ui.add_space(6.0);
            }
        });
        ui.separator();
    }

    pub(crate) fn ui_details(&mut self, ui: &mut Ui) {
        CollapsingHeader::new("Mapping details")
            .default_open(true)
            .show(ui, |ui| {
                let Some(details) = resolve_selection(&self.graph, self.selected.as_deref())
                else {
                    ui.label(RichText::new("Select a node to view details.").weak());
                    return;
                };

                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.label(RichText::new("Selected node").small().weak());
                    ui.horizontal(|ui| {
                        ui.vertical(|ui| {
                            ui.label(RichText::new(&details.node.name).strong());
                            ui.label(RichText::new(&details.node.id).monospace().small());
                        });
                        ui.label(details.node.category.label());
                    });
                });

                ui.label(RichText::new("Connected mappings").strong());
                if details.neighbors.is_empty() {
                    ui.label(RichText::new("No linked mappings found.").small().weak());
                }
                for nb in &details.neighbors {
                    neighbor_row(ui, nb);
                }

                let id = details.node.id.clone();
                ui.horizontal(|ui| {
                    if ui.button("Validate").clicked() {
                        self.status
                            .push_info(format!("Mapping validation initiated for {id}"));
                    }
                    if ui.button("Export").clicked() {
                        self.status
                            .push_info(format!("Export prepared for mapping {id}"));
                    }
                });
            });
    }

    pub(crate) fn ui_view_settings(&mut self, ui: &mut Ui) {
        CollapsingHeader::new("View").show(ui, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Fit to screen").clicked() {
                    self.fit_requested = true;
                }
                if ui.button("Reset view").clicked() {
                    reset_view(ui, crate::GRAPH_VIEW_ID);
                }
            });
            let mut dark = self.theme.is_dark();
            if ui.checkbox(&mut dark, "dark mode").changed() {
                self.set_theme(ui.ctx(), Theme::from_dark_mode(dark));
            }
            ui.horizontal(|ui| {
                ui.checkbox(&mut self.settings_style.labels_always, "labels_always");
                info_icon(ui, "Always render node labels instead of only on hover.");
            });
            ui.horizontal(|ui| {
                ui.checkbox(&mut self.settings_style.edge_deemphasis, "edge_deemphasis");
                info_icon(ui, "Dim links not touching the selected node.");
            });
            ui.add(
                egui::Slider::new(&mut self.settings_style.edge_curvature, 0.0..=1.0)
                    .text("edge_curvature"),
            );
            ui.horizontal(|ui| {
                ui.checkbox(&mut self.settings_navigation.zoom_and_pan, "zoom_and_pan");
                ui.checkbox(&mut self.settings_interaction.node_drag, "node_drag");
            });
            ui.add(
                egui::Slider::new(&mut self.settings_navigation.zoom_step, 0.01..=0.5)
                    .text("zoom_step"),
            );
        });

        CollapsingHeader::new("Force Directed Layout").show(ui, |ui| {
            let state = self.layout.state_mut();
            ui.horizontal(|ui| {
                ui.checkbox(&mut state.is_running, "running");
                info_icon(ui, "Run/pause the simulation. When paused node positions stay fixed.");
            });
            ui.add(egui::Slider::new(&mut state.dt, 0.001..=0.2).text("dt"));
            ui.add(egui::Slider::new(&mut state.damping, 0.0..=1.0).text("damping"));
            ui.add(egui::Slider::new(&mut state.max_step, 1.0..=50.0).text("max_step"));
            ui.add(egui::Slider::new(&mut state.k_scale, 0.2..=3.0).text("k_scale"));
            ui.add(egui::Slider::new(&mut state.c_attract, 0.0..=3.0).text("c_attract"));
            ui.add(egui::Slider::new(&mut state.c_repulse, 0.0..=3.0).text("c_repulse"));
            ui.horizontal(|ui| {
                ui.add(egui::Slider::new(&mut state.c_gravity, 0.0..=2.0).text("c_gravity"));
                info_icon(ui, "Pull toward the middle of the canvas.");
            });
            ui.add(egui::Slider::new(&mut state.steps_per_frame, 1..=10).text("steps_per_frame"));
        });
    }
}

fn neighbor_row(ui: &mut Ui, nb: &Neighbor) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(RichText::new(&nb.name).strong());
                ui.label(RichText::new(&nb.id).monospace().small());
            });
            ui.label(nb.category_label());
        });
        ui.label(RichText::new(confidence_label(nb.confidence)).small().weak());
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_is_rounded_percent() {
        assert_eq!(confidence_label(0.834), "Confidence: 83%");
        assert_eq!(confidence_label(0.1), "Confidence: 10%");
        assert_eq!(confidence_label(1.0), "Confidence: 100%");
    }
}
