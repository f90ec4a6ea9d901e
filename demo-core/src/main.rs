#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result {
    use std::sync::Arc;

    use namaste_map::{MappingSource, SourceConfig};
    use namaste_map_app::MappingApp;

    env_logger::init();

    let source: Arc<dyn MappingSource> = Arc::from(SourceConfig::from_env().into_source());
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("NAMASTE mapping explorer")
            .with_inner_size([1280.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native(
        "namaste_map",
        native_options,
        Box::new(|cc| Ok(Box::new(MappingApp::new(cc, source)))),
    )
}

// The web build starts through the namaste-map-web crate.
#[cfg(target_arch = "wasm32")]
fn main() {}
