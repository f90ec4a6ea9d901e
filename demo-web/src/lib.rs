#![cfg(target_arch = "wasm32")]
use std::sync::Arc;

use namaste_map::EmbeddedSource;
use namaste_map_app::MappingApp;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlCanvasElement;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    eframe::WebLogger::init(log::LevelFilter::Debug).ok();
    // Fire and forget: kick off the async runner
    wasm_bindgen_futures::spawn_local(async {
        if let Err(e) = run().await {
            log::error!("failed to start the mapping explorer: {e:?}");
        }
    });
    Ok(())
}

#[wasm_bindgen]
pub async fn run() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas = document
        .get_element_by_id("the_canvas_id")
        .ok_or_else(|| JsValue::from_str("canvas with id 'the_canvas_id' not found"))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| JsValue::from_str("failed to cast to HtmlCanvasElement"))?;

    let web_options = eframe::WebOptions::default();
    eframe::WebRunner::new()
        .start(
            canvas,
            web_options,
            Box::new(|cc| {
                Ok::<Box<dyn eframe::App>, _>(Box::new(MappingApp::new(
                    cc,
                    Arc::new(EmbeddedSource),
                )))
            }),
        )
        .await?;
    Ok(())
}
