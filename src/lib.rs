#![cfg(target_arch = "wasm32")]
use folio_core::{FrameDriver, InputLatch, MotionConfig, MotionState};
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod render;
mod style;
mod targets;

use constants::{CANVAS_ID, CONTACT_FORM_ID, CURSOR_FOLLOWER_ID, CURSOR_ID, STRIP_SELECTOR};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("folio-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

fn wire_events(
    window: &web::Window,
    document: &web::Document,
    canvas: &web::HtmlCanvasElement,
    scene: &mut dom::DomScene,
    latch: &events::SharedLatch,
) {
    events::wire_resize(window, canvas, latch.clone());
    events::wire_wheel(window, latch.clone());
    events::wire_native_scroll(window, latch.clone());
    events::wire_touch(window, latch.clone());
    events::wire_scroll_keys(window, latch.clone());
    events::wire_pointermove(window, latch.clone());

    let cursors = [CURSOR_ID, CURSOR_FOLLOWER_ID]
        .iter()
        .filter_map(|id| document.get_element_by_id(id))
        .collect();
    events::wire_hover(document, cursors);
    events::wire_magnetic(scene, latch.clone());
    events::wire_anchor_links(scene, document, latch.clone());

    if let Some(form) = document.get_element_by_id(CONTACT_FORM_ID) {
        events::wire_contact_submit(&form, latch.clone());
    }
    if let Some(strip) = document
        .query_selector(STRIP_SELECTOR)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
    {
        events::wire_projects_strip(&strip);
    }
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let mut scene = dom::DomScene::new(window.clone(), document.clone());
    let page_targets = targets::resolve(&mut scene);

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    dom::sync_canvas_backing_size(&canvas);
    let viewport = dom::viewport(&window);
    let mut rng = StdRng::from_entropy();
    let mut motion = MotionState::new(MotionConfig::default(), viewport, &mut rng);
    motion.scroll.set_max_extent(dom::document_max_scroll(
        &document,
        viewport.height as f64,
    ));
    motion
        .scroll
        .scroll_immediate(window.scroll_y().unwrap_or(0.0));
    motion.install_page(page_targets, &mut scene);

    let latch: events::SharedLatch = Rc::new(RefCell::new(InputLatch::default()));
    wire_events(&window, &document, &canvas, &mut scene, &latch);

    let gpu = frame::init_gpu(&canvas, &mut motion.field).await;
    if gpu.is_none() {
        log::warn!("particle field unavailable; page motion continues without it");
    }

    let ctx = Rc::new(RefCell::new(frame::FrameContext {
        driver: FrameDriver::new(),
        motion,
        scene,
        latch,
        gpu,
        started: Instant::now(),
    }));

    let teardown_ctx = ctx.clone();
    dom::add_event_listener(&window, "pagehide", move |_| {
        if let Ok(mut ctx) = teardown_ctx.try_borrow_mut() {
            ctx.motion.teardown();
        }
    });

    frame::start_loop(ctx);
    Ok(())
}
