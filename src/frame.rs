use crate::dom::DomScene;
use crate::events::SharedLatch;
use crate::render;
use folio_core::{FieldRenderer, FrameDriver, MotionError, MotionState, ParticleField};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub driver: FrameDriver,
    pub motion: MotionState,
    pub scene: DomScene,
    pub latch: SharedLatch,
    pub gpu: Option<render::GpuState<'a>>,
    pub started: Instant,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        let input = self.latch.borrow_mut().take();
        let renderer = self.gpu.as_mut().map(|g| g as &mut dyn FieldRenderer);
        self.driver
            .tick(&mut self.motion, &mut self.scene, renderer, input, now_ms);
    }
}

/// `None` leaves the page running without the particle layer. A shader that
/// fails validation also disables the field so it is never retried.
pub async fn init_gpu(
    canvas: &web::HtmlCanvasElement,
    field: &mut ParticleField,
) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas, field).await {
        Ok(g) => Some(g),
        Err(e) => {
            match e.downcast_ref::<MotionError>() {
                Some(err @ MotionError::ShaderCompile(_)) => field.disable(err),
                _ => log::error!("WebGPU init error: {:?}", e),
            }
            None
        }
    }
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}
