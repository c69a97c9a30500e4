use crate::dom;
use crate::render::GpuState;
use app_core::{EngineResult, LoopToken, MonotonicClock, Visualizer};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub vis: Rc<RefCell<Visualizer>>,
    pub gpu: Rc<RefCell<Option<GpuState>>>,
    pub canvas: web::HtmlCanvasElement,
    pub clock: MonotonicClock,
}

impl FrameContext {
    /// One animation frame. `false` means the token is stale and the caller
    /// must not reschedule.
    pub fn frame(&self, token: LoopToken) -> bool {
        let now = self.clock.now_sec();
        let mut vis = self.vis.borrow_mut();
        let mut gpu = self.gpu.borrow_mut();
        match gpu.as_mut() {
            Some(g) => {
                g.resize_if_needed(self.canvas.width(), self.canvas.height());
                vis.tick(token, now, g)
            }
            // No WebGPU: keep simulating so input and audio stay live.
            None => vis.tick(token, now, &mut |_: &app_core::FrameSnapshot<'_>| {}),
        }
    }
}

type TickClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// requestAnimationFrame driver. The closure reschedules itself until the
/// engine rejects its token.
pub struct FrameLoop {
    ctx: Rc<FrameContext>,
    tick: TickClosure,
    raf_id: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    pub fn new(ctx: FrameContext) -> Self {
        Self {
            ctx: Rc::new(ctx),
            tick: Rc::new(RefCell::new(None)),
            raf_id: Rc::new(Cell::new(None)),
        }
    }

    pub fn start(&self) -> EngineResult<()> {
        let token = self
            .ctx
            .vis
            .borrow_mut()
            .start(self.ctx.clock.now_sec())?;

        let tick_clone = self.tick.clone();
        let raf_id = self.raf_id.clone();
        let ctx = self.ctx.clone();
        *self.tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            raf_id.set(None);
            if !ctx.frame(token) {
                return;
            }
            if let Some(cb) = tick_clone.borrow().as_ref() {
                raf_id.set(request_frame(cb));
            }
        }) as Box<dyn FnMut()>));

        if let Some(cb) = self.tick.borrow().as_ref() {
            self.raf_id.set(request_frame(cb));
        }
        Ok(())
    }

    /// Idempotent. After this returns no further frame runs.
    pub fn stop(&self) {
        self.ctx.vis.borrow_mut().stop();
        if let Some(id) = self.raf_id.take() {
            if let Some(w) = web::window() {
                let _ = w.cancel_animation_frame(id);
            }
        }
        // Dropping the closure also breaks its self-reference cycle.
        self.tick.borrow_mut().take();
    }
}

fn request_frame(cb: &Closure<dyn FnMut()>) -> Option<i32> {
    let w = web::window()?;
    match w.request_animation_frame(cb.as_ref().unchecked_ref()) {
        Ok(id) => Some(id),
        Err(e) => {
            log::error!("[frame] requestAnimationFrame failed: {:?}", e);
            None
        }
    }
}

/// Keep the backing store in step with the canvas' CSS size.
pub fn sync_viewport(canvas: &web::HtmlCanvasElement, vis: &RefCell<Visualizer>) {
    let (w, h) = dom::sync_canvas_backing_size(canvas);
    let mut v = vis.borrow_mut();
    v.resize(w as f32, h as f32);
    v.set_surface_rect(dom::surface_rect(canvas));
}
