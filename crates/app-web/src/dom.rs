use app_core::{SurfaceRect, MAX_DEVICE_PIXEL_RATIO};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Device pixel ratio, capped so huge displays don't blow up the backing store.
#[inline]
pub fn pixel_ratio() -> f64 {
    web::window()
        .map(|w| w.device_pixel_ratio())
        .unwrap_or(1.0)
        .clamp(1.0, MAX_DEVICE_PIXEL_RATIO)
}

/// Resize the canvas backing store to `css_width x css_height` scaled by the
/// pixel ratio and return the new pixel size.
pub fn set_canvas_backing_size(
    canvas: &web::HtmlCanvasElement,
    css_width: f64,
    css_height: f64,
) -> (u32, u32) {
    let dpr = pixel_ratio();
    let w_px = ((css_width * dpr) as u32).max(1);
    let h_px = ((css_height * dpr) as u32).max(1);
    canvas.set_width(w_px);
    canvas.set_height(h_px);
    (w_px, h_px)
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) -> (u32, u32) {
    let rect = canvas.get_bounding_client_rect();
    set_canvas_backing_size(canvas, rect.width(), rect.height())
}

pub fn surface_rect(canvas: &web::HtmlCanvasElement) -> SurfaceRect {
    let r = canvas.get_bounding_client_rect();
    SurfaceRect::new(
        r.left() as f32,
        r.top() as f32,
        r.width() as f32,
        r.height() as f32,
    )
}

/// Full-bleed styling; `touch-action: none` keeps touch moves from scrolling.
pub fn style_surface(canvas: &web::HtmlCanvasElement) {
    let style = canvas.style();
    for (k, v) in [
        ("width", "100%"),
        ("height", "100%"),
        ("display", "block"),
        ("touch-action", "none"),
    ] {
        let _ = style.set_property(k, v);
    }
}

/// An attached DOM listener. Keeps the closure alive until `detach`.
pub struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl Listener {
    pub fn attach(
        target: &web::EventTarget,
        kind: &'static str,
        passive: Option<bool>,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Option<Self> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        let res = match passive {
            Some(p) => {
                let opts = web::AddEventListenerOptions::new();
                opts.set_passive(p);
                target.add_event_listener_with_callback_and_add_event_listener_options(
                    kind,
                    closure.as_ref().unchecked_ref(),
                    &opts,
                )
            }
            None => target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref()),
        };
        match res {
            Ok(()) => Some(Self {
                target: target.clone(),
                kind,
                closure,
            }),
            Err(e) => {
                log::warn!("[dom] {} listener not attached: {:?}", kind, e);
                None
            }
        }
    }

    pub fn detach(self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}
