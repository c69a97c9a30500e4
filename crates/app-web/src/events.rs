use crate::dom::{self, Listener};
use crate::input;
use app_core::{MonotonicClock, PointerActivity, Visualizer};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

type Extract = fn(&web::Event, bool) -> Option<PointerActivity>;

/// Mouse moves, clicks, touch moves and taps all funnel into
/// [`Visualizer::handle_pointer`]. Touch handlers are non-passive so they can
/// suppress scrolling and the synthesized click.
pub fn wire_input_handlers(
    canvas: &web::HtmlCanvasElement,
    vis: &Rc<RefCell<Visualizer>>,
    clock: MonotonicClock,
) -> Vec<Listener> {
    let bindings: [(&'static str, Extract, bool, Option<bool>); 4] = [
        ("mousemove", input::mouse_activity, false, None),
        ("click", input::mouse_activity, true, None),
        ("touchmove", input::touch_activity, false, Some(false)),
        ("touchstart", input::touch_activity, true, Some(false)),
    ];

    let mut listeners = Vec::with_capacity(bindings.len());
    for (kind, extract, press, passive) in bindings {
        let vis = vis.clone();
        let canvas_h = canvas.clone();
        let handler = move |ev: web::Event| {
            if passive.is_some() {
                ev.prevent_default();
            }
            let Some(activity) = extract(&ev, press) else {
                return;
            };
            let Ok(mut v) = vis.try_borrow_mut() else {
                log::warn!("[input] {} dropped: engine busy", kind);
                return;
            };
            // Layout may have moved since the last event.
            v.set_surface_rect(dom::surface_rect(&canvas_h));
            v.handle_pointer(activity, clock.now_sec());
        };
        if let Some(l) = Listener::attach(canvas.as_ref(), kind, passive, handler) {
            listeners.push(l);
        }
    }
    log::info!("[input] {} listeners attached", listeners.len());
    listeners
}
