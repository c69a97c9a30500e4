use app_core::PointerActivity;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn mouse_client(ev: &web::MouseEvent) -> (f32, f32) {
    (ev.client_x() as f32, ev.client_y() as f32)
}

/// Client position of the first active touch, if any.
#[inline]
pub fn first_touch_client(ev: &web::TouchEvent) -> Option<(f32, f32)> {
    let t = ev.touches().get(0)?;
    Some((t.client_x() as f32, t.client_y() as f32))
}

pub fn mouse_activity(ev: &web::Event, press: bool) -> Option<PointerActivity> {
    let ev = ev.dyn_ref::<web::MouseEvent>()?;
    let (x, y) = mouse_client(ev);
    Some(if press {
        PointerActivity::Press { x, y }
    } else {
        PointerActivity::Move { x, y }
    })
}

pub fn touch_activity(ev: &web::Event, press: bool) -> Option<PointerActivity> {
    let ev = ev.dyn_ref::<web::TouchEvent>()?;
    let (x, y) = first_touch_client(ev)?;
    Some(if press {
        PointerActivity::Press { x, y }
    } else {
        PointerActivity::Move { x, y }
    })
}
