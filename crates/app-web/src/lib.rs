#![cfg(target_arch = "wasm32")]
//! Browser front-end: mounts the ripple surface on a canvas, wires pointer
//! input and an `<audio>` element into the engine, and exposes the
//! [`WaveShader`] control surface to JavaScript.

mod audio;
mod dom;
mod events;
mod frame;
mod input;
mod render;

use app_core::{
    progress_percent, seek_target, MonotonicClock, PlaybackStatus, Visualizer, VisualizerConfig,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, spawn_local, JsFuture};
use web_sys as web;

use dom::Listener;
use frame::{FrameContext, FrameLoop};
use render::GpuState;

thread_local! {
    static INSTANCE: RefCell<Option<WaveShader>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("app-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Auto-mount on `#app-canvas` when the page provides one. Pages without it
/// call `WaveShader.create` themselves.
async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let Some(canvas_el) = document.get_element_by_id("app-canvas") else {
        log::info!("[engine] no #app-canvas; waiting for WaveShader.create");
        return Ok(());
    };
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let audio_el = match document.get_element_by_id("app-audio") {
        Some(el) => el
            .dyn_into::<web::HtmlAudioElement>()
            .map_err(|e| anyhow::anyhow!(format!("#app-audio is not <audio>: {:?}", e)))?,
        None => new_audio_element()?,
    };

    let shader = WaveShader::mount(canvas, audio_el, None).await?;
    shader.inner.frame_loop.start()?;
    INSTANCE.with(|i| *i.borrow_mut() = Some(shader));
    Ok(())
}

fn new_audio_element() -> anyhow::Result<web::HtmlAudioElement> {
    web::HtmlAudioElement::new().map_err(|e| anyhow::anyhow!(format!("Audio element: {:?}", e)))
}

/// The auto-mounted instance, if `#app-canvas` was present at startup.
#[wasm_bindgen]
pub fn shader() -> Option<WaveShader> {
    INSTANCE.with(|i| i.borrow().clone())
}

struct Shared {
    vis: Rc<RefCell<Visualizer>>,
    gpu: Rc<RefCell<Option<GpuState>>>,
    canvas: web::HtmlCanvasElement,
    audio_el: web::HtmlAudioElement,
    audio: RefCell<Option<audio::AudioGraph>>,
    audio_attempted: Cell<bool>,
    frame_loop: FrameLoop,
    listeners: RefCell<Vec<Listener>>,
    disposed: Cell<bool>,
}

#[wasm_bindgen]
#[derive(Clone)]
pub struct WaveShader {
    inner: Rc<Shared>,
}

impl WaveShader {
    async fn mount(
        canvas: web::HtmlCanvasElement,
        audio_el: web::HtmlAudioElement,
        src: Option<String>,
    ) -> anyhow::Result<Self> {
        dom::style_surface(&canvas);
        let (w, h) = dom::sync_canvas_backing_size(&canvas);

        let config = VisualizerConfig::default();
        let field_resolution = config.field.resolution as u32;
        let mut vis = Visualizer::new(config, [w as f32, h as f32])?;
        vis.set_surface_rect(dom::surface_rect(&canvas));
        let vis = Rc::new(RefCell::new(vis));

        // Without WebGPU the simulation still runs; nothing is drawn.
        let gpu = match GpuState::new(&canvas, field_resolution).await {
            Ok(g) => Some(g),
            Err(e) => {
                log::error!("[gpu] WebGPU init error: {:?}", e);
                None
            }
        };
        let gpu = Rc::new(RefCell::new(gpu));

        audio_el.set_cross_origin(Some("anonymous"));
        if let Some(src) = src.as_deref() {
            audio_el.set_src(src);
        }

        let clock = MonotonicClock::default();
        let mut listeners = events::wire_input_handlers(&canvas, &vis, clock);
        {
            let vis = vis.clone();
            let canvas_r = canvas.clone();
            if let Some(win) = web::window() {
                listeners.extend(Listener::attach(win.as_ref(), "resize", None, move |_| {
                    frame::sync_viewport(&canvas_r, &vis);
                }));
            }
        }
        {
            let vis = vis.clone();
            listeners.extend(Listener::attach(audio_el.as_ref(), "ended", None, move |_| {
                vis.borrow_mut().set_playing(false);
            }));
        }

        let frame_loop = FrameLoop::new(FrameContext {
            vis: vis.clone(),
            gpu: gpu.clone(),
            canvas: canvas.clone(),
            clock,
        });

        Ok(Self {
            inner: Rc::new(Shared {
                vis,
                gpu,
                canvas,
                audio_el,
                audio: RefCell::new(None),
                audio_attempted: Cell::new(false),
                frame_loop,
                listeners: RefCell::new(listeners),
                disposed: Cell::new(false),
            }),
        })
    }
}

impl Shared {
    /// The analyser graph is built on the first play, inside the user
    /// gesture. A failure is logged once and playback continues unanalysed.
    fn ensure_audio_graph(&self) {
        if self.audio_attempted.replace(true) {
            return;
        }
        match audio::build_audio_graph(&self.audio_el) {
            Ok(graph) => {
                self.vis.borrow_mut().bind_audio(graph.frequency_source());
                *self.audio.borrow_mut() = Some(graph);
            }
            Err(e) => log::warn!("[audio] analyser unavailable, visuals stay flat: {:?}", e),
        }
    }

    async fn play(&self) -> PlaybackStatus {
        if self.disposed.get() {
            return PlaybackStatus::Failed("disposed".into());
        }
        self.ensure_audio_graph();
        let ctx = self.audio.borrow().as_ref().map(|g| g.context());
        if let Some(ctx) = ctx {
            if let Err(e) = audio::resume_context(ctx).await {
                log::warn!("[audio] {:?}", e);
            }
        }

        let started = match self.audio_el.play() {
            Ok(p) => JsFuture::from(p).await.map(|_| ()),
            Err(e) => Err(e),
        };
        if self.disposed.get() {
            return PlaybackStatus::Paused;
        }
        match started {
            Ok(()) => {
                self.vis.borrow_mut().set_playing(true);
                log::info!("[audio] playing");
                PlaybackStatus::Playing
            }
            Err(e) => {
                let msg = format!("{:?}", e);
                log::warn!("[audio] play failed: {}", msg);
                self.vis.borrow_mut().set_playing(false);
                PlaybackStatus::Failed(msg)
            }
        }
    }

    fn duration(&self) -> f64 {
        let d = self.audio_el.duration();
        if d.is_finite() {
            d
        } else {
            0.0
        }
    }

    /// Teardown order: loop, listeners, audio graph, engine state, GPU.
    fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        self.frame_loop.stop();
        for l in self.listeners.borrow_mut().drain(..) {
            l.detach();
        }
        if let Err(e) = self.audio_el.pause() {
            log::debug!("[audio] pause on dispose failed: {:?}", e);
        }
        if let Some(graph) = self.audio.borrow_mut().take() {
            graph.release();
        }
        self.vis.borrow_mut().dispose();
        if let Some(gpu) = self.gpu.borrow_mut().take() {
            gpu.release();
        }
        log::info!("[engine] shader disposed");
    }
}

#[wasm_bindgen]
impl WaveShader {
    /// Mount on the canvas with id `canvas_id`, using a detached `<audio>`
    /// element. The frame loop is started before returning.
    pub async fn create(canvas_id: String, src: Option<String>) -> Result<WaveShader, JsValue> {
        let canvas = dom::window_document()
            .and_then(|d| d.get_element_by_id(&canvas_id))
            .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok())
            .ok_or_else(|| JsValue::from_str(&format!("no canvas #{}", canvas_id)))?;
        let audio_el = new_audio_element().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let shader = Self::mount(canvas, audio_el, src)
            .await
            .map_err(|e| JsValue::from_str(&format!("{:#}", e)))?;
        shader.start()?;
        Ok(shader)
    }

    /// Switch tracks. Playback stops until the next `play()`.
    pub fn load(&self, url: &str) {
        let s = &self.inner;
        if s.disposed.get() {
            return;
        }
        if let Err(e) = s.audio_el.pause() {
            log::debug!("[audio] pause failed: {:?}", e);
        }
        s.audio_el.set_src(url);
        s.audio_el.load();
        s.vis.borrow_mut().set_playing(false);
        log::info!("[audio] loaded {}", url);
    }

    /// Resolves with `"playing"` or `"failed"`; never rejects.
    pub fn play(&self) -> js_sys::Promise {
        let inner = self.inner.clone();
        future_to_promise(async move {
            let status = inner.play().await;
            Ok(JsValue::from_str(status.label()))
        })
    }

    pub fn pause(&self) {
        let s = &self.inner;
        if let Err(e) = s.audio_el.pause() {
            log::debug!("[audio] pause failed: {:?}", e);
        }
        s.vis.borrow_mut().set_playing(false);
    }

    /// Seek to `fraction` of the track; ignored while the duration is unknown.
    pub fn seek(&self, fraction: f64) {
        let s = &self.inner;
        if let Some(t) = seek_target(fraction, s.duration()) {
            s.audio_el.set_current_time(t);
        }
    }

    #[wasm_bindgen(getter, js_name = currentTime)]
    pub fn current_time(&self) -> f64 {
        self.inner.audio_el.current_time()
    }

    #[wasm_bindgen(getter)]
    pub fn duration(&self) -> f64 {
        self.inner.duration()
    }

    #[wasm_bindgen(getter, js_name = progressPercent)]
    pub fn progress_percent(&self) -> f64 {
        progress_percent(self.current_time(), self.inner.duration())
    }

    #[wasm_bindgen(getter, js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.inner.vis.borrow().is_playing()
    }

    /// Ripple at client coordinates, applied on the next frame.
    #[wasm_bindgen(js_name = triggerRipple)]
    pub fn trigger_ripple(&self, x: f32, y: f32, strength: f32) {
        let s = &self.inner;
        let mut vis = s.vis.borrow_mut();
        vis.set_surface_rect(dom::surface_rect(&s.canvas));
        vis.trigger_ripple(x, y, strength);
    }

    /// Resize to `width x height` CSS pixels. The grid resolution is fixed.
    pub fn resize(&self, width: f64, height: f64) {
        let s = &self.inner;
        if s.disposed.get() {
            return;
        }
        let (w, h) = dom::set_canvas_backing_size(&s.canvas, width, height);
        if let Some(gpu) = s.gpu.borrow_mut().as_mut() {
            gpu.resize_if_needed(w, h);
        }
        let mut vis = s.vis.borrow_mut();
        vis.resize(w as f32, h as f32);
        vis.set_surface_rect(dom::surface_rect(&s.canvas));
    }

    pub fn start(&self) -> Result<(), JsValue> {
        self.inner
            .frame_loop
            .start()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn stop(&self) {
        self.inner.frame_loop.stop();
    }

    pub fn dispose(&self) {
        self.inner.dispose();
    }
}
