use anyhow::anyhow;
use app_core::{FrequencySource, ANALYSER_FFT_SIZE, ANALYSER_TIME_SMOOTHING};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Byte spectrum straight from a WebAudio `AnalyserNode`.
pub struct AnalyserSource {
    node: web::AnalyserNode,
}

impl FrequencySource for AnalyserSource {
    fn bin_count(&self) -> usize {
        self.node.frequency_bin_count() as usize
    }

    fn read(&mut self, out: &mut [u8]) {
        self.node.get_byte_frequency_data(out);
    }
}

/// media element -> analyser -> speakers
pub struct AudioGraph {
    ctx: web::AudioContext,
    source: web::MediaElementAudioSourceNode,
    analyser: web::AnalyserNode,
}

fn js_err(label: &str) -> impl Fn(wasm_bindgen::JsValue) -> anyhow::Error + '_ {
    move |e| anyhow!("{}: {:?}", label, e)
}

/// Build the graph for `element`. A media element can be captured by a
/// single source node for its whole lifetime, so callers build this once.
pub fn build_audio_graph(element: &web::HtmlAudioElement) -> anyhow::Result<AudioGraph> {
    let ctx = web::AudioContext::new().map_err(js_err("AudioContext"))?;
    let source = ctx
        .create_media_element_source(element)
        .map_err(js_err("MediaElementAudioSourceNode"))?;
    let analyser = ctx.create_analyser().map_err(js_err("AnalyserNode"))?;
    analyser.set_fft_size(ANALYSER_FFT_SIZE);
    analyser.set_smoothing_time_constant(ANALYSER_TIME_SMOOTHING);

    source
        .connect_with_audio_node(&analyser)
        .map_err(js_err("source->analyser"))?;
    analyser
        .connect_with_audio_node(&ctx.destination())
        .map_err(js_err("analyser->destination"))?;
    log::info!(
        "[audio] graph ready: fft={} bins={}",
        ANALYSER_FFT_SIZE,
        analyser.frequency_bin_count()
    );
    Ok(AudioGraph {
        ctx,
        source,
        analyser,
    })
}

impl AudioGraph {
    pub fn frequency_source(&self) -> Box<dyn FrequencySource> {
        Box::new(AnalyserSource {
            node: self.analyser.clone(),
        })
    }

    pub fn context(&self) -> web::AudioContext {
        self.ctx.clone()
    }

    pub fn release(self) {
        let _ = self.source.disconnect();
        let _ = self.analyser.disconnect();
        if let Ok(p) = self.ctx.close() {
            // A rejected close is not actionable.
            wasm_bindgen_futures::spawn_local(async move {
                let _ = JsFuture::from(p).await;
            });
        }
        log::info!("[audio] graph released");
    }
}

/// Browsers create contexts suspended until a user gesture.
pub async fn resume_context(ctx: web::AudioContext) -> anyhow::Result<()> {
    if ctx.state() != web::AudioContextState::Suspended {
        return Ok(());
    }
    let p = ctx.resume().map_err(js_err("resume"))?;
    JsFuture::from(p).await.map_err(js_err("resume"))?;
    Ok(())
}
