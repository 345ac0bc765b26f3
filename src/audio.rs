use sphere_core::{Error, SpectrumSnapshot, SpectrumSource};
use web_sys as web;

fn js_err(what: &str, e: wasm_bindgen::JsValue) -> Error {
    Error::AnalyserUnavailable(format!("{what}: {e:?}"))
}

/// Media element → analyser → speakers. Built once, on the first user
/// gesture, because browsers keep a fresh `AudioContext` suspended otherwise.
///
/// Once the source node exists the element only sounds through this
/// context, so the tap stays alive even when the analyser could not be
/// attached; the element is then routed straight to the speakers.
pub struct AnalyserTap {
    audio_ctx: web::AudioContext,
    analyser: Option<web::AnalyserNode>,
    // Kept alive for as long as the graph exists.
    _source: web::MediaElementAudioSourceNode,
    bins: Vec<u8>,
}

impl AnalyserTap {
    pub fn new(audio_el: &web::HtmlAudioElement, fft_size: u32) -> Result<Self, Error> {
        let audio_ctx = web::AudioContext::new().map_err(|e| js_err("AudioContext", e))?;
        let source = match audio_ctx.create_media_element_source(audio_el) {
            Ok(s) => s,
            Err(e) => {
                _ = audio_ctx.close();
                return Err(js_err("MediaElementAudioSourceNode", e));
            }
        };

        let analyser = match attach_analyser(&audio_ctx, &source, fft_size) {
            Ok(a) => Some(a),
            Err(e) => {
                log::warn!("[audio] {e}; playing without visuals");
                _ = source.disconnect();
                if let Err(e) = source.connect_with_audio_node(&audio_ctx.destination()) {
                    log::error!("[audio] direct output failed: {e:?}");
                }
                None
            }
        };

        let bins = vec![0; analyser.as_ref().map_or(0, |a| a.frequency_bin_count() as usize)];
        log::info!(
            "[audio] graph ready: fft={} bins={} rate={}Hz",
            fft_size,
            bins.len(),
            audio_ctx.sample_rate()
        );
        Ok(Self {
            audio_ctx,
            analyser,
            _source: source,
            bins,
        })
    }

    /// Browsers may suspend the context again (tab hidden, device change).
    pub fn resume(&self) {
        _ = self.audio_ctx.resume();
    }
}

/// Insert an analyser between `source` and the speakers.
fn attach_analyser(
    audio_ctx: &web::AudioContext,
    source: &web::MediaElementAudioSourceNode,
    fft_size: u32,
) -> Result<web::AnalyserNode, Error> {
    let analyser = audio_ctx
        .create_analyser()
        .map_err(|e| js_err("AnalyserNode", e))?;
    analyser.set_fft_size(fft_size);
    source
        .connect_with_audio_node(&analyser)
        .map_err(|e| js_err("connect source", e))?;
    analyser
        .connect_with_audio_node(&audio_ctx.destination())
        .map_err(|e| js_err("connect destination", e))?;
    Ok(analyser)
}

impl SpectrumSource for AnalyserTap {
    fn read(&mut self) -> Option<SpectrumSnapshot<'_>> {
        let analyser = self.analyser.as_ref()?;
        analyser.get_byte_frequency_data(&mut self.bins);
        SpectrumSnapshot::new(&self.bins)
    }
}
