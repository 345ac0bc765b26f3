//! Carries out what the track session asks for, using the page's `<audio>`
//! element, `fetch` and timers, and feeds the results back as events.

use sphere_core::{Effect, Ticket, TrackError, TrackEvent, TrackSession};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

use crate::overlay;

struct Inner {
    session: RefCell<TrackSession>,
    audio: web::HtmlAudioElement,
    document: web::Document,
    // Ticket of the track the audio element was last pointed at.
    playing_ticket: Cell<Ticket>,
    resolve_abort: RefCell<Option<web::AbortController>>,
}

/// Cheap-to-clone handle; closures hold one each.
#[derive(Clone)]
pub struct Player {
    inner: Rc<Inner>,
}

impl Player {
    pub fn new(session: TrackSession, audio: web::HtmlAudioElement, document: web::Document) -> Self {
        Self {
            inner: Rc::new(Inner {
                session: RefCell::new(session),
                audio,
                document,
                playing_ticket: Cell::new(0),
                resolve_abort: RefCell::new(None),
            }),
        }
    }

    /// Feed one event to the session and apply the resulting effects.
    pub fn dispatch(&self, event: TrackEvent) {
        // The borrow ends here; effects may schedule further dispatches.
        let effects = self
            .inner
            .session
            .borrow_mut()
            .handle(event, js_sys::Date::now());
        for effect in effects {
            self.apply(effect);
        }
    }

    fn apply(&self, effect: Effect) {
        match effect {
            Effect::Resolve { ticket, url } => self.resolve(ticket, url),
            Effect::Play { ticket, source } => self.play(ticket, &source),
            Effect::Stop => {
                _ = self.inner.audio.pause();
            }
            Effect::ShowLabel(label) => overlay::show_label(&self.inner.document, &label),
            Effect::ShowRetry(error) => overlay::show_retry(&self.inner.document, &error),
            Effect::HideRetry => overlay::hide_retry(&self.inner.document),
            Effect::ScheduleRetry { ticket, delay_ms } => {
                self.after(delay_ms, TrackEvent::RetryElapsed { ticket })
            }
            Effect::ArmTimeout { ticket, after_ms } => {
                self.after(after_ms, TrackEvent::LoadTimedOut { ticket })
            }
        }
    }

    fn resolve(&self, ticket: Ticket, url: String) {
        let controller = web::AbortController::new().ok();
        if let Some(previous) = self.inner.resolve_abort.replace(controller.clone()) {
            previous.abort();
        }
        let player = self.clone();
        spawn_local(async move {
            let final_url = match fetch_final_url(&url, controller.as_ref()).await {
                Ok(u) => Some(u),
                Err(e) => {
                    log::warn!("[player] could not resolve {url}: {e:?}");
                    None
                }
            };
            player.dispatch(TrackEvent::Resolved { ticket, final_url });
        });
    }

    fn play(&self, ticket: Ticket, source: &str) {
        let audio = &self.inner.audio;
        self.inner.playing_ticket.set(ticket);
        audio.set_src(source);
        audio.load();
        let promise = match audio.play() {
            Ok(p) => p,
            Err(e) => {
                if let Some(error) = classify_play_rejection(&e) {
                    self.dispatch(TrackEvent::PlaybackFailed { ticket, error });
                }
                return;
            }
        };
        let player = self.clone();
        spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                if let Some(error) = classify_play_rejection(&e) {
                    player.dispatch(TrackEvent::PlaybackFailed { ticket, error });
                }
            }
        });
    }

    fn after(&self, ms: u32, event: TrackEvent) {
        let player = self.clone();
        let callback = Closure::once_into_js(move || player.dispatch(event));
        let Some(window) = web::window() else {
            return;
        };
        let ms = ms.min(i32::MAX as u32) as i32;
        if let Err(e) = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), ms)
        {
            log::error!("[player] setTimeout failed: {e:?}");
        }
    }

    /// Route the audio element's lifecycle events into the session, tagged
    /// with the ticket of the track the element is currently playing.
    pub fn wire_media_events(&self) {
        self.on_media_event("playing", |p, ticket| {
            p.dispatch(TrackEvent::PlaybackStarted { ticket })
        });
        self.on_media_event("ended", |p, ticket| {
            p.dispatch(TrackEvent::PlaybackEnded { ticket })
        });
        self.on_media_event("error", |p, ticket| {
            let reason = p
                .inner
                .audio
                .error()
                .map(|e| format!("media error {}: {}", e.code(), e.message()))
                .unwrap_or_else(|| "media error".to_string());
            p.dispatch(TrackEvent::PlaybackFailed {
                ticket,
                error: TrackError::FetchFailed(reason),
            })
        });
    }

    fn on_media_event(&self, name: &str, handler: impl Fn(&Player, Ticket) + 'static) {
        let player = self.clone();
        let closure = Closure::wrap(Box::new(move || {
            let ticket = player.inner.playing_ticket.get();
            handler(&player, ticket);
        }) as Box<dyn FnMut()>);
        _ = self
            .inner
            .audio
            .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Follow redirects on `url` and return where they ended. Only the response
/// head is needed, so the body download is aborted as soon as it arrives.
async fn fetch_final_url(
    url: &str,
    controller: Option<&web::AbortController>,
) -> anyhow::Result<String> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let init = web::RequestInit::new();
    init.set_method("GET");
    if let Some(c) = controller {
        init.set_signal(Some(&c.signal()));
    }
    let response: web::Response = JsFuture::from(window.fetch_with_str_and_init(url, &init))
        .await
        .map_err(|e| anyhow::anyhow!("fetch rejected: {e:?}"))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("not a Response: {e:?}"))?;
    let final_url = response.url();
    if let Some(c) = controller {
        c.abort();
    }
    if !response.ok() {
        anyhow::bail!("HTTP {} from {final_url}", response.status());
    }
    Ok(final_url)
}

/// Map a rejected `play()` promise onto a track error. `AbortError` means a
/// newer load interrupted this one and is not a failure.
fn classify_play_rejection(e: &JsValue) -> Option<TrackError> {
    let name = e
        .dyn_ref::<web::DomException>()
        .map(|ex| (ex.name(), ex.message()));
    match name {
        Some((name, _)) if name == "NotAllowedError" => Some(TrackError::PlaybackBlocked),
        Some((name, _)) if name == "AbortError" => {
            log::debug!("[player] play() interrupted by a newer load");
            None
        }
        Some((name, message)) => Some(TrackError::FetchFailed(format!("{name}: {message}"))),
        None => Some(TrackError::FetchFailed(format!("{e:?}"))),
    }
}
