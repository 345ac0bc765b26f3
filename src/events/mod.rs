mod keyboard;
mod pointer;

pub use keyboard::wire_keydown;
pub use pointer::wire_orbit_controls;

use crate::audio::AnalyserTap;
use crate::constants::*;
use crate::dom;
use crate::overlay;
use crate::player::Player;
use sphere_core::{KeyAction, TrackEvent};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Everything a user gesture may touch: the player, the lazily built
/// analyser and the overlay.
#[derive(Clone)]
pub struct Controls {
    pub document: web::Document,
    pub audio_el: web::HtmlAudioElement,
    pub player: Player,
    pub tap: Rc<RefCell<Option<AnalyserTap>>>,
    pub fft_size: u32,
}

impl Controls {
    pub fn trigger(&self, action: KeyAction) {
        match action {
            KeyAction::Start => {
                self.ensure_audio_graph();
                overlay::show_playback_controls(&self.document);
                self.player.dispatch(TrackEvent::StartRequested);
            }
            KeyAction::Next => {
                self.ensure_audio_graph();
                self.player.dispatch(TrackEvent::NextRequested);
            }
            KeyAction::ToggleHud => overlay::toggle_hud(&self.document),
        }
    }

    // Must run inside a gesture handler so the new context is allowed to start.
    fn ensure_audio_graph(&self) {
        let mut tap = self.tap.borrow_mut();
        if let Some(t) = tap.as_ref() {
            t.resume();
            return;
        }
        match AnalyserTap::new(&self.audio_el, self.fft_size) {
            Ok(t) => {
                t.resume();
                *tap = Some(t);
            }
            // The sphere keeps spinning at rest; playback still works.
            Err(e) => log::warn!("[audio] {e}"),
        }
    }
}

pub fn wire_buttons(controls: &Controls) {
    let doc = controls.document.clone();
    for (id, action) in [
        (PLAY_BUTTON_ID, KeyAction::Start),
        (RETRY_BUTTON_ID, KeyAction::Start),
        (NEXT_BUTTON_ID, KeyAction::Next),
    ] {
        let c = controls.clone();
        dom::add_click_listener(&doc, id, move || c.trigger(action));
    }
}
