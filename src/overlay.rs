//! Track status, label and HUD visibility.

use crate::constants::*;
use crate::dom;
use sphere_core::TrackError;
use web_sys as web;

#[inline]
pub fn toggle_hud(document: &web::Document) {
    let hidden = dom::is_hidden(document, HUD_ID);
    dom::set_hidden(document, HUD_ID, !hidden);
}

/// Swap the start button for the playback controls once the user has started.
pub fn show_playback_controls(document: &web::Document) {
    dom::set_hidden(document, PLAY_BUTTON_ID, true);
    dom::set_hidden(document, NEXT_BUTTON_ID, false);
}

pub fn show_label(document: &web::Document, label: &str) {
    dom::set_text(document, TRACK_LABEL_ID, label);
}

pub fn show_retry(document: &web::Document, error: &TrackError) {
    let text = match error {
        TrackError::PlaybackBlocked => "Playback was blocked. Press retry to start.".to_string(),
        TrackError::TimedOut => "The track took too long to load.".to_string(),
        TrackError::FetchFailed(_) => "Could not load a track.".to_string(),
    };
    dom::set_text(document, STATUS_ID, &text);
    dom::set_hidden(document, STATUS_ID, false);
    dom::set_hidden(document, RETRY_BUTTON_ID, false);
}

pub fn hide_retry(document: &web::Document) {
    dom::set_text(document, STATUS_ID, "");
    dom::set_hidden(document, STATUS_ID, true);
    dom::set_hidden(document, RETRY_BUTTON_ID, true);
}
