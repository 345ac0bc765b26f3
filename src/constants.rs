//! Visual and DOM constants for the web front-end.
//!
//! Behavioural defaults (point count, gains, retry policy) live in
//! `sphere_core::constants`; this module only holds what the browser side needs.

// Element ids
pub const CANVAS_ID: &str = "app-canvas";
pub const AUDIO_ID: &str = "audio";
pub const PLAY_BUTTON_ID: &str = "play";
pub const NEXT_BUTTON_ID: &str = "next";
pub const RETRY_BUTTON_ID: &str = "retry";
pub const STATUS_ID: &str = "status";
pub const TRACK_LABEL_ID: &str = "track-label";
pub const HUD_ID: &str = "hud";

// Point sprites
pub const SPRITE_SIZE: f32 = 4.0; // world units across
pub const SPRITE_FALLOFF: f32 = 1.6; // exponent of the radial alpha falloff
pub const INITIAL_INSTANCE_CAPACITY: usize = 4096;

// Background behind the sphere
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

// Wheel events in line/page mode are scaled to roughly pixel units
pub const WHEEL_LINE_PX: f32 = 16.0;
pub const WHEEL_PAGE_PX: f32 = 400.0;

// How often the frame loop reports its frame rate (seconds)
pub const FPS_LOG_INTERVAL_SEC: f32 = 10.0;
