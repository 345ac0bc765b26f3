#![cfg(target_arch = "wasm32")]
use instant::Instant;
use sphere_core::{
    OrbitCamera, ParticleField, RenderLoop, SpectrumMapper, SphereSampler, TrackSession,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod audio;
mod constants;
mod dom;
mod events;
mod frame;
mod overlay;
mod player;
mod render;

use constants::{AUDIO_ID, CANVAS_ID};

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("sphere-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{CANVAS_ID}"))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let audio_el: web::HtmlAudioElement = document
        .get_element_by_id(AUDIO_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{AUDIO_ID}"))?
        .dyn_into::<web::HtmlAudioElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let config = dom::config_from_query(&window);

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    wire_canvas_resize(&canvas);

    let field = ParticleField::new(
        &SphereSampler::new(config.sphere.spiral_k),
        config.sphere.point_count,
        config.sphere.radius,
        SpectrumMapper::new(config.mapper.clone()),
    );
    let render_loop = RenderLoop::new(field, config.spin);

    let player = player::Player::new(
        TrackSession::new(config.track.clone()),
        audio_el.clone(),
        document.clone(),
    );
    player.wire_media_events();

    let tap = Rc::new(RefCell::new(None));
    let controls = events::Controls {
        document: document.clone(),
        audio_el,
        player,
        tap: tap.clone(),
        fft_size: config.fft_size,
    };
    events::wire_buttons(&controls);
    events::wire_keydown(controls);

    let orbit = Rc::new(RefCell::new(OrbitCamera::default()));
    events::wire_orbit_controls(&canvas, orbit.clone());

    // Without WebGPU the page still plays music; only the sphere is missing.
    let gpu = frame::init_gpu(&canvas).await;

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        render_loop,
        gpu,
        canvas,
        orbit,
        tap,
        last_instant: Instant::now(),
        fps_window_sec: 0.0,
        fps_window_frames: 0,
    }));
    frame::start_loop(frame_ctx);

    Ok(())
}
