use crate::audio::AnalyserTap;
use crate::constants::FPS_LOG_INTERVAL_SEC;
use crate::render;
use instant::Instant;
use sphere_core::{OrbitCamera, RenderLoop, SpectrumSource};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext<'a> {
    pub render_loop: RenderLoop,
    pub gpu: Option<render::GpuState<'a>>,
    pub canvas: web::HtmlCanvasElement,
    pub orbit: Rc<RefCell<OrbitCamera>>,
    // None until the first user gesture builds the audio graph.
    pub tap: Rc<RefCell<Option<AnalyserTap>>>,

    pub last_instant: Instant,
    pub fps_window_sec: f32,
    pub fps_window_frames: u32,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;
        self.track_fps(dt_sec);

        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };
        gpu.resize_if_needed(self.canvas.width(), self.canvas.height());
        let camera = {
            let mut orbit = self.orbit.borrow_mut();
            orbit.update();
            orbit.camera(gpu.aspect())
        };
        gpu.set_camera(&camera);

        let mut tap = self.tap.borrow_mut();
        let source = tap.as_mut().map(|t| t as &mut dyn SpectrumSource);
        self.render_loop.tick(source, gpu);
    }

    fn track_fps(&mut self, dt_sec: f32) {
        self.fps_window_sec += dt_sec;
        self.fps_window_frames += 1;
        if self.fps_window_sec >= FPS_LOG_INTERVAL_SEC {
            log::debug!(
                "[frame] {:.1} fps over {} frames ({} render errors total)",
                self.fps_window_frames as f32 / self.fps_window_sec,
                self.fps_window_frames,
                self.render_loop.render_errors()
            );
            self.fps_window_sec = 0.0;
            self.fps_window_frames = 0;
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("[gpu] WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
