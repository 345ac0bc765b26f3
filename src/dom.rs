use sphere_core::AppConfig;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    } else {
        log::warn!("[dom] missing #{element_id}");
    }
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

#[inline]
pub fn set_text(document: &web::Document, element_id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(element_id) {
        el.set_text_content(Some(text));
    }
}

pub fn set_hidden(document: &web::Document, element_id: &str, hidden: bool) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let cl = el.class_list();
        _ = if hidden {
            cl.add_1("hidden")
        } else {
            cl.remove_1("hidden")
        };
    }
}

#[inline]
pub fn is_hidden(document: &web::Document, element_id: &str) -> bool {
    document
        .get_element_by_id(element_id)
        .map(|el| el.class_list().contains("hidden"))
        .unwrap_or(false)
}

/// Build the startup config from compiled-in defaults plus any recognised
/// query parameters, e.g. `?points=8000&gain=1.2`.
pub fn config_from_query(window: &web::Window) -> AppConfig {
    let mut config = AppConfig::default();
    let search = window.location().search().unwrap_or_default();
    if search.is_empty() {
        return config;
    }
    let params = match web::UrlSearchParams::new_with_str(&search) {
        Ok(p) => p,
        Err(e) => {
            log::warn!("[config] unreadable query {search:?}: {e:?}");
            return config;
        }
    };
    let pairs: Vec<(&str, String)> = AppConfig::OVERRIDE_KEYS
        .iter()
        .filter_map(|key| params.get(key).map(|v| (*key, v)))
        .collect();
    config.apply_overrides(pairs.iter().map(|(k, v)| (*k, v.as_str())));
    config
}
