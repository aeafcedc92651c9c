use console_error_panic_hook::set_once;
use content::{AchievementFilter, Content, ContentDocument};
use gloo_net::http::Request;
use scene::config::GlobeConfig;
use scene::selection::Transition;
use serde::Serialize;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

pub mod app;
pub mod orbit;
pub mod page;
mod wgpu;

use app::GlobeViewer;
use page::{ContactField, Notice, PageState};
use wgpu::WgpuSurface;

struct ViewerState {
    viewer: Option<GlobeViewer<WgpuSurface>>,
    content: Content,
    page: PageState,
    notice: Option<Notice>,
    mounts: u64,
}

thread_local! {
    static STATE: RefCell<ViewerState> = RefCell::new(ViewerState {
        viewer: None,
        content: Content::default(),
        page: PageState::default(),
        notice: None,
        mounts: 0,
    });
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(js_err)
}

fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

fn with_viewer<R>(default: R, f: impl FnOnce(&mut GlobeViewer<WgpuSurface>) -> R) -> R {
    STATE.with(|state| match state.borrow_mut().viewer.as_mut() {
        Some(viewer) => f(viewer),
        None => default,
    })
}

fn changed(t: Transition) -> bool {
    t != Transition::Unchanged
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

/// Builds the globe from the built-in content and starts bringing up the
/// canvas surface. `config_json` overrides the globe settings; omitted
/// fields keep their defaults. If the surface cannot be created the viewer
/// switches to the location list; the host learns about it from
/// `drain_events`.
#[wasm_bindgen]
pub fn mount(canvas_id: String, config_json: Option<String>) -> Result<(), JsValue> {
    let content = Content::builtin().map_err(js_err)?;
    let cfg = match config_json.as_deref() {
        Some(json) => GlobeConfig::from_json_str(json).map_err(js_err)?,
        None => GlobeConfig::default(),
    };
    let mount_id = STATE.with(|state| {
        let mut s = state.borrow_mut();
        s.mounts += 1;
        let mount_id = s.mounts;
        s.viewer = Some(GlobeViewer::new(content.locations.clone(), cfg).with_mount_id(mount_id));
        s.content = content;
        mount_id
    });

    spawn_local(async move {
        let result = WgpuSurface::from_canvas_id(&canvas_id).await;
        if let Err(err) = &result {
            log(&format!("wgpu init error: {err}"));
        }
        with_viewer((), |viewer| {
            viewer.finish_surface_init(mount_id, result);
        });
    });
    Ok(())
}

/// Fetches a content document once and replaces the built-in content.
#[wasm_bindgen]
pub fn load_content(url: String) {
    spawn_local(async move {
        let content = match fetch_content(&url).await {
            Ok(c) => c,
            Err(err) => {
                log(&format!("Failed to fetch content: {:?}", err));
                return;
            }
        };
        STATE.with(|state| {
            let mut s = state.borrow_mut();
            if let Some(viewer) = s.viewer.as_mut() {
                viewer.replace_locations(content.locations.clone());
            }
            s.page.achievements.close_details();
            s.content = content;
        });
    });
}

async fn fetch_content(url: &str) -> Result<Content, JsValue> {
    let resp = Request::get(url).send().await.map_err(js_err)?;
    let text = resp.text().await.map_err(js_err)?;
    let doc: ContentDocument = serde_json::from_str(&text).map_err(js_err)?;
    Content::from_document(doc).map_err(js_err)
}

#[wasm_bindgen]
pub fn set_canvas_sizes(width: f64, height: f64) {
    with_viewer((), |v| v.set_canvas_size(width, height));
}

#[wasm_bindgen]
pub fn pointer_down(x_px: f64, y_px: f64) {
    with_viewer((), |v| v.pointer_down(x_px, y_px));
}

/// Returns `true` when the hovered marker changed.
#[wasm_bindgen]
pub fn pointer_move(x_px: f64, y_px: f64) -> bool {
    with_viewer(false, |v| v.pointer_move(x_px, y_px))
}

/// Returns `true` when the release selected a location.
#[wasm_bindgen]
pub fn pointer_up(x_px: f64, y_px: f64) -> bool {
    with_viewer(false, |v| changed(v.pointer_up(x_px, y_px)))
}

#[wasm_bindgen]
pub fn pointer_leave() -> bool {
    with_viewer(false, |v| v.pointer_leave())
}

#[wasm_bindgen]
pub fn wheel(delta_y: f64) {
    with_viewer((), |v| v.wheel(delta_y));
}

/// Advances the globe and the page by one display refresh.
///
/// Returns `false` once the globe is unmounted; the host should stop its
/// animation callback.
#[wasm_bindgen]
pub fn advance_frame(dt_s: f64) -> bool {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        if let Some(notice) = s.page.contact.advance(dt_s) {
            s.notice = Some(notice);
        }
        s.viewer.as_mut().is_some_and(|v| v.advance_frame(dt_s))
    })
}

/// Selects a location by name, as the fallback list does.
#[wasm_bindgen]
pub fn select_location(name: &str) -> bool {
    with_viewer(false, |v| changed(v.select_location(name)))
}

#[wasm_bindgen]
pub fn close_overlay() -> bool {
    with_viewer(false, |v| changed(v.close_overlay()))
}

#[wasm_bindgen]
pub fn view_state() -> Result<String, JsValue> {
    STATE.with(|state| match state.borrow().viewer.as_ref() {
        Some(v) => to_json(&v.snapshot()),
        None => Ok("null".to_string()),
    })
}

#[wasm_bindgen]
pub fn drain_events() -> Result<String, JsValue> {
    let events = with_viewer(Vec::new(), |v| v.drain_events());
    to_json(&events)
}

/// Releases the rendering context. Later frame calls report "stopped".
#[wasm_bindgen]
pub fn unmount() {
    with_viewer((), |v| v.unmount());
}

#[wasm_bindgen]
pub fn on_scroll(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> Result<String, JsValue> {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        s.page.scroll = page::ScrollProgress::from_scroll(scroll_y, scroll_height, viewport_height);
        s.page.nav.on_scroll(scroll_y);
        to_json(&(s.page.scroll, s.page.nav))
    })
}

/// Returns `true` for dark mode.
#[wasm_bindgen]
pub fn toggle_theme() -> bool {
    STATE.with(|state| state.borrow_mut().page.nav.toggle_theme() == page::Theme::Dark)
}

#[wasm_bindgen]
pub fn toggle_mobile_menu() -> bool {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        s.page.nav.toggle_mobile_menu();
        s.page.nav.mobile_menu_open
    })
}

#[wasm_bindgen]
pub fn section_chosen() {
    STATE.with(|state| state.borrow_mut().page.nav.section_chosen());
}

#[wasm_bindgen]
pub fn set_contact_field(field: &str, value: &str) -> Result<(), JsValue> {
    let field = ContactField::from_name(field)
        .ok_or_else(|| JsValue::from_str(&format!("unknown contact field {field:?}")))?;
    STATE.with(|state| state.borrow_mut().page.contact.set_field(field, value));
    Ok(())
}

/// Starts the simulated submission; validation errors come back as the
/// rejection message.
#[wasm_bindgen]
pub fn submit_contact() -> Result<(), JsValue> {
    STATE.with(|state| state.borrow_mut().page.contact.submit().map_err(js_err))
}

/// Success notice from a completed submission, once.
#[wasm_bindgen]
pub fn take_notice() -> Result<String, JsValue> {
    STATE.with(|state| to_json(&state.borrow_mut().notice.take()))
}

#[wasm_bindgen]
pub fn set_achievement_filter(label: &str) -> Result<(), JsValue> {
    let filter = AchievementFilter::from_label(label)
        .ok_or_else(|| JsValue::from_str(&format!("unknown category {label:?}")))?;
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        s.page.achievements.set_filter(filter);
        s.page.achievements.close_details();
    });
    Ok(())
}

#[wasm_bindgen]
pub fn open_achievement(position: usize) -> bool {
    STATE.with(|state| {
        let mut s = state.borrow_mut();
        let ViewerState { content, page, .. } = &mut *s;
        page.achievements.open_details(&content.achievements, position)
    })
}

#[wasm_bindgen]
pub fn close_achievement() {
    STATE.with(|state| state.borrow_mut().page.achievements.close_details());
}

#[wasm_bindgen]
pub fn page_state() -> Result<String, JsValue> {
    #[derive(Serialize)]
    struct PageSnapshot<'a> {
        scroll: page::ScrollProgress,
        nav: page::NavState,
        contact: &'a page::ContactForm,
        submitting: bool,
        achievements: page::AchievementsSnapshot<'a>,
        highlights: &'a [content::TravelHighlight],
    }

    STATE.with(|state| {
        let s = state.borrow();
        to_json(&PageSnapshot {
            scroll: s.page.scroll,
            nav: s.page.nav,
            contact: &s.page.contact,
            submitting: s.page.contact.is_submitting(),
            achievements: s.page.achievements.snapshot(&s.content.achievements),
            highlights: &s.content.highlights,
        })
    })
}
