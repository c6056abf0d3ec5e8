#![cfg(target_arch = "wasm32")]
use std::cell::Cell;
use std::rc::Rc;

use schoolsite_core::{ClassList, Mode, PreferenceStore, SliderConfig};
use schoolsite_web::a11y::{self, RootClasses};
use schoolsite_web::components::accessibility_panel::{AccessibilityPanel, Props};
use schoolsite_web::dom;
use schoolsite_web::slider::HeroSlider;
use schoolsite_web::storage::LocalPreferenceStore;
use schoolsite_web::timers::IntervalHandle;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{HtmlElement, KeyboardEvent, KeyboardEventInit};
use yew::{AttrValue, Renderer};

wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

const KEY: &str = "accessibilitySettingsTest";

fn reset_body(markup: &str) {
    let body = dom::body().expect("document body");
    body.set_inner_html(markup);
    if let Some(root) = dom::root_element() {
        root.set_class_name("");
    }
}

async fn next_tick(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        dom::window()
            .expect("window")
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .expect("setTimeout");
    });
    JsFuture::from(promise).await.expect("timer resolves");
}

fn slider_markup(count: usize) -> String {
    let slides: String = (0..count)
        .map(|i| format!("<div class=\"slide\"><img src=\"/slide-{i}.jpg\" alt=\"\"></div>"))
        .collect();
    format!(
        "<section class=\"hero\">{slides}<button class=\"slider-prev\"></button>\
         <button class=\"slider-next\"></button><div class=\"slider-dots\"></div></section>"
    )
}

fn active_flags(selector: &str) -> Vec<bool> {
    dom::query_all(selector)
        .iter()
        .map(|el| el.class_list().contains("active"))
        .collect()
}

fn click(selector: &str) {
    dom::query(selector)
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        .expect("clickable element")
        .click();
}

#[wasm_bindgen_test]
fn slider_creates_one_dot_per_slide_and_marks_first() {
    reset_body(&slider_markup(3));
    let slider = HeroSlider::mount(&SliderConfig::default()).expect("slider mounts");
    assert_eq!(dom::query_all(".slider-dots .dot").len(), 3);
    assert_eq!(active_flags(".slide"), vec![true, false, false]);
    assert_eq!(active_flags(".dot"), vec![true, false, false]);
    assert!(slider.is_running());
}

#[wasm_bindgen_test]
fn slider_buttons_and_dots_move_exactly_one_active_slide() {
    reset_body(&slider_markup(4));
    let slider = HeroSlider::mount(&SliderConfig::default()).expect("slider mounts");
    click(".slider-prev");
    assert_eq!(slider.active_index(), Some(3));
    assert_eq!(active_flags(".slide"), vec![false, false, false, true]);
    click(".slider-next");
    assert_eq!(active_flags(".slide"), vec![true, false, false, false]);

    let dots = dom::query_all(".dot");
    dots[2].dyn_ref::<HtmlElement>().expect("dot").click();
    assert_eq!(active_flags(".slide"), vec![false, false, true, false]);
    assert_eq!(active_flags(".dot"), vec![false, false, true, false]);
}

#[wasm_bindgen_test]
fn slider_without_slides_stays_inert() {
    reset_body("<section class=\"hero\"><div class=\"slider-dots\"></div></section>");
    assert!(HeroSlider::mount(&SliderConfig::default()).is_none());
    assert!(dom::query_all(".dot").is_empty());
}

#[wasm_bindgen_test]
fn hover_pauses_and_resumes_auto_advance() {
    reset_body(&slider_markup(2));
    let slider = HeroSlider::mount(&SliderConfig::default()).expect("slider mounts");
    let hero = dom::query(".hero").expect("hero");
    hero.dispatch_event(&web_sys::Event::new("mouseenter").expect("event"))
        .expect("dispatch");
    assert!(!slider.is_running());
    hero.dispatch_event(&web_sys::Event::new("mouseleave").expect("event"))
        .expect("dispatch");
    assert!(slider.is_running());
    slider.stop_auto_advance();
}

#[wasm_bindgen_test]
async fn interval_handle_stops_firing_once_dropped() {
    let fired = Rc::new(Cell::new(0));
    let handle = {
        let fired = fired.clone();
        IntervalHandle::start(10, move || fired.set(fired.get() + 1))
    };
    assert!(handle.is_scheduled());
    next_tick(35).await;
    drop(handle);
    let seen = fired.get();
    assert!(seen >= 1);
    next_tick(35).await;
    assert_eq!(fired.get(), seen);
}

#[wasm_bindgen_test]
fn local_store_round_trips_records() {
    let store = LocalPreferenceStore;
    store
        .write(KEY, r#"{"isActive":true,"mode":"grayscale"}"#)
        .expect("write");
    assert_eq!(
        store.read(KEY).expect("read").as_deref(),
        Some(r#"{"isActive":true,"mode":"grayscale"}"#)
    );
    dom::local_storage().expect("storage").remove_item(KEY).expect("remove");
    assert_eq!(store.read(KEY).expect("read"), None);
}

#[wasm_bindgen_test]
fn projecting_a_mode_replaces_the_previous_one() {
    reset_body("");
    a11y::project_mode(Some(Mode::HighContrast));
    a11y::project_mode(Some(Mode::Grayscale));
    let root = RootClasses::current().expect("root classes");
    assert!(root.contains("grayscale"));
    assert!(!root.contains("high-contrast"));
    assert!(root.contains("accessibility-version"));
    a11y::project_mode(None);
    let root = RootClasses::current().expect("root classes");
    assert!(!root.contains("grayscale"));
    assert!(!root.contains("accessibility-version"));
}

async fn render_panel() -> web_sys::Element {
    reset_body("<div id=\"panel-host\"></div><input id=\"field\">");
    let host = dom::by_id("panel-host").expect("host");
    let props = Props {
        storage_key: AttrValue::from(KEY),
        guard_editable: true,
    };
    Renderer::<AccessibilityPanel>::with_root_and_props(host.clone(), props).render();
    next_tick(20).await;
    host
}

fn alt_key(key: &str) -> KeyboardEvent {
    let init = KeyboardEventInit::new();
    init.set_key(key);
    init.set_alt_key(true);
    init.set_bubbles(true);
    KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).expect("keyboard event")
}

#[wasm_bindgen_test]
async fn choosing_an_option_projects_persists_and_hides() {
    let _ = dom::local_storage().expect("storage").remove_item(KEY);
    let _host = render_panel().await;
    click(".accessibility-toggle");
    next_tick(20).await;
    assert!(!dom::query(".accessibility-panel").expect("panel").has_attribute("hidden"));

    click(".accessibility-option[data-mode=\"large-text\"]");
    next_tick(20).await;
    let root = dom::root_element().expect("html");
    assert!(root.class_list().contains("large-text"));
    assert!(root.class_list().contains("accessibility-version"));
    assert!(dom::query(".accessibility-panel").expect("panel").has_attribute("hidden"));
    assert_eq!(
        LocalPreferenceStore.read(KEY).expect("read").as_deref(),
        Some(r#"{"isActive":true,"mode":"large-text"}"#)
    );

    click(".accessibility-reset");
    next_tick(20).await;
    assert!(!root.class_list().contains("large-text"));
    assert!(!root.class_list().contains("accessibility-version"));
}

#[wasm_bindgen_test]
async fn alt_shortcuts_drive_the_panel_but_not_from_text_fields() {
    let _ = dom::local_storage().expect("storage").remove_item(KEY);
    let _host = render_panel().await;
    let doc = dom::document().expect("document");
    let root = dom::root_element().expect("html");

    dom::by_id("field")
        .expect("field")
        .dispatch_event(&alt_key("2"))
        .expect("dispatch");
    next_tick(20).await;
    assert!(!root.class_list().contains("high-contrast"));

    doc.dispatch_event(&alt_key("2")).expect("dispatch");
    next_tick(20).await;
    assert!(root.class_list().contains("high-contrast"));

    doc.dispatch_event(&alt_key("0")).expect("dispatch");
    next_tick(20).await;
    assert!(!root.class_list().contains("high-contrast"));
}
