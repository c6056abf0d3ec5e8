#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod a11y;
pub mod components;
pub mod dom;
pub mod effects;
pub mod nav;
pub mod paths;
pub mod slider;
pub mod storage;
pub mod styles;
pub mod timers;

/// Id of the element the accessibility panel renders into.
pub const PANEL_HOST_ID: &str = "accessibility-root";

#[cfg(target_arch = "wasm32")]
thread_local! {
    static HERO: std::cell::RefCell<Option<std::rc::Rc<slider::HeroSlider>>> =
        const { std::cell::RefCell::new(None) };
}

/// The mounted hero slider, if the page has one.
#[cfg(target_arch = "wasm32")]
#[must_use]
pub fn hero_slider() -> Option<std::rc::Rc<slider::HeroSlider>> {
    HERO.with(|hero| hero.borrow().clone())
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    let config = schoolsite_core::WidgetConfig::load_from_static();

    styles::inject();
    a11y::insert_skip_link();
    a11y::enhance_aria();

    nav::mount_menu_toggle();
    nav::mount_smooth_scroll();
    nav::mount_scroll_highlight(config.nav.scroll_offset_px);
    effects::observe_reveal(&config.reveal);
    effects::observe_counters(&config.reveal, &config.counter);

    // Widgets hold only weak references to the slider; keep it alive here.
    let hero = slider::HeroSlider::mount(&config.slider);
    HERO.with(|slot| *slot.borrow_mut() = hero);

    let Some(host) = panel_host() else {
        dom::console_error("accessibility panel: no <body> to render into");
        return;
    };
    let props = components::accessibility_panel::Props {
        storage_key: config.accessibility.storage_key.into(),
        guard_editable: config.accessibility.guard_editable_targets,
    };
    yew::Renderer::<components::accessibility_panel::AccessibilityPanel>::with_root_and_props(
        host, props,
    )
    .render();
}

/// Existing `#accessibility-root`, or a new one appended to `<body>`.
#[cfg(target_arch = "wasm32")]
fn panel_host() -> Option<web_sys::Element> {
    if let Some(host) = dom::by_id(PANEL_HOST_ID) {
        return Some(host);
    }
    let doc = dom::document()?;
    let host = doc.create_element("div").ok()?;
    host.set_id(PANEL_HOST_ID);
    dom::body()?.append_child(&host).ok()?;
    Some(host)
}
