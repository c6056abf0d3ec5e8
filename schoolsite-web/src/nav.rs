//! Mobile menu, smooth in-page scrolling and scroll-driven nav highlighting.
use std::cell::Cell;
use std::rc::Rc;

use schoolsite_core::nav::{MenuState, SectionBounds, active_section, anchor_target, section_href};
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::dom;

pub const OPEN_CLASS: &str = "active";

/// `#menuToggle` opens and closes `#navMenu`.
pub fn mount_menu_toggle() {
    let (Some(toggle), Some(menu)) = (dom::by_id("menuToggle"), dom::by_id("navMenu")) else {
        log::debug!("nav: no mobile menu on this page");
        return;
    };
    let state = Rc::new(Cell::new(MenuState::default()));
    let button = toggle.clone();
    dom::listen(&toggle, "click", move |_| {
        let mut menu_state = state.get();
        let open = menu_state.toggle();
        state.set(menu_state);
        dom::set_class(&menu, OPEN_CLASS, open);
        dom::set_class(&button, OPEN_CLASS, open);
    });
}

/// In-page `#id` links scroll smoothly to their target instead of jumping.
pub fn mount_smooth_scroll() {
    for anchor in dom::query_all("a[href^=\"#\"]") {
        let link = anchor.clone();
        dom::listen(&anchor, "click", move |event| {
            event.prevent_default();
            let href = link.get_attribute("href").unwrap_or_default();
            let Some(target) = anchor_target(&href).and_then(dom::by_id) else {
                return;
            };
            let options = ScrollIntoViewOptions::new();
            options.set_behavior(ScrollBehavior::Smooth);
            options.set_block(ScrollLogicalPosition::Start);
            target.scroll_into_view_with_scroll_into_view_options(&options);
        });
    }
}

/// Mark the `.nav-link` pointing at the section currently scrolled into.
pub fn mount_scroll_highlight(offset: i32) {
    let Some(win) = dom::window() else {
        return;
    };
    let sections = dom::query_all("section");
    let links = dom::query_all(".nav-link");
    if links.is_empty() {
        return;
    }
    dom::listen(&win, "scroll", move |_| {
        let scroll_y = dom::window()
            .and_then(|w| w.scroll_y().ok())
            .unwrap_or_default();
        let bounds: Vec<SectionBounds> = sections
            .iter()
            .filter_map(|s| s.dyn_ref::<HtmlElement>())
            .map(|s| SectionBounds::new(s.id(), s.offset_top()))
            .collect();
        #[allow(clippy::cast_possible_truncation)]
        let current = active_section(scroll_y as i32, &bounds, offset).map(section_href);
        for link in &links {
            let is_current =
                current.is_some() && link.get_attribute("href").as_deref() == current.as_deref();
            dom::set_class(link, OPEN_CLASS, is_current);
        }
    });
}
