// Accessibility helpers
use schoolsite_core::aria;
use schoolsite_core::{ClassList, Mode, apply_mode};
use web_sys::DomTokenList;

use crate::dom;

/// Get CSS for visible focus indicators and screen reader utilities
///
/// Returns critical accessibility CSS that should be injected early in the page load.
/// Includes focus ring styles, the skip link and screen reader helper classes.
#[must_use]
pub const fn visible_focus_css() -> &'static str {
    ":focus{outline:3px solid #4f46e5;outline-offset:2px} .sr-only{position:absolute;width:1px;height:1px;margin:-1px;overflow:hidden;clip:rect(0 0 0 0);white-space:nowrap;} .skip-link{position:absolute;left:-9999px} .skip-link:focus{left:1rem;top:1rem;z-index:1000}"
}

/// Element id of the polite live region rendered by the accessibility panel.
pub const STATUS_REGION_ID: &str = "a11y-status";

/// Update the live region status for screen readers
///
/// Updates the text content of the status region if present.
/// This provides announcements to assistive technology users.
pub fn set_status(msg: &str) {
    if let Some(node) = dom::document().and_then(|doc| doc.get_element_by_id(STATUS_REGION_ID)) {
        node.set_text_content(Some(msg));
    }
}

/// `ClassList` over the `<html>` element's `classList`.
pub struct RootClasses(DomTokenList);

impl RootClasses {
    #[must_use]
    pub fn current() -> Option<Self> {
        dom::root_element().map(|el| Self(el.class_list()))
    }
}

impl ClassList for RootClasses {
    fn add(&mut self, class: &str) {
        let _ = self.0.add_1(class);
    }

    fn remove(&mut self, class: &str) {
        let _ = self.0.remove_1(class);
    }

    fn contains(&self, class: &str) -> bool {
        self.0.contains(class)
    }
}

/// Project `mode` onto the document root and announce it.
pub fn project_mode(mode: Option<Mode>) {
    let Some(mut root) = RootClasses::current() else {
        return;
    };
    apply_mode(&mut root, mode);
    set_status(mode.map_or(aria::RESET_LABEL, Mode::label));
}

/// Prepend the skip link and its `#main-content` target to `<body>`.
pub fn insert_skip_link() {
    let (Some(doc), Some(body)) = (dom::document(), dom::body()) else {
        return;
    };
    if doc.get_element_by_id(aria::MAIN_CONTENT_ID).is_some() {
        return;
    }
    if let Ok(link) = doc.create_element("a") {
        let _ = link.set_attribute("href", &format!("#{}", aria::MAIN_CONTENT_ID));
        link.set_class_name("skip-link");
        link.set_text_content(Some(aria::SKIP_LINK_TEXT));
        let _ = body.prepend_with_node_1(&link);
    }
    if let Ok(anchor) = doc.create_element("div") {
        anchor.set_id(aria::MAIN_CONTENT_ID);
        let _ = anchor.set_attribute("style", "position: absolute; top: -100px;");
        let _ = body.prepend_with_node_1(&anchor);
    }
}

/// Fill in landmark roles, nav labels, button roles and missing image `alt` text.
pub fn enhance_aria() {
    if dom::query("main[role=\"main\"]").is_none()
        && let Some(main) = dom::query("main")
    {
        let _ = main.set_attribute("role", aria::ROLE_MAIN);
        let _ = main.set_attribute("aria-label", aria::MAIN_LABEL);
    }

    for (index, nav) in dom::query_all("nav").iter().enumerate() {
        let _ = nav.set_attribute("role", aria::ROLE_NAVIGATION);
        let _ = nav.set_attribute("aria-label", &aria::nav_label(index));
    }

    if let Some(header) = dom::query("header") {
        let _ = header.set_attribute("role", aria::ROLE_BANNER);
    }
    if let Some(footer) = dom::query("footer") {
        let _ = footer.set_attribute("role", aria::ROLE_CONTENT_INFO);
    }

    for button in dom::query_all("button, [role=\"button\"]") {
        if button.get_attribute("role").is_none() {
            let _ = button.set_attribute("role", aria::ROLE_BUTTON);
        }
    }

    for img in dom::query_all("img:not([alt])") {
        let src = img.get_attribute("src").unwrap_or_default();
        let _ = img.set_attribute("alt", &aria::image_alt(&src));
    }
}
