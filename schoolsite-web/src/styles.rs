//! Stylesheet injected at start for states the page CSS does not cover.
use crate::{a11y, dom};

pub const STYLE_ELEMENT_ID: &str = "schoolsite-widget-styles";

const WIDGET_CSS: &str = "
.nav-menu.active{display:flex !important;flex-direction:column;position:absolute;top:100%;left:0;width:100%;background:var(--bg-white);box-shadow:var(--shadow);padding:1rem}
.menu-toggle.active span:nth-child(1){transform:rotate(45deg) translate(5px,5px)}
.menu-toggle.active span:nth-child(2){opacity:0}
.menu-toggle.active span:nth-child(3){transform:rotate(-45deg) translate(7px,-6px)}
.feature-card,.news-card,.quick-link{opacity:0;transform:translateY(30px);transition:opacity .6s ease,transform .6s ease}
.feature-card.animate-in,.news-card.animate-in,.quick-link.animate-in{opacity:1;transform:translateY(0)}
.feature-card:nth-child(2){transition-delay:.1s}
.feature-card:nth-child(3){transition-delay:.2s}
.feature-card:nth-child(4){transition-delay:.3s}
.slide img{transition:transform 10s ease}
.slide.active img{transform:scale(1.1)}
.hero-buttons .btn{margin:0 .5rem}
@media (max-width:768px){.hero-buttons{flex-direction:column;gap:1rem}.hero-buttons .btn{margin:0;width:100%;max-width:250px}}
";

/// Full stylesheet text: focus/screen-reader rules followed by widget states.
#[must_use]
pub fn widget_css() -> String {
    format!("{}\n{WIDGET_CSS}", a11y::visible_focus_css())
}

/// Append the widget stylesheet to `<head>` once.
pub fn inject() {
    let Some(doc) = dom::document() else {
        return;
    };
    if doc.get_element_by_id(STYLE_ELEMENT_ID).is_some() {
        return;
    }
    let (Some(head), Ok(style)) = (doc.head(), doc.create_element("style")) else {
        return;
    };
    style.set_id(STYLE_ELEMENT_ID);
    style.set_text_content(Some(&widget_css()));
    let _ = head.append_child(&style);
}

#[cfg(test)]
mod tests {
    use super::widget_css;

    #[test]
    fn stylesheet_covers_widget_states() {
        let css = widget_css();
        assert!(css.starts_with(":focus"));
        assert!(css.contains(".nav-menu.active"));
        assert!(css.contains(".animate-in"));
        assert!(css.contains(".slide.active img"));
    }
}
