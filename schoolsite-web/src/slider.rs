//! Hero slider bound to the page markup.
//!
//! Expects `.slide` elements, an empty `.slider-dots` container, optional
//! `.slider-prev` / `.slider-next` buttons and a `.hero` hover area.
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use schoolsite_core::{SlideChange, SliderConfig, SliderController};
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::dom;
use crate::paths::asset_path;
use crate::timers::IntervalHandle;

pub const ACTIVE_CLASS: &str = "active";

pub struct HeroSlider {
    controller: RefCell<SliderController<IntervalHandle>>,
    slides: Vec<Element>,
    dots: Vec<Element>,
}

impl HeroSlider {
    /// Bind to the page and start auto-advancing.
    ///
    /// Returns `None`, leaving the markup untouched, when there are no slides
    /// or no dot container.
    pub fn mount(config: &SliderConfig) -> Option<Rc<Self>> {
        let slides = dom::query_all(".slide");
        if slides.is_empty() {
            log::warn!("hero slider: no .slide elements; staying inert");
            return None;
        }
        let Some(dots_container) = dom::query(".slider-dots") else {
            log::warn!("hero slider: no .slider-dots container; staying inert");
            return None;
        };
        let doc = dom::document()?;

        let mut dots = Vec::with_capacity(slides.len());
        for _ in &slides {
            let dot = doc.create_element("div").ok()?;
            let _ = dot.class_list().add_1("dot");
            let _ = dots_container.append_child(&dot);
            dots.push(dot);
        }

        let slider = Rc::new(Self {
            controller: RefCell::new(SliderController::new(slides.len(), config.interval_ms)),
            slides,
            dots,
        });
        slider.sync_initial();
        slider.wire_controls();
        slider.wire_placeholders(config);
        slider.start_auto_advance();
        Some(slider)
    }

    #[must_use]
    pub fn active_index(&self) -> Option<usize> {
        self.controller.borrow().active_index()
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.controller.borrow().is_running()
    }

    pub fn go_to(&self, index: usize) {
        let change = self.controller.borrow_mut().go_to(index);
        self.render(change);
    }

    pub fn next(&self) {
        let change = self.controller.borrow_mut().next();
        self.render(change);
    }

    pub fn previous(&self) {
        let change = self.controller.borrow_mut().previous();
        self.render(change);
    }

    pub fn start_auto_advance(self: &Rc<Self>) {
        let weak = Rc::downgrade(self);
        self.controller
            .borrow_mut()
            .start_auto_advance(|period| IntervalHandle::start(period, tick(weak)));
    }

    pub fn stop_auto_advance(&self) {
        self.controller.borrow_mut().stop_auto_advance();
    }

    fn render(&self, change: Option<SlideChange>) {
        let Some(SlideChange { from, to }) = change else {
            return;
        };
        for el in [self.slides.get(from), self.dots.get(from)].into_iter().flatten() {
            let _ = el.class_list().remove_1(ACTIVE_CLASS);
        }
        for el in [self.slides.get(to), self.dots.get(to)].into_iter().flatten() {
            let _ = el.class_list().add_1(ACTIVE_CLASS);
        }
    }

    /// Make the markup agree with index 0, whatever classes it shipped with.
    fn sync_initial(&self) {
        for el in self.slides.iter().chain(&self.dots) {
            let _ = el.class_list().remove_1(ACTIVE_CLASS);
        }
        self.render(Some(SlideChange { from: 0, to: 0 }));
    }

    fn wire_controls(self: &Rc<Self>) {
        for (index, dot) in self.dots.iter().enumerate() {
            let weak = Rc::downgrade(self);
            dom::listen(dot, "click", move |_| {
                if let Some(slider) = weak.upgrade() {
                    slider.go_to(index);
                }
            });
        }
        if let Some(prev) = dom::query(".slider-prev") {
            let weak = Rc::downgrade(self);
            dom::listen(&prev, "click", move |_| {
                if let Some(slider) = weak.upgrade() {
                    slider.previous();
                }
            });
        }
        if let Some(next) = dom::query(".slider-next") {
            let weak = Rc::downgrade(self);
            dom::listen(&next, "click", move |_| {
                if let Some(slider) = weak.upgrade() {
                    slider.next();
                }
            });
        }
        if let Some(hero) = dom::query(".hero") {
            let weak = Rc::downgrade(self);
            dom::listen(&hero, "mouseenter", move |_| {
                if let Some(slider) = weak.upgrade() {
                    slider.controller.borrow_mut().pointer_entered();
                }
            });
            let weak = Rc::downgrade(self);
            dom::listen(&hero, "mouseleave", move |_| {
                if let Some(slider) = weak.upgrade() {
                    let tick_target = Rc::downgrade(&slider);
                    slider
                        .controller
                        .borrow_mut()
                        .pointer_left(|period| IntervalHandle::start(period, tick(tick_target)));
                }
            });
        }
    }

    /// Swap broken slide images for the configured placeholder.
    fn wire_placeholders(&self, config: &SliderConfig) {
        let Some(placeholder) = config.placeholder_image.as_deref() else {
            return;
        };
        let src = asset_path(placeholder);
        for slide in &self.slides {
            let Ok(images) = slide.query_selector_all("img") else {
                continue;
            };
            for img in (0..images.length()).filter_map(|i| images.get(i)) {
                let target = img.clone();
                let src = src.clone();
                let alt = config.placeholder_alt.clone();
                dom::listen(&img, "error", move |_| {
                    let Some(el) = target.dyn_ref::<Element>() else {
                        return;
                    };
                    // Only once; a broken placeholder must not loop.
                    if el.get_attribute("src").as_deref() == Some(src.as_str()) {
                        return;
                    }
                    let _ = el.set_attribute("src", &src);
                    let _ = el.set_attribute("alt", &alt);
                });
            }
        }
    }
}

fn tick(slider: Weak<HeroSlider>) -> impl FnMut() + 'static {
    move || {
        if let Some(slider) = slider.upgrade() {
            slider.next();
        }
    }
}
