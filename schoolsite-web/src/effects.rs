//! Viewport-triggered effects: reveal-on-scroll and count-up counters.
use js_sys::Array;
use schoolsite_core::counter::{CounterAnimation, parse_target};
use schoolsite_core::{CounterConfig, RevealConfig};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::{dom, timers};

pub const REVEAL_SELECTOR: &str = ".feature-card, .news-card, .quick-link";
pub const REVEAL_CLASS: &str = "animate-in";
pub const COUNTER_SELECTOR: &str = "[data-target]";

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// Add `animate-in` to cards as they scroll into view.
pub fn observe_reveal(config: &RevealConfig) {
    let targets = dom::query_all(REVEAL_SELECTOR);
    if targets.is_empty() {
        return;
    }
    let callback: ObserverCallback = Closure::new(move |entries: Array, _: IntersectionObserver| {
        for entry in intersecting(&entries) {
            let _ = entry.target().class_list().add_1(REVEAL_CLASS);
        }
    });
    observe_all(callback, config, &targets);
}

/// Count `[data-target]` elements up to their target once, the first time
/// each becomes visible.
pub fn observe_counters(reveal: &RevealConfig, counter: &CounterConfig) {
    let targets = dom::query_all(COUNTER_SELECTOR);
    if targets.is_empty() {
        return;
    }
    let (duration_ms, frame_ms) = (counter.duration_ms, counter.frame_ms);
    let callback: ObserverCallback =
        Closure::new(move |entries: Array, observer: IntersectionObserver| {
            for entry in intersecting(&entries) {
                let el = entry.target();
                let target = parse_target(el.get_attribute("data-target").as_deref());
                animate_counter(el.clone(), CounterAnimation::new(target, duration_ms, frame_ms), frame_ms);
                observer.unobserve(&el);
            }
        });
    observe_all(callback, reveal, &targets);
}

fn animate_counter(el: Element, mut animation: CounterAnimation, frame_ms: u32) {
    timers::repeat_until(frame_ms, move || {
        let frame = animation.step();
        el.set_text_content(Some(&frame.value.to_string()));
        frame.done
    });
}

fn intersecting(entries: &Array) -> Vec<IntersectionObserverEntry> {
    entries
        .iter()
        .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
        .filter(IntersectionObserverEntry::is_intersecting)
        .collect()
}

fn observe_all(callback: ObserverCallback, config: &RevealConfig, targets: &[Element]) {
    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(config.threshold));
    init.set_root_margin(&config.root_margin);
    match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
        Ok(observer) => {
            for target in targets {
                observer.observe(target);
            }
            // Observers live as long as the page.
            callback.forget();
        }
        Err(err) => dom::console_error(&format!(
            "IntersectionObserver unavailable: {}",
            dom::js_error_message(&err)
        )),
    }
}
