use std::cell::RefCell;
use std::rc::Rc;

use schoolsite_core::aria;
use schoolsite_core::shortcuts::{self, KeyChord, Shortcut};
use schoolsite_core::{
    AccessibilityController, AccessibilitySnapshot, ClickTarget, DEFAULT_STORAGE_KEY, Mode,
};
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlElement, KeyboardEvent, Node};
use yew::prelude::*;

use crate::a11y;
use crate::dom::{self, Listener};
use crate::storage::LocalPreferenceStore;

type Controller = AccessibilityController<LocalPreferenceStore>;
type SharedController = Rc<RefCell<Controller>>;

#[derive(Properties, PartialEq, Clone)]
pub struct Props {
    #[prop_or(AttrValue::from(DEFAULT_STORAGE_KEY))]
    pub storage_key: AttrValue,
    /// Ignore shortcuts typed into form fields.
    #[prop_or(true)]
    pub guard_editable: bool,
}

#[function_component(AccessibilityPanel)]
pub fn accessibility_panel(p: &Props) -> Html {
    let controller: SharedController = use_mut_ref({
        let key = p.storage_key.to_string();
        move || Controller::new(LocalPreferenceStore, key)
    });
    let snapshot = use_state(AccessibilitySnapshot::default);
    let panel_ref = use_node_ref();
    let toggle_ref = use_node_ref();

    {
        let controller = controller.clone();
        let setter = snapshot.setter();
        use_effect_with((), move |_| {
            let restored = controller.borrow_mut().restore();
            if restored.mode.is_some() {
                a11y::project_mode(restored.mode);
            }
            setter.set(restored);
            || ()
        });
    }

    {
        let controller = controller.clone();
        let setter = snapshot.setter();
        let panel_ref = panel_ref.clone();
        let toggle_ref = toggle_ref.clone();
        use_effect_with(p.guard_editable, move |guard| {
            let listeners = document_listeners(&controller, &setter, &panel_ref, &toggle_ref, *guard);
            move || drop(listeners)
        });
    }

    let on_toggle = {
        let controller = controller.clone();
        let setter = snapshot.setter();
        Callback::from(move |_: MouseEvent| {
            let mut ctrl = controller.borrow_mut();
            ctrl.toggle_panel();
            setter.set(ctrl.snapshot());
        })
    };

    let on_reset = {
        let controller = controller.clone();
        let setter = snapshot.setter();
        Callback::from(move |_: MouseEvent| {
            let next = controller.borrow_mut().reset();
            commit(&setter, next);
        })
    };

    let current = *snapshot;
    let options = Mode::ALL.into_iter().map(|mode| {
        let controller = controller.clone();
        let setter = snapshot.setter();
        let onclick = Callback::from(move |_: MouseEvent| {
            let next = controller.borrow_mut().set_mode(mode);
            commit(&setter, next);
        });
        let selected = current.is_selected(mode);
        let class = classes!("accessibility-option", selected.then_some("active"));
        html! {
            <button type="button" {class} data-mode={mode.class_name()}
                aria-pressed={selected.to_string()} {onclick}>
                <i class={mode.icon()} aria-hidden="true"></i>
                <span>{ mode.label() }</span>
            </button>
        }
    });

    let visible = current.panel.is_visible();
    html! {
        <div class="accessibility-widget">
            <button type="button" class="accessibility-toggle" ref={toggle_ref}
                aria-label={aria::PANEL_LABEL} aria-controls="accessibility-panel"
                aria-expanded={visible.to_string()} onclick={on_toggle}>
                <i class="fas fa-universal-access" aria-hidden="true"></i>
            </button>
            <div id="accessibility-panel" class="accessibility-panel" ref={panel_ref}
                role="dialog" aria-label={aria::PANEL_LABEL} hidden={!visible}>
                { for options }
                <button type="button" class="accessibility-option accessibility-reset"
                    onclick={on_reset}>
                    <i class="fas fa-undo" aria-hidden="true"></i>
                    <span>{ aria::RESET_LABEL }</span>
                </button>
            </div>
            <div id={a11y::STATUS_REGION_ID} class="sr-only" aria-live="polite"></div>
        </div>
    }
}

/// Record a mode change and project it onto `<html>`.
fn commit(setter: &UseStateSetter<AccessibilitySnapshot>, next: AccessibilitySnapshot) {
    a11y::project_mode(next.mode);
    setter.set(next);
}

/// Outside-click dismissal and Alt+digit shortcuts, both on `document`.
fn document_listeners(
    controller: &SharedController,
    setter: &UseStateSetter<AccessibilitySnapshot>,
    panel_ref: &NodeRef,
    toggle_ref: &NodeRef,
    guard_editable: bool,
) -> Vec<Listener> {
    let Some(doc) = dom::document() else {
        return Vec::new();
    };

    let click = {
        let controller = controller.clone();
        let setter = setter.clone();
        let panel_ref = panel_ref.clone();
        let toggle_ref = toggle_ref.clone();
        Listener::new(&doc, "click", move |event: Event| {
            let target = event.target().and_then(|t| t.dyn_into::<Node>().ok());
            let within = |node: &NodeRef| node.get().is_some_and(|n| n.contains(target.as_ref()));
            let hit = ClickTarget {
                inside_panel: within(&panel_ref),
                on_toggle: within(&toggle_ref),
            };
            let mut ctrl = controller.borrow_mut();
            if ctrl.dismiss(hit) {
                setter.set(ctrl.snapshot());
            }
        })
    };

    let keydown = {
        let controller = controller.clone();
        let setter = setter.clone();
        Listener::new(&doc, "keydown", move |event: Event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let chord = KeyChord {
                key: event.key(),
                alt: event.alt_key(),
                target_editable: from_editable(event),
            };
            let Some(shortcut) = shortcuts::resolve(&chord, guard_editable) else {
                return;
            };
            event.prevent_default();
            let next = controller.borrow_mut().apply_shortcut(shortcut);
            if shortcut == Shortcut::TogglePanel {
                setter.set(next);
            } else {
                commit(&setter, next);
            }
        })
    };

    [click, keydown].into_iter().flatten().collect()
}

fn from_editable(event: &KeyboardEvent) -> bool {
    event
        .target()
        .and_then(|t| t.dyn_into::<HtmlElement>().ok())
        .is_some_and(|el| shortcuts::is_editable_tag(&el.tag_name(), el.is_content_editable()))
}
