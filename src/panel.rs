use crate::constants::PANEL_ROOT_ID;
use crate::core::{is_activation_key, slider_label, PanelAction};
use crate::dom;
use crate::panel_html::{self, ACTION_ATTR, LABEL_FOR_ATTR, VALUE_ATTR};
use crate::state::AppState;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
struct PanelWiring {
    root: web::Element,
    app: Rc<RefCell<AppState>>,
}

/// Renders the panel into `#panel-root`, seeds the default color and wires the
/// delegated listeners.
pub fn mount(document: &web::Document, app: Rc<RefCell<AppState>>) -> anyhow::Result<()> {
    let root = document
        .get_element_by_id(PANEL_ROOT_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", PANEL_ROOT_ID))?;
    {
        let mut state = app.borrow_mut();
        if let Some(update) = state.view.panel.on_mount(state.config.current()) {
            state.update_configuration(&update);
        }
    }
    let w = PanelWiring { root, app };
    render(&w);
    wire_click(&w);
    wire_input(&w);
    wire_change(&w);
    wire_keydown(&w);
    Ok(())
}

fn render(w: &PanelWiring) {
    let html = {
        let state = w.app.borrow();
        panel_html::render_panel(&state.view.panel.view(state.config.current()))
    };
    w.root.set_inner_html(&html);
}

fn decode_action(el: &web::Element) -> Option<PanelAction> {
    let action = el.get_attribute(ACTION_ATTR)?;
    let value = match el.dyn_ref::<web::HtmlInputElement>() {
        Some(input) => Some(input.value()),
        None => el.get_attribute(VALUE_ATTR),
    };
    PanelAction::decode(&action, value.as_deref())
}

fn dispatch(w: &PanelWiring, action: PanelAction) {
    let mut guard = w.app.borrow_mut();
    let state = &mut *guard;
    if let Some(update) = state.view.panel.apply(action, state.config.current()) {
        state.update_configuration(&update);
    }
}

#[inline]
fn is_input(el: &web::Element) -> bool {
    el.dyn_ref::<web::HtmlInputElement>().is_some()
}

fn wire_click(w: &PanelWiring) {
    let wc = w.clone();
    dom::add_listener(&w.root, "click", move |ev: web::MouseEvent| {
        let Some(el) = dom::closest_with_attr(&ev, ACTION_ATTR) else {
            return;
        };
        // inputs report through input/change
        if is_input(&el) {
            return;
        }
        if let Some(action) = decode_action(&el) {
            dispatch(&wc, action);
            render(&wc);
        }
    });
}

/// Live slider and color-picker drags: update the configuration and the value
/// label without rebuilding the markup under the pointer.
fn wire_input(w: &PanelWiring) {
    let wc = w.clone();
    dom::add_listener(&w.root, "input", move |ev: web::Event| {
        let Some(el) = dom::closest_with_attr(&ev, ACTION_ATTR) else {
            return;
        };
        let Some(action) = decode_action(&el) else {
            return;
        };
        let label_key = match &action {
            PanelAction::SetMetalness(_) => Some("metalness"),
            PanelAction::SetRoughness(_) => Some("roughness"),
            _ => None,
        };
        dispatch(&wc, action);
        let Some(key) = label_key else {
            return;
        };
        let value = {
            let state = wc.app.borrow();
            let config = state.config.current();
            if key == "metalness" {
                config.metalness
            } else {
                config.roughness
            }
        };
        let selector = format!("[{}=\"{}\"]", LABEL_FOR_ATTR, key);
        if let Ok(Some(label)) = wc.root.query_selector(&selector) {
            label.set_text_content(Some(&slider_label(value)));
        }
    });
}

fn wire_change(w: &PanelWiring) {
    let wc = w.clone();
    dom::add_listener(&w.root, "change", move |ev: web::Event| {
        let Some(el) = dom::closest_with_attr(&ev, ACTION_ATTR) else {
            return;
        };
        if let Some(action) = decode_action(&el) {
            dispatch(&wc, action);
            render(&wc);
        }
    });
}

/// Focus is lost when the markup is rebuilt; put it back on the matching control.
fn refocus(w: &PanelWiring, action: &str, value: Option<&str>) {
    let selector = match value {
        Some(v) => format!("[{}=\"{}\"][{}=\"{}\"]", ACTION_ATTR, action, VALUE_ATTR, v),
        None => format!("[{}=\"{}\"]", ACTION_ATTR, action),
    };
    if let Ok(Some(el)) = w.root.query_selector(&selector) {
        if let Some(el) = el.dyn_ref::<web::HtmlElement>() {
            _ = el.focus();
        }
    }
}

/// Enter/Space on the `role="button"` headers and swatches.
fn wire_keydown(w: &PanelWiring) {
    let wc = w.clone();
    dom::add_listener(&w.root, "keydown", move |ev: web::KeyboardEvent| {
        if !is_activation_key(&ev.key()) {
            return;
        }
        let Some(el) = dom::closest_with_attr(&ev, ACTION_ATTR) else {
            return;
        };
        // native buttons and inputs already turn keys into click/change
        if is_input(&el) || el.tag_name().eq_ignore_ascii_case("button") {
            return;
        }
        let Some(action) = decode_action(&el) else {
            return;
        };
        ev.prevent_default();
        let name = el.get_attribute(ACTION_ATTR).unwrap_or_default();
        let value = el.get_attribute(VALUE_ATTR);
        dispatch(&wc, action);
        render(&wc);
        refocus(&wc, &name, value.as_deref());
    });
}
