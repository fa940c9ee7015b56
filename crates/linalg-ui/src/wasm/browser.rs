//! Exported calculator for the browser page
//!
//! JavaScript forwards clicks, key presses and edits here; after every
//! change the page state is projected onto the document.

use super::{prefers_dark, FetchTransport, LocalStorageThemeStore};
use crate::config::ClientConfig;
use crate::controller::Controller;
use crate::theme::{Theme, ThemeManager};
use crate::ui::{
    Notification, NotificationPhase, Section, UiState, ViewCursor, BUSY_CLASS, INPUT_ERROR_CLASS,
};
use crate::visualization::PlotCapability;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::{
    console, Document, Element, HtmlButtonElement, HtmlInputElement, ScrollBehavior,
    ScrollIntoViewOptions, ScrollLogicalPosition,
};

const RESULT_ID: &str = "result";
const TOAST_CONTAINER_ID: &str = "toastContainer";
const TOAST_ID_ATTR: &str = "data-toast-id";
const TOAST_OUT_CLASS: &str = "toast-out";

/// Browser calculator: the wasm entry point
#[derive(Debug)]
#[wasm_bindgen]
pub struct BrowserCalculator {
    controller: Rc<Controller<FetchTransport>>,
    theme: ThemeManager<LocalStorageThemeStore>,
    cursor: Rc<RefCell<ViewCursor>>,
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Creates the calculator; `base_url` may be empty for same-origin
    /// backends
    #[wasm_bindgen(constructor)]
    pub fn new(base_url: &str, canvas_only: bool) -> Self {
        console_error_panic_hook::set_once();

        let config = ClientConfig::default().with_base_url(base_url);
        let transport = FetchTransport::new(config.base_url.clone());
        let capability = if canvas_only {
            PlotCapability::Canvas2d
        } else {
            PlotCapability::Rich3d
        };
        let cursor = Rc::new(RefCell::new(ViewCursor::new()));
        let observed = Rc::clone(&cursor);
        let controller = Controller::new(transport, config)
            .with_plot_capability(capability)
            .with_observer(move |ui| sync_document(ui, &observed));

        let theme = ThemeManager::init(LocalStorageThemeStore::new(), prefers_dark());
        controller.ui().borrow_mut().set_theme(theme.current());
        apply_theme_attribute(theme.current());

        Self {
            controller: Rc::new(controller),
            theme,
            cursor,
        }
    }

    /// Mirrors a user edit
    pub fn set_field(&self, id: &str, value: &str) {
        self.controller.set_field(id, value);
    }

    /// Clicks a button; resolves to `true` on a rendered success
    pub fn click(&self, button_id: String) -> js_sys::Promise {
        let controller = Rc::clone(&self.controller);
        future_to_promise(async move {
            let outcome = controller.click(&button_id).await;
            Ok(JsValue::from_bool(outcome.is_some_and(|o| o.is_success())))
        })
    }

    /// Key press inside a field
    pub fn press_key(&self, field_id: String, key: String) -> js_sys::Promise {
        let controller = Rc::clone(&self.controller);
        future_to_promise(async move {
            let outcome = controller.handle_key(&field_id, &key).await;
            Ok(JsValue::from_bool(outcome.is_some_and(|o| o.is_success())))
        })
    }

    /// Clears the section owning `id` (a field or button id)
    pub fn clear_section(&self, id: &str) -> bool {
        let Some(section) = Section::from_button(id).or_else(|| Section::from_field(id)) else {
            return false;
        };
        self.controller.clear_section(section);
        true
    }

    /// Flips and persists the theme; returns the new theme name
    pub fn toggle_theme(&mut self) -> String {
        let next = match self.theme.toggle() {
            Ok(theme) => theme,
            Err(e) => {
                console::warn_1(&JsValue::from_str(&e.to_string()));
                self.theme.current()
            }
        };
        self.controller.ui().borrow_mut().set_theme(next);
        apply_theme_attribute(next);
        next.to_string()
    }

    /// Moves the clock forward by `ms` milliseconds
    pub fn advance(&self, ms: f64) {
        let elapsed = Duration::from_secs_f64(ms.max(0.0) / 1000.0);
        self.controller.ui().borrow_mut().advance(elapsed);
        self.sync();
    }

    /// Projects the current page state onto the document
    pub fn sync(&self) {
        sync_document(&self.controller.ui().borrow(), &self.cursor);
    }

    /// Visualization scene as JSON for the host's plotting code
    pub fn scene_json(&self) -> String {
        serde_json::to_string(self.controller.ui().borrow().canvas())
            .unwrap_or_else(|_| "null".to_string())
    }

    /// Current result message, empty before the first result
    pub fn result_text(&self) -> String {
        self.controller
            .ui()
            .borrow()
            .result()
            .map(|r| r.message().to_string())
            .unwrap_or_default()
    }
}

fn document() -> Option<Document> {
    web_sys::window()?.document()
}

fn apply_theme_attribute(theme: Theme) {
    let root = document().and_then(|d| d.document_element());
    if let Some(root) = root {
        if let Err(e) = root.set_attribute("data-theme", theme.as_str()) {
            console::warn_1(&e);
        }
    }
}

fn toggle_class(node: &Element, class: &str, on: bool) {
    if let Err(e) = node.class_list().toggle_with_force(class, on) {
        console::warn_1(&e);
    }
}

fn sync_document(ui: &UiState, cursor: &RefCell<ViewCursor>) {
    let Some(document) = document() else {
        return;
    };
    let Ok(mut cursor) = cursor.try_borrow_mut() else {
        return;
    };

    for elem in ui.elements() {
        let Some(node) = document.get_element_by_id(&elem.id) else {
            continue;
        };
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            if input.value() != elem.text_content {
                input.set_value(&elem.text_content);
            }
            toggle_class(&node, INPUT_ERROR_CLASS, elem.has_class(INPUT_ERROR_CLASS));
        } else if let Some(button) = node.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(elem.disabled);
            button.set_text_content(Some(&elem.text_content));
            toggle_class(&node, BUSY_CLASS, elem.has_class(BUSY_CLASS));
        }
    }

    let scroll = cursor.take_scroll(ui);
    if let Err(e) = sync_result(&document, ui, scroll) {
        console::warn_1(&e);
    }
    if let Err(e) = sync_toasts(&document, ui, &mut cursor) {
        console::warn_1(&e);
    }
}

fn sync_result(document: &Document, ui: &UiState, scroll: bool) -> Result<(), JsValue> {
    let (Some(area), Some(result)) = (document.get_element_by_id(RESULT_ID), ui.result()) else {
        return Ok(());
    };
    area.set_text_content(None);
    toggle_class(&area, "success", !result.is_error());
    toggle_class(&area, "error", result.is_error());

    let body = document.create_element("div")?;
    body.set_class_name("result-body");
    let label = document.create_element("strong")?;
    label.set_text_content(Some(result.label()));
    let value = document.create_element("div")?;
    value.set_class_name("result-value");
    value.set_text_content(Some(result.message()));
    body.append_child(&label)?;
    body.append_child(&value)?;
    area.append_child(&body)?;

    if scroll {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Nearest);
        area.scroll_into_view_with_scroll_into_view_options(&options);
    }
    Ok(())
}

fn sync_toasts(
    document: &Document,
    ui: &UiState,
    cursor: &mut ViewCursor,
) -> Result<(), JsValue> {
    let changes = cursor.toast_changes(ui);
    let Some(container) = document.get_element_by_id(TOAST_CONTAINER_ID) else {
        return Ok(());
    };

    for id in &changes.removed {
        if let Some(node) = toast_node(&container, *id)? {
            node.remove();
        }
    }
    for id in &changes.leaving {
        if let Some(node) = toast_node(&container, *id)? {
            toggle_class(&node, TOAST_OUT_CLASS, true);
        }
    }
    for notification in &changes.added {
        container.append_child(&toast_element(document, notification)?)?;
    }
    Ok(())
}

fn toast_node(container: &Element, id: u64) -> Result<Option<Element>, JsValue> {
    container.query_selector(&format!("[{TOAST_ID_ATTR}=\"{id}\"]"))
}

fn toast_element(document: &Document, notification: &Notification) -> Result<Element, JsValue> {
    let toast = document.create_element("div")?;
    toast.set_class_name(&format!("toast toast-{}", notification.kind.as_str()));
    toast.set_attribute(TOAST_ID_ATTR, &notification.id.to_string())?;
    if notification.phase == NotificationPhase::Leaving {
        toggle_class(&toast, TOAST_OUT_CLASS, true);
    }
    let message = document.create_element("div")?;
    message.set_class_name("toast-message");
    message.set_text_content(Some(&notification.message));
    toast.append_child(&message)?;
    Ok(toast)
}
