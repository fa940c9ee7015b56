//! Calculator UI controller
//!
//! Turns a button press into at most one backend request:
//!
//! 1. ignore the press if the trigger button is busy
//! 2. validate required fields, then parse each one
//! 3. mark the trigger busy and send one `POST`
//! 4. render the decoded result, a domain error, or a connection error
//! 5. restore the trigger button
//!
//! The busy flag is owned by a guard from step 3 on, so the button is
//! restored however the dispatch ends: settled, cancelled or unwound.

use crate::config::ClientConfig;
use crate::core::parser::is_blank;
use crate::core::{interpret, parse_field, Operation, OperationRequest, OperationResult};
use crate::transport::Transport;
use crate::ui::{Section, UiState};
use crate::visualization::{self, components, PlotCapability};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// UI state shared within one logical thread
pub type SharedUi = Rc<RefCell<UiState>>;

type Observer = Box<dyn Fn(&UiState)>;

/// What a button press led to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The trigger was busy; nothing happened
    Ignored,
    /// Validation or parsing stopped the action before any request
    Invalid,
    /// A result was rendered
    Completed(OperationResult),
}

impl DispatchOutcome {
    /// The rendered result, if any
    #[must_use]
    pub const fn result(&self) -> Option<&OperationResult> {
        match self {
            Self::Completed(result) => Some(result),
            Self::Ignored | Self::Invalid => None,
        }
    }

    /// True only for a rendered success
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Completed(OperationResult::Success(_)))
    }
}

/// Owns the page state and the backend seam
pub struct Controller<T> {
    transport: T,
    ui: SharedUi,
    config: ClientConfig,
    capability: PlotCapability,
    observer: Option<Observer>,
}

impl<T: fmt::Debug> fmt::Debug for Controller<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("transport", &self.transport)
            .field("ui", &self.ui)
            .field("config", &self.config)
            .field("capability", &self.capability)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl<T: Transport> Controller<T> {
    /// Controller over a fresh calculator page
    pub fn new(transport: T, config: ClientConfig) -> Self {
        let ui = Rc::new(RefCell::new(UiState::calculator(&config)));
        Self::with_ui(transport, ui, config)
    }

    /// Controller over existing page state
    pub fn with_ui(transport: T, ui: SharedUi, config: ClientConfig) -> Self {
        Self {
            transport,
            ui,
            config,
            capability: PlotCapability::default(),
            observer: None,
        }
    }

    /// Sets what the host can draw for visualizations
    #[must_use]
    pub fn with_plot_capability(mut self, capability: PlotCapability) -> Self {
        self.capability = capability;
        self
    }

    /// Called with the page state after every visible change
    #[must_use]
    pub fn with_observer(mut self, observer: impl Fn(&UiState) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Shared page state
    pub fn ui(&self) -> &SharedUi {
        &self.ui
    }

    /// Active configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Backend seam
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn notify_observer(&self) {
        if let Some(observer) = &self.observer {
            observer(&self.ui.borrow());
        }
    }

    /// User edit of a field
    pub fn set_field(&self, id: &str, value: &str) {
        self.ui.borrow_mut().set_field_value(id, value);
        self.notify_observer();
    }

    /// Empties a section
    pub fn clear_section(&self, section: Section) {
        self.ui.borrow_mut().clear_section(section);
        self.notify_observer();
    }

    /// Runs `operation`, using `trigger` as the button to hold busy
    pub async fn dispatch(&self, operation: Operation, trigger: &str) -> DispatchOutcome {
        let prepared = self.prepare(operation, trigger);
        self.notify_observer();
        let request = match prepared {
            Ok(request) => request,
            Err(outcome) => return outcome,
        };

        let busy = BusyGuard {
            controller: self,
            trigger,
        };
        let path = request.path();
        debug!(%operation, path, trigger, "dispatching request");
        let result = match self.transport.post_json(path, &request.to_body()).await {
            Ok(body) => interpret(operation, &body),
            Err(e) => {
                warn!(path, error = %e, "transport failure");
                OperationResult::Failure(format!("Connection error: {e}"))
            }
        };
        info!(%operation, failed = result.is_error(), "request settled");

        self.ui.borrow_mut().show(&result);
        drop(busy);
        DispatchOutcome::Completed(result)
    }

    fn prepare(
        &self,
        operation: Operation,
        trigger: &str,
    ) -> Result<OperationRequest, DispatchOutcome> {
        let mut ui = self.ui.borrow_mut();
        if ui.is_busy(trigger) {
            debug!(trigger, "trigger busy, ignoring");
            return Err(DispatchOutcome::Ignored);
        }
        if !ui.validate_required(operation.field_ids()) {
            return Err(DispatchOutcome::Invalid);
        }

        let mut values = Vec::with_capacity(operation.field_ids().len());
        let mut failed = false;
        for id in operation.field_ids() {
            match parse_field(ui.field_value(id)) {
                Ok(value) => values.push(value),
                Err(e) => {
                    debug!(field = id, error = ?e, "field rejected");
                    ui.render_result(&e.to_string(), true);
                    failed = true;
                }
            }
        }
        if failed {
            return Err(DispatchOutcome::Invalid);
        }

        ui.set_busy(trigger, true);
        Ok(OperationRequest::from_values(operation, values))
    }

    /// Button press by id; `None` for buttons that trigger nothing
    pub async fn click(&self, button_id: &str) -> Option<DispatchOutcome> {
        match Section::from_button(button_id)? {
            Section::Operation(op) => Some(self.dispatch(op, button_id).await),
            Section::Visualization => Some(self.visualize(self.capability)),
        }
    }

    /// Key press inside a field; Enter submits the field's section
    pub async fn handle_key(&self, field_id: &str, key: &str) -> Option<DispatchOutcome> {
        if key != "Enter" {
            return None;
        }
        let section = Section::from_field(field_id)?;
        self.click(section.button_id()).await
    }

    /// Plots `visV1` and, when present, `visV2`
    pub fn visualize(&self, capability: PlotCapability) -> DispatchOutcome {
        let outcome = {
            let mut ui = self.ui.borrow_mut();
            self.render_visualization(&mut ui, capability)
        };
        self.notify_observer();
        outcome
    }

    fn render_visualization(&self, ui: &mut UiState, capability: PlotCapability) -> DispatchOutcome {
        let [first, second] = Section::VISUALIZATION_FIELDS;
        if !ui.validate_required(&[first]) {
            return DispatchOutcome::Invalid;
        }
        let v1 = match parse_field(ui.field_value(first)) {
            Ok(value) => value,
            Err(e) => {
                ui.render_result(&e.to_string(), true);
                return DispatchOutcome::Invalid;
            }
        };

        let mut vectors = vec![components(&v1)];
        if !is_blank(ui.field_value(second)) {
            match parse_field(ui.field_value(second)) {
                Ok(v2) => vectors.push(components(&v2)),
                Err(e) => ui.render_result(&e.to_string(), true),
            }
        }

        let scene = visualization::render(capability, &vectors, ui.theme(), &self.config);
        ui.set_canvas(scene);
        let message = match capability {
            PlotCapability::Rich3d => "Vector visualization rendered successfully",
            PlotCapability::Canvas2d => "Vector visualization completed",
        };
        let result = OperationResult::Success(message.to_string());
        ui.show(&result);
        DispatchOutcome::Completed(result)
    }
}

/// Clears the trigger's busy flag on drop and shows the change
struct BusyGuard<'a, T> {
    controller: &'a Controller<T>,
    trigger: &'a str,
}

impl<T> Drop for BusyGuard<'_, T> {
    fn drop(&mut self) {
        let controller = self.controller;
        match controller.ui.try_borrow_mut() {
            Ok(mut ui) => ui.set_busy(self.trigger, false),
            Err(_) => {
                warn!(trigger = self.trigger, "page state borrowed, busy flag left set");
                return;
            }
        }
        if let (Some(observer), Ok(ui)) = (&controller.observer, controller.ui.try_borrow()) {
            observer(&ui);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::transport::{MockReply, MockTransport};
    use crate::visualization::Scene;
    use futures::executor::block_on;
    use serde_json::json;
    use std::cell::Cell;

    fn controller(mock: MockTransport) -> Controller<MockTransport> {
        Controller::new(mock, ClientConfig::default())
    }

    #[test]
    fn test_unknown_button_does_nothing() {
        let c = controller(MockTransport::new());
        assert_eq!(block_on(c.click("btn-nope")), None);
    }

    #[test]
    fn test_non_enter_key_ignored() {
        let c = controller(MockTransport::new());
        assert_eq!(block_on(c.handle_key("vectorInput", "a")), None);
    }

    #[test]
    fn test_enter_submits_section() {
        let mock = MockTransport::new().respond("/matrix_transpose", json!({"transpose": [[1], [2]]}));
        let handle = mock.clone();
        let c = controller(mock);
        c.set_field("matrixInput", "[[1,2]]");
        let outcome = block_on(c.handle_key("matrixInput", "Enter")).unwrap();
        assert_eq!(outcome.result().unwrap().message(), "Transpose: [[1],[2]]");
        assert_eq!(handle.call_count(), 1);
    }

    #[test]
    fn test_busy_trigger_ignores_press() {
        let mock = MockTransport::new().fallback(MockReply::Json(json!({"angle": 1.0})));
        let handle = mock.clone();
        let c = controller(mock);
        c.set_field("v1Input", "[1,0]");
        c.set_field("v2Input", "[0,1]");
        c.ui().borrow_mut().set_busy("btn-angle", true);
        let outcome = block_on(c.dispatch(Operation::AngleBetween, "btn-angle"));
        assert_eq!(outcome, DispatchOutcome::Ignored);
        assert_eq!(handle.call_count(), 0);
    }

    #[test]
    fn test_both_malformed_fields_reported() {
        let mock = MockTransport::new();
        let handle = mock.clone();
        let c = controller(mock);
        c.set_field("m1Input", "[[1,");
        c.set_field("m2Input", "nope");
        let outcome = block_on(c.dispatch(Operation::Multiply, "btn-multiply"));
        assert_eq!(outcome, DispatchOutcome::Invalid);
        assert_eq!(handle.call_count(), 0);
        assert_eq!(c.ui().borrow().scroll_requests(), 2);
        assert!(!c.ui().borrow().is_busy("btn-multiply"));
    }

    #[test]
    fn test_observer_sees_busy_then_idle() {
        let seen = Rc::new(Cell::new(0_u32));
        let busy_seen = Rc::new(Cell::new(false));
        let (s, b) = (Rc::clone(&seen), Rc::clone(&busy_seen));
        let mock = MockTransport::new().respond("/unit_vector", json!({"unit_vector": [1.0]}));
        let c = controller(mock).with_observer(move |ui| {
            s.set(s.get() + 1);
            if ui.is_busy("btn-unit-vector") {
                b.set(true);
            }
        });
        c.set_field("vectorInput", "[5]");
        block_on(c.dispatch(Operation::UnitVector, "btn-unit-vector"));
        assert!(busy_seen.get());
        assert!(!c.ui().borrow().is_busy("btn-unit-vector"));
        // set_field, after prepare, after settle
        assert_eq!(seen.get(), 3);
    }

    /// Never settles
    #[derive(Debug)]
    struct Hanging;

    #[async_trait::async_trait(?Send)]
    impl Transport for Hanging {
        async fn post_json(
            &self,
            _path: &str,
            _body: &serde_json::Value,
        ) -> Result<serde_json::Value, crate::transport::TransportError> {
            futures::future::pending().await
        }
    }

    #[test]
    fn test_cancelled_dispatch_restores_button() {
        use futures::FutureExt;

        let idle_seen = Rc::new(Cell::new(false));
        let flag = Rc::clone(&idle_seen);
        let c = Controller::new(Hanging, ClientConfig::default()).with_observer(move |ui| {
            flag.set(!ui.is_busy("btn-unit-vector"));
        });
        c.set_field("vectorInput", "[3,4]");

        assert_eq!(c.click("btn-unit-vector").now_or_never(), None);

        assert!(!c.ui().borrow().is_busy("btn-unit-vector"));
        assert!(idle_seen.get());
        assert!(c.ui().borrow().result().is_none());
    }

    #[test]
    fn test_visualize_requires_first_vector() {
        let c = controller(MockTransport::new());
        let outcome = c.visualize(PlotCapability::Rich3d);
        assert_eq!(outcome, DispatchOutcome::Invalid);
        assert!(c.ui().borrow().has_error_marker("visV1"));
    }

    #[test]
    fn test_visualize_3d() {
        let c = controller(MockTransport::new());
        c.set_field("visV1", "[1,2,3]");
        c.set_field("visV2", "[4,5]");
        let outcome = c.visualize(PlotCapability::Rich3d);
        assert_eq!(
            outcome.result().unwrap().message(),
            "Vector visualization rendered successfully"
        );
        let ui = c.ui().borrow();
        let Scene::Plot3d(plot) = ui.canvas() else {
            panic!("expected 3d plot");
        };
        assert_eq!(plot.traces.len(), 2);
        assert_eq!(plot.traces[1].z, [0.0, 0.0]);
    }

    #[test]
    fn test_visualize_bad_second_vector_plots_first_only() {
        let c = controller(MockTransport::new()).with_plot_capability(PlotCapability::Canvas2d);
        c.set_field("visV1", "[1,1]");
        c.set_field("visV2", "[oops");
        let outcome = block_on(c.click("btn-visualize")).unwrap();
        assert_eq!(
            outcome.result().unwrap().message(),
            "Vector visualization completed"
        );
        let ui = c.ui().borrow();
        assert!(matches!(ui.canvas(), Scene::Canvas(_)));
        // parse error toast followed by the success toast
        let kinds: Vec<_> = ui.notifications().iter().map(|n| n.kind).collect();
        assert_eq!(kinds.len(), 2);
    }

    #[test]
    fn test_clear_section_through_controller() {
        let c = controller(MockTransport::new());
        c.set_field("AInput", "[[1]]");
        c.clear_section(Section::Operation(Operation::SolveSystem));
        assert_eq!(c.ui().borrow().field_value("AInput"), "");
    }
}
