//! End-to-end dispatch tests against scripted transports
//!
//! Each test drives the controller the way the page does: fill fields,
//! press a button, then inspect the request sent and the page state left
//! behind.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use async_trait::async_trait;
use linalg_ui::prelude::*;
use linalg_ui::ui::{BUSY_CLASS, BUSY_LABEL, MISSING_FIELDS_MESSAGE};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

fn controller(mock: MockTransport) -> Controller<MockTransport> {
    Controller::new(mock, ClientConfig::default())
}

fn fill(controller: &Controller<impl Transport>, op: Operation, text: &str) {
    for id in op.field_ids() {
        controller.set_field(id, text);
    }
}

/// Records the trigger's busy flag at the moment the request is sent
struct BusyRecorder {
    ui: SharedUi,
    trigger: &'static str,
    seen_busy: RefCell<Vec<bool>>,
    reply: Result<Value, String>,
}

#[async_trait(?Send)]
impl Transport for BusyRecorder {
    async fn post_json(&self, _path: &str, _body: &Value) -> Result<Value, TransportError> {
        self.seen_busy
            .borrow_mut()
            .push(self.ui.borrow().is_busy(self.trigger));
        self.reply.clone().map_err(TransportError::Rejected)
    }
}

/// Yields once before answering, so joined presses interleave
struct Yielding(MockTransport);

#[async_trait(?Send)]
impl Transport for Yielding {
    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, TransportError> {
        tokio::task::yield_now().await;
        self.0.post_json(path, body).await
    }
}

/// Answers only after a long sleep
struct Slow;

#[async_trait(?Send)]
impl Transport for Slow {
    async fn post_json(&self, _path: &str, _body: &Value) -> Result<Value, TransportError> {
        tokio::time::sleep(Duration::from_secs(60)).await;
        Ok(json!({"unit_vector": [1.0]}))
    }
}

// ============================================================================
// Scenarios
// ============================================================================

#[tokio::test]
async fn test_unit_vector_scenario() {
    let mock = MockTransport::new().respond("/unit_vector", json!({"unit_vector": [0.6, 0.8]}));
    let handle = mock.clone();
    let c = controller(mock);
    c.set_field("vectorInput", "[3,4]");

    let outcome = c.dispatch(Operation::UnitVector, "btn-unit-vector").await;

    assert!(outcome.is_success());
    let sent = handle.captured();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].path, "/unit_vector");
    assert_eq!(sent[0].body, json!({"vector": [3, 4]}));

    let ui = c.ui().borrow();
    let result = ui.result().unwrap();
    assert_eq!(result.message(), "Unit Vector: [0.6000, 0.8000]");
    assert_eq!(result.label(), "Result");
    assert_eq!(ui.notifications().last().unwrap().kind, NotificationKind::Success);
}

#[tokio::test]
async fn test_blank_field_sends_nothing() {
    let mock = MockTransport::new();
    let handle = mock.clone();
    let c = controller(mock);
    c.set_field("v2Input", "[1,0]");

    let outcome = c.click("btn-angle").await.unwrap();

    assert_eq!(outcome, DispatchOutcome::Invalid);
    assert_eq!(handle.call_count(), 0);
    let ui = c.ui().borrow();
    assert!(ui.has_error_marker("v1Input"));
    assert!(!ui.has_error_marker("v2Input"));
    assert_eq!(ui.notifications().last().unwrap().message, MISSING_FIELDS_MESSAGE);
    assert!(ui.result().is_none());
}

#[tokio::test]
async fn test_whitespace_only_field_is_blank() {
    let mock = MockTransport::new();
    let handle = mock.clone();
    let c = controller(mock);
    c.set_field("matrixInput", "   \t");
    assert_eq!(c.click("btn-transpose").await, Some(DispatchOutcome::Invalid));
    assert_eq!(handle.call_count(), 0);
}

#[tokio::test]
async fn test_malformed_field_sends_nothing() {
    let mock = MockTransport::new();
    let handle = mock.clone();
    let c = controller(mock);
    c.set_field("vectorInput", "[1,2");

    let outcome = c.dispatch(Operation::UnitVector, "btn-unit-vector").await;

    assert_eq!(outcome, DispatchOutcome::Invalid);
    assert_eq!(handle.call_count(), 0);
    let ui = c.ui().borrow();
    assert_eq!(
        ui.result().unwrap().message(),
        "Invalid input format. Please use JSON format like [1,2,3] or [[1,2],[3,4]]"
    );
    assert!(ui.result().unwrap().is_error());
    assert!(!ui.is_busy("btn-unit-vector"));
}

#[tokio::test]
async fn test_falsy_json_values_are_dispatched() {
    let mock = MockTransport::new().respond("/unit_vector", json!({"error": "Input must be a list"}));
    let handle = mock.clone();
    let c = controller(mock);
    c.set_field("vectorInput", "0");

    let outcome = c.dispatch(Operation::UnitVector, "btn-unit-vector").await;

    assert_eq!(handle.captured()[0].body, json!({"vector": 0}));
    assert_eq!(outcome.result().unwrap().message(), "Input must be a list");
}

#[tokio::test]
async fn test_connection_error() {
    let mock = MockTransport::new().fallback(MockReply::Reject("Network down".into()));
    let c = controller(mock);
    fill(&c, Operation::Orthogonality, "[1,0]");

    let outcome = c.click("btn-orthogonality").await.unwrap();

    assert_eq!(
        outcome.result().unwrap().message(),
        "Connection error: Network down"
    );
    let ui = c.ui().borrow();
    assert!(!ui.is_busy("btn-orthogonality"));
    assert_eq!(ui.button_label("btn-orthogonality"), Some("Check"));
}

#[tokio::test]
async fn test_undecodable_body_is_connection_error() {
    let mock = MockTransport::new().route("/matrix_multiply", MockReply::Raw("<html>".into()));
    let c = controller(mock);
    fill(&c, Operation::Multiply, "[[1]]");

    let outcome = c.click("btn-multiply").await.unwrap();
    let message = outcome.result().unwrap().message().to_string();
    assert!(message.starts_with("Connection error: "), "{message}");
    assert!(!c.ui().borrow().is_busy("btn-multiply"));
}

#[tokio::test]
async fn test_domain_error_wins_for_every_operation() {
    for op in Operation::ALL {
        let mock = MockTransport::new().fallback(MockReply::Json(json!({
            "error": "X",
            "unit_vector": [1.0],
            "angle": 1.0,
            "orthogonal": true,
            "dot_product": 0.0,
        })));
        let c = controller(mock);
        fill(&c, op, "[1]");

        let outcome = c.dispatch(op, op.button_id()).await;

        assert_eq!(
            outcome,
            DispatchOutcome::Completed(OperationResult::Failure("X".into())),
            "{op}"
        );
        let ui = c.ui().borrow();
        assert_eq!(ui.result().unwrap().label(), "Error");
        assert!(!ui.is_busy(op.button_id()));
    }
}

#[tokio::test]
async fn test_request_bodies_carry_exactly_the_operation_fields() {
    let expected = [
        (Operation::UnitVector, json!({"vector": [1]})),
        (Operation::AngleBetween, json!({"v1": [1], "v2": [1]})),
        (Operation::Orthogonality, json!({"v1": [1], "v2": [1]})),
        (Operation::Parallelism, json!({"v1": [1], "v2": [1]})),
        (
            Operation::LinearCombination,
            json!({"vectors": [1], "coefficients": [1]}),
        ),
        (Operation::SolveSystem, json!({"A": [1], "b": [1]})),
        (Operation::Transpose, json!({"matrix": [1]})),
        (Operation::Multiply, json!({"m1": [1], "m2": [1]})),
    ];
    for (op, body) in expected {
        let mock = MockTransport::new().fallback(MockReply::Json(json!({"error": "stop"})));
        let handle = mock.clone();
        let c = controller(mock);
        fill(&c, op, "[1]");
        c.dispatch(op, op.button_id()).await;

        let sent = handle.captured();
        assert_eq!(sent.len(), 1, "{op}");
        assert_eq!(sent[0].path, op.path());
        assert_eq!(sent[0].body, body, "{op}");
    }
}

#[tokio::test]
async fn test_solve_system_success() {
    let mock = MockTransport::new().respond("/solve_system", json!({"solution": [2.0, 3.0]}));
    let c = controller(mock);
    c.set_field("AInput", "[[2,1],[1,3]]");
    c.set_field("bInput", "[7,11]");

    let outcome = c.click("btn-solve-system").await.unwrap();
    assert_eq!(
        outcome.result().unwrap().message(),
        "Solution x: [2.0000, 3.0000]"
    );
}

#[tokio::test]
async fn test_matrix_results_dump_structure() {
    let mock = MockTransport::new()
        .respond("/matrix_transpose", json!({"transpose": [[1, 3], [2, 4]]}))
        .respond("/matrix_multiply", json!({"product": [[19.0, 22.0], [43.0, 50.5]]}));
    let c = controller(mock);
    c.set_field("matrixInput", "[[1,2],[3,4]]");
    fill(&c, Operation::Multiply, "[[1,2],[3,4]]");

    let transpose = c.click("btn-transpose").await.unwrap();
    assert_eq!(
        transpose.result().unwrap().message(),
        "Transpose: [[1,3],[2,4]]"
    );
    let product = c.click("btn-multiply").await.unwrap();
    assert_eq!(
        product.result().unwrap().message(),
        "Product: [[19,22],[43,50.5]]"
    );
}

#[tokio::test]
async fn test_parallelism_verdicts() {
    let mock = MockTransport::new().respond(
        "/parallelism",
        json!({"parallel": true, "cross_product": [0, 0, 0]}),
    );
    let c = controller(mock);
    c.set_field("parV1", "[1,2,3]");
    c.set_field("parV2", "[2,4,6]");

    let outcome = c.click("btn-parallelism").await.unwrap();
    assert_eq!(
        outcome.result().unwrap().message(),
        "✓ Yes, vectors are parallel (cross product: [0.0000, 0.0000, 0.0000])"
    );
}

#[tokio::test]
async fn test_missing_success_field_is_reported() {
    let mock = MockTransport::new().respond("/linear_combination", json!({"value": [1]}));
    let c = controller(mock);
    fill(&c, Operation::LinearCombination, "[1]");

    let outcome = c.click("btn-linear-combination").await.unwrap();
    assert_eq!(
        outcome.result().unwrap().message(),
        "Unexpected response: missing field `result`"
    );
    assert!(!c.ui().borrow().is_busy("btn-linear-combination"));
}

// ============================================================================
// Busy state
// ============================================================================

#[tokio::test]
async fn test_busy_only_while_request_outstanding() {
    let replies = [
        Ok(json!({"angle": 90.0})),
        Ok(json!({"error": "Vectors must have the same dimension"})),
        Err("Network down".to_string()),
    ];
    for reply in replies {
        let config = ClientConfig::default();
        let ui: SharedUi = Rc::new(RefCell::new(UiState::calculator(&config)));
        let recorder = BusyRecorder {
            ui: Rc::clone(&ui),
            trigger: "btn-angle",
            seen_busy: RefCell::new(Vec::new()),
            reply,
        };
        let c = Controller::with_ui(recorder, Rc::clone(&ui), config);
        fill(&c, Operation::AngleBetween, "[1,0]");

        let outcome = c.click("btn-angle").await.unwrap();

        assert!(outcome.result().is_some());
        assert_eq!(*c.transport().seen_busy.borrow(), [true]);
        let ui = ui.borrow();
        assert!(!ui.is_busy("btn-angle"));
        assert_eq!(ui.button_label("btn-angle"), Some("Calculate"));
        assert!(!ui.element("btn-angle").unwrap().has_class(BUSY_CLASS));
    }
}

#[tokio::test]
async fn test_busy_presentation_during_request() {
    let config = ClientConfig::default();
    let ui: SharedUi = Rc::new(RefCell::new(UiState::calculator(&config)));
    let snapshot = Rc::new(RefCell::new(None));
    let seen = Rc::clone(&snapshot);
    let c = Controller::with_ui(
        MockTransport::new().respond("/matrix_transpose", json!({"transpose": [[1]]})),
        Rc::clone(&ui),
        config,
    )
    .with_observer(move |ui| {
        if ui.is_busy("btn-transpose") {
            *seen.borrow_mut() = ui.button_label("btn-transpose").map(str::to_string);
        }
    });
    c.set_field("matrixInput", "[[1]]");
    c.click("btn-transpose").await;

    assert_eq!(snapshot.borrow().as_deref(), Some(BUSY_LABEL));
    assert_eq!(ui.borrow().button_label("btn-transpose"), Some("Transpose"));
}

#[tokio::test]
async fn test_second_press_while_busy_is_ignored() {
    let mock = MockTransport::new().respond("/unit_vector", json!({"unit_vector": [1.0]}));
    let handle = mock.clone();
    let c = Controller::new(Yielding(mock), ClientConfig::default());
    c.set_field("vectorInput", "[2]");

    let (first, second) = futures::join!(c.click("btn-unit-vector"), c.click("btn-unit-vector"));

    assert!(first.unwrap().is_success());
    assert_eq!(second, Some(DispatchOutcome::Ignored));
    assert_eq!(handle.call_count(), 1);
    assert!(!c.ui().borrow().is_busy("btn-unit-vector"));
}

#[tokio::test]
async fn test_timed_out_dispatch_releases_button() {
    let c = Controller::new(Slow, ClientConfig::default());
    c.set_field("vectorInput", "[3,4]");

    let first = tokio::time::timeout(Duration::from_millis(50), c.click("btn-unit-vector")).await;
    assert!(first.is_err());
    assert!(!c.ui().borrow().is_busy("btn-unit-vector"));

    {
        let ui = c.ui().borrow();
        let button = ui.element("btn-unit-vector").unwrap();
        assert!(!button.disabled);
        assert!(!button.has_class(BUSY_CLASS));
    }

    // a fresh press is accepted and goes busy again
    let second = tokio::time::timeout(Duration::from_millis(50), c.click("btn-unit-vector")).await;
    assert!(second.is_err());
    assert!(!c.ui().borrow().is_busy("btn-unit-vector"));
}

#[tokio::test]
async fn test_different_operations_run_concurrently() {
    let mock = MockTransport::new()
        .respond("/unit_vector", json!({"unit_vector": [1.0]}))
        .respond("/angle_between", json!({"angle": 90.0}));
    let handle = mock.clone();
    let c = Controller::new(Yielding(mock), ClientConfig::default());
    c.set_field("vectorInput", "[2]");
    fill(&c, Operation::AngleBetween, "[1,0]");

    let (unit, angle) = futures::join!(c.click("btn-unit-vector"), c.click("btn-angle"));

    assert!(unit.unwrap().is_success());
    assert!(angle.unwrap().is_success());
    assert_eq!(handle.call_count(), 2);
    let ui = c.ui().borrow();
    // last to settle owns the shared result area
    assert_eq!(ui.result().unwrap().message(), "Angle: 90.00° (degrees)");
    assert_eq!(ui.scroll_requests(), 2);
}

// ============================================================================
// Keyboard, timing, clearing
// ============================================================================

#[tokio::test]
async fn test_enter_key_matches_click() {
    let mock = MockTransport::new().respond("/linear_combination", json!({"result": [3, 4]}));
    let c = controller(mock);
    fill(&c, Operation::LinearCombination, "[[1,0],[0,1]]");
    c.set_field("coeffInput", "[3,4]");

    let outcome = c.handle_key("coeffInput", "Enter").await.unwrap();
    assert_eq!(
        outcome.result().unwrap().message(),
        "Linear Combination: [3.0000, 4.0000]"
    );
    assert_eq!(c.handle_key("coeffInput", "Tab").await, None);
    assert_eq!(c.handle_key("nowhere", "Enter").await, None);
}

#[tokio::test]
async fn test_markers_and_notifications_expire() {
    let c = controller(MockTransport::new());
    c.click("btn-multiply").await;
    {
        let ui = c.ui().borrow();
        assert!(ui.has_error_marker("m1Input"));
        assert!(ui.has_error_marker("m2Input"));
        assert_eq!(ui.notifications().len(), 1);
    }

    c.ui().borrow_mut().advance(Duration::from_secs(1));
    assert!(!c.ui().borrow().has_error_marker("m1Input"));

    c.ui().borrow_mut().advance(Duration::from_millis(2500));
    assert_eq!(
        c.ui().borrow().notifications().last().unwrap().phase,
        NotificationPhase::Leaving
    );

    c.ui().borrow_mut().advance(Duration::from_millis(300));
    assert!(c.ui().borrow().notifications().is_empty());
}

#[tokio::test]
async fn test_long_error_is_truncated_in_notification_only() {
    let long = "singular matrix ".repeat(10);
    let mock = MockTransport::new().fallback(MockReply::Json(json!({"error": long.clone()})));
    let c = controller(mock);
    fill(&c, Operation::SolveSystem, "[[0]]");

    c.click("btn-solve-system").await;

    let ui = c.ui().borrow();
    assert_eq!(ui.result().unwrap().message(), long);
    let toast = &ui.notifications().last().unwrap().message;
    assert!(toast.ends_with('…'));
    assert_eq!(toast.chars().count(), 81);
}

#[tokio::test]
async fn test_clear_section_then_validate() {
    let mock = MockTransport::new();
    let handle = mock.clone();
    let c = controller(mock);
    fill(&c, Operation::Multiply, "[[1]]");
    c.clear_section(Section::Operation(Operation::Multiply));

    assert_eq!(c.click("btn-multiply").await, Some(DispatchOutcome::Invalid));
    assert_eq!(handle.call_count(), 0);
}
