//! Linalg UI - client for a linear-algebra web calculator
//!
//! The calculator page has one section per backend operation plus a vector
//! visualization section. This crate owns everything between a button
//! press and what the page shows afterwards: field validation, JSON input
//! parsing, the `POST` to the backend, result formatting, busy buttons,
//! notifications and theming.
//!
//! # Example
//!
//! ```rust
//! use linalg_ui::prelude::*;
//! use serde_json::json;
//!
//! let mock = MockTransport::new().respond("/unit_vector", json!({"unit_vector": [0.6, 0.8]}));
//! let controller = Controller::new(mock, ClientConfig::default());
//! controller.set_field("vectorInput", "[3,4]");
//!
//! let outcome = futures::executor::block_on(controller.click("btn-unit-vector"));
//! let ui = controller.ui().borrow();
//! assert_eq!(ui.result().unwrap().message(), "Unit Vector: [0.6000, 0.8000]");
//! assert!(outcome.unwrap().is_success());
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod controller;
pub mod core;
pub mod theme;
pub mod transport;
pub mod ui;
pub mod visualization;

/// Browser bindings: `fetch` transport, `localStorage` theme store and the
/// exported calculator
#[cfg(feature = "wasm")]
pub mod wasm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{ClientConfig, ConfigError};
    pub use crate::controller::{Controller, DispatchOutcome, SharedUi};
    pub use crate::core::{
        format_fixed, interpret, parse_field, Operation, OperationRequest, OperationResult,
        ParseError,
    };
    pub use crate::theme::{
        FileThemeStore, MemoryThemeStore, Theme, ThemeManager, ThemeStore, ThemeStoreError,
    };
    #[cfg(feature = "http")]
    pub use crate::transport::HttpTransport;
    pub use crate::transport::{
        CapturedRequest, MockReply, MockTransport, Transport, TransportError,
    };
    pub use crate::ui::{
        DomElement, Notification, NotificationKind, NotificationPhase, Section, UiState,
    };
    pub use crate::visualization::{PlotCapability, Scene};
}
