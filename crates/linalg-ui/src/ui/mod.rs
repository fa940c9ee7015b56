//! Explicit UI state for the calculator page
//!
//! All page state lives in [`UiState`]: fields, buttons, the result area,
//! live notifications, the visualization scene and the active theme. Time
//! only moves through [`UiState::advance`], which expires error markers and
//! notifications.

mod dom;
pub mod toast;
mod view;

pub use dom::DomElement;
pub use toast::{Notification, NotificationKind, NotificationPhase, NotificationStack};
pub use view::{ToastChanges, ViewCursor};

use crate::config::ClientConfig;
use crate::core::{Operation, OperationResult};
use crate::theme::Theme;
use crate::visualization::Scene;
use std::collections::HashMap;
use std::time::Duration;

/// Class applied to a blank required field
pub const INPUT_ERROR_CLASS: &str = "input-error";
/// Class applied to a busy button
pub const BUSY_CLASS: &str = "btn-loading";
/// Label shown on a busy button
pub const BUSY_LABEL: &str = "Processing…";
/// Notification pushed when required fields are blank
pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all required fields.";

const ORIGINAL_LABEL_ATTR: &str = "data-original-label";

/// A block of the page that owns fields and one primary button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// A backend operation
    Operation(Operation),
    /// Vector plotting
    Visualization,
}

impl Section {
    /// Visualization fields: first vector, optional second vector
    pub const VISUALIZATION_FIELDS: [&'static str; 2] = ["visV1", "visV2"];
    /// Visualization trigger
    pub const VISUALIZE_BUTTON: &'static str = "btn-visualize";

    /// Every section, in page order
    pub fn all() -> impl Iterator<Item = Self> {
        Operation::ALL
            .into_iter()
            .map(Self::Operation)
            .chain(std::iter::once(Self::Visualization))
    }

    /// Field ids owned by this section
    #[must_use]
    pub const fn field_ids(self) -> &'static [&'static str] {
        match self {
            Self::Operation(op) => op.field_ids(),
            Self::Visualization => &Self::VISUALIZATION_FIELDS,
        }
    }

    /// Primary button id
    #[must_use]
    pub const fn button_id(self) -> &'static str {
        match self {
            Self::Operation(op) => op.button_id(),
            Self::Visualization => Self::VISUALIZE_BUTTON,
        }
    }

    /// Primary button label
    #[must_use]
    pub const fn button_label(self) -> &'static str {
        match self {
            Self::Operation(Operation::Orthogonality | Operation::Parallelism) => "Check",
            Self::Operation(Operation::SolveSystem) => "Solve",
            Self::Operation(Operation::Transpose) => "Transpose",
            Self::Operation(Operation::Multiply) => "Multiply",
            Self::Operation(_) => "Calculate",
            Self::Visualization => "Visualize",
        }
    }

    /// Section owning a field
    #[must_use]
    pub fn from_field(id: &str) -> Option<Self> {
        Self::all().find(|s| s.field_ids().contains(&id))
    }

    /// Section whose primary button has this id
    #[must_use]
    pub fn from_button(id: &str) -> Option<Self> {
        Self::all().find(|s| s.button_id() == id)
    }
}

#[derive(Debug, Clone)]
struct ErrorMarker {
    field_id: String,
    expires_at: Duration,
}

/// Page state
#[derive(Debug, Clone)]
pub struct UiState {
    elements: HashMap<String, DomElement>,
    result: Option<OperationResult>,
    scroll_requests: usize,
    notifications: NotificationStack,
    markers: Vec<ErrorMarker>,
    canvas: Scene,
    theme: Theme,
    now: Duration,
    error_marker_for: Duration,
    notification_max_chars: usize,
}

impl Default for UiState {
    fn default() -> Self {
        Self::calculator(&ClientConfig::default())
    }
}

impl UiState {
    /// Creates the full calculator page: every section's fields and button
    #[must_use]
    pub fn calculator(config: &ClientConfig) -> Self {
        let mut elements = HashMap::new();
        for section in Section::all() {
            for id in section.field_ids() {
                elements.insert((*id).to_string(), DomElement::text_input(id));
            }
            let button = DomElement::button(section.button_id(), section.button_label());
            elements.insert(button.id.clone(), button);
        }

        Self {
            elements,
            result: None,
            scroll_requests: 0,
            notifications: NotificationStack::new(
                config.notification_duration(),
                config.notification_exit(),
            ),
            markers: Vec::new(),
            canvas: Scene::Placeholder,
            theme: Theme::default(),
            now: Duration::ZERO,
            error_marker_for: config.error_marker(),
            notification_max_chars: config.notification_max_chars,
        }
    }

    /// Gets an element by ID
    #[must_use]
    pub fn element(&self, id: &str) -> Option<&DomElement> {
        self.elements.get(id)
    }

    /// All elements
    pub fn elements(&self) -> impl Iterator<Item = &DomElement> {
        self.elements.values()
    }

    /// Current text of a field; empty for unknown ids
    #[must_use]
    pub fn field_value(&self, id: &str) -> &str {
        self.elements
            .get(id)
            .map_or("", |e| e.text_content.as_str())
    }

    /// User edit: sets the text and clears any error marker on the field
    pub fn set_field_value(&mut self, id: &str, value: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.set_text(value);
            elem.remove_class(INPUT_ERROR_CLASS);
        }
        self.markers.retain(|m| m.field_id != id);
    }

    /// Checks that every listed field is non-blank.
    ///
    /// Blank fields get a transient error marker and a single notification
    /// reports the failure.
    pub fn validate_required(&mut self, field_ids: &[&str]) -> bool {
        let mut valid = true;
        for id in field_ids {
            let blank = self
                .elements
                .get(*id)
                .map_or(true, |e| crate::core::parser::is_blank(&e.text_content));
            if blank {
                valid = false;
                self.mark_error(id);
            }
        }
        if !valid {
            self.notify(MISSING_FIELDS_MESSAGE, NotificationKind::Error);
        }
        valid
    }

    fn mark_error(&mut self, id: &str) {
        let Some(elem) = self.elements.get_mut(id) else {
            return;
        };
        elem.add_class(INPUT_ERROR_CLASS);
        self.markers.retain(|m| m.field_id != id);
        self.markers.push(ErrorMarker {
            field_id: id.to_string(),
            expires_at: self.now + self.error_marker_for,
        });
    }

    /// True while the field carries the error marker
    #[must_use]
    pub fn has_error_marker(&self, id: &str) -> bool {
        self.elements
            .get(id)
            .is_some_and(|e| e.has_class(INPUT_ERROR_CLASS))
    }

    /// Replaces the result area and raises a matching notification
    pub fn render_result(&mut self, message: &str, is_error: bool) {
        self.result = Some(if is_error {
            OperationResult::Failure(message.to_string())
        } else {
            OperationResult::Success(message.to_string())
        });
        self.scroll_requests += 1;

        let kind = if is_error {
            NotificationKind::Error
        } else {
            NotificationKind::Success
        };
        let short = toast::truncate_message(message, self.notification_max_chars);
        self.notify(&short, kind);
    }

    /// Shows an operation result
    pub fn show(&mut self, result: &OperationResult) {
        self.render_result(result.message(), result.is_error());
    }

    /// Current result area content
    #[must_use]
    pub fn result(&self) -> Option<&OperationResult> {
        self.result.as_ref()
    }

    /// How many times the result area asked to be scrolled into view
    #[must_use]
    pub const fn scroll_requests(&self) -> usize {
        self.scroll_requests
    }

    /// Pushes a transient notification
    pub fn notify(&mut self, message: &str, kind: NotificationKind) -> u64 {
        self.notifications.push(message, kind, self.now)
    }

    /// Live notifications
    #[must_use]
    pub const fn notifications(&self) -> &NotificationStack {
        &self.notifications
    }

    /// Enters or leaves the busy presentation for a button
    pub fn set_busy(&mut self, button_id: &str, busy: bool) {
        let Some(button) = self.elements.get_mut(button_id) else {
            return;
        };
        if busy {
            let label = button.text_content.clone();
            button.set_attr(ORIGINAL_LABEL_ATTR, &label);
            button.disabled = true;
            button.add_class(BUSY_CLASS);
            button.set_text(BUSY_LABEL);
        } else {
            button.disabled = false;
            button.remove_class(BUSY_CLASS);
            if let Some(label) = button.take_attr(ORIGINAL_LABEL_ATTR) {
                button.set_text(&label);
            }
        }
    }

    /// True while the button is disabled by an in-flight request
    #[must_use]
    pub fn is_busy(&self, button_id: &str) -> bool {
        self.elements.get(button_id).is_some_and(|b| b.disabled)
    }

    /// Button label as currently shown
    #[must_use]
    pub fn button_label(&self, button_id: &str) -> Option<&str> {
        self.elements
            .get(button_id)
            .map(|b| b.text_content.as_str())
    }

    /// Visualization area content
    #[must_use]
    pub const fn canvas(&self) -> &Scene {
        &self.canvas
    }

    /// Replaces the visualization area content
    pub fn set_canvas(&mut self, scene: Scene) {
        self.canvas = scene;
    }

    /// Active theme
    #[must_use]
    pub const fn theme(&self) -> Theme {
        self.theme
    }

    /// Switches the palette used by later renders
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Logical time
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Moves logical time forward, expiring markers and notifications
    pub fn advance(&mut self, elapsed: Duration) {
        self.now += elapsed;
        let now = self.now;
        let (expired, live): (Vec<_>, Vec<_>) =
            self.markers.drain(..).partition(|m| m.expires_at <= now);
        self.markers = live;
        for marker in expired {
            if let Some(elem) = self.elements.get_mut(&marker.field_id) {
                elem.remove_class(INPUT_ERROR_CLASS);
            }
        }
        self.notifications.advance(now);
    }

    /// Empties a section's fields and markers; resets the canvas for the
    /// visualization section
    pub fn clear_section(&mut self, section: Section) {
        for id in section.field_ids() {
            self.set_field_value(id, "");
        }
        if section == Section::Visualization {
            self.canvas = Scene::Placeholder;
        }
        self.notify("Section cleared", NotificationKind::Success);
    }
}
