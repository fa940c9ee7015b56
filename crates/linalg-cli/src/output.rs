//! Terminal rendering of results, notifications and scenes

use console::{style, Term};
use linalg_ui::core::OperationResult;
use linalg_ui::ui::{Notification, NotificationKind};
use linalg_ui::visualization::{DrawCommand, Scene};

/// Writes results to stdout and failures to stderr
#[derive(Debug)]
pub struct Reporter {
    out: Term,
    err: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Reporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            use_color,
            quiet,
        }
    }

    fn prefix(&self, is_error: bool) -> String {
        match (self.use_color, is_error) {
            (true, false) => style("✓").green().bold().to_string(),
            (true, true) => style("✗").red().bold().to_string(),
            (false, _) => String::new(),
        }
    }

    /// Labelled line for a result, as shown in the page's result area
    #[must_use]
    pub fn format_result(&self, result: &OperationResult) -> String {
        let line = format!("{}: {}", result.label(), result.message());
        let prefix = self.prefix(result.is_error());
        if prefix.is_empty() {
            line
        } else {
            format!("{prefix} {line}")
        }
    }

    /// Prints a result; failures go to stderr and ignore quiet mode
    pub fn result(&self, result: &OperationResult) {
        let line = self.format_result(result);
        if result.is_error() {
            let _ = self.err.write_line(&line);
        } else if !self.quiet {
            let _ = self.out.write_line(&line);
        }
    }

    /// Prints a failure that has no result block
    pub fn failure(&self, message: &str) {
        let prefix = self.prefix(true);
        let line = if prefix.is_empty() {
            format!("Error: {message}")
        } else {
            format!("{prefix} Error: {message}")
        };
        let _ = self.err.write_line(&line);
    }

    /// Prints a hint under a failure
    pub fn hint(&self, message: &str) {
        let line = if self.use_color {
            style(format!("  {message}")).dim().to_string()
        } else {
            format!("  {message}")
        };
        let _ = self.err.write_line(&line);
    }

    /// Prints a notification in verbose mode
    pub fn notification(&self, notification: &Notification) {
        let tag = match notification.kind {
            NotificationKind::Success => "notice",
            NotificationKind::Error => "alert",
        };
        let tag = if self.use_color {
            style(tag).cyan().to_string()
        } else {
            tag.to_string()
        };
        let _ = self.err.write_line(&format!("[{tag}] {}", notification.message));
    }

    /// Prints a scene summary, or the raw scene as JSON
    pub fn scene(&self, scene: &Scene, json: bool) -> serde_json::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let text = if json {
            serde_json::to_string_pretty(scene)?
        } else {
            summarize_scene(scene)
        };
        let _ = self.out.write_line(&text);
        Ok(())
    }
}

/// Short text description of a scene
#[must_use]
pub fn summarize_scene(scene: &Scene) -> String {
    match scene {
        Scene::Placeholder => "Enter a vector above and click Visualize".to_string(),
        Scene::Plot3d(plot) => {
            let mut lines = vec![format!(
                "{} (axes {}..{})",
                plot.title, plot.axis_range[0], plot.axis_range[1]
            )];
            for trace in &plot.traces {
                lines.push(format!(
                    "  {}: ({}, {}, {})",
                    trace.name, trace.x[1], trace.y[1], trace.z[1]
                ));
            }
            lines.join("\n")
        }
        Scene::Canvas(canvas) => {
            let arrows = canvas
                .commands
                .iter()
                .filter(|c| matches!(c, DrawCommand::FillPolygon { .. }))
                .count();
            format!(
                "Canvas {}x{}: {} draw commands, {arrows} arrow(s)",
                canvas.width,
                canvas.height,
                canvas.commands.len()
            )
        }
    }
}
