//! Command execution
//!
//! Each subcommand fills its section's fields with the raw flag text and
//! presses the section's button, so validation and parsing behave exactly
//! as on the page.

use crate::commands::Commands;
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::Reporter;
use linalg_ui::controller::{Controller, DispatchOutcome};
use linalg_ui::transport::Transport;

/// Runs one command against a backend
#[derive(Debug)]
pub struct CommandRunner<T> {
    controller: Controller<T>,
    config: CliConfig,
    reporter: Reporter,
}

impl<T: Transport> CommandRunner<T> {
    /// Create a runner over `transport`
    pub fn new(transport: T, config: CliConfig) -> Self {
        let reporter = Reporter::new(config.color.should_color(), config.verbosity.is_quiet());
        Self {
            controller: Controller::new(transport, config.client.clone()),
            config,
            reporter,
        }
    }

    /// Underlying controller
    pub fn controller(&self) -> &Controller<T> {
        &self.controller
    }

    /// Executes `command`; `Ok(true)` only for a rendered success
    pub async fn run(&self, command: &Commands) -> CliResult<bool> {
        let inputs = command.inputs();
        for input in &inputs {
            self.controller.set_field(input.field_id, input.text);
        }

        let outcome = match command {
            Commands::Visualize(args) => self.controller.visualize(args.mode.into()),
            _ => {
                let button = command.section().button_id();
                self.controller.click(button).await.ok_or_else(|| {
                    CliError::invalid_argument(format!("no section owns button {button}"))
                })?
            }
        };

        self.report(command, &outcome)?;
        Ok(outcome.is_success())
    }

    fn report(&self, command: &Commands, outcome: &DispatchOutcome) -> CliResult<()> {
        let ui = self.controller.ui().borrow();
        if self.config.verbosity.is_verbose() {
            for notification in ui.notifications().iter() {
                self.reporter.notification(notification);
            }
        }

        match outcome {
            DispatchOutcome::Completed(result) => {
                self.reporter.result(result);
                if let (Commands::Visualize(args), false) = (command, result.is_error()) {
                    self.reporter.scene(ui.canvas(), args.json)?;
                }
            }
            DispatchOutcome::Invalid => {
                if let Some(result) = ui.result() {
                    self.reporter.result(result);
                } else if let Some(notification) = ui.notifications().last() {
                    self.reporter.failure(&notification.message);
                }
                for input in command.inputs() {
                    if ui.has_error_marker(input.field_id) {
                        self.reporter.hint(&format!("missing: {}", input.flag));
                    }
                }
            }
            DispatchOutcome::Ignored => self.reporter.failure("request already in flight"),
        }
        Ok(())
    }
}
