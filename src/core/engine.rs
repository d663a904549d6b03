use crate::core::model::{Action, SurfaceOutput};
use crate::core::ports::EditSurface;
use crate::core::session::BudgetSession;
use crate::utils::error::{BudgetError, Result};

/// The interactive driver: presents the startup summary, then runs one
/// action at a time to completion. Failures of individual actions are
/// presented and the session continues; only surface I/O errors abort.
pub struct SessionEngine<U: EditSurface> {
    session: BudgetSession,
    surface: U,
}

impl<U: EditSurface> SessionEngine<U> {
    pub fn new(session: BudgetSession, surface: U) -> Self {
        Self { session, surface }
    }

    pub fn run(&mut self) -> Result<()> {
        // Initial summary, like the sheet totals shown before any edit
        match self.session.summarize() {
            Ok(summary) => self.surface.present(&SurfaceOutput::Summary(summary))?,
            Err(err) => self.present_error(&err)?,
        }

        while let Some(action) = self.surface.next_action()? {
            match self.execute(action) {
                Ok(output) => self.surface.present(&output)?,
                Err(err) => self.present_error(&err)?,
            }
        }

        tracing::info!("Session ended");
        Ok(())
    }

    fn execute(&mut self, action: Action) -> Result<SurfaceOutput> {
        match action {
            Action::ShowSummary => self.session.summarize().map(SurfaceOutput::Summary),
            Action::UpdateServices(edits) => {
                tracing::info!("Applying {} edited service rows", edits.len());
                self.session
                    .apply_service_edits(edits)
                    .map(SurfaceOutput::ServicesTotal)
            }
            Action::UpdateHumanCapital(edits) => {
                tracing::info!("Summing {} edited human-capital rows", edits.len());
                self.session
                    .update_human_capital(edits)
                    .map(SurfaceOutput::HumanCapitalTotal)
            }
            Action::GrandTotal => self.session.grand_total().map(SurfaceOutput::GrandTotal),
        }
    }

    fn present_error(&mut self, err: &BudgetError) -> Result<()> {
        tracing::error!("Action failed: {}", err);
        self.surface.present(&SurfaceOutput::Error {
            message: err.user_friendly_message(),
            suggestion: err.recovery_suggestion(),
        })
    }

    pub fn session(&self) -> &BudgetSession {
        &self.session
    }
}
