// wizflow/src/wizard/execution.rs

//! Contains `Wizard::run()` and `Wizard::run_outcome()`, which drive the step
//! plan to completion or cancellation.

use crate::core::control::{WizardOutcome, WizardStatus};
use crate::core::step::StepOutcome;
use crate::error::WizardError;
use crate::wizard::definition::Wizard;
use crate::wizard::history::Session;
use crate::wizard::hooks::WizardEvent;
use tracing::{event, instrument, span, Instrument, Level};

impl<T, R, Err> Wizard<T, R, Err>
where
  T: Clone + Send + Sync + 'static,
  R: 'static,
  Err: std::error::Error + From<WizardError> + Send + Sync + 'static,
{
  /// Runs the wizard and returns the mapped result.
  ///
  /// Returns `None` when the user backed out of the first step, and also when
  /// a step failed (the failure is logged). Use [`Wizard::run_outcome`] to
  /// tell the two apart.
  pub async fn run(&mut self) -> Option<R> {
    match self.run_outcome().await {
      Ok(outcome) => outcome.into_result(),
      Err(e) => {
        event!(Level::ERROR, wizard = %self.name, error = %e, "Wizard terminated by an error.");
        None
      }
    }
  }

  /// Runs the wizard.
  ///
  /// - `Ok(WizardOutcome::Completed(result))` once every planned step accepted a state.
  /// - `Ok(WizardOutcome::Cancelled)` when the user backed out of the first step.
  /// - `Err(e)` when a step returned an error or recorded a fault in its state,
  ///   or when the wizard already ran and was not reset.
  ///
  /// A step returning `StepOutcome::back()` re-invokes the previous step with
  /// the state that step accepted last, after dropping any steps that were
  /// inserted after it.
  #[instrument(
        name = "Wizard::run",
        skip_all,
        fields(
            wizard = %self.name,
            wizard_state_type = %std::any::type_name::<T>(),
            num_steps = self.steps.len(),
        ),
        err(Display)
    )]
  pub async fn run_outcome(&mut self) -> Result<WizardOutcome<R>, Err> {
    if self.status != WizardStatus::Pending {
      event!(Level::ERROR, status = ?self.status, "Run requested on a wizard that was not reset.");
      return Err(Err::from(WizardError::SessionFinished {
        wizard: self.name.clone(),
        status: self.status,
      }));
    }

    event!(Level::DEBUG, "Wizard run starting.");
    self.status = WizardStatus::Running;
    self.final_state = None;

    let mut session = Session::start(self.initial_state.clone(), self.steps.clone());
    self.emit(WizardEvent::Started {
      progress: session.state().progress(),
    });

    while let Some(step) = session.current_step().cloned() {
      let step_index = session.cursor();

      if !session.is_revisit() && step.should_skip(session.state()) {
        event!(Level::DEBUG, step_name = %step.name, step_index, "Step skipped due to 'skip_if' condition.");
        session.skip();
        self.emit(WizardEvent::Skipped { step: step.name.clone() });
        continue;
      }

      let progress = session.state().progress();
      let step_span = span!(
        Level::INFO,
        "wizard_step",
        step_name = %step.name,
        step_index,
        current_step = progress.current,
        total_steps = progress.total,
        planned_steps = session.plan_len(),
        history_depth = session.depth(),
      );

      let StepOutcome {
        next_state,
        next_steps,
      } = match step.invoke(session.state().clone()).instrument(step_span).await {
        Ok(outcome) => outcome,
        Err(e) => return Err(self.fail(&step.name, e)),
      };

      match next_state {
        Some(accepted) => {
          if let Some(fault) = accepted.error.clone() {
            let fault_err = Err::from(WizardError::StepFault {
              step_name: step.name.clone(),
              source: fault,
            });
            return Err(self.fail(&step.name, fault_err));
          }

          let inserted = session.advance(accepted, next_steps);
          let progress = session.state().progress();
          if inserted > 0 {
            event!(Level::DEBUG, step_name = %step.name, inserted, %progress, "Step accepted; follow-up steps inserted.");
          } else {
            event!(Level::DEBUG, step_name = %step.name, %progress, "Step accepted.");
          }
          self.emit(WizardEvent::Advanced {
            step: step.name.clone(),
            progress,
            inserted,
          });
        }
        None => {
          if !session.rewind() {
            event!(Level::INFO, step_name = %step.name, "User backed out of the first step. Wizard cancelled.");
            self.status = WizardStatus::Cancelled;
            self.emit(WizardEvent::Cancelled);
            return Ok(WizardOutcome::Cancelled);
          }

          let returning_to = session.current_step().map(|s| s.name.clone()).unwrap_or_default();
          let progress = session.state().progress();
          event!(Level::DEBUG, step_name = %step.name, returning_to = %returning_to, %progress, "User went back.");
          self.emit(WizardEvent::Rewound {
            step: returning_to,
            progress,
          });
        }
      }
    }

    let final_state = session.into_state();
    let result = self.result_mapper.map(&final_state);
    let progress = final_state.progress();
    self.final_state = Some(final_state);
    self.status = WizardStatus::Completed;
    event!(Level::INFO, %progress, "Wizard completed.");
    self.emit(WizardEvent::Completed { progress });
    Ok(WizardOutcome::Completed(result))
  }

  fn fail(&mut self, step_name: &str, err: Err) -> Err {
    event!(Level::ERROR, step_name, error = %err, "Step failed. Wizard cancelled.");
    self.status = WizardStatus::Cancelled;
    self.emit(WizardEvent::Failed {
      step: step_name.to_string(),
      message: err.to_string(),
    });
    err
  }
}
