//! Application state behind the footing form.
//!
//! The form is a set of free-text fields and two actions. All state lives in
//! [`FormState`], which each action receives explicitly.

use crate::errors::{DesignError, ImportError};
use crate::footing::{design_footing, parse_number, FootingDesign, FootingInputs};
use crate::plan::PlanView;
use crate::provisions::DesignProvisions;
use crate::reactions::{import_reactions, ImportedLoads};
use crate::report::render_design;
use crate::session::{Session, Transport};

/// Message shown to the user after an action.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Status {
    /// No action has run yet.
    #[default]
    Idle,
    /// The last action succeeded.
    Info(String),
    /// The last action failed.
    Error(String),
}

/// Text of every form field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormFields {
    /// Support node number.
    pub node: String,
    /// Load case number.
    pub load_case: String,
    /// Factored axial load (kN), auto-filled by import.
    pub pu: String,
    /// Factored moment (kN·m), auto-filled by import.
    pub mu: String,
    /// Allowable soil bearing (kN/m²).
    pub sbc: String,
    /// Concrete strength f'c (MPa).
    pub fc: String,
    /// Steel yield strength fy (MPa).
    pub fy: String,
    /// Wall length (m).
    pub wall_length: String,
    /// Wall thickness (m).
    pub wall_thickness: String,
}

impl FormFields {
    /// Parse the seven design fields.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::InvalidInput`] naming the first non-numeric field.
    pub fn design_inputs(&self) -> Result<FootingInputs, DesignError> {
        Ok(FootingInputs {
            pu: parse_number("Pu", &self.pu)?,
            mu: parse_number("Mu", &self.mu)?,
            sbc: parse_number("allowable soil bearing", &self.sbc)?,
            fc: parse_number("concrete strength f'c", &self.fc)?,
            fy: parse_number("steel yield strength fy", &self.fy)?,
            wall_length: parse_number("wall length", &self.wall_length)?,
            wall_thickness: parse_number("wall thickness", &self.wall_thickness)?,
        })
    }
}

fn import_message(error: &ImportError) -> String {
    match error {
        ImportError::ConnectionUnavailable(endpoint) => {
            format!("Analysis host not connected ({endpoint}).")
        }
        other => format!("Failed to extract reactions: {other}"),
    }
}

/// Everything the form displays.
#[derive(Clone, Debug, Default)]
pub struct FormState {
    /// Field contents.
    pub fields: FormFields,
    /// Outcome of the last action.
    pub status: Status,
    /// Text report of the last successful design.
    pub report: Option<String>,
    /// Plan of the last successful design. Replaced on every run.
    pub plan: Option<PlanView>,
}

impl FormState {
    /// Create a form with the given field contents.
    #[must_use]
    pub fn new(fields: FormFields) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    /// "Import reactions" action: read the reaction and fill `Pu` and `Mu`.
    ///
    /// # Errors
    ///
    /// Returns the [`ImportError`]; the status message is set as well.
    pub fn import_reactions<T: Transport>(
        &mut self,
        session: &mut Session<T>,
    ) -> Result<ImportedLoads, ImportError> {
        match import_reactions(session, &self.fields.node, &self.fields.load_case) {
            Ok(loads) => {
                self.fields.pu = format!("{:.2}", loads.pu);
                self.fields.mu = format!("{:.2}", loads.mu);
                self.status = Status::Info("Reactions imported from analysis host.".to_string());
                Ok(loads)
            }
            Err(error) => {
                self.status = Status::Error(import_message(&error));
                Err(error)
            }
        }
    }

    /// Record that neither the host nor a reaction file could be opened for an import.
    pub fn connection_failed(&mut self, error: &ImportError) {
        self.status = Status::Error(import_message(error));
    }

    /// "Run design" action: parse, design, report and redraw the plan.
    ///
    /// # Errors
    ///
    /// Returns the [`DesignError`]; the previous report and plan are cleared and
    /// the status message is set.
    pub fn run_design(
        &mut self,
        provisions: &DesignProvisions,
    ) -> Result<FootingDesign, DesignError> {
        let result = self
            .fields
            .design_inputs()
            .and_then(|inputs| design_footing(&inputs, provisions).map(|design| (inputs, design)));
        match result {
            Ok((inputs, design)) => {
                self.report = Some(render_design(&inputs, &design));
                self.plan = Some(PlanView::from_design(
                    &design,
                    inputs.wall_length,
                    inputs.wall_thickness,
                ));
                self.status = Status::Info("Design complete.".to_string());
                Ok(design)
            }
            Err(error) => {
                self.report = None;
                self.plan = None;
                self.status = Status::Error(format!("Check input values: {error}"));
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Wrench;
    use crate::recording::RecordingTransport;

    fn filled() -> FormFields {
        FormFields {
            node: "1".to_string(),
            load_case: "1".to_string(),
            pu: String::new(),
            mu: String::new(),
            sbc: "200".to_string(),
            fc: "25".to_string(),
            fy: "415".to_string(),
            wall_length: "2".to_string(),
            wall_thickness: "0.3".to_string(),
        }
    }

    #[test]
    fn import_then_design() {
        let reaction = Wrench::from_components([4.0, -500.0, 0.0, 0.0, 0.0, 50.0]);
        let mut session = Session::new(RecordingTransport::new().with_reaction(1, 1, reaction));
        let mut form = FormState::new(filled());

        form.import_reactions(&mut session).expect("import succeeds");
        assert_eq!(form.fields.pu, "500.00");
        assert_eq!(form.fields.mu, "50.00");
        assert!(matches!(form.status, Status::Info(_)));

        let design = form
            .run_design(&DesignProvisions::default())
            .expect("design succeeds");
        assert!((design.area_required - 2.5).abs() < 1.0e-12);
        assert!(form.report.as_deref().is_some_and(|r| r.contains("FOOTING SIZE")));
        assert!(form.plan.is_some());
    }

    #[test]
    fn empty_pu_is_invalid_input_and_clears_previous_plan() {
        let mut form = FormState::new(FormFields {
            pu: "500".to_string(),
            mu: "50".to_string(),
            ..filled()
        });
        form.run_design(&DesignProvisions::default())
            .expect("first design succeeds");
        assert!(form.plan.is_some());

        form.fields.pu.clear();
        let error = form
            .run_design(&DesignProvisions::default())
            .expect_err("empty field rejected");
        assert!(matches!(error, DesignError::InvalidInput { field: "Pu", .. }));
        assert!(form.plan.is_none());
        assert!(matches!(form.status, Status::Error(ref message) if message.contains("Pu")));
    }

    #[test]
    fn failed_import_keeps_fields() {
        let mut session = Session::new(RecordingTransport::new());
        let mut form = FormState::new(FormFields {
            pu: "12".to_string(),
            ..filled()
        });
        form.import_reactions(&mut session)
            .expect_err("no reaction stored");
        assert_eq!(form.fields.pu, "12");
        assert!(matches!(form.status, Status::Error(ref message) if message.starts_with("Failed")));
    }

    #[test]
    fn missing_reaction_file_is_not_a_connection_failure() {
        let path = std::env::temp_dir().join("footingx-no-such-reactions.json");
        let error = ImportError::from(
            RecordingTransport::from_reaction_file(&path).expect_err("file is missing"),
        );
        assert!(matches!(error, ImportError::ReactionFile(_)));

        let mut form = FormState::default();
        form.connection_failed(&error);
        assert!(matches!(
            form.status,
            Status::Error(ref message)
                if message.starts_with("Failed to extract reactions: cannot load reactions")
        ));
    }

    #[test]
    fn connection_failure_message_names_the_endpoint() {
        let mut form = FormState::default();
        form.connection_failed(&ImportError::ConnectionUnavailable(
            "http://127.0.0.1:8765/rpc".to_string(),
        ));
        assert_eq!(
            form.status,
            Status::Error("Analysis host not connected (http://127.0.0.1:8765/rpc).".to_string())
        );
    }
}
