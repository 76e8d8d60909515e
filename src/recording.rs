//! An offline transport that records commands instead of sending them.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::errors::{ConfigError, SessionError};
use crate::geometry::Wrench;
use crate::session::{Command, Transport};

/// One stored support reaction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReactionRecord {
    /// Node id.
    pub node: u32,
    /// Load case number.
    pub case: u32,
    /// Reaction components.
    pub reaction: Wrench,
}

/// Transport that keeps every command in memory.
///
/// Create commands are answered with sequential ids, load cases and
/// combinations with the requested number, and reaction queries from a
/// table of canned results. Useful for dry runs and tests.
#[derive(Clone, Debug, Default)]
pub struct RecordingTransport {
    /// Commands in the order received.
    commands: Vec<Command>,
    /// Canned reactions keyed by `(node, case)`.
    reactions: HashMap<(u32, u32), Wrench>,
    /// Last id handed out per id namespace.
    counters: HashMap<&'static str, u32>,
    /// Method that should be rejected, for failure injection.
    fail_on: Option<&'static str>,
}

impl RecordingTransport {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `reaction` for `node` under `case`.
    #[must_use]
    pub fn with_reaction(mut self, node: u32, case: u32, reaction: Wrench) -> Self {
        self.reactions.insert((node, case), reaction);
        self
    }

    /// Reject every command whose method is `method`.
    #[must_use]
    pub fn fail_on(mut self, method: &'static str) -> Self {
        self.fail_on = Some(method);
        self
    }

    /// Load canned reactions from a JSON array of [`ReactionRecord`]s.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed.
    pub fn from_reaction_file(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        let records: Vec<ReactionRecord> =
            serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
                path: display,
                source,
            })?;
        log::info!("loaded {} canned reactions", records.len());
        Ok(records
            .into_iter()
            .fold(Self::new(), |recorder, record| {
                recorder.with_reaction(record.node, record.case, record.reaction)
            }))
    }

    /// Commands received so far.
    #[must_use]
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// The recorded commands as a pretty-printed JSON array.
    ///
    /// # Errors
    ///
    /// Returns the serialisation error, which cannot occur for finite values.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.commands)
    }

    fn next_id(&mut self, namespace: &'static str) -> Value {
        let counter = self.counters.entry(namespace).or_insert(0);
        *counter += 1;
        json!(*counter)
    }
}

impl Transport for RecordingTransport {
    fn call(&mut self, command: &Command) -> Result<Value, SessionError> {
        self.commands.push(command.clone());
        if self.fail_on == Some(command.method()) {
            return Err(SessionError::Rejected {
                method: command.method(),
                message: "failure injected by recorder".to_string(),
            });
        }
        let value = match command {
            Command::CreateBeamPropertyFromTable { .. }
            | Command::CreateAnglePropertyFromTable { .. } => self.next_id("property"),
            Command::CreateMemberReleaseSpec { .. }
            | Command::CreateMemberPartialReleaseSpec { .. } => self.next_id("spec"),
            Command::CreateSupportFixed | Command::CreateSupportPinned => {
                self.next_id("support")
            }
            Command::CreateNewPrimaryLoad { number, .. }
            | Command::CreateNewLoadCombination { number, .. } => json!(number),
            Command::GetNodeReaction { node, case, dof } => {
                let reaction =
                    self.reactions
                        .get(&(*node, *case))
                        .ok_or_else(|| SessionError::Rejected {
                            method: command.method(),
                            message: format!("no results for node {node} in load case {case}"),
                        })?;
                let component = reaction.components().get(usize::from(*dof)).copied();
                json!(component.ok_or_else(|| SessionError::Rejected {
                    method: command.method(),
                    message: format!("degree of freedom {dof} is outside 0..=5"),
                })?)
            }
            _ => Value::Null,
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Session;

    #[test]
    fn ids_are_sequential_per_namespace() {
        let mut session = Session::new(RecordingTransport::new());
        assert_eq!(session.create_beam_property(1, "W14X90").expect("id"), 1);
        assert_eq!(session.create_angle_property(1, "L40404").expect("id"), 2);
        assert_eq!(session.create_support_fixed().expect("id"), 1);
        assert_eq!(session.create_support_pinned().expect("id"), 2);
        assert_eq!(session.open_load_case("WIND", 3, 7).expect("case"), 7);
        assert_eq!(session.transport().commands().len(), 6);
    }

    #[test]
    fn reactions_come_from_the_table() {
        let reaction = Wrench::from_components([1.0, -250.0, 0.0, 0.0, 0.0, 40.0]);
        let mut session = Session::new(RecordingTransport::new().with_reaction(1, 1, reaction));
        assert_eq!(session.node_reaction(1, 1).expect("known"), reaction);

        let error = session.node_reaction(2, 1).expect_err("unknown node");
        assert!(matches!(error, SessionError::Rejected { .. }));
    }

    #[test]
    fn out_of_range_dof_is_rejected() {
        let reaction = Wrench::from_components([1.0, -250.0, 0.0, 0.0, 0.0, 40.0]);
        let mut recorder = RecordingTransport::new().with_reaction(1, 1, reaction);
        let error = recorder
            .call(&Command::GetNodeReaction {
                node: 1,
                case: 1,
                dof: 6,
            })
            .expect_err("only six components");
        assert!(matches!(
            error,
            SessionError::Rejected {
                method: "GetNodeReaction",
                ..
            }
        ));
        let last = recorder
            .call(&Command::GetNodeReaction {
                node: 1,
                case: 1,
                dof: 5,
            })
            .expect("MZ available");
        assert_eq!(last, json!(40.0));
    }

    #[test]
    fn reaction_file_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "footingx-reactions-{}.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r#"[{"node": 1, "case": 3, "reaction": {"fx": 0.0, "fy": 120.0, "fz": 0.0, "mx": 0.0, "my": 0.0, "mz": -8.5}}]"#,
        )
        .expect("temp file written");
        let recorder = RecordingTransport::from_reaction_file(&path).expect("valid file");
        std::fs::remove_file(&path).ok();

        let mut session = Session::new(recorder);
        let reaction = session.node_reaction(1, 3).expect("loaded");
        assert_eq!(reaction.mz, -8.5);
    }

    #[test]
    fn recorded_commands_serialise() {
        let mut session = Session::new(RecordingTransport::new());
        session.perform_analysis().expect("recorded");
        let json = session.transport().to_json().expect("serialisable");
        assert!(json.contains("PerformAnalysis"));
    }
}
