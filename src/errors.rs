//! Error types produced while designing footings or talking to the analysis host.

use thiserror::Error;

/// Error returned when a footing design cannot be produced.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DesignError {
    /// Returned when a form field does not contain a number.
    #[error("{field} must be numeric (received {value:?})")]
    InvalidInput {
        /// Label of the offending field.
        field: &'static str,
        /// Raw text that failed to parse.
        value: String,
    },
    /// Returned when an input would divide by zero, take the root of a negative
    /// number or otherwise leave the real domain of the design formulas.
    #[error("{quantity} {reason} (received {value})")]
    Domain {
        /// Name of the offending quantity.
        quantity: &'static str,
        /// Constraint that was violated.
        reason: &'static str,
        /// Rejected value.
        value: f64,
    },
}

/// Error returned when reactions cannot be imported from the analysis host.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Returned when the node or load case identifier is not a positive integer.
    #[error("{field} must be a positive integer (received {value:?})")]
    InvalidInput {
        /// Label of the offending field.
        field: &'static str,
        /// Raw text that failed to parse.
        value: String,
    },
    /// Returned when the analysis host cannot be reached.
    #[error("analysis host not connected: {0}")]
    ConnectionUnavailable(String),
    /// Returned when the host rejects the request or answers with garbage.
    #[error(transparent)]
    Session(SessionError),
    /// Returned when an offline reaction file cannot be loaded.
    #[error("cannot load reactions: {0}")]
    ReactionFile(#[from] ConfigError),
}

impl From<SessionError> for ImportError {
    fn from(error: SessionError) -> Self {
        match error {
            SessionError::ConnectionUnavailable(reason) => Self::ConnectionUnavailable(reason),
            other => Self::Session(other),
        }
    }
}

/// Error returned by a [`Transport`](crate::Transport) when a host command fails.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Returned when no analysis host is listening at the configured endpoint.
    #[error("cannot reach analysis host at {0}")]
    ConnectionUnavailable(String),
    /// Returned when the host executed the command and reported a failure.
    #[error("host rejected {method}: {message}")]
    Rejected {
        /// Name of the rejected command.
        method: &'static str,
        /// Message reported by the host.
        message: String,
    },
    /// Returned when the host answers with a value of the wrong shape.
    #[error("unexpected response to {method}: {value}")]
    UnexpectedResponse {
        /// Name of the command that was sent.
        method: &'static str,
        /// The value that was received.
        value: serde_json::Value,
    },
    /// Returned when the HTTP exchange itself fails.
    #[error("bridge request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Error returned when editing a [`FrameModel`](crate::FrameModel) with invalid ids.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum FrameEditError {
    /// Returned when a node id is already taken.
    #[error("node {0} already exists")]
    DuplicateNode(u32),
    /// Returned when a member id is already taken.
    #[error("member {0} already exists")]
    DuplicateMember(u32),
    /// Returned when a node id is not part of the model.
    #[error("node {0} does not exist in this model")]
    UnknownNode(u32),
    /// Returned when a member id is not part of the model.
    #[error("member {0} does not exist in this model")]
    UnknownMember(u32),
    /// Returned when a member would connect a node to itself.
    #[error("member {member} connects node {node} to itself")]
    DegenerateMember {
        /// Identifier of the rejected member.
        member: u32,
        /// The repeated node.
        node: u32,
    },
    /// Returned when a load case number is already taken.
    #[error("load case {0} already exists")]
    DuplicateLoadCase(u32),
    /// Returned when a load case number is not part of the model.
    #[error("load case {0} does not exist in this model")]
    UnknownLoadCase(u32),
}

/// Error returned when the tool configuration cannot be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Returned when the configuration file cannot be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// Path that was requested.
        path: String,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// Returned when the file is not valid configuration JSON.
    #[error("invalid configuration in {path}: {source}")]
    Parse {
        /// Path that was requested.
        path: String,
        /// Underlying parse failure.
        #[source]
        source: serde_json::Error,
    },
    /// Returned when an environment override cannot be parsed.
    #[error("environment variable {name} has invalid value {value:?}")]
    Environment {
        /// Variable name.
        name: &'static str,
        /// Rejected value.
        value: String,
    },
}
