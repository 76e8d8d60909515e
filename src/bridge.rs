//! JSON-RPC client for a bridge process running next to the analysis host.

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::BridgeConfig;
use crate::errors::SessionError;
use crate::session::{Command, Transport};

/// JSON-RPC 2.0 request envelope.
#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    #[serde(flatten)]
    command: &'a Command,
}

/// JSON-RPC 2.0 error object.
#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

/// JSON-RPC 2.0 response envelope.
#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<RpcError>,
}

/// Transport posting each command to the bridge endpoint.
#[derive(Debug)]
pub struct BridgeTransport {
    client: Client,
    endpoint: String,
    next_id: u64,
}

impl BridgeTransport {
    /// Build a client for the configured endpoint without contacting it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Transport`] when the HTTP client cannot be built.
    pub fn new(config: &BridgeConfig) -> Result<Self, SessionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.url.clone(),
            next_id: 1,
        })
    }

    /// Build a client and check that the host answers.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::ConnectionUnavailable`] when nothing listens at the endpoint.
    pub fn connect(config: &BridgeConfig) -> Result<Self, SessionError> {
        let transport = Self::new(config)?;
        let response = transport
            .client
            .get(&transport.endpoint)
            .send()
            .map_err(|error| transport.classify(error))?;
        log::info!(
            "connected to analysis host bridge at {} ({})",
            transport.endpoint,
            response.status()
        );
        Ok(transport)
    }

    /// Map connection failures to [`SessionError::ConnectionUnavailable`].
    fn classify(&self, error: reqwest::Error) -> SessionError {
        if error.is_connect() || error.is_timeout() {
            SessionError::ConnectionUnavailable(self.endpoint.clone())
        } else {
            SessionError::Transport(error)
        }
    }
}

impl Transport for BridgeTransport {
    fn call(&mut self, command: &Command) -> Result<Value, SessionError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id,
            command,
        };
        self.next_id += 1;

        let response: RpcResponse = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .map_err(|error| self.classify(error))?
            .error_for_status()?
            .json()?;

        match response.error {
            Some(error) => {
                log::error!(
                    "host rejected {} ({}): {}",
                    command.method(),
                    error.code,
                    error.message
                );
                Err(SessionError::Rejected {
                    method: command.method(),
                    message: error.message,
                })
            }
            None => Ok(response.result),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn request_flattens_command_into_envelope() {
        let command = Command::GetNodeReaction {
            node: 1,
            case: 2,
            dof: 5,
        };
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 9,
            command: &command,
        };
        assert_eq!(
            serde_json::to_value(&request).expect("serialisable"),
            json!({
                "jsonrpc": "2.0",
                "id": 9,
                "method": "GetNodeReaction",
                "params": {"node": 1, "case": 2, "dof": 5}
            })
        );
    }

    #[test]
    fn response_with_error_object_parses() {
        let response: RpcResponse = serde_json::from_value(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": -32000, "message": "no model open"}
        }))
        .expect("valid envelope");
        assert!(response.result.is_null());
        assert_eq!(response.error.expect("error present").message, "no model open");
    }

    #[test]
    fn unreachable_bridge_reports_connection_unavailable() {
        // Port 9 (discard) on localhost is closed in test environments.
        let config = BridgeConfig {
            url: "http://127.0.0.1:9/rpc".to_string(),
            timeout_secs: 2,
            connect_timeout_secs: 1,
        };
        let error = BridgeTransport::connect(&config).expect_err("nothing listening");
        assert!(matches!(error, SessionError::ConnectionUnavailable(_)));
    }
}
