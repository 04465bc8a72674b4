//! Transport strategies for the request/state channel
//!
//! The coordinator's logic is identical in plain and confidential mode; the
//! only difference is how payloads are framed for the channel. Confidential
//! envelopes carry the payload as hex-encoded bytes, the form the platform's
//! encrypted channel transports (ciphertext production is the platform's
//! concern, not ours).

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use crate::error::SessionResult;

/// Which channel a payload travels through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Plain,
    Confidential,
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportMode::Plain => write!(f, "plain"),
            TransportMode::Confidential => write!(f, "confidential"),
        }
    }
}

/// A payload framed for the collaborator's channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub mode: TransportMode,
    pub body: String,
}

impl Envelope {
    /// Recover the payload. Dispatches on the envelope's own mode so a peer
    /// can open whatever it is handed.
    pub fn open(&self) -> SessionResult<serde_json::Value> {
        match self.mode {
            TransportMode::Plain => Ok(serde_json::from_str(&self.body)?),
            TransportMode::Confidential => {
                let bytes = hex::decode(&self.body)?;
                Ok(serde_json::from_slice(&bytes)?)
            }
        }
    }
}

/// Strategy selecting how a handle frames its requests
pub trait Transport: Send + Sync {
    fn mode(&self) -> TransportMode;

    fn seal(&self, payload: &serde_json::Value) -> SessionResult<Envelope>;
}

/// Canonical JSON over the plain channel
#[derive(Debug, Default)]
pub struct PlainTransport;

impl Transport for PlainTransport {
    fn mode(&self) -> TransportMode {
        TransportMode::Plain
    }

    fn seal(&self, payload: &serde_json::Value) -> SessionResult<Envelope> {
        let body = serde_json::to_string(payload)?;
        Ok(Envelope {
            mode: TransportMode::Plain,
            body,
        })
    }
}

/// Hex-encoded bytes over the platform's encrypted channel
#[derive(Debug, Default)]
pub struct ConfidentialTransport;

impl Transport for ConfidentialTransport {
    fn mode(&self) -> TransportMode {
        TransportMode::Confidential
    }

    fn seal(&self, payload: &serde_json::Value) -> SessionResult<Envelope> {
        let bytes = serde_json::to_vec(payload)?;
        Ok(Envelope {
            mode: TransportMode::Confidential,
            body: hex::encode(bytes),
        })
    }
}

/// Select the transport strategy for a capability flag
pub fn for_mode(mode: TransportMode) -> Arc<dyn Transport> {
    match mode {
        TransportMode::Plain => Arc::new(PlainTransport),
        TransportMode::Confidential => Arc::new(ConfidentialTransport),
    }
}
