// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Transport seam: peers, events, and the service reply shape.
//!
//! The hub never moves bytes itself. A [`Gateway`] implementation bridges it
//! to the host messaging layer: it delivers [`PinEvent`]s to individual
//! peers and manages the hub's subscription to the inbound update channel.

use crate::hub::{DESTROYED_EVENT, UPDATE_EVENT};
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::fmt;

/// Identity of a remote peer, as supplied by the transport context.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PeerId(String);

impl PeerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PeerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PeerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PeerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Event emitted by the hub toward subscribed peers.
#[derive(Debug, Clone, PartialEq)]
pub enum PinEvent {
    /// A pin's value changed; `value` carries the JSON-encoded canonical value.
    Update { pin: String, value: String },
    /// A pin was removed. Sent to each subscriber before the subscription
    /// state is dropped.
    Destroyed { pin: String },
}

impl PinEvent {
    /// Wire-level event name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Update { .. } => UPDATE_EVENT,
            Self::Destroyed { .. } => DESTROYED_EVENT,
        }
    }

    /// Name of the pin this event concerns.
    pub fn pin(&self) -> &str {
        match self {
            Self::Update { pin, .. } | Self::Destroyed { pin } => pin,
        }
    }
}

/// Errors surfaced by a gateway implementation; opaque to the hub, which
/// only logs them.
pub type GatewayError = Box<dyn std::error::Error + Send + Sync>;

/// Host messaging seam.
///
/// Delivery is best-effort: the hub treats a `notify` failure as affecting
/// that peer only and never lets it abort sibling deliveries.
pub trait Gateway: Send + Sync {
    /// Registers interest in inbound events on the given channel.
    fn subscribe(&self, channel: &str) -> Result<(), GatewayError>;

    /// Drops a previously registered interest.
    fn unsubscribe(&self, channel: &str) -> Result<(), GatewayError>;

    /// Delivers an event to a single remote peer.
    fn notify(&self, peer: &PeerId, event: &PinEvent) -> Result<(), GatewayError>;
}

/// Protocol-level reply for the service surface (`list`/`connect`/
/// `disconnect`): either a parameter map or an error string, never both.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ServiceResponse {
    params: JsonMap<String, JsonValue>,
    error: Option<String>,
}

impl ServiceResponse {
    /// Successful reply with no parameters yet.
    pub fn ok() -> Self {
        Self::default()
    }

    /// Error reply.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            params: JsonMap::new(),
            error: Some(message.into()),
        }
    }

    /// Attach a reply parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    pub fn param(&self, key: &str) -> Option<&JsonValue> {
        self.params.get(key)
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
