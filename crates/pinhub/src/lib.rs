// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # pinhub - Typed pin protocol core
//!
//! A protocol core for describing, validating, and routing typed **pins**:
//! named communication endpoints that carry scalar, vector, or structured
//! sensor/actuator data between a controller and connected peers.
//!
//! ## Quick Start
//!
//! ```rust
//! use pinhub::{ClosureListener, IoMode, PeerId, Pin, PinHub, RawValue, TypeSchema};
//! use std::sync::Arc;
//!
//! # struct NullGateway;
//! # impl pinhub::Gateway for NullGateway {
//! #     fn subscribe(&self, _: &str) -> Result<(), pinhub::GatewayError> { Ok(()) }
//! #     fn unsubscribe(&self, _: &str) -> Result<(), pinhub::GatewayError> { Ok(()) }
//! #     fn notify(&self, _: &PeerId, _: &pinhub::PinEvent) -> Result<(), pinhub::GatewayError> { Ok(()) }
//! # }
//! # fn main() -> pinhub::Result<()> {
//! // Bridge to the host messaging layer, then create the hub.
//! let hub = PinHub::new(Arc::new(NullGateway), "controller-1");
//!
//! // Declare a pin with a listener for inbound updates.
//! let listener = Arc::new(ClosureListener::new(|pin, value| {
//!     println!("{} changed to {:?}", pin.name(), value);
//! }));
//! let pin = Pin::new("temp", IoMode::In, TypeSchema::continuous_range(-50.0, 150.0));
//! hub.declare_pin(pin, Some(listener))?;
//!
//! // Inbound updates are validated against the pin's schema and fanned out.
//! hub.on_value_changed("temp", &RawValue::Float(37.5));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +--------------------------------------------------------------+
//! |                     Application Layer                        |
//! |     declare/remove pins  |  local PinListener callbacks      |
//! +--------------------------------------------------------------+
//! |                         PinHub                               |
//! |   PinRegistry | peer subscriptions | event dispatch          |
//! +--------------------------------------------------------------+
//! |                      Schema Engine                           |
//! |   TypeSchema validation | extraction | JSON wire bridge      |
//! +--------------------------------------------------------------+
//! |                   Gateway (host transport)                   |
//! |   service calls (list/connect/disconnect) | update events    |
//! +--------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TypeSchema`] | Recursive descriptor of an accepted value shape |
//! | [`Pin`] | Named, typed communication endpoint |
//! | [`PinHub`] | Protocol engine: registry, subscriptions, dispatch |
//! | [`PinListener`] | Local callback for pin value changes |
//! | [`Gateway`] | Seam to the host messaging transport |
//! | [`Adaptation`] | Data-only descriptor of a schema conversion |
//!
//! ## Modules Overview
//!
//! - [`schema`] - Type schemas, extraction, and the JSON wire bridge
//! - [`hub`] - The protocol engine and its transport seams
//! - [`pin`] - Pin descriptors
//! - [`adaptation`] - Declarative conversion descriptors
//! - [`types`] - Vector value types backing the `v2`/`v3` schemas

/// Declarative type-adaptation descriptors.
pub mod adaptation;
/// The protocol engine (registry, subscriptions, event dispatch).
pub mod hub;
/// Pin descriptors.
pub mod pin;
/// Type schemas, value extraction, and the JSON wire bridge.
pub mod schema;
/// Vector value types.
pub mod types;

pub use adaptation::Adaptation;
pub use hub::{
    ClosureListener, Error, Gateway, GatewayError, PeerId, PinEvent, PinHub, PinListener,
    PinRegistry, Result, ServiceResponse,
};
pub use pin::{IoMode, Pin};
pub use schema::{BaseType, ExtractError, PinValue, RawValue, TypeSchema};
pub use types::{Vector2, Vector3};

/// pinhub version string.
pub const VERSION: &str = "0.3.1";
