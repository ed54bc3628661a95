// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! The pin protocol engine.
//!
//! [`PinHub`] owns the pin registry, tracks per-pin remote subscribers and
//! local listeners, and dispatches bidirectional update events:
//!
//! - **Service surface** (invoked by the host messaging layer on behalf of
//!   remote peers): [`PinHub::list`], [`PinHub::connect`],
//!   [`PinHub::disconnect`]; replies are protocol-level
//!   [`ServiceResponse`]s, not Rust errors.
//! - **Producer surface** (invoked by the local application):
//!   [`PinHub::declare_pin`], [`PinHub::remove_pin`],
//!   [`PinHub::add_listener`], [`PinHub::remove_listener`],
//!   [`PinHub::broadcast_update`].
//! - **Event surface**: [`PinHub::on_value_changed`] consumes inbound
//!   update notifications; extracted values fan out to local listeners,
//!   while [`PinHub::broadcast_update`] fans out to subscribed peers.
//!
//! # Concurrency
//!
//! Every state-changing operation serializes on one mutex per hub, so no
//! two mutating calls interleave their effects and each observes a
//! consistent snapshot of registry, subscriber, and listener state.
//! Outbound deliveries and listener callbacks run against snapshots taken
//! under the lock and are invoked after it is released, so a slow peer
//! cannot stall the hub and a listener may call back into it.

mod gateway;
mod listener;
mod registry;

pub use gateway::{Gateway, GatewayError, PeerId, PinEvent, ServiceResponse};
pub use listener::{ClosureListener, PinListener};
pub use registry::PinRegistry;

use crate::pin::Pin;
use crate::schema::{PinValue, RawValue};
use parking_lot::Mutex;
use serde_json::json;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Service name under which the hub registers with the host.
pub const HUB_NAME: &str = "pinhub.PinHub";
/// Service that lists all declared pins.
pub const LIST_SERVICE: &str = "list";
/// Service that subscribes the calling peer to a pin's updates.
pub const CONNECT_SERVICE: &str = "connect";
/// Service that drops the calling peer's subscription.
pub const DISCONNECT_SERVICE: &str = "disconnect";
/// Event carrying a pin's new value to subscribers.
pub const UPDATE_EVENT: &str = "update";
/// Event announcing a pin's removal to subscribers.
pub const DESTROYED_EVENT: &str = "destroyed";
/// Parameter naming the pin in service calls and events.
pub const PIN_PARAM: &str = "pin";
/// Parameter carrying the serialized value in update events.
pub const VALUE_PARAM: &str = "value";
/// Reply field holding the serialized pin list.
pub const PINS_FIELD: &str = "pins";
/// Reply field confirming a connect/disconnect.
pub const RESULT_PARAM: &str = "result";

/// Errors returned by hub and registry operations.
#[derive(Debug)]
pub enum Error {
    /// Caller-supplied arguments violate preconditions (empty name,
    /// duplicate registration, duplicate listener, invalid type).
    InvalidArgument(String),
    /// Operation referenced an unknown pin name.
    NotFound(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            Error::NotFound(msg) => write!(f, "not found: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Result alias for hub operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Default)]
struct SubscriptionState {
    /// Remote peers subscribed to each pin's updates.
    subscribers: HashMap<String, HashSet<PeerId>>,
    /// Local listeners per pin; a handle appears at most once per pin.
    listeners: HashMap<String, Vec<Arc<dyn PinListener>>>,
}

/// The protocol engine: registry, subscriptions, and event dispatch.
pub struct PinHub {
    gateway: Arc<dyn Gateway>,
    instance_id: String,
    registry: PinRegistry,
    state: Mutex<SubscriptionState>,
    shut_down: AtomicBool,
}

impl PinHub {
    /// Creates a hub with empty state and subscribes it to the host's
    /// update-event channel. A subscription failure is logged; the hub
    /// still works for locally driven operations.
    pub fn new(gateway: Arc<dyn Gateway>, instance_id: impl Into<String>) -> Self {
        let hub = Self {
            gateway,
            instance_id: instance_id.into(),
            registry: PinRegistry::new(),
            state: Mutex::new(SubscriptionState::default()),
            shut_down: AtomicBool::new(false),
        };
        if let Err(e) = hub.gateway.subscribe(UPDATE_EVENT) {
            log::error!(
                "[{}] failed to subscribe to update events: {}",
                hub.instance_id,
                e
            );
        }
        hub
    }

    /// Identifier of this hub instance within the host.
    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// Declares a pin, with an optional listener attached in the same step.
    ///
    /// Fails with [`Error::InvalidArgument`] if the name is empty, the name
    /// is already registered, or the type is invalid.
    pub fn declare_pin(&self, pin: Pin, listener: Option<Arc<dyn PinListener>>) -> Result<()> {
        let mut state = self.state.lock();
        if pin.name().is_empty() {
            return Err(Error::InvalidArgument(
                "pin must have a non-empty name".to_string(),
            ));
        }
        if self.registry.find(pin.name()).is_some() {
            return Err(Error::InvalidArgument(format!(
                "pin '{}' already declared",
                pin.name()
            )));
        }
        if !pin.schema().is_valid() {
            return Err(Error::InvalidArgument(format!(
                "pin '{}' has an invalid type",
                pin.name()
            )));
        }
        let name = pin.name().to_string();
        self.registry.put(pin)?;
        if let Some(listener) = listener {
            Self::attach_listener(&mut state, &name, listener)?;
        }
        Ok(())
    }

    /// Removes a pin and tears down all state keyed by its name.
    ///
    /// Subscribed peers receive a `destroyed` event before their
    /// subscriptions are dropped. Fails with [`Error::NotFound`] if the pin
    /// is unknown.
    pub fn remove_pin(&self, pin_name: &str) -> Result<()> {
        if pin_name.is_empty() {
            return Err(Error::InvalidArgument(
                "pin name must not be empty".to_string(),
            ));
        }
        let subscribers = {
            let mut state = self.state.lock();
            if self.registry.find(pin_name).is_none() {
                return Err(Error::NotFound(format!("pin '{}' was not found", pin_name)));
            }
            self.registry.remove(pin_name);
            state.listeners.remove(pin_name);
            state.subscribers.get(pin_name).cloned().unwrap_or_default()
        };
        let event = PinEvent::Destroyed {
            pin: pin_name.to_string(),
        };
        for peer in &subscribers {
            if let Err(e) = self.gateway.notify(peer, &event) {
                log::error!(
                    "[{}] failed to deliver destroyed event for pin '{}' to {}: {}",
                    self.instance_id,
                    pin_name,
                    peer,
                    e
                );
            }
        }
        self.state.lock().subscribers.remove(pin_name);
        Ok(())
    }

    /// Attaches a local listener to a pin.
    ///
    /// Fails with [`Error::NotFound`] if the pin is unknown and
    /// [`Error::InvalidArgument`] if this handle is already attached.
    pub fn add_listener(&self, pin_name: &str, listener: Arc<dyn PinListener>) -> Result<()> {
        let mut state = self.state.lock();
        if self.registry.find(pin_name).is_none() {
            return Err(Error::NotFound(format!("pin '{}' was not found", pin_name)));
        }
        Self::attach_listener(&mut state, pin_name, listener)
    }

    /// Detaches a local listener; detaching a handle that was never
    /// attached is a no-op.
    pub fn remove_listener(&self, pin_name: &str, listener: &Arc<dyn PinListener>) -> Result<()> {
        let mut state = self.state.lock();
        if self.registry.find(pin_name).is_none() {
            return Err(Error::NotFound(format!("pin '{}' was not found", pin_name)));
        }
        if let Some(entries) = state.listeners.get_mut(pin_name) {
            entries.retain(|entry| !Arc::ptr_eq(entry, listener));
        }
        Ok(())
    }

    fn attach_listener(
        state: &mut SubscriptionState,
        pin_name: &str,
        listener: Arc<dyn PinListener>,
    ) -> Result<()> {
        let entries = state.listeners.entry(pin_name.to_string()).or_default();
        if entries.iter().any(|entry| Arc::ptr_eq(entry, &listener)) {
            return Err(Error::InvalidArgument(format!(
                "listener already attached to pin '{}'",
                pin_name
            )));
        }
        entries.push(listener);
        Ok(())
    }

    /// Subscribes `peer` to a pin's updates.
    ///
    /// Replies with a protocol error for an empty or unknown pin name, or
    /// when the peer is already subscribed.
    pub fn connect(&self, peer: &PeerId, pin_name: &str) -> ServiceResponse {
        let mut state = self.state.lock();
        if pin_name.is_empty() {
            return ServiceResponse::error("no pin informed");
        }
        if self.registry.find(pin_name).is_none() {
            return ServiceResponse::error(format!("pin '{}' does not exist", pin_name));
        }
        let peers = state.subscribers.entry(pin_name.to_string()).or_default();
        if peers.contains(peer) {
            return ServiceResponse::error(format!(
                "peer already connected to pin '{}'",
                pin_name
            ));
        }
        peers.insert(peer.clone());
        ServiceResponse::ok().with_param(RESULT_PARAM, json!("ok"))
    }

    /// Drops `peer`'s subscription to a pin; a peer that was never
    /// subscribed is a no-op.
    pub fn disconnect(&self, peer: &PeerId, pin_name: &str) -> ServiceResponse {
        let mut state = self.state.lock();
        if pin_name.is_empty() {
            return ServiceResponse::error("no pin informed");
        }
        if self.registry.find(pin_name).is_none() {
            return ServiceResponse::error(format!("pin '{}' does not exist", pin_name));
        }
        if let Some(peers) = state.subscribers.get_mut(pin_name) {
            peers.remove(peer);
        }
        ServiceResponse::ok().with_param(RESULT_PARAM, json!("ok"))
    }

    /// Lists all declared pins in wire form.
    pub fn list(&self) -> ServiceResponse {
        match serde_json::to_value(self.registry.list()) {
            Ok(pins) => ServiceResponse::ok().with_param(PINS_FIELD, pins),
            Err(e) => ServiceResponse::error(e.to_string()),
        }
    }

    /// Handles an inbound value-changed notification.
    ///
    /// An unknown pin is ignored (a race with concurrent removal is
    /// expected). Extraction failures are logged and the event dropped;
    /// they never reach the transport layer. On success every listener
    /// attached to the pin is invoked with the canonical value.
    pub fn on_value_changed(&self, pin_name: &str, value: &RawValue) {
        let snapshot = {
            let state = self.state.lock();
            self.registry.find(pin_name).map(|pin| {
                let listeners = state.listeners.get(pin_name).cloned().unwrap_or_default();
                (pin, listeners)
            })
        };
        let Some((pin, listeners)) = snapshot else {
            log::debug!(
                "[{}] dropping update for unknown pin '{}'",
                self.instance_id,
                pin_name
            );
            return;
        };
        let value = match pin.schema().extract_value(value) {
            Ok(value) => value,
            Err(e) => {
                log::error!(
                    "[{}] failed to decode update for pin '{}': {}",
                    self.instance_id,
                    pin_name,
                    e
                );
                return;
            }
        };
        for listener in &listeners {
            listener.value_changed(&pin, &value);
        }
    }

    /// Sends an `update` event carrying `value` to every peer subscribed to
    /// the pin. Per-peer delivery failures are logged and do not abort the
    /// remaining deliveries.
    pub fn broadcast_update(&self, pin_name: &str, value: &PinValue) -> Result<()> {
        let subscribers = {
            let state = self.state.lock();
            if self.registry.find(pin_name).is_none() {
                return Err(Error::NotFound(format!("pin '{}' was not found", pin_name)));
            }
            state.subscribers.get(pin_name).cloned().unwrap_or_default()
        };
        if subscribers.is_empty() {
            return Ok(());
        }
        let encoded = serde_json::to_string(value).map_err(|e| {
            Error::InvalidArgument(format!("failed to encode value for pin '{}': {}", pin_name, e))
        })?;
        let event = PinEvent::Update {
            pin: pin_name.to_string(),
            value: encoded,
        };
        for peer in &subscribers {
            if let Err(e) = self.gateway.notify(peer, &event) {
                log::error!(
                    "[{}] failed to deliver update for pin '{}' to {}: {}",
                    self.instance_id,
                    pin_name,
                    peer,
                    e
                );
            }
        }
        Ok(())
    }

    /// Exact pin lookup; runs without the hub mutex.
    pub fn find(&self, pin_name: &str) -> Option<Pin> {
        self.registry.find(pin_name)
    }

    /// Snapshot of all declared pins; runs without the hub mutex.
    pub fn pins(&self) -> Vec<Pin> {
        self.registry.list()
    }

    /// Unsubscribes from the host's update-event channel. Idempotent; also
    /// invoked on drop.
    pub fn shutdown(&self) {
        if !self.shut_down.swap(true, Ordering::SeqCst) {
            if let Err(e) = self.gateway.unsubscribe(UPDATE_EVENT) {
                log::error!(
                    "[{}] failed to unsubscribe from update events: {}",
                    self.instance_id,
                    e
                );
            }
        }
    }
}

impl Drop for PinHub {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pin::IoMode;
    use crate::schema::TypeSchema;

    #[derive(Default)]
    struct RecordingGateway {
        events: Mutex<Vec<(PeerId, PinEvent)>>,
        subscriptions: Mutex<Vec<(String, bool)>>,
    }

    impl RecordingGateway {
        fn events(&self) -> Vec<(PeerId, PinEvent)> {
            self.events.lock().clone()
        }
    }

    impl Gateway for RecordingGateway {
        fn subscribe(&self, channel: &str) -> std::result::Result<(), GatewayError> {
            self.subscriptions.lock().push((channel.to_string(), true));
            Ok(())
        }

        fn unsubscribe(&self, channel: &str) -> std::result::Result<(), GatewayError> {
            self.subscriptions.lock().push((channel.to_string(), false));
            Ok(())
        }

        fn notify(&self, peer: &PeerId, event: &PinEvent) -> std::result::Result<(), GatewayError> {
            self.events.lock().push((peer.clone(), event.clone()));
            Ok(())
        }
    }

    fn hub() -> (Arc<RecordingGateway>, PinHub) {
        let gateway = Arc::new(RecordingGateway::default());
        let hub = PinHub::new(gateway.clone(), "test");
        (gateway, hub)
    }

    fn led() -> Pin {
        Pin::new("led", IoMode::Out, TypeSchema::bit().clone())
    }

    #[test]
    fn test_subscribes_on_startup_and_unsubscribes_on_drop() {
        let (gateway, hub) = hub();
        drop(hub);
        assert_eq!(
            *gateway.subscriptions.lock(),
            [("update".to_string(), true), ("update".to_string(), false)]
        );
    }

    #[test]
    fn test_declare_pin_preconditions() {
        let (_gateway, hub) = hub();

        let empty = Pin::new("", IoMode::Out, TypeSchema::bit().clone());
        assert!(matches!(
            hub.declare_pin(empty, None),
            Err(Error::InvalidArgument(_))
        ));

        let invalid = Pin::new("bad", IoMode::Out, TypeSchema::discrete_range(0, 0));
        assert!(matches!(
            hub.declare_pin(invalid, None),
            Err(Error::InvalidArgument(_))
        ));

        hub.declare_pin(led(), None).unwrap();
        assert!(matches!(
            hub.declare_pin(led(), None),
            Err(Error::InvalidArgument(_))
        ));
        assert_eq!(hub.pins().len(), 1);
    }

    #[test]
    fn test_remove_pin_requires_known_name() {
        let (_gateway, hub) = hub();
        assert!(matches!(hub.remove_pin("led"), Err(Error::NotFound(_))));
        hub.declare_pin(led(), None).unwrap();
        hub.remove_pin("led").unwrap();
        assert!(hub.find("led").is_none());
    }

    #[test]
    fn test_remove_pin_notifies_subscribers_then_clears_them() {
        let (gateway, hub) = hub();
        hub.declare_pin(led(), None).unwrap();

        let peer = PeerId::from("peer-a");
        assert!(!hub.connect(&peer, "led").is_error());
        hub.remove_pin("led").unwrap();

        assert_eq!(
            gateway.events(),
            [(
                peer.clone(),
                PinEvent::Destroyed {
                    pin: "led".to_string()
                }
            )]
        );

        // Subscription state is gone: a fresh declare starts clean.
        hub.declare_pin(led(), None).unwrap();
        hub.broadcast_update("led", &PinValue::Discrete(1)).unwrap();
        assert_eq!(gateway.events().len(), 1);
    }

    #[test]
    fn test_connect_and_disconnect() {
        let (_gateway, hub) = hub();
        hub.declare_pin(led(), None).unwrap();
        let peer = PeerId::from("peer-a");

        assert!(hub.connect(&peer, "").is_error());
        assert!(hub.connect(&peer, "nope").is_error());

        let ok = hub.connect(&peer, "led");
        assert_eq!(ok.param(RESULT_PARAM), Some(&json!("ok")));

        let dup = hub.connect(&peer, "led");
        assert!(dup.is_error());

        assert!(!hub.disconnect(&peer, "led").is_error());
        // Disconnecting an unsubscribed peer is a no-op.
        assert!(!hub.disconnect(&peer, "led").is_error());
        // A fresh connect works again after disconnect.
        assert!(!hub.connect(&peer, "led").is_error());
    }

    #[test]
    fn test_listener_registration_semantics() {
        let (_gateway, hub) = hub();
        let listener: Arc<dyn PinListener> = Arc::new(ClosureListener::new(|_, _| {}));

        assert!(matches!(
            hub.add_listener("led", listener.clone()),
            Err(Error::NotFound(_))
        ));

        hub.declare_pin(led(), Some(listener.clone())).unwrap();
        // The same handle cannot be attached twice.
        assert!(matches!(
            hub.add_listener("led", listener.clone()),
            Err(Error::InvalidArgument(_))
        ));

        hub.remove_listener("led", &listener).unwrap();
        hub.add_listener("led", listener.clone()).unwrap();

        // Removing a never-attached handle is a no-op.
        let other: Arc<dyn PinListener> = Arc::new(ClosureListener::new(|_, _| {}));
        hub.remove_listener("led", &other).unwrap();
        assert!(matches!(
            hub.remove_listener("nope", &other),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_broadcast_update_reaches_every_subscriber() {
        let (gateway, hub) = hub();
        hub.declare_pin(led(), None).unwrap();
        let a = PeerId::from("peer-a");
        let b = PeerId::from("peer-b");
        hub.connect(&a, "led");
        hub.connect(&b, "led");

        hub.broadcast_update("led", &PinValue::Discrete(1)).unwrap();
        let mut peers: Vec<String> = gateway
            .events()
            .iter()
            .map(|(peer, event)| {
                assert_eq!(
                    event,
                    &PinEvent::Update {
                        pin: "led".to_string(),
                        value: "1".to_string()
                    }
                );
                peer.to_string()
            })
            .collect();
        peers.sort();
        assert_eq!(peers, ["peer-a", "peer-b"]);

        assert!(matches!(
            hub.broadcast_update("nope", &PinValue::Discrete(1)),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_list_serializes_all_pins() {
        let (_gateway, hub) = hub();
        hub.declare_pin(led(), None).unwrap();
        hub.declare_pin(
            Pin::new("tilt", IoMode::In, TypeSchema::v2().clone()),
            None,
        )
        .unwrap();

        let response = hub.list();
        assert!(!response.is_error());
        let pins: Vec<Pin> =
            serde_json::from_value(response.param(PINS_FIELD).unwrap().clone()).unwrap();
        let mut names: Vec<&str> = pins.iter().map(Pin::name).collect();
        names.sort_unstable();
        assert_eq!(names, ["led", "tilt"]);
    }

    #[test]
    fn test_inbound_update_for_unknown_pin_is_ignored() {
        let (_gateway, hub) = hub();
        // Must not panic or error.
        hub.on_value_changed("nope", &RawValue::Int(1));
    }
}
