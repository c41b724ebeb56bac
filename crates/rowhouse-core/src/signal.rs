//! Signal/slot system for Rowhouse.
//!
//! This module provides a type-safe signal/slot mechanism for change
//! notification. Signals are emitted by the data model when its state
//! changes, and connected slots (callbacks) are invoked in response.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The main signal type for emitting notifications
//! - [`ConnectionId`] - Unique identifier returned when connecting a slot
//! - [`ConnectionGuard`] - RAII guard that disconnects when dropped
//!
//! # Invocation Model
//!
//! Slots are always invoked directly, on the emitting thread, in connection
//! order. The engine runs a single-threaded cooperative event model, so
//! there is no queued or cross-thread dispatch: an `emit` has returned only
//! once every connected slot has run.
//!
//! Slots may connect or disconnect other slots while a signal is being
//! emitted; such changes take effect on the next emission.
//!
//! # Example
//!
//! ```
//! use rowhouse_core::Signal;
//!
//! // Create a signal that passes a string argument
//! let code_changed = Signal::<String>::new();
//!
//! // Connect a slot (closure)
//! let conn_id = code_changed.connect(|code| {
//!     println!("Record changed: {}", code);
//! });
//!
//! // Emit the signal
//! code_changed.emit("RH-0001".to_string());
//!
//! // Disconnect when done
//! code_changed.disconnect(conn_id).unwrap();
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::error::SignalError;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via
    /// [`Signal::disconnect`]. The ID remains valid until the connection is
    /// explicitly disconnected or the signal is dropped.
    pub struct ConnectionId;
}

/// Internal storage for a single connection.
struct Connection<Args> {
    /// The slot function to invoke.
    slot: Arc<dyn Fn(&Args) + Send + Sync>,
}

/// A type-safe signal that can have multiple connected slots.
///
/// When the signal is emitted, every connected slot is invoked with a
/// reference to the emitted arguments, in the order the slots were
/// connected.
///
/// Multi-value payloads are passed as tuples: `Signal<(String, bool)>`.
pub struct Signal<Args> {
    connections: Arc<Mutex<SlotMap<ConnectionId, Connection<Args>>>>,
}

impl<Args> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> Signal<Args> {
    /// Creates a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Arc::new(Mutex::new(SlotMap::with_key())),
        }
    }

    /// Connects a slot to this signal.
    ///
    /// Returns a [`ConnectionId`] that can be used to disconnect the slot
    /// later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Connection {
            slot: Arc::new(slot),
        })
    }

    /// Connects a slot and returns a guard that disconnects it when dropped.
    ///
    /// This is the RAII alternative to manually calling
    /// [`disconnect`](Signal::disconnect).
    pub fn connect_guarded<F>(&self, slot: F) -> ConnectionGuard<Args>
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        ConnectionGuard {
            connections: Arc::clone(&self.connections),
            id: self.connect(slot),
        }
    }

    /// Disconnects a previously connected slot.
    ///
    /// Returns [`SignalError::InvalidConnection`] if the ID was never issued
    /// by this signal or has already been disconnected.
    pub fn disconnect(&self, id: ConnectionId) -> Result<(), SignalError> {
        match self.connections.lock().remove(id) {
            Some(_) => Ok(()),
            None => Err(SignalError::InvalidConnection),
        }
    }

    /// Disconnects all slots.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Returns the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Emits the signal, invoking every connected slot with `args`.
    ///
    /// Slots are invoked outside the internal lock, so a slot may safely
    /// connect or disconnect slots on this same signal.
    pub fn emit(&self, args: Args) {
        let slots: Vec<Arc<dyn Fn(&Args) + Send + Sync>> = {
            let connections = self.connections.lock();
            connections.values().map(|c| Arc::clone(&c.slot)).collect()
        };

        for slot in slots {
            slot(&args);
        }
    }
}

/// RAII guard for a signal connection.
///
/// Dropping the guard disconnects the slot. Obtained via
/// [`Signal::connect_guarded`].
pub struct ConnectionGuard<Args> {
    connections: Arc<Mutex<SlotMap<ConnectionId, Connection<Args>>>>,
    id: ConnectionId,
}

impl<Args> ConnectionGuard<Args> {
    /// Returns the ID of the guarded connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<Args> Drop for ConnectionGuard<Args> {
    fn drop(&mut self) {
        self.connections.lock().remove(self.id);
    }
}
