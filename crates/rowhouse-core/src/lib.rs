//! Core systems for Rowhouse.
//!
//! This crate provides the foundational components of the Rowhouse listings
//! engine:
//!
//! - **Signal/Slot System**: Type-safe change notification between the data
//!   model and whatever is observing it
//! - **Timers**: A cooperative one-shot timer manager used for deferred state
//!   transitions (e.g. the detail-panel close grace period)
//! - **Logging targets**: `tracing` target constants for filtering
//!
//! Everything here assumes the engine's single-threaded, cooperative event
//! model: signals are invoked directly on the emitting thread, and timers fire
//! only when their owner polls them.
//!
//! # Signal/Slot Example
//!
//! ```
//! use rowhouse_core::Signal;
//!
//! // Create a signal that notifies when a value changes
//! let value_changed = Signal::<i32>::new();
//!
//! // Connect a slot to handle the signal
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! // Emit the signal
//! value_changed.emit(42);
//!
//! // Disconnect when done
//! value_changed.disconnect(conn_id).unwrap();
//! ```

pub mod error;
pub mod logging;
pub mod signal;
pub mod timer;

pub use error::{CoreError, Result, SignalError, TimerError};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use timer::{TimerId, TimerManager};
