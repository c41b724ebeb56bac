//! Logging facilities for Rowhouse.
//!
//! Rowhouse uses the `tracing` crate for instrumentation. The library never
//! installs a subscriber itself; to see logs, install one in your
//! application:
//!
//! ```ignore
//! use tracing_subscriber;
//!
//! fn main() {
//!     // Initialize tracing (you can customize this)
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Every log line in the workspace carries an explicit target so subsystems
//! can be filtered independently, e.g.
//! `RUST_LOG=rowhouse::prefs=debug,rowhouse_core::timer=trace`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "rowhouse_core";
    /// Timer system target.
    pub const TIMER: &str = "rowhouse_core::timer";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "rowhouse_core::signal";
    /// Table controller target.
    pub const CONTROLLER: &str = "rowhouse::controller";
    /// Column view-state target.
    pub const VIEW_STATE: &str = "rowhouse::view_state";
    /// Preference store target.
    pub const PREFS: &str = "rowhouse::prefs";
}

#[cfg(test)]
mod tests {
    use super::targets;

    #[test]
    fn test_targets_are_prefixed_by_crate() {
        for target in [targets::TIMER, targets::SIGNAL] {
            assert!(target.starts_with(targets::CORE));
        }
        for target in [targets::CONTROLLER, targets::VIEW_STATE, targets::PREFS] {
            assert!(target.starts_with("rowhouse::"));
        }
    }
}
