//! Rowhouse — a headless table engine for real-estate listings.
//!
//! Rowhouse is the data side of a listings table: the record schema, the
//! catalogue of displayable columns, the user's persisted column
//! configuration, a structured multi-field filter, and a controller that
//! composes them into the final filtered, column-configured view. It renders
//! nothing; a host (GUI, TUI, web layer) consumes the resolved columns and
//! filtered rows and draws them however it likes.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐    tab / owner     ┌──────────────┐
//! │   Listing    │──── filters ──────>│  FilterSpec  │──> filtered rows
//! │  collection  │                    └──────────────┘
//! └──────────────┘
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ PreferenceStore│ │ ColumnView-  │   │   column     │
//! │ (persisted)  │──>│   State      │──>│  resolver +  │──> ordered columns
//! └──────────────┘   └──────────────┘   │   enhancer   │
//!                                       └──────────────┘
//! ```
//!
//! The two pipelines are independent and independently testable; the
//! [`model::TableController`] combines their outputs only at presentation
//! time.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use rowhouse::model::{FilterSpec, Listing, PropertyType, TableController};
//! use rowhouse::prefs::MemoryStore;
//!
//! let listings = vec![
//!     Listing { code: "RH-0001".into(), bedrooms: 2, ..Default::default() },
//!     Listing { code: "RH-0002".into(), bedrooms: 4, ..Default::default() },
//! ];
//!
//! let mut table = TableController::new(listings);
//! table.set_filter(FilterSpec {
//!     property_types: vec![PropertyType::Condo],
//!     ..Default::default()
//! });
//!
//! // Every seeded listing defaults to Condo, so both survive the filter.
//! assert_eq!(table.visible_listings().len(), 2);
//! # let _ = Arc::new(MemoryStore::new());
//! ```

pub mod model;
pub mod prefs;
