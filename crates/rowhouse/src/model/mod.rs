//! The listings table model.
//!
//! This module provides the types that back every listings table:
//!
//! - `Listing`: one listing record, identified by its unique code
//! - `ColumnKey` / `ColumnDescriptor` / `column_registry`: the exhaustive
//!   catalogue of displayable columns
//! - `ColumnViewState`: the user's visible-column set and column order,
//!   persisted through a [`crate::prefs::PreferenceStore`]
//! - `resolve_columns` / `enhance_columns`: turn view state plus registry
//!   into the final ordered, renderer-attached column list
//! - `FilterSpec`: the structured multi-field filter predicate
//! - `TableController`: the stateful orchestrator that owns the record
//!   collection, the active filters, and the detail selection
//!
//! # Data flow
//!
//! Raw records flow through the controller's tab filter and then the
//! structured filter to produce the filtered collection. Independently, the
//! view state and registry produce the ordered column list. The two outputs
//! meet only at presentation time, which keeps each side testable on its
//! own.

mod columns;
mod controller;
mod enhancer;
mod filter;
mod record;
mod view_state;

pub use columns::{
    ActivateFn, CellRenderer, CellValue, ColumnDescriptor, ColumnEditor, ColumnKey, ColumnStyle,
    column_registry, resolve_columns,
};
pub use controller::{ControllerSignals, MutateOutcome, TableController};
pub use enhancer::{BadgeStyle, FieldChangeFn, badge_style_for, enhance_columns, format_money};
pub use filter::{BedroomRange, FilterSpec, PriceRange};
pub use record::{
    FieldEdit, Furnishing, Listing, ListingStatus, ListingType, MarketingStatus, OwnerType,
    PropertyType, default_column_order, default_visible_columns,
};
pub use view_state::{
    ColumnViewState, LoadPolicy, ORDER_PREF_KEY, VISIBLE_PREF_KEY, ViewStateChange,
};
