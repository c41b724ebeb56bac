//! Persisted column view state.
//!
//! [`ColumnViewState`] owns the user's visible-column set and column order
//! for one table, and writes both to a [`PreferenceStore`] under two fixed
//! keys. The keys are shared by every table in the application: unless a
//! page supplies its own defaults at load time, all listing tables read and
//! write one global preference set.
//!
//! # Load-time behavior
//!
//! Loading is write-forward by default: [`LoadPolicy::ApplyDefaults`]
//! discards any previously stored value and re-applies the caller's
//! defaults, persisting them immediately. Page-specific presets rely on
//! that unconditional discard to take effect on every mount, at the cost
//! of never reading stored state back on an ordinary load.
//! [`LoadPolicy::Rehydrate`] restores stored state instead and must be
//! requested explicitly.

use std::sync::Arc;

use super::columns::ColumnKey;
use crate::prefs::PreferenceStore;

/// Store key for the visible-column list.
pub const VISIBLE_PREF_KEY: &str = "listings.columns.visible";
/// Store key for the column-order list.
pub const ORDER_PREF_KEY: &str = "listings.columns.order";

/// How [`ColumnViewState::load`] treats previously stored state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadPolicy {
    /// Discard any stored value and apply the caller's defaults (the
    /// legacy behavior; see the module docs).
    #[default]
    ApplyDefaults,
    /// Read stored state back, falling back to the caller's defaults when
    /// it is absent or unreadable.
    Rehydrate,
}

/// Outcome of a view-state mutation.
///
/// `Healed` reports that the self-heal pass had to append visible keys that
/// were missing from the column order; callers and tests can assert on the
/// repair directly instead of inferring it from the final state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewStateChange {
    /// The replacement was applied as given.
    Applied,
    /// The replacement was applied and the order was repaired.
    Healed { appended: Vec<ColumnKey> },
}

/// The user's visible-column set and column order for one table.
///
/// Mutations go through [`set_visible`](Self::set_visible),
/// [`set_order`](Self::set_order), and [`reset`](Self::reset); each one
/// synchronously persists both lists. Two tables constructed over the same
/// store share persisted preferences while keeping independent in-memory
/// state.
pub struct ColumnViewState {
    visible: Vec<ColumnKey>,
    order: Vec<ColumnKey>,
    store: Arc<dyn PreferenceStore>,
}

impl ColumnViewState {
    /// Loads view state from `store` per `policy`, using the caller's
    /// defaults where the policy or the store's contents call for them.
    ///
    /// Defaults are applied literally — an inconsistent page preset (a
    /// visible key absent from the order) is kept as-is here and repaired
    /// by the next mutation or resolve pass.
    pub fn load(
        store: Arc<dyn PreferenceStore>,
        default_visible: &[ColumnKey],
        default_order: &[ColumnKey],
        policy: LoadPolicy,
    ) -> Self {
        let (visible, order) = match policy {
            LoadPolicy::ApplyDefaults => {
                // Stored state is intentionally ignored: write-forward only.
                (default_visible.to_vec(), default_order.to_vec())
            }
            LoadPolicy::Rehydrate => (
                read_stored(store.as_ref(), VISIBLE_PREF_KEY)
                    .unwrap_or_else(|| default_visible.to_vec()),
                read_stored(store.as_ref(), ORDER_PREF_KEY)
                    .unwrap_or_else(|| default_order.to_vec()),
            ),
        };

        let state = Self {
            visible,
            order,
            store,
        };
        state.persist();
        state
    }

    /// The visible column keys. Membership only; display order comes from
    /// [`order`](Self::order).
    pub fn visible(&self) -> &[ColumnKey] {
        &self.visible
    }

    /// The column order, leftmost first.
    pub fn order(&self) -> &[ColumnKey] {
        &self.order
    }

    pub fn is_visible(&self, key: ColumnKey) -> bool {
        self.visible.contains(&key)
    }

    /// Replaces the visible set, persists, and self-heals the order.
    pub fn set_visible(&mut self, keys: Vec<ColumnKey>) -> ViewStateChange {
        self.visible = keys;
        let appended = self.heal_order();
        self.persist();
        if appended.is_empty() {
            ViewStateChange::Applied
        } else {
            ViewStateChange::Healed { appended }
        }
    }

    /// Replaces the column order, persists, and self-heals it against the
    /// visible set.
    pub fn set_order(&mut self, keys: Vec<ColumnKey>) -> ViewStateChange {
        self.order = keys;
        let appended = self.heal_order();
        self.persist();
        if appended.is_empty() {
            ViewStateChange::Applied
        } else {
            ViewStateChange::Healed { appended }
        }
    }

    /// Restores exactly the caller-provided defaults and persists them.
    pub fn reset(&mut self, default_visible: &[ColumnKey], default_order: &[ColumnKey]) {
        self.visible = default_visible.to_vec();
        self.order = default_order.to_vec();
        self.persist();
    }

    /// Appends visible keys missing from the order, in visible order.
    /// Returns the appended keys. Never drops a key.
    pub(crate) fn heal_order(&mut self) -> Vec<ColumnKey> {
        let mut appended = Vec::new();
        for key in &self.visible {
            if !self.order.contains(key) {
                self.order.push(*key);
                appended.push(*key);
            }
        }
        appended
    }

    fn persist(&self) {
        self.store
            .set(VISIBLE_PREF_KEY, &serialize_keys(&self.visible));
        self.store.set(ORDER_PREF_KEY, &serialize_keys(&self.order));
    }
}

impl std::fmt::Debug for ColumnViewState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnViewState")
            .field("visible", &self.visible)
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

fn serialize_keys(keys: &[ColumnKey]) -> String {
    let names: Vec<&str> = keys.iter().map(|k| k.as_str()).collect();
    // Serializing a Vec<&str> cannot fail.
    serde_json::to_string(&names).expect("serializing column names")
}

/// Reads a stored key list. Corrupted JSON is treated as absent (`None`),
/// never an error; individual names the schema no longer knows are skipped.
fn read_stored(store: &dyn PreferenceStore, pref_key: &str) -> Option<Vec<ColumnKey>> {
    let raw = store.get(pref_key)?;
    let names: Vec<String> = match serde_json::from_str(&raw) {
        Ok(names) => names,
        Err(err) => {
            tracing::warn!(
                target: "rowhouse::view_state",
                pref_key,
                %err,
                "stored column list is not valid JSON; using defaults"
            );
            return None;
        }
    };

    let mut keys = Vec::with_capacity(names.len());
    for name in names {
        match ColumnKey::from_name(&name) {
            Some(key) => keys.push(key),
            None => {
                tracing::warn!(
                    target: "rowhouse::view_state",
                    pref_key,
                    name,
                    "skipping unknown column name in stored state"
                );
            }
        }
    }
    Some(keys)
}
