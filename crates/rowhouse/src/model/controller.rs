//! The table controller.
//!
//! [`TableController`] owns one table's live record collection and
//! everything the user can point at it: the listing-type tab, the owner
//! selector, the structured [`FilterSpec`], the detail selection, and the
//! group-by toggle. It is the only place records are mutated, and it keeps
//! the table and the open detail panel agreeing about every record.
//!
//! Closing the detail panel clears the selection *reference* only after a
//! short grace period, so the panel does not visibly empty mid-animation.
//! The pending clear is tagged with a selection epoch: if a newer selection
//! arrives before the timer fires, the stale clear is discarded instead of
//! wiping the new selection.

use std::time::{Duration, Instant};

use rowhouse_core::{Signal, TimerManager};

use super::filter::FilterSpec;
use super::record::{FieldEdit, Listing, ListingType, OwnerType};

/// Outcome of a record mutation.
///
/// An unknown code is an explicit, observable no-op rather than a silently
/// swallowed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutateOutcome {
    /// The record was found and replaced.
    Applied,
    /// No record carries the given code; the collection is untouched.
    NoOp,
}

/// Signals emitted by a [`TableController`].
///
/// Observers connect to these to stay synchronized with the table.
pub struct ControllerSignals {
    /// Any narrowing input changed: tab, owner selector, or filter spec.
    pub filter_changed: Signal<()>,
    /// A record changed. Argument: the record's code.
    pub data_changed: Signal<String>,
    /// The open detail selection changed. `Some(code)` on select, `None`
    /// when the panel closes.
    pub detail_changed: Signal<Option<String>>,
    /// The group-by toggle flipped. This is the user-facing notification;
    /// no data changes with it.
    pub group_toggled: Signal<bool>,
}

impl ControllerSignals {
    fn new() -> Self {
        Self {
            filter_changed: Signal::new(),
            data_changed: Signal::new(),
            detail_changed: Signal::new(),
            group_toggled: Signal::new(),
        }
    }
}

/// A scheduled detail-selection clear, tagged with the selection epoch it
/// belongs to.
struct PendingClear {
    epoch: u64,
}

/// Stateful orchestrator for one listings table.
///
/// Each table owns its collection exclusively; two tables on the same page
/// hold independent copies even when their view states share a preference
/// store.
pub struct TableController {
    listings: Vec<Listing>,
    tab: Option<ListingType>,
    owner_tab: Option<OwnerType>,
    filter: Option<FilterSpec>,
    detail: Option<Listing>,
    detail_open: bool,
    /// Bumped on every new selection; pending clears must match it.
    selection_epoch: u64,
    grouped: bool,
    close_grace: Duration,
    pending_clears: TimerManager<PendingClear>,
    signals: ControllerSignals,
}

impl TableController {
    /// Default grace period between closing the detail panel and dropping
    /// the selection reference.
    pub const DEFAULT_CLOSE_GRACE: Duration = Duration::from_millis(300);

    /// Creates a controller seeded with `listings`.
    ///
    /// Codes must be unique within the collection; a duplicate is logged
    /// and the first occurrence wins on lookup.
    pub fn new(listings: Vec<Listing>) -> Self {
        for (i, listing) in listings.iter().enumerate() {
            if listings[..i].iter().any(|other| other.code == listing.code) {
                tracing::warn!(
                    target: "rowhouse::controller",
                    code = %listing.code,
                    "duplicate listing code in seed collection"
                );
            }
        }

        Self {
            listings,
            tab: None,
            owner_tab: None,
            filter: None,
            detail: None,
            detail_open: false,
            selection_epoch: 0,
            grouped: false,
            close_grace: Self::DEFAULT_CLOSE_GRACE,
            pending_clears: TimerManager::new(),
            signals: ControllerSignals::new(),
        }
    }

    /// Overrides the detail-close grace period.
    pub fn with_close_grace(mut self, grace: Duration) -> Self {
        self.close_grace = grace;
        self
    }

    pub fn signals(&self) -> &ControllerSignals {
        &self.signals
    }

    /// The full live collection, unfiltered.
    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    // -------------------------------------------------------------------------
    // Narrowing
    // -------------------------------------------------------------------------

    pub fn tab(&self) -> Option<ListingType> {
        self.tab
    }

    /// Sets the listing-type tab. Applied before the filter spec and
    /// independent of the spec's own listing-type set.
    pub fn set_tab(&mut self, tab: Option<ListingType>) {
        if self.tab != tab {
            self.tab = tab;
            self.signals.filter_changed.emit(());
        }
    }

    pub fn owner_tab(&self) -> Option<OwnerType> {
        self.owner_tab
    }

    /// Sets the owner-type selector, applied alongside the tab.
    pub fn set_owner_tab(&mut self, owner_tab: Option<OwnerType>) {
        if self.owner_tab != owner_tab {
            self.owner_tab = owner_tab;
            self.signals.filter_changed.emit(());
        }
    }

    pub fn filter(&self) -> Option<&FilterSpec> {
        self.filter.as_ref()
    }

    /// Replaces the active filter spec.
    pub fn set_filter(&mut self, spec: FilterSpec) {
        self.filter = Some(spec);
        self.signals.filter_changed.emit(());
    }

    /// Drops the filter spec, leaving only the tab and owner narrowing.
    pub fn clear_filter(&mut self) {
        if self.filter.take().is_some() {
            self.signals.filter_changed.emit(());
        }
    }

    /// The final narrowed view: tab filter, then owner filter, then the
    /// filter spec, preserving collection order.
    pub fn visible_listings(&self) -> Vec<&Listing> {
        self.listings
            .iter()
            .filter(|l| self.tab.is_none_or(|tab| l.listing_type == tab))
            .filter(|l| self.owner_tab.is_none_or(|owner| l.owner_type == owner))
            .filter(|l| self.filter.as_ref().is_none_or(|spec| spec.matches(l)))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Grouping
    // -------------------------------------------------------------------------

    pub fn is_grouped(&self) -> bool {
        self.grouped
    }

    /// Flips the group-by toggle and returns the new state. Emits
    /// [`ControllerSignals::group_toggled`]; no data changes.
    pub fn toggle_grouping(&mut self) -> bool {
        self.grouped = !self.grouped;
        self.signals.group_toggled.emit(self.grouped);
        self.grouped
    }

    /// The visible set grouped by project name, in first-seen order.
    pub fn grouped_listings(&self) -> Vec<(String, Vec<&Listing>)> {
        let mut groups: Vec<(String, Vec<&Listing>)> = Vec::new();
        for listing in self.visible_listings() {
            match groups.iter_mut().find(|(name, _)| *name == listing.project_name) {
                Some((_, members)) => members.push(listing),
                None => groups.push((listing.project_name.clone(), vec![listing])),
            }
        }
        groups
    }

    // -------------------------------------------------------------------------
    // Detail selection
    // -------------------------------------------------------------------------

    /// The record currently selected for the detail panel, if any. May
    /// outlive [`is_detail_open`](Self::is_detail_open) by the close grace
    /// period.
    pub fn detail(&self) -> Option<&Listing> {
        self.detail.as_ref()
    }

    pub fn is_detail_open(&self) -> bool {
        self.detail_open
    }

    /// Selects the record with `code` for the detail panel.
    ///
    /// Supersedes any pending clear from a previous close: the new epoch
    /// invalidates stale timers. Returns `false` (no change) for an unknown
    /// code.
    pub fn select_row(&mut self, code: &str) -> bool {
        let Some(listing) = self.listings.iter().find(|l| l.code == code) else {
            tracing::debug!(target: "rowhouse::controller", code, "select of unknown code");
            return false;
        };

        self.detail = Some(listing.clone());
        self.detail_open = true;
        self.selection_epoch += 1;
        self.signals.detail_changed.emit(Some(code.to_string()));
        true
    }

    /// Closes the detail panel immediately and schedules the selection
    /// reference to be cleared after the grace period.
    pub fn close_detail(&mut self) {
        if !self.detail_open {
            return;
        }
        self.detail_open = false;
        self.pending_clears.schedule(
            self.close_grace,
            PendingClear {
                epoch: self.selection_epoch,
            },
        );
        self.signals.detail_changed.emit(None);
    }

    /// Fires due grace-period timers. Call from the host's idle/tick hook.
    ///
    /// A pending clear only applies when its epoch still matches: a clear
    /// scheduled before a newer selection is stale and gets discarded, so a
    /// fast re-open is never wiped by the previous close's timer.
    ///
    /// Returns the number of clears applied.
    pub fn process_timers(&mut self) -> usize {
        let mut applied = 0;
        for clear in self.pending_clears.drain_expired(Instant::now()) {
            if clear.epoch != self.selection_epoch {
                continue; // superseded by a newer selection
            }
            if self.detail.take().is_some() {
                applied += 1;
            }
        }
        applied
    }

    // -------------------------------------------------------------------------
    // Mutation
    // -------------------------------------------------------------------------

    /// Applies `edit` to the record with `code`.
    ///
    /// The record is replaced immutably in the collection. If it is also
    /// the current detail selection, the selection is updated with the same
    /// value in the same operation — the table and the panel must never
    /// disagree about a record. An unknown code leaves the collection
    /// untouched and reports [`MutateOutcome::NoOp`].
    pub fn mutate_field(&mut self, code: &str, edit: FieldEdit) -> MutateOutcome {
        let Some(index) = self.listings.iter().position(|l| l.code == code) else {
            tracing::debug!(
                target: "rowhouse::controller",
                code,
                ?edit,
                "mutation of unknown code is a no-op"
            );
            return MutateOutcome::NoOp;
        };

        let next = edit.apply_to(&self.listings[index]);

        if self.detail.as_ref().is_some_and(|d| d.code == code) {
            self.detail = Some(next.clone());
        }
        self.listings[index] = next;

        self.signals.data_changed.emit(code.to_string());
        MutateOutcome::Applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::{MarketingStatus, PropertyType};
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn listing(code: &str) -> Listing {
        Listing {
            code: code.into(),
            ..Default::default()
        }
    }

    /// Ten records: three "A List", of which exactly two are condos.
    fn seed_mixed() -> Vec<Listing> {
        let mut listings = Vec::new();
        for i in 0..10 {
            let code = format!("RH-{i:04}");
            let listing_type = if i < 3 {
                ListingType::AList
            } else {
                ListingType::BList
            };
            let property_type = if i == 0 || i == 2 || i == 5 {
                PropertyType::Condo
            } else {
                PropertyType::House
            };
            listings.push(Listing {
                code,
                listing_type,
                property_type,
                ..Default::default()
            });
        }
        listings
    }

    fn zero_grace(listings: Vec<Listing>) -> TableController {
        TableController::new(listings).with_close_grace(Duration::ZERO)
    }

    #[test]
    fn test_no_filters_shows_everything() {
        let table = TableController::new(seed_mixed());
        assert_eq!(table.visible_listings().len(), 10);
    }

    #[test]
    fn test_tab_and_spec_apply_together() {
        // Three "A List" records, two of them condos: the tab and the
        // spec's property-type set must both hold.
        let mut table = TableController::new(seed_mixed());
        table.set_tab(Some(ListingType::AList));
        table.set_filter(FilterSpec {
            property_types: vec![PropertyType::Condo],
            ..Default::default()
        });

        let visible = table.visible_listings();
        assert_eq!(visible.len(), 2);
        for listing in visible {
            assert_eq!(listing.listing_type, ListingType::AList);
            assert_eq!(listing.property_type, PropertyType::Condo);
        }
    }

    #[test]
    fn test_tab_is_independent_of_spec_listing_types() {
        // The tab narrows to A List while the spec allows only B List:
        // nothing satisfies both.
        let mut table = TableController::new(seed_mixed());
        table.set_tab(Some(ListingType::AList));
        table.set_filter(FilterSpec {
            listing_types: vec![ListingType::BList],
            ..Default::default()
        });

        assert!(table.visible_listings().is_empty());
    }

    #[test]
    fn test_clear_filter_keeps_tab() {
        let mut table = TableController::new(seed_mixed());
        table.set_tab(Some(ListingType::AList));
        table.set_filter(FilterSpec {
            property_types: vec![PropertyType::Condo],
            ..Default::default()
        });
        table.clear_filter();

        assert_eq!(table.visible_listings().len(), 3);
    }

    #[test]
    fn test_owner_tab_narrows_before_spec() {
        let mut listings = seed_mixed();
        listings[0].owner_type = OwnerType::Developer;
        listings[1].owner_type = OwnerType::Developer;

        let mut table = TableController::new(listings);
        table.set_owner_tab(Some(OwnerType::Developer));
        assert_eq!(table.visible_listings().len(), 2);
    }

    #[test]
    fn test_filter_changed_signal_fires_once_per_change() {
        let mut table = TableController::new(seed_mixed());
        let fired = Arc::new(AtomicUsize::new(0));
        let sink = fired.clone();
        table.signals().filter_changed.connect(move |_| {
            sink.fetch_add(1, Ordering::SeqCst);
        });

        table.set_tab(Some(ListingType::AList));
        table.set_tab(Some(ListingType::AList)); // unchanged, no emit
        table.set_filter(FilterSpec::default());
        table.clear_filter();
        table.clear_filter(); // already clear, no emit

        assert_eq!(fired.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_mutation_updates_collection_and_open_detail() {
        let mut table = zero_grace(vec![listing("RH-0001"), listing("RH-0002")]);
        assert!(table.select_row("RH-0001"));

        let outcome = table.mutate_field("RH-0001", FieldEdit::Starred(true));
        assert_eq!(outcome, MutateOutcome::Applied);

        // Dual-write: both the collection entry and the detail selection
        // report the new value.
        assert!(table.listings()[0].is_starred);
        assert!(table.detail().unwrap().is_starred);
    }

    #[test]
    fn test_mutation_of_non_selected_record_leaves_detail_alone() {
        let mut table = zero_grace(vec![listing("RH-0001"), listing("RH-0002")]);
        table.select_row("RH-0001");

        table.mutate_field(
            "RH-0002",
            FieldEdit::MarketingStatus(MarketingStatus::Sold),
        );

        assert_eq!(table.listings()[1].marketing_status, MarketingStatus::Sold);
        assert_eq!(
            table.detail().unwrap().marketing_status,
            MarketingStatus::Available
        );
    }

    #[test]
    fn test_unknown_code_mutation_is_noop() {
        let mut table = TableController::new(vec![listing("RH-0001")]);
        let before = table.listings().to_vec();

        let outcome = table.mutate_field("NON-EXISTENT", FieldEdit::Starred(true));

        assert_eq!(outcome, MutateOutcome::NoOp);
        assert_eq!(table.listings(), &before[..]);
    }

    #[test]
    fn test_data_changed_emits_only_on_applied() {
        let mut table = TableController::new(vec![listing("RH-0001")]);
        let changed = Arc::new(Mutex::new(Vec::new()));
        let sink = changed.clone();
        table.signals().data_changed.connect(move |code| {
            sink.lock().push(code.clone());
        });

        table.mutate_field("RH-0001", FieldEdit::Starred(true));
        table.mutate_field("NON-EXISTENT", FieldEdit::Starred(true));

        assert_eq!(*changed.lock(), vec!["RH-0001".to_string()]);
    }

    #[test]
    fn test_close_clears_selection_after_grace() {
        let mut table = zero_grace(vec![listing("RH-0001")]);
        table.select_row("RH-0001");
        table.close_detail();

        // Closed immediately, but the reference survives until the grace
        // timer fires.
        assert!(!table.is_detail_open());
        assert!(table.detail().is_some());

        assert_eq!(table.process_timers(), 1);
        assert!(table.detail().is_none());
    }

    #[test]
    fn test_stale_clear_does_not_wipe_new_selection() {
        // Close, then re-open a different record before the grace timer
        // fires: the late timer from the first close must not clear the
        // newer selection.
        let mut table = zero_grace(vec![listing("RH-0001"), listing("RH-0002")]);
        table.select_row("RH-0001");
        table.close_detail();
        table.select_row("RH-0002");

        assert_eq!(table.process_timers(), 0);
        assert_eq!(table.detail().unwrap().code, "RH-0002");
        assert!(table.is_detail_open());
    }

    #[test]
    fn test_double_close_is_idempotent() {
        let mut table = zero_grace(vec![listing("RH-0001")]);
        table.select_row("RH-0001");
        table.close_detail();
        table.close_detail(); // second close: no second timer

        assert_eq!(table.process_timers(), 1);
        assert!(table.detail().is_none());
    }

    #[test]
    fn test_future_grace_timer_does_not_fire_early() {
        let mut table = TableController::new(vec![listing("RH-0001")])
            .with_close_grace(Duration::from_secs(60));
        table.select_row("RH-0001");
        table.close_detail();

        assert_eq!(table.process_timers(), 0);
        assert!(table.detail().is_some());
    }

    #[test]
    fn test_select_unknown_code_is_rejected() {
        let mut table = TableController::new(vec![listing("RH-0001")]);
        assert!(!table.select_row("RH-9999"));
        assert!(table.detail().is_none());
        assert!(!table.is_detail_open());
    }

    #[test]
    fn test_group_toggle_emits_notification_without_data_change() {
        let mut table = TableController::new(seed_mixed());
        let toggles = Arc::new(Mutex::new(Vec::new()));
        let sink = toggles.clone();
        table.signals().group_toggled.connect(move |on| {
            sink.lock().push(*on);
        });

        let before = table.listings().to_vec();
        assert!(table.toggle_grouping());
        assert!(!table.toggle_grouping());

        assert_eq!(*toggles.lock(), vec![true, false]);
        assert_eq!(table.listings(), &before[..]);
    }

    #[test]
    fn test_grouped_listings_by_project() {
        let mut listings = vec![listing("RH-0001"), listing("RH-0002"), listing("RH-0003")];
        listings[0].project_name = "Noble Remix".into();
        listings[1].project_name = "Rhythm Ekkamai".into();
        listings[2].project_name = "Noble Remix".into();

        let mut table = TableController::new(listings);
        table.toggle_grouping();

        let groups = table.grouped_listings();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "Noble Remix");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "Rhythm Ekkamai");
    }

    #[test]
    fn test_detail_changed_signal_payloads() {
        let mut table = zero_grace(vec![listing("RH-0001")]);
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        table.signals().detail_changed.connect(move |code| {
            sink.lock().push(code.clone());
        });

        table.select_row("RH-0001");
        table.close_detail();

        assert_eq!(
            *events.lock(),
            vec![Some("RH-0001".to_string()), None]
        );
    }
}
