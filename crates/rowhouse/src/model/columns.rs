//! Column catalogue and resolver.
//!
//! Every field a listings table can display has exactly one entry in the
//! registry returned by [`column_registry`]. A [`ColumnDescriptor`] binds a
//! [`ColumnKey`] to a display label, an optional custom cell renderer, and
//! an optional style hint; descriptors with no renderer fall back to the
//! schema's default rendering for that field.
//!
//! [`resolve_columns`] turns the registry plus a [`ColumnViewState`] into
//! the final ordered column list for one table.

use std::sync::Arc;

use super::enhancer::BadgeStyle;
use super::record::Listing;
use super::view_state::ColumnViewState;

/// Identifies one displayable column. One variant per record field that a
/// table can show.
///
/// The persisted representation is the snake_case field name from
/// [`as_str`](ColumnKey::as_str); [`from_name`](ColumnKey::from_name)
/// parses it back and returns `None` for names the schema no longer knows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKey {
    Star,
    Code,
    MarketingStatus,
    ListingType,
    ListingStatus,
    PropertyType,
    OwnerType,
    ProjectName,
    Area,
    NearestTransit,
    Address,
    Floor,
    UnitNumber,
    Bedrooms,
    Bathrooms,
    UsableArea,
    LandArea,
    ParkingSpaces,
    Furnishing,
    Facing,
    YearBuilt,
    ViewDescription,
    AskingPrice,
    RentalPrice,
    PricePerSqm,
    LastOfferPrice,
    CommissionRate,
    Hashtags,
    Amenities,
    Highlights,
    Exclusive,
    HasTenant,
    CornerUnit,
    PetFriendly,
    OwnerName,
    OwnerPhone,
    OwnerEmail,
    PreferredChannel,
    Assignee,
    Source,
    Notes,
    PhotoCount,
    AvailableFrom,
    CreatedAt,
    UpdatedAt,
}

impl ColumnKey {
    /// Every key, in registry order.
    pub const ALL: [ColumnKey; 45] = [
        ColumnKey::Star,
        ColumnKey::Code,
        ColumnKey::MarketingStatus,
        ColumnKey::ListingType,
        ColumnKey::ListingStatus,
        ColumnKey::PropertyType,
        ColumnKey::OwnerType,
        ColumnKey::ProjectName,
        ColumnKey::Area,
        ColumnKey::NearestTransit,
        ColumnKey::Address,
        ColumnKey::Floor,
        ColumnKey::UnitNumber,
        ColumnKey::Bedrooms,
        ColumnKey::Bathrooms,
        ColumnKey::UsableArea,
        ColumnKey::LandArea,
        ColumnKey::ParkingSpaces,
        ColumnKey::Furnishing,
        ColumnKey::Facing,
        ColumnKey::YearBuilt,
        ColumnKey::ViewDescription,
        ColumnKey::AskingPrice,
        ColumnKey::RentalPrice,
        ColumnKey::PricePerSqm,
        ColumnKey::LastOfferPrice,
        ColumnKey::CommissionRate,
        ColumnKey::Hashtags,
        ColumnKey::Amenities,
        ColumnKey::Highlights,
        ColumnKey::Exclusive,
        ColumnKey::HasTenant,
        ColumnKey::CornerUnit,
        ColumnKey::PetFriendly,
        ColumnKey::OwnerName,
        ColumnKey::OwnerPhone,
        ColumnKey::OwnerEmail,
        ColumnKey::PreferredChannel,
        ColumnKey::Assignee,
        ColumnKey::Source,
        ColumnKey::Notes,
        ColumnKey::PhotoCount,
        ColumnKey::AvailableFrom,
        ColumnKey::CreatedAt,
        ColumnKey::UpdatedAt,
    ];

    /// The persisted snake_case name of the backing record field.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnKey::Star => "is_starred",
            ColumnKey::Code => "code",
            ColumnKey::MarketingStatus => "marketing_status",
            ColumnKey::ListingType => "listing_type",
            ColumnKey::ListingStatus => "listing_status",
            ColumnKey::PropertyType => "property_type",
            ColumnKey::OwnerType => "owner_type",
            ColumnKey::ProjectName => "project_name",
            ColumnKey::Area => "area",
            ColumnKey::NearestTransit => "nearest_transit",
            ColumnKey::Address => "address",
            ColumnKey::Floor => "floor",
            ColumnKey::UnitNumber => "unit_number",
            ColumnKey::Bedrooms => "bedrooms",
            ColumnKey::Bathrooms => "bathrooms",
            ColumnKey::UsableArea => "usable_area_sqm",
            ColumnKey::LandArea => "land_area_sqm",
            ColumnKey::ParkingSpaces => "parking_spaces",
            ColumnKey::Furnishing => "furnishing",
            ColumnKey::Facing => "facing",
            ColumnKey::YearBuilt => "year_built",
            ColumnKey::ViewDescription => "view_description",
            ColumnKey::AskingPrice => "asking_price",
            ColumnKey::RentalPrice => "rental_price",
            ColumnKey::PricePerSqm => "price_per_sqm",
            ColumnKey::LastOfferPrice => "last_offer_price",
            ColumnKey::CommissionRate => "commission_rate",
            ColumnKey::Hashtags => "hashtags",
            ColumnKey::Amenities => "amenities",
            ColumnKey::Highlights => "highlights",
            ColumnKey::Exclusive => "is_exclusive",
            ColumnKey::HasTenant => "has_tenant",
            ColumnKey::CornerUnit => "is_corner_unit",
            ColumnKey::PetFriendly => "pet_friendly",
            ColumnKey::OwnerName => "owner_name",
            ColumnKey::OwnerPhone => "owner_phone",
            ColumnKey::OwnerEmail => "owner_email",
            ColumnKey::PreferredChannel => "preferred_channel",
            ColumnKey::Assignee => "assignee",
            ColumnKey::Source => "source",
            ColumnKey::Notes => "notes",
            ColumnKey::PhotoCount => "photo_count",
            ColumnKey::AvailableFrom => "available_from",
            ColumnKey::CreatedAt => "created_at",
            ColumnKey::UpdatedAt => "updated_at",
        }
    }

    /// Parses a persisted field name. Unknown names return `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == name)
    }
}

/// Presentation hint attached to a column descriptor.
///
/// Hosts are free to ignore hints; the engine attaches them so every front
/// end agrees on which columns are money, badges, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnStyle {
    /// Right-aligned number.
    Numeric,
    /// Money amount with currency prefix.
    Currency,
    /// Color-coded badge.
    Badge,
    /// A row of small tag chips.
    Tags,
    /// Narrow column (icons, flags).
    Compact,
    /// Wide free-text column.
    Wide,
}

/// The payload a cell renderer produces.
///
/// Type-erased the way the rest of the engine likes its data: hosts match on
/// the variant, tests use the `as_*` accessors.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Nothing to show.
    #[default]
    Empty,
    Text(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    /// A money amount in whole currency units.
    Money(i64),
    /// A color-coded label.
    Badge { label: String, style: BadgeStyle },
    /// Small tag chips.
    Tags(Vec<String>),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            CellValue::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_money(&self) -> Option<i64> {
        match self {
            CellValue::Money(n) => Some(*n),
            _ => None,
        }
    }

    /// The badge label and style, when this is a badge.
    pub fn as_badge(&self) -> Option<(&str, BadgeStyle)> {
        match self {
            CellValue::Badge { label, style } => Some((label, *style)),
            _ => None,
        }
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Int(n)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Float(n)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

/// Produces the cell payload for one record. The second argument is the row
/// index within the currently visible set.
pub type CellRenderer = Arc<dyn Fn(&Listing, usize) -> CellValue + Send + Sync>;

/// Invoked when an interactive cell (the star column) is activated.
pub type ActivateFn = Arc<dyn Fn(&Listing) + Send + Sync>;

/// Inline editor for an enumerated column.
///
/// Attached by the enhancer. `options` are the display labels a host should
/// offer; committing a label parses it and forwards the typed edit to the
/// field-change callback. Committing a label the schema does not know is a
/// no-op.
#[derive(Clone)]
pub struct ColumnEditor {
    options: Vec<&'static str>,
    commit: Arc<dyn Fn(&Listing, &str) + Send + Sync>,
}

impl ColumnEditor {
    pub(crate) fn new<F>(options: Vec<&'static str>, commit: F) -> Self
    where
        F: Fn(&Listing, &str) + Send + Sync + 'static,
    {
        Self {
            options,
            commit: Arc::new(commit),
        }
    }

    /// The labels to offer, in display order.
    pub fn options(&self) -> &[&'static str] {
        &self.options
    }

    /// Commits the option with the given label for `listing`.
    pub fn commit(&self, listing: &Listing, label: &str) {
        (self.commit)(listing, label);
    }
}

impl std::fmt::Debug for ColumnEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnEditor")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Metadata binding a record field to a display label and optional custom
/// rendering.
#[derive(Clone)]
pub struct ColumnDescriptor {
    pub key: ColumnKey,
    pub label: &'static str,
    /// Custom cell renderer. `None` falls back to the schema default for
    /// this key.
    pub renderer: Option<CellRenderer>,
    pub style_hint: Option<ColumnStyle>,
    /// Click/activation handler, present only on interactive columns.
    pub on_activate: Option<ActivateFn>,
    /// Inline editor, present only after enhancement of enumerated columns.
    pub editor: Option<ColumnEditor>,
}

impl ColumnDescriptor {
    fn plain(key: ColumnKey, label: &'static str, style_hint: Option<ColumnStyle>) -> Self {
        Self {
            key,
            label,
            renderer: None,
            style_hint,
            on_activate: None,
            editor: None,
        }
    }

    /// The cell payload for `listing` at visible-row `row`: the custom
    /// renderer when one is attached, the schema default otherwise.
    pub fn value_for(&self, listing: &Listing, row: usize) -> CellValue {
        match &self.renderer {
            Some(renderer) => renderer(listing, row),
            None => default_cell(self.key, listing),
        }
    }
}

impl std::fmt::Debug for ColumnDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("style_hint", &self.style_hint)
            .field("has_renderer", &self.renderer.is_some())
            .field("has_editor", &self.editor.is_some())
            .finish()
    }
}

/// Schema-default rendering for a field. Total over every key.
fn default_cell(key: ColumnKey, listing: &Listing) -> CellValue {
    fn opt_text(value: &Option<String>) -> CellValue {
        value
            .as_deref()
            .map(CellValue::from)
            .unwrap_or(CellValue::Empty)
    }

    match key {
        ColumnKey::Star => CellValue::Bool(listing.is_starred),
        ColumnKey::Code => CellValue::from(listing.code.as_str()),
        ColumnKey::MarketingStatus => CellValue::from(listing.marketing_status.label()),
        ColumnKey::ListingType => CellValue::from(listing.listing_type.label()),
        ColumnKey::ListingStatus => CellValue::from(listing.listing_status.label()),
        ColumnKey::PropertyType => CellValue::from(listing.property_type.label()),
        ColumnKey::OwnerType => CellValue::from(listing.owner_type.label()),
        ColumnKey::ProjectName => CellValue::from(listing.project_name.as_str()),
        ColumnKey::Area => CellValue::from(listing.area.as_str()),
        ColumnKey::NearestTransit => CellValue::from(listing.nearest_transit.as_str()),
        ColumnKey::Address => CellValue::from(listing.address.as_str()),
        ColumnKey::Floor => listing
            .floor
            .map(|f| CellValue::Int(f as i64))
            .unwrap_or(CellValue::Empty),
        ColumnKey::UnitNumber => CellValue::from(listing.unit_number.as_str()),
        ColumnKey::Bedrooms => CellValue::Int(listing.bedrooms as i64),
        ColumnKey::Bathrooms => CellValue::Int(listing.bathrooms as i64),
        ColumnKey::UsableArea => CellValue::Float(listing.usable_area_sqm),
        ColumnKey::LandArea => listing
            .land_area_sqm
            .map(CellValue::Float)
            .unwrap_or(CellValue::Empty),
        ColumnKey::ParkingSpaces => CellValue::Int(listing.parking_spaces as i64),
        ColumnKey::Furnishing => CellValue::from(listing.furnishing.label()),
        ColumnKey::Facing => opt_text(&listing.facing),
        ColumnKey::YearBuilt => listing
            .year_built
            .map(|y| CellValue::Int(y as i64))
            .unwrap_or(CellValue::Empty),
        ColumnKey::ViewDescription => opt_text(&listing.view_description),
        ColumnKey::AskingPrice => CellValue::Int(listing.asking_price),
        ColumnKey::RentalPrice => listing
            .rental_price
            .map(CellValue::Int)
            .unwrap_or(CellValue::Empty),
        ColumnKey::PricePerSqm => listing
            .price_per_sqm
            .map(CellValue::Float)
            .unwrap_or(CellValue::Empty),
        ColumnKey::LastOfferPrice => listing
            .last_offer_price
            .map(CellValue::Int)
            .unwrap_or(CellValue::Empty),
        ColumnKey::CommissionRate => CellValue::Float(listing.commission_rate as f64),
        ColumnKey::Hashtags => CellValue::Tags(listing.hashtags.clone()),
        ColumnKey::Amenities => CellValue::Tags(listing.amenities.clone()),
        ColumnKey::Highlights => CellValue::Tags(listing.highlights.clone()),
        ColumnKey::Exclusive => CellValue::Bool(listing.is_exclusive),
        ColumnKey::HasTenant => CellValue::Bool(listing.has_tenant),
        ColumnKey::CornerUnit => CellValue::Bool(listing.is_corner_unit),
        ColumnKey::PetFriendly => CellValue::Bool(listing.pet_friendly),
        ColumnKey::OwnerName => CellValue::from(listing.owner_name.as_str()),
        ColumnKey::OwnerPhone => CellValue::from(listing.owner_phone.as_str()),
        ColumnKey::OwnerEmail => CellValue::from(listing.owner_email.as_str()),
        ColumnKey::PreferredChannel => opt_text(&listing.preferred_channel),
        ColumnKey::Assignee => CellValue::from(listing.assignee.as_str()),
        ColumnKey::Source => CellValue::from(listing.source.as_str()),
        ColumnKey::Notes => CellValue::from(listing.notes.as_str()),
        ColumnKey::PhotoCount => CellValue::Int(listing.photo_count as i64),
        ColumnKey::AvailableFrom => listing
            .available_from
            .map(|d| CellValue::Text(d.format("%Y-%m-%d").to_string()))
            .unwrap_or(CellValue::Empty),
        ColumnKey::CreatedAt => {
            CellValue::Text(listing.created_at.format("%Y-%m-%d %H:%M").to_string())
        }
        ColumnKey::UpdatedAt => {
            CellValue::Text(listing.updated_at.format("%Y-%m-%d %H:%M").to_string())
        }
    }
}

/// The exhaustive catalogue of displayable columns: exactly one descriptor
/// per key in [`ColumnKey::ALL`], in registry order.
pub fn column_registry() -> Vec<ColumnDescriptor> {
    use ColumnKey as K;
    use ColumnStyle as S;

    ColumnKey::ALL
        .into_iter()
        .map(|key| {
            let (label, style) = match key {
                K::Star => ("Starred", Some(S::Compact)),
                K::Code => ("Code", None),
                K::MarketingStatus => ("Status", Some(S::Badge)),
                K::ListingType => ("List", Some(S::Badge)),
                K::ListingStatus => ("Agreement", Some(S::Badge)),
                K::PropertyType => ("Type", Some(S::Badge)),
                K::OwnerType => ("Owner Type", Some(S::Badge)),
                K::ProjectName => ("Project", None),
                K::Area => ("Area", None),
                K::NearestTransit => ("Transit", None),
                K::Address => ("Address", Some(S::Wide)),
                K::Floor => ("Floor", Some(S::Numeric)),
                K::UnitNumber => ("Unit", Some(S::Compact)),
                K::Bedrooms => ("Beds", Some(S::Numeric)),
                K::Bathrooms => ("Baths", Some(S::Numeric)),
                K::UsableArea => ("Usable m²", Some(S::Numeric)),
                K::LandArea => ("Land m²", Some(S::Numeric)),
                K::ParkingSpaces => ("Parking", Some(S::Numeric)),
                K::Furnishing => ("Furnishing", None),
                K::Facing => ("Facing", None),
                K::YearBuilt => ("Built", Some(S::Numeric)),
                K::ViewDescription => ("View", None),
                K::AskingPrice => ("Asking", Some(S::Currency)),
                K::RentalPrice => ("Rent", Some(S::Currency)),
                K::PricePerSqm => ("Per m²", Some(S::Numeric)),
                K::LastOfferPrice => ("Last Offer", Some(S::Currency)),
                K::CommissionRate => ("Comm %", Some(S::Numeric)),
                K::Hashtags => ("Hashtags", Some(S::Tags)),
                K::Amenities => ("Amenities", Some(S::Tags)),
                K::Highlights => ("Highlights", Some(S::Tags)),
                K::Exclusive => ("Exclusive", Some(S::Compact)),
                K::HasTenant => ("Tenanted", Some(S::Compact)),
                K::CornerUnit => ("Corner", Some(S::Compact)),
                K::PetFriendly => ("Pets", Some(S::Compact)),
                K::OwnerName => ("Owner", None),
                K::OwnerPhone => ("Phone", None),
                K::OwnerEmail => ("Email", None),
                K::PreferredChannel => ("Channel", Some(S::Compact)),
                K::Assignee => ("Assignee", None),
                K::Source => ("Source", None),
                K::Notes => ("Notes", Some(S::Wide)),
                K::PhotoCount => ("Photos", Some(S::Numeric)),
                K::AvailableFrom => ("Available", None),
                K::CreatedAt => ("Created", None),
                K::UpdatedAt => ("Updated", None),
            };
            ColumnDescriptor::plain(key, label, style)
        })
        .collect()
}

/// Resolves the ordered column list for one table.
///
/// Filters `registry` down to the view state's visible keys and orders the
/// survivors by their position in the column order; visible keys the order
/// does not mention are first appended to it (the view state's self-heal
/// pass), so they land at the end while keeping their relative registry
/// order. When `star_toggle` is supplied, the star column descriptor is
/// replaced by an interactive one bound to that handler.
///
/// Guarantees: every returned key is unique, and the result length never
/// exceeds the number of visible keys.
pub fn resolve_columns(
    view: &mut ColumnViewState,
    registry: &[ColumnDescriptor],
    star_toggle: Option<ActivateFn>,
) -> Vec<ColumnDescriptor> {
    let healed = view.heal_order();
    if !healed.is_empty() {
        tracing::debug!(
            target: "rowhouse::view_state",
            appended = ?healed,
            "column order healed during resolve"
        );
    }

    let mut columns: Vec<ColumnDescriptor> = registry
        .iter()
        .filter(|descriptor| view.is_visible(descriptor.key))
        .cloned()
        .collect();

    let order = view.order().to_vec();
    columns.sort_by_key(|descriptor| {
        order
            .iter()
            .position(|key| *key == descriptor.key)
            .unwrap_or(usize::MAX)
    });

    if let Some(toggle) = star_toggle {
        for column in &mut columns {
            if column.key == ColumnKey::Star {
                column.renderer = Some(Arc::new(|listing: &Listing, _row| {
                    CellValue::Bool(listing.is_starred)
                }));
                column.on_activate = Some(Arc::clone(&toggle));
            }
        }
    }

    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::view_state::{ColumnViewState, LoadPolicy};
    use crate::prefs::MemoryStore;
    use parking_lot::Mutex;
    use std::collections::HashSet;

    fn view_with(visible: &[ColumnKey], order: &[ColumnKey]) -> ColumnViewState {
        ColumnViewState::load(
            Arc::new(MemoryStore::new()),
            visible,
            order,
            LoadPolicy::ApplyDefaults,
        )
    }

    #[test]
    fn test_registry_covers_every_key_exactly_once() {
        let registry = column_registry();
        assert_eq!(registry.len(), ColumnKey::ALL.len());

        let keys: HashSet<_> = registry.iter().map(|d| d.key).collect();
        assert_eq!(keys.len(), ColumnKey::ALL.len());
    }

    #[test]
    fn test_key_names_round_trip() {
        for key in ColumnKey::ALL {
            assert_eq!(ColumnKey::from_name(key.as_str()), Some(key));
        }
        assert_eq!(ColumnKey::from_name("no_such_field"), None);
    }

    #[test]
    fn test_resolve_orders_by_view_state() {
        let registry = column_registry();
        let mut view = view_with(
            &[ColumnKey::Code, ColumnKey::Area, ColumnKey::Bedrooms],
            &[ColumnKey::Bedrooms, ColumnKey::Code, ColumnKey::Area],
        );

        let columns = resolve_columns(&mut view, &registry, None);
        let keys: Vec<_> = columns.iter().map(|c| c.key).collect();
        assert_eq!(
            keys,
            vec![ColumnKey::Bedrooms, ColumnKey::Code, ColumnKey::Area]
        );
    }

    #[test]
    fn test_resolve_heals_keys_missing_from_order() {
        // Visible has three keys but the order only mentions two. The
        // resolver must neither drop the third key nor leave the order
        // unhealed.
        let registry = column_registry();
        let mut view = view_with(
            &[ColumnKey::Code, ColumnKey::Area, ColumnKey::Bedrooms],
            &[ColumnKey::Area, ColumnKey::Code],
        );

        let columns = resolve_columns(&mut view, &registry, None);
        assert_eq!(columns.len(), 3);
        let bedroom_count = columns
            .iter()
            .filter(|c| c.key == ColumnKey::Bedrooms)
            .count();
        assert_eq!(bedroom_count, 1);
        // The healed key sorts last.
        assert_eq!(columns[2].key, ColumnKey::Bedrooms);
        assert!(view.order().contains(&ColumnKey::Bedrooms));
    }

    #[test]
    fn test_resolve_keeps_registry_order_for_unordered_keys() {
        let registry = column_registry();
        // Nothing in the order list: everything heals, sorted by the healed
        // order, which preserves visible order (itself registry order here).
        let mut view = view_with(
            &[ColumnKey::Code, ColumnKey::Bedrooms, ColumnKey::AskingPrice],
            &[],
        );

        let columns = resolve_columns(&mut view, &registry, None);
        let keys: Vec<_> = columns.iter().map(|c| c.key).collect();
        assert_eq!(
            keys,
            vec![ColumnKey::Code, ColumnKey::Bedrooms, ColumnKey::AskingPrice]
        );
    }

    #[test]
    fn test_star_column_gains_toggle_handler() {
        let registry = column_registry();
        let mut view = view_with(
            &[ColumnKey::Star, ColumnKey::Code],
            &[ColumnKey::Star, ColumnKey::Code],
        );

        let toggled = Arc::new(Mutex::new(Vec::new()));
        let sink = toggled.clone();
        let toggle: ActivateFn = Arc::new(move |listing: &Listing| {
            sink.lock().push(listing.code.clone());
        });

        let columns = resolve_columns(&mut view, &registry, Some(toggle));
        let star = columns.iter().find(|c| c.key == ColumnKey::Star).unwrap();
        assert!(star.on_activate.is_some());

        let listing = Listing {
            code: "RH-0009".into(),
            ..Default::default()
        };
        (star.on_activate.as_ref().unwrap())(&listing);
        assert_eq!(*toggled.lock(), vec!["RH-0009".to_string()]);

        // Without a handler the star column stays plain.
        let columns = resolve_columns(&mut view, &registry, None);
        let star = columns.iter().find(|c| c.key == ColumnKey::Star).unwrap();
        assert!(star.on_activate.is_none());
    }

    #[test]
    fn test_default_cell_is_total() {
        let listing = Listing {
            code: "RH-0001".into(),
            ..Default::default()
        };
        for descriptor in column_registry() {
            // Must not panic for any key on a default record.
            let _ = descriptor.value_for(&listing, 0);
        }
    }

    #[test]
    fn test_value_for_prefers_custom_renderer() {
        let mut descriptor = column_registry()
            .into_iter()
            .find(|d| d.key == ColumnKey::Code)
            .unwrap();
        descriptor.renderer = Some(Arc::new(|_, row| CellValue::Int(row as i64)));

        let listing = Listing::default();
        assert_eq!(descriptor.value_for(&listing, 7), CellValue::Int(7));
    }
}
