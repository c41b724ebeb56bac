//! The listing record schema.
//!
//! A [`Listing`] is one flat record with a unique `code`. The code is the
//! sole identity key: every lookup and mutation in the engine goes through
//! it, and no two records in a collection may share one.
//!
//! The classification fields are closed enums rather than free strings.
//! Each enum has a total [`label`](MarketingStatus::label) for display and a
//! partial `from_label` for parsing user-facing text back; an unknown label
//! parses to `None` and is treated as a no-op by the callers that edit
//! records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::columns::ColumnKey;

/// Marketing lifecycle of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MarketingStatus {
    /// On the market and available.
    #[default]
    Available,
    /// Deposit taken, contract not yet signed.
    Reserved,
    /// Sold and off the market.
    Sold,
    /// Rented out (rental listings).
    Rented,
    /// Temporarily pulled by the owner.
    Suspended,
}

impl MarketingStatus {
    /// Every variant, in display order.
    pub const ALL: [MarketingStatus; 5] = [
        MarketingStatus::Available,
        MarketingStatus::Reserved,
        MarketingStatus::Sold,
        MarketingStatus::Rented,
        MarketingStatus::Suspended,
    ];

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            MarketingStatus::Available => "Available",
            MarketingStatus::Reserved => "Reserved",
            MarketingStatus::Sold => "Sold",
            MarketingStatus::Rented => "Rented",
            MarketingStatus::Suspended => "Suspended",
        }
    }

    /// Parses a display label. Unknown labels return `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

/// Pipeline tier of a listing. Doubles as the table's tab selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ListingType {
    /// Priority stock, actively marketed.
    AList,
    /// Regular stock.
    #[default]
    BList,
    /// Under an exclusive agreement.
    Exclusive,
    /// Kept for reference only.
    Inactive,
}

impl ListingType {
    pub const ALL: [ListingType; 4] = [
        ListingType::AList,
        ListingType::BList,
        ListingType::Exclusive,
        ListingType::Inactive,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ListingType::AList => "A List",
            ListingType::BList => "B List",
            ListingType::Exclusive => "Exclusive",
            ListingType::Inactive => "Inactive",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }
}

/// Administrative status of the listing agreement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ListingStatus {
    #[default]
    Active,
    Pending,
    Expired,
    Withdrawn,
}

impl ListingStatus {
    pub const ALL: [ListingStatus; 4] = [
        ListingStatus::Active,
        ListingStatus::Pending,
        ListingStatus::Expired,
        ListingStatus::Withdrawn,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ListingStatus::Active => "Active",
            ListingStatus::Pending => "Pending",
            ListingStatus::Expired => "Expired",
            ListingStatus::Withdrawn => "Withdrawn",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

/// Physical property category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum PropertyType {
    #[default]
    Condo,
    House,
    Townhouse,
    Apartment,
    Land,
    Commercial,
}

impl PropertyType {
    pub const ALL: [PropertyType; 6] = [
        PropertyType::Condo,
        PropertyType::House,
        PropertyType::Townhouse,
        PropertyType::Apartment,
        PropertyType::Land,
        PropertyType::Commercial,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::Condo => "Condo",
            PropertyType::House => "House",
            PropertyType::Townhouse => "Townhouse",
            PropertyType::Apartment => "Apartment",
            PropertyType::Land => "Land",
            PropertyType::Commercial => "Commercial",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }
}

/// Who the brokerage is dealing with on the supply side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OwnerType {
    #[default]
    Owner,
    Agent,
    Developer,
}

impl OwnerType {
    pub const ALL: [OwnerType; 3] = [OwnerType::Owner, OwnerType::Agent, OwnerType::Developer];

    pub fn label(&self) -> &'static str {
        match self {
            OwnerType::Owner => "Owner",
            OwnerType::Agent => "Agent",
            OwnerType::Developer => "Developer",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.label() == label)
    }
}

/// Furnishing level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Furnishing {
    #[default]
    Unfurnished,
    PartlyFurnished,
    FullyFurnished,
}

impl Furnishing {
    pub const ALL: [Furnishing; 3] = [
        Furnishing::Unfurnished,
        Furnishing::PartlyFurnished,
        Furnishing::FullyFurnished,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Furnishing::Unfurnished => "Unfurnished",
            Furnishing::PartlyFurnished => "Partly furnished",
            Furnishing::FullyFurnished => "Fully furnished",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.label() == label)
    }
}

/// One listing record.
///
/// Flat by design: the table, the filter model, and the detail panel all
/// read the same structure, and a mutation replaces the whole record
/// immutably. `code` is the identity key; everything else is payload.
///
/// Records are cheap to build in tests and seed data with struct-update
/// syntax:
///
/// ```
/// use rowhouse::model::Listing;
///
/// let listing = Listing {
///     code: "RH-0042".into(),
///     bedrooms: 3,
///     asking_price: 8_900_000,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Listing {
    // Identity
    /// Unique listing code. Stable for the record's lifetime.
    pub code: String,

    // Classification
    pub marketing_status: MarketingStatus,
    pub listing_type: ListingType,
    pub listing_status: ListingStatus,
    pub property_type: PropertyType,
    pub owner_type: OwnerType,

    // Location and description
    pub project_name: String,
    /// Neighbourhood / district name.
    pub area: String,
    /// Nearest rapid-transit station, free text ("BTS Thong Lo").
    pub nearest_transit: String,
    pub address: String,
    pub floor: Option<i16>,
    pub unit_number: String,
    pub bedrooms: u8,
    pub bathrooms: u8,
    pub usable_area_sqm: f64,
    pub land_area_sqm: Option<f64>,
    pub parking_spaces: u8,
    pub furnishing: Furnishing,
    pub facing: Option<String>,
    pub year_built: Option<u16>,
    pub view_description: Option<String>,

    // Prices
    pub asking_price: i64,
    pub rental_price: Option<i64>,
    pub price_per_sqm: Option<f64>,
    pub last_offer_price: Option<i64>,
    /// Commission percentage agreed with the owner.
    pub commission_rate: f32,

    // Collections
    pub hashtags: Vec<String>,
    pub amenities: Vec<String>,
    pub highlights: Vec<String>,

    // Flags
    pub is_starred: bool,
    pub is_exclusive: bool,
    pub has_tenant: bool,
    pub is_corner_unit: bool,
    pub pet_friendly: bool,

    // Owner contact
    pub owner_name: String,
    pub owner_phone: String,
    pub owner_email: String,
    pub preferred_channel: Option<String>,

    // Metadata
    pub assignee: String,
    pub source: String,
    pub notes: String,
    pub photo_count: u16,
    pub available_from: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single-field edit applied to one record.
///
/// Only the fields the table itself can edit inline are representable; the
/// variant carries both the field identity and the new value, so an edit is
/// always well-typed.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    Starred(bool),
    MarketingStatus(MarketingStatus),
    ListingStatus(ListingStatus),
    ListingType(ListingType),
}

impl FieldEdit {
    /// The column this edit targets.
    pub fn column(&self) -> ColumnKey {
        match self {
            FieldEdit::Starred(_) => ColumnKey::Star,
            FieldEdit::MarketingStatus(_) => ColumnKey::MarketingStatus,
            FieldEdit::ListingStatus(_) => ColumnKey::ListingStatus,
            FieldEdit::ListingType(_) => ColumnKey::ListingType,
        }
    }

    /// Returns a copy of `listing` with this edit applied.
    pub fn apply_to(&self, listing: &Listing) -> Listing {
        let mut next = listing.clone();
        match self {
            FieldEdit::Starred(v) => next.is_starred = *v,
            FieldEdit::MarketingStatus(v) => next.marketing_status = *v,
            FieldEdit::ListingStatus(v) => next.listing_status = *v,
            FieldEdit::ListingType(v) => next.listing_type = *v,
        }
        next
    }
}

/// Schema-default visible columns, in default display order.
pub fn default_visible_columns() -> Vec<ColumnKey> {
    vec![
        ColumnKey::Star,
        ColumnKey::Code,
        ColumnKey::MarketingStatus,
        ColumnKey::ListingType,
        ColumnKey::PropertyType,
        ColumnKey::ProjectName,
        ColumnKey::Area,
        ColumnKey::Bedrooms,
        ColumnKey::Bathrooms,
        ColumnKey::UsableArea,
        ColumnKey::AskingPrice,
        ColumnKey::Assignee,
        ColumnKey::UpdatedAt,
    ]
}

/// Schema-default column order. Matches the default visible set.
pub fn default_column_order() -> Vec<ColumnKey> {
    default_visible_columns()
}
