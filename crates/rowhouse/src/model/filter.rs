//! Structured multi-field filtering.
//!
//! A [`FilterSpec`] is plain data: independent predicate groups that are
//! AND-combined by [`FilterSpec::matches`]. The default spec is the
//! identity filter — every group is unconstrained and every record passes.
//!
//! The listing-type tab and the owner-type selector are *not* part of the
//! filter spec; the controller applies them as a separate narrowing stage
//! ahead of it, and both may constrain listing type simultaneously.

use super::record::{Listing, ListingType, MarketingStatus, PropertyType};

/// Inclusive bedroom-count range with an open-ended upper bound sentinel.
///
/// The table's bedroom picker tops out at "6+": selecting it means "six or
/// more", not "exactly six". [`BedroomRange::OPEN_END`] is that sentinel —
/// when `max` equals it, only `min` constrains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BedroomRange {
    pub min: u8,
    pub max: u8,
}

impl BedroomRange {
    /// The "or more" sentinel for `max` (the picker's "6+" case).
    pub const OPEN_END: u8 = 6;

    /// A closed inclusive range.
    pub fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }

    /// An open-ended range: `min` or more bedrooms.
    pub fn at_least(min: u8) -> Self {
        Self {
            min,
            max: Self::OPEN_END,
        }
    }

    fn contains(&self, bedrooms: u8) -> bool {
        if self.max == Self::OPEN_END {
            bedrooms >= self.min
        } else {
            bedrooms >= self.min && bedrooms <= self.max
        }
    }
}

/// Inclusive asking-price range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub min: i64,
    pub max: i64,
}

impl PriceRange {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    fn contains(&self, price: i64) -> bool {
        price >= self.min && price <= self.max
    }
}

/// The structured filter for one listings table.
///
/// Every field is an independent predicate group; a record must satisfy all
/// of them. Empty sets and `None` ranges mean "no constraint", so
/// `FilterSpec::default()` matches everything.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterSpec {
    /// Match records whose marketing status is in the set. Empty: any.
    pub marketing_statuses: Vec<MarketingStatus>,
    /// Match records whose listing type is in the set. Empty: any.
    /// Independent of the controller's tab filter; both must hold.
    pub listing_types: Vec<ListingType>,
    /// Match records whose property type is in the set. Empty: any.
    pub property_types: Vec<PropertyType>,
    /// Location tokens. A record matches when its area, nearest transit, or
    /// project name contains any token as a substring (case-sensitive, OR
    /// across tokens and across the three fields). Empty: any.
    pub locations: Vec<String>,
    pub bedrooms: Option<BedroomRange>,
    pub price: Option<PriceRange>,
    /// Tri-state starred constraint. `None`: any.
    pub starred: Option<bool>,
}

impl FilterSpec {
    /// True when no group constrains anything (the identity filter).
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }

    /// Whether `listing` satisfies every active predicate group.
    pub fn matches(&self, listing: &Listing) -> bool {
        if !self.marketing_statuses.is_empty()
            && !self.marketing_statuses.contains(&listing.marketing_status)
        {
            return false;
        }

        if !self.listing_types.is_empty() && !self.listing_types.contains(&listing.listing_type) {
            return false;
        }

        if !self.property_types.is_empty()
            && !self.property_types.contains(&listing.property_type)
        {
            return false;
        }

        if !self.locations.is_empty() && !self.location_matches(listing) {
            return false;
        }

        if let Some(range) = self.bedrooms {
            if !range.contains(listing.bedrooms) {
                return false;
            }
        }

        if let Some(range) = self.price {
            if !range.contains(listing.asking_price) {
                return false;
            }
        }

        if let Some(starred) = self.starred {
            if listing.is_starred != starred {
                return false;
            }
        }

        true
    }

    /// Narrows `listings` to the records matching this spec, preserving
    /// input order.
    pub fn apply<'a>(&self, listings: &'a [Listing]) -> Vec<&'a Listing> {
        listings.iter().filter(|l| self.matches(l)).collect()
    }

    fn location_matches(&self, listing: &Listing) -> bool {
        self.locations.iter().any(|token| {
            listing.area.contains(token)
                || listing.nearest_transit.contains(token)
                || listing.project_name.contains(token)
        })
    }
}
