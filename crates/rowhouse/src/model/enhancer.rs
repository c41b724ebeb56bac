//! Column enhancement: interactive, context-aware cell rendering.
//!
//! [`enhance_columns`] is a pure map over a resolved column list. It
//! attaches badge renderers and inline editors to the enumerated columns,
//! money formatting to the price columns, and category badges to free-form
//! categorical columns — without touching the registry or the record
//! collection. The only way an enhanced column affects data is by invoking
//! the caller's field-change callback.

use std::sync::Arc;

use super::columns::{CellValue, ColumnDescriptor, ColumnEditor, ColumnKey};
use super::record::{
    FieldEdit, Furnishing, Listing, ListingStatus, ListingType, MarketingStatus, PropertyType,
};

/// Visual weight of a badge. Hosts map these to their own colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeStyle {
    Positive,
    Warning,
    Critical,
    Info,
    Accent,
    /// The safe fallback for any category without a dedicated style.
    Neutral,
}

/// Style for a free-form category label.
///
/// Total by construction: categories without a dedicated style fall back to
/// [`BadgeStyle::Neutral`] instead of failing, so an unmapped value still
/// renders as a plain badge with its own text.
pub fn badge_style_for(category: &str) -> BadgeStyle {
    match category {
        "Walk-in" => BadgeStyle::Positive,
        "Referral" => BadgeStyle::Accent,
        "Facebook" | "Instagram" | "Line" => BadgeStyle::Info,
        "Portal" => BadgeStyle::Warning,
        _ => BadgeStyle::Neutral,
    }
}

fn marketing_badge(status: MarketingStatus) -> BadgeStyle {
    match status {
        MarketingStatus::Available => BadgeStyle::Positive,
        MarketingStatus::Reserved => BadgeStyle::Warning,
        MarketingStatus::Sold => BadgeStyle::Critical,
        MarketingStatus::Rented => BadgeStyle::Info,
        MarketingStatus::Suspended => BadgeStyle::Neutral,
    }
}

fn listing_status_badge(status: ListingStatus) -> BadgeStyle {
    match status {
        ListingStatus::Active => BadgeStyle::Positive,
        ListingStatus::Pending => BadgeStyle::Warning,
        ListingStatus::Expired => BadgeStyle::Critical,
        ListingStatus::Withdrawn => BadgeStyle::Neutral,
    }
}

fn listing_type_badge(tier: ListingType) -> BadgeStyle {
    match tier {
        ListingType::AList => BadgeStyle::Accent,
        ListingType::BList => BadgeStyle::Info,
        ListingType::Exclusive => BadgeStyle::Positive,
        ListingType::Inactive => BadgeStyle::Neutral,
    }
}

fn property_type_badge(kind: PropertyType) -> BadgeStyle {
    match kind {
        PropertyType::Condo => BadgeStyle::Info,
        PropertyType::House => BadgeStyle::Positive,
        PropertyType::Townhouse => BadgeStyle::Accent,
        PropertyType::Apartment => BadgeStyle::Warning,
        PropertyType::Land | PropertyType::Commercial => BadgeStyle::Neutral,
    }
}

/// Formats a whole-baht amount with thousands grouping: `฿8,900,000`.
pub fn format_money(amount: i64) -> String {
    let negative = amount < 0;
    let digits = amount.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-฿{grouped}")
    } else {
        format!("฿{grouped}")
    }
}

/// Invoked when an enhanced cell commits an edit: the record the cell
/// belongs to and the typed edit to apply.
pub type FieldChangeFn = Arc<dyn Fn(&Listing, FieldEdit) + Send + Sync>;

/// Attaches interactive renderers to the columns that want them.
///
/// - Enumerated columns (marketing status, agreement status, listing type)
///   get a badge renderer plus an inline [`ColumnEditor`] whose commit
///   parses the chosen label and forwards the typed edit to
///   `on_field_change`; unknown labels are dropped without effect.
/// - Price columns get a [`CellValue::Money`] renderer.
/// - Categorical columns get badge renderers; free-form categories use the
///   total [`badge_style_for`] lookup, so unmapped values render as neutral
///   badges instead of failing.
///
/// Columns outside those groups pass through untouched. The input list and
/// the record collection are never mutated.
pub fn enhance_columns(
    columns: Vec<ColumnDescriptor>,
    on_field_change: FieldChangeFn,
) -> Vec<ColumnDescriptor> {
    columns
        .into_iter()
        .map(|mut column| {
            match column.key {
                ColumnKey::MarketingStatus => {
                    column.renderer = Some(Arc::new(|listing: &Listing, _| CellValue::Badge {
                        label: listing.marketing_status.label().to_string(),
                        style: marketing_badge(listing.marketing_status),
                    }));
                    let notify = Arc::clone(&on_field_change);
                    column.editor = Some(ColumnEditor::new(
                        MarketingStatus::ALL.iter().map(|s| s.label()).collect(),
                        move |listing, label| match MarketingStatus::from_label(label) {
                            Some(status) => {
                                notify(listing, FieldEdit::MarketingStatus(status));
                            }
                            None => {
                                tracing::debug!(
                                    target: "rowhouse::controller",
                                    label,
                                    "ignoring unknown marketing status label"
                                );
                            }
                        },
                    ));
                }
                ColumnKey::ListingStatus => {
                    column.renderer = Some(Arc::new(|listing: &Listing, _| CellValue::Badge {
                        label: listing.listing_status.label().to_string(),
                        style: listing_status_badge(listing.listing_status),
                    }));
                    let notify = Arc::clone(&on_field_change);
                    column.editor = Some(ColumnEditor::new(
                        ListingStatus::ALL.iter().map(|s| s.label()).collect(),
                        move |listing, label| match ListingStatus::from_label(label) {
                            Some(status) => notify(listing, FieldEdit::ListingStatus(status)),
                            None => {
                                tracing::debug!(
                                    target: "rowhouse::controller",
                                    label,
                                    "ignoring unknown agreement status label"
                                );
                            }
                        },
                    ));
                }
                ColumnKey::ListingType => {
                    column.renderer = Some(Arc::new(|listing: &Listing, _| CellValue::Badge {
                        label: listing.listing_type.label().to_string(),
                        style: listing_type_badge(listing.listing_type),
                    }));
                    let notify = Arc::clone(&on_field_change);
                    column.editor = Some(ColumnEditor::new(
                        ListingType::ALL.iter().map(|t| t.label()).collect(),
                        move |listing, label| match ListingType::from_label(label) {
                            Some(tier) => notify(listing, FieldEdit::ListingType(tier)),
                            None => {
                                tracing::debug!(
                                    target: "rowhouse::controller",
                                    label,
                                    "ignoring unknown listing type label"
                                );
                            }
                        },
                    ));
                }
                ColumnKey::PropertyType => {
                    column.renderer = Some(Arc::new(|listing: &Listing, _| CellValue::Badge {
                        label: listing.property_type.label().to_string(),
                        style: property_type_badge(listing.property_type),
                    }));
                }
                ColumnKey::OwnerType => {
                    column.renderer = Some(Arc::new(|listing: &Listing, _| CellValue::Badge {
                        label: listing.owner_type.label().to_string(),
                        style: BadgeStyle::Neutral,
                    }));
                }
                ColumnKey::Furnishing => {
                    column.renderer = Some(Arc::new(|listing: &Listing, _| CellValue::Badge {
                        label: listing.furnishing.label().to_string(),
                        style: match listing.furnishing {
                            Furnishing::FullyFurnished => BadgeStyle::Positive,
                            Furnishing::PartlyFurnished => BadgeStyle::Info,
                            Furnishing::Unfurnished => BadgeStyle::Neutral,
                        },
                    }));
                }
                ColumnKey::Source => {
                    column.renderer = Some(Arc::new(|listing: &Listing, _| {
                        if listing.source.is_empty() {
                            CellValue::Empty
                        } else {
                            CellValue::Badge {
                                label: listing.source.clone(),
                                style: badge_style_for(&listing.source),
                            }
                        }
                    }));
                }
                ColumnKey::AskingPrice => {
                    column.renderer = Some(Arc::new(|listing: &Listing, _| {
                        CellValue::Money(listing.asking_price)
                    }));
                }
                ColumnKey::RentalPrice => {
                    column.renderer = Some(Arc::new(|listing: &Listing, _| {
                        listing
                            .rental_price
                            .map(CellValue::Money)
                            .unwrap_or(CellValue::Empty)
                    }));
                }
                ColumnKey::LastOfferPrice => {
                    column.renderer = Some(Arc::new(|listing: &Listing, _| {
                        listing
                            .last_offer_price
                            .map(CellValue::Money)
                            .unwrap_or(CellValue::Empty)
                    }));
                }
                _ => {}
            }
            column
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::columns::column_registry;
    use parking_lot::Mutex;

    fn capture() -> (FieldChangeFn, Arc<Mutex<Vec<(String, FieldEdit)>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let callback: FieldChangeFn = Arc::new(move |listing: &Listing, edit: FieldEdit| {
            sink.lock().push((listing.code.clone(), edit));
        });
        (callback, seen)
    }

    fn find(columns: &[ColumnDescriptor], key: ColumnKey) -> &ColumnDescriptor {
        columns.iter().find(|c| c.key == key).unwrap()
    }

    #[test]
    fn test_status_column_renders_badge() {
        let (callback, _) = capture();
        let columns = enhance_columns(column_registry(), callback);

        let listing = Listing {
            marketing_status: MarketingStatus::Reserved,
            ..Default::default()
        };
        let cell = find(&columns, ColumnKey::MarketingStatus).value_for(&listing, 0);
        assert_eq!(cell.as_badge(), Some(("Reserved", BadgeStyle::Warning)));
    }

    #[test]
    fn test_editor_commit_forwards_typed_edit() {
        let (callback, seen) = capture();
        let columns = enhance_columns(column_registry(), callback);

        let listing = Listing {
            code: "RH-0005".into(),
            ..Default::default()
        };
        let editor = find(&columns, ColumnKey::MarketingStatus)
            .editor
            .as_ref()
            .unwrap();
        assert_eq!(editor.options().len(), MarketingStatus::ALL.len());

        editor.commit(&listing, "Sold");
        assert_eq!(
            *seen.lock(),
            vec![(
                "RH-0005".to_string(),
                FieldEdit::MarketingStatus(MarketingStatus::Sold)
            )]
        );
    }

    #[test]
    fn test_editor_ignores_unknown_label() {
        let (callback, seen) = capture();
        let columns = enhance_columns(column_registry(), callback);

        let listing = Listing::default();
        let editor = find(&columns, ColumnKey::ListingType).editor.as_ref().unwrap();
        editor.commit(&listing, "Z List");
        assert!(seen.lock().is_empty());
    }

    #[test]
    fn test_unmapped_source_category_renders_neutral_badge() {
        // A category without a dedicated style must fall back to a safe
        // neutral badge, never panic or render blank.
        let (callback, _) = capture();
        let columns = enhance_columns(column_registry(), callback);

        let listing = Listing {
            source: "Carrier pigeon".into(),
            ..Default::default()
        };
        let cell = find(&columns, ColumnKey::Source).value_for(&listing, 0);
        assert_eq!(cell.as_badge(), Some(("Carrier pigeon", BadgeStyle::Neutral)));
    }

    #[test]
    fn test_price_columns_render_money() {
        let (callback, _) = capture();
        let columns = enhance_columns(column_registry(), callback);

        let listing = Listing {
            asking_price: 8_900_000,
            rental_price: None,
            ..Default::default()
        };
        assert_eq!(
            find(&columns, ColumnKey::AskingPrice).value_for(&listing, 0),
            CellValue::Money(8_900_000)
        );
        assert_eq!(
            find(&columns, ColumnKey::RentalPrice).value_for(&listing, 0),
            CellValue::Empty
        );
    }

    #[test]
    fn test_untargeted_columns_pass_through() {
        let (callback, _) = capture();
        let columns = enhance_columns(column_registry(), callback);

        let code = find(&columns, ColumnKey::Code);
        assert!(code.renderer.is_none());
        assert!(code.editor.is_none());
    }

    #[test]
    fn test_format_money_groups_thousands() {
        assert_eq!(format_money(0), "฿0");
        assert_eq!(format_money(950), "฿950");
        assert_eq!(format_money(8_900_000), "฿8,900,000");
        assert_eq!(format_money(1_234_567_890), "฿1,234,567,890");
        assert_eq!(format_money(-45_000), "-฿45,000");
    }

    #[test]
    fn test_badge_style_lookup_is_total() {
        assert_eq!(badge_style_for("Referral"), BadgeStyle::Accent);
        assert_eq!(badge_style_for("Line"), BadgeStyle::Info);
        assert_eq!(badge_style_for(""), BadgeStyle::Neutral);
        assert_eq!(badge_style_for("anything else"), BadgeStyle::Neutral);
    }
}
