//! A small brokerage board driven entirely from the terminal.
//!
//! Seeds a handful of listings, narrows them with the tab and a structured
//! filter, resolves and enhances the column list, and prints the result.
//! Run with `RUST_LOG=rowhouse=debug` to watch the engine's tracing.

use std::sync::Arc;
use std::time::Duration;

use rowhouse::model::{
    BedroomRange, CellValue, ColumnViewState, FieldEdit, FilterSpec, Listing, ListingType,
    LoadPolicy, MarketingStatus, PropertyType, TableController, column_registry,
    default_column_order, default_visible_columns, enhance_columns, format_money, resolve_columns,
};
use rowhouse::prefs::{MemoryStore, PreferenceStore};

fn seed() -> Vec<Listing> {
    vec![
        Listing {
            code: "RH-0001".into(),
            listing_type: ListingType::AList,
            property_type: PropertyType::Condo,
            project_name: "Noble Remix".into(),
            area: "Thong Lo".into(),
            nearest_transit: "BTS Thong Lo".into(),
            bedrooms: 2,
            bathrooms: 2,
            usable_area_sqm: 68.5,
            asking_price: 8_900_000,
            assignee: "Mint".into(),
            ..Default::default()
        },
        Listing {
            code: "RH-0002".into(),
            listing_type: ListingType::AList,
            property_type: PropertyType::House,
            project_name: "Baan Sansiri".into(),
            area: "Phra Khanong".into(),
            nearest_transit: "BTS On Nut".into(),
            bedrooms: 4,
            bathrooms: 3,
            usable_area_sqm: 210.0,
            asking_price: 18_500_000,
            assignee: "Oak".into(),
            ..Default::default()
        },
        Listing {
            code: "RH-0003".into(),
            listing_type: ListingType::BList,
            property_type: PropertyType::Condo,
            project_name: "Rhythm Ekkamai".into(),
            area: "Ekkamai".into(),
            nearest_transit: "BTS Ekkamai".into(),
            bedrooms: 1,
            bathrooms: 1,
            usable_area_sqm: 34.0,
            asking_price: 4_650_000,
            assignee: "Mint".into(),
            ..Default::default()
        },
    ]
}

fn render(cell: &CellValue) -> String {
    match cell {
        CellValue::Empty => String::new(),
        CellValue::Text(s) => s.clone(),
        CellValue::Int(n) => n.to_string(),
        CellValue::Float(n) => format!("{n:.1}"),
        CellValue::Bool(b) => if *b { "★" } else { "·" }.to_string(),
        CellValue::Money(n) => format_money(*n),
        CellValue::Badge { label, .. } => format!("[{label}]"),
        CellValue::Tags(tags) => tags.join(", "),
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let store: Arc<dyn PreferenceStore> = Arc::new(MemoryStore::new());
    let mut view = ColumnViewState::load(
        Arc::clone(&store),
        &default_visible_columns(),
        &default_column_order(),
        LoadPolicy::ApplyDefaults,
    );

    let mut table = TableController::new(seed()).with_close_grace(Duration::from_millis(50));
    table.set_tab(Some(ListingType::AList));
    table.set_filter(FilterSpec {
        bedrooms: Some(BedroomRange::at_least(2)),
        ..Default::default()
    });

    let registry = column_registry();
    let columns = resolve_columns(&mut view, &registry, None);
    let columns = enhance_columns(columns, Arc::new(|listing: &Listing, edit: FieldEdit| {
        println!("(edit requested on {}: {:?})", listing.code, edit);
    }));

    let header: Vec<&str> = columns.iter().map(|c| c.label).collect();
    println!("{}", header.join(" | "));

    for (row, listing) in table.visible_listings().into_iter().enumerate() {
        let cells: Vec<String> = columns
            .iter()
            .map(|c| render(&c.value_for(listing, row)))
            .collect();
        println!("{}", cells.join(" | "));
    }

    // Inline edits flow back through the controller and stay consistent
    // with the open detail panel.
    table.select_row("RH-0001");
    table.mutate_field("RH-0001", FieldEdit::Starred(true));
    table.mutate_field("RH-0001", FieldEdit::MarketingStatus(MarketingStatus::Reserved));
    println!(
        "detail after edits: {} starred={} status={}",
        table.detail().unwrap().code,
        table.detail().unwrap().is_starred,
        table.detail().unwrap().marketing_status.label(),
    );

    table.close_detail();
    std::thread::sleep(Duration::from_millis(80));
    table.process_timers();
    println!("detail cleared after grace: {}", table.detail().is_none());
}
