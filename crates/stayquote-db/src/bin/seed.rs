//! # Inventory Seeder
//!
//! Fills a development store with plausible partner hotels.
//!
//! ## Usage
//! ```bash
//! # 25 hotels (default)
//! cargo run -p stayquote-db --bin seed
//!
//! # More inventory
//! cargo run -p stayquote-db --bin seed -- --count 100
//!
//! # Seed a store at a chosen path
//! cargo run -p stayquote-db --bin seed -- --db ./data/inventory.db
//! ```
//!
//! ## Generated Inventory
//! Creates hotels across Mediterranean cities, each with:
//! - Unique hotel code: `H-{INDEX}`
//! - 2-4 rooms (double, twin, single, family, suite)
//! - Base nightly rates between 60.00 and 240.00
//! - A high-season window (Jul-Aug) at +30% on some rooms

use chrono::{NaiveDate, Utc};
use std::env;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

use stayquote_core::{PartnerHotel, PartnerRoom, PaymentType, RateWindow};
use stayquote_db::repository::hotel::generate_hotel_id;
use stayquote_db::repository::rate::{generate_rate_key, generate_room_id};
use stayquote_db::{Database, DbConfig};

/// Cities partner contracts actually exist in
const CITIES: &[(&str, &str, &str)] = &[
    ("Palma", "ES", "EUR"),
    ("Barcelona", "ES", "EUR"),
    ("Lisbon", "PT", "EUR"),
    ("Porto", "PT", "EUR"),
    ("Athens", "GR", "EUR"),
    ("Santorini", "GR", "EUR"),
    ("Dubrovnik", "HR", "EUR"),
    ("Valletta", "MT", "EUR"),
    ("Nice", "FR", "EUR"),
    ("Naples", "IT", "EUR"),
];

/// Name stems combined with suffixes to form hotel names
const HOTEL_STEMS: &[&str] = &[
    "Seaview", "Harbor", "Grand", "Marina", "Palm", "Azure", "Sunset", "Bayside", "Olive",
    "Coral",
];

const HOTEL_SUFFIXES: &[&str] = &["Hotel", "Resort", "Suites", "Palace", "Inn"];

/// Room types: (code, name, occupancy, price multiplier in percent)
const ROOM_TYPES: &[(&str, &str, i64, i64)] = &[
    ("SGL", "Single room", 1, 70),
    ("DBL", "Double room", 2, 100),
    ("TWN", "Twin room", 2, 100),
    ("FAM", "Family room", 4, 150),
    ("STE", "Junior suite", 3, 210),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Argument handling
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 25;
    let mut db_path = String::from("./stayquote_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(25);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("StayQuote Partner Inventory Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of hotels to generate (default: 25)");
                println!("  -d, --db <PATH>    Database file path (default: ./stayquote_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 StayQuote Partner Inventory Seeder");
    println!("=====================================");
    println!("Database: {}", db_path);
    println!("Hotels:   {}", count);
    println!();

    // Open the store, creating and migrating it if missing
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing inventory
    let existing = db.hotels().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} hotels", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Generate hotels
    println!();
    println!("Generating inventory...");

    let mut hotels_created = 0;
    let mut rooms_created = 0;
    let mut windows_created = 0;
    let start = std::time::Instant::now();

    for idx in 0..count {
        let hotel = generate_hotel(idx);

        if let Err(e) = db.hotels().insert(&hotel).await {
            eprintln!("Failed to insert {}: {}", hotel.hotel_code, e);
            continue;
        }
        hotels_created += 1;

        // 2-4 rooms per hotel, deterministic from the index
        let room_count = 2 + (idx % 3);
        for room_idx in 0..room_count {
            let room = generate_room(&hotel, idx, room_idx);

            if let Err(e) = db.rates().insert_room(&room).await {
                eprintln!("Failed to insert room for {}: {}", hotel.hotel_code, e);
                continue;
            }
            rooms_created += 1;

            // every other room gets a high-season window at +30%
            if (idx + room_idx) % 2 == 0 {
                let window = high_season_window(&room.id, room.nightly_cents);
                if db.rates().insert_window(&window).await.is_ok() {
                    windows_created += 1;
                }
            }
        }

        if hotels_created % 10 == 0 {
            println!("  Generated {} hotels...", hotels_created);
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!(
        "✓ Generated {} hotels, {} rooms, {} rate windows in {:?}",
        hotels_created, rooms_created, windows_created, elapsed
    );

    // Verify search
    println!();
    println!("Verifying search...");
    let results = db.hotels().search("Palma", 10).await?;
    println!("  Search 'Palma': {} results", results.len());

    let results = db.hotels().search("Resort", 10).await?;
    println!("  Search 'Resort': {} results", results.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Standard log filter; RUST_LOG overrides.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,stayquote=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .init();
}

/// Generates a single hotel with deterministic data.
fn generate_hotel(idx: usize) -> PartnerHotel {
    let now = Utc::now();
    let (city, country, currency) = CITIES[idx % CITIES.len()];
    let stem = HOTEL_STEMS[(idx * 7) % HOTEL_STEMS.len()];
    let suffix = HOTEL_SUFFIXES[(idx * 3) % HOTEL_SUFFIXES.len()];

    PartnerHotel {
        id: generate_hotel_id(),
        hotel_code: format!("H-{:03}", idx + 1),
        name: format!("{} {} {}", city, stem, suffix),
        city: Some(city.to_string()),
        country_code: Some(country.to_string()),
        currency: currency.to_string(),
        stars: Some(3 + (idx % 3) as i64),
        description: None,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

/// Generates a room for a hotel.
fn generate_room(hotel: &PartnerHotel, hotel_idx: usize, room_idx: usize) -> PartnerRoom {
    let now = Utc::now();
    let (code, name, occupancy, multiplier) = ROOM_TYPES[room_idx % ROOM_TYPES.len()];

    // Base double-room rate 60.00 - 240.00, varied by hotel
    let hotel_base = 6000 + ((hotel_idx * 1731) % 18000) as i64;
    let nightly_cents = hotel_base * multiplier / 100;

    PartnerRoom {
        id: generate_room_id(),
        hotel_id: hotel.id.clone(),
        room_code: code.to_string(),
        name: name.to_string(),
        rate_key: generate_rate_key(),
        nightly_cents,
        refundable: (hotel_idx + room_idx) % 3 != 0,
        payment_type: if room_idx % 4 == 3 {
            PaymentType::AtHotel
        } else {
            PaymentType::AtWeb
        },
        max_occupancy: Some(occupancy),
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

/// July-August window at +30% over the base rate.
fn high_season_window(room_id: &str, base_cents: i64) -> RateWindow {
    RateWindow {
        id: Uuid::new_v4().to_string(),
        room_id: room_id.to_string(),
        start_date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2026, 8, 31).unwrap(),
        nightly_cents: base_cents * 130 / 100,
        created_at: Utc::now(),
    }
}
