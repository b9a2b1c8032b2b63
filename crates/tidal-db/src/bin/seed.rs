//! # Seed Data Generator
//!
//! Populates the database with demo fishermen and listings for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./tidal.db (default)
//! cargo run -p tidal-db --bin seed
//!
//! # Specify database path
//! cargo run -p tidal-db --bin seed -- --db ./data/tidal.db
//! ```
//!
//! Every demo account logs in with the password `fishing1`.

use std::env;
use tidal_core::{Money, NewFishProduct, RegisterFisherman, Weight};
use tidal_db::{Database, DbConfig};

const DEMO_PASSWORD: &str = "fishing1";

/// (full name, email, phone, catch location, listings)
/// listing = (name, description, price per kg, stock kg)
type Listing = (&'static str, &'static str, &'static str, &'static str);

const FISHERMEN: &[(&str, &str, &str, &str, &[Listing])] = &[
    (
        "Ana Reyes",
        "ana@tidal.example",
        "555-0101",
        "North Bay",
        &[
            ("Yellowfin Tuna", "Line caught, loined on request", "25.50", "100.00"),
            ("Red Snapper", "Whole fish, gutted", "18.75", "42.50"),
            ("Octopus", "Tenderised", "21.00", "12.00"),
        ],
    ),
    (
        "Ben Okafor",
        "ben@tidal.example",
        "555-0102",
        "Harbor Reef",
        &[
            ("Atlantic Salmon", "Farm raised fillets", "9.90", "60.00"),
            ("Sardines", "Fresh this morning", "4.20", "80.00"),
            ("King Prawns", "Shell on", "32.00", "15.25"),
        ],
    ),
    (
        "Chen Wei",
        "chen@tidal.example",
        "555-0103",
        "South Estuary",
        &[
            ("Mud Crab", "Live", "28.40", "20.00"),
            ("Sea Bass", "Whole fish", "16.60", "35.75"),
        ],
    ),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./tidal.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Tidal Market Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./tidal.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Tidal Market Seed Data Generator");
    println!("===================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.users().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} users", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Registering fishermen...");

    for (full_name, email, phone, location, listings) in FISHERMEN {
        let user = db
            .users()
            .register(&RegisterFisherman {
                full_name: full_name.to_string(),
                email: email.to_string(),
                phone_number: phone.to_string(),
                password: DEMO_PASSWORD.to_string(),
                catch_location: location.to_string(),
            })
            .await?;
        println!("  {} <{}> (id {})", user.full_name, user.email, user.id);

        for (name, description, price, stock) in listings.iter() {
            let product = NewFishProduct {
                fisherman_id: user.id,
                name: name.to_string(),
                description: Some(description.to_string()),
                price_per_kg: Money::parse(price)?,
                stock_kg: Weight::parse(stock)?,
                image_url: None,
            };

            if let Err(e) = db.products().create(&product).await {
                eprintln!("    Failed to insert {}: {}", name, e);
                continue;
            }
            println!("    + {} at {}/kg, {} kg", name, price, stock);
        }
    }

    println!();
    println!(
        "✓ Seeded {} fishermen and {} products",
        db.users().count().await?,
        db.products().count().await?
    );
    println!("  Demo password: {}", DEMO_PASSWORD);

    db.close().await;
    Ok(())
}
