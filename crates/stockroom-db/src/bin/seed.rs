//! # Seed Data Generator
//!
//! Populates the database with demo lab inventory for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database file
//! cargo run -p stockroom-db --bin seed
//!
//! # Specify database path
//! cargo run -p stockroom-db --bin seed -- --db ./data/stockroom.db
//! ```
//!
//! Creates a small electronics-lab catalog (Arduino boards, Raspberry Pis,
//! breadboards, ...) plus a couple of lending records and stock adjustments,
//! so the report and search have something to show straight away.

use std::env;
use stockroom_core::{NewLendingRecord, RecordType};
use stockroom_db::{Database, DbConfig};
use tracing_subscriber::EnvFilter;

/// Demo catalog: (name, master_count, availability)
const PRODUCTS: &[(&str, i64, i64)] = &[
    ("Arduino Uno", 50, 45),
    ("Raspberry Pi 4", 30, 25),
    ("Breadboard", 100, 85),
    ("LED Pack (100pcs)", 20, 18),
    ("Multimeter", 15, 12),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./stockroom_dev.db");

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
                println!("Stockroom Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./stockroom_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Stockroom Seed Data Generator");
    println!("================================");
    println!("Database: {}", db_path);
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing products
    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Seed the catalog through the ledger so clamping and validation apply
    println!();
    println!("Seeding catalog...");

    let ledger = db.ledger();
    let mut seeded = Vec::with_capacity(PRODUCTS.len());

    for (name, master_count, availability) in PRODUCTS {
        let product = ledger
            .add_product(name, *master_count, *availability)
            .await?;
        println!(
            "  + {} ({} owned, {} available)",
            product.name, product.master_count, product.availability
        );
        seeded.push(product);
    }

    // A couple of ledger entries so the report has data
    println!();
    println!("Seeding lending records...");

    let today = chrono::Utc::now().date_naive();

    ledger
        .create_record(NewLendingRecord {
            product_id: seeded[0].id.clone(),
            student_name: "John Doe".to_string(),
            usn: "1MS21CS001".to_string(),
            phone_number: "9876543210".to_string(),
            section: "A".to_string(),
            taken_date: today,
            return_date: today.succ_opt(),
            record_type: RecordType::Borrow,
            quantity: 2,
        })
        .await?;
    println!("  + borrow: 2x {}", seeded[0].name);

    ledger
        .create_record(NewLendingRecord {
            product_id: seeded[3].id.clone(),
            student_name: "Jane Smith".to_string(),
            usn: "1MS21EC042".to_string(),
            phone_number: "9876543211".to_string(),
            section: "B".to_string(),
            taken_date: today,
            return_date: None,
            record_type: RecordType::Purchase,
            quantity: 1,
        })
        .await?;
    println!("  + purchase: 1x {}", seeded[3].name);

    // One restock and one defect so every report column is exercised
    ledger.restock(&seeded[2].id, 20).await?;
    println!("  + restock: 20x {}", seeded[2].name);

    ledger.mark_defective(&seeded[4].id, 1).await?;
    println!("  + defect: 1x {}", seeded[4].name);

    // Quick sanity pass over search and the report
    println!();
    println!("Verifying...");

    let hits = db.products().search("arduino").await?;
    println!("  Search 'arduino': {} results", hits.len());

    let summary = ledger.summary().await?;
    println!(
        "  Catalog: {} products, {} owned, {} available ({}% utilized)",
        summary.total_products,
        summary.total_master_count,
        summary.total_availability,
        summary.utilization_pct
    );

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
