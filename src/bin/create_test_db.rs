use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;

use uniformity::{
    CompanySettings, NewCategory, NewItem, NewSubcategory, create_category, create_item,
    create_subcategory, initialize_db, save_company_settings,
};

/// A utility for creating a sample catalog database for the uniformity API server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        Some(extension) if !extension.is_empty() => {}
        _ => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating company settings...");
    save_company_settings(
        &CompanySettings {
            company_name: "Uniformity".to_owned(),
            tagline: Some("Uniforms for every school and workplace".to_owned()),
            phone: Some("+91 98765 43210".to_owned()),
            email: Some("hello@uniformity.example".to_owned()),
            city: Some("Pune".to_owned()),
            state: Some("Maharashtra".to_owned()),
            whatsapp_number: Some("919876543210".to_owned()),
            ..Default::default()
        },
        true,
        &conn,
    )?;

    println!("Creating categories...");
    let categories = [
        ("CAT-001", "School Uniforms", "school-uniforms", 1),
        ("CAT-002", "Corporate Wear", "corporate-wear", 2),
        ("CAT-003", "Sports Kits", "sports-kits", 3),
    ];
    for (id, title, slug, order) in categories {
        let mut category = NewCategory::new(id, title, slug);
        category.description = format!("Browse our range of {}.", title.to_lowercase());
        category.order = order;
        create_category(category, &conn)?;
    }

    println!("Creating subcategories...");
    let subcategories = [
        ("SUB-001", "CAT-001", "Shirts", "shirts"),
        ("SUB-002", "CAT-001", "Trousers", "trousers"),
        ("SUB-003", "CAT-002", "Blazers", "blazers"),
        ("SUB-004", "CAT-003", "Track Suits", "track-suits"),
    ];
    for (order, (id, category, title, slug)) in (1..).zip(subcategories) {
        let mut subcategory = NewSubcategory::new(id, category, title, slug);
        subcategory.order = order;
        create_subcategory(subcategory, &conn)?;
    }

    println!("Creating items...");
    let items = [
        ("ITEM-001", "White Half Sleeve Shirt", "CAT-001", Some("SUB-001"), Some(450.0)),
        ("ITEM-002", "Grey School Trousers", "CAT-001", Some("SUB-002"), Some(650.0)),
        ("ITEM-003", "Navy Blazer", "CAT-002", Some("SUB-003"), None),
        ("ITEM-004", "House Colour Track Suit", "CAT-003", Some("SUB-004"), Some(1200.0)),
    ];
    for (order, (id, title, category, subcategory, price)) in (1..).zip(items) {
        let mut item = NewItem::new(id, title, category);
        item.subcategory = subcategory.map(str::to_owned);
        item.price = price;
        item.order = order;
        create_item(item, &conn)?;
    }

    println!("Success!");

    Ok(())
}
