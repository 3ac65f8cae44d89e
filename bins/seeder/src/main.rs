//! Seeds demo students and fee heads for local development.
//!
//! Existing rows (matched by roll number or head name) are left alone, so the
//! seeder can be run repeatedly.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

use feeledger_db::entities::{fee_heads, students};

/// Demo fee heads: name, default amount, active.
const FEE_HEADS: [(&str, Decimal, bool); 4] = [
    ("Tuition", dec!(5000.00), true),
    ("Transport", dec!(1500.00), true),
    ("Lab", dec!(750.00), true),
    ("Library (discontinued)", dec!(200.00), false),
];

/// Demo students: name, roll number, class.
const STUDENTS: [(&str, &str, &str); 6] = [
    ("Aarav Mehta", "5A-001", "5A"),
    ("Diya Sharma", "5A-002", "5A"),
    ("Kabir Rao", "5A-003", "5A"),
    ("Meera Iyer", "6B-001", "6B"),
    ("Rohan Das", "6B-002", "6B"),
    ("Sara Khan", "6B-003", "6B"),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    println!("Connecting to database...");
    let db = feeledger_db::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    println!("Seeding fee heads...");
    seed_fee_heads(&db).await?;

    println!("Seeding students...");
    seed_students(&db).await?;

    println!("Seeding complete!");
    Ok(())
}

async fn seed_fee_heads(db: &DatabaseConnection) -> anyhow::Result<()> {
    for (name, amount, active) in FEE_HEADS {
        let existing = fee_heads::Entity::find()
            .filter(fee_heads::Column::Name.eq(name))
            .one(db)
            .await?;
        if existing.is_some() {
            println!("  {name} already exists, skipping...");
            continue;
        }

        fee_heads::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(name.to_string()),
            default_amount: Set(amount),
            active: Set(active),
            created_at: Set(Utc::now().into()),
        }
        .insert(db)
        .await
        .with_context(|| format!("Failed to insert fee head {name}"))?;
        println!("  Created fee head: {name} ({amount})");
    }
    Ok(())
}

async fn seed_students(db: &DatabaseConnection) -> anyhow::Result<()> {
    for (name, roll_number, class_label) in STUDENTS {
        let existing = students::Entity::find()
            .filter(students::Column::RollNumber.eq(roll_number))
            .one(db)
            .await?;
        if existing.is_some() {
            println!("  {roll_number} already exists, skipping...");
            continue;
        }

        students::ActiveModel {
            id: Set(Uuid::now_v7()),
            name: Set(name.to_string()),
            roll_number: Set(roll_number.to_string()),
            class_label: Set(class_label.to_string()),
            created_at: Set(Utc::now().into()),
        }
        .insert(db)
        .await
        .with_context(|| format!("Failed to insert student {roll_number}"))?;
        println!("  Created student: {name} ({class_label})");
    }
    Ok(())
}
