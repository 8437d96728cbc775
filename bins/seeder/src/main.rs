//! Database seeder for Immobook development and testing.
//!
//! Seeds one demo building with a unit and one record of every recurring
//! source kind, using fixed IDs so the booking endpoint can be tried out
//! right away. Running it twice is harmless.
//!
//! Usage: cargo run --bin seeder

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, Set};
use tracing::info;
use uuid::Uuid;

use immobook_db::entities::{
    buildings, financings, insurance_policies, lease_contracts, property_tax_assessments,
    supplier_contracts, units,
};
use immobook_shared::AppConfig;

const BUILDING_ID: Uuid = Uuid::from_u128(0x0000_0001);
const UNIT_ID: Uuid = Uuid::from_u128(0x0000_0002);
const PROPERTY_TAX_ID: Uuid = Uuid::from_u128(0x0000_0011);
const INSURANCE_ID: Uuid = Uuid::from_u128(0x0000_0012);
const FINANCING_ID: Uuid = Uuid::from_u128(0x0000_0013);
const SUPPLIER_ID: Uuid = Uuid::from_u128(0x0000_0014);
const LEASE_ID: Uuid = Uuid::from_u128(0x0000_0015);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seeder=info".into()),
        )
        .init();

    let config = AppConfig::load()?;
    let db = immobook_db::connect(&config.database.url).await?;
    info!("Connected to database");

    if buildings::Entity::find_by_id(BUILDING_ID).one(&db).await?.is_some() {
        info!(building_id = %BUILDING_ID, "Demo building already exists, skipping");
        return Ok(());
    }

    seed_building(&db).await?;
    seed_sources(&db).await?;

    info!("Seeding complete");
    for (source_type, id) in [
        ("PropertyTax", PROPERTY_TAX_ID),
        ("Insurance", INSURANCE_ID),
        ("Loan", FINANCING_ID),
        ("SupplierContract", SUPPLIER_ID),
        ("LeaseContract", LEASE_ID),
    ] {
        info!(source_type, source_id = %id, "Seeded source");
    }
    Ok(())
}

fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate, DbErr> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| DbErr::Custom(format!("invalid date {year}-{month}-{day}")))
}

/// Seeds the demo building and its unit.
async fn seed_building(db: &DatabaseConnection) -> Result<(), DbErr> {
    let now = Utc::now().fixed_offset();

    buildings::ActiveModel {
        id: Set(BUILDING_ID),
        name: Set("Lindenstraße 12".to_string()),
        address: Set(Some("Lindenstraße 12, 10969 Berlin".to_string())),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;
    info!(building_id = %BUILDING_ID, "Created demo building");

    units::ActiveModel {
        id: Set(UNIT_ID),
        building_id: Set(BUILDING_ID),
        name: Set("WE 1, ground floor left".to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;
    info!(unit_id = %UNIT_ID, "Created demo unit");

    Ok(())
}

/// Seeds one record of every source kind.
async fn seed_sources(db: &DatabaseConnection) -> Result<(), DbErr> {
    let now = Utc::now().fixed_offset();

    property_tax_assessments::ActiveModel {
        id: Set(PROPERTY_TAX_ID),
        building_id: Set(BUILDING_ID),
        assessment_year: Set(2025),
        annual_amount: Set(Some(Decimal::new(4000, 0))),
        quarterly_amount: Set(None),
        q1_due_date: Set(Some(ymd(2025, 2, 15)?)),
        q2_due_date: Set(Some(ymd(2025, 5, 15)?)),
        q3_due_date: Set(Some(ymd(2025, 8, 15)?)),
        q4_due_date: Set(Some(ymd(2025, 11, 15)?)),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;

    insurance_policies::ActiveModel {
        id: Set(INSURANCE_ID),
        building_id: Set(BUILDING_ID),
        insurer: Set("Allianz".to_string()),
        insurance_type: Set("Residential building".to_string()),
        annual_premium: Set(Some(Decimal::new(186_000, 2))),
        payment_rhythm: Set("quarterly".to_string()),
        start_date: Set(Some(ymd(2024, 1, 1)?)),
        end_date: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;

    financings::ActiveModel {
        id: Set(FINANCING_ID),
        building_id: Set(BUILDING_ID),
        lender: Set("Sparkasse".to_string()),
        principal: Set(Some(Decimal::new(100_000, 0))),
        annual_interest_rate: Set(Some(Decimal::new(3, 2))),
        monthly_payment: Set(Some(Decimal::new(843, 0))),
        term_months: Set(Some(360)),
        start_date: Set(ymd(2024, 1, 1)?),
        end_date: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;

    supplier_contracts::ActiveModel {
        id: Set(SUPPLIER_ID),
        building_id: Set(BUILDING_ID),
        supplier_name: Set("Stadtwerke Berlin".to_string()),
        supplier_type: Set("Electricity".to_string()),
        amount: Set(Some(Decimal::new(8550, 2))),
        payment_rhythm: Set("monthly".to_string()),
        start_date: Set(Some(ymd(2024, 3, 1)?)),
        end_date: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;

    lease_contracts::ActiveModel {
        id: Set(LEASE_ID),
        unit_id: Set(UNIT_ID),
        tenant_name: Set("Schmidt".to_string()),
        base_rent: Set(Some(Decimal::new(950, 0))),
        utilities_advance: Set(Some(Decimal::new(180, 0))),
        heating_advance: Set(Some(Decimal::new(90, 0))),
        due_day: Set(3),
        start_date: Set(ymd(2024, 6, 1)?),
        end_date: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;

    Ok(())
}
