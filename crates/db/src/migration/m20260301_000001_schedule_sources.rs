//! Schedule sources migration.
//!
//! Creates buildings, units and the five recurring source tables the
//! booking schedule is generated from. Amount and date columns stay
//! nullable; completeness is checked when a schedule is generated.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: PROPERTIES
        // ============================================================
        db.execute_unprepared(BUILDINGS_SQL).await?;
        db.execute_unprepared(UNITS_SQL).await?;

        // ============================================================
        // PART 2: RECURRING SOURCES
        // ============================================================
        db.execute_unprepared(PROPERTY_TAX_SQL).await?;
        db.execute_unprepared(INSURANCE_SQL).await?;
        db.execute_unprepared(FINANCINGS_SQL).await?;
        db.execute_unprepared(SUPPLIER_CONTRACTS_SQL).await?;
        db.execute_unprepared(LEASE_CONTRACTS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

const BUILDINGS_SQL: &str = r"
CREATE TABLE buildings (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    name VARCHAR(255) NOT NULL,
    address TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const UNITS_SQL: &str = r"
CREATE TABLE units (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    building_id UUID NOT NULL REFERENCES buildings(id) ON DELETE CASCADE,
    name VARCHAR(255) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_units_building ON units(building_id);
";

const PROPERTY_TAX_SQL: &str = r"
CREATE TABLE property_tax_assessments (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    building_id UUID NOT NULL REFERENCES buildings(id) ON DELETE CASCADE,
    assessment_year INTEGER NOT NULL,
    annual_amount NUMERIC(15, 2),
    quarterly_amount NUMERIC(15, 2),
    q1_due_date DATE,
    q2_due_date DATE,
    q3_due_date DATE,
    q4_due_date DATE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_property_tax_building ON property_tax_assessments(building_id, assessment_year DESC);
";

const INSURANCE_SQL: &str = r"
CREATE TABLE insurance_policies (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    building_id UUID NOT NULL REFERENCES buildings(id) ON DELETE CASCADE,
    insurer VARCHAR(255) NOT NULL,
    insurance_type VARCHAR(100) NOT NULL DEFAULT '',
    annual_premium NUMERIC(15, 2),
    payment_rhythm VARCHAR(32) NOT NULL DEFAULT 'annual',
    start_date DATE,
    end_date DATE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_insurance_building ON insurance_policies(building_id);
";

const FINANCINGS_SQL: &str = r"
CREATE TABLE financings (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    building_id UUID NOT NULL REFERENCES buildings(id) ON DELETE CASCADE,
    lender VARCHAR(255) NOT NULL,
    principal NUMERIC(15, 2),
    annual_interest_rate NUMERIC(9, 6),
    monthly_payment NUMERIC(15, 2),
    term_months INTEGER,
    start_date DATE NOT NULL,
    end_date DATE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_financings_building ON financings(building_id);
";

const SUPPLIER_CONTRACTS_SQL: &str = r"
CREATE TABLE supplier_contracts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    building_id UUID NOT NULL REFERENCES buildings(id) ON DELETE CASCADE,
    supplier_name VARCHAR(255) NOT NULL,
    supplier_type VARCHAR(100) NOT NULL DEFAULT '',
    amount NUMERIC(15, 2),
    payment_rhythm VARCHAR(32) NOT NULL DEFAULT 'monthly',
    start_date DATE,
    end_date DATE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_supplier_contracts_building ON supplier_contracts(building_id);
";

const LEASE_CONTRACTS_SQL: &str = r"
CREATE TABLE lease_contracts (
    id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
    unit_id UUID NOT NULL REFERENCES units(id) ON DELETE CASCADE,
    tenant_name VARCHAR(255) NOT NULL,
    base_rent NUMERIC(15, 2),
    utilities_advance NUMERIC(15, 2),
    heating_advance NUMERIC(15, 2),
    due_day SMALLINT NOT NULL DEFAULT 1,
    start_date DATE NOT NULL,
    end_date DATE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_lease_contracts_unit ON lease_contracts(unit_id);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS lease_contracts CASCADE;
DROP TABLE IF EXISTS supplier_contracts CASCADE;
DROP TABLE IF EXISTS financings CASCADE;
DROP TABLE IF EXISTS insurance_policies CASCADE;
DROP TABLE IF EXISTS property_tax_assessments CASCADE;
DROP TABLE IF EXISTS units CASCADE;
DROP TABLE IF EXISTS buildings CASCADE;
";
