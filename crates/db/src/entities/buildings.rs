//! `SeaORM` Entity for buildings table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "buildings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::units::Entity")]
    Units,
    #[sea_orm(has_many = "super::property_tax_assessments::Entity")]
    PropertyTaxAssessments,
    #[sea_orm(has_many = "super::insurance_policies::Entity")]
    InsurancePolicies,
    #[sea_orm(has_many = "super::financings::Entity")]
    Financings,
    #[sea_orm(has_many = "super::supplier_contracts::Entity")]
    SupplierContracts,
}

impl Related<super::units::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Units.def()
    }
}

impl Related<super::property_tax_assessments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PropertyTaxAssessments.def()
    }
}

impl Related<super::insurance_policies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InsurancePolicies.def()
    }
}

impl Related<super::financings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Financings.def()
    }
}

impl Related<super::supplier_contracts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SupplierContracts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
