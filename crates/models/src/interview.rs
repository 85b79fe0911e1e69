use chrono::Utc;
use sea_orm::{entity::prelude::*, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

/// One stored record per client-assigned id. `payload` holds the JSON text;
/// decoding happens in the service layer.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "interviews")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_type = "Text")]
    pub payload: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_id(id: &str) -> Result<(), errors::ModelError> {
    if id.trim().is_empty() {
        return Err(errors::ModelError::Validation("id required".into()));
    }
    Ok(())
}

/// ActiveModel for an upsert: both timestamps start at now. The conflict arm
/// of the insert leaves the stored `created_at` untouched.
pub fn upsert_model(id: &str, payload: String) -> ActiveModel {
    let now = Utc::now();
    ActiveModel {
        id: Set(id.to_string()),
        payload: Set(payload),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
}
