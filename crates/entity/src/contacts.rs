//! Contacts Entity
//!
//! Submissions from the public contact/consultation form. No relations;
//! the status column tracks the admin workflow.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::sea_orm_active_enums::ContactStatus;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contacts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:         Uuid,
    pub first_name: String,
    pub last_name:  String,
    pub email:      String,
    pub phone:      Option<String>,
    pub company:    Option<String>,
    pub website:    Option<String>,
    pub city:       Option<String>,
    pub state:      Option<String>,
    #[sea_orm(column_type = "Text")]
    pub message:    String,
    pub status:     ContactStatus,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
