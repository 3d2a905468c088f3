//! Users Entity
//!
//! Account rows for admins and portal clients. Every content and CRM row
//! hangs off a user; deleting a user cascades through the dependents
//! application-side (see the server crate's user handlers).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::sea_orm_active_enums::UserRole;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:            Uuid,
    pub name:          String,
    #[sea_orm(unique)]
    pub email:         String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role:          UserRole,
    pub created_at:    DateTimeUtc,
    pub updated_at:    DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::articles::Entity")]
    Articles,
    #[sea_orm(has_many = "super::stories::Entity")]
    Stories,
    #[sea_orm(has_many = "super::team_members::Entity")]
    TeamMembers,
    #[sea_orm(has_many = "super::comments::Entity")]
    Comments,
    #[sea_orm(has_many = "super::inquiries::Entity")]
    Inquiries,
    #[sea_orm(has_many = "super::consultations::Entity")]
    Consultations,
    #[sea_orm(has_many = "super::messages::Entity")]
    Messages,
    #[sea_orm(has_many = "super::appointments::Entity")]
    Appointments,
}

impl Related<super::articles::Entity> for Entity {
    fn to() -> RelationDef { Relation::Articles.def() }
}

impl Related<super::stories::Entity> for Entity {
    fn to() -> RelationDef { Relation::Stories.def() }
}

impl Related<super::team_members::Entity> for Entity {
    fn to() -> RelationDef { Relation::TeamMembers.def() }
}

impl Related<super::comments::Entity> for Entity {
    fn to() -> RelationDef { Relation::Comments.def() }
}

impl Related<super::inquiries::Entity> for Entity {
    fn to() -> RelationDef { Relation::Inquiries.def() }
}

impl Related<super::consultations::Entity> for Entity {
    fn to() -> RelationDef { Relation::Consultations.def() }
}

impl Related<super::messages::Entity> for Entity {
    fn to() -> RelationDef { Relation::Messages.def() }
}

impl Related<super::appointments::Entity> for Entity {
    fn to() -> RelationDef { Relation::Appointments.def() }
}

impl ActiveModelBehavior for ActiveModel {}
