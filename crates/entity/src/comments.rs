//! Comments Entity
//!
//! A comment belongs to exactly one of an article or a story, and to
//! either a registered user (author_id) or a guest identity carried in
//! the guest_* columns. The exactly-one-parent rule is enforced by the
//! create handler, not by the schema.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id:               Uuid,
    #[sea_orm(column_type = "Text")]
    pub content:          String,
    pub author_id:        Option<Uuid>,
    pub guest_first_name: Option<String>,
    pub guest_last_name:  Option<String>,
    pub guest_email:      Option<String>,
    pub article_id:       Option<Uuid>,
    pub story_id:         Option<Uuid>,
    pub created_at:       DateTimeUtc,
    pub updated_at:       DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::AuthorId",
        to = "super::users::Column::Id"
    )]
    Author,
    #[sea_orm(
        belongs_to = "super::articles::Entity",
        from = "Column::ArticleId",
        to = "super::articles::Column::Id"
    )]
    Article,
    #[sea_orm(
        belongs_to = "super::stories::Entity",
        from = "Column::StoryId",
        to = "super::stories::Column::Id"
    )]
    Story,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef { Relation::Author.def() }
}

impl Related<super::articles::Entity> for Entity {
    fn to() -> RelationDef { Relation::Article.def() }
}

impl Related<super::stories::Entity> for Entity {
    fn to() -> RelationDef { Relation::Story.def() }
}

impl ActiveModelBehavior for ActiveModel {}
