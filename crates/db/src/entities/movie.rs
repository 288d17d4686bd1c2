//! Movie entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "movie")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// Display title, captured from the first vote that created the movie
    pub title: String,

    /// External correlation key from the content source
    #[sea_orm(unique)]
    pub query_id: String,

    /// Like tally (denormalized, must match live like rows)
    #[sea_orm(default_value = 0)]
    pub up_count: i32,

    /// Dislike tally (denormalized, must match live dislike rows)
    #[sea_orm(default_value = 0)]
    pub down_count: i32,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::like::Entity")]
    Likes,

    #[sea_orm(has_many = "super::dislike::Entity")]
    Dislikes,
}

impl Related<super::like::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Likes.def()
    }
}

impl Related<super::dislike::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Dislikes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
