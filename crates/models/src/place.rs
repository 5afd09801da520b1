use sea_orm::{entity::prelude::*, Set, DatabaseConnection, QueryFilter, QueryOrder};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, user};

pub const NAME_MAX_LEN: usize = 200;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "place")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: Uuid,
    pub name: String,
    pub visited: bool,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub date_visited: Option<Date>,
    pub photo: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { User }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::User => Entity::belongs_to(user::Entity)
                .from(Column::UserId)
                .to(user::Column::Id)
                .into(),
        }
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef { Relation::User.def() }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_owned_by(&self, user_id: Uuid) -> bool { self.user_id == user_id }
}

/// Trim and check a place name; returns the trimmed value.
pub fn validate_name(name: &str) -> Result<String, errors::ModelError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(errors::ModelError::Validation("name required".into()));
    }
    if trimmed.chars().count() > NAME_MAX_LEN {
        return Err(errors::ModelError::Validation(format!("name must be at most {NAME_MAX_LEN} characters")));
    }
    Ok(trimmed.to_string())
}

pub async fn create(db: &DatabaseConnection, user_id: Uuid, name: &str, visited: bool) -> Result<Model, errors::ModelError> {
    let name = validate_name(name)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        user_id: Set(user_id),
        name: Set(name),
        visited: Set(visited),
        notes: Set(None),
        date_visited: Set(None),
        photo: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Places owned by `user_id`, optionally filtered by `visited`, sorted by
/// name and then id so equal names keep insertion order.
pub async fn list_for_owner(db: &DatabaseConnection, user_id: Uuid, visited: Option<bool>) -> Result<Vec<Model>, errors::ModelError> {
    let mut finder = Entity::find().filter(Column::UserId.eq(user_id));
    if let Some(v) = visited { finder = finder.filter(Column::Visited.eq(v)); }
    finder
        .order_by_asc(Column::Name)
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Write every mutable column of `place` back to its row.
pub async fn save(db: &DatabaseConnection, place: &Model) -> Result<Model, errors::ModelError> {
    let mut am: ActiveModel = place.clone().into();
    am.name = Set(validate_name(&place.name)?);
    am.visited = Set(place.visited);
    am.notes = Set(place.notes.clone());
    am.date_visited = Set(place.date_visited);
    am.photo = Set(place.photo.clone());
    am.updated_at = Set(Utc::now().into());
    am.update(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
