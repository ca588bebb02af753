use sea_orm::{entity::prelude::*, sea_query::Expr, ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, EntityTrait, FromQueryResult, QueryFilter, QuerySelect, Set};

use crate::errors;

/// Textual release date format used on every external surface (`16.07.2006`).
pub const RELEASE_DATE_FORMAT: &str = "%d.%m.%Y";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "songs")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub group_name: String,
    pub song_name: String,
    pub release_date: Date,
    #[sea_orm(column_type = "Text")]
    pub song_text: String,
    pub link: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Validated column values for one row, excluding the storage-assigned id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SongFields {
    pub group_name: String,
    pub song_name: String,
    pub release_date: Date,
    pub song_text: String,
    pub link: String,
}

fn has_release_date_shape(raw: &str) -> bool {
    let b = raw.as_bytes();
    b.len() == 10
        && b.iter().enumerate().all(|(i, c)| match i {
            2 | 5 => *c == b'.',
            _ => c.is_ascii_digit(),
        })
}

/// Strict `DD.MM.YYYY`: two-digit day and month, four-digit year, no padding.
pub fn parse_release_date(raw: &str) -> Result<Date, errors::ModelError> {
    if !has_release_date_shape(raw) {
        return Err(errors::ModelError::Validation(format!("release date {raw:?} is not in DD.MM.YYYY format")));
    }
    Date::parse_from_str(raw, RELEASE_DATE_FORMAT).map_err(|e| {
        errors::ModelError::Validation(format!("release date {raw:?} is not in DD.MM.YYYY format: {e}"))
    })
}

pub fn format_release_date(date: &Date) -> String {
    date.format(RELEASE_DATE_FORMAT).to_string()
}

pub fn validate_required(field: &str, value: &str) -> Result<(), errors::ModelError> {
    if value.trim().is_empty() {
        return Err(errors::ModelError::Validation(format!("{field} is required")));
    }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, fields: &SongFields) -> Result<Model, errors::ModelError> {
    let am = ActiveModel {
        id: NotSet,
        group_name: Set(fields.group_name.clone()),
        song_name: Set(fields.song_name.clone()),
        release_date: Set(fields.release_date),
        song_text: Set(fields.song_text.clone()),
        link: Set(fields.link.clone()),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Overwrite every mutable column of row `id`; returns the number of rows touched.
pub async fn update(db: &DatabaseConnection, id: i32, fields: &SongFields) -> Result<u64, errors::ModelError> {
    let res = Entity::update_many()
        .col_expr(Column::GroupName, Expr::value(fields.group_name.clone()))
        .col_expr(Column::SongName, Expr::value(fields.song_name.clone()))
        .col_expr(Column::ReleaseDate, Expr::value(fields.release_date))
        .col_expr(Column::SongText, Expr::value(fields.song_text.clone()))
        .col_expr(Column::Link, Expr::value(fields.link.clone()))
        .filter(Column::Id.eq(id))
        .exec(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected)
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<u64, errors::ModelError> {
    let res = Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected)
}

#[derive(Debug, FromQueryResult)]
struct SongText {
    song_text: String,
}

pub async fn find_text(db: &DatabaseConnection, id: i32) -> Result<Option<String>, errors::ModelError> {
    let row = Entity::find_by_id(id)
        .select_only()
        .column(Column::SongText)
        .into_model::<SongText>()
        .one(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(row.map(|r| r.song_text))
}
