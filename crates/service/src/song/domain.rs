use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use models::song::{self as song_model, SongFields};

use crate::errors::ServiceError;

/// Catalog record (business view)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    pub id: i32,
    pub group: String,
    pub name: String,
    #[serde(with = "release_date_text")]
    pub release_date: NaiveDate,
    pub text: String,
    pub link: String,
}

impl Song {
    pub fn from_fields(id: i32, fields: SongFields) -> Self {
        Self {
            id,
            group: fields.group_name,
            name: fields.song_name,
            release_date: fields.release_date,
            text: fields.song_text,
            link: fields.link,
        }
    }
}

impl From<song_model::Model> for Song {
    fn from(m: song_model::Model) -> Self {
        Self {
            id: m.id,
            group: m.group_name,
            name: m.song_name,
            release_date: m.release_date,
            text: m.song_text,
            link: m.link,
        }
    }
}

/// Serde adapter keeping `releaseDate` in `DD.MM.YYYY` form on the wire.
mod release_date_text {
    use chrono::NaiveDate;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&models::song::format_release_date(date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(d)?;
        models::song::parse_release_date(&raw).map_err(D::Error::custom)
    }
}

/// Creation input, all fields textual and unvalidated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateParams {
    pub group: String,
    pub name: String,
    pub release_date: String,
    pub text: String,
    pub link: String,
}

impl CreateParams {
    /// Check required fields and parse the release date.
    pub fn to_fields(&self, context: &str) -> Result<SongFields, ServiceError> {
        validated_fields(context, &self.group, &self.name, &self.release_date, &self.text, &self.link)
    }
}

/// Replacement values for an existing record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateParams {
    #[serde(rename = "group_name")]
    pub group: String,
    #[serde(rename = "song_name")]
    pub name: String,
    pub release_date: String,
    #[serde(rename = "song_text")]
    pub text: String,
    pub link: String,
}

impl UpdateParams {
    pub fn to_fields(&self, context: &str) -> Result<SongFields, ServiceError> {
        validated_fields(context, &self.group, &self.name, &self.release_date, &self.text, &self.link)
    }
}

fn validated_fields(
    context: &str,
    group: &str,
    name: &str,
    release_date: &str,
    text: &str,
    link: &str,
) -> Result<SongFields, ServiceError> {
    let required = [("group", group), ("name", name), ("release_date", release_date), ("text", text), ("link", link)];
    for (field, value) in required {
        song_model::validate_required(field, value).map_err(|e| ServiceError::model(context, e))?;
    }
    let release_date = song_model::parse_release_date(release_date).map_err(|e| ServiceError::model(context, e))?;
    Ok(SongFields {
        group_name: group.to_string(),
        song_name: name.to_string(),
        release_date,
        song_text: text.to_string(),
        link: link.to_string(),
    })
}

/// Minimal creation request; the rest is looked up upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SongDetails {
    pub group: String,
    #[serde(rename = "song")]
    pub name: String,
}

impl SongDetails {
    pub fn validate(&self) -> Result<(), ServiceError> {
        song_model::validate_required("group", &self.group).map_err(|e| ServiceError::model("song details", e))?;
        song_model::validate_required("song", &self.name).map_err(|e| ServiceError::model("song details", e))?;
        Ok(())
    }
}

/// One verse of a song text, numbered from 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub num: String,
    pub text: String,
}

/// Raw search parameters: every value supplied for each key, in arrival order.
pub type FilterValues = BTreeMap<String, Vec<String>>;

/// Validated search filters: at most one value per key.
pub type SearchFilters = BTreeMap<String, String>;

pub fn filter_values_from_pairs<I>(pairs: I) -> FilterValues
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut values = FilterValues::new();
    for (key, value) in pairs {
        values.entry(key).or_default().push(value);
    }
    values
}
