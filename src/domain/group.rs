use serde::Serialize;
use serde_json::Value;
use std::fmt;

use crate::constants::{DESCRIPTION_PREVIEW_CHARS, ELLIPSIS};
use crate::error::{MeetupError, Result};
use crate::types::RawGroupData;

/// One meetup group as returned by the directory, reduced to the fields the
/// map and the listing use.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRecord {
    pub name: String,
    pub category: String,
    pub city: String,
    pub country: String,
    /// Full text; see [`GroupRecord::display_description`] for the preview.
    pub description: String,
    pub photo_url: Option<String>,
    /// Passed through as the directory sends it ("open", "approval", ...)
    pub join_mode: String,
    pub latitude: f64,
    pub longitude: f64,
    pub link: String,
    pub member_count: u64,
    pub next_event_name: Option<String>,
}

impl GroupRecord {
    pub fn from_raw(entry: &RawGroupData) -> Result<Self> {
        Ok(Self {
            name: required_str(entry, "name")?,
            category: entry
                .get("category")
                .and_then(|category| category.get("name"))
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| MeetupError::malformed("category.name"))?,
            city: required_str(entry, "city")?,
            country: required_str(entry, "country")?,
            description: required_str(entry, "description")?,
            photo_url: nested_str(entry, "group_photo", "photo_link"),
            join_mode: required_str(entry, "join_mode")?,
            latitude: required_f64(entry, "lat")?,
            longitude: required_f64(entry, "lon")?,
            link: required_str(entry, "link")?,
            member_count: entry
                .get("members")
                .and_then(Value::as_u64)
                .ok_or_else(|| MeetupError::malformed("members"))?,
            next_event_name: nested_str(entry, "next_event", "name"),
        })
    }

    pub fn display_description(&self) -> String {
        truncate(&self.description)
    }

    pub fn location(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }
}

impl fmt::Display for GroupRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Group Name: {}", self.name)?;
        writeln!(f, "Category: {}", self.category)?;
        writeln!(f, "Location: {}", self.location())?;
        writeln!(f, "Description: {}", self.display_description())?;
        write!(f, "Link to Group: {}", self.link)
    }
}

/// Shortens `text` to its first 100 characters plus an ellipsis.
///
/// Idempotent: a truncated string keeps the same first 100 characters, so
/// truncating it again rebuilds the same value.
pub fn truncate(text: &str) -> String {
    if text.chars().count() <= DESCRIPTION_PREVIEW_CHARS {
        return text.to_string();
    }
    let mut preview: String = text.chars().take(DESCRIPTION_PREVIEW_CHARS).collect();
    preview.push_str(ELLIPSIS);
    preview
}

fn required_str(entry: &Value, key: &str) -> Result<String> {
    entry
        .get(key)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| MeetupError::malformed(key))
}

fn required_f64(entry: &Value, key: &str) -> Result<f64> {
    entry
        .get(key)
        .and_then(Value::as_f64)
        .ok_or_else(|| MeetupError::malformed(key))
}

fn nested_str(entry: &Value, outer: &str, inner: &str) -> Option<String> {
    entry
        .get(outer)
        .and_then(|value| value.get(inner))
        .and_then(Value::as_str)
        .map(str::to_string)
}
