//! Upstream schedule document, reduced to the fields the index reads.

use serde::{Deserialize, Deserializer};

/// The document returned by the schedule source.
#[derive(Debug, Clone, Deserialize)]
pub struct RawScheduleDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub about: RawAbout,
    pub result: RawResult,
}

/// Document revision information.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAbout {
    #[serde(default, deserialize_with = "null_as_default")]
    pub e_tag: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub classes: Vec<RawCodeEntity>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subjects: Vec<RawCodeEntity>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rooms: Vec<RawCodeEntity>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub teachers: Vec<RawTeacher>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub timeframes: Vec<RawTimeframe>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub display_schedule: RawDisplaySchedule,
}

/// A class, subject or room: a code plus a display label.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCodeEntity {
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTeacher {
    pub code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTimeframe {
    #[serde(default, deserialize_with = "null_as_default")]
    pub timeslots: Vec<RawTimeslot>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTimeslot {
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDisplaySchedule {
    #[serde(default, deserialize_with = "null_as_default")]
    pub schedule_description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lesson_times: Vec<RawLessonTime>,
}

/// One lesson slot of the published schedule.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLessonTime {
    #[serde(default, deserialize_with = "null_as_default")]
    pub subject_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub class_codes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub teacher_codes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub room_codes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub building_codes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dates: Vec<String>,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub changes: Option<RawChanges>,
}

/// Deviation of a lesson from the base timetable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawChanges {
    #[serde(default, deserialize_with = "null_as_default")]
    pub change_type: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub absent_class_codes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub absent_teacher_codes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub absent_room_codes: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub new_room_codes: Vec<String>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub lesson_title: Option<String>,
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl RawScheduleDocument {
    /// Decode a document from the bytes returned by the source.
    pub fn from_slice(bytes: &[u8]) -> crate::errors::Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
