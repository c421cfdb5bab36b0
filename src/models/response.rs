//! JSON body of the lessons endpoint.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{ChangeKind, TeacherName, Timeslot};

/// Lessons of the requested classes and teachers plus the labels they reference.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct LessonsResponse {
    pub teachers: BTreeMap<String, TeacherName>,
    pub subjects: BTreeMap<String, String>,
    pub rooms: BTreeMap<String, String>,
    pub timeslots: Vec<Timeslot>,
    pub result: Vec<ResponseEntity>,
}

/// One requested class or teacher.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResponseEntity {
    pub code: String,
    pub label: String,
    pub occurrences: Vec<ResponseOccurrence>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ResponseOccurrence {
    pub subject: String,
    pub teachers: Vec<String>,
    pub rooms: Vec<String>,
    pub classes: Vec<String>,
    pub start_time: String,
    pub end_time: String,
    pub dates: Vec<String>,
    pub change: Option<ChangeKind>,
}

/// Summary of the snapshot currently served.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub description: String,
    pub built_at: String,
    pub classes: usize,
    pub teachers: usize,
}
