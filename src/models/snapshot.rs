//! Immutable in-memory index built from one schedule document.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Classification of a lesson that deviates from the base timetable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    RoomChange,
    LessonChange,
    TeacherAbsence,
    ClassAbsence,
    Unknown,
}

/// Whether change descriptors of the source are classified or dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChangeKindPolicy {
    /// Map each change descriptor onto a [`ChangeKind`].
    #[default]
    Classify,
    /// Never report a change kind.
    Omit,
}

impl ChangeKindPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classify" => Some(ChangeKindPolicy::Classify),
            "omit" => Some(ChangeKindPolicy::Omit),
            _ => None,
        }
    }
}

/// Start and end of one period of the school day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Timeslot {
    pub start_time: String,
    pub end_time: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeacherName {
    pub first_name: String,
    pub last_name: String,
}

/// A lesson as seen from one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassOccurrence {
    pub subject: String,
    pub building_codes: Vec<String>,
    pub room_codes: Vec<String>,
    pub teacher_codes: Vec<String>,
    pub dates: Vec<String>,
    pub start_time: String,
    pub end_time: String,
    pub change: Option<ChangeKind>,
}

/// A lesson as seen from one teacher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherOccurrence {
    pub subject: String,
    pub class_codes: Vec<String>,
    pub building_codes: Vec<String>,
    pub room_codes: Vec<String>,
    pub dates: Vec<String>,
    pub start_time: String,
    pub end_time: String,
    /// Every other teacher of the lesson; the indexed teacher is excluded once.
    pub co_teacher_codes: Vec<String>,
    pub change: Option<ChangeKind>,
}

/// Fully built index of one schedule revision. Never mutated once published.
#[derive(Debug, Clone)]
pub struct ScheduleSnapshot {
    pub version: String,
    pub description: String,
    pub built_at: DateTime<Utc>,
    pub timeslots: Vec<Timeslot>,
    pub classes: HashMap<String, String>,
    pub subjects: HashMap<String, String>,
    pub rooms: HashMap<String, String>,
    pub teachers: HashMap<String, TeacherName>,
    pub class_index: HashMap<String, Vec<ClassOccurrence>>,
    pub teacher_index: HashMap<String, Vec<TeacherOccurrence>>,
}

impl ScheduleSnapshot {
    pub fn class_label(&self, code: &str) -> String {
        self.classes.get(code).cloned().unwrap_or_default()
    }

    pub fn subject_label(&self, code: &str) -> String {
        self.subjects.get(code).cloned().unwrap_or_default()
    }

    pub fn room_label(&self, code: &str) -> String {
        self.rooms.get(code).cloned().unwrap_or_default()
    }

    pub fn teacher_name(&self, code: &str) -> TeacherName {
        self.teachers.get(code).cloned().unwrap_or_default()
    }

    /// "first last", or empty when the teacher is unknown.
    pub fn teacher_label(&self, code: &str) -> String {
        match self.teachers.get(code) {
            Some(name) => format!("{} {}", name.first_name, name.last_name),
            None => String::new(),
        }
    }

    /// Class codes that have at least one lesson, sorted.
    pub fn indexed_class_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.class_index.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }
}
