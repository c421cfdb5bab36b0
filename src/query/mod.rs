//! Lessons query over one snapshot.

use crate::errors::{Result, ScheduleError};
use crate::models::{LessonsResponse, ResponseEntity, ResponseOccurrence, ScheduleSnapshot};

/// Class and teacher codes a client asked for, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selectors {
    pub class_codes: Vec<String>,
    pub teacher_codes: Vec<String>,
}

impl Selectors {
    /// Parse comma-separated selector strings. Empty segments are dropped, duplicates kept.
    pub fn parse(classes: &str, teachers: &str) -> Self {
        Self {
            class_codes: split_codes(classes),
            teacher_codes: split_codes(teachers),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.class_codes.is_empty() && self.teacher_codes.is_empty()
    }
}

fn split_codes(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}

/// Assemble the response for `selectors` from a single snapshot.
///
/// Classes come first in request order, then teachers. Codes missing from the index are
/// skipped. The label dictionaries only cover codes that appear in emitted occurrences.
pub fn run_query(selectors: &Selectors, snapshot: &ScheduleSnapshot) -> Result<LessonsResponse> {
    if selectors.is_empty() {
        return Err(ScheduleError::NoSelector);
    }

    let mut response = LessonsResponse {
        timeslots: snapshot.timeslots.clone(),
        ..Default::default()
    };

    for class_code in &selectors.class_codes {
        let Some(occurrences) = snapshot.class_index.get(class_code) else {
            continue;
        };

        let mut entity = ResponseEntity {
            code: class_code.clone(),
            label: snapshot.class_label(class_code),
            occurrences: Vec::with_capacity(occurrences.len()),
        };

        for occurrence in occurrences {
            collect_labels(
                &mut response,
                snapshot,
                &occurrence.subject,
                &occurrence.room_codes,
                &occurrence.teacher_codes,
            );
            entity.occurrences.push(ResponseOccurrence {
                subject: occurrence.subject.clone(),
                teachers: occurrence.teacher_codes.clone(),
                rooms: occurrence.room_codes.clone(),
                classes: Vec::new(),
                start_time: occurrence.start_time.clone(),
                end_time: occurrence.end_time.clone(),
                dates: occurrence.dates.clone(),
                change: occurrence.change,
            });
        }

        response.result.push(entity);
    }

    for teacher_code in &selectors.teacher_codes {
        let Some(occurrences) = snapshot.teacher_index.get(teacher_code) else {
            continue;
        };

        let mut entity = ResponseEntity {
            code: teacher_code.clone(),
            label: snapshot.teacher_label(teacher_code),
            occurrences: Vec::with_capacity(occurrences.len()),
        };

        for occurrence in occurrences {
            collect_labels(
                &mut response,
                snapshot,
                &occurrence.subject,
                &occurrence.room_codes,
                &occurrence.co_teacher_codes,
            );
            entity.occurrences.push(ResponseOccurrence {
                subject: occurrence.subject.clone(),
                teachers: occurrence.co_teacher_codes.clone(),
                rooms: occurrence.room_codes.clone(),
                classes: occurrence.class_codes.clone(),
                start_time: occurrence.start_time.clone(),
                end_time: occurrence.end_time.clone(),
                dates: occurrence.dates.clone(),
                change: occurrence.change,
            });
        }

        response.result.push(entity);
    }

    Ok(response)
}

fn collect_labels(
    response: &mut LessonsResponse,
    snapshot: &ScheduleSnapshot,
    subject: &str,
    rooms: &[String],
    teachers: &[String],
) {
    for room in rooms {
        response
            .rooms
            .entry(room.clone())
            .or_insert_with(|| snapshot.room_label(room));
    }
    for teacher in teachers {
        response
            .teachers
            .entry(teacher.clone())
            .or_insert_with(|| snapshot.teacher_name(teacher));
    }
    response
        .subjects
        .entry(subject.to_string())
        .or_insert_with(|| snapshot.subject_label(subject));
}
