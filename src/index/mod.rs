//! Schedule index builder.
//!
//! Turns one upstream document into a [`ScheduleSnapshot`] with a class index and a
//! teacher index. Building is pure: no I/O, no clock access, no shared state.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::errors::{Result, ScheduleError};
use crate::models::{
    ChangeKind, ChangeKindPolicy, ClassOccurrence, RawChanges, RawLessonTime, RawScheduleDocument,
    ScheduleSnapshot, TeacherName, TeacherOccurrence, Timeslot,
};

/// Builds snapshots under a fixed change-kind policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScheduleIndexBuilder {
    policy: ChangeKindPolicy,
}

impl ScheduleIndexBuilder {
    pub fn new(policy: ChangeKindPolicy) -> Self {
        Self { policy }
    }

    /// Build a snapshot from `doc`, stamped with `built_at`.
    pub fn build(
        &self,
        doc: &RawScheduleDocument,
        built_at: DateTime<Utc>,
    ) -> Result<ScheduleSnapshot> {
        let result = &doc.result;

        let timeframe = result
            .timeframes
            .first()
            .ok_or_else(|| ScheduleError::malformed("document has no timeframes"))?;

        let timeslots = timeframe
            .timeslots
            .iter()
            .map(|slot| Timeslot {
                start_time: slot.start_time.clone(),
                end_time: slot.end_time.clone(),
            })
            .collect();

        let classes = result
            .classes
            .iter()
            .map(|c| (c.code.clone(), c.description.clone()))
            .collect();
        let subjects = result
            .subjects
            .iter()
            .map(|s| (s.code.clone(), s.description.clone()))
            .collect();
        let rooms = result
            .rooms
            .iter()
            .map(|r| (r.code.clone(), r.description.clone()))
            .collect();
        let teachers = result
            .teachers
            .iter()
            .map(|t| {
                (
                    t.code.clone(),
                    TeacherName {
                        first_name: t.first_name.clone(),
                        last_name: t.last_name.clone(),
                    },
                )
            })
            .collect();

        let mut class_index: HashMap<String, Vec<ClassOccurrence>> = HashMap::new();
        let mut teacher_index: HashMap<String, Vec<TeacherOccurrence>> = HashMap::new();

        for lesson in &result.display_schedule.lesson_times {
            let change = self.classify(lesson.changes.as_ref());

            for class_code in &lesson.class_codes {
                class_index
                    .entry(class_code.clone())
                    .or_default()
                    .push(class_occurrence(lesson, change));
            }

            for (position, teacher_code) in lesson.teacher_codes.iter().enumerate() {
                teacher_index
                    .entry(teacher_code.clone())
                    .or_default()
                    .push(teacher_occurrence(lesson, position, change));
            }
        }

        Ok(ScheduleSnapshot {
            version: doc.about.e_tag.clone(),
            description: result.display_schedule.schedule_description.clone(),
            built_at,
            timeslots,
            classes,
            subjects,
            rooms,
            teachers,
            class_index,
            teacher_index,
        })
    }

    /// Map a change descriptor onto a change kind according to the policy.
    pub fn classify(&self, changes: Option<&RawChanges>) -> Option<ChangeKind> {
        match self.policy {
            ChangeKindPolicy::Omit => None,
            ChangeKindPolicy::Classify => changes.map(classify_changes),
        }
    }
}

/// Affected entities decide first; the source's numeric type is too loosely defined to trust.
fn classify_changes(changes: &RawChanges) -> ChangeKind {
    let has_text = |value: &Option<String>| value.as_deref().is_some_and(|s| !s.trim().is_empty());

    if !changes.absent_class_codes.is_empty() {
        ChangeKind::ClassAbsence
    } else if !changes.absent_teacher_codes.is_empty() {
        ChangeKind::TeacherAbsence
    } else if !changes.new_room_codes.is_empty() || !changes.absent_room_codes.is_empty() {
        ChangeKind::RoomChange
    } else if has_text(&changes.lesson_title) || has_text(&changes.caption) {
        ChangeKind::LessonChange
    } else {
        tracing::debug!(change_type = changes.change_type, "Unclassified lesson change");
        ChangeKind::Unknown
    }
}

fn class_occurrence(lesson: &RawLessonTime, change: Option<ChangeKind>) -> ClassOccurrence {
    ClassOccurrence {
        subject: lesson.subject_code.clone(),
        building_codes: lesson.building_codes.clone(),
        room_codes: lesson.room_codes.clone(),
        teacher_codes: lesson.teacher_codes.clone(),
        dates: lesson.dates.clone(),
        start_time: lesson.start_time.clone(),
        end_time: lesson.end_time.clone(),
        change,
    }
}

fn teacher_occurrence(
    lesson: &RawLessonTime,
    position: usize,
    change: Option<ChangeKind>,
) -> TeacherOccurrence {
    // Excluded by position so a repeated code still leaves its other copies.
    let co_teacher_codes = lesson
        .teacher_codes
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != position)
        .map(|(_, code)| code.clone())
        .collect();

    TeacherOccurrence {
        subject: lesson.subject_code.clone(),
        class_codes: lesson.class_codes.clone(),
        building_codes: lesson.building_codes.clone(),
        room_codes: lesson.room_codes.clone(),
        dates: lesson.dates.clone(),
        start_time: lesson.start_time.clone(),
        end_time: lesson.end_time.clone(),
        co_teacher_codes,
        change,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{school_document, SCHOOL_DOCUMENT};

    fn build(policy: ChangeKindPolicy) -> ScheduleSnapshot {
        ScheduleIndexBuilder::new(policy)
            .build(&school_document(), Utc::now())
            .unwrap()
    }

    #[test]
    fn test_build_copies_metadata_and_labels() {
        let snapshot = build(ChangeKindPolicy::Classify);

        assert_eq!(snapshot.version, "rev-1");
        assert_eq!(snapshot.description, "Spring term");
        assert_eq!(
            snapshot.timeslots,
            vec![
                Timeslot {
                    start_time: "08:00".into(),
                    end_time: "08:45".into()
                },
                Timeslot {
                    start_time: "08:50".into(),
                    end_time: "09:35".into()
                },
            ]
        );
        assert_eq!(snapshot.class_label("2C"), "Class 2C");
        assert_eq!(snapshot.subject_label("PE"), "Physical Education");
        assert_eq!(snapshot.room_label("GYM"), "Gym");
        assert_eq!(snapshot.teacher_label("T2"), "Alan Turing");
        assert_eq!(snapshot.teacher_label("T9"), "");
        assert_eq!(snapshot.class_label("9Z"), "");
    }

    #[test]
    fn test_build_fans_out_per_class_and_teacher() {
        let snapshot = build(ChangeKindPolicy::Classify);

        // English is shared by 1A and 1B and keeps the full teacher list.
        let class_a = &snapshot.class_index["1A"];
        assert_eq!(class_a.len(), 2);
        assert_eq!(class_a[0].subject, "MATH");
        assert_eq!(class_a[1].subject, "ENG");
        assert_eq!(class_a[1].teacher_codes, vec!["T2", "T3"]);
        assert_eq!(class_a[1].building_codes, vec!["B1"]);

        let class_b = &snapshot.class_index["1B"];
        assert_eq!(class_b.len(), 2);
        assert_eq!(class_b[0].teacher_codes, vec!["T2", "T3"]);

        // 2C has a label but no lessons.
        assert!(!snapshot.class_index.contains_key("2C"));

        let t2 = &snapshot.teacher_index["T2"];
        assert_eq!(t2.len(), 1);
        assert_eq!(t2[0].co_teacher_codes, vec!["T3"]);
        assert_eq!(t2[0].class_codes, vec!["1A", "1B"]);

        let t3 = &snapshot.teacher_index["T3"];
        assert_eq!(t3.len(), 2);
        assert_eq!(t3[0].co_teacher_codes, vec!["T2"]);
        assert!(t3[1].co_teacher_codes.is_empty());
    }

    #[test]
    fn test_repeated_teacher_code_is_excluded_positionally() {
        let mut doc = school_document();
        doc.result.display_schedule.lesson_times[0].teacher_codes =
            vec!["T1".into(), "T1".into(), "T2".into()];

        let snapshot = ScheduleIndexBuilder::default()
            .build(&doc, Utc::now())
            .unwrap();

        let t1 = &snapshot.teacher_index["T1"];
        assert_eq!(t1.len(), 2);
        assert_eq!(t1[0].co_teacher_codes, vec!["T1", "T2"]);
        assert_eq!(t1[1].co_teacher_codes, vec!["T1", "T2"]);
        assert_eq!(snapshot.teacher_index["T2"][0].co_teacher_codes, vec!["T1", "T1"]);
    }

    #[test]
    fn test_missing_timeframe_is_malformed() {
        let mut doc = school_document();
        doc.result.timeframes.clear();

        let err = ScheduleIndexBuilder::default()
            .build(&doc, Utc::now())
            .unwrap_err();
        assert!(matches!(err, ScheduleError::MalformedSource(_)));
    }

    #[test]
    fn test_undecodable_document_is_malformed() {
        let err = RawScheduleDocument::from_slice(b"{\"about\": {}}").unwrap_err();
        assert!(matches!(err, ScheduleError::MalformedSource(_)));

        let err = RawScheduleDocument::from_slice(b"<html>").unwrap_err();
        assert!(matches!(err, ScheduleError::MalformedSource(_)));
    }

    #[test]
    fn test_null_fields_decode_as_empty() {
        let json = br#"{
          "about": { "eTag": null },
          "result": {
            "classes": [{ "code": "1A", "description": null }],
            "subjects": null,
            "rooms": null,
            "teachers": [{ "code": "T1", "firstName": "Ada", "lastName": null }],
            "timeframes": [{ "timeslots": [{ "startTime": "08:00", "endTime": "08:45" }] }],
            "displaySchedule": {
              "scheduleDescription": null,
              "lessonTimes": [
                {
                  "subjectCode": "MATH",
                  "classCodes": ["1A"],
                  "teacherCodes": ["T1"],
                  "roomCodes": null,
                  "buildingCodes": null,
                  "dates": null,
                  "startTime": "08:00",
                  "endTime": "08:45",
                  "changes": { "changeType": null, "absentTeacherCodes": null, "newRoomCodes": null }
                },
                {
                  "subjectCode": "MATH",
                  "classCodes": null,
                  "teacherCodes": null,
                  "startTime": "08:50",
                  "endTime": "09:35",
                  "changes": null
                }
              ]
            }
          }
        }"#;

        let doc = RawScheduleDocument::from_slice(json).unwrap();
        let snapshot = ScheduleIndexBuilder::default()
            .build(&doc, Utc::now())
            .unwrap();

        assert_eq!(snapshot.version, "");
        assert_eq!(snapshot.description, "");
        assert_eq!(snapshot.class_label("1A"), "");
        assert_eq!(snapshot.teacher_label("T1"), "Ada ");
        assert!(snapshot.subjects.is_empty());

        let class_a = &snapshot.class_index["1A"];
        assert_eq!(class_a.len(), 1);
        assert!(class_a[0].room_codes.is_empty());
        assert!(class_a[0].dates.is_empty());
        assert_eq!(class_a[0].change, Some(ChangeKind::Unknown));
        assert_eq!(snapshot.teacher_index["T1"].len(), 1);
    }

    #[test]
    fn test_classify_policy() {
        let snapshot = build(ChangeKindPolicy::Classify);
        assert_eq!(snapshot.class_index["1A"][0].change, None);
        assert_eq!(snapshot.class_index["1A"][1].change, Some(ChangeKind::RoomChange));
        assert_eq!(
            snapshot.teacher_index["T3"][1].change,
            Some(ChangeKind::TeacherAbsence)
        );
    }

    #[test]
    fn test_omit_policy_never_reports_changes() {
        let snapshot = build(ChangeKindPolicy::Omit);
        let all_class = snapshot.class_index.values().flatten().all(|o| o.change.is_none());
        let all_teacher = snapshot.teacher_index.values().flatten().all(|o| o.change.is_none());
        assert!(all_class && all_teacher);
    }

    #[test]
    fn test_classify_precedence() {
        let builder = ScheduleIndexBuilder::new(ChangeKindPolicy::Classify);

        let mut changes = RawChanges {
            absent_class_codes: vec!["1A".into()],
            absent_teacher_codes: vec!["T1".into()],
            ..Default::default()
        };
        assert_eq!(builder.classify(Some(&changes)), Some(ChangeKind::ClassAbsence));

        changes.absent_class_codes.clear();
        assert_eq!(builder.classify(Some(&changes)), Some(ChangeKind::TeacherAbsence));

        let changes = RawChanges {
            lesson_title: Some("Extra lesson".into()),
            ..Default::default()
        };
        assert_eq!(builder.classify(Some(&changes)), Some(ChangeKind::LessonChange));

        let changes = RawChanges {
            change_type: 7,
            ..Default::default()
        };
        assert_eq!(builder.classify(Some(&changes)), Some(ChangeKind::Unknown));
        assert_eq!(builder.classify(None), None);
    }

    #[test]
    fn test_build_is_idempotent() {
        let doc = RawScheduleDocument::from_slice(SCHOOL_DOCUMENT.as_bytes()).unwrap();
        let builder = ScheduleIndexBuilder::default();
        let now = Utc::now();

        let first = builder.build(&doc, now).unwrap();
        let second = builder.build(&doc, now).unwrap();

        assert_eq!(first.classes, second.classes);
        assert_eq!(first.teachers, second.teachers);
        assert_eq!(first.class_index, second.class_index);
        assert_eq!(first.teacher_index, second.teacher_index);
        assert_eq!(first.timeslots, second.timeslots);
    }
}
