//! Schedule documents shared by the unit and HTTP tests.

use crate::models::RawScheduleDocument;

/// Three classes, three teachers, three lessons. Class 2C has no lessons,
/// the English lesson is co-taught and moved rooms, and PE has an absent teacher.
pub const SCHOOL_DOCUMENT: &str = r#"{
  "about": { "eTag": "rev-1", "serverVersion": "4.2" },
  "result": {
    "classes": [
      { "code": "1A", "description": "Class 1A", "id": "c1" },
      { "code": "1B", "description": "Class 1B", "id": "c2" },
      { "code": "2C", "description": "Class 2C", "id": "c3" }
    ],
    "subjects": [
      { "code": "MATH", "description": "Mathematics", "id": "s1" },
      { "code": "ENG", "description": "English", "id": "s2" },
      { "code": "PE", "description": "Physical Education", "id": "s3" }
    ],
    "rooms": [
      { "code": "R1", "description": "Room 1", "id": "r1" },
      { "code": "R2", "description": "Room 2", "id": "r2" },
      { "code": "GYM", "description": "Gym", "id": "r3" }
    ],
    "teachers": [
      { "code": "T1", "firstName": "Ada", "lastName": "Lovelace", "id": "t1" },
      { "code": "T2", "firstName": "Alan", "lastName": "Turing", "id": "t2" },
      { "code": "T3", "firstName": "Grace", "lastName": "Hopper", "id": "t3" }
    ],
    "timeframes": [
      {
        "code": "DEFAULT",
        "timeslotFragmentation": 0,
        "timeslots": [
          { "label": "1", "startTime": "08:00", "endTime": "08:45" },
          { "label": "2", "startTime": "08:50", "endTime": "09:35" }
        ]
      }
    ],
    "displaySchedule": {
      "scheduleDescription": "Spring term",
      "lessonTimes": [
        {
          "subjectCode": "MATH",
          "classCodes": ["1A"],
          "teacherCodes": ["T1"],
          "roomCodes": ["R1"],
          "dates": ["2024-01-08"],
          "startTime": "08:00",
          "endTime": "08:45"
        },
        {
          "subjectCode": "ENG",
          "classCodes": ["1A", "1B"],
          "teacherCodes": ["T2", "T3"],
          "roomCodes": ["R2"],
          "buildingCodes": ["B1"],
          "dates": ["2024-01-08", "2024-01-15"],
          "startTime": "08:50",
          "endTime": "09:35",
          "changes": { "changeType": 1, "newRoomCodes": ["R2"], "absentRoomCodes": ["R1"] }
        },
        {
          "subjectCode": "PE",
          "classCodes": ["1B"],
          "teacherCodes": ["T3"],
          "roomCodes": ["GYM"],
          "dates": ["2024-01-09"],
          "startTime": "08:00",
          "endTime": "08:45",
          "changes": { "changeType": 3, "absentTeacherCodes": ["T3"], "caption": "Absent" }
        }
      ]
    }
  }
}"#;

/// The single-lesson document used for the end-to-end example.
pub const MINIMAL_DOCUMENT: &str = r#"{
  "about": { "eTag": "rev-min" },
  "result": {
    "classes": [{ "code": "1A", "description": "Class 1A" }],
    "subjects": [{ "code": "MATH", "description": "Mathematics" }],
    "rooms": [{ "code": "R1", "description": "Room 1" }],
    "teachers": [{ "code": "T1", "firstName": "Ada", "lastName": "Lovelace" }],
    "timeframes": [{ "timeslots": [{ "startTime": "08:00", "endTime": "08:45" }] }],
    "displaySchedule": {
      "scheduleDescription": "Minimal",
      "lessonTimes": [
        {
          "subjectCode": "MATH",
          "classCodes": ["1A"],
          "teacherCodes": ["T1"],
          "roomCodes": ["R1"],
          "dates": ["2024-01-08"],
          "startTime": "08:00",
          "endTime": "08:45"
        }
      ]
    }
  }
}"#;

pub fn school_document() -> RawScheduleDocument {
    serde_json::from_str(SCHOOL_DOCUMENT).unwrap()
}

pub fn minimal_document() -> RawScheduleDocument {
    serde_json::from_str(MINIMAL_DOCUMENT).unwrap()
}

/// The school document under a different revision tag with one more lesson for 1A.
pub fn revised_school_document() -> RawScheduleDocument {
    let mut doc = school_document();
    doc.about.e_tag = "rev-2".to_string();
    let mut extra = doc.result.display_schedule.lesson_times[0].clone();
    extra.dates = vec!["2024-01-10".to_string()];
    doc.result.display_schedule.lesson_times.push(extra);
    doc
}
