use crate::data::{
    Assignment, AssignmentInput, Course, CourseRecord, HistoricalInstance, Room, Timeslot,
};
use crate::generate::SyntheticDataset;
use itertools::Itertools;
use log::info;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Errors raised at the data boundary. The assignment engine itself never
/// fails; everything that can go wrong happens while loading or validating.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("csv error in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
    #[error("i/o error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("course {0} has non-positive predicted enrollment")]
    InvalidPrediction(String),
    #[error("room {0} has non-positive capacity")]
    InvalidCapacity(String),
    #[error("duplicate course id {0}")]
    DuplicateCourse(String),
    #[error("duplicate room id {0}")]
    DuplicateRoom(String),
}

/// Rejects inputs the engine must never see: zero sizes and duplicate ids.
pub fn validate(input: &AssignmentInput) -> Result<(), DataError> {
    let mut course_ids = HashSet::new();
    for course in &input.courses {
        if course.predicted_students == 0 {
            return Err(DataError::InvalidPrediction(course.course_id.clone()));
        }
        if !course_ids.insert(course.course_id.as_str()) {
            return Err(DataError::DuplicateCourse(course.course_id.clone()));
        }
    }
    let mut room_ids = HashSet::new();
    for room in &input.rooms {
        if room.capacity == 0 {
            return Err(DataError::InvalidCapacity(room.room_id.clone()));
        }
        if !room_ids.insert(room.room_id.as_str()) {
            return Err(DataError::DuplicateRoom(room.room_id.clone()));
        }
    }
    Ok(())
}

pub fn load_course_records(path: &Path) -> Result<Vec<CourseRecord>, DataError> {
    let records: Vec<CourseRecord> = read_records(path)?;
    let mut seen = HashSet::new();
    for record in &records {
        if !seen.insert(record.course_id.as_str()) {
            return Err(DataError::DuplicateCourse(record.course_id.clone()));
        }
    }
    info!("Loaded {} courses from {}", records.len(), path.display());
    Ok(records)
}

pub fn load_rooms(path: &Path) -> Result<Vec<Room>, DataError> {
    let rooms: Vec<Room> = read_records(path)?;
    let mut seen = HashSet::new();
    for room in &rooms {
        if room.capacity == 0 {
            return Err(DataError::InvalidCapacity(room.room_id.clone()));
        }
        if !seen.insert(room.room_id.as_str()) {
            return Err(DataError::DuplicateRoom(room.room_id.clone()));
        }
    }
    info!("Loaded {} rooms from {}", rooms.len(), path.display());
    Ok(rooms)
}

/// The timeslot universe is whatever slots the historical offerings used,
/// deduplicated and in lexicographic (chronological) order.
pub fn load_timeslots(path: &Path) -> Result<Vec<Timeslot>, DataError> {
    let rows: Vec<HistoricalInstance> = read_records(path)?;
    let slots: Vec<Timeslot> = rows.into_iter().map(|r| r.timeslot).sorted().dedup().collect();
    info!("Derived {} timeslots from {}", slots.len(), path.display());
    Ok(slots)
}

pub fn write_dataset(dir: &Path, dataset: &SyntheticDataset) -> Result<(), DataError> {
    std::fs::create_dir_all(dir).map_err(|e| DataError::Io {
        path: dir.display().to_string(),
        source: e,
    })?;
    write_records(&dir.join("courses.csv"), &dataset.courses)?;
    write_records(&dir.join("rooms.csv"), &dataset.rooms)?;
    write_records(&dir.join("historical_instances.csv"), &dataset.history)?;
    info!("Dataset written to {}", dir.display());
    Ok(())
}

pub fn write_predictions(path: &Path, courses: &[Course]) -> Result<(), DataError> {
    write_records(path, courses)
}

/// Unassigned courses serialize with empty room and timeslot fields.
pub fn write_assignments(path: &Path, assignments: &[Assignment]) -> Result<(), DataError> {
    write_records(path, assignments)?;
    info!(
        "{} assignments written to {}",
        assignments.len(),
        path.display()
    );
    Ok(())
}

fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, DataError> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| csv_error(path, e))?;
    let mut out = Vec::new();
    for row in reader.deserialize() {
        out.push(row.map_err(|e| csv_error(path, e))?);
    }
    Ok(out)
}

fn write_records<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), DataError> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| csv_error(path, e))?;
    for row in rows {
        writer.serialize(row).map_err(|e| csv_error(path, e))?;
    }
    writer.flush().map_err(|e| DataError::Io {
        path: path.display().to_string(),
        source: e,
    })
}

fn csv_error(path: &Path, source: csv::Error) -> DataError {
    DataError::Csv {
        path: path.display().to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate;

    fn course(id: &str, predicted: u32) -> Course {
        Course {
            course_id: id.to_string(),
            course_name: "x".to_string(),
            predicted_students: predicted,
            duration: 1,
        }
    }

    fn room(id: &str, capacity: u32) -> Room {
        Room {
            room_id: id.to_string(),
            capacity,
        }
    }

    #[test]
    fn validate_accepts_sane_input() {
        let input = AssignmentInput {
            courses: vec![course("C1", 10), course("C2", 20)],
            rooms: vec![room("R1", 30)],
            timeslots: vec!["09:00-10:00".to_string()],
        };
        assert!(validate(&input).is_ok());
    }

    #[test]
    fn validate_rejects_zero_sizes_and_duplicates() {
        let zero_course = AssignmentInput {
            courses: vec![course("C1", 0)],
            rooms: vec![],
            timeslots: vec![],
        };
        assert!(matches!(
            validate(&zero_course),
            Err(DataError::InvalidPrediction(id)) if id == "C1"
        ));

        let zero_room = AssignmentInput {
            courses: vec![],
            rooms: vec![room("R1", 0)],
            timeslots: vec![],
        };
        assert!(matches!(
            validate(&zero_room),
            Err(DataError::InvalidCapacity(id)) if id == "R1"
        ));

        let dup = AssignmentInput {
            courses: vec![course("C1", 10), course("C1", 10)],
            rooms: vec![],
            timeslots: vec![],
        };
        assert!(matches!(
            validate(&dup),
            Err(DataError::DuplicateCourse(id)) if id == "C1"
        ));
    }

    #[test]
    fn dataset_round_trips_through_csv() {
        let dir = tempfile::tempdir().expect("tempdir");
        let dataset = generate::generate(12, 5, 321);
        write_dataset(dir.path(), &dataset).expect("write");

        let courses = load_course_records(&dir.path().join("courses.csv")).expect("courses");
        let rooms = load_rooms(&dir.path().join("rooms.csv")).expect("rooms");
        let slots =
            load_timeslots(&dir.path().join("historical_instances.csv")).expect("timeslots");

        assert_eq!(courses.len(), 12);
        assert_eq!(rooms.len(), 5);
        assert!(!slots.is_empty());
        assert!(slots.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(courses[0].course_id, dataset.courses[0].course_id);
        assert_eq!(
            courses[0].historical_enrollment,
            dataset.courses[0].historical_enrollment
        );
    }

    #[test]
    fn assignments_round_trip_including_nulls() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("assignments.csv");
        let rows = vec![
            Assignment {
                course_id: "C1".to_string(),
                course_name: "Algo 301".to_string(),
                room_id: Some("R1".to_string()),
                timeslot: Some("09:00-10:00".to_string()),
                predicted_students: 40,
            },
            Assignment {
                course_id: "C2".to_string(),
                course_name: "Stat 210".to_string(),
                room_id: None,
                timeslot: None,
                predicted_students: 500,
            },
        ];
        write_assignments(&path, &rows).expect("write");
        let back: Vec<Assignment> = read_records(&path).expect("read");
        assert_eq!(back, rows);
    }

    #[test]
    fn missing_file_is_a_csv_error() {
        let err = load_rooms(Path::new("/nonexistent/rooms.csv")).unwrap_err();
        assert!(matches!(err, DataError::Csv { .. }));
    }
}
