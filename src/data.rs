use serde::{Deserialize, Serialize};

// Type aliases for clarity
pub type CourseId = String;
pub type RoomId = String;

/// A timeslot token such as `"09:00-10:00"`. Lexicographic order doubles
/// as chronological order.
pub type Timeslot = String;

/// A course to be placed, carrying its model-predicted enrollment.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Course {
    pub course_id: CourseId,
    pub course_name: String,
    pub predicted_students: u32,
    /// Slots the course would ideally span. Accepted but not yet used by
    /// placement; reserved for multi-slot reservation.
    pub duration: u32,
}

/// A physical room with a given capacity.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Room {
    pub room_id: RoomId,
    pub capacity: u32,
}

/// One placement result per input course. A course that could not be
/// placed keeps null room and timeslot rather than being dropped.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Assignment {
    pub course_id: CourseId,
    pub course_name: String,
    pub room_id: Option<RoomId>,
    pub timeslot: Option<Timeslot>,
    pub predicted_students: u32,
}

impl Assignment {
    pub fn is_assigned(&self) -> bool {
        self.room_id.is_some()
    }
}

/// The complete input for one assignment run.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssignmentInput {
    pub courses: Vec<Course>,
    pub rooms: Vec<Room>,
    pub timeslots: Vec<Timeslot>,
}

/// The final output of the engine.
#[derive(Debug, Clone, Serialize)]
pub struct AssignmentOutput {
    pub assignments: Vec<Assignment>,
    pub assigned: usize,
    pub unassigned: usize,
}

impl AssignmentOutput {
    pub fn new(assignments: Vec<Assignment>) -> Self {
        let assigned = assignments.iter().filter(|a| a.is_assigned()).count();
        let unassigned = assignments.len() - assigned;
        Self {
            assignments,
            assigned,
            unassigned,
        }
    }
}

/// A raw course row as produced by the data generator, before prediction.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CourseRecord {
    pub course_id: CourseId,
    pub course_name: String,
    pub instructor: String,
    /// `"UG"` or `"PG"`.
    pub course_level: String,
    pub duration: u32,
    /// JSON-encoded list of past enrollment counts, e.g. `"[55, 61, 58]"`.
    pub historical_enrollment: String,
    /// Department's own enrollment estimate, used as the prediction target.
    pub expected_students: u32,
}

/// A past offering of a course, one row per term.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistoricalInstance {
    pub course_id: CourseId,
    pub term: String,
    pub day_of_week: String,
    pub timeslot: Timeslot,
    pub enrolled: u32,
}
