use crate::data::{Assignment, Course, Room, Timeslot};
use itertools::Itertools;
use log::{info, trace};
use std::collections::{BTreeSet, HashMap};

/// Greedy room assignment:
/// - place largest predicted courses first (stable on ties)
/// - prefer the smallest room with enough capacity
/// - take the earliest free timeslot of that room
///
/// Every input course yields exactly one output record, in processing
/// order; infeasible courses come back with null room and timeslot.
pub fn assign(courses: &[Course], rooms: &[Room], timeslots: &[Timeslot]) -> Vec<Assignment> {
    info!(
        "Assigning {} courses to {} rooms over {} timeslots...",
        courses.len(),
        rooms.len(),
        timeslots.len()
    );

    // sort_by is stable, so equal sizes keep their input order
    let mut ordered: Vec<&Course> = courses.iter().collect();
    ordered.sort_by(|a, b| b.predicted_students.cmp(&a.predicted_students));

    // remaining free slots per room; shrinks as assignments land
    let all_slots: BTreeSet<&str> = timeslots.iter().map(String::as_str).collect();
    let mut room_free: HashMap<&str, BTreeSet<&str>> = rooms
        .iter()
        .map(|r| (r.room_id.as_str(), all_slots.clone()))
        .collect();

    let mut assignments = Vec::with_capacity(courses.len());

    for course in ordered {
        let needed = course.predicted_students;

        // candidate rooms with enough capacity, smallest first
        let candidates = rooms
            .iter()
            .filter(|r| r.capacity >= needed)
            .sorted_by_key(|r| r.capacity);

        let mut placed = false;

        for room in candidates {
            let Some(free) = room_free.get_mut(room.room_id.as_str()) else {
                continue;
            };
            // earliest available timeslot of this room
            let Some(&slot) = free.first() else {
                continue;
            };
            free.remove(slot);

            trace!(
                "Course {} ({} students) -> room {} (cap {}) at {}",
                course.course_id, needed, room.room_id, room.capacity, slot
            );
            assignments.push(Assignment {
                course_id: course.course_id.clone(),
                course_name: course.course_name.clone(),
                room_id: Some(room.room_id.clone()),
                timeslot: Some(slot.to_string()),
                predicted_students: needed,
            });
            placed = true;
            break;
        }

        if !placed {
            trace!(
                "Course {} ({} students) could not be placed",
                course.course_id, needed
            );
            assignments.push(Assignment {
                course_id: course.course_id.clone(),
                course_name: course.course_name.clone(),
                room_id: None,
                timeslot: None,
                predicted_students: needed,
            });
        }
    }

    let unplaced = assignments.iter().filter(|a| !a.is_assigned()).count();
    info!(
        "Assignment complete: {} placed, {} unplaced",
        assignments.len() - unplaced,
        unplaced
    );

    assignments
}
