use crate::data::{CourseRecord, HistoricalInstance, Room, Timeslot};
use itertools::Itertools;
use log::info;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::StandardNormal;

const SUBJECTS: [&str; 10] = [
    "Calc", "Data", "Algo", "Econ", "Mgmt", "Stat", "AI", "Networks", "Sys", "Opt",
];
const SURNAMES: [&str; 10] = [
    "Singh", "Kumar", "Mehta", "Schultz", "Jansen", "Garcia", "Smith", "Lee", "Ng", "Patel",
];
const DAYS: [&str; 5] = ["Mon", "Tue", "Wed", "Thu", "Fri"];
const TERMS: [&str; 3] = ["T2022", "T2023", "T2024"];

const CAPACITIES: [u32; 6] = [20, 30, 40, 60, 80, 100];
const CAPACITY_WEIGHTS: [f64; 6] = [0.2, 0.25, 0.25, 0.15, 0.1, 0.05];

/// A complete synthetic campus: course catalog, room inventory and three
/// terms of historical offerings.
#[derive(Debug, Clone)]
pub struct SyntheticDataset {
    pub courses: Vec<CourseRecord>,
    pub rooms: Vec<Room>,
    pub history: Vec<HistoricalInstance>,
}

/// Hourly teaching slots, 08:00 through 16:00.
pub fn timeslots() -> Vec<Timeslot> {
    (0..8)
        .map(|i| format!("{:02}:00-{:02}:00", 8 + i, 9 + i))
        .collect()
}

/// Generates a seeded synthetic dataset; the same seed always yields the
/// same campus.
pub fn generate(num_courses: usize, num_rooms: usize, seed: u64) -> SyntheticDataset {
    info!(
        "Generating synthetic dataset: {} courses, {} rooms (seed {})",
        num_courses, num_rooms, seed
    );
    let mut rng = StdRng::seed_from_u64(seed);
    let slots = timeslots();

    let mut courses = Vec::with_capacity(num_courses);
    let mut history = Vec::with_capacity(num_courses * TERMS.len());

    for i in 0..num_courses {
        let course_id = format!("C{i:04}");
        let level = if rng.random_bool(0.2) { "PG" } else { "UG" };
        let course_name = format!(
            "{} {}",
            SUBJECTS[rng.random_range(0..SUBJECTS.len())],
            rng.random_range(100..499)
        );
        let instructor = format!("Dr. {}", SURNAMES[rng.random_range(0..SURNAMES.len())]);
        let duration = if rng.random_bool(0.15) { 2 } else { 1 };

        // PG seminars run much smaller than UG lectures
        let level_mean = if level == "UG" { 60.0 } else { 25.0 };
        let base = jitter(&mut rng, level_mean, 15.0).clamp(5.0, 200.0);

        let past: Vec<u32> = (0..TERMS.len())
            .map(|_| jitter(&mut rng, base, base.sqrt()).round().max(1.0) as u32)
            .collect();
        let expected = jitter(&mut rng, base, base * 0.15).round().max(1.0) as u32;

        for term in TERMS {
            history.push(HistoricalInstance {
                course_id: course_id.clone(),
                term: term.to_string(),
                day_of_week: DAYS[rng.random_range(0..DAYS.len())].to_string(),
                timeslot: slots[rng.random_range(0..slots.len())].clone(),
                enrolled: jitter(&mut rng, base, 10.0).round().max(1.0) as u32,
            });
        }

        courses.push(CourseRecord {
            course_id,
            course_name,
            instructor,
            course_level: level.to_string(),
            duration,
            historical_enrollment: format!("[{}]", past.iter().join(", ")),
            expected_students: expected,
        });
    }

    // static weights, always valid
    let capacity_dist = WeightedIndex::new(CAPACITY_WEIGHTS).unwrap();
    let rooms = (0..num_rooms)
        .map(|j| Room {
            room_id: format!("R{j:03}"),
            capacity: CAPACITIES[capacity_dist.sample(&mut rng)],
        })
        .collect();

    SyntheticDataset {
        courses,
        rooms,
        history,
    }
}

fn jitter(rng: &mut StdRng, mean: f64, std_dev: f64) -> f64 {
    let z: f64 = rng.sample(StandardNormal);
    mean + std_dev * z
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_match_request() {
        let dataset = generate(25, 8, 123);
        assert_eq!(dataset.courses.len(), 25);
        assert_eq!(dataset.rooms.len(), 8);
        assert_eq!(dataset.history.len(), 25 * 3);
    }

    #[test]
    fn same_seed_same_campus() {
        let a = generate(10, 4, 42);
        let b = generate(10, 4, 42);
        for (x, y) in a.courses.iter().zip(&b.courses) {
            assert_eq!(x.course_name, y.course_name);
            assert_eq!(x.expected_students, y.expected_students);
            assert_eq!(x.historical_enrollment, y.historical_enrollment);
        }
        for (x, y) in a.rooms.iter().zip(&b.rooms) {
            assert_eq!(x.capacity, y.capacity);
        }
    }

    #[test]
    fn room_capacities_come_from_the_pool() {
        let dataset = generate(5, 50, 7);
        for room in &dataset.rooms {
            assert!(CAPACITIES.contains(&room.capacity), "{}", room.capacity);
        }
    }

    #[test]
    fn history_is_valid_json_enrollment() {
        let dataset = generate(20, 2, 99);
        for course in &dataset.courses {
            let parsed: Vec<u32> =
                serde_json::from_str(&course.historical_enrollment).expect("valid JSON list");
            assert_eq!(parsed.len(), 3);
            assert!(parsed.iter().all(|&e| e >= 1));
        }
    }

    #[test]
    fn timeslots_are_hourly_and_sorted() {
        let slots = timeslots();
        assert_eq!(slots.len(), 8);
        assert_eq!(slots[0], "08:00-09:00");
        assert_eq!(slots[7], "15:00-16:00");
        let mut sorted = slots.clone();
        sorted.sort();
        assert_eq!(slots, sorted);
    }

    #[test]
    fn positive_sizes_everywhere() {
        let dataset = generate(40, 10, 5);
        assert!(dataset.courses.iter().all(|c| c.expected_students >= 1));
        assert!(dataset.courses.iter().all(|c| c.duration >= 1));
        assert!(dataset.rooms.iter().all(|r| r.capacity >= 20));
        assert!(dataset.history.iter().all(|h| h.enrolled >= 1));
    }
}
