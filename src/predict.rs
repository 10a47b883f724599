use crate::data::{Course, CourseRecord};
use log::{debug, info};

/// Features derived from a raw course row, mirroring what the enrollment
/// model is trained on.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseFeatures {
    pub hist_mean: f64,
    pub hist_len: usize,
    /// UG = 0.0, PG = 1.0.
    pub level: f64,
    pub duration: f64,
}

/// Prediction error against the department's own expected figures.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionMetrics {
    pub mae: f64,
    pub rmse: f64,
}

pub fn featurize(record: &CourseRecord) -> CourseFeatures {
    let history = parse_history(&record.historical_enrollment);
    let hist_len = history.len();
    let hist_mean = if hist_len > 0 {
        history.iter().sum::<u32>() as f64 / hist_len as f64
    } else {
        0.0
    };
    CourseFeatures {
        hist_mean,
        hist_len,
        level: if record.course_level == "PG" { 1.0 } else { 0.0 },
        duration: record.duration as f64,
    }
}

/// Baseline enrollment regressor: the historical mean when any history
/// exists, the department's expected figure otherwise. Always at least 1.
pub fn predict(record: &CourseRecord) -> u32 {
    let features = featurize(record);
    let raw = if features.hist_len > 0 {
        features.hist_mean
    } else {
        record.expected_students as f64
    };
    raw.round().max(1.0) as u32
}

/// Turns raw course rows into engine-ready courses with
/// `predicted_students` filled in.
pub fn attach_predictions(records: &[CourseRecord]) -> Vec<Course> {
    info!("Predicting enrollment for {} courses...", records.len());
    records
        .iter()
        .map(|record| {
            let predicted = predict(record);
            debug!(
                "Course {}: predicted {} (expected {})",
                record.course_id, predicted, record.expected_students
            );
            Course {
                course_id: record.course_id.clone(),
                course_name: record.course_name.clone(),
                predicted_students: predicted,
                duration: record.duration,
            }
        })
        .collect()
}

/// MAE and RMSE of the predictor over the given rows.
pub fn evaluate(records: &[CourseRecord]) -> PredictionMetrics {
    if records.is_empty() {
        return PredictionMetrics { mae: 0.0, rmse: 0.0 };
    }
    let mut abs_sum = 0.0;
    let mut sq_sum = 0.0;
    for record in records {
        let err = predict(record) as f64 - record.expected_students as f64;
        abs_sum += err.abs();
        sq_sum += err * err;
    }
    let n = records.len() as f64;
    PredictionMetrics {
        mae: abs_sum / n,
        rmse: (sq_sum / n).sqrt(),
    }
}

// Malformed history degrades to "no history" rather than failing the run.
fn parse_history(raw: &str) -> Vec<u32> {
    serde_json::from_str(raw).unwrap_or_default()
}
