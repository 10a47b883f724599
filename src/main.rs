use course_scheduler::{assign, generate, io, predict, server};
use log::info;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const DEFAULT_DATA_DIR: &str = "data/synthetic";

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();
    let dir = args
        .get(2)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

    match args.get(1).map(String::as_str) {
        Some("generate") => cmd_generate(&dir),
        Some("assign") => cmd_assign(&dir),
        Some("serve") | None => {
            server::run_server().await;
            ExitCode::SUCCESS
        }
        Some(other) => {
            eprintln!("unknown command: {other}");
            eprintln!("usage: course-scheduler [generate|assign|serve] [data-dir]");
            ExitCode::FAILURE
        }
    }
}

fn cmd_generate(dir: &Path) -> ExitCode {
    let dataset = generate::generate(200, 40, 123);
    match io::write_dataset(dir, &dataset) {
        Ok(()) => {
            println!("Dataset generated in: {}", dir.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("generate failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn cmd_assign(dir: &Path) -> ExitCode {
    match run_pipeline(dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("assign failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_pipeline(dir: &Path) -> Result<(), io::DataError> {
    let records = io::load_course_records(&dir.join("courses.csv"))?;
    let rooms = io::load_rooms(&dir.join("rooms.csv"))?;
    let timeslots = io::load_timeslots(&dir.join("historical_instances.csv"))?;

    let courses = predict::attach_predictions(&records);
    let metrics = predict::evaluate(&records);
    info!(
        "Prediction error vs expected enrollment: mae={:.2} rmse={:.2}",
        metrics.mae, metrics.rmse
    );
    io::write_predictions(&dir.join("courses_with_predictions.csv"), &courses)?;

    let assignments = assign::assign(&courses, &rooms, &timeslots);
    io::write_assignments(&dir.join("assignments.csv"), &assignments)?;

    let placed = assignments.iter().filter(|a| a.is_assigned()).count();
    println!(
        "Assigned {placed}/{} courses; results in {}",
        assignments.len(),
        dir.join("assignments.csv").display()
    );
    Ok(())
}
