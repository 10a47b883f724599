use crate::assign;
use crate::data::{AssignmentInput, AssignmentOutput};
use crate::io;
use axum::{Json, Router, routing::post};

async fn assign_handler(
    Json(input): Json<AssignmentInput>,
) -> Result<Json<AssignmentOutput>, (axum::http::StatusCode, String)> {
    if let Err(e) = io::validate(&input) {
        return Err((axum::http::StatusCode::BAD_REQUEST, e.to_string()));
    }
    let assignments = assign::assign(&input.courses, &input.rooms, &input.timeslots);
    Ok(Json(AssignmentOutput::new(assignments)))
}

pub fn router() -> Router {
    Router::new().route("/v1/assignments/solve", post(assign_handler))
}

pub async fn run_server() {
    let app = router();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:8080")
        .await
        .unwrap();

    println!("Server running at http://{}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
