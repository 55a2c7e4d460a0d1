//! Attendance API

mod handler;

use axum::Router;
use axum::routing::{get, post};

use super::gated;
use crate::auth::Route;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/attendance", gated(get(handler::list), Route::AttendanceList))
        .route(
            "/attendance/checkin",
            gated(post(handler::check_in), Route::AttendanceCheckIn),
        )
        .route(
            "/attendance/checkout",
            gated(post(handler::check_out), Route::AttendanceCheckOut),
        )
        .route(
            "/attendance/today",
            gated(get(handler::today_status), Route::AttendanceToday),
        )
}
