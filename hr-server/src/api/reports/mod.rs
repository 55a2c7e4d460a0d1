//! HR reports API

mod handler;

use axum::Router;
use axum::routing::get;

use super::gated;
use crate::auth::Route;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/reports/attendance",
            gated(get(handler::attendance), Route::ReportAttendance),
        )
        .route("/reports/leaves", gated(get(handler::leaves), Route::ReportLeaves))
        .route(
            "/reports/employees",
            gated(get(handler::employees), Route::ReportEmployees),
        )
}
