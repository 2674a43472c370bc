//! Dashboard and analytics handlers
//!
//! All views are derived from a fresh ledger snapshot on every request.

use std::sync::Arc;

use axum::{extract::State, http::HeaderMap, Json};

use crate::{get_user_id, AppError, AppState};
use arth_core::summary::upcoming_payments;
use arth_core::{AnalyticsView, DashboardView, Error, LedgerSnapshot, UpcomingPayment};

/// Load the current user's ledger, mapping a bad user id to 400
fn load_snapshot(state: &AppState, headers: &HeaderMap) -> Result<LedgerSnapshot, AppError> {
    let user_id = get_user_id(headers);
    match state.ledger.load(&user_id) {
        Ok(snapshot) => Ok(snapshot),
        Err(Error::InvalidInput(_)) => Err(AppError::bad_request("Invalid user id")),
        Err(e) => Err(e.into()),
    }
}

/// GET /api/dashboard - Summary, insights, recent expenses, upcoming total
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<DashboardView>, AppError> {
    let snapshot = load_snapshot(&state, &headers)?;
    Ok(Json(DashboardView::from_snapshot(&snapshot, &state.insights)))
}

/// GET /api/analytics - Income/expense totals and category stats
pub async fn get_analytics(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<AnalyticsView>, AppError> {
    let snapshot = load_snapshot(&state, &headers)?;
    Ok(Json(AnalyticsView::from_snapshot(&snapshot)))
}

/// GET /api/upcoming-payments - Pending payments, soonest first
pub async fn get_upcoming_payments(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<UpcomingPayment>>, AppError> {
    let snapshot = load_snapshot(&state, &headers)?;
    Ok(Json(upcoming_payments(&snapshot)))
}
