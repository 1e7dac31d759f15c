//! Dashboard statistics route.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use domain::services::StatsAggregator;
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::metrics::record_stats_computation;
use persistence::repositories::DashboardRepository;

/// GET /api/v1/dashboard/stats
///
/// Compute period-comparison statistics for the admin dashboard. The
/// evaluation instant is taken here, at the boundary, so the aggregator
/// itself stays deterministic.
pub async fn get_dashboard_stats(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let aggregator = StatsAggregator::new(DashboardRepository::new(state.pool.clone()));

    let start = std::time::Instant::now();
    let stats = aggregator.compute(Utc::now()).await?;
    record_stats_computation(start.elapsed().as_secs_f64());

    info!(
        total_sales = %stats.total_sales,
        active_users = stats.active_users,
        pending_orders = stats.new_orders,
        "Computed dashboard statistics"
    );

    Ok((StatusCode::OK, Json(stats)))
}

#[cfg(test)]
mod tests {
    use domain::models::DashboardStats;

    #[test]
    fn test_dashboard_stats_response_serialization() {
        let stats = DashboardStats::default();
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("totalSales"));
        assert!(json.contains("orderCompletion"));
    }
}
