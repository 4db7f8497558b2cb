use axum::extract::State;
use axum::Json;
use quizbank_db::models::stats::StatsOverview;
use quizbank_db::repositories::StatsRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/stats/overview
pub async fn overview(
    RequireAdmin(_user): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<StatsOverview>>> {
    let stats = StatsRepo::overview(&state.pool).await?;
    Ok(Json(DataResponse { data: stats }))
}
