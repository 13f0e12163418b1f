// handlers/rankings.rs - GET /api/rankings handler

use axum::extract::{rejection::QueryRejection, Query, State};
use serde::{Deserialize, Serialize};

use crate::api::{ApiResponse, ApiResult};
use crate::models::{GameFormat, RankingEntry};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RankingsQuery {
    /// rapid (default), blitz or bullet
    #[serde(default)]
    pub format: GameFormat,
}

#[derive(Debug, Serialize)]
pub struct RankingsBody {
    pub format: GameFormat,
    pub count: usize,
    pub rankings: Vec<RankingEntry>,
}

pub async fn get(
    State(state): State<AppState>,
    query: Result<Query<RankingsQuery>, QueryRejection>,
) -> ApiResult<RankingsBody> {
    let Query(query) = query?;
    let rankings = state.roster.rankings(query.format).await?;

    Ok(ApiResponse::success(RankingsBody {
        format: query.format,
        count: rankings.len(),
        rankings,
    }))
}
