use crate::aggregate::{self, RegionFilter};
use crate::errors::AppError;
use crate::models::{RegionsResponse, SummaryResponse, ViewQuery, ViewResponse};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(&state.records, state.cutoff))
}

/// The one recomputation entry point: maps the page's (series, region)
/// selection to the matching series plus the conclusion text.
pub async fn get_view(
    State(state): State<AppState>,
    Query(query): Query<ViewQuery>,
) -> Result<Json<ViewResponse>, AppError> {
    let filter = RegionFilter::parse(query.region.as_deref().unwrap_or("all"));
    let series = match query.series.as_deref().unwrap_or("daily") {
        "daily" => vec![aggregate::daily_series(&state.records, &filter)?],
        "cumulative" => aggregate::cumulative_series(&state.records, &filter)?,
        other => {
            return Err(AppError::bad_request(format!(
                "series must be 'daily' or 'cumulative', got '{other}'"
            )));
        }
    };

    let summary = aggregate::summary(&state.records, state.cutoff)?;
    Ok(Json(ViewResponse {
        series,
        conclusion: aggregate::conclusion(&summary),
    }))
}

pub async fn get_summary(
    State(state): State<AppState>,
) -> Result<Json<SummaryResponse>, AppError> {
    let stats = aggregate::summary(&state.records, state.cutoff)?;
    Ok(Json(SummaryResponse {
        mean_before: stats.mean_before,
        mean_after: stats.mean_after,
        percent_change_first_to_last: stats.percent_change_first_to_last,
        first_date: stats.first_date,
        last_date: stats.last_date,
        conclusion: aggregate::conclusion(&stats),
    }))
}

pub async fn get_regions(State(state): State<AppState>) -> Json<RegionsResponse> {
    let mut regions: Vec<String> = state
        .records
        .iter()
        .filter_map(|record| record.region.clone())
        .collect();
    regions.sort();
    regions.dedup();
    Json(RegionsResponse { regions })
}
