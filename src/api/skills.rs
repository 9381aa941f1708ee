use crate::api::AppState;
use crate::api::schemas::skills::SkillsQuery;
use crate::domain::skill::Skill;
use axum::{
    Json,
    extract::{Query, State},
};

/// Lists the portfolio's skills, optionally paginated with `page`/`per_page`.
pub async fn list_skills(State(state): State<AppState>, Query(query): Query<SkillsQuery>) -> Json<Vec<Skill>> {
    Json(state.skill_service.list(query.into()).await)
}
