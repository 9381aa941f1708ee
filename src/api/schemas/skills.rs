use crate::services::skill_service::Pagination;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub struct SkillsQuery {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl From<SkillsQuery> for Pagination {
    fn from(query: SkillsQuery) -> Self {
        Self { page: query.page, per_page: query.per_page }
    }
}
