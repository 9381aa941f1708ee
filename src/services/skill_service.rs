use crate::domain::skill::Skill;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_PER_PAGE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    pub page: Option<usize>,
    pub per_page: Option<usize>,
}

impl Pagination {
    /// Zero-based `(offset, limit)`, or `None` when the whole list is wanted.
    fn window(self) -> Option<(usize, usize)> {
        if self.page.is_none() && self.per_page.is_none() {
            return None;
        }
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(DEFAULT_PER_PAGE).max(1);
        Some(((page - 1).saturating_mul(per_page), per_page))
    }
}

/// Serves the portfolio's skill list.
#[derive(Clone, Debug)]
pub struct SkillService {
    catalog: Arc<[Skill]>,
    delay: Duration,
}

impl SkillService {
    #[must_use]
    pub fn new(catalog: Vec<Skill>, delay: Duration) -> Self {
        Self { catalog: catalog.into(), delay }
    }

    /// Returns the requested page of skills after the configured delay.
    #[tracing::instrument(skip(self), fields(delay_ms = %self.delay.as_millis()))]
    pub async fn list(&self, pagination: Pagination) -> Vec<Skill> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        match pagination.window() {
            None => self.catalog.to_vec(),
            Some((offset, limit)) => self.catalog.iter().skip(offset).take(limit).cloned().collect(),
        }
    }
}
