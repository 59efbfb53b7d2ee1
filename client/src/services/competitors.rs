//! Competitor research for the selected business

use shared::{Business, Competitor, Notification, Paginated, COMPETITORS_PER_PAGE};

use crate::api::CompetitorApi;

/// Paged view over a business' competitors
pub struct CompetitorResearch<A> {
    api: A,
    business: Business,
    page: u32,
    current: Option<Paginated<Competitor>>,
}

impl<A: CompetitorApi> CompetitorResearch<A> {
    pub fn new(api: A, business: Business) -> Self {
        Self {
            api,
            business,
            page: 1,
            current: None,
        }
    }

    pub fn business(&self) -> &Business {
        &self.business
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn competitors(&self) -> &[Competitor] {
        self.current.as_ref().map(|p| p.results.as_slice()).unwrap_or(&[])
    }

    pub fn total_pages(&self) -> u32 {
        self.current
            .as_ref()
            .map(|p| p.total_pages(COMPETITORS_PER_PAGE))
            .unwrap_or(1)
    }

    pub fn has_next(&self) -> bool {
        self.current.as_ref().is_some_and(|p| p.has_next())
    }

    pub fn has_previous(&self) -> bool {
        self.current.as_ref().is_some_and(|p| p.has_previous())
    }

    /// Fetch `page` (1-based); the previous page stays on failure
    pub async fn load_page(&mut self, page: u32) -> Option<Notification> {
        let page = page.max(1);
        match self.api.list_competitors(self.business.id, page).await {
            Ok(result) => {
                tracing::debug!(business_id = self.business.id, page, count = result.count, "loaded competitors");
                self.page = page;
                self.current = Some(result);
                None
            }
            Err(e) => {
                tracing::error!("Error fetching competitors: {}", e);
                Some(e.to_notification("Failed to load competitors."))
            }
        }
    }

    pub async fn next(&mut self) -> Option<Notification> {
        if !self.has_next() {
            return None;
        }
        self.load_page(self.page + 1).await
    }

    pub async fn previous(&mut self) -> Option<Notification> {
        if !self.has_previous() {
            return None;
        }
        self.load_page(self.page.saturating_sub(1)).await
    }

    /// Research new competitors, then show the first page
    pub async fn generate(&mut self) -> Notification {
        match self.api.generate_competitors(&self.business).await {
            Ok(found) => {
                tracing::info!(business_id = self.business.id, count = found.len(), "generated competitors");
                if let Some(failure) = self.load_page(1).await {
                    return failure;
                }
                Notification::success(
                    "Competitor research complete",
                    format!("Found {} competitors.", found.len()),
                )
            }
            Err(e) => {
                tracing::error!("Error generating competitors: {}", e);
                e.to_notification("Failed to generate competitors.")
            }
        }
    }

    pub async fn delete(&mut self, id: i64) -> Notification {
        match self.api.delete_competitor(id).await {
            Ok(()) => {
                tracing::info!(competitor_id = id, "competitor deleted");
                // Stay in range if the last entry on the last page went away
                let page = if self.competitors().len() <= 1 {
                    self.page.saturating_sub(1).max(1)
                } else {
                    self.page
                };
                if let Some(failure) = self.load_page(page).await {
                    return failure;
                }
                Notification::success("Success", "Competitor removed.")
            }
            Err(e) => {
                tracing::error!("Error deleting competitor: {}", e);
                e.to_notification("Failed to delete competitor.")
            }
        }
    }

    /// Remove every competitor stored for the business
    pub async fn clear(&mut self) -> Notification {
        match self.api.delete_competitors_for(self.business.id).await {
            Ok(()) => {
                tracing::info!(business_id = self.business.id, "competitors cleared");
                self.page = 1;
                self.current = None;
                Notification::success("Success", "All competitors removed.")
            }
            Err(e) => {
                tracing::error!("Error clearing competitors: {}", e);
                e.to_notification("Failed to delete competitors.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, ApiResult};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use shared::{GrowthTrend, Stage};
    use std::sync::Mutex;

    fn business() -> Business {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Business {
            id: 7,
            name: "Acme".to_string(),
            industry: "Software".to_string(),
            description: "Planning tools".to_string(),
            long_description: String::new(),
            stage: Stage::Mvp,
            stage_description: String::new(),
            funding_amount: Decimal::ZERO,
            team_size: 2,
            founding_date: None,
            created_at: at,
            updated_at: at,
            user_id: None,
        }
    }

    fn competitor(id: i64) -> Competitor {
        Competitor {
            id,
            business: 7,
            name: format!("Rival {}", id),
            industry: "Software".to_string(),
            product: None,
            market_share: Decimal::new(125, 1),
            strengths: vec![],
            weaknesses: vec![],
            customer_reviews: 4,
            growth_trend: GrowthTrend::Steady,
            website: None,
        }
    }

    /// Server-side paging over an in-memory list
    #[derive(Default)]
    struct FakeApi {
        stored: Mutex<Vec<Competitor>>,
        fail_generate: bool,
    }

    #[async_trait]
    impl CompetitorApi for FakeApi {
        async fn list_competitors(&self, _business_id: i64, page: u32) -> ApiResult<Paginated<Competitor>> {
            let stored = self.stored.lock().unwrap();
            let per = COMPETITORS_PER_PAGE as usize;
            let start = (page as usize - 1) * per;
            if start > 0 && start >= stored.len() {
                return Err(ApiError::from_response(404, r#"{"detail": "Invalid page."}"#));
            }
            let results: Vec<_> = stored.iter().skip(start).take(per).cloned().collect();
            Ok(Paginated {
                results,
                count: stored.len() as u64,
                next: (start + per < stored.len()).then(|| format!("?page={}", page + 1)),
                previous: (page > 1).then(|| format!("?page={}", page - 1)),
            })
        }

        async fn generate_competitors(&self, _business: &Business) -> ApiResult<Vec<Competitor>> {
            if self.fail_generate {
                return Err(ApiError::from_response(503, r#"{"error": "Research service unavailable"}"#));
            }
            let new: Vec<_> = (1..=4).map(competitor).collect();
            self.stored.lock().unwrap().extend(new.clone());
            Ok(new)
        }

        async fn delete_competitor(&self, id: i64) -> ApiResult<()> {
            self.stored.lock().unwrap().retain(|c| c.id != id);
            Ok(())
        }

        async fn delete_competitors_for(&self, _business_id: i64) -> ApiResult<()> {
            self.stored.lock().unwrap().clear();
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_generate_then_page_through() {
        let mut research = CompetitorResearch::new(FakeApi::default(), business());
        let note = research.generate().await;
        assert!(!note.is_failure());
        assert_eq!(note.description, "Found 4 competitors.");

        assert_eq!(research.total_pages(), 2);
        assert_eq!(research.competitors().len(), 3);
        assert!(research.has_next());
        assert!(!research.has_previous());

        assert!(research.next().await.is_none());
        assert_eq!(research.page(), 2);
        assert_eq!(research.competitors().len(), 1);
        assert!(!research.has_next());

        // No further page
        assert!(research.next().await.is_none());
        assert_eq!(research.page(), 2);

        research.previous().await;
        assert_eq!(research.page(), 1);
    }

    #[tokio::test]
    async fn test_deleting_last_entry_steps_back() {
        let mut research = CompetitorResearch::new(FakeApi::default(), business());
        research.generate().await;
        research.next().await;

        let note = research.delete(4).await;
        assert!(!note.is_failure());
        assert_eq!(research.page(), 1);
        assert_eq!(research.total_pages(), 1);
    }

    #[tokio::test]
    async fn test_generate_failure_surfaces_message() {
        let api = FakeApi {
            fail_generate: true,
            ..Default::default()
        };
        let mut research = CompetitorResearch::new(api, business());
        let note = research.generate().await;
        assert!(note.is_failure());
        assert_eq!(note.description, "Research service unavailable");
        assert!(research.competitors().is_empty());
    }

    #[tokio::test]
    async fn test_clear_resets_pager() {
        let mut research = CompetitorResearch::new(FakeApi::default(), business());
        research.generate().await;
        research.clear().await;
        assert!(research.competitors().is_empty());
        assert_eq!(research.total_pages(), 1);
        assert_eq!(research.page(), 1);
    }
}
