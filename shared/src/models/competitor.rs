//! Competitor research models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of competitors per page of research results
pub const COMPETITORS_PER_PAGE: u32 = 3;

/// Direction a competitor's market position is moving
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum GrowthTrend {
    Steady,
    Increasing,
    Decreasing,
}

impl std::fmt::Display for GrowthTrend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            GrowthTrend::Steady => "Steady",
            GrowthTrend::Increasing => "Increasing",
            GrowthTrend::Decreasing => "Decreasing",
        };
        f.write_str(label)
    }
}

/// One strength or weakness entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompetitorPoint {
    pub description: String,
}

/// A researched rival of one business
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Competitor {
    pub id: i64,
    /// Owning business id
    pub business: i64,
    pub name: String,
    pub industry: String,
    #[serde(default)]
    pub product: Option<String>,
    /// Percentage in 0..=100, two decimal places
    pub market_share: Decimal,
    #[serde(default)]
    pub strengths: Vec<CompetitorPoint>,
    #[serde(default)]
    pub weaknesses: Vec<CompetitorPoint>,
    /// Review score out of five
    pub customer_reviews: u8,
    pub growth_trend: GrowthTrend,
    #[serde(default)]
    pub website: Option<String>,
}

impl Competitor {
    /// Filled and empty stars for a five-star review display
    pub fn review_stars(&self) -> (u8, u8) {
        let filled = self.customer_reviews.min(5);
        (filled, 5 - filled)
    }
}
