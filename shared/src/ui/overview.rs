//! Display helpers for the startup overview card

use rust_decimal::prelude::ToPrimitive;

use crate::models::{Business, Stage};

/// Progress through the four stages, as a percentage (Idea = 25)
pub fn stage_percentage(stage: Stage) -> f64 {
    (stage.index() + 1) as f64 / Stage::ALL.len() as f64 * 100.0
}

/// Compact number with one decimal and a K/M/B suffix
pub fn format_compact(num: f64) -> String {
    if num >= 1_000_000_000.0 {
        format!("{:.1}B", num / 1_000_000_000.0)
    } else if num >= 1_000_000.0 {
        format!("{:.1}M", num / 1_000_000.0)
    } else if num >= 1_000.0 {
        format!("{:.1}K", num / 1_000.0)
    } else {
        num.to_string()
    }
}

/// Headline figures for the overview card
#[derive(Debug, Clone, PartialEq)]
pub struct OverviewFigures {
    pub funding: String,
    pub team_size: String,
    pub stage_percent: f64,
    pub founded: Option<String>,
}

impl OverviewFigures {
    pub fn of(business: &Business) -> Self {
        let funding = business.funding_amount.to_f64().unwrap_or(0.0);
        Self {
            funding: format!("${}", format_compact(funding)),
            team_size: format_compact(f64::from(business.team_size)),
            stage_percent: stage_percentage(business.stage),
            founded: business.founding_date.map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_support::business;
    use rust_decimal::Decimal;

    #[test]
    fn test_stage_percentage() {
        assert_eq!(stage_percentage(Stage::Idea), 25.0);
        assert_eq!(stage_percentage(Stage::Mvp), 50.0);
        assert_eq!(stage_percentage(Stage::Maturity), 100.0);
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(999.0), "999");
        assert_eq!(format_compact(1_500.0), "1.5K");
        assert_eq!(format_compact(2_000_000.0), "2.0M");
        assert_eq!(format_compact(3_260_000_000.0), "3.3B");
    }

    #[test]
    fn test_overview_figures() {
        let mut b = business(1, "Acme");
        b.funding_amount = Decimal::new(250_000, 0);
        b.team_size = 12;
        b.stage = Stage::Growth;

        let figures = OverviewFigures::of(&b);
        assert_eq!(figures.funding, "$250.0K");
        assert_eq!(figures.team_size, "12");
        assert_eq!(figures.stage_percent, 75.0);
        assert_eq!(figures.founded.as_deref(), Some("2021-06-01"));
    }
}
