//! Business models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Lifecycle stage of a business, in progression order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Stage {
    #[default]
    Idea,
    #[serde(rename = "MVP")]
    Mvp,
    Growth,
    Maturity,
}

impl Stage {
    pub const ALL: [Stage; 4] = [Stage::Idea, Stage::Mvp, Stage::Growth, Stage::Maturity];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Idea => "Idea",
            Stage::Mvp => "MVP",
            Stage::Growth => "Growth",
            Stage::Maturity => "Maturity",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Idea" => Some(Stage::Idea),
            "MVP" => Some(Stage::Mvp),
            "Growth" => Some(Stage::Growth),
            "Maturity" => Some(Stage::Maturity),
            _ => None,
        }
    }

    /// Zero-based position in [`Stage::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional text columns are blank strings on the API, never null
fn blank_if_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A startup being planned, as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Business {
    pub id: i64,
    pub name: String,
    pub industry: String,
    pub description: String,
    #[serde(default, deserialize_with = "blank_if_null")]
    pub long_description: String,
    pub stage: Stage,
    #[serde(default, deserialize_with = "blank_if_null")]
    pub stage_description: String,
    pub funding_amount: Decimal,
    pub team_size: u32,
    #[serde(default)]
    pub founding_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Owner; the API hides it on some deployments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
}

impl Business {
    /// Overwrite the editable fields, keeping identity and audit fields
    pub fn merge(&self, changes: NewBusiness) -> Business {
        Business {
            id: self.id,
            name: changes.name,
            industry: changes.industry,
            description: changes.description,
            long_description: changes.long_description,
            stage: changes.stage,
            stage_description: changes.stage_description,
            funding_amount: changes.funding_amount,
            team_size: changes.team_size,
            founding_date: changes.founding_date,
            created_at: self.created_at,
            updated_at: self.updated_at,
            user_id: self.user_id,
        }
    }
}

/// Create-time payload: a business without server-assigned fields
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewBusiness {
    pub name: String,
    pub industry: String,
    pub description: String,
    #[serde(default, deserialize_with = "blank_if_null")]
    pub long_description: String,
    pub stage: Stage,
    #[serde(default, deserialize_with = "blank_if_null")]
    pub stage_description: String,
    pub funding_amount: Decimal,
    pub team_size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub founding_date: Option<NaiveDate>,
}

impl From<&Business> for NewBusiness {
    fn from(business: &Business) -> Self {
        Self {
            name: business.name.clone(),
            industry: business.industry.clone(),
            description: business.description.clone(),
            long_description: business.long_description.clone(),
            stage: business.stage,
            stage_description: business.stage_description.clone(),
            funding_amount: business.funding_amount,
            team_size: business.team_size,
            founding_date: business.founding_date,
        }
    }
}
