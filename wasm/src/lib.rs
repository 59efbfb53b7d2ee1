//! WebAssembly module for the Startup Planner front end
//!
//! Provides client-side logic for:
//! - Business switcher filtering
//! - Business form and payment card validation
//! - Overview card figures
//! - Selected business and preferences persisted in `localStorage`

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::ui::{filter_businesses, format_compact, stage_percentage, BusinessFormValues};
use shared::{
    is_valid_card_number, is_valid_cvc, is_valid_expiry_on, AccountData, Business,
    KeyValueStore, Language, Preferences, SelectionStore, Stage, Theme,
};
use wasm_bindgen::prelude::*;

mod storage;

pub use storage::{browser_store, LocalStorage};

fn js_error(context: &str, err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, err))
}

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str("startup planner module loaded"));
}

/// Entry in the switcher list
#[derive(Serialize)]
struct SelectorEntry<'a> {
    id: i64,
    name: &'a str,
}

/// Filter a JSON business list by name; returns `[{id, name}]`
#[wasm_bindgen]
pub fn filter_business_list(businesses_json: &str, query: &str) -> Result<String, JsValue> {
    let businesses: Vec<Business> = serde_json::from_str(businesses_json)
        .map_err(|e| js_error("Invalid businesses JSON", e))?;
    let entries: Vec<_> = filter_businesses(&businesses, query)
        .into_iter()
        .map(|b| SelectorEntry { id: b.id, name: &b.name })
        .collect();
    serde_json::to_string(&entries).map_err(|e| js_error("Serialization failed", e))
}

/// Validate business form values; returns a JSON object of field messages (empty when valid)
#[wasm_bindgen]
pub fn validate_business_form(values_json: &str) -> Result<String, JsValue> {
    let values: BusinessFormValues = serde_json::from_str(values_json)
        .map_err(|e| js_error("Invalid form JSON", e))?;
    let errors = values.check().err().unwrap_or_default();
    serde_json::to_string(&errors).map_err(|e| js_error("Serialization failed", e))
}

#[wasm_bindgen]
pub fn check_card_number(card_number: &str) -> bool {
    is_valid_card_number(card_number)
}

/// `MM/YY` expiry against the browser's current date
#[wasm_bindgen]
pub fn check_card_expiry(expiry: &str) -> bool {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .is_some_and(|today| is_valid_expiry_on(expiry, today))
}

#[wasm_bindgen]
pub fn check_card_cvc(cvc: &str) -> bool {
    is_valid_cvc(cvc)
}

/// Stage progress percentage; unknown stages count as zero
#[wasm_bindgen]
pub fn stage_progress(stage: &str) -> f64 {
    Stage::from_str(stage).map(stage_percentage).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn format_compact_number(num: f64) -> String {
    format_compact(num)
}

/// Funding amount as sent by the API (decimal string) to "$1.5K" form
#[wasm_bindgen]
pub fn format_funding(amount: &str) -> Result<String, JsValue> {
    let amount = Decimal::from_str(amount.trim()).map_err(|e| js_error("Invalid amount", e))?;
    Ok(format!("${}", format_compact(amount.to_f64().unwrap_or(0.0))))
}

/// Avatar fallback text for a display name
#[wasm_bindgen]
pub fn avatar_initials(display_name: &str) -> String {
    AccountData {
        display_name: display_name.to_string(),
        ..Default::default()
    }
    .fallback_initials()
}

/// The selected business, mirrored to `localStorage`
#[wasm_bindgen]
pub struct BusinessSelection {
    inner: SelectionStore<Box<dyn KeyValueStore>>,
}

#[wasm_bindgen]
impl BusinessSelection {
    #[wasm_bindgen(constructor)]
    pub fn new() -> BusinessSelection {
        Self {
            inner: SelectionStore::open(browser_store()),
        }
    }

    /// Selected business as JSON, if any
    pub fn selected_json(&self) -> Option<String> {
        self.inner
            .selected()
            .and_then(|b| serde_json::to_string(b).ok())
    }

    pub fn select_json(&mut self, business_json: &str) -> Result<(), JsValue> {
        let business: Business = serde_json::from_str(business_json)
            .map_err(|e| js_error("Invalid business JSON", e))?;
        self.inner.set_selected(Some(business));
        Ok(())
    }

    pub fn clear(&mut self) {
        self.inner.set_selected(None);
    }

    /// False when selections only last for this page
    pub fn is_persistent(&self) -> bool {
        self.inner.is_durable()
    }
}

impl Default for BusinessSelection {
    fn default() -> Self {
        Self::new()
    }
}

/// Theme and language, mirrored to `localStorage`
#[wasm_bindgen]
pub struct UserPreferences {
    inner: Preferences<Box<dyn KeyValueStore>>,
}

#[wasm_bindgen]
impl UserPreferences {
    #[wasm_bindgen(constructor)]
    pub fn new() -> UserPreferences {
        Self {
            inner: Preferences::open(browser_store()),
        }
    }

    pub fn theme(&self) -> String {
        self.inner.theme().as_str().to_string()
    }

    pub fn is_dark(&self) -> bool {
        self.inner.is_dark()
    }

    /// Returns false for an unknown theme
    pub fn set_theme(&mut self, theme: &str) -> bool {
        match Theme::from_str(theme) {
            Some(theme) => {
                self.inner.set_theme(theme);
                true
            }
            None => false,
        }
    }

    pub fn language(&self) -> String {
        self.inner.language().code().to_string()
    }

    /// Returns false for an unsupported language code
    pub fn set_language(&mut self, code: &str) -> bool {
        match Language::from_code(code) {
            Some(language) => {
                self.inner.set_language(language);
                true
            }
            None => false,
        }
    }
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUSINESSES: &str = r#"[
        {"id": 1, "name": "Business 1", "industry": "Software", "description": "A",
         "stage": "Idea", "funding_amount": "0.00", "team_size": 1,
         "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:00:00Z"},
        {"id": 2, "name": "Business 2", "industry": "Retail", "description": "B",
         "stage": "MVP", "funding_amount": "1500.00", "team_size": 3,
         "created_at": "2024-01-01T00:00:00Z", "updated_at": "2024-01-01T00:00:00Z"}
    ]"#;

    #[test]
    fn test_filter_business_list() {
        let filtered = filter_business_list(BUSINESSES, "2").unwrap();
        assert_eq!(filtered, r#"[{"id":2,"name":"Business 2"}]"#);

        let all = filter_business_list(BUSINESSES, "").unwrap();
        assert!(all.contains("Business 1") && all.contains("Business 2"));
    }

    #[test]
    fn test_validate_business_form() {
        let errors = validate_business_form(r#"{"name": "", "team_size": 0}"#).unwrap();
        assert!(errors.contains("Business name is required"));
        assert!(errors.contains("Team size must be a positive integer"));

        let ok = validate_business_form(
            r#"{"name": "Acme", "industry": "Retail", "description": "Shops", "stage": "MVP"}"#,
        )
        .unwrap();
        assert_eq!(ok, "{}");
    }

    #[test]
    fn test_card_checks() {
        assert!(check_card_number("4242 4242 4242 4242"));
        assert!(!check_card_number("4242 4242 4242 4243"));
        assert!(check_card_cvc("123"));
        assert!(!check_card_cvc("12a"));
    }

    #[test]
    fn test_overview_helpers() {
        assert_eq!(stage_progress("MVP"), 50.0);
        assert_eq!(stage_progress("Unicorn"), 0.0);
        assert_eq!(format_compact_number(1_500.0), "1.5K");
        assert_eq!(format_funding("2500000.00").unwrap(), "$2.5M");
        assert_eq!(avatar_initials("Ada Lovelace"), "AE");
    }
}
