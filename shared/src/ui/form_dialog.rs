//! Create/edit business dialog
//!
//! The dialog only produces validated payloads; persisting them is the
//! caller's job.

use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::models::{Business, NewBusiness, Stage};
use crate::validation::{
    parse_date_input, validate_non_negative_amount, validate_optional_date, FieldErrors,
};

/// Largest team size the API column stores
pub const MAX_TEAM_SIZE: i64 = i32::MAX as i64;

/// Whether the dialog creates a new business or edits an existing one
#[derive(Debug, Clone, PartialEq)]
pub enum FormMode {
    Create,
    Edit(Business),
}

/// Validated output of a successful submit
#[derive(Debug, Clone, PartialEq)]
pub enum FormSubmission {
    Create(NewBusiness),
    Update(Business),
}

/// Raw field values as typed by the user
#[derive(Debug, Clone, PartialEq, Validate, Deserialize)]
#[serde(default)]
pub struct BusinessFormValues {
    #[validate(length(min = 1, message = "Business name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Industry is required"))]
    pub industry: String,
    #[validate(length(min = 1, message = "Business description is required"))]
    pub description: String,
    pub long_description: String,
    pub stage: Stage,
    pub stage_description: String,
    #[validate(custom = "validate_non_negative_amount")]
    pub funding_amount: Decimal,
    #[validate(range(min = 1, message = "Team size must be a positive integer"))]
    pub team_size: i64,
    #[validate(custom = "validate_optional_date")]
    pub founding_date: String,
}

impl Default for BusinessFormValues {
    fn default() -> Self {
        Self {
            name: String::new(),
            industry: String::new(),
            description: String::new(),
            long_description: String::new(),
            stage: Stage::Idea,
            stage_description: String::new(),
            funding_amount: Decimal::ZERO,
            team_size: 1,
            founding_date: String::new(),
        }
    }
}

impl From<&Business> for BusinessFormValues {
    fn from(business: &Business) -> Self {
        Self {
            name: business.name.clone(),
            industry: business.industry.clone(),
            description: business.description.clone(),
            long_description: business.long_description.clone(),
            stage: business.stage,
            stage_description: business.stage_description.clone(),
            funding_amount: business.funding_amount,
            team_size: i64::from(business.team_size),
            founding_date: business
                .founding_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}

fn optional_text(value: &str) -> String {
    if value.trim().is_empty() {
        String::new()
    } else {
        value.to_string()
    }
}

impl BusinessFormValues {
    /// Run every rule, returning per-field messages on failure
    pub fn check(&self) -> Result<(), FieldErrors> {
        let mut errors = match self.validate() {
            Ok(()) => FieldErrors::default(),
            Err(e) => FieldErrors::from(&e),
        };
        if self.team_size > MAX_TEAM_SIZE {
            errors.insert("team_size", "Team size is too large");
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Convert already-validated values into the create payload
    pub fn to_new_business(&self) -> NewBusiness {
        NewBusiness {
            name: self.name.clone(),
            industry: self.industry.clone(),
            description: self.description.clone(),
            long_description: optional_text(&self.long_description),
            stage: self.stage,
            stage_description: optional_text(&self.stage_description),
            funding_amount: self.funding_amount,
            team_size: u32::try_from(self.team_size).unwrap_or_default(),
            founding_date: parse_date_input(&self.founding_date),
        }
    }
}

/// State of the create/edit dialog
#[derive(Debug, Clone)]
pub struct BusinessFormDialog {
    open: bool,
    mode: FormMode,
    values: BusinessFormValues,
    errors: FieldErrors,
}

impl Default for BusinessFormDialog {
    fn default() -> Self {
        Self {
            open: false,
            mode: FormMode::Create,
            values: BusinessFormValues::default(),
            errors: FieldErrors::default(),
        }
    }
}

impl BusinessFormDialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open in `mode`, resetting the fields to that mode's defaults
    pub fn open(&mut self, mode: FormMode) {
        self.values = match &mode {
            FormMode::Create => BusinessFormValues::default(),
            FormMode::Edit(business) => BusinessFormValues::from(business),
        };
        self.mode = mode;
        self.errors = FieldErrors::default();
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn values(&self) -> &BusinessFormValues {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut BusinessFormValues {
        &mut self.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Create New Business",
            FormMode::Edit(_) => "Edit Business",
        }
    }

    pub fn description(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Enter details for your new business.",
            FormMode::Edit(_) => "Make changes to your business details here.",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Create Business",
            FormMode::Edit(_) => "Save changes",
        }
    }

    /// Validate and produce a payload; on failure the field errors are kept
    pub fn submit(&mut self) -> Option<FormSubmission> {
        if let Err(errors) = self.values.check() {
            tracing::debug!(fields = errors.len(), "business form rejected");
            self.errors = errors;
            return None;
        }
        self.errors = FieldErrors::default();

        let payload = self.values.to_new_business();
        Some(match &self.mode {
            FormMode::Create => FormSubmission::Create(payload),
            FormMode::Edit(business) => FormSubmission::Update(business.merge(payload)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::test_support::business;

    fn filled_dialog() -> BusinessFormDialog {
        let mut dialog = BusinessFormDialog::new();
        dialog.open(FormMode::Create);
        let values = dialog.values_mut();
        values.name = "Acme".to_string();
        values.industry = "Software".to_string();
        values.description = "Planning tools".to_string();
        dialog
    }

    #[test]
    fn test_create_defaults() {
        let mut dialog = BusinessFormDialog::new();
        dialog.open(FormMode::Create);
        assert_eq!(dialog.values().stage, Stage::Idea);
        assert_eq!(dialog.values().team_size, 1);
        assert_eq!(dialog.values().funding_amount, Decimal::ZERO);
        assert_eq!(dialog.title(), "Create New Business");
        assert_eq!(dialog.submit_label(), "Create Business");
    }

    #[test]
    fn test_edit_prefills_from_business() {
        let existing = business(4, "Existing");
        let mut dialog = BusinessFormDialog::new();
        dialog.open(FormMode::Edit(existing.clone()));
        assert_eq!(dialog.values().name, "Existing");
        assert_eq!(dialog.values().founding_date, "2021-06-01");
        assert_eq!(dialog.title(), "Edit Business");
        assert_eq!(dialog.submit_label(), "Save changes");
    }

    #[test]
    fn test_empty_required_fields_block_submit() {
        let mut dialog = BusinessFormDialog::new();
        dialog.open(FormMode::Create);
        assert!(dialog.submit().is_none());

        let errors = dialog.errors();
        assert_eq!(errors.get("name"), Some("Business name is required"));
        assert_eq!(errors.get("industry"), Some("Industry is required"));
        assert_eq!(errors.get("description"), Some("Business description is required"));
    }

    #[test]
    fn test_team_size_must_be_positive() {
        for size in [0, -3] {
            let mut dialog = filled_dialog();
            dialog.values_mut().team_size = size;
            assert!(dialog.submit().is_none());
            assert_eq!(
                dialog.errors().get("team_size"),
                Some("Team size must be a positive integer")
            );
        }
    }

    #[test]
    fn test_team_size_above_column_limit_blocked() {
        let mut dialog = filled_dialog();
        dialog.values_mut().team_size = 5_000_000_000;
        assert!(dialog.submit().is_none());
        assert_eq!(dialog.errors().get("team_size"), Some("Team size is too large"));

        dialog.values_mut().team_size = 2_147_483_647;
        match dialog.submit() {
            Some(FormSubmission::Create(payload)) => assert_eq!(payload.team_size, 2_147_483_647),
            other => panic!("expected create submission, got {:?}", other),
        }
    }

    #[test]
    fn test_clearing_optional_text_sends_blank() {
        let mut existing = business(5, "Described");
        existing.long_description = "Long story".to_string();
        existing.stage_description = "Testing".to_string();
        let mut dialog = BusinessFormDialog::new();
        dialog.open(FormMode::Edit(existing));
        dialog.values_mut().long_description = "   ".to_string();
        dialog.values_mut().stage_description.clear();

        let Some(FormSubmission::Update(updated)) = dialog.submit() else {
            panic!("expected update submission");
        };
        let body = serde_json::to_value(&updated).unwrap();
        assert_eq!(body["long_description"], "");
        assert_eq!(body["stage_description"], "");
    }

    #[test]
    fn test_negative_funding_blocked() {
        let mut dialog = filled_dialog();
        dialog.values_mut().funding_amount = Decimal::new(-1, 2);
        assert!(dialog.submit().is_none());
        assert_eq!(
            dialog.errors().get("funding_amount"),
            Some("Funding amount must be positive")
        );
    }

    #[test]
    fn test_malformed_founding_date_blocked() {
        let mut dialog = filled_dialog();
        dialog.values_mut().founding_date = "last spring".to_string();
        assert!(dialog.submit().is_none());
        assert!(dialog.errors().get("founding_date").is_some());
    }

    #[test]
    fn test_create_submission_has_no_identity() {
        let mut dialog = filled_dialog();
        dialog.values_mut().long_description = "  ".to_string();

        match dialog.submit() {
            Some(FormSubmission::Create(payload)) => {
                assert_eq!(payload.name, "Acme");
                assert_eq!(payload.long_description, "");
                assert_eq!(payload.founding_date, None);
                assert_eq!(payload.team_size, 1);
            }
            other => panic!("expected create submission, got {:?}", other),
        }
        assert!(dialog.errors().is_empty());
    }

    #[test]
    fn test_edit_submission_preserves_identity() {
        let existing = business(9, "Before");
        let mut dialog = BusinessFormDialog::new();
        dialog.open(FormMode::Edit(existing.clone()));
        dialog.values_mut().name = "After".to_string();
        dialog.values_mut().stage = Stage::Maturity;

        match dialog.submit() {
            Some(FormSubmission::Update(updated)) => {
                assert_eq!(updated.id, 9);
                assert_eq!(updated.created_at, existing.created_at);
                assert_eq!(updated.user_id, existing.user_id);
                assert_eq!(updated.name, "After");
                assert_eq!(updated.stage, Stage::Maturity);
            }
            other => panic!("expected update submission, got {:?}", other),
        }
    }

    #[test]
    fn test_reopen_clears_errors() {
        let mut dialog = BusinessFormDialog::new();
        dialog.open(FormMode::Create);
        dialog.submit();
        assert!(!dialog.errors().is_empty());

        dialog.open(FormMode::Create);
        assert!(dialog.errors().is_empty());
    }
}
