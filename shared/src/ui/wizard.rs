//! Four-step "create your business" wizard

use crate::models::NewBusiness;
use crate::ui::form_dialog::BusinessFormValues;
use crate::validation::FieldErrors;

pub const FIRST_STEP: u8 = 1;
pub const LAST_STEP: u8 = 4;

/// Fields validated before leaving each step
fn step_fields(step: u8) -> &'static [&'static str] {
    match step {
        1 => &["name", "industry"],
        2 => &["description", "long_description"],
        3 => &["stage", "stage_description"],
        _ => &["funding_amount", "team_size", "founding_date"],
    }
}

#[derive(Debug, Clone)]
pub struct CreateBusinessWizard {
    step: u8,
    values: BusinessFormValues,
    errors: FieldErrors,
    submitting: bool,
}

impl Default for CreateBusinessWizard {
    fn default() -> Self {
        Self {
            step: FIRST_STEP,
            values: BusinessFormValues::default(),
            errors: FieldErrors::default(),
            submitting: false,
        }
    }
}

impl CreateBusinessWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    /// Progress bar fill, 25% per step
    pub fn progress_percent(&self) -> u8 {
        (u16::from(self.step) * 100 / u16::from(LAST_STEP)) as u8
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

    pub fn can_go_back(&self) -> bool {
        self.step > FIRST_STEP
    }

    pub fn is_last_step(&self) -> bool {
        self.step == LAST_STEP
    }

    pub fn submit_label(&self) -> &'static str {
        if self.submitting {
            "Submitting..."
        } else {
            "Submit"
        }
    }

    fn current_step_errors(&self) -> FieldErrors {
        let mut errors = match self.values.check() {
            Ok(()) => FieldErrors::default(),
            Err(errors) => errors,
        };
        errors.retain_fields(step_fields(self.step));
        errors
    }

    /// Advance when the current step's fields are valid
    pub fn next(&mut self) -> bool {
        if self.is_last_step() {
            return false;
        }
        self.errors = self.current_step_errors();
        if !self.errors.is_empty() {
            return false;
        }
        self.step += 1;
        true
    }

    pub fn previous(&mut self) {
        if self.can_go_back() {
            self.step -= 1;
        }
    }

    /// Final submit from the last step; validates every field
    pub fn submit(&mut self) -> Option<NewBusiness> {
        if !self.is_last_step() {
            return None;
        }
        match self.values.check() {
            Ok(()) => {
                self.errors = FieldErrors::default();
                self.submitting = true;
                Some(self.values.to_new_business())
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    /// Mark the in-flight submit as finished
    pub fn finish_submit(&mut self) {
        self.submitting = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cannot_leave_first_step_without_name() {
        let mut wizard = CreateBusinessWizard::new();
        wizard.values_mut().industry = "Retail".to_string();
        assert!(!wizard.next());
        assert_eq!(wizard.step(), 1);
        assert_eq!(wizard.errors().get("name"), Some("Business name is required"));
        // later steps' rules are not reported yet
        assert!(wizard.errors().get("description").is_none());
    }

    #[test]
    fn test_walk_through_all_steps() {
        let mut wizard = CreateBusinessWizard::new();
        wizard.values_mut().name = "Corner Shop".to_string();
        wizard.values_mut().industry = "Retail".to_string();
        assert!(wizard.next());
        assert_eq!(wizard.progress_percent(), 50);

        wizard.values_mut().description = "Groceries".to_string();
        assert!(wizard.next());
        assert!(wizard.next());
        assert!(wizard.is_last_step());
        assert!(!wizard.next());

        let payload = wizard.submit().unwrap();
        assert_eq!(payload.name, "Corner Shop");
        assert_eq!(wizard.submit_label(), "Submitting...");
        wizard.finish_submit();
        assert_eq!(wizard.submit_label(), "Submit");
    }

    #[test]
    fn test_previous_stops_at_first_step() {
        let mut wizard = CreateBusinessWizard::new();
        wizard.previous();
        assert_eq!(wizard.step(), FIRST_STEP);
        assert!(!wizard.can_go_back());
    }

    #[test]
    fn test_submit_only_on_last_step() {
        let mut wizard = CreateBusinessWizard::new();
        assert!(wizard.submit().is_none());
    }

    #[test]
    fn test_last_step_rejects_bad_team_size() {
        let mut wizard = CreateBusinessWizard::new();
        wizard.values_mut().name = "A".to_string();
        wizard.values_mut().industry = "B".to_string();
        wizard.values_mut().description = "C".to_string();
        wizard.next();
        wizard.next();
        wizard.next();
        wizard.values_mut().team_size = 0;

        assert!(wizard.submit().is_none());
        assert!(wizard.errors().get("team_size").is_some());
    }
}
