use atlas_core::{Context, StateRecord, TransitionRecord};

/// Validates ingest payloads before they reach the store, accumulating every
/// violation found rather than failing on the first one.
pub struct RequestValidator;

impl RequestValidator {
    /// Validate a [`Context`] payload.
    pub fn validate_context(ctx: &Context) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if ctx.context_id.trim().is_empty() {
            errors.push("context_id must not be empty".into());
        }
        if ctx.app_id.trim().is_empty() {
            errors.push("app_id must not be empty".into());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate a [`StateRecord`] payload.
    pub fn validate_state_record(record: &StateRecord) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if record.context_id.trim().is_empty() {
            errors.push("context_id must not be empty".into());
        }
        if record.state.id.trim().is_empty() {
            errors.push("state.id must not be empty".into());
        }
        if record.state.app_id.trim().is_empty() {
            errors.push("state.app_id must not be empty".into());
        }
        for element in &record.state.interactive_elements {
            if element.id.trim().is_empty() {
                errors.push("interactive element id must not be empty".into());
            }
            if element.role.trim().is_empty() {
                errors.push(format!(
                    "interactive element '{}' must have a non-empty role",
                    element.id
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate a [`TransitionRecord`] payload.
    pub fn validate_transition_record(record: &TransitionRecord) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if record.context_id.trim().is_empty() {
            errors.push("context_id must not be empty".into());
        }
        if record.transition.id.trim().is_empty() {
            errors.push("transition.id must not be empty".into());
        }
        if record.transition.source_state_id.trim().is_empty() {
            errors.push("transition.source_state_id must not be empty".into());
        }
        if record.transition.target_state_id.trim().is_empty() {
            errors.push("transition.target_state_id must not be empty".into());
        }
        let confidence = record.transition.confidence;
        if confidence.is_nan() || !(0.0..=1.0).contains(&confidence) {
            errors.push("transition.confidence must be a finite number in [0.0, 1.0]".into());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
