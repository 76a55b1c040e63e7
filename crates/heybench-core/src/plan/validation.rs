use crate::error::HeybenchError;
use crate::plan::model::{RunPlan, Target};

/// Validate a [`RunPlan`] and return a list of validation errors.
///
/// An empty `Vec` means the plan is valid.
pub fn validate_plan(plan: &RunPlan) -> Vec<HeybenchError> {
    let mut errors = Vec::new();

    if plan.requests == 0 {
        errors.push(HeybenchError::Validation(
            "requests must be at least 1".to_string(),
        ));
    }

    if plan.concurrency == 0 {
        errors.push(HeybenchError::Validation(
            "concurrency must be at least 1".to_string(),
        ));
    } else if plan.concurrency > plan.requests {
        // hey refuses to run with fewer requests than workers.
        errors.push(HeybenchError::Validation(format!(
            "concurrency ({}) cannot exceed requests ({})",
            plan.concurrency, plan.requests
        )));
    }

    let base = plan.base_url.trim();
    if !base.starts_with("http://") && !base.starts_with("https://") {
        errors.push(HeybenchError::Validation(format!(
            "base URL must start with http:// or https:// (got: {})",
            plan.base_url
        )));
    }

    if plan.generator.trim().is_empty() {
        errors.push(HeybenchError::Validation(
            "generator executable must not be empty".to_string(),
        ));
    }

    errors.extend(validate_target("baseline", &plan.baseline));
    errors.extend(validate_target("candidate", &plan.candidate));

    if !plan.baseline.name.trim().is_empty() && plan.baseline.name == plan.candidate.name {
        errors.push(HeybenchError::Validation(format!(
            "baseline and candidate must have different names (both are '{}')",
            plan.baseline.name
        )));
    }

    errors
}

fn validate_target(role: &str, target: &Target) -> Vec<HeybenchError> {
    let mut errors = Vec::new();

    if target.name.trim().is_empty() {
        errors.push(HeybenchError::Validation(format!(
            "{role} target name must not be empty"
        )));
    }

    if target.path.chars().any(char::is_whitespace) {
        errors.push(HeybenchError::Validation(format!(
            "{role} target '{}': path must not contain whitespace",
            target.name
        )));
    }

    errors
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
