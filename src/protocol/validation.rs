//! Protocol invariant checks
//!
//! Module provides the validation functions builders run at `build()` time:
//! numeric ranges, size limits, URI schemes, and cross-field rules. Values
//! that pass these checks are safe to encode.

use url::Url;

use crate::core::error::{McpError, McpResult};
use crate::protocol::messages::Completion;
use crate::protocol::types::{Annotations, ElicitationAction, ModelPreferences};

/// Maximum number of values a completion result may carry
pub const MAX_COMPLETION_VALUES: usize = 100;

/// Validates a priority value, which must live in [0.0, 1.0]
pub fn validate_priority(field: &str, priority: f64) -> McpResult<()> {
    if !(0.0..=1.0).contains(&priority) {
        return Err(McpError::Validation(format!(
            "{field} must be between 0.0 and 1.0, got {priority}"
        )));
    }
    Ok(())
}

/// Validates annotations (priority range)
pub fn validate_annotations(annotations: &Annotations) -> McpResult<()> {
    if let Some(priority) = annotations.priority {
        validate_priority("annotation priority", priority)?;
    }
    Ok(())
}

/// Validates model preferences (all priorities in range)
pub fn validate_model_preferences(preferences: &ModelPreferences) -> McpResult<()> {
    if let Some(cost) = preferences.cost_priority {
        validate_priority("costPriority", cost)?;
    }
    if let Some(speed) = preferences.speed_priority {
        validate_priority("speedPriority", speed)?;
    }
    if let Some(intelligence) = preferences.intelligence_priority {
        validate_priority("intelligencePriority", intelligence)?;
    }
    Ok(())
}

/// Validates a completion payload (at most [`MAX_COMPLETION_VALUES`] entries)
pub fn validate_completion(completion: &Completion) -> McpResult<()> {
    if completion.values.len() > MAX_COMPLETION_VALUES {
        return Err(McpError::Validation(format!(
            "completion carries {} values, the protocol allows at most {MAX_COMPLETION_VALUES}",
            completion.values.len()
        )));
    }
    Ok(())
}

/// Validates a root URI, which must use the `file://` scheme
pub fn validate_root_uri(uri: &str) -> McpResult<()> {
    let parsed = Url::parse(uri)
        .map_err(|e| McpError::Validation(format!("root uri {uri:?} is not a valid URI: {e}")))?;
    if parsed.scheme() != "file" {
        return Err(McpError::Validation(format!(
            "root uri must start with file://, got {uri:?}"
        )));
    }
    Ok(())
}

/// Validates the action/content rule of an elicitation result: submitted
/// content is only admissible when the user accepted
pub fn validate_elicit_content(action: ElicitationAction, has_content: bool) -> McpResult<()> {
    if has_content && action != ElicitationAction::Accept {
        return Err(McpError::Validation(
            "elicit result content is only allowed when the action is accept".to_string(),
        ));
    }
    Ok(())
}
