use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Current and default prompt for the owner. `updated_at` is null until the
/// owner saves a prompt for the first time.
#[derive(Debug, Serialize, ToSchema)]
pub struct SettingsResponse {
    pub summary_prompt: String,
    pub default_prompt: String,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum UpdateSettingsRequest {
    /// Update the current prompt.
    Save { summary_prompt: String },
    /// Update the current prompt and remember it as the owner's default.
    SaveAsDefault { summary_prompt: String },
    /// Copy the owner's default (or the application default) back into the
    /// current prompt.
    ResetToDefault,
}

impl UpdateSettingsRequest {
    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::Save { summary_prompt } | Self::SaveAsDefault { summary_prompt } => {
                if summary_prompt.trim().is_empty() {
                    return Err("summary_prompt is required".to_string());
                }
                Ok(())
            }
            Self::ResetToDefault => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_tag_selects_the_variant() {
        let save: UpdateSettingsRequest =
            serde_json::from_str(r#"{"action": "save", "summary_prompt": "p"}"#).unwrap();
        assert!(matches!(save, UpdateSettingsRequest::Save { .. }));

        let as_default: UpdateSettingsRequest =
            serde_json::from_str(r#"{"action": "save_as_default", "summary_prompt": "p"}"#)
                .unwrap();
        assert!(matches!(
            as_default,
            UpdateSettingsRequest::SaveAsDefault { .. }
        ));

        let reset: UpdateSettingsRequest =
            serde_json::from_str(r#"{"action": "reset_to_default"}"#).unwrap();
        assert!(matches!(reset, UpdateSettingsRequest::ResetToDefault));
    }

    #[test]
    fn unknown_actions_fail_to_parse() {
        let result =
            serde_json::from_str::<UpdateSettingsRequest>(r#"{"action": "overwrite_all"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn save_requires_a_non_blank_prompt() {
        let blank = UpdateSettingsRequest::Save {
            summary_prompt: "  ".to_string(),
        };
        assert!(blank.validate().is_err());

        let reset = UpdateSettingsRequest::ResetToDefault;
        assert!(reset.validate().is_ok());
    }
}
