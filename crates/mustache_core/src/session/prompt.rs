//! User-facing remediation prompts.

/// Alert offered when a publish fails and the user can fix the cause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemediationPrompt {
    pub title: String,
    pub message: String,
    /// Label of the button that opens the system settings.
    pub action: String,
}

impl RemediationPrompt {
    pub fn permission_denied() -> Self {
        Self {
            title: "Permission Denied".to_string(),
            message: "Please enable photo library access in Settings to save videos."
                .to_string(),
            action: "Open Settings".to_string(),
        }
    }
}

/// Shows prompts to the user. Implemented by the host UI.
pub trait Prompter: Send + Sync {
    fn present(&self, prompt: &RemediationPrompt);
}
