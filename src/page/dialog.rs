use crate::ServicesError;
use crate::domain::services::models::service::{DeploymentRequest, parse_parameter};

/// Whether the deploy dialog is shown, and what it currently holds.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DialogState {
    #[default]
    Closed,
    Open(DeployDialog),
}

impl DialogState {
    pub fn is_open(&self) -> bool {
        matches!(self, DialogState::Open(_))
    }
}

/// Form of the deploy dialog.
///
/// The draft keeps the last submitted values, so a failed deploy can be
/// corrected and submitted again.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeployDialog {
    pub draft: DeploymentRequest,
    pub attempts: u32,
}

impl DeployDialog {
    pub fn with_image(mut self, container_image: impl Into<String>) -> Self {
        self.draft.container_image = container_image.into();
        self
    }

    pub fn with_name(mut self, deployment_name: impl Into<String>) -> Self {
        self.draft.deployment_name = deployment_name.into();
        self
    }

    /// Adds a `KEY=VALUE` parameter.
    pub fn with_parameter(mut self, raw: &str) -> Result<Self, ServicesError> {
        let (key, value) =
            parse_parameter(raw).ok_or_else(|| ServicesError::InvalidParameter(raw.to_string()))?;
        self.draft.deployment_parameters.insert(key, value);
        Ok(self)
    }

    pub fn request(&self) -> DeploymentRequest {
        self.draft.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_request_from_fields() {
        let dialog = DeployDialog::default()
            .with_image("img:1")
            .with_name("svc-a")
            .with_parameter("PORT=8080")
            .unwrap();
        let request = dialog.request();
        assert_eq!(request.container_image, "img:1");
        assert_eq!(request.deployment_name, "svc-a");
        assert_eq!(request.deployment_parameters["PORT"], "8080");
    }

    #[test]
    fn rejects_malformed_parameter() {
        let result = DeployDialog::default().with_parameter("PORT");
        assert!(matches!(result, Err(ServicesError::InvalidParameter(p)) if p == "PORT"));
    }
}
