use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Deployment parameters passed to a service, e.g. environment variables.
pub type Parameters = BTreeMap<String, String>;

#[derive(Deserialize, Serialize, Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
#[serde(transparent)]
pub struct ProjectId(pub String);

impl ProjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProjectId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
#[serde(transparent)]
pub struct ServiceId(pub String);

impl ServiceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ServiceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A deployed workload as reported by the backend.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Service {
    pub id: ServiceId,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub container_image: String,
    #[serde(default)]
    pub parameters: Parameters,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Service {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: ServiceId::new(id),
            display_name: String::new(),
            container_image: String::new(),
            parameters: Parameters::new(),
            status: None,
            created_at: None,
        }
    }
}

/// Values collected by the deploy dialog. Consumed once by the deploy handler.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeploymentRequest {
    pub container_image: String,
    pub deployment_name: String,
    pub deployment_parameters: Parameters,
}

/// Request body of the deploy call.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ServiceInput {
    pub container_image: String,
    pub display_name: String,
    pub parameters: Parameters,
}

impl From<DeploymentRequest> for ServiceInput {
    fn from(val: DeploymentRequest) -> Self {
        Self {
            container_image: val.container_image,
            display_name: val.deployment_name,
            parameters: val.deployment_parameters,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogsQuery {
    /// Only return the last `lines` lines.
    pub lines: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceLogs(pub String);

impl ServiceLogs {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Keeps at most the last `lines` lines.
    pub fn tail(&self, lines: u32) -> ServiceLogs {
        let all: Vec<&str> = self.0.lines().collect();
        let skip = all.len().saturating_sub(lines as usize);
        ServiceLogs(all[skip..].join("\n"))
    }
}

impl Display for ServiceLogs {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct ServiceMetadata(pub serde_json::Value);

impl From<&Service> for ServiceMetadata {
    fn from(service: &Service) -> Self {
        Self(serde_json::to_value(service).unwrap_or(serde_json::Value::Null))
    }
}

impl Display for ServiceMetadata {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string_pretty(&self.0) {
            Ok(pretty) => f.write_str(&pretty),
            Err(_) => write!(f, "{}", self.0),
        }
    }
}

/// Parses a `KEY=VALUE` deployment parameter.
pub fn parse_parameter(raw: &str) -> Option<(String, String)> {
    let (key, value) = raw.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), value.to_string()))
}
