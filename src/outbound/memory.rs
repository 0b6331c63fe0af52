use crate::domain::services::models::error::ApiError;
use crate::domain::services::models::service::{
    LogsQuery, ProjectId, Service, ServiceId, ServiceInput, ServiceLogs, ServiceMetadata,
};
use crate::domain::services::ports::ServicesApi;
use log::debug;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Deploy,
    Delete,
    Logs,
    Metadata,
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::List => write!(f, "list"),
            Operation::Deploy => write!(f, "deploy"),
            Operation::Delete => write!(f, "delete"),
            Operation::Logs => write!(f, "logs"),
            Operation::Metadata => write!(f, "metadata"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiCall {
    pub operation: Operation,
    pub project_id: ProjectId,
}

type ProjectServices = HashMap<ProjectId, Vec<Service>>;

/// Services backend kept in process memory.
///
/// Every call is recorded together with the project it was scoped to.
#[derive(Clone, Default)]
pub struct InMemoryServices {
    services: Arc<RwLock<ProjectServices>>,
    logs: Arc<RwLock<HashMap<(ProjectId, ServiceId), String>>>,
    calls: Arc<RwLock<Vec<ApiCall>>>,
    failing: Arc<AtomicBool>,
    next_id: Arc<AtomicU64>,
}

impl InMemoryServices {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, project_id: &ProjectId, service: Service) {
        let mut state = self.services.write().await;
        state.entry(project_id.clone()).or_default().push(service);
    }

    /// Adds a running `demo` service (nginx) with a few log lines to the project.
    pub async fn seed_demo(&self, project_id: &ProjectId) {
        let service = Service {
            id: ServiceId::new("demo"),
            display_name: "demo".to_string(),
            container_image: "nginx:latest".to_string(),
            parameters: Default::default(),
            status: Some("running".to_string()),
            created_at: None,
        };
        self.insert(project_id, service).await;
        self.set_logs(
            project_id,
            &ServiceId::new("demo"),
            "start worker processes\nready for start up",
        )
        .await;
    }

    pub async fn set_logs(&self, project_id: &ProjectId, service_id: &ServiceId, logs: &str) {
        let mut logs_state = self.logs.write().await;
        logs_state.insert((project_id.clone(), service_id.clone()), logs.to_string());
    }

    /// While failing, every call is rejected with [`ApiError::Unavailable`].
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn calls(&self) -> Vec<ApiCall> {
        self.calls.read().await.clone()
    }

    pub async fn services(&self, project_id: &ProjectId) -> Vec<Service> {
        let state = self.services.read().await;
        state.get(project_id).cloned().unwrap_or_default()
    }

    async fn record(&self, operation: Operation, project_id: &ProjectId) -> Result<(), ApiError> {
        debug!("in-memory {operation} for project {project_id}");
        self.calls.write().await.push(ApiCall {
            operation,
            project_id: project_id.clone(),
        });
        if self.failing.load(Ordering::SeqCst) {
            return Err(ApiError::Unavailable);
        }
        Ok(())
    }

    async fn find(&self, project_id: &ProjectId, service_id: &ServiceId) -> Result<Service, ApiError> {
        let state = self.services.read().await;
        state
            .get(project_id)
            .and_then(|services| services.iter().find(|s| &s.id == service_id))
            .cloned()
            .ok_or(ApiError::NotFound)
    }
}

impl ServicesApi for InMemoryServices {
    async fn list_services(&self, project_id: &ProjectId) -> Result<Vec<Service>, ApiError> {
        self.record(Operation::List, project_id).await?;
        Ok(self.services(project_id).await)
    }

    async fn deploy_service(
        &self,
        project_id: &ProjectId,
        input: &ServiceInput,
    ) -> Result<Service, ApiError> {
        self.record(Operation::Deploy, project_id).await?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let service = Service {
            id: ServiceId::new(format!("service-{id}")),
            display_name: input.display_name.clone(),
            container_image: input.container_image.clone(),
            parameters: input.parameters.clone(),
            status: Some("running".to_string()),
            created_at: None,
        };
        self.insert(project_id, service.clone()).await;
        Ok(service)
    }

    async fn delete_service(
        &self,
        project_id: &ProjectId,
        service_id: &ServiceId,
    ) -> Result<(), ApiError> {
        self.record(Operation::Delete, project_id).await?;
        let mut state = self.services.write().await;
        let services = state.get_mut(project_id).ok_or(ApiError::NotFound)?;
        let before = services.len();
        services.retain(|s| &s.id != service_id);
        if services.len() == before {
            return Err(ApiError::NotFound);
        }
        Ok(())
    }

    async fn get_service_logs(
        &self,
        project_id: &ProjectId,
        service_id: &ServiceId,
        query: LogsQuery,
    ) -> Result<ServiceLogs, ApiError> {
        self.record(Operation::Logs, project_id).await?;
        let service = self.find(project_id, service_id).await?;
        let logs_state = self.logs.read().await;
        let logs = logs_state
            .get(&(project_id.clone(), service_id.clone()))
            .cloned()
            .unwrap_or_else(|| format!("started {}", service.container_image));
        let logs = ServiceLogs(logs);
        Ok(match query.lines {
            Some(lines) => logs.tail(lines),
            None => logs,
        })
    }

    async fn get_service_metadata(
        &self,
        project_id: &ProjectId,
        service_id: &ServiceId,
    ) -> Result<ServiceMetadata, ApiError> {
        self.record(Operation::Metadata, project_id).await?;
        let service = self.find(project_id, service_id).await?;
        Ok(ServiceMetadata::from(&service))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn deploy_then_delete_within_project() {
        let api = InMemoryServices::new();
        let project = ProjectId::new("p1");
        let input = ServiceInput {
            container_image: "img:1".to_string(),
            display_name: "svc-a".to_string(),
            parameters: Default::default(),
        };

        let service = api.deploy_service(&project, &input).await.unwrap();
        assert_eq!(api.list_services(&project).await.unwrap().len(), 1);
        assert!(
            api.list_services(&ProjectId::new("p2"))
                .await
                .unwrap()
                .is_empty()
        );

        api.delete_service(&project, &service.id).await.unwrap();
        assert!(api.list_services(&project).await.unwrap().is_empty());
        assert!(matches!(
            api.delete_service(&project, &service.id).await,
            Err(ApiError::NotFound)
        ));
    }

    #[tokio::test]
    async fn failing_mode_rejects_but_records() {
        let api = InMemoryServices::new();
        api.set_failing(true);
        let project = ProjectId::new("p1");

        assert!(api.list_services(&project).await.is_err());
        assert_eq!(
            api.calls().await,
            vec![ApiCall {
                operation: Operation::List,
                project_id: project
            }]
        );
    }

    #[tokio::test]
    async fn demo_service_supports_every_operation() {
        let api = InMemoryServices::new();
        let project = ProjectId::new("p1");
        api.seed_demo(&project).await;
        let demo = ServiceId::new("demo");

        let services = api.list_services(&project).await.unwrap();
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].container_image, "nginx:latest");
        let logs = api
            .get_service_logs(&project, &demo, LogsQuery::default())
            .await
            .unwrap();
        assert_eq!(logs.as_str(), "start worker processes\nready for start up");
        let metadata = api.get_service_metadata(&project, &demo).await.unwrap();
        assert_eq!(metadata.0["status"], "running");
        api.delete_service(&project, &demo).await.unwrap();
        assert!(api.services(&project).await.is_empty());
    }

    #[tokio::test]
    async fn logs_are_tailed() {
        let api = InMemoryServices::new();
        let project = ProjectId::new("p1");
        api.insert(&project, Service::new("s1")).await;
        api.set_logs(&project, &ServiceId::new("s1"), "one\ntwo\nthree")
            .await;

        let logs = api
            .get_service_logs(&project, &ServiceId::new("s1"), LogsQuery { lines: Some(1) })
            .await
            .unwrap();
        assert_eq!(logs.as_str(), "three");
    }
}
