use crate::domain::services::models::error::ApiError;
use crate::domain::services::models::service::{ProjectId, Service};
use crate::domain::services::ports::ServicesApi;
use log::{debug, warn};
use std::sync::Arc;
use tokio::sync::RwLock;

/// The services of one project, as last fetched from the backend.
///
/// The list is a server owned snapshot: it only changes through [`ServiceList::reload`].
pub struct ServiceList<A: ServicesApi> {
    api: Arc<A>,
    project_id: ProjectId,
    services: RwLock<Vec<Service>>,
}

impl<A: ServicesApi> ServiceList<A> {
    pub fn new(api: Arc<A>, project_id: ProjectId) -> Self {
        Self {
            api,
            project_id,
            services: RwLock::new(Vec::new()),
        }
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    pub async fn services(&self) -> Vec<Service> {
        self.services.read().await.clone()
    }

    /// Re-fetches the list. On failure the previous snapshot is kept.
    pub async fn reload(&self) -> Result<usize, ApiError> {
        debug!("reloading services of project {}", self.project_id);
        match self.api.list_services(&self.project_id).await {
            Ok(services) => {
                let count = services.len();
                *self.services.write().await = services;
                Ok(count)
            }
            Err(e) => {
                warn!("failed to list services of project {}: {e}", self.project_id);
                Err(e)
            }
        }
    }
}
