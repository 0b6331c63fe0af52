use crate::domain::services::models::error::ApiError;
use crate::domain::services::models::service::{
    LogsQuery, ProjectId, Service, ServiceId, ServiceInput, ServiceLogs, ServiceMetadata,
};

// The services api talks to the backend that owns the services of a project
pub trait ServicesApi: Send + Sync + 'static {
    fn list_services(
        &self,
        project_id: &ProjectId,
    ) -> impl Future<Output = Result<Vec<Service>, ApiError>> + Send;

    fn deploy_service(
        &self,
        project_id: &ProjectId,
        input: &ServiceInput,
    ) -> impl Future<Output = Result<Service, ApiError>> + Send;

    fn delete_service(
        &self,
        project_id: &ProjectId,
        service_id: &ServiceId,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    fn get_service_logs(
        &self,
        project_id: &ProjectId,
        service_id: &ServiceId,
        query: LogsQuery,
    ) -> impl Future<Output = Result<ServiceLogs, ApiError>> + Send;

    fn get_service_metadata(
        &self,
        project_id: &ProjectId,
        service_id: &ServiceId,
    ) -> impl Future<Output = Result<ServiceMetadata, ApiError>> + Send;
}

// A notifier shows a short lived message to the user
pub trait Notifier: Send + Sync + 'static {
    fn notify(&self, message: String);
}

impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    fn notify(&self, message: String) {
        (**self).notify(message);
    }
}
