use crate::domain::services::models::error::ApiError;
use crate::domain::services::models::service::{
    LogsQuery, ProjectId, Service, ServiceId, ServiceInput, ServiceLogs, ServiceMetadata,
};
use crate::domain::services::ports::ServicesApi;
use log::debug;
use reqwest::{Client, RequestBuilder, Response, Url};

/// REST client for the services backend.
#[derive(Clone)]
pub struct HttpServicesApi {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpServicesApi {
    pub fn new(base_url: Url, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url,
            token,
        }
    }

    fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    fn services_url(&self, project_id: &ProjectId) -> Result<Url, ApiError> {
        self.url(&["projects", project_id.as_str(), "services"])
    }

    fn service_url(&self, project_id: &ProjectId, service_id: &ServiceId) -> Result<Url, ApiError> {
        self.url(&[
            "projects",
            project_id.as_str(),
            "services",
            service_id.as_str(),
        ])
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = self.authorized(request).send().await?;
        debug!("response: {:?}", response.status());
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status { status, body })
    }
}

impl ServicesApi for HttpServicesApi {
    async fn list_services(&self, project_id: &ProjectId) -> Result<Vec<Service>, ApiError> {
        let url = self.services_url(project_id)?;
        let response = self.send(self.client.get(url)).await?;
        Ok(response.json().await?)
    }

    async fn deploy_service(
        &self,
        project_id: &ProjectId,
        input: &ServiceInput,
    ) -> Result<Service, ApiError> {
        let url = self.services_url(project_id)?;
        let response = self.send(self.client.post(url).json(input)).await?;
        Ok(response.json().await?)
    }

    async fn delete_service(
        &self,
        project_id: &ProjectId,
        service_id: &ServiceId,
    ) -> Result<(), ApiError> {
        let url = self.service_url(project_id, service_id)?;
        self.send(self.client.delete(url)).await?;
        Ok(())
    }

    async fn get_service_logs(
        &self,
        project_id: &ProjectId,
        service_id: &ServiceId,
        query: LogsQuery,
    ) -> Result<ServiceLogs, ApiError> {
        let mut url = self.service_url(project_id, service_id)?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.to_string()))?
            .push("logs");
        if let Some(lines) = query.lines {
            url.query_pairs_mut()
                .append_pair("lines", &lines.to_string());
        }
        let response = self.send(self.client.get(url)).await?;
        Ok(ServiceLogs(response.text().await?))
    }

    async fn get_service_metadata(
        &self,
        project_id: &ProjectId,
        service_id: &ServiceId,
    ) -> Result<ServiceMetadata, ApiError> {
        let url = self.service_url(project_id, service_id)?;
        let response = self.send(self.client.get(url)).await?;
        Ok(response.json().await?)
    }
}
