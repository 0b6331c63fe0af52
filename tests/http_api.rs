#[cfg(test)]
mod tests {
    use axum::{
        Json, Router,
        extract::{Path, Query, State},
        http::{HeaderMap, StatusCode},
        routing::get,
    };
    use servicedeck::domain::services::models::error::ApiError;
    use servicedeck::domain::services::models::service::{
        DeploymentRequest, LogsQuery, ProjectId, Service, ServiceId, ServiceInput,
    };
    use servicedeck::domain::services::ports::{Notifier, ServicesApi};
    use servicedeck::outbound::http::HttpServicesApi;
    use servicedeck::page::{ActionOutcome, ServicesPage};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    const TOKEN: &str = "tests-secret";

    #[derive(Clone, Default)]
    struct Backend {
        services: Arc<Mutex<HashMap<String, Vec<Service>>>>,
    }

    fn check_auth(headers: &HeaderMap) -> Result<(), StatusCode> {
        let auth_header = headers
            .get("Authorization")
            .and_then(|header| header.to_str().ok());
        match auth_header {
            Some(header) if header == format!("Bearer {TOKEN}") => Ok(()),
            _ => Err(StatusCode::UNAUTHORIZED),
        }
    }

    async fn list_services(
        State(backend): State<Backend>,
        headers: HeaderMap,
        Path(project_id): Path<String>,
    ) -> Result<Json<Vec<Service>>, StatusCode> {
        check_auth(&headers)?;
        let services = backend.services.lock().unwrap();
        Ok(Json(services.get(&project_id).cloned().unwrap_or_default()))
    }

    async fn deploy_service(
        State(backend): State<Backend>,
        headers: HeaderMap,
        Path(project_id): Path<String>,
        Json(input): Json<ServiceInput>,
    ) -> Result<Json<Service>, StatusCode> {
        check_auth(&headers)?;
        if input.container_image.is_empty() {
            return Err(StatusCode::UNPROCESSABLE_ENTITY);
        }
        let mut services = backend.services.lock().unwrap();
        let project = services.entry(project_id).or_default();
        let mut service = Service::new(format!("{}-{}", input.display_name, project.len()));
        service.display_name = input.display_name;
        service.container_image = input.container_image;
        service.parameters = input.parameters;
        project.push(service.clone());
        Ok(Json(service))
    }

    async fn get_service(
        State(backend): State<Backend>,
        headers: HeaderMap,
        Path((project_id, service_id)): Path<(String, String)>,
    ) -> Result<Json<serde_json::Value>, StatusCode> {
        check_auth(&headers)?;
        let services = backend.services.lock().unwrap();
        let service = services
            .get(&project_id)
            .and_then(|s| s.iter().find(|s| s.id.as_str() == service_id))
            .ok_or(StatusCode::NOT_FOUND)?;
        Ok(Json(serde_json::to_value(service).unwrap()))
    }

    async fn delete_service(
        State(backend): State<Backend>,
        headers: HeaderMap,
        Path((project_id, service_id)): Path<(String, String)>,
    ) -> StatusCode {
        if let Err(status) = check_auth(&headers) {
            return status;
        }
        let mut services = backend.services.lock().unwrap();
        let Some(project) = services.get_mut(&project_id) else {
            return StatusCode::NOT_FOUND;
        };
        let before = project.len();
        project.retain(|s| s.id.as_str() != service_id);
        if project.len() == before {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::NO_CONTENT
        }
    }

    async fn service_logs(
        headers: HeaderMap,
        Path((_project_id, service_id)): Path<(String, String)>,
        Query(params): Query<HashMap<String, String>>,
    ) -> Result<String, StatusCode> {
        check_auth(&headers)?;
        let lines = params.get("lines").cloned().unwrap_or_else(|| "all".to_string());
        Ok(format!("logs of {service_id} ({lines})"))
    }

    async fn setup_backend() -> (String, Backend) {
        let backend = Backend::default();
        let app = Router::new()
            .route(
                "/api/projects/{project_id}/services",
                get(list_services).post(deploy_service),
            )
            .route(
                "/api/projects/{project_id}/services/{service_id}",
                get(get_service).delete(delete_service),
            )
            .route(
                "/api/projects/{project_id}/services/{service_id}/logs",
                get(service_logs),
            )
            .with_state(backend.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}/api"), backend)
    }

    fn client(base_url: &str, token: Option<&str>) -> HttpServicesApi {
        HttpServicesApi::new(base_url.parse().unwrap(), token.map(str::to_string))
    }

    fn input(name: &str, image: &str) -> ServiceInput {
        ServiceInput {
            container_image: image.to_string(),
            display_name: name.to_string(),
            parameters: Default::default(),
        }
    }

    #[tokio::test]
    async fn test_deploy_list_and_delete() {
        let (base_url, _backend) = setup_backend().await;
        let api = client(&base_url, Some(TOKEN));
        let project = ProjectId::new("p1");

        let service = api
            .deploy_service(&project, &input("svc-a", "img:1"))
            .await
            .unwrap();
        assert_eq!(service.display_name, "svc-a");

        let services = api.list_services(&project).await.unwrap();
        assert_eq!(services, vec![service.clone()]);
        assert!(
            api.list_services(&ProjectId::new("p2"))
                .await
                .unwrap()
                .is_empty()
        );

        api.delete_service(&project, &service.id).await.unwrap();
        assert!(api.list_services(&project).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_logs_pass_line_limit() {
        let (base_url, _backend) = setup_backend().await;
        let api = client(&base_url, Some(TOKEN));
        let project = ProjectId::new("p1");

        let logs = api
            .get_service_logs(&project, &ServiceId::new("s1"), LogsQuery { lines: Some(5) })
            .await
            .unwrap();
        assert_eq!(logs.as_str(), "logs of s1 (5)");

        let logs = api
            .get_service_logs(&project, &ServiceId::new("s1"), LogsQuery::default())
            .await
            .unwrap();
        assert_eq!(logs.as_str(), "logs of s1 (all)");
    }

    #[tokio::test]
    async fn test_metadata_and_missing_service() {
        let (base_url, _backend) = setup_backend().await;
        let api = client(&base_url, Some(TOKEN));
        let project = ProjectId::new("p1");
        let service = api
            .deploy_service(&project, &input("svc-a", "img:1"))
            .await
            .unwrap();

        let metadata = api.get_service_metadata(&project, &service.id).await.unwrap();
        assert_eq!(metadata.0["container_image"], "img:1");

        let missing = api
            .get_service_metadata(&project, &ServiceId::new("missing"))
            .await;
        assert!(matches!(
            missing,
            Err(ApiError::Status { status, .. }) if status == reqwest::StatusCode::NOT_FOUND
        ));
    }

    #[tokio::test]
    async fn test_requests_without_token_are_rejected() {
        let (base_url, _backend) = setup_backend().await;
        let api = client(&base_url, None);

        let result = api.list_services(&ProjectId::new("p1")).await;
        assert!(matches!(
            result,
            Err(ApiError::Status { status, .. }) if status == reqwest::StatusCode::UNAUTHORIZED
        ));
    }

    #[derive(Clone, Default)]
    struct RecordingNotifier(Arc<Mutex<Vec<String>>>);

    impl Notifier for RecordingNotifier {
        fn notify(&self, message: String) {
            self.0.lock().unwrap().push(message);
        }
    }

    #[tokio::test]
    async fn test_page_over_http() {
        let (base_url, backend) = setup_backend().await;
        let notifier = RecordingNotifier::default();
        let page = ServicesPage::new(
            ProjectId::new("p1"),
            Arc::new(client(&base_url, Some(TOKEN))),
            notifier.clone(),
        );
        assert_eq!(page.mount().await.unwrap(), 0);
        assert!(page.services().await.is_empty());

        page.open_deploy_dialog().await;
        let rejected = page
            .submit_deploy(DeploymentRequest {
                container_image: String::new(),
                deployment_name: "broken".to_string(),
                deployment_parameters: Default::default(),
            })
            .await
            .unwrap();
        assert_eq!(rejected, ActionOutcome::Failed);
        assert!(page.dialog_state().await.is_open());

        let deployed = page
            .submit_deploy(DeploymentRequest {
                container_image: "img:1".to_string(),
                deployment_name: "svc-a".to_string(),
                deployment_parameters: Default::default(),
            })
            .await
            .unwrap();
        assert_eq!(deployed, ActionOutcome::Succeeded);
        assert!(!page.dialog_state().await.is_open());

        let rows = page.services().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(page.delete_service(&rows[0]).await, ActionOutcome::Succeeded);
        assert!(page.services().await.is_empty());
        assert!(backend.services.lock().unwrap()["p1"].is_empty());

        assert_eq!(
            *notifier.0.lock().unwrap(),
            vec![
                "Could not deploy service 'broken'".to_string(),
                "Deployed service 'svc-a'".to_string(),
                format!("Deleted service '{}'", rows[0].id),
            ]
        );
    }
}
