pub mod dialog;
pub mod list;
pub mod view;

use crate::ServicesError;
use crate::domain::services::models::error::ApiError;
use crate::domain::services::models::service::{
    DeploymentRequest, LogsQuery, ProjectId, Service, ServiceInput, ServiceLogs, ServiceMetadata,
};
use crate::domain::services::ports::{Notifier, ServicesApi};
use crate::i18n::Translations;
use crate::notifications::Snackbar;
use dialog::{DeployDialog, DialogState};
use list::ServiceList;
use log::{debug, info, warn};
use std::sync::Arc;
use tokio::sync::Mutex;
use view::{ButtonView, PageView};

/// Result of a deploy or delete gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Succeeded,
    Failed,
}

/// The services page of a single project.
///
/// Every backend call made from here is scoped to the project the page was
/// created for.
pub struct ServicesPage<A: ServicesApi, N: Notifier> {
    project_id: ProjectId,
    api: Arc<A>,
    notifier: N,
    snackbar: Option<Arc<Snackbar>>,
    list: ServiceList<A>,
    dialog: Mutex<DialogState>,
    translations: Translations,
    class_name: String,
    logs_query: LogsQuery,
}

impl<A: ServicesApi, N: Notifier> ServicesPage<A, N> {
    pub fn new(project_id: ProjectId, api: Arc<A>, notifier: N) -> Self {
        Self {
            list: ServiceList::new(api.clone(), project_id.clone()),
            project_id,
            api,
            notifier,
            snackbar: None,
            dialog: Mutex::new(DialogState::Closed),
            translations: Translations::default(),
            class_name: String::new(),
            logs_query: LogsQuery::default(),
        }
    }

    pub fn with_translations(mut self, translations: Translations) -> Self {
        self.translations = translations;
        self
    }

    /// Snackbar whose visible messages are part of [`ServicesPage::view`].
    pub fn with_snackbar(mut self, snackbar: Arc<Snackbar>) -> Self {
        self.snackbar = Some(snackbar);
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    pub fn with_logs_query(mut self, logs_query: LogsQuery) -> Self {
        self.logs_query = logs_query;
        self
    }

    pub fn project_id(&self) -> &ProjectId {
        &self.project_id
    }

    /// Initial fetch of the service list. Returns the number of services.
    pub async fn mount(&self) -> Result<usize, ApiError> {
        self.list.reload().await
    }

    /// On failure the previous list stays in place.
    pub async fn reload(&self) -> Result<usize, ApiError> {
        self.list.reload().await
    }

    pub async fn services(&self) -> Vec<Service> {
        self.list.services().await
    }

    pub fn deploy_button(&self) -> ButtonView {
        ButtonView::deploy(&self.translations, &self.class_name)
    }

    pub async fn view(&self) -> PageView {
        let services = self.list.services().await;
        let dialog_open = self.dialog.lock().await.is_open();
        let notifications = self
            .snackbar
            .as_ref()
            .map(|snackbar| snackbar.visible())
            .unwrap_or_default();
        PageView::new(&self.translations, &self.class_name, &services, dialog_open)
            .with_notifications(notifications)
    }

    pub async fn dialog_state(&self) -> DialogState {
        self.dialog.lock().await.clone()
    }

    /// Activates the deploy control. Reopening keeps an already open form.
    pub async fn open_deploy_dialog(&self) {
        let mut dialog = self.dialog.lock().await;
        if !dialog.is_open() {
            *dialog = DialogState::Open(DeployDialog::default());
        }
    }

    pub async fn close_deploy_dialog(&self) {
        *self.dialog.lock().await = DialogState::Closed;
    }

    /// Submits the deploy dialog.
    ///
    /// On failure the dialog stays open with the submitted values so the
    /// user can correct them and retry.
    pub async fn submit_deploy(
        &self,
        request: DeploymentRequest,
    ) -> Result<ActionOutcome, ServicesError> {
        {
            let mut dialog = self.dialog.lock().await;
            let DialogState::Open(form) = &mut *dialog else {
                return Err(ServicesError::DialogClosed);
            };
            form.draft = request.clone();
            form.attempts += 1;
        }

        let name = request.deployment_name.clone();
        let input = ServiceInput::from(request);
        match self.api.deploy_service(&self.project_id, &input).await {
            Ok(service) => {
                info!("deployed service {} ({name})", service.id);
                self.notifier.notify(format!("Deployed service '{name}'"));
                self.close_deploy_dialog().await;
                // a failed refresh is logged by the list and keeps the old rows
                let _ = self.reload().await;
                Ok(ActionOutcome::Succeeded)
            }
            Err(e) => {
                warn!("deploying service {name} failed: {e}");
                self.notifier
                    .notify(format!("Could not deploy service '{name}'"));
                Ok(ActionOutcome::Failed)
            }
        }
    }

    pub async fn delete_service(&self, row: &Service) -> ActionOutcome {
        let service_id = &row.id;
        match self.api.delete_service(&self.project_id, service_id).await {
            Ok(()) => {
                self.notifier
                    .notify(format!("Deleted service '{service_id}'"));
                let _ = self.reload().await;
                ActionOutcome::Succeeded
            }
            Err(e) => {
                warn!("deleting service {service_id} failed: {e}");
                self.notifier
                    .notify(format!("Could not delete service '{service_id}'"));
                ActionOutcome::Failed
            }
        }
    }

    /// Fetches the logs of a row. Nothing is shown to the user.
    pub async fn show_logs(&self, row: &Service) -> Result<ServiceLogs, ServicesError> {
        let logs = self
            .api
            .get_service_logs(&self.project_id, &row.id, self.logs_query)
            .await
            .inspect_err(|e| warn!("fetching logs of service {} failed: {e}", row.id))?;
        debug!("logs of service {}:\n{logs}", row.id);
        Ok(logs)
    }

    /// Fetches the metadata of a row. Nothing is shown to the user.
    pub async fn show_metadata(&self, row: &Service) -> Result<ServiceMetadata, ServicesError> {
        let metadata = self
            .api
            .get_service_metadata(&self.project_id, &row.id)
            .await
            .inspect_err(|e| warn!("fetching metadata of service {} failed: {e}", row.id))?;
        debug!("metadata of service {}: {metadata}", row.id);
        Ok(metadata)
    }
}
