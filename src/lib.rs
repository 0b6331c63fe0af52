//! Manage the deployed services of a project.
pub mod config;
pub mod domain;
pub mod i18n;
pub mod notifications;
pub mod outbound;
pub mod page;

use crate::domain::services::models::error::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServicesError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("deploy dialog is not open")]
    DialogClosed,
    #[error("invalid deployment parameter `{0}`, expected KEY=VALUE")]
    InvalidParameter(String),
    #[error("no project selected")]
    NoProject,
    #[error("invalid backend url: {0}")]
    InvalidUrl(String),
    #[error(transparent)]
    Config(#[from] Box<figment::Error>),
}
