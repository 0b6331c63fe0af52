//! Terminal front end of the services page
mod cli;

use crate::cli::{CliCommand, configure_cli};
use env_logger::Env;
use futures_util::future::join_all;
use log::{debug, info, warn};
use servicedeck::ServicesError;
use servicedeck::config::load_config;
use servicedeck::domain::services::models::service::{LogsQuery, ProjectId, Service};
use servicedeck::domain::services::ports::ServicesApi;
use servicedeck::i18n::Translations;
use servicedeck::notifications::Snackbar;
use servicedeck::outbound::http::HttpServicesApi;
use servicedeck::outbound::memory::InMemoryServices;
use servicedeck::page::dialog::{DeployDialog, DialogState};
use servicedeck::page::{ActionOutcome, ServicesPage};
use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tokio::time::sleep;

type Page<A> = ServicesPage<A, Arc<Snackbar>>;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + 'static>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = configure_cli();
    let config = load_config(args.config_path.as_deref())?;
    let project_id = args
        .project
        .map(ProjectId::new)
        .or_else(|| config.project.clone())
        .ok_or(ServicesError::NoProject)?;
    debug!("using project {project_id}");

    let snackbar = Arc::new(Snackbar::new(config.notification_ttl()));
    let translations = Translations::for_locale(&config.locale);

    let succeeded = if args.offline {
        info!("working offline against an in-memory backend with a demo service");
        let api = InMemoryServices::new();
        api.seed_demo(&project_id).await;
        let page = ServicesPage::new(project_id, Arc::new(api), snackbar.clone())
            .with_snackbar(snackbar)
            .with_translations(translations);
        run(page, args.command).await?
    } else {
        let api = HttpServicesApi::new(config.api_url()?, config.api.token.clone());
        let page = ServicesPage::new(project_id, Arc::new(api), snackbar.clone())
            .with_snackbar(snackbar)
            .with_translations(translations);
        run(page, args.command).await?
    };

    if !succeeded {
        process::exit(1);
    }
    Ok(())
}

async fn run<A: ServicesApi>(
    page: Page<A>,
    command: CliCommand,
) -> Result<bool, Box<dyn std::error::Error + 'static>> {
    if let Err(e) = page.mount().await {
        warn!("could not load the services: {e}");
    }
    match command {
        CliCommand::List { watch } => {
            print!("{}", page.view().await);
            if let Some(interval) = watch {
                watch_services(&page, Duration::from_secs(interval)).await?;
            }
            Ok(true)
        }
        CliCommand::Deploy {
            image,
            name,
            params,
        } => {
            page.open_deploy_dialog().await;
            let mut dialog = DeployDialog::default().with_image(image).with_name(name);
            for param in &params {
                dialog = dialog.with_parameter(param)?;
            }
            let outcome = page.submit_deploy(dialog.request()).await?;
            if let DialogState::Open(form) = page.dialog_state().await {
                debug!("dialog left open after {} attempt(s)", form.attempts);
            }
            print!("{}", page.view().await);
            Ok(outcome == ActionOutcome::Succeeded)
        }
        CliCommand::Delete { ids } => {
            let services = page.services().await;
            let rows: Vec<Service> = ids
                .into_iter()
                .map(|id| {
                    services
                        .iter()
                        .find(|s| s.id.as_str() == id)
                        .cloned()
                        .unwrap_or_else(|| Service::new(id))
                })
                .collect();
            let outcomes = join_all(rows.iter().map(|row| page.delete_service(row))).await;
            print!("{}", page.view().await);
            Ok(outcomes.iter().all(|o| *o == ActionOutcome::Succeeded))
        }
        CliCommand::Logs { id, lines } => {
            let page = page.with_logs_query(LogsQuery { lines });
            let logs = page.show_logs(&Service::new(id)).await?;
            println!("{logs}");
            Ok(true)
        }
        CliCommand::Metadata { id } => {
            let metadata = page.show_metadata(&Service::new(id)).await?;
            println!("{metadata}");
            Ok(true)
        }
    }
}

async fn watch_services<A: ServicesApi>(
    page: &Page<A>,
    interval: Duration,
) -> Result<(), Box<dyn std::error::Error + 'static>> {
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
        info!("Received shutdown signal, stopping watch...");
    })?;

    while running.load(Ordering::SeqCst) {
        let now = Instant::now();
        while running.load(Ordering::SeqCst) && now.elapsed() < interval {
            sleep(Duration::from_millis(500)).await;
        }
        if !running.load(Ordering::SeqCst) {
            break;
        }
        if let Err(e) = page.reload().await {
            warn!("refresh failed, showing the previous list: {e}");
        }
        print!("{}", page.view().await);
    }
    Ok(())
}
