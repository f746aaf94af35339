//! `ums-app` -- headless companion for the university management web app.
//!
//! Connects to the UMS broker, subscribes to exam outcome notifications,
//! seeds the notification table from the persisted backlog, and populates
//! the course selects once at startup. Runs until Ctrl-C.
//!
//! # Environment variables
//!
//! | Variable        | Required | Default                  | Description                     |
//! |-----------------|----------|--------------------------|---------------------------------|
//! | `BROKER_WS_URL` | no       | `ws://localhost:8081/ws` | STOMP-over-WebSocket endpoint   |
//! | `API_BASE_URL`  | no       | `http://localhost:8081`  | REST API base URL               |
//! | `COURSES_TOKEN` | no       | --                       | Bearer token for course lookups |

mod config;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ums_catalog::{CatalogApi, CoursePopulator};
use ums_notify::{NotificationApi, NotificationListener};

use crate::config::ClientConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ums_app=info,ums_notify=info,ums_stomp=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ClientConfig::from_env();

    tracing::info!(
        broker = %config.broker_ws_url,
        api = %config.api_base_url,
        "Starting ums-app",
    );

    // Notification channel: connect, subscribe, seed from the backlog.
    let api = NotificationApi::new(config.api_base_url.clone());
    let mut listener = NotificationListener::connect(&config.broker_ws_url, api).await?;
    listener.subscribe_exam_outcomes().await?;

    if let Err(e) = listener.load_backlog().await {
        tracing::error!(error = %e, "Failed to load notification backlog");
    }
    tracing::info!(rows = listener.table().len(), "Notification table ready");

    // Log every client event as it happens.
    let mut events = listener.subscribe_events();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            tracing::info!(?event, "Notification event");
        }
    });

    populate_selects(&config).await;

    // Process pushed notifications until Ctrl-C.
    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown requested");
            shutdown.cancel();
        }
    });

    listener.run(&cancel).await;

    if let Err(e) = listener.disconnect().await {
        tracing::warn!(error = %e, "Disconnect after session end failed");
    }
    Ok(())
}

/// Populate the degree-course select, then the dependent course select
/// for the first degree course, mirroring the page-ready refresh.
async fn populate_selects(config: &ClientConfig) {
    let mut catalog = CatalogApi::new(config.api_base_url.clone());
    if let Some(token) = &config.courses_token {
        catalog = catalog.with_bearer_token(token);
    }
    let populator = CoursePopulator::new(catalog);

    let mut degree_select = CoursePopulator::degree_course_select();
    match populator.refresh_degree_courses(&mut degree_select).await {
        Ok(outcome) => tracing::info!(?outcome, "Degree-course select populated"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to populate degree courses");
            return;
        }
    }

    let Some(first_degree) = degree_select.options().first().map(|o| o.value.clone()) else {
        return;
    };

    let mut course_select = CoursePopulator::course_select();
    match populator
        .refresh_courses(&mut course_select, &first_degree)
        .await
    {
        Ok(outcome) => {
            tracing::info!(degree = %first_degree, ?outcome, "Course select populated");
        }
        Err(e) => tracing::error!(error = %e, "Failed to populate courses"),
    }

    // Professor sessions also list their examination appeals.
    let mut appeals_select = CoursePopulator::exam_appeals_select();
    match populator.refresh_exam_appeals(&mut appeals_select).await {
        Ok(outcome) => tracing::info!(?outcome, "Examination-appeal select populated"),
        Err(e) => tracing::error!(error = %e, "Failed to populate examination appeals"),
    }
}
