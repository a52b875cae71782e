pub mod catalog;
pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod form;
pub mod i18n;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use crate::services::{
    analytics_service::AnalyticsService, draft_service::DraftService,
    notification_service::NotificationService, submission_service::SubmissionService,
};
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub submission_service: SubmissionService,
    pub draft_service: DraftService,
    pub analytics_service: AnalyticsService,
    pub notification_service: NotificationService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let config = crate::config::get_config();

        let submission_service = SubmissionService::new(pool.clone());
        let draft_service = DraftService::new(pool.clone());
        let analytics_service = AnalyticsService::new(pool.clone());
        let notification_service =
            NotificationService::new(pool.clone(), config.submission_webhook_url.clone());

        Self {
            pool,
            submission_service,
            draft_service,
            analytics_service,
            notification_service,
        }
    }
}
