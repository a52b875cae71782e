pub mod analytics_service;
pub mod draft_service;
pub mod export_service;
pub mod notification_service;
pub mod submission_service;
