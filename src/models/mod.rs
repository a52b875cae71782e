pub mod answer;
pub mod analytics_event;
pub mod catalog;
pub mod draft;
pub mod submission;
pub mod webhook_log;
