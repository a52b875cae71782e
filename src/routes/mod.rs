pub mod admin;
pub mod assessment;
pub mod export;
pub mod health;
