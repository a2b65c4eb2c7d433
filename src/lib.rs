pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod high_score;
pub mod scheduler;
pub mod tuning;
pub mod view;
