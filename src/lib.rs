pub mod app;
pub mod booking;
pub mod config;
pub mod domain;
pub mod i18n;
pub mod map;
pub mod provider;
pub mod shared;
pub mod snapshot;
pub mod tasks;
pub mod workflow;
