pub mod config;
pub mod core;
pub mod data;
pub mod inference;
pub mod logging;
pub mod normalization;
pub mod presentation;
pub mod service;
pub mod statistics;
pub mod ui;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
