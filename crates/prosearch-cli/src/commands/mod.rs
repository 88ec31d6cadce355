//! Command handlers

pub mod config;
pub mod document;
pub mod menu;
pub mod status;
