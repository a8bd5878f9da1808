//! Conjoint Survey — choice-task motor insurance survey backend.

pub mod api;
pub mod catalog;
pub mod config;
pub mod design;
pub mod engine;
pub mod error;
pub mod flow;
pub mod session;
pub mod sheets;
pub mod submit;
