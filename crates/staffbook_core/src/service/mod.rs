//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, mutation and persistence into use-case APIs.
//! - Keep presentation adapters decoupled from storage details.

pub mod record_store;
