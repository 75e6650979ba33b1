//! Marketplace Orchestrator - request dispatch for marketplace agents
//!
//! Accepts a free-form user message, classifies its intent, invokes the
//! matching backend agent over HTTP with bounded retries, and synthesizes a
//! natural-language reply from the combined results.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
