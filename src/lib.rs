//! Travia - Conversational travel assistant backend
//!
//! This crate orchestrates intent extraction, flight and hotel search, and
//! web-search fallback behind a small REST API, following a hexagonal
//! architecture: domain types at the core, ports at the seams, adapters for
//! the LLM, travel provider, search backends, and HTTP surface.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
