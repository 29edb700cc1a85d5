//! REST client for the upstream Funnel task-execution service.
//!
//! Provides the gateway configuration, URL construction for the five
//! job/worker endpoints, and [`api::FunnelApi`], which forwards each
//! operation as a single HTTP call and relays the upstream response.

pub mod api;
pub mod config;
pub mod endpoints;
pub mod relay;
