//! REST client for the remote image-generation service.
//!
//! Wraps the service's fixed HTTP API (login, asset upload, job
//! submission, status polling, detail retrieval, cancellation) behind
//! [`api::StyleApi`], with the wire formats in [`wire`] and the
//! orchestrator-facing abstraction in [`service`].

pub mod api;
pub mod config;
pub mod service;
pub mod session;
pub mod wire;
