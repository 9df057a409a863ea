//! HTTP and WebSocket bindings for the simulation backend gateway.
//!
//! The REST surface covers templates, experiments, conversations, results,
//! and the health probe; the WebSocket surface streams live simulation
//! events. Both speak the backend's wire shapes verbatim.

pub mod client;
pub mod types;
pub mod ws;

pub use client::ApiClient;
pub use types::{RunExperimentRequest, RunExperimentResponse, TemplateSummary};
pub use ws::{MemoryOptions, SimulationConfig, WsClientMessage, WsServerMessage};
