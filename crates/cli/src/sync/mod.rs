// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Board service sync.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  reconcile / │────►│ BoardClient │────►│  Transport  │────► board service
//! │   publish    │     │  (+ batch)  │     │   (trait)   │
//! └──────────────┘     └─────────────┘     └─────────────┘
//!        │                    ▲
//!        ▼                    │
//! ┌──────────────┐     ┌─────────────┐
//! │  local tree  │     │  BoardData  │  (rebuilt every run)
//! └──────────────┘     └─────────────┘
//! ```
//!
//! # Features
//!
//! - Direct HTTPS or curl subprocess transport, picked once per session
//! - One interactive re-authorization when the token is rejected
//! - Batched snapshot reads, at most ten routes per round-trip
//! - Idempotent push and pull between directories and boards
//! - Publish posting with preview rotation
//! - Injectable transport trait for testing

mod auth;
mod client;
mod progress;
mod publish;
mod reconcile;
mod resolve;
mod state;
mod transport;

pub use auth::{authorization_url, Authorizer, PromptAuthorizer};
pub use client::{BoardClient, BATCH_LIMIT};
pub use progress::BarProgress;
pub use publish::{get_card, publish_to_card, PublishOutcome};
pub use reconcile::{pull, push, NoProgress, Progress, SyncSummary};
pub use resolve::{find_or_create_board, find_or_create_card, find_or_create_list, BoardTarget, Resolved};
pub use state::{fetch_board_data, fetch_card};
pub use transport::{
    check_response, select_transport, CurlTransport, DirectTransport, FilePart, HttpRequest,
    HttpResponse, Method, Transport,
};

#[cfg(test)]
pub(crate) mod test_helpers;

#[cfg(test)]
mod client_tests;
