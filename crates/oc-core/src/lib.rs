// Copyright 2025 Schelling Point Labs Inc
// SPDX-License-Identifier: AGPL-3.0-only

//! Investigation lifecycle logic for the on-call console
//!
//! This crate owns the client-observed state of an investigation from
//! submission through polling to terminal resolution:
//!
//! - [`lifecycle`] — the state machine tracking one investigation's
//!   phase and latest snapshot
//! - [`watcher`] — a cancellable polling task that drives the state
//!   machine from periodic backend fetches
//! - [`submit`] — validation and submission of new investigations
//!
//! Everything here runs against the `ClientApi` trait, so the same
//! logic serves the production REST client and scripted test mocks.

pub mod error;
pub mod lifecycle;
pub mod submit;
pub mod watcher;

pub use error::*;
pub use lifecycle::*;
pub use submit::*;
pub use watcher::*;
