// SPDX-FileCopyrightText: 2026 UI Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for UI hub integration tests.
//!
//! # Components
//!
//! - [`TestHarness`] - catalog, store, registry and router wired together
//! - [`FailingStore`] - a store that rejects every call as unavailable

pub mod failing_store;
pub mod harness;

pub use failing_store::FailingStore;
pub use harness::{RunningServer, TestHarness, TestHarnessBuilder};
