// SPDX-FileCopyrightText: 2026 UI Hub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the registry and its backends.

pub mod store;

pub use store::{ResourceStore, StoreError};
