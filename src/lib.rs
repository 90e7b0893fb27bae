// Copyright 2026 Faleproxy Contributors
// SPDX-License-Identifier: Apache-2.0

//! Faleproxy runtime library — fetch remote pages and rewrite their
//! visible text, preserving markup, attributes, and casing.
//!
//! This library crate exposes the core modules for integration testing.

pub mod cli;
pub mod fetch;
pub mod rest;
pub mod rewrite;
pub mod substitute;
