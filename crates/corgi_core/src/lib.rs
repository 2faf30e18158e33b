/*
 * SPDX-FileCopyrightText: 2026 RedHunt07 - FEDI3 Project
 * SPDX-License-Identifier: AGPL-3.0-only
 */

pub mod action;
pub mod analytics;
pub mod api;
pub mod cache;
pub mod config;
pub mod controller;
pub mod logging;
pub mod session;
pub mod ui_events;

#[cfg(test)]
mod testing;

pub use action::{ActionState, Signal, StatusAction};
pub use controller::{StatusActions, StatusDeps};
