// ABOUTME: Core types for the WellTrack nutrition scoring and dietary compatibility engine
// ABOUTME: Foundation crate with error handling and nutrition, dietary, and recipe models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # `WellTrack` Core
//!
//! Foundation crate providing the shared types consumed by the scoring and
//! dietary compatibility engine. It holds no algorithms, so it changes
//! rarely and keeps incremental builds of the engine cheap.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `AppResult`
//! - **models**: Nutrient profiles, meal grades, dietary profiles, violations, and recipe inputs

/// Unified error handling system with standard error codes
pub mod errors;

/// Core data models (nutrition, dietary profiles, recipes)
pub mod models;
