// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports command modules for the codemind CLI
// ABOUTME: Provides the run, ask, and history commands

pub mod ask;
pub mod history;
pub mod run;
