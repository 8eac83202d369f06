// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
// ABOUTME: Re-exports helper modules for the codemind CLI
// ABOUTME: Provides source-file loading and themed display formatting

pub mod display;
pub mod source;
