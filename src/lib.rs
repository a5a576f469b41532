// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregator;
pub mod categorizer;
pub mod cli;
pub mod commands;
pub mod error;
pub mod forecast;
pub mod ingest;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod utils;
