// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categorizer::categorize;
use anyhow::Result;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let desc = m.get_one::<String>("desc").map(String::as_str).unwrap_or("");
    println!("{}", categorize(desc));
    Ok(())
}
