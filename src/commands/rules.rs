// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::categorizer::rules;
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let json_flag = m.get_flag("json");
    if maybe_print_json(json_flag, &rules())? {
        return Ok(());
    }
    let data: Vec<Vec<String>> = rules()
        .iter()
        .enumerate()
        .map(|(i, rule)| {
            vec![
                (i + 1).to_string(),
                rule.category.to_string(),
                rule.keywords.join(", "),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["#", "Category", "Keywords"], data));
    Ok(())
}
