// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Keyword categorization of statement descriptions.
//!
//! The table is walked in declaration order and the first category with a
//! keyword contained in the lower-cased description wins. Matching is plain
//! substring search, so "bar" also matches "barbearia". Keywords are compared
//! as written: the upper-case `TIT` entry never matches a lower-cased
//! description, so "instituto" stays out of Moradia.

use crate::models::{Category, Transaction};
use once_cell::sync::Lazy;
use serde::Serialize;

const KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Supermercado,
        &[
            "supermercado",
            "mercado",
            "carrefour",
            "extra",
            "pao de acucar",
            "atacadao",
            "pao",
        ],
    ),
    (
        Category::Restaurante,
        &[
            "restaurante",
            "bar",
            "cafe",
            "padaria",
            "mcdonald",
            "burger king",
            "pizza",
        ],
    ),
    (
        Category::Transporte,
        &[
            "uber",
            "99",
            "taxi",
            "combustivel",
            "posto",
            "gasolina",
            "metro",
            "onibus",
        ],
    ),
    (
        Category::Saude,
        &["farmacia", "drogaria", "medico", "hospital", "clinica", "dentista"],
    ),
    (
        Category::Lazer,
        &["cinema", "show", "teatro", "parque", "viagem", "hotel"],
    ),
    (
        Category::Educacao,
        &["escola", "faculdade", "curso", "livro", "material escolar"],
    ),
    (
        Category::Moradia,
        &[
            "aluguel",
            "condominio",
            "energia",
            "luz",
            "agua",
            "internet",
            "telefone",
            "TIT",
        ],
    ),
    (
        Category::Servicos,
        &["seguro", "cartao", "banco", "tarifa", "taxa", "conta", "black"],
    ),
    (Category::Telefonia, &["internet", "claro", "vivo", "net"]),
    (Category::Outros, &[]),
];

/// A category and its keywords, as declared.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryRule {
    pub category: Category,
    pub keywords: Vec<String>,
}

static RULES: Lazy<Vec<CategoryRule>> = Lazy::new(|| {
    KEYWORDS
        .iter()
        .map(|(category, words)| CategoryRule {
            category: *category,
            keywords: words.iter().map(|w| w.to_string()).collect(),
        })
        .collect()
});

/// The rule table in match order.
pub fn rules() -> &'static [CategoryRule] {
    &RULES
}

pub fn categorize(description: &str) -> Category {
    let desc = description.to_lowercase();
    RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| desc.contains(k.as_str())))
        .map(|rule| rule.category)
        .unwrap_or(Category::Outros)
}

pub fn categorize_all(txns: &mut [Transaction]) {
    for t in txns.iter_mut() {
        t.category = categorize(&t.description);
    }
    tracing::debug!(count = txns.len(), "categorized transactions");
}
