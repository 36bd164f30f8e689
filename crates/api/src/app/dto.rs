use serde::Deserialize;

// Request DTOs. Creation and patch payloads deserialize straight into
// the domain types (`NewBook`, `BookPatch`, `NewCategory`); only the
// shapes without a domain counterpart live here.

#[derive(Debug, Deserialize)]
pub struct SellBookRequest {
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TopSellingQuery {
    pub limit: Option<usize>,
}
