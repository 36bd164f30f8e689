//! Free-text search matching.
//!
//! Replicates analyzed wildcard semantics (`query*` against title or
//! description): the text is split into lowercase tokens and a record
//! matches when any token starts with the lowercased query.

/// Case-insensitive token-prefix match against a single field.
pub fn field_matches(text: &str, query_lower: &str) -> bool {
    text.split_whitespace()
        .any(|token| token.to_lowercase().starts_with(query_lower))
}

/// Whether a book's title or description matches the query.
pub fn matches_query(title: &str, description: Option<&str>, query: &str) -> bool {
    let query_lower = query.trim().to_lowercase();
    field_matches(title, &query_lower)
        || description.is_some_and(|d| field_matches(d, &query_lower))
}
