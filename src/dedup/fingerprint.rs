//! Request fingerprint derivation.
//!
//! # Responsibilities
//! - Derive the key identifying "the same logical request" for deduplication
//! - Decide which verbs participate in deduplication
//!
//! # Design Decisions
//! - Fingerprint = method + path-and-query + serialized body, as a plain
//!   string key; it exists only while the request is in flight
//! - Only read/create/update/delete verbs are deduplicated; anything else
//!   passes through untouched

use reqwest::Method;
use std::borrow::Cow;
use std::fmt;

/// True when `method` participates in deduplication.
///
/// The allow-list is fixed: GET, POST, PUT, DELETE.
pub fn applies_to(method: &Method) -> bool {
    *method == Method::GET
        || *method == Method::POST
        || *method == Method::PUT
        || *method == Method::DELETE
}

/// Derived key identifying one logical request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Derive a fingerprint from the verb, the path-and-query as passed by
    /// the caller, and the serialized request body (if any).
    pub fn derive(method: &Method, path_and_query: &str, body: Option<&[u8]>) -> Self {
        let body_part: Cow<'_, str> = match body {
            Some(bytes) => String::from_utf8_lossy(bytes),
            None => Cow::Borrowed(""),
        };
        Self(format!("{} {} {}", method, path_and_query, body_part))
    }

    /// The raw key value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
