//! Wire encoding for the comma-joined CORS list headers.

use crate::util::equals_ignore_case;

/// Joins entries with `", "` in configured order. A lone `*` serializes verbatim.
pub fn serialize<S: AsRef<str>>(list: &[S]) -> String {
    let mut out = String::with_capacity(list.iter().map(|entry| entry.as_ref().len() + 2).sum());
    for (idx, entry) in list.iter().enumerate() {
        if idx > 0 {
            out.push_str(", ");
        }
        out.push_str(entry.as_ref());
    }
    out
}

/// Splits a comma-separated request header value, trimming entries and
/// dropping empty ones.
pub fn split_list(value: &str) -> Vec<&str> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect()
}

pub fn contains_ignore_case<S: AsRef<str>>(list: &[S], token: &str) -> bool {
    list.iter()
        .any(|entry| equals_ignore_case(entry.as_ref(), token))
}

/// True when every requested token is allowed. An empty request is trivially satisfied.
pub fn all_satisfied<R, A>(requested: &[R], allowed: &[A], wildcard_allows_all: bool) -> bool
where
    R: AsRef<str>,
    A: AsRef<str>,
{
    wildcard_allows_all
        || requested
            .iter()
            .all(|token| contains_ignore_case(allowed, token.as_ref()))
}

/// Keeps the first spelling of each entry, comparing with `same`.
pub(crate) fn dedup_by<F>(values: Vec<String>, same: F) -> Vec<String>
where
    F: Fn(&str, &str) -> bool,
{
    let mut deduped: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        if !deduped.iter().any(|existing| same(existing, &value)) {
            deduped.push(value);
        }
    }
    deduped
}

#[cfg(test)]
#[path = "header_list_test.rs"]
mod header_list_test;
