use crate::constants::WILDCARD;
use crate::header_list::{dedup_by, serialize};

/// Configuration for the `Access-Control-Allow-Methods` response header.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum AllowedMethods {
    /// Wildcard `*`: every method is allowed. Never valid on a credentialed policy.
    Any,
    /// Explicit methods, compared case-sensitively and emitted in configured order.
    List(Vec<String>),
}

impl Default for AllowedMethods {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl AllowedMethods {
    /// Builds the allow-list from configured entries, trimming whitespace and
    /// dropping exact duplicates. A lone `*` becomes [`Self::Any`].
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values
            .into_iter()
            .map(|value| value.into().trim().to_string())
            .collect();
        let deduped = dedup_by(values, |a, b| a == b);

        if deduped.len() == 1 && deduped[0] == WILDCARD {
            return Self::Any;
        }

        Self::List(deduped)
    }

    pub fn any() -> Self {
        Self::Any
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    pub fn allows_method(&self, method: &str) -> bool {
        match self {
            Self::Any => true,
            Self::List(values) => values.iter().any(|value| value == method),
        }
    }

    /// Header value representation; `None` when nothing is configured.
    pub fn header_value(&self) -> Option<String> {
        match self {
            Self::Any => Some(WILDCARD.to_string()),
            Self::List(values) if values.is_empty() => None,
            Self::List(values) => Some(serialize(values)),
        }
    }
}

#[cfg(test)]
#[path = "allowed_methods_test.rs"]
mod allowed_methods_test;
