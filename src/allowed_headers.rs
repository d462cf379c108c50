use crate::constants::WILDCARD;
use crate::header_list::{all_satisfied, dedup_by, serialize};
use crate::util::equals_ignore_case;

/// Configuration for the `Access-Control-Allow-Headers` response value.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum AllowedHeaders {
    List(Vec<String>),
    /// Wildcard: every requested header is allowed and `*` is emitted on preflight.
    Any,
}

impl Default for AllowedHeaders {
    fn default() -> Self {
        AllowedHeaders::List(Vec::new())
    }
}

impl AllowedHeaders {
    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values
            .into_iter()
            .map(|value| value.into().trim().to_string())
            .collect();
        let deduped = dedup_by(values, equals_ignore_case);

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

    pub fn allows_headers<S: AsRef<str>>(&self, requested: &[S]) -> bool {
        match self {
            Self::Any => true,
            Self::List(allowed) => all_satisfied(requested, allowed, false),
        }
    }

    pub fn header_value(&self) -> Option<String> {
        match self {
            Self::Any => Some(WILDCARD.to_string()),
            Self::List(values) if values.is_empty() => None,
            Self::List(values) => Some(serialize(values)),
        }
    }
}

#[cfg(test)]
#[path = "allowed_headers_test.rs"]
mod allowed_headers_test;
