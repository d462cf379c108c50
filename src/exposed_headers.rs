use crate::constants::WILDCARD;
use crate::header_list::{dedup_by, serialize};
use crate::util::equals_ignore_case;

/// Configuration mirror of the `Access-Control-Expose-Headers` response header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExposedHeaders {
    List(Vec<String>),
    Any,
}

impl Default for ExposedHeaders {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl ExposedHeaders {
    /// Builds an expose-list from the provided iterator, trimming whitespace and
    /// removing case-insensitive duplicates.
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

    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Serializes the configuration into a header-ready value. An empty list
    /// yields `None` so the header is omitted rather than sent blank.
    pub fn header_value(&self) -> Option<String> {
        match self {
            Self::List(values) if values.is_empty() => None,
            Self::List(values) => Some(serialize(values)),
            Self::Any => Some(WILDCARD.to_string()),
        }
    }
}

#[cfg(test)]
#[path = "exposed_headers_test.rs"]
mod exposed_headers_test;
