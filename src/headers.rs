use crate::constants::{WILDCARD, header};
use indexmap::IndexMap;

/// Response headers in emission order.
pub type Headers = IndexMap<String, String>;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct HeaderCollection {
    headers: Headers,
}

impl HeaderCollection {
    pub(crate) fn new() -> Self {
        Self::with_estimate(8)
    }

    pub(crate) fn with_estimate(estimate: usize) -> Self {
        Self {
            headers: IndexMap::with_capacity(estimate),
        }
    }

    /// Sets `name`, replacing any existing entry whose name differs only in case.
    /// `Vary` values are merged instead of replaced.
    pub(crate) fn push<N, V>(&mut self, name: N, value: V)
    where
        N: Into<String>,
        V: Into<String>,
    {
        let name = name.into();
        if name.eq_ignore_ascii_case(header::VARY) {
            self.add_vary(value);
            return;
        }

        let value = value.into();
        match self.position(&name) {
            Some(idx) => {
                self.headers.shift_remove_index(idx);
                self.headers.shift_insert(idx, name, value);
            }
            None => {
                self.headers.insert(name, value);
            }
        }
    }

    pub(crate) fn add_vary<S: Into<String>>(&mut self, value: S) {
        let existing = self.position(header::VARY);
        let mut entries: Vec<String> = existing
            .and_then(|idx| self.headers.get_index(idx))
            .map(|(_, value)| {
                value
                    .split(',')
                    .map(|part| part.trim().to_string())
                    .filter(|part| !part.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        for incoming in value.into().split(',').map(str::trim) {
            if incoming.is_empty()
                || entries
                    .iter()
                    .any(|entry| entry.eq_ignore_ascii_case(incoming))
            {
                continue;
            }
            entries.push(incoming.to_string());
        }

        if entries.is_empty() {
            return;
        }

        // `*` already varies on everything.
        let value = if entries.iter().any(|entry| entry == WILDCARD) {
            WILDCARD.to_string()
        } else {
            entries.join(", ")
        };
        match existing {
            Some(idx) => {
                if let Some((_, slot)) = self.headers.get_index_mut(idx) {
                    *slot = value;
                }
            }
            None => {
                self.headers.insert(header::VARY.to_string(), value);
            }
        }
    }

    pub(crate) fn extend(&mut self, other: HeaderCollection) {
        for (name, value) in other.headers {
            self.push(name, value);
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    pub(crate) fn into_headers(self) -> Headers {
        self.headers
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.headers
            .keys()
            .position(|existing| existing.eq_ignore_ascii_case(name))
    }
}

impl From<Headers> for HeaderCollection {
    fn from(headers: Headers) -> Self {
        Self { headers }
    }
}

/// Case-insensitive lookup in a header map.
pub fn header_value<'a>(headers: &'a Headers, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

#[cfg(test)]
#[path = "headers_test.rs"]
mod headers_test;
