use crate::constants::WILDCARD;
use crate::constants::limits::MAX_ORIGIN_LENGTH;
use crate::util::{default_port, is_uri_scheme};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Reasons an origin pattern is rejected while a policy is validated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("origin pattern length {length} exceeds maximum allowed {max}")]
    TooLong { length: usize, max: usize },
    #[error("origin pattern must have the form scheme://host[:port]")]
    MissingScheme,
    #[error("'{0}' is not a valid URI scheme")]
    InvalidScheme(String),
    #[error("origin pattern host is empty")]
    EmptyHost,
    #[error("'{0}' is not a valid host")]
    InvalidHost(String),
    #[error("origin pattern may contain at most one wildcard")]
    MultipleWildcards,
    #[error("the wildcard must be the whole leftmost host label, as in '*.example.com'")]
    MisplacedWildcard,
    #[error("origin pattern must not contain a path, query, fragment or userinfo")]
    UnexpectedComponent,
    #[error("'{0}' is not a valid port; expected a number between 1 and 65535")]
    InvalidPort(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum HostPattern {
    Exact(String),
    /// `scheme://*` accepts every host on the scheme and port.
    AnyHost,
    /// `*.example.com`, stored as the lowercase labels after the wildcard.
    Subdomains(Vec<String>),
}

impl HostPattern {
    fn matches(&self, host: &str) -> bool {
        match self {
            HostPattern::Exact(expected) => expected == host,
            HostPattern::AnyHost => true,
            HostPattern::Subdomains(suffix) => {
                let mut labels = host.rsplit('.');
                for expected in suffix.iter().rev() {
                    match labels.next() {
                        Some(label) if label == expected => {}
                        _ => return false,
                    }
                }
                // At least one label has to stand in for the wildcard.
                labels.next().is_some()
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PatternKind {
    Any,
    Tuple {
        scheme: String,
        host: HostPattern,
        port: Option<u16>,
    },
}

/// A pre-validated entry of a policy's `allowOrigins` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginPattern {
    source: String,
    kind: PatternKind,
}

impl OriginPattern {
    pub fn any() -> Self {
        Self {
            source: WILDCARD.to_string(),
            kind: PatternKind::Any,
        }
    }

    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let pattern = pattern.trim();
        if pattern.len() > MAX_ORIGIN_LENGTH {
            return Err(PatternError::TooLong {
                length: pattern.len(),
                max: MAX_ORIGIN_LENGTH,
            });
        }

        if pattern == WILDCARD {
            return Ok(Self::any());
        }

        let (scheme, authority) = pattern
            .split_once("://")
            .ok_or(PatternError::MissingScheme)?;
        if !is_uri_scheme(scheme) {
            return Err(PatternError::InvalidScheme(scheme.to_string()));
        }

        let (host, port) = split_authority(authority)?;
        let host = parse_host_pattern(host)?;

        Ok(Self {
            source: pattern.to_string(),
            kind: PatternKind::Tuple {
                scheme: scheme.to_string(),
                host,
                port,
            },
        })
    }

    pub fn is_any(&self) -> bool {
        matches!(self.kind, PatternKind::Any)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Tests a raw `Origin` header value against this pattern.
    ///
    /// Values that are not a serialized `scheme://host[:port]` tuple (including
    /// `null`) never match, not even the `*` pattern.
    pub fn matches(&self, origin: &str) -> bool {
        match RequestOrigin::parse(origin) {
            Some(parsed) => self.matches_parsed(&parsed),
            None => false,
        }
    }

    fn matches_parsed(&self, origin: &RequestOrigin<'_>) -> bool {
        match &self.kind {
            PatternKind::Any => true,
            PatternKind::Tuple { scheme, host, port } => {
                scheme == origin.scheme
                    && effective_port(scheme, *port) == origin.effective_port()
                    && host.matches(&origin.host)
            }
        }
    }
}

impl FromStr for OriginPattern {
    type Err = PatternError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl fmt::Display for OriginPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Value placed in `Access-Control-Allow-Origin` for a matched request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllowOrigin<'a> {
    Any,
    Mirror(&'a str),
}

impl<'a> AllowOrigin<'a> {
    /// Picks the echoed value for a matched pattern. A credentialed policy always
    /// mirrors the literal request origin, even for the `*` pattern.
    pub fn for_pattern(pattern: &OriginPattern, origin: &'a str, credentials: bool) -> Self {
        if pattern.is_any() && !credentials {
            AllowOrigin::Any
        } else {
            AllowOrigin::Mirror(origin)
        }
    }

    pub fn header_value(&self) -> &'a str {
        match self {
            AllowOrigin::Any => WILDCARD,
            AllowOrigin::Mirror(origin) => origin,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, AllowOrigin::Any)
    }
}

/// The first pattern accepting a request origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OriginMatch<'a> {
    pub pattern_index: usize,
    pub allow_origin: AllowOrigin<'a>,
}

/// Scans `patterns` in configured order; the first match decides the echoed value.
pub fn match_any<'a>(
    patterns: &[OriginPattern],
    origin: &'a str,
    credentials: bool,
) -> Option<OriginMatch<'a>> {
    let parsed = RequestOrigin::parse(origin)?;
    patterns
        .iter()
        .position(|pattern| pattern.matches_parsed(&parsed))
        .map(|pattern_index| OriginMatch {
            pattern_index,
            allow_origin: AllowOrigin::for_pattern(&patterns[pattern_index], origin, credentials),
        })
}

struct RequestOrigin<'a> {
    scheme: &'a str,
    host: Cow<'a, str>,
    port: Option<u16>,
}

impl<'a> RequestOrigin<'a> {
    fn parse(origin: &'a str) -> Option<Self> {
        if origin.len() > MAX_ORIGIN_LENGTH {
            return None;
        }

        let (scheme, authority) = origin.split_once("://")?;
        if !is_uri_scheme(scheme) {
            return None;
        }

        let (host, port) = split_authority(authority).ok()?;
        if !is_valid_host(host) {
            return None;
        }

        let host = if host.bytes().any(|byte| byte.is_ascii_uppercase()) {
            Cow::Owned(host.to_ascii_lowercase())
        } else {
            Cow::Borrowed(host)
        };

        Some(Self { scheme, host, port })
    }

    fn effective_port(&self) -> Option<u16> {
        effective_port(self.scheme, self.port)
    }
}

fn effective_port(scheme: &str, port: Option<u16>) -> Option<u16> {
    port.or_else(|| default_port(scheme))
}

fn split_authority(authority: &str) -> Result<(&str, Option<u16>), PatternError> {
    if authority.contains(['/', '?', '#', '@']) {
        return Err(PatternError::UnexpectedComponent);
    }

    let (host, port) = if authority.starts_with('[') {
        let close = authority
            .find(']')
            .ok_or_else(|| PatternError::InvalidHost(authority.to_string()))?;
        let (host, rest) = authority.split_at(close + 1);
        match rest {
            "" => (host, None),
            _ => match rest.strip_prefix(':') {
                Some(port) => (host, Some(port)),
                None => return Err(PatternError::InvalidHost(authority.to_string())),
            },
        }
    } else {
        match authority.rsplit_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (authority, None),
        }
    };

    let port = port.map(parse_port).transpose()?;
    Ok((host, port))
}

fn parse_port(value: &str) -> Result<u16, PatternError> {
    if value.is_empty() || !value.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(PatternError::InvalidPort(value.to_string()));
    }
    match value.parse::<u16>() {
        Ok(port) if port != 0 => Ok(port),
        _ => Err(PatternError::InvalidPort(value.to_string())),
    }
}

fn parse_host_pattern(host: &str) -> Result<HostPattern, PatternError> {
    if host.is_empty() {
        return Err(PatternError::EmptyHost);
    }

    match host.matches('*').count() {
        0 => {
            if !is_valid_host(host) {
                return Err(PatternError::InvalidHost(host.to_string()));
            }
            Ok(HostPattern::Exact(host.to_ascii_lowercase()))
        }
        1 if host == WILDCARD => Ok(HostPattern::AnyHost),
        1 => {
            let suffix = host
                .strip_prefix("*.")
                .ok_or(PatternError::MisplacedWildcard)?;
            if !is_valid_host(suffix) || suffix.starts_with('[') {
                return Err(PatternError::InvalidHost(host.to_string()));
            }
            Ok(HostPattern::Subdomains(
                suffix.split('.').map(str::to_ascii_lowercase).collect(),
            ))
        }
        _ => Err(PatternError::MultipleWildcards),
    }
}

fn is_valid_host(host: &str) -> bool {
    if let Some(inner) = host.strip_prefix('[') {
        return inner.strip_suffix(']').is_some_and(|addr| {
            !addr.is_empty()
                && addr
                    .bytes()
                    .all(|byte| byte.is_ascii_hexdigit() || matches!(byte, b':' | b'.'))
        });
    }

    host.split('.').all(|label| {
        !label.is_empty()
            && label
                .bytes()
                .all(|byte| byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_'))
    })
}

#[cfg(test)]
#[path = "origin_test.rs"]
mod origin_test;
