use crate::allowed_headers::AllowedHeaders;
use crate::allowed_methods::AllowedMethods;
use crate::constants::limits::{MAX_EXPOSE_HEADERS, MAX_HEADERS, MAX_METHODS, MAX_ORIGINS};
use crate::constants::{DEFAULT_MAX_AGE, DEFAULT_PREFLIGHT_STATUS, WILDCARD};
use crate::exposed_headers::ExposedHeaders;
use crate::origin::{OriginPattern, PatternError};
use crate::util::is_http_token;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub(crate) mod field {
    pub const ALLOW_ORIGINS: &str = "allowOrigins";
    pub const ALLOW_METHODS: &str = "allowMethods";
    pub const ALLOW_HEADERS: &str = "allowHeaders";
    pub const EXPOSE_HEADERS: &str = "exposeHeaders";
}

/// Per-route CORS configuration as supplied by the routing layer.
///
/// Every list is treated as an ordered set: membership decides what is allowed,
/// and the configured order is the order values are serialized in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct CorsPolicy {
    pub allow_origins: Vec<String>,
    pub allow_credentials: bool,
    pub allow_methods: Vec<String>,
    pub allow_headers: Vec<String>,
    pub expose_headers: Vec<String>,
    /// Seconds; `0` disables preflight caching.
    pub max_age: u64,
    pub preflight_status: u16,
    pub allow_private_network: bool,
}

impl Default for CorsPolicy {
    fn default() -> Self {
        Self {
            allow_origins: Vec::new(),
            allow_credentials: false,
            allow_methods: Vec::new(),
            allow_headers: Vec::new(),
            expose_headers: Vec::new(),
            max_age: DEFAULT_MAX_AGE,
            preflight_status: DEFAULT_PREFLIGHT_STATUS,
            allow_private_network: false,
        }
    }
}

impl CorsPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow_origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allow_origins = origins.into_iter().map(Into::into).collect();
        self
    }

    pub fn allow_credentials(mut self, enabled: bool) -> Self {
        self.allow_credentials = enabled;
        self
    }

    pub fn allow_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allow_methods = methods.into_iter().map(Into::into).collect();
        self
    }

    pub fn allow_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allow_headers = headers.into_iter().map(Into::into).collect();
        self
    }

    pub fn expose_headers<I, S>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expose_headers = headers.into_iter().map(Into::into).collect();
        self
    }

    pub fn max_age(mut self, seconds: u64) -> Self {
        self.max_age = seconds;
        self
    }

    pub fn preflight_status(mut self, status: u16) -> Self {
        self.preflight_status = status;
        self
    }

    pub fn allow_private_network(mut self, enabled: bool) -> Self {
        self.allow_private_network = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        self.compile().map(|_| ())
    }

    pub(crate) fn compile(&self) -> Result<CompiledPolicy, ValidationError> {
        check_len(field::ALLOW_ORIGINS, self.allow_origins.len(), MAX_ORIGINS)?;
        check_len(field::ALLOW_METHODS, self.allow_methods.len(), MAX_METHODS)?;
        check_len(field::ALLOW_HEADERS, self.allow_headers.len(), MAX_HEADERS)?;
        check_len(field::EXPOSE_HEADERS, self.expose_headers.len(), MAX_EXPOSE_HEADERS)?;

        let origins = self
            .allow_origins
            .iter()
            .map(|origin| {
                OriginPattern::parse(origin).map_err(|source| ValidationError::InvalidOrigin {
                    origin: origin.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        for method in &self.allow_methods {
            let method = method.trim();
            if method != WILDCARD && !is_http_token(method) {
                return Err(ValidationError::InvalidMethod(method.to_string()));
            }
        }
        check_header_names(field::ALLOW_HEADERS, &self.allow_headers)?;
        check_header_names(field::EXPOSE_HEADERS, &self.expose_headers)?;

        check_wildcard_alone(field::ALLOW_METHODS, &self.allow_methods)?;
        check_wildcard_alone(field::ALLOW_HEADERS, &self.allow_headers)?;
        check_wildcard_alone(field::EXPOSE_HEADERS, &self.expose_headers)?;

        if self.allow_credentials {
            if origins.iter().any(OriginPattern::is_any) {
                return Err(ValidationError::CredentialsWithWildcard {
                    field: field::ALLOW_ORIGINS,
                });
            }
            for (name, values) in [
                (field::ALLOW_METHODS, &self.allow_methods),
                (field::ALLOW_HEADERS, &self.allow_headers),
                (field::EXPOSE_HEADERS, &self.expose_headers),
            ] {
                if has_wildcard(values) {
                    return Err(ValidationError::CredentialsWithWildcard { field: name });
                }
            }
        }

        if !matches!(self.preflight_status, 200 | 204) {
            return Err(ValidationError::InvalidPreflightStatus(
                self.preflight_status,
            ));
        }

        Ok(CompiledPolicy {
            origins,
            credentials: self.allow_credentials,
            methods: AllowedMethods::list(self.allow_methods.iter().cloned()),
            allowed_headers: AllowedHeaders::list(self.allow_headers.iter().cloned()),
            exposed_headers: ExposedHeaders::list(self.expose_headers.iter().cloned()),
            max_age: self.max_age,
            preflight_status: self.preflight_status,
            allow_private_network: self.allow_private_network,
        })
    }
}

/// The validated, read-only form the engine evaluates against.
#[derive(Debug, Clone)]
pub(crate) struct CompiledPolicy {
    pub(crate) origins: Vec<OriginPattern>,
    pub(crate) credentials: bool,
    pub(crate) methods: AllowedMethods,
    pub(crate) allowed_headers: AllowedHeaders,
    pub(crate) exposed_headers: ExposedHeaders,
    pub(crate) max_age: u64,
    pub(crate) preflight_status: u16,
    pub(crate) allow_private_network: bool,
}

/// Configuration-time rejection of a [`CorsPolicy`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("The origin pattern '{origin}' is invalid: {source}")]
    InvalidOrigin {
        origin: String,
        #[source]
        source: PatternError,
    },
    #[error("allowCredentials cannot be combined with a wildcard (*) in {field}")]
    CredentialsWithWildcard { field: &'static str },
    #[error("{field} accepts at most {max} entries but {count} were configured")]
    TooManyEntries {
        field: &'static str,
        count: usize,
        max: usize,
    },
    #[error("'{0}' is not a valid HTTP method token")]
    InvalidMethod(String),
    #[error("'{value}' in {field} is not a valid header name")]
    InvalidHeaderName { field: &'static str, value: String },
    #[error("{field} cannot mix the wildcard (*) with explicit entries")]
    WildcardMixedWithValues { field: &'static str },
    #[error("The preflight status {0} is not allowed; use 200 or 204")]
    InvalidPreflightStatus(u16),
}

fn check_len(field: &'static str, count: usize, max: usize) -> Result<(), ValidationError> {
    if count > max {
        return Err(ValidationError::TooManyEntries { field, count, max });
    }
    Ok(())
}

fn check_header_names(field: &'static str, values: &[String]) -> Result<(), ValidationError> {
    for value in values {
        let value = value.trim();
        if value != WILDCARD && !is_http_token(value) {
            return Err(ValidationError::InvalidHeaderName {
                field,
                value: value.to_string(),
            });
        }
    }
    Ok(())
}

fn check_wildcard_alone(field: &'static str, values: &[String]) -> Result<(), ValidationError> {
    if has_wildcard(values) && values.iter().any(|value| value.trim() != WILDCARD) {
        return Err(ValidationError::WildcardMixedWithValues { field });
    }
    Ok(())
}

fn has_wildcard(values: &[String]) -> bool {
    values.iter().any(|value| value.trim() == WILDCARD)
}

#[cfg(test)]
#[path = "policy_test.rs"]
mod policy_test;
