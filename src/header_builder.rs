use crate::constants::{WILDCARD, header};
use crate::headers::HeaderCollection;
use crate::origin::{OriginMatch, match_any};
use crate::parsed_request::ParsedRequest;
use crate::policy::CompiledPolicy;

pub(crate) struct HeaderBuilder<'a> {
    policy: &'a CompiledPolicy,
}

impl<'a> HeaderBuilder<'a> {
    pub(crate) fn new(policy: &'a CompiledPolicy) -> Self {
        Self { policy }
    }

    pub(crate) fn match_origin<'o>(&self, origin: &'o str) -> Option<OriginMatch<'o>> {
        match_any(&self.policy.origins, origin, self.policy.credentials)
    }

    /// `Access-Control-Allow-Origin`, `Vary: Origin` for concrete echoes, and
    /// `Access-Control-Allow-Credentials`. Both the preflight and the actual
    /// request path emit the origin through here.
    pub(crate) fn build_origin_headers(&self, matched: &OriginMatch<'_>) -> HeaderCollection {
        let credentials = self.policy.credentials;
        debug_assert!(
            !(credentials && matched.allow_origin.is_wildcard()),
            "credentialed responses must echo a concrete origin"
        );

        let mut headers = HeaderCollection::with_estimate(3);
        headers.push(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            matched.allow_origin.header_value(),
        );
        if !matched.allow_origin.is_wildcard() {
            headers.add_vary(header::ORIGIN);
        }
        if credentials {
            headers.push(header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true");
        }
        headers
    }

    pub(crate) fn build_methods_header(&self) -> HeaderCollection {
        self.single(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            self.policy.methods.header_value(),
        )
    }

    pub(crate) fn build_allowed_headers(&self) -> HeaderCollection {
        self.single(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            self.policy.allowed_headers.header_value(),
        )
    }

    pub(crate) fn build_exposed_headers(&self) -> HeaderCollection {
        self.single(
            header::ACCESS_CONTROL_EXPOSE_HEADERS,
            self.policy.exposed_headers.header_value(),
        )
    }

    pub(crate) fn build_max_age_header(&self) -> HeaderCollection {
        self.single(
            header::ACCESS_CONTROL_MAX_AGE,
            Some(self.policy.max_age.to_string()),
        )
    }

    pub(crate) fn build_private_network_header(
        &self,
        request: &ParsedRequest<'_>,
    ) -> HeaderCollection {
        let allowed = self.policy.allow_private_network && request.requests_private_network;
        self.single(
            header::ACCESS_CONTROL_ALLOW_PRIVATE_NETWORK,
            allowed.then(|| "true".to_string()),
        )
    }

    pub(crate) fn build_content_length_header(&self) -> HeaderCollection {
        self.single(header::CONTENT_LENGTH, Some("0".to_string()))
    }

    fn single(&self, name: &str, value: Option<String>) -> HeaderCollection {
        let Some(value) = value else {
            return HeaderCollection::new();
        };
        debug_assert!(
            !(self.policy.credentials && value == WILDCARD),
            "credentialed responses must not carry a wildcard {name}"
        );

        let mut headers = HeaderCollection::with_estimate(1);
        headers.push(name, value);
        headers
    }
}

#[cfg(test)]
#[path = "header_builder_test.rs"]
mod header_builder_test;
