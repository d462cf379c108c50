/// Raw request headers relevant to CORS, as extracted by the gateway.
///
/// Absent headers are `None`; values are passed through as received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext<'a> {
    pub method: &'a str,
    pub origin: Option<&'a str>,
    pub access_control_request_method: Option<&'a str>,
    pub access_control_request_headers: Option<&'a str>,
    pub access_control_request_private_network: bool,
}
