//! Delegate endpoint policy
//!
//! Fails closed: an endpoint is accepted only when it parses, targets a
//! public host over HTTPS, and that host is on one of the fixed allow-lists.
//! Localhost is reachable only when the policy explicitly allows it.

use std::net::{Ipv4Addr, Ipv6Addr};
use thiserror::Error;
use url::{Host, Url};

/// Agent API hosts accepted verbatim
pub const API_DOMAINS: &[&str] = &[
    "api.agentverse.ai",
    "api.fetch.ai",
    "api.olas.network",
    "api.virtuals.io",
];

/// Hosting platforms whose subdomains are accepted (never the bare suffix)
pub const PLATFORM_SUFFIXES: &[&str] = &[
    "vercel.app",
    "netlify.app",
    "onrender.com",
    "fly.dev",
    "railway.app",
    "workers.dev",
    "herokuapp.com",
];

/// Why an endpoint was refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EndpointRejection {
    #[error("endpoint is not a valid URL: {0}")]
    Unparsable(String),

    #[error("unsupported scheme '{0}'")]
    UnsupportedScheme(String),

    #[error("endpoint has no host")]
    MissingHost,

    #[error("endpoint must not embed credentials")]
    EmbeddedCredentials,

    #[error("host {0} is a private, loopback or link-local address")]
    PrivateAddress(String),

    #[error("localhost endpoints are disabled")]
    LocalhostNotAllowed,

    #[error("endpoint must use https")]
    InsecureScheme,

    #[error("host {0} is not on the delegate allow-list")]
    NotAllowListed(String),
}

/// Endpoint validation rules for external delegation
#[derive(Debug, Clone, Copy, Default)]
pub struct EndpointPolicy {
    /// Non-production switch for local agent development
    pub allow_localhost: bool,
}

impl EndpointPolicy {
    pub fn new(allow_localhost: bool) -> Self {
        Self { allow_localhost }
    }

    /// Validate `endpoint`, returning the parsed URL to call
    pub fn validate(&self, endpoint: &str) -> Result<Url, EndpointRejection> {
        let url = Url::parse(endpoint.trim())
            .map_err(|e| EndpointRejection::Unparsable(e.to_string()))?;

        let scheme = url.scheme();
        if scheme != "https" && scheme != "http" {
            return Err(EndpointRejection::UnsupportedScheme(scheme.to_string()));
        }
        if !url.username().is_empty() || url.password().is_some() {
            return Err(EndpointRejection::EmbeddedCredentials);
        }

        let is_localhost = match url.host() {
            None => return Err(EndpointRejection::MissingHost),
            Some(Host::Ipv4(ip)) if ip.is_loopback() => true,
            Some(Host::Ipv4(ip)) if is_internal_v4(ip) => {
                return Err(EndpointRejection::PrivateAddress(ip.to_string()));
            }
            Some(Host::Ipv6(ip)) if ip.is_loopback() => true,
            Some(Host::Ipv6(ip)) if is_internal_v6(ip) => {
                return Err(EndpointRejection::PrivateAddress(ip.to_string()));
            }
            Some(Host::Domain(domain)) => is_localhost_name(domain),
            Some(_) => false,
        };

        if is_localhost {
            return if self.allow_localhost {
                Ok(url)
            } else {
                Err(EndpointRejection::LocalhostNotAllowed)
            };
        }

        if scheme != "https" {
            return Err(EndpointRejection::InsecureScheme);
        }

        let host = url
            .host_str()
            .ok_or(EndpointRejection::MissingHost)?
            .trim_end_matches('.')
            .to_ascii_lowercase();
        if is_allow_listed(&host) {
            Ok(url)
        } else {
            Err(EndpointRejection::NotAllowListed(host))
        }
    }
}

fn is_localhost_name(domain: &str) -> bool {
    let domain = domain.trim_end_matches('.').to_ascii_lowercase();
    domain == "localhost" || domain.ends_with(".localhost")
}

fn is_allow_listed(host: &str) -> bool {
    API_DOMAINS.contains(&host)
        || PLATFORM_SUFFIXES.iter().any(|suffix| {
            host.len() > suffix.len() + 1
                && host.ends_with(suffix)
                && host.as_bytes()[host.len() - suffix.len() - 1] == b'.'
        })
}

/// Loopback, RFC 1918, link-local, CGNAT, unspecified, broadcast, `0.0.0.0/8`
fn is_internal_v4(ip: Ipv4Addr) -> bool {
    let [a, b, ..] = ip.octets();
    ip.is_loopback()
        || ip.is_private()
        || ip.is_link_local()
        || ip.is_unspecified()
        || ip.is_broadcast()
        || a == 0
        || (a == 100 && (b & 0xc0) == 64)
}

/// Loopback, unspecified, unique-local, link-local, and IPv4-mapped internal
fn is_internal_v6(ip: Ipv6Addr) -> bool {
    if let Some(v4) = ip.to_ipv4_mapped() {
        return is_internal_v4(v4);
    }
    let first = ip.segments()[0];
    ip.is_loopback()
        || ip.is_unspecified()
        || (first & 0xfe00) == 0xfc00
        || (first & 0xffc0) == 0xfe80
}
