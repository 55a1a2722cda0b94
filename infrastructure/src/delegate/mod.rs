//! External agent delegation
//!
//! [`EndpointPolicy`] decides which endpoints may be called at all;
//! [`HttpDelegateGateway`] performs the bounded call.

pub mod endpoint;
pub mod http;

pub use endpoint::{API_DOMAINS, EndpointPolicy, EndpointRejection, PLATFORM_SUFFIXES};
pub use http::{
    DEFAULT_DELEGATE_TIMEOUT, DEFAULT_MAX_BODY_BYTES, DelegateSettings, HttpDelegateGateway,
};
