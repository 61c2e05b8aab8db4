//! The commerce API collaborator
//!
//! Extraction only needs two capabilities from the outside world: obtaining a
//! bearer token and issuing one authenticated GET. [`CommerceApi`] captures
//! exactly that, so the pipeline can run against [`HttpApi`] or an in-memory fake.

pub mod http;

use crate::error::Result;
use serde_json::Value;
use std::fmt;

pub use http::HttpApi;

/// A bearer credential returned by [`CommerceApi::login`].
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken {
    access_token: String,
}

impl AuthToken {
    pub fn new(access_token: impl Into<String>) -> Self {
        AuthToken {
            access_token: access_token.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.access_token
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// Authenticated access to a paginated commerce API.
pub trait CommerceApi {
    /// Obtain a fresh credential. Fails with `Auth`.
    fn login(&self) -> Result<AuthToken>;

    /// GET `endpoint` (relative to the project, including its query string) and
    /// return the parsed body. Fails with `Http`, `Api` or `MalformedResponse`.
    fn query(&self, token: &AuthToken, endpoint: &str) -> Result<Value>;
}

impl<T: CommerceApi + ?Sized> CommerceApi for &T {
    fn login(&self) -> Result<AuthToken> {
        (**self).login()
    }

    fn query(&self, token: &AuthToken, endpoint: &str) -> Result<Value> {
        (**self).query(token, endpoint)
    }
}
