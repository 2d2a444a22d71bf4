//! Shared-secret authentication stage.
//!
//! Not an identity system: one configured header compared for exact equality
//! against one configured secret. No sessions, no users.

use crate::config::Config;
use crate::error::Error;
use crate::middleware::Stage;
use crate::request::Request;

pub struct RequireApiKey {
    header: String,
    secret: String,
}

impl RequireApiKey {
    pub fn new(header: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            secret: secret.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.api_key_header, &config.api_key)
    }
}

impl Stage for RequireApiKey {
    fn apply(&self, req: &Request) -> Result<(), Error> {
        match req.header(&self.header) {
            Some(candidate) if candidate == self.secret => Ok(()),
            _ => Err(Error::unauthorized("Unauthorized access")),
        }
    }
}
