//! Error types and handling for Country Atlas

use thiserror::Error;

/// Main error type for the Country Atlas library
#[derive(Error, Debug)]
pub enum AtlasError {
    /// Transport-level failure (DNS, connection refused, transport timeout)
    #[error("Network error: {message}")]
    Network { message: String },

    /// Provider answered with a non-2xx status
    #[error("HTTP error {status} {status_text} for {url}")]
    Http {
        status: u16,
        status_text: String,
        url: String,
    },

    /// Provider answered 2xx but the body was not JSON
    #[error("Decode error: {message}")]
    Decode { message: String },

    /// No lookup strategy produced a country for this name
    #[error("Country not found: {name}")]
    NotFound { name: String },

    /// Bulk or regional listing came back empty or malformed
    #[error("Load error: {message}")]
    Load { message: String },

    /// Every name of a featured batch failed to resolve
    #[error("No featured countries could be resolved")]
    NoFeaturedCountries,

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl AtlasError {
    /// Create a new network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a new HTTP status error
    pub fn http<S: Into<String>, U: Into<String>>(status: u16, status_text: S, url: U) -> Self {
        Self::Http {
            status,
            status_text: status_text.into(),
            url: url.into(),
        }
    }

    /// Create a new decode error
    pub fn decode<S: Into<String>>(message: S) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create a new not-found outcome
    pub fn not_found<S: Into<String>>(name: S) -> Self {
        Self::NotFound { name: name.into() }
    }

    /// Create a new load error
    pub fn load<S: Into<String>>(message: S) -> Self {
        Self::Load {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// HTTP status carried by this error, if any
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            AtlasError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// A failed lookup the resolver may skip past instead of aborting.
    #[must_use]
    pub fn is_soft_miss(&self) -> bool {
        self.status() == Some(404)
    }

    /// Whether this failure means "nothing matched" rather than "something broke"
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, AtlasError::NotFound { .. })
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            AtlasError::NotFound { name } => {
                format!("No country matches '{name}'. Please try a different name.")
            }
            AtlasError::Network { .. } | AtlasError::Http { .. } | AtlasError::Decode { .. } => {
                "Unable to reach the country, weather or image services. Please try again later."
                    .to_string()
            }
            AtlasError::Load { .. } => {
                "Country list could not be loaded. Please try again later.".to_string()
            }
            AtlasError::NoFeaturedCountries => {
                "Featured countries are unavailable right now. Please try again later.".to_string()
            }
            AtlasError::Validation { message } => format!("Invalid input: {message}"),
            AtlasError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
        }
    }
}

impl From<reqwest::Error> for AtlasError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AtlasError::decode(err.to_string())
        } else {
            AtlasError::network(err.to_string())
        }
    }
}

impl From<reqwest_middleware::Error> for AtlasError {
    fn from(err: reqwest_middleware::Error) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(e) => e.into(),
            reqwest_middleware::Error::Middleware(e) => AtlasError::network(format!("{e:#}")),
        }
    }
}
