use std::fmt;

use reqwest::Url;

use crate::domain::common::entities::app_errors::CoreError;

/// Decoded, absolute location of an inbound image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageLocation(Url);

impl ImageLocation {
    /// Percent-decodes the location delivered in the inbound event and
    /// checks that it is an absolute http(s) URL.
    pub fn decode(encoded: &str) -> Result<Self, CoreError> {
        let decoded = urlencoding::decode(encoded.trim())
            .map_err(|e| CoreError::InvalidImageLocation(format!("not valid UTF-8: {}", e)))?;

        let url = Url::parse(&decoded)
            .map_err(|e| CoreError::InvalidImageLocation(format!("{}: {}", decoded, e)))?;

        match url.scheme() {
            "http" | "https" => Ok(Self(url)),
            scheme => Err(CoreError::InvalidImageLocation(format!(
                "unsupported scheme {}",
                scheme
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn url(&self) -> &Url {
        &self.0
    }
}

impl fmt::Display for ImageLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}
