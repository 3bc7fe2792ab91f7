use bytes::{Bytes, BytesMut};
use reqwest::Client;
use tracing::instrument;

use crate::domain::{
    common::{
        FetchConfig,
        entities::app_errors::{CoreError, ExternalService, ServiceError},
    },
    messaging::value_objects::ImageLocation,
    shopping_list::ports::ImageFetcher,
};

/// Downloads inbound images over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpImageFetcher {
    client: Client,
    max_image_bytes: usize,
}

impl HttpImageFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, CoreError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CoreError::Configuration(format!("http client: {}", e)))?;

        Ok(Self {
            client,
            max_image_bytes: config.max_image_bytes,
        })
    }

    fn too_large(&self) -> CoreError {
        CoreError::ImageTooLarge {
            max_bytes: self.max_image_bytes,
        }
    }
}

impl ImageFetcher for HttpImageFetcher {
    #[instrument(skip(self, location), fields(url = %location))]
    async fn fetch(&self, location: ImageLocation) -> Result<Bytes, CoreError> {
        let mut response = self
            .client
            .get(location.url().clone())
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Image download failed: {}", e);
                ServiceError::network(ExternalService::ImageHost, e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!("Image host answered {}", status);
            return Err(ServiceError::rejected(
                ExternalService::ImageHost,
                format!("status {}", status),
            )
            .into());
        }

        if let Some(length) = response.content_length()
            && length > self.max_image_bytes as u64
        {
            return Err(self.too_large());
        }

        let mut image = BytesMut::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| {
            tracing::error!("Image download interrupted: {}", e);
            ServiceError::network(ExternalService::ImageHost, e.to_string())
        })? {
            if image.len() + chunk.len() > self.max_image_bytes {
                return Err(self.too_large());
            }
            image.extend_from_slice(&chunk);
        }

        tracing::debug!(bytes = image.len(), "Image downloaded");
        Ok(image.freeze())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::common::entities::app_errors::ServiceErrorCause;

    #[tokio::test]
    async fn test_unreachable_host_is_a_network_error() {
        let fetcher = HttpImageFetcher::new(&FetchConfig {
            timeout: Duration::from_secs(2),
            max_image_bytes: 1024,
        })
        .unwrap();
        let location = ImageLocation::decode("http://127.0.0.1:1/recipe.jpg").unwrap();

        match fetcher.fetch(location).await {
            Err(CoreError::Service(error)) => {
                assert_eq!(error.service, ExternalService::ImageHost);
                assert_eq!(error.cause, ServiceErrorCause::Network);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
