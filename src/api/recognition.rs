//! Ingredient recognition from a photo.

use anyhow::Result;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Method;
use tracing::info;

use super::client::ApiClient;
use super::types::{DetectedIngredient, RecognizeRequest, RecognizeResponse};

impl ApiClient {
    /// `POST /upload` with the base64-encoded image.
    pub async fn recognize_ingredients(&self, image: &[u8]) -> Result<Vec<DetectedIngredient>> {
        let body = RecognizeRequest {
            image: STANDARD.encode(image),
        };
        let request = self.request(Method::POST, &["upload"])?.json(&body);
        let response: RecognizeResponse = self.execute(request).await?;

        info!("Recognized {} ingredients", response.ingredients.len());
        Ok(response.ingredients)
    }
}
