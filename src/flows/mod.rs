//! User-facing flows that combine the stores with the recipe service.
//!
//! Network calls inside a flow are raced against a cancellation token; the
//! stores are only written after the call returns and the token is still live.

mod missing;
mod recommend;
mod scan;

pub use missing::add_missing_to_shopping;
pub use recommend::recommend;
pub use scan::scan_image;

use anyhow::Result;
use async_trait::async_trait;

use crate::api::{ApiClient, DetectedIngredient, MenuRecommendationRequest};
use crate::domain::MenuRecommendation;

/// The remote calls the flows depend on.
#[async_trait]
pub trait RecipeService: Send + Sync {
    async fn recognize_ingredients(&self, image: &[u8]) -> Result<Vec<DetectedIngredient>>;

    async fn recommend_menus(
        &self,
        body: &MenuRecommendationRequest,
    ) -> Result<Vec<MenuRecommendation>>;
}

#[async_trait]
impl RecipeService for ApiClient {
    async fn recognize_ingredients(&self, image: &[u8]) -> Result<Vec<DetectedIngredient>> {
        ApiClient::recognize_ingredients(self, image).await
    }

    async fn recommend_menus(
        &self,
        body: &MenuRecommendationRequest,
    ) -> Result<Vec<MenuRecommendation>> {
        ApiClient::recommend_menus(self, body).await
    }
}

#[cfg(test)]
pub(crate) mod fake {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Canned service responses with an optional delay.
    #[derive(Default)]
    pub struct FakeService {
        pub detections: Vec<DetectedIngredient>,
        pub menus: Vec<MenuRecommendation>,
        pub delay: Option<Duration>,
        pub fail: bool,
        pub requests: Mutex<Vec<MenuRecommendationRequest>>,
    }

    impl FakeService {
        async fn pause(&self) -> Result<()> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail {
                anyhow::bail!("service unavailable");
            }
            Ok(())
        }
    }

    #[async_trait]
    impl RecipeService for FakeService {
        async fn recognize_ingredients(&self, _image: &[u8]) -> Result<Vec<DetectedIngredient>> {
            self.pause().await?;
            Ok(self.detections.clone())
        }

        async fn recommend_menus(
            &self,
            body: &MenuRecommendationRequest,
        ) -> Result<Vec<MenuRecommendation>> {
            self.requests
                .lock()
                .unwrap()
                .push(body.clone());
            self.pause().await?;
            Ok(self.menus.clone())
        }
    }
}
