use anyhow::Result;
use reqwest::Method;
use tracing::info;

use super::client::ApiClient;
use super::types::{MenuRecommendationRequest, MenuRecommendationResponse};
use crate::domain::MenuRecommendation;

impl ApiClient {
    /// `POST /menu-recommendations`
    pub async fn recommend_menus(
        &self,
        body: &MenuRecommendationRequest,
    ) -> Result<Vec<MenuRecommendation>> {
        let request = self
            .request(Method::POST, &["menu-recommendations"])?
            .json(body);
        let response: MenuRecommendationResponse = self.execute(request).await?;

        info!("Received {} menu recommendations", response.recommendations.len());
        Ok(response.recommendations)
    }
}
