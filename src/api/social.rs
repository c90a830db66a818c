//! Favorites, cooking history and menu reviews.

use anyhow::Result;
use reqwest::Method;

use super::client::ApiClient;
use super::types::{
    AddFavoriteRequest, AddHistoryRequest, Favorite, HistoryEntry, Review, ReviewRequest,
};
use crate::domain::Rating;

impl ApiClient {
    pub async fn favorites(&self, user_id: &str) -> Result<Vec<Favorite>> {
        let request = self.request(Method::GET, &["favorites", user_id])?;
        let favorites: Option<Vec<Favorite>> = self.execute(request).await?;
        Ok(favorites.unwrap_or_default())
    }

    pub async fn add_favorite(&self, user_id: &str, menu_id: &str) -> Result<()> {
        let request = self
            .request(Method::POST, &["favorites", user_id])?
            .json(&AddFavoriteRequest { menu_id });
        let _: serde_json::Value = self.execute(request).await?;
        Ok(())
    }

    pub async fn remove_favorite(&self, user_id: &str, menu_id: &str) -> Result<()> {
        let request = self.request(Method::DELETE, &["favorites", user_id, menu_id])?;
        let _: serde_json::Value = self.execute(request).await?;
        Ok(())
    }

    pub async fn history(&self, user_id: &str) -> Result<Vec<HistoryEntry>> {
        let request = self.request(Method::GET, &["history", user_id])?;
        let history: Option<Vec<HistoryEntry>> = self.execute(request).await?;
        Ok(history.unwrap_or_default())
    }

    pub async fn add_history(&self, user_id: &str, menu_id: &str) -> Result<()> {
        let request = self
            .request(Method::POST, &["history", user_id])?
            .json(&AddHistoryRequest {
                menu_id,
                cooked_at: chrono::Utc::now(),
            });
        let _: serde_json::Value = self.execute(request).await?;
        Ok(())
    }

    pub async fn reviews(&self, menu_id: &str) -> Result<Vec<Review>> {
        let request = self.request(Method::GET, &["menu-detail", menu_id, "reviews"])?;
        let reviews: Option<Vec<Review>> = self.execute(request).await?;
        Ok(reviews.unwrap_or_default())
    }

    pub async fn post_review(
        &self,
        menu_id: &str,
        user_id: &str,
        rating: Rating,
        comment: Option<&str>,
    ) -> Result<()> {
        let request = self
            .request(Method::POST, &["menu-detail", menu_id, "reviews"])?
            .json(&ReviewRequest {
                user_id,
                rating: rating.get(),
                comment,
            });
        let _: serde_json::Value = self.execute(request).await?;
        Ok(())
    }

    pub async fn update_review(
        &self,
        menu_id: &str,
        review_id: &str,
        user_id: &str,
        rating: Rating,
        comment: Option<&str>,
    ) -> Result<()> {
        let request = self
            .request(Method::PUT, &["menu-detail", menu_id, "reviews", review_id])?
            .json(&ReviewRequest {
                user_id,
                rating: rating.get(),
                comment,
            });
        let _: serde_json::Value = self.execute(request).await?;
        Ok(())
    }
}
