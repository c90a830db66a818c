use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::RecipeService;
use crate::api::MenuRecommendationRequest;
use crate::cancel::OrCancelExt;
use crate::domain::MenuRecommendation;
use crate::stores::Stores;

/// Ask for menus matching the stored ingredients and preferences, then cache them.
pub async fn recommend(
    service: &dyn RecipeService,
    stores: &Stores,
    token: &CancellationToken,
) -> Result<Vec<MenuRecommendation>> {
    let ingredients: Vec<String> = stores
        .ingredients
        .list()
        .into_iter()
        .map(|i| i.name)
        .collect();
    if ingredients.is_empty() {
        anyhow::bail!("No ingredients yet. Add some with 'pantry ingredients add' or 'scan'.");
    }

    let body = MenuRecommendationRequest::new(ingredients, stores.preferences.load());
    let menus = service.recommend_menus(&body).or_cancel(token).await??;

    if stores.menus.store(&menus).is_failure() {
        warn!("Menus were fetched but could not be cached");
    } else {
        info!("Cached {} menus", menus.len());
    }
    Ok(menus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flows::fake::FakeService;
    use crate::storage::{KeyValueBackend, MemoryBackend, UserStorage};
    use crate::stores::PreferenceKind;
    use std::sync::Arc;

    fn stores() -> Stores {
        let backend: Arc<dyn KeyValueBackend> = Arc::new(MemoryBackend::new());
        Stores::new(UserStorage::new(backend, Some("u1".into())))
    }

    fn menu(name: &str) -> MenuRecommendation {
        serde_json::from_value(serde_json::json!({ "name": name })).unwrap()
    }

    #[tokio::test]
    async fn test_recommend_sends_ingredients_and_preferences() {
        let stores = stores();
        stores.ingredients.add_manual("Tofu", None).unwrap();
        stores.ingredients.add_manual("Kimchi", None).unwrap();
        stores.preferences.add(PreferenceKind::Cuisine, "Korean");

        let service = FakeService {
            menus: vec![menu("Kimchi stew")],
            ..Default::default()
        };
        let menus = recommend(&service, &stores, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(menus.len(), 1);
        assert_eq!(stores.menus.menus(), menus);

        let requests = service.requests.lock().unwrap();
        assert_eq!(requests[0].ingredients, vec!["Tofu", "Kimchi"]);
        assert_eq!(requests[0].cuisines, vec!["Korean"]);
    }

    #[tokio::test]
    async fn test_recommend_requires_ingredients() {
        let stores = stores();
        let service = FakeService::default();
        assert!(recommend(&service, &stores, &CancellationToken::new())
            .await
            .is_err());
        assert!(service.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_recommendation_keeps_old_cache() {
        let stores = stores();
        stores.ingredients.add_manual("Rice", None).unwrap();
        stores.menus.store(&[menu("Old")]);

        let token = CancellationToken::new();
        token.cancel();
        let service = FakeService {
            menus: vec![menu("New")],
            ..Default::default()
        };

        assert!(recommend(&service, &stores, &token).await.is_err());
        assert_eq!(stores.menus.menus()[0].name, "Old");
    }
}
