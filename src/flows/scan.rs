//! Camera flow: photo in, reconciled ingredient list out.

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use super::RecipeService;
use crate::api::DetectedIngredient;
use crate::cancel::OrCancelExt;
use crate::domain::{Ingredient, DEFAULT_INGREDIENT_TYPE};
use crate::stores::IngredientStore;

pub struct ScanOutcome {
    /// What the service reported, as camera ingredients
    pub detected: Vec<Ingredient>,
    /// Stored list after reconciliation
    pub list: Vec<Ingredient>,
}

fn to_ingredient(detection: DetectedIngredient) -> Option<Ingredient> {
    let name = detection.ingredient_name.trim();
    if name.is_empty() {
        return None;
    }
    let kind = detection
        .ingredient_type
        .as_deref()
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .unwrap_or(DEFAULT_INGREDIENT_TYPE);
    Some(Ingredient::detected(name, kind))
}

pub async fn scan_image(
    service: &dyn RecipeService,
    store: &IngredientStore,
    image: &[u8],
    token: &CancellationToken,
) -> Result<ScanOutcome> {
    debug!("Sending {} byte image for recognition", image.len());
    let detections = service.recognize_ingredients(image).or_cancel(token).await??;

    let detected: Vec<Ingredient> = detections.into_iter().filter_map(to_ingredient).collect();
    let list = store.add_detected(detected.clone());
    info!(
        "Camera detected {} ingredients, list now has {}",
        detected.len(),
        list.len()
    );

    Ok(ScanOutcome { detected, list })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::Cancelled;
    use crate::flows::fake::FakeService;
    use crate::storage::{KeyValueBackend, MemoryBackend, UserStorage};
    use std::sync::Arc;
    use std::time::Duration;

    fn store() -> IngredientStore {
        let backend: Arc<dyn KeyValueBackend> = Arc::new(MemoryBackend::new());
        IngredientStore::new(UserStorage::new(backend, Some("u1".into())))
    }

    fn detection(name: &str, kind: Option<&str>) -> DetectedIngredient {
        DetectedIngredient {
            ingredient_name: name.to_string(),
            ingredient_type: kind.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_scan_merges_into_existing_list() {
        let store = store();
        store.add_manual("Tomato", None).unwrap();

        let service = FakeService {
            detections: vec![
                detection("tomato", Some("Vegetables")),
                detection("Mozzarella", Some("Dairy")),
                detection("  ", Some("Other")),
                detection("Basil", None),
            ],
            ..Default::default()
        };

        let outcome = scan_image(&service, &store, b"jpeg", &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(outcome.detected.len(), 3);
        assert_eq!(outcome.detected[2].kind, "Other");
        let names: Vec<_> = outcome.list.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Tomato", "Mozzarella", "Basil"]);
        assert_eq!(outcome.list[0].kind, "Other");
    }

    #[tokio::test]
    async fn test_cancelled_scan_writes_nothing() {
        let store = store();
        let service = FakeService {
            detections: vec![detection("Leek", None)],
            delay: Some(Duration::from_secs(5)),
            ..Default::default()
        };

        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            canceller.cancel();
        });

        let err = scan_image(&service, &store, b"jpeg", &token)
            .await
            .err()
            .unwrap();
        assert!(err.downcast_ref::<Cancelled>().is_some());
        assert!(store.list().is_empty());
        assert!(store.camera_preview().is_empty());
    }

    #[tokio::test]
    async fn test_failed_scan_keeps_list() {
        let store = store();
        store.add_manual("Egg", None).unwrap();
        let service = FakeService {
            fail: true,
            ..Default::default()
        };

        assert!(scan_image(&service, &store, b"jpeg", &CancellationToken::new())
            .await
            .is_err());
        assert_eq!(store.list().len(), 1);
    }
}
