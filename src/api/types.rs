//! API request and response types for the recipe backend.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{MenuRecommendation, Preferences};

/// Ids come back as strings or numbers depending on the table; keep them as strings.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

// ============================================================================
// Image recognition
// ============================================================================

/// Upload request body
#[derive(Debug, Serialize)]
pub(super) struct RecognizeRequest {
    /// Base64-encoded image bytes
    pub image: String,
}

/// One ingredient found in the photo
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DetectedIngredient {
    pub ingredient_name: String,
    #[serde(default)]
    pub ingredient_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RecognizeResponse {
    #[serde(default)]
    pub ingredients: Vec<DetectedIngredient>,
}

// ============================================================================
// Menu recommendations
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuRecommendationRequest {
    pub ingredients: Vec<String>,
    pub cuisines: Vec<String>,
    pub dietary_preferences: Vec<String>,
    pub meal_occasions: Vec<String>,
}

impl MenuRecommendationRequest {
    pub fn new(ingredients: Vec<String>, prefs: Preferences) -> Self {
        Self {
            ingredients,
            cuisines: prefs.cuisines,
            dietary_preferences: prefs.dietary_preferences,
            meal_occasions: prefs.meal_occasions,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct MenuRecommendationResponse {
    #[serde(default)]
    pub recommendations: Vec<MenuRecommendation>,
}

// ============================================================================
// Favorites / history / reviews
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Favorite {
    #[serde(deserialize_with = "deserialize_id")]
    pub menu_id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AddFavoriteRequest<'a> {
    pub menu_id: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    #[serde(deserialize_with = "deserialize_id")]
    pub menu_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub cooked_at: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct AddHistoryRequest<'a> {
    pub menu_id: &'a str,
    pub cooked_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(alias = "reviewId", deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    /// Averaged or legacy reviews may carry fractional or out-of-range scores.
    pub rating: f32,
    #[serde(default)]
    pub comment: Option<String>,
}

impl Review {
    /// Rating rounded to whole stars, clamped to 0..=5.
    pub fn stars(&self) -> usize {
        if self.rating.is_nan() {
            return 0;
        }
        self.rating.round().clamp(0.0, 5.0) as usize
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ReviewRequest<'a> {
    pub user_id: &'a str,
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<&'a str>,
}

// ============================================================================
// Errors
// ============================================================================

/// Coarse status derived from the HTTP response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiStatus {
    InvalidArgument,
    Unauthenticated,
    PermissionDenied,
    NotFound,
    PayloadTooLarge,
    RateLimited,
    Unavailable,
    Unknown,
}

impl ApiStatus {
    pub fn from_http_status(http_status: u16) -> Self {
        match http_status {
            400 | 422 => ApiStatus::InvalidArgument,
            401 => ApiStatus::Unauthenticated,
            403 => ApiStatus::PermissionDenied,
            404 => ApiStatus::NotFound,
            413 => ApiStatus::PayloadTooLarge,
            429 => ApiStatus::RateLimited,
            500..=599 => ApiStatus::Unavailable,
            _ => ApiStatus::Unknown,
        }
    }

    pub fn error_message(&self) -> &'static str {
        match self {
            ApiStatus::InvalidArgument => "Invalid request",
            ApiStatus::Unauthenticated => "Not signed in",
            ApiStatus::PermissionDenied => "Not allowed",
            ApiStatus::NotFound => "Not found",
            ApiStatus::PayloadTooLarge => "Request body too large",
            ApiStatus::RateLimited => "Too many requests",
            ApiStatus::Unavailable => "Service temporarily unavailable",
            ApiStatus::Unknown => "Unknown error occurred",
        }
    }
}

impl std::fmt::Display for ApiStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error_message())
    }
}

/// Failed API call with its HTTP status and body.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: ApiStatus,
    pub message: String,
}

impl ApiError {
    pub fn from_http_response(http_status: u16, body: String) -> Self {
        let status = ApiStatus::from_http_status(http_status);
        let body = body.trim();
        let message = if body.is_empty() {
            format!("API error (HTTP {}): {}", http_status, status.error_message())
        } else {
            format!("API error (HTTP {}): {}", http_status, body)
        };
        Self { status, message }
    }

    pub fn user_hint(&self) -> &'static str {
        match self.status {
            ApiStatus::Unauthenticated | ApiStatus::PermissionDenied => {
                "Run 'pantry login <user>' and try again."
            }
            ApiStatus::PayloadTooLarge => "Try a smaller photo.",
            ApiStatus::RateLimited => "Wait a moment before trying again.",
            ApiStatus::Unavailable => "The recipe service is down. Try again later.",
            _ => "Check the request and try again.",
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recognize_response() {
        let raw = r#"{"ingredients":[{"ingredient_name":"Tomato","ingredient_type":"Vegetables"},{"ingredient_name":"Salt"}]}"#;
        let resp: RecognizeResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.ingredients.len(), 2);
        assert_eq!(resp.ingredients[0].ingredient_type.as_deref(), Some("Vegetables"));
        assert!(resp.ingredients[1].ingredient_type.is_none());
    }

    #[test]
    fn test_recommendation_request_shape() {
        let prefs = Preferences {
            cuisines: vec!["Korean".into()],
            dietary_preferences: vec![],
            meal_occasions: vec!["Dinner".into()],
        };
        let req = MenuRecommendationRequest::new(vec!["Tofu".into()], prefs);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "ingredients": ["Tofu"],
                "cuisines": ["Korean"],
                "dietaryPreferences": [],
                "mealOccasions": ["Dinner"]
            })
        );
    }

    #[test]
    fn test_ids_accept_numbers_and_strings() {
        let fav: Favorite = serde_json::from_str(r#"{"menuId": 17, "name": "Bibimbap"}"#).unwrap();
        assert_eq!(fav.menu_id, "17");

        let review: Review =
            serde_json::from_str(r#"{"reviewId": "r-1", "rating": 4, "comment": "Good"}"#).unwrap();
        assert_eq!(review.id, "r-1");
        assert_eq!(review.stars(), 4);
    }

    #[test]
    fn test_review_accepts_fractional_rating() {
        let raw = r#"[{"reviewId": 1, "rating": 3.6}, {"reviewId": 2, "rating": 7}, {"reviewId": 3, "rating": -1}]"#;
        let reviews: Vec<Review> = serde_json::from_str(raw).unwrap();
        let stars: Vec<usize> = reviews.iter().map(Review::stars).collect();
        assert_eq!(stars, vec![4, 5, 0]);
    }

    #[test]
    fn test_api_error_from_status() {
        let err = ApiError::from_http_response(401, String::new());
        assert_eq!(err.status, ApiStatus::Unauthenticated);
        assert!(err.message.contains("Not signed in"));
        assert!(err.user_hint().contains("pantry login"));

        let err = ApiError::from_http_response(503, "maintenance".into());
        assert_eq!(err.status, ApiStatus::Unavailable);
        assert_eq!(err.to_string(), "API error (HTTP 503): maintenance");
    }
}
