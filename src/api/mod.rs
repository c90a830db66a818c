//! Client for the recipe backend.
//!
//! Image recognition, menu recommendations, favorites, history and reviews
//! are plain JSON request/response calls on one base URL.

mod client;
mod recognition;
mod recommendations;
mod social;
mod types;

pub use client::ApiClient;
pub use types::{ApiError, DetectedIngredient, MenuRecommendationRequest};
