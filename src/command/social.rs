//! Remote favorites, history and reviews.

use anyhow::Result;

use super::AppContext;
use crate::cancel::OrCancelExt;
use crate::cli::{FavoritesCommand, HistoryCommand, ReviewsCommand};
use crate::domain::Rating;

pub async fn run_favorites(ctx: &AppContext, cmd: FavoritesCommand) -> Result<()> {
    let user = ctx.require_user()?;
    let api = ctx.api()?;
    let token = ctx.cancel_token();

    match cmd {
        FavoritesCommand::List => {
            let favorites = api.favorites(&user).or_cancel(token).await??;
            if favorites.is_empty() {
                println!("No favorites yet.");
            }
            for fav in favorites {
                println!("  ★ {} [{}]", fav.name.as_deref().unwrap_or("(unnamed)"), fav.menu_id);
            }
        }
        FavoritesCommand::Add { menu_id } => {
            api.add_favorite(&user, &menu_id).or_cancel(token).await??;
            println!("✅ Added {} to favorites", menu_id);
        }
        FavoritesCommand::Remove { menu_id } => {
            api.remove_favorite(&user, &menu_id).or_cancel(token).await??;
            println!("✅ Removed {} from favorites", menu_id);
        }
    }
    Ok(())
}

pub async fn run_history(ctx: &AppContext, cmd: HistoryCommand) -> Result<()> {
    let user = ctx.require_user()?;
    let api = ctx.api()?;
    let token = ctx.cancel_token();

    match cmd {
        HistoryCommand::List => {
            let history = api.history(&user).or_cancel(token).await??;
            if history.is_empty() {
                println!("Nothing cooked yet.");
            }
            for entry in history {
                println!(
                    "  {}  {} [{}]",
                    entry.cooked_at.as_deref().unwrap_or("-"),
                    entry.name.as_deref().unwrap_or("(unnamed)"),
                    entry.menu_id
                );
            }
        }
        HistoryCommand::Add { menu_id } => {
            api.add_history(&user, &menu_id).or_cancel(token).await??;
            println!("✅ Recorded {} in your history", menu_id);
        }
    }
    Ok(())
}

pub async fn run_reviews(ctx: &AppContext, cmd: ReviewsCommand) -> Result<()> {
    let api = ctx.api()?;
    let token = ctx.cancel_token();

    match cmd {
        ReviewsCommand::List { menu_id } => {
            let reviews = api.reviews(&menu_id).or_cancel(token).await??;
            if reviews.is_empty() {
                println!("No reviews for {}.", menu_id);
            }
            for review in reviews {
                let stars = "★".repeat(review.stars());
                println!(
                    "  {:<5} {} ({}, #{})",
                    stars,
                    review.comment.as_deref().unwrap_or(""),
                    review.user_id.as_deref().unwrap_or("anonymous"),
                    review.id
                );
            }
        }
        ReviewsCommand::Post {
            menu_id,
            rating,
            comment,
        } => {
            let rating = Rating::new(rating)?;
            let user = ctx.require_user()?;
            api.post_review(&menu_id, &user, rating, comment.as_deref())
                .or_cancel(token)
                .await??;
            println!("✅ Review posted");
        }
        ReviewsCommand::Update {
            menu_id,
            review_id,
            rating,
            comment,
        } => {
            let rating = Rating::new(rating)?;
            let user = ctx.require_user()?;
            api.update_review(&menu_id, &review_id, &user, rating, comment.as_deref())
                .or_cancel(token)
                .await??;
            println!("✅ Review updated");
        }
    }
    Ok(())
}
