use anyhow::{Context, Result};

use super::{print_ingredients, AppContext};
use crate::cli::{position_to_index, IngredientCommand};
use crate::flows;

pub async fn run_ingredients(ctx: &AppContext, cmd: IngredientCommand) -> Result<()> {
    let store = ctx.stores().ingredients;

    match cmd {
        IngredientCommand::List => print_ingredients(&store.list()),
        IngredientCommand::Add { name, kind } => {
            let list = store.add_manual(&name, kind.as_deref())?;
            print_ingredients(&list);
        }
        IngredientCommand::Delete { position } => {
            let list = store.delete(position_to_index(position)?)?;
            print_ingredients(&list);
        }
        IngredientCommand::Edit { position, name } => {
            let list = store.edit(position_to_index(position)?, &name)?;
            print_ingredients(&list);
        }
        IngredientCommand::Forget { name } => {
            let deleted = store.add_deleted(&name);
            println!("Deleted names: {}", deleted.join(", "));
        }
        IngredientCommand::Deleted => {
            let deleted = store.deleted();
            if deleted.is_empty() {
                println!("No deleted names.");
            } else {
                for name in deleted {
                    println!("  - {}", name);
                }
            }
        }
        IngredientCommand::Scan { image } => {
            let bytes = tokio::fs::read(&image)
                .await
                .with_context(|| format!("Failed to read image {}", image))?;

            println!("📷 Analyzing {}...", image);
            let api = ctx.api()?;
            let outcome = flows::scan_image(&api, &store, &bytes, ctx.cancel_token()).await?;

            println!("Detected {} ingredient(s):", outcome.detected.len());
            for ing in &outcome.detected {
                println!("  - {} ({})", ing.name, ing.kind);
            }
            println!("\nIngredients:");
            print_ingredients(&outcome.list);
        }
        IngredientCommand::Clear => {
            store.clear();
            println!("✅ Cleared ingredients, scans and deleted names.");
        }
    }

    Ok(())
}
