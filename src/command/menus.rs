use anyhow::Result;

use super::AppContext;
use crate::domain::MenuRecommendation;
use crate::flows;

fn print_menus(menus: &[MenuRecommendation]) {
    if menus.is_empty() {
        println!("No menus. Run 'pantry recommend'.");
        return;
    }
    for (i, menu) in menus.iter().enumerate() {
        match &menu.menu_id {
            Some(id) => println!("  {:>2}. {} [{}]", i + 1, menu.name, id),
            None => println!("  {:>2}. {}", i + 1, menu.name),
        }
        if let Some(description) = &menu.description {
            println!("      {}", description);
        }
        if !menu.ingredients.is_empty() {
            let names: Vec<&str> = menu.ingredients.iter().map(|i| i.name.as_str()).collect();
            println!("      Needs: {}", names.join(", "));
        }
    }
}

pub async fn run_recommend(ctx: &AppContext) -> Result<()> {
    let stores = ctx.stores();
    let api = ctx.api()?;

    println!("🍳 Asking for menu ideas...");
    let menus = flows::recommend(&api, &stores, ctx.cancel_token()).await?;
    print_menus(&menus);
    if !menus.is_empty() {
        println!("\nUse 'pantry shopping from-menu <n>' to add what you are missing.");
    }
    Ok(())
}

pub async fn run_menus(ctx: &AppContext) -> Result<()> {
    print_menus(&ctx.stores().menus.menus());
    Ok(())
}
