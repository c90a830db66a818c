use anyhow::Result;

use super::AppContext;
use crate::cli::{position_to_index, ShoppingCommand};
use crate::domain::ShoppingItem;
use crate::flows;

fn print_items(items: &[ShoppingItem]) {
    if items.is_empty() {
        println!("Shopping list is empty.");
        return;
    }
    for (i, item) in items.iter().enumerate() {
        if item.quantity.is_empty() {
            println!("  {:>2}. {}", i + 1, item.name);
        } else {
            println!("  {:>2}. {} - {}", i + 1, item.name, item.quantity);
        }
    }
}

pub async fn run_shopping(ctx: &AppContext, cmd: ShoppingCommand) -> Result<()> {
    let stores = ctx.stores();

    match cmd {
        ShoppingCommand::List => print_items(&stores.shopping.list()),
        ShoppingCommand::FromMenu { menu } => {
            let (offered, list) = flows::add_missing_to_shopping(&stores, position_to_index(menu)?)?;
            if offered.is_empty() {
                println!("You already have everything for this menu.");
            } else {
                println!("Added {} missing ingredient(s).", offered.len());
            }
            print_items(&list);
        }
        ShoppingCommand::Remove { position } => {
            let list = stores.shopping.remove_at(position_to_index(position)?)?;
            print_items(&list);
        }
        ShoppingCommand::Clear => {
            stores.shopping.clear();
            println!("✅ Shopping list cleared.");
        }
    }

    Ok(())
}
