use anyhow::Result;

use super::AppContext;
use crate::session::IdentitySource;

pub async fn run_login(ctx: &AppContext, user_id: &str) -> Result<()> {
    if let Some((current, IdentitySource::Environment)) = ctx.session.current() {
        println!(
            "⚠️  PANTRY_USER_ID is set to '{}' and takes priority over the saved login.",
            current
        );
    }

    ctx.session.login(user_id)?;
    println!("✅ Signed in as {}", user_id.trim());
    Ok(())
}

pub async fn run_logout(ctx: &AppContext) -> Result<()> {
    if !ctx.session.is_logged_in() {
        println!("You are not signed in.");
        return Ok(());
    }

    ctx.session.logout()?;
    println!("✅ Signed out. Your lists stay on this device.");
    Ok(())
}

pub async fn run_status(ctx: &AppContext) -> Result<()> {
    match ctx.session.current() {
        Some((user, source)) => {
            let origin = match source {
                IdentitySource::Environment => "PANTRY_USER_ID",
                IdentitySource::SessionFile => "saved login",
            };
            println!("✅ Signed in as {} ({})", user, origin);
        }
        None => {
            println!("❌ Not signed in");
            println!("   Run 'pantry login <user>' to keep your lists.");
            return Ok(());
        }
    }

    let stores = ctx.stores();
    println!("   Data directory: {}", ctx.config.data_dir.display());
    println!("   Recipe service: {}", ctx.config.api_url);
    println!("   Ingredients: {}", stores.ingredients.list().len());
    println!("   Deleted names: {}", stores.ingredients.deleted().len());
    println!("   Last scan: {} ingredient(s)", stores.ingredients.camera_preview().len());
    println!("   Shopping items: {}", stores.shopping.list().len());
    println!("   Cached menus: {}", stores.menus.menus().len());
    Ok(())
}
