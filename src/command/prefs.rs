use anyhow::Result;

use super::AppContext;
use crate::cli::PrefsCommand;
use crate::domain::Preferences;
use crate::stores::PreferenceKind;

fn print_prefs(prefs: &Preferences) {
    let show = |tags: &[String]| {
        if tags.is_empty() {
            "(any)".to_string()
        } else {
            tags.join(", ")
        }
    };
    println!("Cuisines:       {}", show(&prefs.cuisines));
    println!("Dietary:        {}", show(&prefs.dietary_preferences));
    println!("Meal occasions: {}", show(&prefs.meal_occasions));
}

pub async fn run_prefs(ctx: &AppContext, cmd: PrefsCommand) -> Result<()> {
    let store = ctx.stores().preferences;

    let prefs = match cmd {
        PrefsCommand::Show => store.load(),
        PrefsCommand::AddCuisine(t) => store.add(PreferenceKind::Cuisine, &t.tag),
        PrefsCommand::RemoveCuisine(t) => store.remove(PreferenceKind::Cuisine, &t.tag),
        PrefsCommand::AddDiet(t) => store.add(PreferenceKind::Dietary, &t.tag),
        PrefsCommand::RemoveDiet(t) => store.remove(PreferenceKind::Dietary, &t.tag),
        PrefsCommand::AddOccasion(t) => store.add(PreferenceKind::MealOccasion, &t.tag),
        PrefsCommand::RemoveOccasion(t) => store.remove(PreferenceKind::MealOccasion, &t.tag),
    };

    print_prefs(&prefs);
    if prefs.is_empty() {
        println!("\nNo preferences set: recommendations will cover every cuisine.");
    }
    Ok(())
}
