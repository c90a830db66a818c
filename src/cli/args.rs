use clap::{Args, Parser, Subcommand};

/// Pantry CLI - track ingredients, get menu ideas, build a shopping list
#[derive(Parser)]
#[command(name = "pantry")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding the session and stored lists. Defaults to ~/.pantry
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Base URL of the recipe service
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in as a user (all lists are stored per user)
    Login {
        /// User identifier
        user_id: String,
    },
    /// Sign out; stored lists are kept
    Logout,
    /// Show the current user and what is stored for them
    Status,
    /// Manage the ingredient list
    #[command(subcommand)]
    Ingredients(IngredientCommand),
    /// Manage the shopping list
    #[command(subcommand)]
    Shopping(ShoppingCommand),
    /// Manage cuisine, diet and meal-occasion preferences
    #[command(subcommand)]
    Prefs(PrefsCommand),
    /// Get menu recommendations for the current ingredients
    Recommend,
    /// Show the last recommended menus
    Menus,
    /// Favorite menus (remote)
    #[command(subcommand)]
    Favorites(FavoritesCommand),
    /// Cooking history (remote)
    #[command(subcommand)]
    History(HistoryCommand),
    /// Menu reviews (remote)
    #[command(subcommand)]
    Reviews(ReviewsCommand),
}

#[derive(Subcommand)]
pub enum IngredientCommand {
    /// List ingredients
    List,
    /// Add an ingredient by name
    Add {
        name: String,
        /// Category, e.g. Vegetables. Defaults to Other
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
    },
    /// Delete the ingredient at a position (1-based); it will not come back from scans
    Delete { position: usize },
    /// Rename the ingredient at a position (1-based)
    Edit { position: usize, name: String },
    /// Mark a name as deleted without it being in the list
    Forget { name: String },
    /// Show deleted names
    Deleted,
    /// Detect ingredients in a photo and merge them into the list
    Scan {
        /// Path to a JPEG or PNG image
        image: String,
    },
    /// Remove all ingredients, scans and deletions
    Clear,
}

#[derive(Subcommand)]
pub enum ShoppingCommand {
    /// List shopping items
    List,
    /// Add the missing ingredients of a recommended menu (1-based, see `pantry menus`)
    FromMenu { menu: usize },
    /// Remove the item at a position (1-based)
    Remove { position: usize },
    /// Empty the shopping list
    Clear,
}

#[derive(Args)]
pub struct TagArg {
    pub tag: String,
}

#[derive(Subcommand)]
pub enum PrefsCommand {
    /// Show preferences
    Show,
    AddCuisine(TagArg),
    RemoveCuisine(TagArg),
    AddDiet(TagArg),
    RemoveDiet(TagArg),
    AddOccasion(TagArg),
    RemoveOccasion(TagArg),
}

#[derive(Subcommand)]
pub enum FavoritesCommand {
    List,
    Add { menu_id: String },
    Remove { menu_id: String },
}

#[derive(Subcommand)]
pub enum HistoryCommand {
    List,
    /// Record that a menu was cooked now
    Add { menu_id: String },
}

#[derive(Subcommand)]
pub enum ReviewsCommand {
    List {
        menu_id: String,
    },
    Post {
        menu_id: String,
        /// 1 to 5
        rating: i64,
        comment: Option<String>,
    },
    Update {
        menu_id: String,
        review_id: String,
        /// 1 to 5
        rating: i64,
        comment: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_ingredient_add() {
        let cli = Cli::parse_from(["pantry", "ingredients", "add", "Tomato", "--type", "Vegetables"]);
        match cli.command {
            Some(Commands::Ingredients(IngredientCommand::Add { name, kind })) => {
                assert_eq!(name, "Tomato");
                assert_eq!(kind.as_deref(), Some("Vegetables"));
            }
            _ => panic!("unexpected parse"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["pantry", "shopping", "list", "--data-dir", "/tmp/p", "-v"]);
        assert!(cli.verbose);
        assert_eq!(cli.data_dir.as_deref(), Some("/tmp/p"));
    }
}
