use anyhow::{Context, Result};
use std::path::PathBuf;

/// Default data directory: ~/.pantry
pub fn default_data_dir() -> Result<PathBuf> {
    Ok(dirs::home_dir()
        .context("Could not determine home directory")?
        .join(".pantry"))
}

/// Convert a 1-based position typed by the user into an index.
pub fn position_to_index(position: usize) -> Result<usize> {
    position
        .checked_sub(1)
        .context("Positions start at 1")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_to_index() {
        assert_eq!(position_to_index(1).unwrap(), 0);
        assert_eq!(position_to_index(7).unwrap(), 6);
        assert!(position_to_index(0).is_err());
    }
}
