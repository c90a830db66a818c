mod args;
mod paths;

pub use args::*;
pub use paths::{default_data_dir, position_to_index};
