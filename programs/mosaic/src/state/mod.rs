pub mod grid_config;
pub mod slot_grid;
pub mod account_state;

pub use grid_config::*;
pub use slot_grid::*;
pub use account_state::*;
