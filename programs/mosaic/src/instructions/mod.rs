#![allow(ambiguous_glob_reexports)]

pub mod initialize;
pub mod update_config;
pub mod compose_for;
pub mod grow_capacity;
pub mod get_slots;
pub mod get_account_state;
pub mod get_gauge;

pub use initialize::*;
pub use update_config::*;
pub use compose_for::*;
pub use grow_capacity::*;
pub use get_slots::*;
pub use get_account_state::*;
pub use get_gauge::*;
