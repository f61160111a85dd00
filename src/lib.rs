pub mod config;
pub mod detail;
pub mod export;
pub mod lookup;
pub mod resolver;
pub mod roster;
pub mod state;
pub mod views;
