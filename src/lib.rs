pub mod board;
pub mod board_config;
pub mod config;
pub mod errors;
pub mod ui;
