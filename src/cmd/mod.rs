//! CLI command implementations.
//!
//! Each submodule owns one or more related `Commands` variants:
//!
//! | Module   | Commands handled              |
//! |----------|-------------------------------|
//! | `board`  | `Show`, `Suggest`, `Labels`   |
//! | `build`  | `Build`                       |
//! | `config` | `Config`                      |

pub mod board;
pub mod build;
pub mod config;

pub use board::{cmd_labels, cmd_show, cmd_suggest};
pub use build::cmd_build;
pub use config::cmd_config;
