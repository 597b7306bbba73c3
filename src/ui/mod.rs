pub mod board_printer;
pub mod icons;

pub use board_printer::{print_board, print_labels, print_suggestions};
