//! Glyphs used by the board printer.
//!
//! Each has an ASCII fallback for terminals without emoji support.

use console::Emoji;

// Results
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "[OK]");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[WARN]");
pub static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "?");
pub static EMPTY: Emoji<'_, '_> = Emoji("🕳️  ", "(none)");

// Board
pub static MILESTONE: Emoji<'_, '_> = Emoji("🏁 ", "#");
pub static CALENDAR: Emoji<'_, '_> = Emoji("📅 ", "due:");
pub static LOCK: Emoji<'_, '_> = Emoji("🔒 ", "[private]");
pub static LABEL: Emoji<'_, '_> = Emoji("🏷️  ", "@");
pub static FILTER: Emoji<'_, '_> = Emoji("🧰 ", "filters:");
pub static CLOCK: Emoji<'_, '_> = Emoji("⏱️  ", "");

/// Status dot; colored by the caller.
pub static DOT: Emoji<'_, '_> = Emoji("●", "*");
