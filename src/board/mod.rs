//! Roadmap board core: faceted filtering and view derivation.
//!
//! ## Overview
//!
//! A roadmap is a static JSON snapshot of a project: milestones, each
//! holding issues with labels and a `Status` custom field. The board loads
//! it once, keeps a single [`FilterState`], and derives the whole visible
//! board from `(Dataset, FilterState)` on every change.
//!
//! ## Module Map
//!
//! ```text
//!  items.json ──> ingest.rs ──> roadmap-data.json
//!                                     │ Dataset::load()
//!                                     v
//!  Intent ──> events.rs (Board) ──> filter.rs ──> render.rs ──> view.rs
//!                   │                                 │
//!                   └──> suggest.rs                   └──> color.rs, i18n.rs
//! ```
//!
//! | Module    | Responsibility                                              |
//! |-----------|-------------------------------------------------------------|
//! | `models`  | Wire types: `Dataset`, `Milestone`, `Issue`, `StatusColor`  |
//! | `filter`  | `FilterState`, AND-combined matching, status ordering       |
//! | `suggest` | Typeahead: status, label, then issue-title suggestions      |
//! | `render`  | Column/card records, title highlighting, truncation         |
//! | `view`    | Result counter, filter badges, status and label pickers     |
//! | `color`   | Hex/HSL math, label chip styles, status palette             |
//! | `i18n`    | English/French strings and date formatting                  |
//! | `events`  | `Board` session: applies an `Intent`, re-renders            |
//! | `ingest`  | Groups exported project items into milestones               |

pub mod color;
pub mod events;
pub mod filter;
pub mod i18n;
pub mod ingest;
pub mod models;
pub mod render;
pub mod suggest;
pub mod view;

pub use events::{Board, BoardSettings, Intent, Reaction};
pub use filter::FilterState;
pub use i18n::Language;
pub use models::Dataset;
pub use render::{RenderOptions, RenderOutcome};
