//! # Block Parsing
//!
//! Two-phase line-oriented block parsing for agent-written plans.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): Each line is classified into a
//!    `LineClass` holding local facts (opener kind, fence closer, table row).
//!
//! 2. **Block Construction** (`builder`): A `BlockBuilder` keeps at most one
//!    open multi-line leaf (paragraph, fence or table) and emits `Block`s in
//!    document order.
//!
//! ## Modules
//!
//! - **`types`**: `Block` and `BlockKind`
//! - **`kinds`**: Block-specific syntax with owned delimiters
//! - **`classify`**: `MarkdownLineClassifier` produces `LineClass` for each line
//! - **`builder`**: `BlockBuilder` state machine for block construction
//!
//! ## Key Invariants
//!
//! - Parsing is total: anything unrecognised lands in a paragraph
//! - Fenced code blocks are raw zones: no classification inside
//! - Block spans are ordered and only blank lines fall between them
//! - Consecutive blockquote lines stay separate blocks

pub mod builder;
pub mod classify;
pub mod kinds;
pub mod types;

pub use builder::BlockBuilder;
pub use classify::{LineClass, LineKind, MarkdownLineClassifier};
pub use kinds::{Table, parse_table};
pub use types::{Block, BlockKind};
