//! Block-level parser.
//!
//! The block parser is line-oriented and builds a tree of:
//! - ATX headers
//! - Fenced code blocks
//! - Block quotes
//! - Lists and list items
//! - Paragraphs
//!
//! Leaf text is kept as `string_content`; inline parsing happens afterwards.

mod node;
mod parser;

pub use node::{AST_VERSION, Block, BlockKind, ListData, ListKind};
pub use parser::BlockParser;
