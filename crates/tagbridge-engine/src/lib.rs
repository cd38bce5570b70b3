//! tagbridge-engine: the bundled tagscript interpreter.
//!
//! Scripts are plain text with `{declaration(parameter):payload}` blocks.
//! Blocks resolve inside-out; the interpreter is immutable after construction
//! and safe to share across request handlers. Variable lookup goes through the
//! [`Adapter`] seam so callers can expose their own entity types as seeds.

mod adapter;
pub mod block;
mod embed;
mod error;
mod interpreter;
mod response;
mod tag;

pub use adapter::{Adapter, SeedSet, StringAdapter};
pub use embed::{Embed, EmbedAuthor, EmbedField, EmbedFooter, EmbedMedia};
pub use error::EngineError;
pub use interpreter::{Context, ExecutionLimits, Interpreter};
pub use response::{Action, Response};
pub use tag::Tag;
