pub mod ast;
mod attributes;
mod buffer;
mod control;
mod doctype;
mod emitter;
mod engine;
mod error;
mod filter;
mod interpolate;
mod markup;
mod mixin;
mod options;
mod path;
pub mod target;

// Public exports.
pub use buffer::OutputBuffer;
pub use doctype::Doctype;
pub use emitter::Emitter;
pub use engine::{Compiler, compile};
pub use error::{BoxError, CompileError, CompileResult, FilterKind};
pub use filter::{AstFilterFn, FilterFn, TextFilterFn};
pub use options::Options;
pub use target::{Jinja, Standard, Target};
