use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use crate::ast::Node;
use crate::doctype::doctype_table;
use crate::emitter::Emitter;
use crate::error::CompileResult;
use crate::filter::{FilterFn, FilterRegistry};
use crate::options::Options;
use crate::target::{Standard, Target};

const INLINE_TAGS: [&str; 19] = [
    "a", "abbr", "acronym", "b", "br", "code", "em", "font", "i", "img", "ins", "kbd", "map",
    "samp", "small", "span", "strong", "sub", "sup",
];

const SELF_CLOSING: [&str; 16] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "keygen", "link", "menuitem",
    "meta", "param", "source", "track", "wbr",
];

const AUTOCLOSE_CODE: [&str; 13] = [
    "if",
    "for",
    "block",
    "filter",
    "autoescape",
    "with",
    "trans",
    "spaceless",
    "comment",
    "cache",
    "macro",
    "localize",
    "compress",
];

fn merged(defaults: &[&str], additions: &[String]) -> HashSet<String> {
    defaults
        .iter()
        .map(|s| (*s).to_string())
        .chain(additions.iter().cloned())
        .collect()
}

/// `Compiler` turns Jade syntax trees into template source for a target
/// engine.
///
/// A compiler is a finished configuration: its tag tables, doctypes and
/// filters are fixed once built and only read while compiling, so a single
/// compiler can serve any number of compiles, including from several threads.
/// Each call to [`compile`](Self::compile) gets its own traversal state.
///
/// # Examples
///
/// ```
/// use jadeite::{Compiler, Options, ast::{Node, Tag, Attribute}};
///
/// let compiler = Compiler::new(Options::default().pretty(false));
/// let page = Tag::new("p")
///     .attr(Attribute::fixed("id", "'intro'"))
///     .text("Hello #{name}");
///
/// let output = compiler.compile(&Node::Tag(page)).unwrap();
/// assert_eq!(output, "<p id='intro'>Hello {{name|escape}}</p>");
/// ```
#[derive(Debug, Clone)]
pub struct Compiler {
    pub(crate) options: Options,
    pub(crate) target: Arc<dyn Target>,
    pub(crate) doctypes: BTreeMap<String, String>,
    pub(crate) inline_tags: HashSet<String>,
    pub(crate) self_closing: HashSet<String>,
    pub(crate) autoclose: HashSet<String>,
    pub(crate) filters: FilterRegistry,
}

impl Compiler {
    /// Builds a compiler for the [`Standard`] target, merging the additions
    /// in `options` into the built-in tables.
    pub fn new(options: Options) -> Self {
        Self {
            doctypes: doctype_table(&options.doctypes),
            inline_tags: merged(&INLINE_TAGS, &options.inline_tags),
            self_closing: merged(&SELF_CLOSING, &options.self_closing),
            autoclose: merged(&AUTOCLOSE_CODE, &options.autoclose),
            filters: FilterRegistry::default(),
            target: Arc::new(Standard),
            options,
        }
    }

    /// Switches the syntax rules used for statements and variables.
    pub fn with_target<T: Target + 'static>(mut self, target: T) -> Self {
        self.target = Arc::new(target);
        self
    }

    /// Makes `filter` available to `:name` blocks, replacing any filter
    /// already registered under that name.
    pub fn register_filter<N: Into<String>>(&mut self, name: N, filter: FilterFn) -> &mut Self {
        self.filters.register(name.into(), filter);
        self
    }

    /// Adds a statement keyword whose code blocks get an automatic
    /// `end<keyword>` closer.
    pub fn register_autoclose<N: Into<String>>(&mut self, keyword: N) -> &mut Self {
        self.autoclose.insert(keyword.into());
        self
    }

    pub const fn options(&self) -> &Options {
        &self.options
    }

    pub fn target(&self) -> &dyn Target {
        self.target.as_ref()
    }

    pub fn is_inline(&self, tag: &str) -> bool {
        self.inline_tags.contains(tag)
    }

    pub fn is_self_closing(&self, tag: &str) -> bool {
        self.self_closing.contains(tag)
    }

    pub fn is_autoclose(&self, keyword: &str) -> bool {
        self.autoclose.contains(keyword)
    }

    /// Compiles `node` into target source.
    ///
    /// # Errors
    /// - `CompileError::UnknownFilter` / `CompileError::UnknownAstFilter` if
    ///   the tree uses a filter that isn't registered.
    /// - `CompileError::FilterKindMismatch` if a filter is used with the
    ///   other calling convention.
    /// - `CompileError::Filter` if a filter itself fails.
    ///
    /// Nothing is returned on failure; partial output is discarded.
    #[tracing::instrument(level = "debug", skip_all, fields(engine = self.target.name(), filename = self.options.filename.as_deref()))]
    pub fn compile(&self, node: &Node) -> CompileResult<String> {
        let mut emitter = Emitter::new(self);
        emitter.visit(node)?;
        let output = emitter.finish();
        tracing::debug!(bytes = output.len(), "compiled template");
        Ok(output)
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(Options::default())
    }
}

/// Compiles `node` with a default [`Compiler`].
///
/// # Errors
/// See [`Compiler::compile`].
pub fn compile(node: &Node) -> CompileResult<String> {
    Compiler::default().compile(node)
}
