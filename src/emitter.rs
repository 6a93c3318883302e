use std::borrow::Cow;

use crate::ast::{Block, Node};
use crate::buffer::OutputBuffer;
use crate::doctype::Doctype;
use crate::engine::Compiler;
use crate::error::CompileResult;
use crate::options::Options;
use crate::{control, interpolate, markup, mixin};

/// Traversal state for one compile.
///
/// An `Emitter` is created by [`Compiler::compile`] and dropped when it
/// returns; nothing in it outlives a single compile. AST filters receive the
/// live emitter and may use it to emit nodes themselves.
#[derive(Debug)]
pub struct Emitter<'c> {
    compiler: &'c Compiler,
    pub(crate) buffer: OutputBuffer,
    /// Nesting depth of the tag currently being emitted.
    pub(crate) indents: usize,
    pub(crate) doctype: Option<Doctype>,
    pub(crate) has_compiled_doctype: bool,
    pub(crate) has_compiled_tag: bool,
    /// Set after a `String` node; the next non-tag node starts a new line.
    pub(crate) in_string: bool,
}

impl<'c> Emitter<'c> {
    pub(crate) fn new(compiler: &'c Compiler) -> Self {
        let mut buffer = OutputBuffer::new();
        let header = compiler.target.header();
        if !header.is_empty() {
            buffer.push_fragment(header);
        }

        let mut emitter = Self {
            compiler,
            buffer,
            indents: 0,
            doctype: None,
            has_compiled_doctype: false,
            has_compiled_tag: false,
            in_string: false,
        };
        if let Some(name) = compiler.options.doctype.as_deref() {
            emitter.set_doctype(name);
        }
        emitter
    }

    pub const fn compiler(&self) -> &'c Compiler {
        self.compiler
    }

    pub const fn options(&self) -> &'c Options {
        &self.compiler.options
    }

    pub const fn indent(&self) -> usize {
        self.indents
    }

    /// Output written so far, in fragments.
    pub const fn buffer(&self) -> &OutputBuffer {
        &self.buffer
    }

    pub const fn doctype(&self) -> Option<&Doctype> {
        self.doctype.as_ref()
    }

    pub fn is_terse(&self) -> bool {
        self.doctype.as_ref().is_some_and(|d| d.terse)
    }

    pub fn is_xml(&self) -> bool {
        self.doctype.as_ref().is_some_and(|d| d.xml)
    }

    /// Resolves `name` against the compiler's doctype table and switches the
    /// terse/xml modes to match. Nothing is written to the output.
    pub fn set_doctype(&mut self, name: &str) {
        let doctype = Doctype::resolve(&self.compiler.doctypes, name);
        tracing::debug!(name, terse = doctype.terse, xml = doctype.xml, "resolved doctype");
        self.doctype = Some(doctype);
    }

    /// Emits `node` and everything beneath it.
    pub fn visit(&mut self, node: &Node) -> CompileResult<()> {
        if self.compiler.options.compile_debug {
            tracing::trace!(kind = node.kind(), indent = self.indents, "visit");
        }
        if !matches!(node, Node::Tag(_)) {
            self.break_string();
        }

        match node {
            Node::Literal { text } => {
                self.buffer.push_str(text);
                Ok(())
            }
            Node::Block(block) => self.visit_block(block),
            Node::NamedBlock(block) => control::emit_named_block(self, block),
            Node::Tag(tag) => markup::emit_tag(self, tag),
            Node::Text(text) => {
                markup::emit_text(self, text);
                Ok(())
            }
            Node::String(text) => {
                markup::emit_string(self, text);
                Ok(())
            }
            Node::Doctype { name } => {
                markup::emit_doctype(self, name.as_deref());
                Ok(())
            }
            Node::Comment(comment) => {
                markup::emit_comment(self, comment);
                Ok(())
            }
            Node::BlockComment(comment) => markup::emit_block_comment(self, comment),
            Node::Assignment { name, value } => {
                control::emit_assignment(self, name, value);
                Ok(())
            }
            Node::Extends { path } => {
                control::emit_reference(self, "extends", path);
                Ok(())
            }
            Node::Include { path } => {
                control::emit_reference(self, "include", path);
                Ok(())
            }
            Node::Conditional(conditional) => control::emit_conditional(self, conditional),
            Node::Code(code) => control::emit_code(self, code),
            Node::Each(each) => control::emit_each(self, each),
            Node::Mixin(mixin) => mixin::emit_mixin(self, mixin),
            Node::Filter(filter) => mixin::emit_filter(self, filter),
        }
    }

    pub fn visit_block(&mut self, block: &Block) -> CompileResult<()> {
        self.break_string();
        for node in &block.nodes {
            self.visit(node)?;
        }
        Ok(())
    }

    /// Appends literal output, merging with the previous literal write.
    pub fn push_str(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    /// Appends structural output that must stay a fragment of its own.
    pub fn push_fragment<T: Into<String>>(&mut self, s: T) {
        self.buffer.push_fragment(s);
    }

    /// Appends a control statement in the target's syntax.
    pub fn push_statement(&mut self, body: &str) {
        let statement = self.compiler.target.statement(body);
        self.buffer.push_fragment(statement);
    }

    /// A variable reference for `expr`. A leading `_ ` marks a gettext
    /// message and is rewritten to `_("...")`.
    pub fn variable(&self, expr: &str, escape: bool) -> String {
        let expr = match expr.strip_prefix("_ ") {
            Some(message) => Cow::Owned(format!("_(\"{message}\")")),
            None => Cow::Borrowed(expr),
        };
        self.compiler
            .target
            .variable(&self.compiler.options, &expr, escape)
    }

    /// Substitutes `#{expr}`/`!{expr}` markers in `text` with variable
    /// references, escaped when `escape` is set.
    pub fn interpolate<'t>(&self, text: &'t str, escape: bool) -> Cow<'t, str> {
        let compiler = self.compiler;
        interpolate::interpolate(text, |expr| {
            compiler.target.variable(&compiler.options, expr, escape)
        })
    }

    /// Newline plus two spaces per level.
    pub(crate) fn newline(&mut self, depth: usize) {
        self.buffer.push_str("\n");
        self.buffer.push_str(&"  ".repeat(depth));
    }

    fn break_string(&mut self) {
        if self.in_string {
            self.buffer.push_str("\n");
            self.in_string = false;
        }
    }

    pub(crate) fn finish(self) -> String {
        self.buffer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Tag, Text};

    fn compile_with(options: Options, node: Node) -> String {
        Compiler::new(options).compile(&node).unwrap()
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_initial_doctype_option_sets_modes() {
        let compiler = Compiler::new(Options::default().doctype("html"));
        let emitter = Emitter::new(&compiler);
        assert!(emitter.is_terse());
        assert!(!emitter.is_xml());
        // Resolved but not yet written.
        assert_eq!(emitter.finish(), "");
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_string_forces_newline_before_non_tag() {
        let node = Node::Block(
            vec![
                Node::String(Text::new("inline")),
                Node::literal("after"),
            ]
            .into(),
        );
        assert_eq!(
            compile_with(Options::default().pretty(false), node),
            "inline\nafter"
        );
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_string_followed_by_inline_tag_stays_on_line() {
        let node = Node::Block(
            vec![
                Node::String(Text::new("see ")),
                Node::Tag(Tag::new("a").text("here")),
            ]
            .into(),
        );
        assert_eq!(
            compile_with(Options::default(), node),
            "see <a>here</a>"
        );
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_literal_writes_share_a_fragment() {
        let compiler = Compiler::new(Options::default().pretty(false));
        let mut emitter = Emitter::new(&compiler);
        emitter.visit(&Node::literal("a")).unwrap();
        emitter.visit(&Node::literal("b")).unwrap();
        emitter.push_statement("endif");
        assert_eq!(emitter.buffer().fragments(), ["ab", "{% endif %}"]);
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_compile_debug_does_not_change_output() {
        let node: Node = Tag::new("html")
            .child(Tag::new("body").child(Text::new("hi #{name}")))
            .into();
        assert_eq!(
            compile_with(Options::default().compile_debug(true), node.clone()),
            compile_with(Options::default(), node)
        );
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_gettext_shorthand() {
        let compiler = Compiler::default();
        let emitter = Emitter::new(&compiler);
        assert_eq!(emitter.variable("_ Hello", false), "{{_(\"Hello\")}}");
        assert_eq!(emitter.variable("user", true), "{{user|escape}}");
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_state_is_fresh_per_compile() {
        let compiler = Compiler::default();
        let node = Node::Tag(Tag::new("html"));
        let first = compiler.compile(&node).unwrap();
        let second = compiler.compile(&node).unwrap();
        assert_eq!(first, second);
        assert!(second.starts_with("<!DOCTYPE html>"));
    }
}
