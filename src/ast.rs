//! Syntax tree handed to the compiler by an external Jade parser.
//!
//! Every node kind the code generator understands is a variant of [`Node`];
//! traversal matches on it exhaustively, so there is no way to hand the
//! compiler a node it cannot emit.

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::error::CompileError;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Raw text, emitted exactly as given.
    Literal { text: String },
    Block(Block),
    /// A `block name` definition that child templates may override.
    NamedBlock(NamedBlock),
    Tag(Tag),
    /// Piped or inline template text.
    Text(Text),
    /// Text that continues on the same line as a following tag.
    String(Text),
    /// `doctype [name]`. A missing name keeps whatever doctype is already set.
    Doctype { name: Option<String> },
    Comment(Comment),
    BlockComment(BlockComment),
    Assignment { name: String, value: String },
    Extends { path: String },
    Include { path: String },
    Conditional(Conditional),
    Code(Code),
    Each(Each),
    Mixin(Mixin),
    Filter(Filter),
}

impl Node {
    pub fn literal<T: Into<String>>(text: T) -> Self {
        Self::Literal { text: text.into() }
    }

    pub fn doctype<T: Into<String>>(name: Option<T>) -> Self {
        Self::Doctype {
            name: name.map(Into::into),
        }
    }

    pub fn assignment<N: Into<String>, V: Into<String>>(name: N, value: V) -> Self {
        Self::Assignment {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn extends<T: Into<String>>(path: T) -> Self {
        Self::Extends { path: path.into() }
    }

    pub fn include<T: Into<String>>(path: T) -> Self {
        Self::Include { path: path.into() }
    }

    /// Short name of the node kind, used in diagnostics.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Literal { .. } => "literal",
            Self::Block(_) => "block",
            Self::NamedBlock(_) => "named_block",
            Self::Tag(_) => "tag",
            Self::Text(_) => "text",
            Self::String(_) => "string",
            Self::Doctype { .. } => "doctype",
            Self::Comment(_) => "comment",
            Self::BlockComment(_) => "block_comment",
            Self::Assignment { .. } => "assignment",
            Self::Extends { .. } => "extends",
            Self::Include { .. } => "include",
            Self::Conditional(_) => "conditional",
            Self::Code(_) => "code",
            Self::Each(_) => "each",
            Self::Mixin(_) => "mixin",
            Self::Filter(_) => "filter",
        }
    }
}

/// An ordered run of sibling nodes.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    pub nodes: Vec<Node>,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<N: Into<Node>>(mut self, node: N) -> Self {
        self.nodes.push(node.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The raw source lines of a filter body, joined back together.
    ///
    /// Only literal and text leaves carry source text; anything else in a
    /// filter body contributes nothing.
    pub fn raw_text(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            match node {
                Node::Literal { text } => out.push_str(text),
                Node::Text(text) | Node::String(text) => out.push_str(&text.joined()),
                Node::Block(block) => out.push_str(&block.raw_text()),
                Node::NamedBlock(_)
                | Node::Tag(_)
                | Node::Doctype { .. }
                | Node::Comment(_)
                | Node::BlockComment(_)
                | Node::Assignment { .. }
                | Node::Extends { .. }
                | Node::Include { .. }
                | Node::Conditional(_)
                | Node::Code(_)
                | Node::Each(_)
                | Node::Mixin(_)
                | Node::Filter(_) => {}
            }
        }
        out
    }
}

impl From<Vec<Node>> for Block {
    fn from(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }
}

impl From<Block> for Node {
    fn from(block: Block) -> Self {
        Self::Block(block)
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum BlockMode {
    #[default]
    Replace,
    Append,
    Prepend,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedBlock {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub mode: BlockMode,
    #[cfg_attr(feature = "serde", serde(default))]
    pub block: Block,
}

impl NamedBlock {
    pub fn new<T: Into<String>>(name: T, mode: BlockMode, block: Block) -> Self {
        Self {
            name: name.into(),
            mode,
            block,
        }
    }
}

impl From<NamedBlock> for Node {
    fn from(block: NamedBlock) -> Self {
        Self::NamedBlock(block)
    }
}

/// The value side of an attribute.
///
/// Expression values are kept as the parser produced them; quoted literals
/// arrive already quoted.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Bool(bool),
    Expr(String),
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Expr(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Expr(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: AttrValue,
    /// Known at compile time and safe to inline into the markup.
    #[cfg_attr(feature = "serde", serde(default, rename = "static"))]
    pub is_static: bool,
}

impl Attribute {
    pub fn new<N: Into<String>, V: Into<AttrValue>>(name: N, value: V, is_static: bool) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            is_static,
        }
    }

    pub fn fixed<N: Into<String>, V: Into<AttrValue>>(name: N, value: V) -> Self {
        Self::new(name, value, true)
    }

    pub fn dynamic<N: Into<String>, V: Into<AttrValue>>(name: N, value: V) -> Self {
        Self::new(name, value, false)
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tag {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attrs: Vec<Attribute>,
    /// Buffered code written directly after the tag name (`p= user.name`).
    #[cfg_attr(feature = "serde", serde(default))]
    pub code: Option<Box<Code>>,
    /// Inline text following the tag on the same line.
    #[cfg_attr(feature = "serde", serde(default))]
    pub text: Option<Text>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub block: Block,
    #[cfg_attr(feature = "serde", serde(default))]
    pub inline: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub text_only: bool,
}

impl Tag {
    pub fn new<T: Into<String>>(name: T) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn attr(mut self, attr: Attribute) -> Self {
        self.attrs.push(attr);
        self
    }

    pub fn code(mut self, code: Code) -> Self {
        self.code = Some(Box::new(code));
        self
    }

    pub fn text<T: Into<String>>(mut self, text: T) -> Self {
        self.text = Some(Text::new(text).parent(self.name.clone()));
        self
    }

    pub fn child<N: Into<Node>>(mut self, node: N) -> Self {
        self.block.nodes.push(node.into());
        self
    }

    pub const fn inline(mut self, inline: bool) -> Self {
        self.inline = inline;
        self
    }

    pub const fn text_only(mut self, text_only: bool) -> Self {
        self.text_only = text_only;
        self
    }
}

impl From<Tag> for Node {
    fn from(tag: Tag) -> Self {
        Self::Tag(tag)
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Text {
    pub nodes: Vec<String>,
    /// Name of the enclosing tag, if the parser recorded one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub parent: Option<String>,
}

impl Text {
    pub fn new<T: Into<String>>(text: T) -> Self {
        Self {
            nodes: vec![text.into()],
            parent: None,
        }
    }

    pub fn parent<T: Into<String>>(mut self, parent: T) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn joined(&self) -> String {
        self.nodes.concat()
    }

    pub fn in_script(&self) -> bool {
        self.parent.as_deref() == Some("script")
    }
}

impl From<Text> for Node {
    fn from(text: Text) -> Self {
        Self::Text(text)
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub value: String,
    /// Unbuffered (`//-`) comments never reach the output.
    pub buffer: bool,
}

impl Comment {
    pub fn new<T: Into<String>>(value: T, buffer: bool) -> Self {
        Self {
            value: value.into(),
            buffer,
        }
    }
}

impl From<Comment> for Node {
    fn from(comment: Comment) -> Self {
        Self::Comment(comment)
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockComment {
    pub value: String,
    pub buffer: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub block: Block,
}

impl BlockComment {
    pub fn new<T: Into<String>>(value: T, buffer: bool, block: Block) -> Self {
        Self {
            value: value.into(),
            buffer,
            block,
        }
    }
}

impl From<BlockComment> for Node {
    fn from(comment: BlockComment) -> Self {
        Self::BlockComment(comment)
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ConditionalKind {
    If,
    Unless,
    Elif,
    Else,
}

impl ConditionalKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::If => "if",
            Self::Unless => "unless",
            Self::Elif => "elif",
            Self::Else => "else",
        }
    }

    /// Only the head of a chain owns the closing tag.
    pub const fn is_chain_root(self) -> bool {
        matches!(self, Self::If | Self::Unless)
    }
}

impl FromStr for ConditionalKind {
    type Err = CompileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "if" => Ok(Self::If),
            "unless" => Ok(Self::Unless),
            "elif" => Ok(Self::Elif),
            "else" => Ok(Self::Else),
            other => Err(CompileError::UnknownConditional {
                kind: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for ConditionalKind {
    type Error = CompileError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ConditionalKind> for String {
    fn from(kind: ConditionalKind) -> Self {
        kind.as_str().to_string()
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conditional {
    /// Serialized as `kind`; `type` is taken by the node tag.
    pub kind: ConditionalKind,
    /// The condition expression. Ignored for `else`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub sentence: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub block: Block,
    /// `elif`/`else` links chained onto this conditional, in source order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub next: Vec<Conditional>,
}

impl Conditional {
    pub fn new<T: Into<String>>(kind: ConditionalKind, sentence: T, block: Block) -> Self {
        Self {
            kind,
            sentence: sentence.into(),
            block,
            next: Vec::new(),
        }
    }

    pub fn chain(mut self, next: Self) -> Self {
        self.next.push(next);
        self
    }
}

impl From<Conditional> for Node {
    fn from(conditional: Conditional) -> Self {
        Self::Conditional(conditional)
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code {
    pub value: String,
    /// `true` when the code yields a value to print, `false` for a statement.
    pub buffer: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub escape: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub block: Option<Block>,
}

impl Code {
    /// Buffered output code, `= expr` or `!= expr`.
    pub fn output<T: Into<String>>(value: T, escape: bool) -> Self {
        Self {
            value: value.into(),
            buffer: true,
            escape,
            block: None,
        }
    }

    /// Unbuffered statement code, `- stmt`.
    pub fn statement<T: Into<String>>(value: T) -> Self {
        Self {
            value: value.into(),
            buffer: false,
            escape: false,
            block: None,
        }
    }

    pub fn block(mut self, block: Block) -> Self {
        self.block = Some(block);
        self
    }
}

impl From<Code> for Node {
    fn from(code: Code) -> Self {
        Self::Code(code)
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Each {
    /// `[value]` or `[key, value]`.
    pub keys: Vec<String>,
    pub obj: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub block: Block,
}

impl Each {
    pub fn new<K, T>(keys: K, obj: T, block: Block) -> Self
    where
        K: IntoIterator,
        K::Item: Into<String>,
        T: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            obj: obj.into(),
            block,
        }
    }
}

impl From<Each> for Node {
    fn from(each: Each) -> Self {
        Self::Each(each)
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mixin {
    pub name: String,
    /// Parameter or argument text, passed through untouched.
    #[cfg_attr(feature = "serde", serde(default))]
    pub args: String,
    /// Present on a definition, absent on a call.
    #[cfg_attr(feature = "serde", serde(default))]
    pub block: Option<Block>,
}

impl Mixin {
    pub fn definition<N: Into<String>, A: Into<String>>(name: N, args: A, block: Block) -> Self {
        Self {
            name: name.into(),
            args: args.into(),
            block: Some(block),
        }
    }

    pub fn call<N: Into<String>, A: Into<String>>(name: N, args: A) -> Self {
        Self {
            name: name.into(),
            args: args.into(),
            block: None,
        }
    }
}

impl From<Mixin> for Node {
    fn from(mixin: Mixin) -> Self {
        Self::Mixin(mixin)
    }
}

/// Attributes handed to a filter, keyed by name.
pub type FilterAttrs = BTreeMap<String, String>;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub name: String,
    /// For text filters the raw body lines, for AST filters the parsed body.
    #[cfg_attr(feature = "serde", serde(default))]
    pub block: Block,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attrs: FilterAttrs,
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_ast_filter: bool,
}

impl Filter {
    pub fn text<T: Into<String>>(name: T, block: Block) -> Self {
        Self {
            name: name.into(),
            block,
            attrs: FilterAttrs::new(),
            is_ast_filter: false,
        }
    }

    pub fn ast<T: Into<String>>(name: T, block: Block) -> Self {
        Self {
            name: name.into(),
            block,
            attrs: FilterAttrs::new(),
            is_ast_filter: true,
        }
    }

    pub fn attr<N: Into<String>, V: Into<String>>(mut self, name: N, value: V) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }
}

impl From<Filter> for Node {
    fn from(filter: Filter) -> Self {
        Self::Filter(filter)
    }
}
