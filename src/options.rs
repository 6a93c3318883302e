use std::collections::BTreeMap;

pub(crate) const DEFAULT_EXTENSION: &str = ".jade";

/// Options a [`Compiler`](crate::Compiler) is configured with.
///
/// Collections here are *additions*: they are merged into the compiler's
/// built-in defaults when the compiler is constructed, never substituted for
/// them. The doctype table is the exception, where an entry replaces the
/// default markup for the same name.
///
/// Filters are not options: they are closures, so they are registered on the
/// built compiler with [`Compiler::register_filter`](crate::Compiler::register_filter).
///
/// # Examples
///
/// ```
/// use jadeite::Options;
///
/// let options = Options::default()
///     .pretty(false)
///     .extension(".html")
///     .self_closing(["custom-el"]);
///
/// assert!(!options.pretty);
/// assert_eq!(options.extension, ".html");
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Indent and break lines between block-level tags.
    pub pretty: bool,
    /// Emit per-node trace events while compiling. Never changes the output.
    pub compile_debug: bool,
    /// Appended to `extends`/`include` paths that have no extension.
    pub extension: String,
    /// Render dynamic attributes through the runtime attribute helper.
    pub use_runtime: bool,
    pub variable_start: String,
    pub variable_end: String,
    /// Doctype to start every compile with.
    pub doctype: Option<String>,
    pub doctypes: BTreeMap<String, String>,
    pub self_closing: Vec<String>,
    pub inline_tags: Vec<String>,
    pub autoclose: Vec<String>,
    /// Name of the template being compiled, passed on to text filters.
    pub filename: Option<String>,
    /// Runtime function that renders a batch of dynamic attributes.
    pub attrs_helper: String,
    /// Runtime filter that adapts a collection for `each` loops.
    pub iter_helper: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            pretty: true,
            compile_debug: false,
            extension: DEFAULT_EXTENSION.to_string(),
            use_runtime: true,
            variable_start: "{{".to_string(),
            variable_end: "}}".to_string(),
            doctype: None,
            doctypes: BTreeMap::new(),
            self_closing: Vec::new(),
            inline_tags: Vec::new(),
            autoclose: Vec::new(),
            filename: None,
            attrs_helper: "__jadeite_attrs".to_string(),
            iter_helper: "__jadeite_iter".to_string(),
        }
    }
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub const fn compile_debug(mut self, compile_debug: bool) -> Self {
        self.compile_debug = compile_debug;
        self
    }

    /// Sets the default path extension. An empty string keeps `.jade`.
    pub fn extension<T: Into<String>>(mut self, extension: T) -> Self {
        let extension = extension.into();
        self.extension = if extension.is_empty() {
            DEFAULT_EXTENSION.to_string()
        } else {
            extension
        };
        self
    }

    pub const fn use_runtime(mut self, use_runtime: bool) -> Self {
        self.use_runtime = use_runtime;
        self
    }

    pub fn variable_delimiters<S: Into<String>, E: Into<String>>(mut self, start: S, end: E) -> Self {
        self.variable_start = start.into();
        self.variable_end = end.into();
        self
    }

    pub fn doctype<T: Into<String>>(mut self, doctype: T) -> Self {
        self.doctype = Some(doctype.into());
        self
    }

    pub fn doctypes<I, K, V>(mut self, doctypes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.doctypes
            .extend(doctypes.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn self_closing<I>(mut self, tags: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.self_closing.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn inline_tags<I>(mut self, tags: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.inline_tags.extend(tags.into_iter().map(Into::into));
        self
    }

    pub fn autoclose<I>(mut self, keywords: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.autoclose.extend(keywords.into_iter().map(Into::into));
        self
    }

    pub fn filename<T: Into<String>>(mut self, filename: T) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn attrs_helper<T: Into<String>>(mut self, helper: T) -> Self {
        self.attrs_helper = helper.into();
        self
    }

    pub fn iter_helper<T: Into<String>>(mut self, helper: T) -> Self {
        self.iter_helper = helper.into();
        self
    }

    /// The configured extension, falling back to `.jade` when a host
    /// deserialized an empty one.
    pub(crate) fn effective_extension(&self) -> &str {
        if self.extension.is_empty() {
            DEFAULT_EXTENSION
        } else {
            &self.extension
        }
    }
}
