use std::collections::HashMap;
use std::sync::Arc;

use crate::ast::{Block, FilterAttrs};
use crate::emitter::Emitter;
use crate::error::{BoxError, FilterKind};

pub type TextFilterFn = dyn Fn(&str, &FilterAttrs) -> Result<String, BoxError> + Send + Sync;
pub type AstFilterFn =
    dyn Fn(&Block, &mut Emitter<'_>, &FilterAttrs) -> Result<String, BoxError> + Send + Sync;

/// A named transform invoked by `:name` blocks in a template.
///
/// Text filters see the block's source text after interpolation. AST filters
/// see the parsed block and the live [`Emitter`], so they can drive emission
/// themselves; whatever they return is appended verbatim.
#[derive(Clone)]
pub enum FilterFn {
    Text(Arc<TextFilterFn>),
    Ast(Arc<AstFilterFn>),
}

impl FilterFn {
    pub fn text<F>(f: F) -> Self
    where
        F: Fn(&str, &FilterAttrs) -> Result<String, BoxError> + Send + Sync + 'static,
    {
        Self::Text(Arc::new(f))
    }

    pub fn ast<F>(f: F) -> Self
    where
        F: Fn(&Block, &mut Emitter<'_>, &FilterAttrs) -> Result<String, BoxError>
            + Send
            + Sync
            + 'static,
    {
        Self::Ast(Arc::new(f))
    }

    pub const fn kind(&self) -> FilterKind {
        match self {
            Self::Text(_) => FilterKind::Text,
            Self::Ast(_) => FilterKind::Ast,
        }
    }
}

impl std::fmt::Debug for FilterFn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FilterFn::{:?}", self.kind())
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct FilterRegistry {
    filters: HashMap<String, FilterFn>,
}

impl FilterRegistry {
    pub(crate) fn register(&mut self, name: String, filter: FilterFn) {
        self.filters.insert(name, filter);
    }

    pub(crate) fn get(&self, name: &str) -> Option<&FilterFn> {
        self.filters.get(name)
    }
}
