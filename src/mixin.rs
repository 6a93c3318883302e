//! Mixins and filters.

use crate::ast::{self, Mixin};
use crate::emitter::Emitter;
use crate::error::{CompileError, CompileResult, FilterKind};
use crate::filter::FilterFn;

/// A mixin with a body becomes a macro definition; one without is a call.
pub(crate) fn emit_mixin(em: &mut Emitter<'_>, mixin: &Mixin) -> CompileResult<()> {
    match &mixin.block {
        Some(block) => {
            em.push_statement(&format!("macro {}({})", mixin.name, mixin.args));
            em.visit_block(block)?;
            em.push_statement("endmacro");
        }
        None => {
            let call = format!("{}({})", mixin.name, mixin.args);
            let compiler = em.compiler();
            let reference = compiler
                .target()
                .variable(compiler.options(), &call, false);
            em.push_fragment(reference);
        }
    }
    Ok(())
}

/// Runs a registered filter over a `:name` block.
///
/// Errors returned by the filter are passed up unchanged and abort the
/// compile.
pub(crate) fn emit_filter(em: &mut Emitter<'_>, filter: &ast::Filter) -> CompileResult<()> {
    let compiler = em.compiler();
    let used = if filter.is_ast_filter {
        FilterKind::Ast
    } else {
        FilterKind::Text
    };
    let registered = compiler
        .filters
        .get(&filter.name)
        .ok_or_else(|| CompileError::unknown_filter(&filter.name, used))?;
    tracing::debug!(name = %filter.name, kind = %used, "running filter");

    let output = match (registered, used) {
        (FilterFn::Ast(f), FilterKind::Ast) => f(&filter.block, em, &filter.attrs),
        (FilterFn::Text(f), FilterKind::Text) => {
            let raw = filter.block.raw_text();
            let text = em.interpolate(&raw, true);
            let mut attrs = filter.attrs.clone();
            if let Some(filename) = &compiler.options().filename {
                attrs.insert("filename".to_string(), filename.clone());
            }
            f(text.as_ref(), &attrs)
        }
        (FilterFn::Ast(_), FilterKind::Text) | (FilterFn::Text(_), FilterKind::Ast) => {
            return Err(CompileError::FilterKindMismatch {
                name: filter.name.clone(),
                registered: registered.kind(),
                used,
            });
        }
    }
    .map_err(CompileError::Filter)?;

    em.push_fragment(output);
    Ok(())
}
