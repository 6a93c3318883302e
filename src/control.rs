//! Conditionals, loops, code, named blocks and template references.

use crate::ast::{BlockMode, Code, Conditional, ConditionalKind, Each, NamedBlock};
use crate::emitter::Emitter;
use crate::error::CompileResult;
use crate::path::with_default_extension;

/// Emits a conditional and its `elif`/`else` links. The chain shares one
/// `endif`, written by the `if`/`unless` at its head.
pub(crate) fn emit_conditional(em: &mut Emitter<'_>, conditional: &Conditional) -> CompileResult<()> {
    let sentence = &conditional.sentence;
    let head = match conditional.kind {
        ConditionalKind::If => format!("if {sentence}"),
        ConditionalKind::Unless => format!("if not {sentence}"),
        ConditionalKind::Elif => format!("elif {sentence}"),
        ConditionalKind::Else => "else".to_string(),
    };
    em.push_statement(&head);
    em.visit_block(&conditional.block)?;
    for next in &conditional.next {
        emit_conditional(em, next)?;
    }
    if conditional.kind.is_chain_root() {
        em.push_statement("endif");
    }
    Ok(())
}

pub(crate) fn emit_code(em: &mut Emitter<'_>, code: &Code) -> CompileResult<()> {
    if code.buffer {
        let reference = em.variable(code.value.trim_start(), code.escape);
        em.push_fragment(reference);
    } else {
        em.push_statement(&code.value);
    }

    let Some(block) = &code.block else {
        return Ok(());
    };
    em.visit_block(block)?;

    if !code.buffer {
        let keyword = code.value.split_whitespace().next().unwrap_or_default();
        if em.compiler().is_autoclose(keyword) {
            em.push_statement(&format!("end{keyword}"));
        }
    }
    Ok(())
}

pub(crate) fn emit_each(em: &mut Emitter<'_>, each: &Each) -> CompileResult<()> {
    let compiler = em.compiler();
    let head = compiler
        .target()
        .each(&each.keys, &each.obj, &compiler.options().iter_helper);
    em.push_statement(&head);
    em.visit_block(&each.block)?;
    em.push_statement("endfor");
    Ok(())
}

pub(crate) fn emit_named_block(em: &mut Emitter<'_>, block: &NamedBlock) -> CompileResult<()> {
    em.push_statement(&format!("block {}", block.name));
    if block.mode == BlockMode::Prepend {
        emit_parent_content(em);
    }
    em.visit_block(&block.block)?;
    if block.mode == BlockMode::Append {
        emit_parent_content(em);
    }
    em.push_statement("endblock");
    Ok(())
}

fn emit_parent_content(em: &mut Emitter<'_>) {
    let compiler = em.compiler();
    let target = compiler.target();
    let reference = target.variable(compiler.options(), target.parent_content(), false);
    em.push_fragment(reference);
}

pub(crate) fn emit_assignment(em: &mut Emitter<'_>, name: &str, value: &str) {
    em.push_statement(&format!("set {name} = {value}"));
}

/// `extends` or `include`, with the default extension applied to bare paths.
pub(crate) fn emit_reference(em: &mut Emitter<'_>, keyword: &str, path: &str) {
    let path = with_default_extension(path, em.options().effective_extension());
    em.push_statement(&format!("{keyword} \"{path}\""));
}
