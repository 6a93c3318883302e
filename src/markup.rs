//! Tags, text, comments and doctypes.

use crate::ast::{BlockComment, Comment, Tag, Text};
use crate::attributes::emit_attributes;
use crate::control::emit_code;
use crate::doctype::DEFAULT_NAME;
use crate::emitter::Emitter;
use crate::error::CompileResult;

/// Writes the doctype, resolving it first if needed.
///
/// An explicit `name` always wins. Without one, an already resolved doctype
/// is kept and otherwise the default is used.
pub(crate) fn emit_doctype(em: &mut Emitter<'_>, name: Option<&str>) {
    let name = name.filter(|n| !n.is_empty());
    if name.is_some() || em.doctype.is_none() {
        em.set_doctype(name.unwrap_or(DEFAULT_NAME));
    }
    if let Some(doctype) = &em.doctype {
        em.buffer.push_str(&doctype.markup);
    }
    em.has_compiled_doctype = true;
}

pub(crate) fn emit_tag(em: &mut Emitter<'_>, tag: &Tag) -> CompileResult<()> {
    em.indents = em.indents.saturating_add(1);
    let result = emit_tag_body(em, tag);
    em.indents = em.indents.saturating_sub(1);
    result
}

fn emit_tag_body(em: &mut Emitter<'_>, tag: &Tag) -> CompileResult<()> {
    let name = tag.name.as_str();
    if !em.has_compiled_tag {
        if !em.has_compiled_doctype && name == "html" {
            tracing::debug!("no doctype before <html>, emitting the default");
            emit_doctype(em, None);
        }
        em.has_compiled_tag = true;
    }

    let compiler = em.compiler();
    let pretty = compiler.options.pretty;
    let inline = tag.inline || compiler.is_inline(name);
    let depth = em.indents.saturating_sub(1);

    if inline {
        em.in_string = false;
    } else if pretty {
        em.newline(depth);
    }

    let self_closing = compiler.is_self_closing(name) && !em.is_xml();
    em.push_fragment(format!("<{name}"));
    emit_attributes(em, &tag.attrs);
    if self_closing {
        em.push_fragment(if em.is_terse() { ">" } else { "/>" });
        return Ok(());
    }
    em.push_fragment(">");

    if let Some(code) = &tag.code {
        emit_code(em, code)?;
    }
    if let Some(text) = tag.text.as_ref().and_then(|t| t.nodes.first()) {
        let text = em.interpolate(text.trim_start(), true);
        em.buffer.push_str(&text);
    }

    let text_only = tag.text_only || tag.block.is_empty();
    em.in_string = false;
    em.visit_block(&tag.block)?;

    if pretty && !compiler.is_inline(name) && !text_only {
        em.newline(depth);
    }
    em.push_fragment(format!("</{name}>"));
    Ok(())
}

/// Piped text. Text inside `<script>` is interpolated without escaping.
pub(crate) fn emit_text(em: &mut Emitter<'_>, text: &Text) {
    let joined = text.joined();
    let out = em.interpolate(&joined, !text.in_script());
    em.buffer.push_str(&out);
    if em.options().pretty {
        em.buffer.push_str("\n");
    }
}

/// Text that runs on into a following tag on the same line.
pub(crate) fn emit_string(em: &mut Emitter<'_>, text: &Text) {
    let joined = text.joined();
    let out = em.interpolate(&joined, true);
    em.buffer.push_str(&out);
    em.in_string = true;
}

pub(crate) fn emit_comment(em: &mut Emitter<'_>, comment: &Comment) {
    if !comment.buffer {
        return;
    }
    if em.options().pretty {
        em.newline(em.indents);
    }
    em.buffer.push_str(&format!("<!--{}-->", comment.value));
}

/// Block comments; `//if IE` style bodies become conditional comments.
pub(crate) fn emit_block_comment(em: &mut Emitter<'_>, comment: &BlockComment) -> CompileResult<()> {
    if !comment.buffer {
        return Ok(());
    }
    let condition = comment.value.trim();
    let conditional = condition.starts_with("if");
    if conditional {
        em.buffer.push_str(&format!("<!--[{condition}]>"));
    } else {
        em.buffer.push_str(&format!("<!--{}", comment.value));
    }
    em.visit_block(&comment.block)?;
    em.buffer
        .push_str(if conditional { "<![endif]-->" } else { "-->" });
    Ok(())
}
