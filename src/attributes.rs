use crate::ast::{AttrValue, Attribute};
use crate::emitter::Emitter;

/// Emits a tag's attributes in source order.
///
/// Attributes that can be inlined are written directly. Runs of the others
/// are batched into a single call to the runtime attribute helper, flushed
/// as soon as an inlinable attribute interrupts the run so output order
/// matches source order.
pub(crate) fn emit_attributes(em: &mut Emitter<'_>, attrs: &[Attribute]) {
    let use_runtime = em.options().use_runtime;
    let mut pending: Vec<&Attribute> = Vec::new();

    for attr in attrs {
        if attr.is_static || (!use_runtime && attr.name != "class") {
            flush_dynamic(em, &mut pending);
            emit_static(em, attr, use_runtime);
        } else {
            pending.push(attr);
        }
    }
    flush_dynamic(em, &mut pending);
}

fn emit_static(em: &mut Emitter<'_>, attr: &Attribute, use_runtime: bool) {
    let name = &attr.name;
    match &attr.value {
        AttrValue::Expr(value) if use_runtime || attr.is_static => {
            em.push_fragment(format!(" {name}={value}"));
        }
        AttrValue::Expr(value) => {
            let reference = em.variable(value, false);
            em.push_fragment(format!(" {name}=\"{reference}\""));
        }
        AttrValue::Bool(true) => {
            if em.is_terse() {
                em.push_fragment(format!(" {name}"));
            } else {
                em.push_fragment(format!(" {name}=\"{name}\""));
            }
        }
        AttrValue::Bool(false) => {}
    }
}

fn runtime_value(value: &AttrValue) -> &str {
    match value {
        AttrValue::Expr(expr) => expr.as_str(),
        AttrValue::Bool(true) => "True",
        AttrValue::Bool(false) => "False",
    }
}

fn flush_dynamic(em: &mut Emitter<'_>, pending: &mut Vec<&Attribute>) {
    if pending.is_empty() {
        return;
    }

    let mut pairs = Vec::with_capacity(pending.len());
    let mut classes = Vec::new();
    for attr in std::mem::take(pending) {
        let value = runtime_value(&attr.value);
        if attr.name == "class" {
            classes.push(format!("({value})"));
        } else {
            pairs.push(format!("('{}',({}))", attr.name, value));
        }
    }
    if !classes.is_empty() {
        pairs.push(format!("('class', ({}))", classes.join(" , ")));
    }

    let mut params = Vec::with_capacity(2);
    if em.is_terse() {
        params.push("terse=True".to_string());
    }
    params.push(format!("attrs=[{}]", pairs.join(", ")));

    let options = em.options();
    let call = format!("{}({})", options.attrs_helper, params.join(", "));
    let reference = em.compiler().target().variable(options, &call, false);
    em.push_fragment(reference);
}

#[cfg(test)]
mod tests {
    use crate::ast::{Attribute, Block, Node, Tag};
    use crate::{Compiler, Options};

    fn render(options: Options, tag: Tag) -> String {
        Compiler::new(options.pretty(false))
            .compile(&Node::Tag(tag))
            .unwrap()
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_dynamic_run_flushes_after_static() {
        let tag = Tag::new("div")
            .attr(Attribute::fixed("id", "'x'"))
            .attr(Attribute::dynamic("data-x", "expr"))
            .attr(Attribute::dynamic("class", "'a'"));
        assert_eq!(
            render(Options::default(), tag),
            "<div id='x'{{__jadeite_attrs(attrs=[('data-x',(expr)), ('class', (('a')))])}}></div>"
        );
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_static_interrupts_dynamic_run() {
        let tag = Tag::new("div")
            .attr(Attribute::dynamic("title", "t"))
            .attr(Attribute::fixed("id", "'x'"))
            .attr(Attribute::dynamic("lang", "l"));
        assert_eq!(
            render(Options::default(), tag),
            "<div{{__jadeite_attrs(attrs=[('title',(t))])}} id='x'{{__jadeite_attrs(attrs=[('lang',(l))])}}></div>"
        );
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_classes_are_combined() {
        let tag = Tag::new("span")
            .attr(Attribute::dynamic("class", "'a'"))
            .attr(Attribute::dynamic("class", "extra"));
        assert_eq!(
            render(Options::default(), tag),
            "<span{{__jadeite_attrs(attrs=[('class', (('a') , (extra)))])}}></span>"
        );
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_terse_flag_is_passed_to_helper() {
        let tag = Tag::new("input").attr(Attribute::dynamic("value", "v"));
        assert_eq!(
            render(Options::default().doctype("html"), tag),
            "<input{{__jadeite_attrs(terse=True, attrs=[('value',(v))])}}>"
        );
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_boolean_attributes() {
        let tag = || {
            Tag::new("input")
                .attr(Attribute::fixed("checked", true))
                .attr(Attribute::fixed("disabled", false))
        };
        assert_eq!(
            render(Options::default(), tag()),
            "<input checked=\"checked\"/>"
        );
        assert_eq!(
            render(Options::default().doctype("html"), tag()),
            "<input checked>"
        );
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_without_runtime_values_become_references() {
        let tag = Tag::new("a")
            .attr(Attribute::dynamic("href", "url"))
            .attr(Attribute::fixed("rel", "'nofollow'"))
            .attr(Attribute::dynamic("class", "cls"));
        assert_eq!(
            render(Options::default().use_runtime(false), tag),
            "<a href=\"{{url}}\" rel='nofollow'{{__jadeite_attrs(attrs=[('class', ((cls)))])}}></a>"
        );
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_custom_helper_and_delimiters() {
        let tag = Tag::new("p").attr(Attribute::dynamic("id", "pid"));
        let options = Options::default()
            .attrs_helper("attrs")
            .variable_delimiters("<%= ", " %>");
        assert_eq!(
            render(options, tag),
            "<p<%= attrs(attrs=[('id',(pid))]) %>></p>"
        );
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_no_attributes_no_output() {
        let tag = Tag::new("p").child(Block::new());
        assert_eq!(render(Options::default(), tag), "<p></p>");
    }
}
