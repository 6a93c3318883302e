use crate::options::Options;

/// Syntax rules for one family of target template engine.
///
/// The traversal, markup and attribute logic is shared by every target; a
/// target only decides how statements, variable references and loop headers
/// are spelled.
pub trait Target: std::fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// Text placed before anything else in the output.
    fn header(&self) -> String {
        String::new()
    }

    /// Wraps a control statement, e.g. `{% endif %}`.
    fn statement(&self, body: &str) -> String {
        format!("{{% {body} %}}")
    }

    /// A variable reference, optionally passed through the escape filter.
    fn variable(&self, options: &Options, expr: &str, escape: bool) -> String {
        format!(
            "{}{}{}{}",
            options.variable_start,
            expr,
            if escape { "|escape" } else { "" },
            options.variable_end
        )
    }

    /// Body of the loop statement for an `each`. The binding count lets the
    /// runtime adapter pick between value-only and key/value iteration.
    fn each(&self, keys: &[String], obj: &str, helper: &str) -> String {
        format!("for {} in {}|{}:{}", keys.join(","), obj, helper, keys.len())
    }

    /// Expression yielding the parent template's content for a named block.
    fn parent_content(&self) -> &str {
        "super()"
    }
}

/// Generic Django/Jinja flavoured output. This is the default target.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Standard;

impl Target for Standard {
    fn name(&self) -> &'static str {
        "standard"
    }
}

/// Jinja2 (and minijinja) output. Jinja has no `filter:arg` syntax, so the
/// iteration adapter is called with its argument in parentheses.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Jinja;

impl Target for Jinja {
    fn name(&self) -> &'static str {
        "jinja"
    }

    fn each(&self, keys: &[String], obj: &str, helper: &str) -> String {
        format!("for {} in {}|{}({})", keys.join(","), obj, helper, keys.len())
    }
}
