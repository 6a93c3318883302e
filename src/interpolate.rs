use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// `#{expr}` or `!{expr}`, optionally preceded by a backslash escape.
static INTERPOLATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\\)?([#!])\{(.*?)\}").expect("interpolation pattern is valid"));

/// Replaces every interpolation marker in `text` with whatever `reference`
/// builds from the inner expression.
///
/// An escaped marker (`\#{x}`) is kept as literal text, minus the backslash.
/// Both `#` and `!` markers are handed to `reference` identically: whether the
/// reference escapes its value is the caller's decision, not the marker's.
///
/// Text without markers comes back borrowed.
pub(crate) fn interpolate<'t, F>(text: &'t str, reference: F) -> Cow<'t, str>
where
    F: Fn(&str) -> String,
{
    INTERPOLATION.replace_all(text, |caps: &Captures<'_>| {
        let expr = caps.get(3).map_or("", |m| m.as_str());
        if caps.get(1).is_some() {
            let marker = caps.get(2).map_or("", |m| m.as_str());
            format!("{marker}{{{expr}}}")
        } else {
            reference(expr)
        }
    })
}
