use std::collections::BTreeMap;

const DEFAULT_DOCTYPES: [(&str, &str); 8] = [
    ("default", "<!DOCTYPE html>"),
    ("xml", r#"<?xml version="1.0" encoding="utf-8" ?>"#),
    (
        "transitional",
        r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">"#,
    ),
    (
        "strict",
        r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Strict//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd">"#,
    ),
    (
        "frameset",
        r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Frameset//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-frameset.dtd">"#,
    ),
    (
        "1.1",
        r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.1//EN" "http://www.w3.org/TR/xhtml11/DTD/xhtml11.dtd">"#,
    ),
    (
        "basic",
        r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML Basic 1.1//EN" "http://www.w3.org/TR/xhtml-basic/xhtml-basic11.dtd">"#,
    ),
    (
        "mobile",
        r#"<!DOCTYPE html PUBLIC "-//WAPFORUM//DTD XHTML Mobile 1.2//EN" "http://www.openmobilealliance.org/tech/DTD/xhtml-mobile12.dtd">"#,
    ),
];

pub(crate) const DEFAULT_NAME: &str = "default";

/// Builds a doctype table from the defaults with `overrides` layered on top.
pub(crate) fn doctype_table(overrides: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    let mut table: BTreeMap<String, String> = DEFAULT_DOCTYPES
        .iter()
        .map(|(name, markup)| ((*name).to_string(), (*markup).to_string()))
        .collect();
    table.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    table
}

/// A resolved doctype and the rendering modes it implies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Doctype {
    pub markup: String,
    /// HTML5 mode: bare boolean attributes, no `/` on void elements.
    pub terse: bool,
    /// XML mode: void elements are never self-closed.
    pub xml: bool,
}

impl Doctype {
    pub(crate) fn resolve(table: &BTreeMap<String, String>, name: &str) -> Self {
        let name = if name.is_empty() { DEFAULT_NAME } else { name };
        let markup = table
            .get(name)
            .cloned()
            .unwrap_or_else(|| format!("<!DOCTYPE {name}>"));
        let xml = markup.starts_with("<?xml");
        Self {
            markup,
            terse: matches!(name, "5" | "html"),
            xml,
        }
    }
}
