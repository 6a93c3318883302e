#[cfg(feature = "serde")]
mod serde_tests {
    use jadeite::ast::{AttrValue, BlockMode, ConditionalKind, Node};
    use jadeite::{Compiler, FilterKind, Options};
    use serde_json;

    #[test]
    #[ntest::timeout(100)]
    fn test_tree_from_json() {
        let json = r#"{
            "type": "block",
            "nodes": [
                { "type": "doctype", "name": "html" },
                {
                    "type": "tag",
                    "name": "a",
                    "attrs": [
                        { "name": "href", "value": "url" },
                        { "name": "hidden", "value": true, "static": true }
                    ],
                    "text": { "nodes": ["go #{where}"] }
                },
                {
                    "type": "conditional",
                    "kind": "unless",
                    "sentence": "user",
                    "block": { "nodes": [{ "type": "include", "path": "login" }] }
                }
            ]
        }"#;

        let node: Node = serde_json::from_str(json).unwrap();
        let compiler = Compiler::new(Options::default().pretty(false));
        assert_eq!(
            compiler.compile(&node).unwrap(),
            concat!(
                "<!DOCTYPE html>",
                "<a{{__jadeite_attrs(terse=True, attrs=[('href',(url))])}} hidden>go {{where|escape}}</a>",
                "{% if not user %}{% include \"login.jade\" %}{% endif %}",
            )
        );
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_unknown_conditional_kind_is_rejected() {
        let json = r#"{ "type": "conditional", "kind": "while", "sentence": "x" }"#;
        let err = serde_json::from_str::<Node>(json).unwrap_err();
        assert!(
            err.to_string().contains("unknown conditional kind \"while\""),
            "got {err}"
        );
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_small_values() {
        assert_eq!(serde_json::to_string(&ConditionalKind::Elif).unwrap(), r#""elif""#);
        assert_eq!(serde_json::to_string(&BlockMode::Prepend).unwrap(), r#""prepend""#);
        assert_eq!(serde_json::to_string(&FilterKind::Ast).unwrap(), r#""Ast""#);
        assert_eq!(
            serde_json::from_str::<AttrValue>("false").unwrap(),
            AttrValue::Bool(false)
        );
        assert_eq!(
            serde_json::from_str::<AttrValue>(r#""a + b""#).unwrap(),
            AttrValue::Expr("a + b".to_string())
        );
    }

    #[test]
    #[ntest::timeout(100)]
    fn test_options_fill_missing_fields_with_defaults() {
        let options: Options =
            serde_json::from_str(r#"{ "pretty": false, "extension": ".html", "autoclose": ["cache"] }"#)
                .unwrap();
        assert!(!options.pretty);
        assert_eq!(options.extension, ".html");
        assert_eq!(options.variable_start, "{{");
        assert_eq!(options.autoclose, vec!["cache".to_string()]);

        let round_trip: Options =
            serde_json::from_str(&serde_json::to_string(&options).unwrap()).unwrap();
        assert_eq!(round_trip, options);
    }
}
