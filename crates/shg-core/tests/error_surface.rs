use shg_core::errors::{graph_error, missing_root, ErrorInfo, HyperError};

fn sample_info(code: &str, message: &str) -> ErrorInfo {
    ErrorInfo::new(code, message)
        .with_context("node", "R")
        .with_context("arity", 3)
}

#[test]
fn every_family_exposes_its_payload() {
    let errors = [
        HyperError::TypeMismatch(sample_info("T001", "logspace vs real")),
        HyperError::MissingRoot(sample_info("M001", "no root")),
        HyperError::Unsupported(sample_info("U001", "outside on lazy-rank")),
        HyperError::Cyclic(sample_info("C001", "cycle at R")),
        HyperError::Graph(sample_info("G001", "arity cap")),
        HyperError::Config(sample_info("F001", "bad yaml")),
        HyperError::Serde(sample_info("S001", "schema mismatch")),
    ];
    for err in errors {
        assert!(err.info().context.contains_key("node"));
        assert_eq!(err.info().context["arity"], "3");
        assert!(err.code().ends_with("001"));
    }
}

#[test]
fn context_and_hint_preserve_family() {
    let err = graph_error("arity-cap", "tail too long")
        .with_context("max", 2)
        .with_hint("raise max_arity");
    assert!(matches!(&err, HyperError::Graph(info) if info.code == "arity-cap"));
    assert_eq!(err.info().context["max"], "2");
    assert_eq!(err.info().hint.as_deref(), Some("raise max_arity"));
}

#[test]
fn display_includes_code_context_and_hint() {
    let rendered = missing_root().with_context("edges", 4).to_string();
    assert!(rendered.starts_with("missing root:"));
    assert!(rendered.contains("code: missing-root"));
    assert!(rendered.contains("edges=4"));
    assert!(rendered.contains("hint:"));
}

#[test]
fn errors_round_trip_through_json() {
    let err = HyperError::Cyclic(sample_info("cycle", "cycle detected"));
    let json = serde_json::to_string(&err).unwrap();
    assert!(json.contains("\"family\":\"Cyclic\""));
    let restored: HyperError = serde_json::from_str(&json).unwrap();
    assert_eq!(err, restored);
}
