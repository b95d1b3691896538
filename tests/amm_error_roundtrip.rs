use std::collections::HashSet;

use serde_json::Value;
use swap_quote_core::amm::error::AmmError;
use swap_quote_core::amm::error_catalog::AmmErrorCode;

#[test]
fn json_shape_per_code() {
    for code in AmmErrorCode::all() {
        let json = AmmError::new(*code).to_log_json();
        assert!(json.starts_with('{'));
        let parsed: Value = serde_json::from_str(&json).expect("json válido");
        assert_eq!(parsed["code"].as_str(), Some(code.code()));
        assert_eq!(parsed["title"].as_str(), Some(code.title()));
        assert_eq!(parsed["message"].as_str(), Some(code.message_pt()));
        assert!(parsed["context"].is_object());
    }
}

#[test]
fn context_with_quotes_and_control_chars_stays_valid_json() {
    let err = AmmError::new(AmmErrorCode::UnparseableInput)
        .with_context("input", "1\"2\\3\u{7}");
    let parsed: Value = serde_json::from_str(&err.to_log_json()).expect("json válido");
    assert_eq!(parsed["context"]["input"], "1\"2\\3\u{7}");
    assert_eq!(
        parsed["message"],
        "valor digitado não é um decimal válido: 1\"2\\3\u{7}"
    );
}

#[test]
fn all_codes_seen() {
    let seen: HashSet<String> = AmmErrorCode::all()
        .iter()
        .filter_map(|code| {
            let parsed: Value = serde_json::from_str(&AmmError::new(*code).to_log_json()).ok()?;
            parsed["code"].as_str().map(str::to_owned)
        })
        .collect();
    assert_eq!(seen.len(), 7);
}
