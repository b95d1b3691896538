use std::collections::HashSet;

use swap_quote_core::amm::error::AmmError;
use swap_quote_core::amm::error_catalog::{default_locale_message, AmmErrorCode};

#[test]
fn all_codes_are_unique() {
    let mut seen = HashSet::new();
    for code in AmmErrorCode::all() {
        assert!(seen.insert(code.code()));
    }
    assert_eq!(seen.len(), AmmErrorCode::all().len());
}

#[test]
fn all_messages_and_titles_nonempty() {
    for code in AmmErrorCode::all() {
        assert!(!code.message_pt().trim().is_empty(), "{} sem mensagem", code.code());
        assert!(!code.title().trim().is_empty(), "{} sem título", code.code());
    }
}

#[test]
fn exhaustive_all_slice() {
    assert_eq!(AmmErrorCode::all().len(), 7);
}

#[test]
fn codes_are_sequential() {
    for (i, code) in AmmErrorCode::all().iter().enumerate() {
        assert_eq!(code.code(), format!("AMM-{:04}", i + 1));
        assert_eq!(code.to_string(), code.code());
    }
}

#[test]
fn format_examples_resolve_placeholders() {
    let err = AmmError::new(AmmErrorCode::DecimalsOutOfRange).with_context("max", 36);
    assert_eq!(err.to_user_string(), "[AMM-0006] decimals deve ser <= 36");
    let json = err.to_log_json();
    assert!(json.contains("\"context\":{\"max\":\"36\"}"));
    assert_eq!(
        default_locale_message(AmmErrorCode::ZeroAmount),
        "amount deve ser > 0"
    );
}
