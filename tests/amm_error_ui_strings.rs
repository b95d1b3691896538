use swap_quote_core::amm::error::AmmError;
use swap_quote_core::amm::error_catalog::AmmErrorCode;

#[test]
fn no_newlines_or_tabs() {
    let err =
        AmmError::new(AmmErrorCode::UnparseableInput).with_context("input", "linha1\nlinha2\ttab");
    let user = err.to_user_string();
    assert!(!user.contains('\n'));
    assert!(!user.contains('\t'));
}

#[test]
fn truncate_long_context_values() {
    let long_value = "9".repeat(1024);
    let err = AmmError::new(AmmErrorCode::UnparseableInput).with_context("input", long_value);
    let user = err.to_user_string();
    assert!(user.chars().count() < 512);
    assert!(user.ends_with('…'));
}

#[test]
fn unknown_placeholder_is_left_as_is() {
    let err = AmmError::new(AmmErrorCode::ZeroAmount);
    assert_eq!(err.render_with_template("erro {desconhecido}"), "erro {desconhecido}");
}

#[test]
fn missing_context_keeps_placeholder_in_message() {
    let err = AmmError::new(AmmErrorCode::UnparseableInput);
    assert!(err.to_user_string().ends_with("{input}"));
}
