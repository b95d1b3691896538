pub mod types;
pub mod guardrails;
pub mod quote;
pub mod format;
pub mod pricing;

// catálogo + tipo de erro unificados
pub mod error_catalog;
pub mod error;
pub mod error_map;

// oráculo de alta precisão para testes/goldens
pub mod ref_golden;
