//! Rule engine for linting Swagger/OpenAPI operations.
//!
//! Walks every operation under `paths` of an already-parsed document, checks
//! it against a fixed set of API design rules, and buckets the findings by
//! the severity configured for each rule. The engine performs no I/O, never
//! mutates the document, and follows `$ref` pointers only within the document.

pub mod config;
pub mod document;
pub mod lint;
pub mod operations;
pub mod rules;

pub use config::{RuleConfig, Severity};
pub use document::{presence, resolve, Presence};
pub use lint::{lint, Finding, Report};
pub use operations::{for_each_operation, operations, OperationRef, HTTP_METHODS};
pub use rules::Rule;
