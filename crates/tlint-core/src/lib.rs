//! Core functionality for the tlint testing-library linter
//!
//! This crate provides the core linting functionality including:
//! - Parsing of JavaScript/TypeScript test files and their binding table
//! - Rule checking and diagnostic generation
//! - Configuration management
//! - File discovery and processing

pub mod analyze;
pub mod check;
pub mod config;
pub mod diagnostic;
pub mod discovery;
pub mod error;
pub mod fs;
pub mod lints;
pub mod location;
pub mod rule_table;
pub mod semantic;
pub mod settings;
pub mod testing_library;
pub mod toml;
pub mod utils;
pub mod utils_ast;
