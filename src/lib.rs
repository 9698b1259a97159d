// Main library entry point for the Java Code Analyzer.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod common;
