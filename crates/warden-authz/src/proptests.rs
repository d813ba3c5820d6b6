//! Property-based tests for element matching.
