//! Property-based tests for token generation.

mod proptest_tokens;
