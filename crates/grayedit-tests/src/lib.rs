//! Integration tests for grayedit crates.
//!
//! End-to-end checks that decoded images flow through the operations,
//! the compositor and the colour engine and back out through the codecs.
