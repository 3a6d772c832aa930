//! Integration-style tests that exercise several modules together.

mod config_test;
