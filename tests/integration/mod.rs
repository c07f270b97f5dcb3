//! Integration tests for the `release` binary

mod helpers;
mod test_release;
