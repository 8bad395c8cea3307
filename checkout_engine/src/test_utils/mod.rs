//! Helpers for setting up throwaway databases and canned order data in tests. Available to other crates via the
//! `test_utils` feature.
mod prepare_env;
mod seeds;

pub use prepare_env::{create_database, prepare_test_env, random_db_path, tear_down};
pub use seeds::{approved_payment, sample_customer, sample_items, sample_order};
