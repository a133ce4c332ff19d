//! Crate-level test suites exercising the full compile-and-scan path.

mod property_tests;
