//! Test utilities for blogful applications.
//!
//! [`TestApp`] drives an assembled router in-process; [`TestResponse`] offers
//! status, header, and JSON-path assertions.

mod app;

pub use app::{json_pointer, TestApp, TestRequest, TestResponse};
