//! Integration tests for Link-Harvest
//!
//! These tests drive the dispatcher with instrumented mock fetchers, run
//! the HTTP fetcher against wiremock servers, and render finished runs
//! with every output writer.

mod dispatch_tests;
