//! HTTP API: router, handlers and request/response mapping for the POS backend.

pub mod app;
