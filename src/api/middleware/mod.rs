//! Middleware for the risk API.

pub mod request_log;
