//! Tollgate - Fixed-Window Rate Limiting
//!
//! This crate implements an in-process fixed-window rate limiter. A
//! [`Limiter`](ratelimit::Limiter) counts every call made within the current
//! window and denies calls once the configured count is exceeded. Windows roll
//! over lazily on the first call after they expire.

pub mod config;
pub mod error;
pub mod ratelimit;
pub mod walkthrough;
