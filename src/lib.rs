//! Core library for the `volley` CLI.
//!
//! This crate provides the internal building blocks used by the binary: CLI
//! argument types, the immutable run configuration, the shared HTTP
//! transport and request template, the fixed worker pool, and the lock-free
//! statistics aggregator. The primary user-facing interface is the `volley`
//! command-line application; library APIs may evolve as the CLI grows.
pub mod app;
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod pool;
pub mod stats;
