// lib.rs
//
// Client for a raffle-management backend's draw protocol: build the eligible
// ticket pool from paid buyers, confirm exclusions, ask the draw authority
// for a winner, and reconcile the result locally.
pub mod animation;
pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod pool;
pub mod session;
