// src/lib.rs

//! Knowledge Bot Library
//!
//! Fetches technical web pages, keeps the ones worth keeping and writes them
//! into a Markdown knowledge base.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
