//! # QuoteForge
//!
//! Backend for a construction-quoting web app.
//!
//! This library provides:
//! - An HTTP API for proposal generation, material lookup, and quote feedback
//! - LLM-based extraction of tasks and materials from free-text transcripts
//! - Semantic material pricing against a vector catalog (Supabase pgvector)
//!
//! ## Proposal Flow
//!
//! ```text
//!   transcript
//!       │
//!       ▼
//!  ┌─────────────────┐     ┌──────────────────┐
//!  │  extraction     │     │  catalog         │
//!  │  (LLM function  │     │  (embedding +    │
//!  │   calling)      │     │   vector search) │
//!  └────────┬────────┘     └────────┬─────────┘
//!           │   tasks + materials   │ priced matches
//!           ▼                       ▼
//!       ┌───────────────────────────────┐
//!       │  quote: resolution, pricing,  │
//!       │  confidence scoring           │
//!       └───────────────┬───────────────┘
//!                       ▼
//!                 structured Task list
//! ```
//!
//! ## Modules
//! - `api`: HTTP route handlers and error mapping
//! - `catalog`: embedding client and Supabase-backed material search
//! - `llm`: chat-completion client with function calling
//! - `quote`: the proposal pipeline (resolution, pricing, confidence)

pub mod api;
pub mod catalog;
pub mod config;
pub mod llm;
pub mod quote;

pub use config::Config;
