//! TRIZ Advisor - bilingual innovation advisor.
//!
//! Recommends invention principles for engineering contradictions using
//! the classical TRIZ toolkit: 40 principles, a contradiction matrix,
//! and keyword-driven parameter detection, in Chinese and English.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use triz_advisor::{EngineConfig, TrizEngine};
//!
//! let mut engine = TrizEngine::new(EngineConfig::default());
//! let solutions = engine.analyze_problem(
//!     "How to make the robot arm lighter without losing strength?",
//!     "weight",
//!     "strength",
//! );
//! for s in &solutions {
//!     println!("{} ({:.0}%) {}", s.principle_name, s.confidence * 100.0, s.description);
//! }
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┬──────────────┬───────────────┐
//! │  CLI / menu  │   JSON API   │  library use  │
//! └──────┬───────┴──────┬───────┴───────┬───────┘
//!        ▼              ▼               ▼
//! ┌──────────────────────────────────────────────┐
//! │                  TrizEngine                  │
//! │   matrix lookup, scoring, history, config    │
//! └──────┬───────────────┬───────────────┬───────┘
//!        ▼               ▼               ▼
//!  KnowledgeBase       Store        LlmEnhancer
//!  (40 principles)  (JSON files)   (OpenRouter)
//! ```

pub mod api;
pub mod engine;
pub mod i18n;
pub mod knowledge;
pub mod llm;
pub mod store;
pub mod types;

// Core types
pub use engine::TrizEngine;
pub use knowledge::KnowledgeBase;
pub use types::*;

// Persistence
pub use store::Store;

// Optional AI enhancement
pub use llm::{LlmConfig, LlmEnhancer};
