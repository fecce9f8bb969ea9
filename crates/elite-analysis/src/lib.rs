// SPDX-FileCopyrightText: 2026 Elite Finder Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structured LLM outputs for the Elite Finder AI service.
//!
//! This crate provides:
//! - **Conversation analysis**: quality auditor prompt, scored JSON verdict
//! - **Strategic reports**: CSO-style report over aggregated metrics
//!
//! Both operations ask the model for JSON and never fail: output that does
//! not parse collapses into a fixed fallback shape.

pub mod conversation;
pub mod parse;
pub mod report;
pub mod types;

pub use conversation::analyze_conversation;
pub use parse::strip_code_fences;
pub use report::generate_strategic_report;
pub use types::{
    AnalysisRequest, AnalysisResponse, ConversationMessage, ReportRequest, ReportResponse,
};
