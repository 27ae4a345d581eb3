//! Inspection and debugging tools for the Bedrock wire protocol.
//!
//! This crate provides utilities for looking at captured traffic:
//!
//! - Decode a single frame into named fields
//! - Walk a game batch frame by frame, counting unknown packets
//! - List the registry with per-shape hashes
//!
//! # Design Principles
//!
//! - **First-class tooling** - These tools are part of the product, not afterthoughts.
//! - **Human-readable output** - Field names come from the shapes, not from guesswork.

mod input;
mod json;
mod report;

pub use input::parse_hex;
pub use json::message_to_json;
pub use report::{
    decode_frame, format_decode_pretty, inspect_batch, registry_summary, BatchReport,
    DecodedFrame, ShapeSummary,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let _: fn(&str) -> anyhow::Result<Vec<u8>> = parse_hex;
        let _: fn(&codec::Message) -> serde_json::Value = message_to_json;
        let _: fn(&codec::Registry) -> Vec<ShapeSummary> = registry_summary;
        let _: fn(&DecodedFrame) -> String = format_decode_pretty;
    }
}
