//! Reports for single frames, whole batches and the registry.

use std::fmt::Write;

use anyhow::{bail, Context, Result};
use codec::{Codec, CodecError, Registry};
use serde::Serialize;
use serde_json::Value;

use crate::json::message_to_json;

/// One decoded frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedFrame {
    pub id: u32,
    pub name: &'static str,
    pub len: usize,
    pub fields: Value,
}

/// Outcome of inspecting one game batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchReport {
    /// Compression method named by the batch header, if any.
    pub compression: Option<String>,
    pub payload_len: usize,
    pub frames: Vec<DecodedFrame>,
    /// Identifiers of frames with no registered shape.
    pub unknown: Vec<u32>,
}

/// One registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShapeSummary {
    pub id: u32,
    pub name: &'static str,
    pub fields: usize,
    pub hash: String,
}

/// Decodes a single frame against `codec`.
pub fn decode_frame(frame: &[u8], codec: &Codec<'_>) -> Result<DecodedFrame> {
    let message = codec.decode(frame).context("decode frame")?;
    Ok(DecodedFrame {
        id: message.id(),
        name: message.name(),
        len: frame.len(),
        fields: message_to_json(&message),
    })
}

/// Parses a game batch and decodes every frame in it.
///
/// Unknown packets are counted and skipped. Compressed payloads are rejected
/// since inflating them is outside this workspace.
pub fn inspect_batch(
    datagram: &[u8],
    compression_enabled: bool,
    limits: &wire::Limits,
    codec: &Codec<'_>,
) -> Result<BatchReport> {
    let batch = wire::decode_batch(datagram, compression_enabled, limits).context("parse batch")?;
    if batch.is_compressed() {
        bail!(
            "batch payload is compressed with {:?}; inflate it before inspecting",
            batch.method
        );
    }

    let mut report = BatchReport {
        compression: batch.method.map(|method| format!("{method:?}")),
        payload_len: batch.payload.len(),
        frames: Vec::new(),
        unknown: Vec::new(),
    };
    let frames = wire::split_frames(batch.payload, limits).context("split frames")?;
    for (index, frame) in frames.into_iter().enumerate() {
        match codec.decode(frame) {
            Ok(message) => report.frames.push(DecodedFrame {
                id: message.id(),
                name: message.name(),
                len: frame.len(),
                fields: message_to_json(&message),
            }),
            Err(CodecError::UnknownPacket { id, offset }) => {
                tracing::debug!(packet_id = id, offset, frame = index, "skipping unknown packet");
                report.unknown.push(id);
            }
            Err(err) => return Err(err).with_context(|| format!("decode frame {index}")),
        }
    }
    Ok(report)
}

/// Lists every shape in identifier order.
#[must_use]
pub fn registry_summary(registry: &Registry) -> Vec<ShapeSummary> {
    registry
        .iter()
        .map(|shape| ShapeSummary {
            id: shape.id,
            name: shape.name,
            fields: shape.fields.len(),
            hash: format!("0x{:016x}", schema::shape_hash(shape)),
        })
        .collect()
}

/// Renders a decoded frame as an indented field tree.
#[must_use]
pub fn format_decode_pretty(frame: &DecodedFrame) -> String {
    let mut out = format!("{} (id {}, {} bytes)\n", frame.name, frame.id, frame.len);
    write_tree(&mut out, &frame.fields, 1);
    out
}

fn write_tree(out: &mut String, value: &Value, depth: usize) {
    let indent = "  ".repeat(depth);
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if child.is_object() || child.is_array() {
                    let _ = writeln!(out, "{indent}{key}:");
                    write_tree(out, child, depth + 1);
                } else {
                    let _ = writeln!(out, "{indent}{key}: {child}");
                }
            }
        }
        Value::Array(items) if items.is_empty() => {
            let _ = writeln!(out, "{indent}[]");
        }
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                if item.is_object() || item.is_array() {
                    let _ = writeln!(out, "{indent}[{index}]");
                    write_tree(out, item, depth + 1);
                } else {
                    let _ = writeln!(out, "{indent}[{index}] {item}");
                }
            }
        }
        leaf => {
            let _ = writeln!(out, "{indent}{leaf}");
        }
    }
}
