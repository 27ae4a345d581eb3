//! Constructors for frequently sent messages.
//!
//! Each helper lays out field values in shape order so callers do not have
//! to track variant payloads or presence gates by hand.

use codec::{BlockPosition, FieldValue, Message, VariantValue};

use crate::kinds::{PlayStatus, TextType};
use crate::{interface, session, world};

#[must_use]
pub fn play_status(status: PlayStatus) -> Message {
    Message::new(&session::PLAY_STATUS, vec![FieldValue::SInt(status.raw())])
}

/// A disconnect. With no message the client skips the disconnect screen.
#[must_use]
pub fn disconnect(reason: i32, message: Option<&str>) -> Message {
    let (hide_screen, message, filtered) = match message {
        Some(text) => (false, FieldValue::from(text), FieldValue::from("")),
        None => (true, FieldValue::Absent, FieldValue::Absent),
    };
    Message::new(
        &session::DISCONNECT,
        vec![
            FieldValue::SInt(i64::from(reason)),
            FieldValue::Bool(hide_screen),
            message,
            filtered,
        ],
    )
}

/// A raw, untranslated text message.
#[must_use]
pub fn raw_text(message: &str) -> Message {
    text(TextType::Raw, vec![FieldValue::from(message)])
}

/// A chat line attributed to `source`.
#[must_use]
pub fn chat(source: &str, message: &str) -> Message {
    text(
        TextType::Chat,
        vec![FieldValue::from(source), FieldValue::from(message)],
    )
}

fn text(kind: TextType, payload: Vec<FieldValue>) -> Message {
    Message::new(
        &interface::TEXT,
        vec![
            FieldValue::UInt(kind as u64),
            FieldValue::Bool(false),
            FieldValue::Variant(VariantValue::new(kind.raw(), payload)),
            FieldValue::from(""),
            FieldValue::from(""),
        ],
    )
}

#[must_use]
pub fn set_time(time: i32) -> Message {
    Message::new(&world::SET_TIME, vec![FieldValue::SInt(i64::from(time))])
}

/// Sets the block at `position` on the primary layer.
#[must_use]
pub fn update_block(position: BlockPosition, block_runtime_id: u32) -> Message {
    Message::new(
        &world::UPDATE_BLOCK,
        vec![
            FieldValue::BlockPos(position),
            FieldValue::UInt(u64::from(block_runtime_id)),
            FieldValue::UInt(0b11),
            FieldValue::UInt(0),
        ],
    )
}
