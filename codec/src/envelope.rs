//! The packet envelope: a varint identifier followed by the shape's fields.

use bytestream::{ByteReader, ByteWriter};

use crate::error::{CodecError, CodecResult};
use crate::fields::{decode_fields, encode_fields, FieldContext};
use crate::limits::CodecLimits;
use crate::message::Message;
use crate::registry::Registry;
use crate::tag::TagGrammar;

/// Encodes and decodes whole frames against a registry.
#[derive(Clone)]
pub struct Codec<'r> {
    registry: &'r Registry,
    limits: CodecLimits,
    grammar: Option<&'r dyn TagGrammar>,
}

/// Frames decoded from one batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedFrames {
    /// Messages in frame order.
    pub messages: Vec<Message>,
    /// Identifiers of frames dropped as unknown, in frame order.
    pub unknown: Vec<u32>,
}

impl<'r> Codec<'r> {
    /// Creates a codec with default limits and no tag grammar.
    #[must_use]
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            limits: CodecLimits::default(),
            grammar: None,
        }
    }

    #[must_use]
    pub fn with_limits(mut self, limits: CodecLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Sets the grammar used to measure inline tags.
    #[must_use]
    pub fn with_tag_grammar(mut self, grammar: &'r dyn TagGrammar) -> Self {
        self.grammar = Some(grammar);
        self
    }

    #[must_use]
    pub const fn registry(&self) -> &'r Registry {
        self.registry
    }

    #[must_use]
    pub const fn limits(&self) -> &CodecLimits {
        &self.limits
    }

    fn context(&self) -> FieldContext<'_> {
        FieldContext {
            limits: &self.limits,
            grammar: self.grammar,
        }
    }

    /// Decodes one frame.
    ///
    /// An identifier with no registered shape fails with
    /// [`CodecError::UnknownPacket`]; the frame is untouched past its
    /// identifier and later frames are unaffected.
    pub fn decode(&self, frame: &[u8]) -> CodecResult<Message> {
        let mut reader = ByteReader::new(frame);
        let offset = reader.position();
        let id = reader.read_var_u32()?;
        let shape = self
            .registry
            .shape_for(id)
            .ok_or(CodecError::UnknownPacket { id, offset })?;

        let fields = decode_fields(shape.fields, &mut reader, self.context(), None, 0)?;
        if self.limits.reject_trailing_bytes && !reader.is_empty() {
            return Err(CodecError::TrailingBytes {
                id,
                remaining: reader.remaining(),
            });
        }

        tracing::trace!(packet_id = id, packet = shape.name, len = frame.len(), "decoded packet");
        Ok(Message::new(shape, fields))
    }

    /// Encodes one message as a frame.
    pub fn encode(&self, message: &Message) -> CodecResult<Vec<u8>> {
        let shape = message.shape();
        let id = self
            .registry
            .identifier_for(shape)
            .ok_or(CodecError::UnregisteredShape { name: shape.name })?;

        let mut writer = ByteWriter::with_capacity(64);
        writer.write_var_u32(id);
        encode_fields(
            shape.fields,
            message.fields(),
            shape.name,
            &mut writer,
            self.context(),
            None,
        )?;

        tracing::trace!(packet_id = id, packet = shape.name, len = writer.len(), "encoded packet");
        Ok(writer.finish())
    }

    /// Decodes a sequence of frames, dropping unknown packets.
    ///
    /// Unknown identifiers are logged and skipped. Any other failure stops
    /// decoding and is returned, since the rest of the batch can no longer be
    /// trusted.
    pub fn decode_frames<'f, I>(&self, frames: I) -> CodecResult<DecodedFrames>
    where
        I: IntoIterator<Item = &'f [u8]>,
    {
        let mut decoded = DecodedFrames::default();
        for (index, frame) in frames.into_iter().enumerate() {
            match self.decode(frame) {
                Ok(message) => decoded.messages.push(message),
                Err(CodecError::UnknownPacket { id, offset }) => {
                    tracing::debug!(packet_id = id, offset, frame = index, "dropping unknown packet");
                    decoded.unknown.push(id);
                }
                Err(err) => {
                    tracing::warn!(frame = index, error = %err, "failed to decode frame");
                    return Err(err);
                }
            }
        }
        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FieldValue;
    use schema::{FieldCodec, FieldDef, MessageShape};

    const TIME: &[FieldDef] = &[FieldDef::new("time", FieldCodec::ZigZag)];
    const RADIUS: &[FieldDef] = &[FieldDef::new("radius", FieldCodec::ZigZag)];
    static SET_TIME: MessageShape = MessageShape::new(10, "SetTime", TIME);
    static CHUNK_RADIUS: MessageShape = MessageShape::new(70, "ChunkRadiusUpdate", RADIUS);

    fn registry() -> Registry {
        Registry::builder().register(&SET_TIME).build().unwrap()
    }

    #[test]
    fn envelope_golden() {
        let registry = registry();
        let codec = Codec::new(&registry);
        let message = Message::new(&SET_TIME, vec![FieldValue::SInt(-1)]);
        let bytes = codec.encode(&message).unwrap();
        assert_eq!(bytes, [0x0A, 0x01]);
        assert_eq!(codec.decode(&bytes).unwrap(), message);
    }

    #[test]
    fn unknown_id_is_recoverable() {
        let registry = registry();
        let codec = Codec::new(&registry);
        let err = codec.decode(&[0xFF, 0xFF, 0x03, 0x00]).unwrap_err();
        assert_eq!(err, CodecError::UnknownPacket { id: 0xFFFF, offset: 0 });
        assert!(err.is_recoverable());
    }

    #[test]
    fn unregistered_shape_rejected_on_encode() {
        let registry = registry();
        let codec = Codec::new(&registry);
        let message = Message::new(&CHUNK_RADIUS, vec![FieldValue::SInt(8)]);
        assert_eq!(
            codec.encode(&message).unwrap_err(),
            CodecError::UnregisteredShape {
                name: "ChunkRadiusUpdate"
            }
        );
    }

    #[test]
    fn trailing_bytes_policy() {
        let registry = registry();
        let strict = Codec::new(&registry);
        let err = strict.decode(&[0x0A, 0x01, 0xEE]).unwrap_err();
        assert_eq!(err, CodecError::TrailingBytes { id: 10, remaining: 1 });

        let lenient = Codec::new(&registry).with_limits(CodecLimits::unlimited());
        assert_eq!(
            lenient.decode(&[0x0A, 0x01, 0xEE]).unwrap().fields(),
            &[FieldValue::SInt(-1)]
        );
    }

    #[test]
    fn trailing_bytes_ignored_when_only_that_check_is_off() {
        let registry = registry();
        let limits = CodecLimits {
            reject_trailing_bytes: false,
            ..CodecLimits::default()
        };
        let codec = Codec::new(&registry).with_limits(limits);
        let decoded = codec.decode(&[0x0A, 0x01, 0xEE, 0xEE]).unwrap();
        assert_eq!(decoded.fields(), &[FieldValue::SInt(-1)]);
    }

    #[test]
    fn decode_frames_skips_unknown() {
        let registry = registry();
        let codec = Codec::new(&registry);
        let frames: [&[u8]; 3] = [&[0x0A, 0x02], &[0xFF, 0xFF, 0x03, 0x42], &[0x0A, 0x04]];
        let decoded = codec.decode_frames(frames).unwrap();
        assert_eq!(decoded.unknown, vec![0xFFFF]);
        let times: Vec<_> = decoded
            .messages
            .iter()
            .map(|m| m.get("time").cloned())
            .collect();
        assert_eq!(
            times,
            vec![Some(FieldValue::SInt(1)), Some(FieldValue::SInt(2))]
        );
    }

    #[test]
    fn decode_frames_stops_on_hard_error() {
        let registry = registry();
        let codec = Codec::new(&registry);
        let frames: [&[u8]; 2] = [&[0x0A], &[0x0A, 0x02]];
        let err = codec.decode_frames(frames).unwrap_err();
        assert!(matches!(err, CodecError::Stream(_)));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn default_limits_match_codec_limits_default() {
        let registry = registry();
        assert_eq!(Codec::new(&registry).limits(), &CodecLimits::default());
    }
}
