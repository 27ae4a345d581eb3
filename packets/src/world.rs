//! Level, block and chunk packets.

use schema::{CountPrefix, FieldCodec, FieldDef, MessageShape};

use crate::ids::PacketId;

const SET_TIME_FIELDS: &[FieldDef] = &[FieldDef::new("time", FieldCodec::ZigZag)];

const UPDATE_BLOCK_FIELDS: &[FieldDef] = &[
    FieldDef::new("position", FieldCodec::BlockPosition),
    FieldDef::new("block_runtime_id", FieldCodec::VarInt),
    FieldDef::new("flags", FieldCodec::VarInt),
    FieldDef::new("layer", FieldCodec::VarInt),
];

const LEVEL_EVENT_FIELDS: &[FieldDef] = &[
    FieldDef::new("event", FieldCodec::ZigZag),
    FieldDef::new("position", FieldCodec::Vec3f),
    FieldDef::new("data", FieldCodec::ZigZag),
];

const BLOCK_ACTOR_DATA_FIELDS: &[FieldDef] = &[
    FieldDef::new("position", FieldCodec::BlockPosition),
    FieldDef::new("nbt", FieldCodec::Tag),
];

const SET_COMMANDS_ENABLED_FIELDS: &[FieldDef] = &[FieldDef::new("enabled", FieldCodec::Bool)];

const CHANGE_DIMENSION_FIELDS: &[FieldDef] = &[
    FieldDef::new("dimension", FieldCodec::ZigZag),
    FieldDef::new("position", FieldCodec::Vec3f),
    FieldDef::new("respawn", FieldCodec::Bool),
    FieldDef::new("loading_screen_id", FieldCodec::optional(&FieldCodec::U32)),
];

const REQUEST_CHUNK_RADIUS_FIELDS: &[FieldDef] = &[
    FieldDef::new("radius", FieldCodec::ZigZag),
    FieldDef::new("max_radius", FieldCodec::U8),
];

const CHUNK_RADIUS_UPDATE_FIELDS: &[FieldDef] = &[FieldDef::new("radius", FieldCodec::ZigZag)];

const SAVED_CHUNK: &[FieldDef] = &[
    FieldDef::new("x", FieldCodec::ZigZag),
    FieldDef::new("z", FieldCodec::ZigZag),
];

const CHUNK_PUBLISHER_UPDATE_FIELDS: &[FieldDef] = &[
    FieldDef::new("position", FieldCodec::BlockCoordinates),
    FieldDef::new("radius", FieldCodec::VarInt),
    FieldDef::new(
        "saved_chunks",
        FieldCodec::counted_array(CountPrefix::U32, &FieldCodec::Struct(SAVED_CHUNK)),
    ),
];

pub static SET_TIME: MessageShape =
    MessageShape::new(PacketId::SetTime.raw(), "SetTime", SET_TIME_FIELDS);

/// Sets one block. The position uses the unsigned-height encoding.
pub static UPDATE_BLOCK: MessageShape =
    MessageShape::new(PacketId::UpdateBlock.raw(), "UpdateBlock", UPDATE_BLOCK_FIELDS);

pub static LEVEL_EVENT: MessageShape =
    MessageShape::new(PacketId::LevelEvent.raw(), "LevelEvent", LEVEL_EVENT_FIELDS);

/// Block entity data. The tag is inline and needs a tag grammar to decode.
pub static BLOCK_ACTOR_DATA: MessageShape = MessageShape::new(
    PacketId::BlockActorData.raw(),
    "BlockActorData",
    BLOCK_ACTOR_DATA_FIELDS,
);

pub static SET_COMMANDS_ENABLED: MessageShape = MessageShape::new(
    PacketId::SetCommandsEnabled.raw(),
    "SetCommandsEnabled",
    SET_COMMANDS_ENABLED_FIELDS,
);

pub static CHANGE_DIMENSION: MessageShape = MessageShape::new(
    PacketId::ChangeDimension.raw(),
    "ChangeDimension",
    CHANGE_DIMENSION_FIELDS,
);

pub static REQUEST_CHUNK_RADIUS: MessageShape = MessageShape::new(
    PacketId::RequestChunkRadius.raw(),
    "RequestChunkRadius",
    REQUEST_CHUNK_RADIUS_FIELDS,
);

pub static CHUNK_RADIUS_UPDATE: MessageShape = MessageShape::new(
    PacketId::ChunkRadiusUpdate.raw(),
    "ChunkRadiusUpdate",
    CHUNK_RADIUS_UPDATE_FIELDS,
);

/// Publisher center with the chunks the server already sent, behind a
/// legacy 32-bit count.
pub static NETWORK_CHUNK_PUBLISHER_UPDATE: MessageShape = MessageShape::new(
    PacketId::NetworkChunkPublisherUpdate.raw(),
    "NetworkChunkPublisherUpdate",
    CHUNK_PUBLISHER_UPDATE_FIELDS,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_shapes_validate() {
        for shape in [
            &SET_TIME,
            &UPDATE_BLOCK,
            &LEVEL_EVENT,
            &BLOCK_ACTOR_DATA,
            &SET_COMMANDS_ENABLED,
            &CHANGE_DIMENSION,
            &REQUEST_CHUNK_RADIUS,
            &CHUNK_RADIUS_UPDATE,
            &NETWORK_CHUNK_PUBLISHER_UPDATE,
        ] {
            assert_eq!(shape.validate(), Ok(()), "{}", shape.name);
        }
    }
}
