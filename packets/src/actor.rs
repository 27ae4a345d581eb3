//! Actor and player packets.

use schema::{FieldCodec, FieldDef, MessageShape, Variant};

use crate::ids::PacketId;
use crate::item::{ITEM_INTERACTION, ITEM_STACK_REQUEST};
use crate::kinds::{
    DataItemType, InputFlag, InteractAction, PlayMode, PlayerActionType, ANIMATE_ROW_BIT,
};

const REMOVE_ENTITY_FIELDS: &[FieldDef] = &[FieldDef::new("unique_id", FieldCodec::ZigZong)];

const MOVE_ACTOR_ABSOLUTE_FIELDS: &[FieldDef] = &[
    FieldDef::new("runtime_id", FieldCodec::VarLong),
    FieldDef::new("flags", FieldCodec::U8),
    FieldDef::new("position", FieldCodec::Vec3f),
    FieldDef::new("rotation", FieldCodec::Rotation),
];

const INTERACT_POSITION: &[FieldDef] = &[FieldDef::new("position", FieldCodec::Vec3f)];

const INTERACT_VARIANTS: &[Variant] = &[
    Variant::new(InteractAction::LeaveVehicle.raw(), "LeaveVehicle", INTERACT_POSITION),
    Variant::new(InteractAction::MouseOverEntity.raw(), "MouseOverEntity", INTERACT_POSITION),
    Variant::new(InteractAction::NpcOpen.raw(), "NpcOpen", &[]),
    Variant::new(InteractAction::OpenInventory.raw(), "OpenInventory", &[]),
];

const INTERACT_FIELDS: &[FieldDef] = &[
    FieldDef::new("action", FieldCodec::U8),
    FieldDef::new("target_runtime_id", FieldCodec::VarLong),
    FieldDef::new("payload", FieldCodec::Switch(INTERACT_VARIANTS)).depends_on("action"),
];

const DATA_BYTE: &[FieldDef] = &[FieldDef::new("value", FieldCodec::I8)];
const DATA_SHORT: &[FieldDef] = &[FieldDef::new("value", FieldCodec::I16)];
const DATA_INT: &[FieldDef] = &[FieldDef::new("value", FieldCodec::ZigZag)];
const DATA_FLOAT: &[FieldDef] = &[FieldDef::new("value", FieldCodec::F32)];
const DATA_STRING: &[FieldDef] = &[FieldDef::new("value", FieldCodec::VarString)];
const DATA_COMPOUND: &[FieldDef] = &[FieldDef::new("value", FieldCodec::Tag)];
const DATA_BLOCK_POS: &[FieldDef] = &[FieldDef::new("value", FieldCodec::BlockCoordinates)];
const DATA_LONG: &[FieldDef] = &[FieldDef::new("value", FieldCodec::ZigZong)];
const DATA_VEC3: &[FieldDef] = &[FieldDef::new("value", FieldCodec::Vec3f)];

const DATA_ITEM_VARIANTS: &[Variant] = &[
    Variant::new(DataItemType::Byte.raw(), "Byte", DATA_BYTE),
    Variant::new(DataItemType::Short.raw(), "Short", DATA_SHORT),
    Variant::new(DataItemType::Int.raw(), "Int", DATA_INT),
    Variant::new(DataItemType::Float.raw(), "Float", DATA_FLOAT),
    Variant::new(DataItemType::String.raw(), "String", DATA_STRING),
    Variant::new(DataItemType::Compound.raw(), "Compound", DATA_COMPOUND),
    Variant::new(DataItemType::BlockPos.raw(), "BlockPos", DATA_BLOCK_POS),
    Variant::new(DataItemType::Long.raw(), "Long", DATA_LONG),
    Variant::new(DataItemType::Vec3.raw(), "Vec3", DATA_VEC3),
];

const DATA_ITEM: &[FieldDef] = &[
    FieldDef::new("key", FieldCodec::VarInt),
    FieldDef::new(
        "value",
        FieldCodec::Union {
            tag: &FieldCodec::VarInt,
            variants: DATA_ITEM_VARIANTS,
        },
    ),
];

const INT_PROPERTY: &[FieldDef] = &[
    FieldDef::new("index", FieldCodec::VarInt),
    FieldDef::new("value", FieldCodec::ZigZag),
];

const FLOAT_PROPERTY: &[FieldDef] = &[
    FieldDef::new("index", FieldCodec::VarInt),
    FieldDef::new("value", FieldCodec::F32),
];

const PROPERTY_SYNC: &[FieldDef] = &[
    FieldDef::new("ints", FieldCodec::array(&FieldCodec::Struct(INT_PROPERTY))),
    FieldDef::new("floats", FieldCodec::array(&FieldCodec::Struct(FLOAT_PROPERTY))),
];

const SET_ACTOR_DATA_FIELDS: &[FieldDef] = &[
    FieldDef::new("runtime_id", FieldCodec::VarLong),
    FieldDef::new("metadata", FieldCodec::array(&FieldCodec::Struct(DATA_ITEM))),
    FieldDef::new("properties", FieldCodec::Struct(PROPERTY_SYNC)),
    FieldDef::new("tick", FieldCodec::VarLong),
];

const SET_ACTOR_MOTION_FIELDS: &[FieldDef] = &[
    FieldDef::new("runtime_id", FieldCodec::VarLong),
    FieldDef::new("velocity", FieldCodec::Vec3f),
    FieldDef::new("tick", FieldCodec::VarLong),
];

const ANIMATE_FIELDS: &[FieldDef] = &[
    FieldDef::new("action", FieldCodec::ZigZag),
    FieldDef::new("runtime_id", FieldCodec::VarLong),
    FieldDef::new("rowing_time", FieldCodec::gated(ANIMATE_ROW_BIT, &FieldCodec::F32))
        .depends_on("action"),
];

const RESPAWN_FIELDS: &[FieldDef] = &[
    FieldDef::new("position", FieldCodec::Vec3f),
    FieldDef::new("state", FieldCodec::U8),
    FieldDef::new("runtime_id", FieldCodec::VarLong),
];

const SET_PLAYER_GAME_TYPE_FIELDS: &[FieldDef] = &[FieldDef::new("game_type", FieldCodec::ZigZag)];

const BLOCK_FACE: &[FieldDef] = &[
    FieldDef::new("position", FieldCodec::BlockCoordinates),
    FieldDef::new("face", FieldCodec::ZigZag),
];

const BLOCK_ACTION_VARIANTS: &[Variant] = &[
    Variant::new(PlayerActionType::StartBreak.raw(), "StartBreak", BLOCK_FACE),
    Variant::new(PlayerActionType::AbortBreak.raw(), "AbortBreak", BLOCK_FACE),
    Variant::new(PlayerActionType::StopBreak.raw(), "StopBreak", &[]),
    Variant::new(PlayerActionType::CrackBreak.raw(), "CrackBreak", BLOCK_FACE),
    Variant::new(PlayerActionType::PredictBreak.raw(), "PredictBreak", BLOCK_FACE),
    Variant::new(PlayerActionType::ContinueBreak.raw(), "ContinueBreak", BLOCK_FACE),
];

const BLOCK_ACTION: &[FieldDef] = &[
    FieldDef::new("action", FieldCodec::ZigZag),
    FieldDef::new("payload", FieldCodec::Switch(BLOCK_ACTION_VARIANTS)).depends_on("action"),
];

const PREDICTED_VEHICLE: &[FieldDef] = &[
    FieldDef::new("rotation", FieldCodec::Vec2f),
    FieldDef::new("unique_id", FieldCodec::ZigZong),
];

const PLAYER_AUTH_INPUT_FIELDS: &[FieldDef] = &[
    FieldDef::new("pitch", FieldCodec::F32),
    FieldDef::new("yaw", FieldCodec::F32),
    FieldDef::new("position", FieldCodec::Vec3f),
    FieldDef::new("motion", FieldCodec::Vec2f),
    FieldDef::new("head_yaw", FieldCodec::F32),
    FieldDef::new("input_data", FieldCodec::VarLong),
    FieldDef::new("input_mode", FieldCodec::VarInt),
    FieldDef::new("play_mode", FieldCodec::VarInt),
    FieldDef::new("interaction_model", FieldCodec::VarInt),
    FieldDef::new(
        "gaze_direction",
        FieldCodec::when(PlayMode::Reality.raw(), &FieldCodec::Vec3f),
    )
    .depends_on("play_mode"),
    FieldDef::new("tick", FieldCodec::VarLong),
    FieldDef::new("delta", FieldCodec::Vec3f),
    FieldDef::new(
        "item_interaction",
        FieldCodec::gated(
            InputFlag::PerformItemInteraction.mask(),
            &FieldCodec::Struct(ITEM_INTERACTION),
        ),
    )
    .depends_on("input_data"),
    FieldDef::new(
        "item_stack_request",
        FieldCodec::gated(
            InputFlag::PerformItemStackRequest.mask(),
            &FieldCodec::Struct(ITEM_STACK_REQUEST),
        ),
    )
    .depends_on("input_data"),
    FieldDef::new(
        "block_actions",
        FieldCodec::gated(
            InputFlag::PerformBlockActions.mask(),
            &FieldCodec::Array(&FieldCodec::Struct(BLOCK_ACTION)),
        ),
    )
    .depends_on("input_data"),
    FieldDef::new(
        "predicted_vehicle",
        FieldCodec::gated(
            InputFlag::ClientPredictedVehicle.mask(),
            &FieldCodec::Struct(PREDICTED_VEHICLE),
        ),
    )
    .depends_on("input_data"),
    FieldDef::new("analogue_move", FieldCodec::Vec2f),
];

pub static REMOVE_ENTITY: MessageShape =
    MessageShape::new(PacketId::RemoveEntity.raw(), "RemoveEntity", REMOVE_ENTITY_FIELDS);

/// Absolute actor movement with byte-quantized rotation.
pub static MOVE_ACTOR_ABSOLUTE: MessageShape = MessageShape::new(
    PacketId::MoveActorAbsolute.raw(),
    "MoveActorAbsolute",
    MOVE_ACTOR_ABSOLUTE_FIELDS,
);

/// The payload switches on [`InteractAction`].
pub static INTERACT: MessageShape =
    MessageShape::new(PacketId::Interact.raw(), "Interact", INTERACT_FIELDS);

/// Metadata entries carry an inline [`DataItemType`] discriminant. Compound
/// entries hold an inline tag and need a tag grammar.
pub static SET_ACTOR_DATA: MessageShape =
    MessageShape::new(PacketId::SetActorData.raw(), "SetActorData", SET_ACTOR_DATA_FIELDS);

pub static SET_ACTOR_MOTION: MessageShape = MessageShape::new(
    PacketId::SetActorMotion.raw(),
    "SetActorMotion",
    SET_ACTOR_MOTION_FIELDS,
);

/// Rowing actions carry a trailing rowing time.
pub static ANIMATE: MessageShape =
    MessageShape::new(PacketId::Animate.raw(), "Animate", ANIMATE_FIELDS);

pub static RESPAWN: MessageShape =
    MessageShape::new(PacketId::Respawn.raw(), "Respawn", RESPAWN_FIELDS);

pub static SET_PLAYER_GAME_TYPE: MessageShape = MessageShape::new(
    PacketId::SetPlayerGameType.raw(),
    "SetPlayerGameType",
    SET_PLAYER_GAME_TYPE_FIELDS,
);

/// Per-tick client input.
///
/// The item interaction, item stack request, block actions and predicted
/// vehicle are each gated on an [`InputFlag`] bit of `input_data`.
pub static PLAYER_AUTH_INPUT: MessageShape = MessageShape::new(
    PacketId::PlayerAuthInput.raw(),
    "PlayerAuthInput",
    PLAYER_AUTH_INPUT_FIELDS,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_shapes_validate() {
        for shape in [
            &REMOVE_ENTITY,
            &MOVE_ACTOR_ABSOLUTE,
            &INTERACT,
            &SET_ACTOR_DATA,
            &SET_ACTOR_MOTION,
            &ANIMATE,
            &RESPAWN,
            &SET_PLAYER_GAME_TYPE,
            &PLAYER_AUTH_INPUT,
        ] {
            assert_eq!(shape.validate(), Ok(()), "{}", shape.name);
        }
    }

    #[test]
    fn every_data_item_type_has_a_variant() {
        for kind in DataItemType::ALL {
            assert!(
                DATA_ITEM_VARIANTS
                    .iter()
                    .any(|variant| variant.discriminant == kind.raw()),
                "{kind:?}"
            );
        }
    }

    #[test]
    fn auth_input_gates_follow_flags() {
        let index = PLAYER_AUTH_INPUT.field_index("block_actions").unwrap();
        let FieldCodec::Gated { bits, .. } = PLAYER_AUTH_INPUT.fields[index].codec else {
            panic!("block actions are gated");
        };
        assert_eq!(bits, 1 << 35);

        let order: Vec<_> = PLAYER_AUTH_INPUT.fields[11..15]
            .iter()
            .map(|field| field.name)
            .collect();
        assert_eq!(
            order,
            ["delta", "item_interaction", "item_stack_request", "block_actions"]
        );
    }
}
