//! Item stacks and the item payloads carried by inventory and input packets.
//!
//! These are field lists, not packets. They are nested with
//! [`FieldCodec::Struct`] wherever an item or request appears.
//!
//! An item stack whose `network_id` is zero is air and carries nothing else.
//! Otherwise the stack body follows, ending in a length-framed user data
//! block. The shield's user data has a trailing `ticking` value, selected by
//! the enclosing stack's `network_id`.

use schema::{CountPrefix, FieldCodec, FieldDef, Variant};

use crate::kinds::{InventorySourceType, ItemStackActionType};

/// Network id of the shield, the only item whose user data carries `ticking`.
pub const SHIELD_NETWORK_ID: i64 = 362;

/// User data marker announcing a versioned tag tree.
pub const USER_DATA_TAG_MARKER: i64 = 0xFFFF;

const USER_DATA_TAG_V1: &[FieldDef] = &[FieldDef::new("nbt", FieldCodec::FixedTag)];

const USER_DATA_TAG_VERSIONS: &[Variant] = &[Variant::new(1, "V1", USER_DATA_TAG_V1)];

/// Tag tree, block lists and shield ticking of a non-empty item.
pub const ITEM_USER_DATA: &[FieldDef] = &[
    FieldDef::new("marker", FieldCodec::U16),
    FieldDef::new(
        "tag",
        FieldCodec::when(
            USER_DATA_TAG_MARKER,
            &FieldCodec::Union {
                tag: &FieldCodec::U8,
                variants: USER_DATA_TAG_VERSIONS,
            },
        ),
    )
    .depends_on("marker"),
    FieldDef::new(
        "can_place_on",
        FieldCodec::counted_array(CountPrefix::U32, &FieldCodec::String32),
    ),
    FieldDef::new(
        "can_destroy",
        FieldCodec::counted_array(CountPrefix::U32, &FieldCodec::String32),
    ),
    FieldDef::new("ticking", FieldCodec::when(SHIELD_NETWORK_ID, &FieldCodec::I64))
        .depends_on("network_id"),
];

const ITEM_STACK_BODY: &[FieldDef] = &[
    FieldDef::new("count", FieldCodec::U16),
    FieldDef::new("metadata", FieldCodec::VarInt),
    FieldDef::new("stack_network_id", FieldCodec::optional(&FieldCodec::ZigZag)),
    FieldDef::new("block_runtime_id", FieldCodec::ZigZag),
    FieldDef::new("user_data", FieldCodec::framed(&FieldCodec::Struct(ITEM_USER_DATA))),
];

/// A network item stack descriptor.
pub const ITEM_STACK: &[FieldDef] = &[
    FieldDef::new("network_id", FieldCodec::ZigZag),
    FieldDef::new("stack", FieldCodec::unless(0, &FieldCodec::Struct(ITEM_STACK_BODY)))
        .depends_on("network_id"),
];

/// Container kind plus the id of a dynamic container such as a bundle.
pub const FULL_CONTAINER_NAME: &[FieldDef] = &[
    FieldDef::new("container_name", FieldCodec::U8),
    FieldDef::new("dynamic_id", FieldCodec::U32),
];

const LEGACY_SLOT: &[FieldDef] = &[
    FieldDef::new("container_id", FieldCodec::U8),
    FieldDef::new("slots", FieldCodec::array(&FieldCodec::U8)),
];

const SOURCE_CONTAINER: &[FieldDef] = &[FieldDef::new("container_id", FieldCodec::VarInt)];

const SOURCE_WORLD: &[FieldDef] = &[FieldDef::new("flags", FieldCodec::VarInt)];

const SOURCE_VARIANTS: &[Variant] = &[
    Variant::new(InventorySourceType::Container.raw(), "Container", SOURCE_CONTAINER),
    Variant::new(InventorySourceType::Global.raw(), "Global", &[]),
    Variant::new(
        InventorySourceType::WorldInteraction.raw(),
        "WorldInteraction",
        SOURCE_WORLD,
    ),
    Variant::new(InventorySourceType::Creative.raw(), "Creative", &[]),
];

const INVENTORY_ACTION: &[FieldDef] = &[
    FieldDef::new(
        "source",
        FieldCodec::Union {
            tag: &FieldCodec::VarInt,
            variants: SOURCE_VARIANTS,
        },
    ),
    FieldDef::new("slot", FieldCodec::VarInt),
    FieldDef::new("old_item", FieldCodec::Struct(ITEM_STACK)),
    FieldDef::new("new_item", FieldCodec::Struct(ITEM_STACK)),
];

/// Use-item transaction sent with a player auth input.
///
/// A non-zero legacy request id is followed by the legacy slot changes.
pub const ITEM_INTERACTION: &[FieldDef] = &[
    FieldDef::new("legacy_request_id", FieldCodec::ZigZag),
    FieldDef::new(
        "legacy_slots",
        FieldCodec::unless(0, &FieldCodec::Array(&FieldCodec::Struct(LEGACY_SLOT))),
    )
    .depends_on("legacy_request_id"),
    FieldDef::new("actions", FieldCodec::array(&FieldCodec::Struct(INVENTORY_ACTION))),
    FieldDef::new("action_type", FieldCodec::VarInt),
    FieldDef::new("trigger_type", FieldCodec::VarInt),
    FieldDef::new("block_position", FieldCodec::BlockCoordinates),
    FieldDef::new("face", FieldCodec::ZigZag),
    FieldDef::new("hotbar_slot", FieldCodec::ZigZag),
    FieldDef::new("held_item", FieldCodec::Struct(ITEM_STACK)),
    FieldDef::new("player_position", FieldCodec::Vec3f),
    FieldDef::new("click_position", FieldCodec::Vec3f),
    FieldDef::new("block_runtime_id", FieldCodec::ZigZag),
    FieldDef::new("client_prediction", FieldCodec::Bool),
];

const SLOT_INFO: &[FieldDef] = &[
    FieldDef::new("container", FieldCodec::Struct(FULL_CONTAINER_NAME)),
    FieldDef::new("slot", FieldCodec::U8),
    FieldDef::new("stack_network_id", FieldCodec::ZigZag),
];

const TAKE_PLACE: &[FieldDef] = &[
    FieldDef::new("count", FieldCodec::U8),
    FieldDef::new("source", FieldCodec::Struct(SLOT_INFO)),
    FieldDef::new("destination", FieldCodec::Struct(SLOT_INFO)),
];

const SWAP: &[FieldDef] = &[
    FieldDef::new("source", FieldCodec::Struct(SLOT_INFO)),
    FieldDef::new("destination", FieldCodec::Struct(SLOT_INFO)),
];

const DROP: &[FieldDef] = &[
    FieldDef::new("count", FieldCodec::U8),
    FieldDef::new("source", FieldCodec::Struct(SLOT_INFO)),
    FieldDef::new("randomly", FieldCodec::Bool),
];

const DESTROY_CONSUME: &[FieldDef] = &[
    FieldDef::new("count", FieldCodec::U8),
    FieldDef::new("source", FieldCodec::Struct(SLOT_INFO)),
];

const CREATE: &[FieldDef] = &[FieldDef::new("results_slot", FieldCodec::U8)];

const BEACON_PAYMENT: &[FieldDef] = &[
    FieldDef::new("primary_effect", FieldCodec::ZigZag),
    FieldDef::new("secondary_effect", FieldCodec::ZigZag),
];

const MINE_BLOCK: &[FieldDef] = &[
    FieldDef::new("hotbar_slot", FieldCodec::ZigZag),
    FieldDef::new("predicted_durability", FieldCodec::ZigZag),
    FieldDef::new("stack_network_id", FieldCodec::ZigZag),
];

const CRAFT_RECIPE: &[FieldDef] = &[
    FieldDef::new("recipe_network_id", FieldCodec::VarInt),
    FieldDef::new("times_crafted", FieldCodec::U8),
];

const CRAFT_CREATIVE: &[FieldDef] = &[
    FieldDef::new("creative_item_network_id", FieldCodec::VarInt),
    FieldDef::new("times_crafted", FieldCodec::U8),
];

const STACK_ACTION_VARIANTS: &[Variant] = &[
    Variant::new(ItemStackActionType::Take.raw(), "Take", TAKE_PLACE),
    Variant::new(ItemStackActionType::Place.raw(), "Place", TAKE_PLACE),
    Variant::new(ItemStackActionType::Swap.raw(), "Swap", SWAP),
    Variant::new(ItemStackActionType::Drop.raw(), "Drop", DROP),
    Variant::new(ItemStackActionType::Destroy.raw(), "Destroy", DESTROY_CONSUME),
    Variant::new(ItemStackActionType::Consume.raw(), "Consume", DESTROY_CONSUME),
    Variant::new(ItemStackActionType::Create.raw(), "Create", CREATE),
    Variant::new(
        ItemStackActionType::PlaceInItemContainer.raw(),
        "PlaceInItemContainer",
        TAKE_PLACE,
    ),
    Variant::new(
        ItemStackActionType::TakeFromItemContainer.raw(),
        "TakeFromItemContainer",
        TAKE_PLACE,
    ),
    Variant::new(ItemStackActionType::LabTableCombine.raw(), "LabTableCombine", &[]),
    Variant::new(ItemStackActionType::BeaconPayment.raw(), "BeaconPayment", BEACON_PAYMENT),
    Variant::new(ItemStackActionType::MineBlock.raw(), "MineBlock", MINE_BLOCK),
    Variant::new(ItemStackActionType::CraftRecipe.raw(), "CraftRecipe", CRAFT_RECIPE),
    Variant::new(ItemStackActionType::CraftCreative.raw(), "CraftCreative", CRAFT_CREATIVE),
];

/// One item stack request. Action types without a variant here fail to
/// decode with an unknown discriminant.
pub const ITEM_STACK_REQUEST: &[FieldDef] = &[
    FieldDef::new("client_request_id", FieldCodec::ZigZag),
    FieldDef::new(
        "actions",
        FieldCodec::array(&FieldCodec::Union {
            tag: &FieldCodec::U8,
            variants: STACK_ACTION_VARIANTS,
        }),
    ),
    FieldDef::new("filter_strings", FieldCodec::array(&FieldCodec::VarString)),
    FieldDef::new("filter_origin", FieldCodec::I32),
];
