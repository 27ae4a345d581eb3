//! Inventory packets built on the item stack descriptor.

use schema::{FieldCodec, FieldDef, MessageShape};

use crate::ids::PacketId;
use crate::item::{FULL_CONTAINER_NAME, ITEM_STACK};

const MOB_EQUIPMENT_FIELDS: &[FieldDef] = &[
    FieldDef::new("runtime_id", FieldCodec::VarLong),
    FieldDef::new("item", FieldCodec::Struct(ITEM_STACK)),
    FieldDef::new("slot", FieldCodec::U8),
    FieldDef::new("selected_slot", FieldCodec::U8),
    FieldDef::new("container_id", FieldCodec::U8),
];

const INVENTORY_CONTENT_FIELDS: &[FieldDef] = &[
    FieldDef::new("container_id", FieldCodec::VarInt),
    FieldDef::new("items", FieldCodec::array(&FieldCodec::Struct(ITEM_STACK))),
    FieldDef::new("container_name", FieldCodec::Struct(FULL_CONTAINER_NAME)),
    FieldDef::new("dynamic_container_size", FieldCodec::VarInt),
];

const INVENTORY_SLOT_FIELDS: &[FieldDef] = &[
    FieldDef::new("container_id", FieldCodec::VarInt),
    FieldDef::new("slot", FieldCodec::VarInt),
    FieldDef::new("container_name", FieldCodec::Struct(FULL_CONTAINER_NAME)),
    FieldDef::new("dynamic_container_size", FieldCodec::VarInt),
    FieldDef::new("item", FieldCodec::Struct(ITEM_STACK)),
];

/// The item held in a hotbar or armor slot of an actor.
pub static MOB_EQUIPMENT: MessageShape =
    MessageShape::new(PacketId::MobEquipment.raw(), "MobEquipment", MOB_EQUIPMENT_FIELDS);

/// Every slot of one container.
pub static INVENTORY_CONTENT: MessageShape = MessageShape::new(
    PacketId::InventoryContent.raw(),
    "InventoryContent",
    INVENTORY_CONTENT_FIELDS,
);

pub static INVENTORY_SLOT: MessageShape =
    MessageShape::new(PacketId::InventorySlot.raw(), "InventorySlot", INVENTORY_SLOT_FIELDS);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inventory_shapes_validate() {
        for shape in [&MOB_EQUIPMENT, &INVENTORY_CONTENT, &INVENTORY_SLOT] {
            assert_eq!(shape.validate(), Ok(()), "{}", shape.name);
        }
    }

    #[test]
    fn item_is_the_last_slot_field() {
        assert_eq!(INVENTORY_SLOT.field_index("item"), Some(4));
    }
}
