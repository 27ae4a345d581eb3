//! Concrete Bedrock packet shapes.
//!
//! A cross-section of real packets declared as `static` [`MessageShape`]s,
//! the discriminant enums their variant tables switch on, and a process-wide
//! [`registry()`] over all of them.
//!
//! ```no_run
//! use codec::Codec;
//!
//! let registry = packets::registry()?;
//! let nbt = packets::NetworkNbt::new();
//! let codec = Codec::new(registry).with_tag_grammar(&nbt);
//! let frame = codec.encode(&packets::builders::set_time(6000))?;
//! assert_eq!(codec.decode(&frame)?.name(), "SetTime");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! [`MessageShape`]: schema::MessageShape

pub mod actor;
pub mod builders;
mod ids;
pub mod interface;
pub mod inventory;
pub mod item;
mod kinds;
mod nbt;
mod registry;
pub mod session;
pub mod world;

pub use ids::PacketId;
pub use kinds::{
    AnimateAction, BossEventType, DataItemType, InputFlag, InteractAction, InventorySourceType,
    ItemStackActionType, PlayMode, PlayStatus, PlayerActionType, ResourcePackResponse,
    ScoreAction, ScoreIdentityType, TextType, ANIMATE_ROW_BIT,
};
pub use nbt::{NetworkNbt, MAX_NBT_DEPTH};
pub use registry::{all_shapes, build_registry, registry};
