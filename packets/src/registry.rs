//! The default registry over every shape in this crate.

use std::sync::OnceLock;

use codec::{Registry, RegistryError};
use schema::MessageShape;

use crate::{actor, interface, inventory, session, world};

static REGISTRY: OnceLock<Result<Registry, RegistryError>> = OnceLock::new();

/// Every shape in this crate, in identifier order.
#[must_use]
pub fn all_shapes() -> [&'static MessageShape; 43] {
    [
        &session::LOGIN,
        &session::PLAY_STATUS,
        &session::DISCONNECT,
        &session::RESOURCE_PACK_CLIENT_RESPONSE,
        &interface::TEXT,
        &world::SET_TIME,
        &actor::REMOVE_ENTITY,
        &actor::MOVE_ACTOR_ABSOLUTE,
        &world::UPDATE_BLOCK,
        &world::LEVEL_EVENT,
        &inventory::MOB_EQUIPMENT,
        &actor::INTERACT,
        &actor::SET_ACTOR_DATA,
        &actor::SET_ACTOR_MOTION,
        &actor::ANIMATE,
        &actor::RESPAWN,
        &interface::CONTAINER_OPEN,
        &interface::CONTAINER_CLOSE,
        &interface::PLAYER_HOTBAR,
        &inventory::INVENTORY_CONTENT,
        &inventory::INVENTORY_SLOT,
        &world::BLOCK_ACTOR_DATA,
        &world::SET_COMMANDS_ENABLED,
        &world::CHANGE_DIMENSION,
        &actor::SET_PLAYER_GAME_TYPE,
        &world::REQUEST_CHUNK_RADIUS,
        &world::CHUNK_RADIUS_UPDATE,
        &interface::BOSS_EVENT,
        &session::TRANSFER,
        &interface::SET_TITLE,
        &interface::MODAL_FORM_REQUEST,
        &interface::MODAL_FORM_RESPONSE,
        &interface::SET_SCORE,
        &session::SET_LOCAL_PLAYER_AS_INITIALIZED,
        &session::NETWORK_STACK_LATENCY,
        &world::NETWORK_CHUNK_PUBLISHER_UPDATE,
        &session::NETWORK_SETTINGS,
        &actor::PLAYER_AUTH_INPUT,
        &session::PACKET_VIOLATION_WARNING,
        &interface::SCRIPT_MESSAGE,
        &interface::TOAST_REQUEST,
        &session::REQUEST_NETWORK_SETTINGS,
        &interface::SERVER_SCRIPT_DEBUG_DRAWER,
    ]
}

/// Builds a fresh registry over [`all_shapes`].
pub fn build_registry() -> Result<Registry, RegistryError> {
    Registry::builder().extend(all_shapes()).build()
}

/// The process-wide registry, built on first use.
///
/// Shapes are static, so a build failure is permanent and every call
/// returns the same error.
pub fn registry() -> Result<&'static Registry, RegistryError> {
    REGISTRY.get_or_init(build_registry).as_ref().map_err(Clone::clone)
}
