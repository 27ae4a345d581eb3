//! Connection lifecycle packets: login, settings negotiation, disconnects.

use schema::{CountPrefix, FieldCodec, FieldDef, MessageShape};

use crate::ids::PacketId;

const LOGIN_FIELDS: &[FieldDef] = &[
    FieldDef::new("protocol_version", FieldCodec::I32).big_endian(),
    FieldDef::new("connection_request", FieldCodec::VarBytes),
];

const PLAY_STATUS_FIELDS: &[FieldDef] = &[FieldDef::new("status", FieldCodec::I32).big_endian()];

const DISCONNECT_FIELDS: &[FieldDef] = &[
    FieldDef::new("reason", FieldCodec::ZigZag),
    FieldDef::new("hide_screen", FieldCodec::Bool),
    FieldDef::new("message", FieldCodec::when(0, &FieldCodec::VarString)).depends_on("hide_screen"),
    FieldDef::new("filtered_message", FieldCodec::when(0, &FieldCodec::VarString))
        .depends_on("hide_screen"),
];

const RESOURCE_PACK_RESPONSE_FIELDS: &[FieldDef] = &[
    FieldDef::new("response", FieldCodec::U8),
    FieldDef::new(
        "packs",
        FieldCodec::counted_array(CountPrefix::U16, &FieldCodec::VarString),
    ),
];

const TRANSFER_FIELDS: &[FieldDef] = &[
    FieldDef::new("address", FieldCodec::VarString),
    FieldDef::new("port", FieldCodec::U16),
    FieldDef::new("reload_world", FieldCodec::Bool),
];

const NETWORK_SETTINGS_FIELDS: &[FieldDef] = &[
    FieldDef::new("compression_threshold", FieldCodec::U16),
    FieldDef::new("compression_method", FieldCodec::U16),
    FieldDef::new("client_throttle", FieldCodec::Bool),
    FieldDef::new("client_throttle_threshold", FieldCodec::U8),
    FieldDef::new("client_throttle_scalar", FieldCodec::F32),
];

const REQUEST_NETWORK_SETTINGS_FIELDS: &[FieldDef] =
    &[FieldDef::new("protocol_version", FieldCodec::I32).big_endian()];

const NETWORK_STACK_LATENCY_FIELDS: &[FieldDef] = &[
    FieldDef::new("timestamp", FieldCodec::I64),
    FieldDef::new("needs_response", FieldCodec::Bool),
];

const SET_LOCAL_PLAYER_AS_INITIALIZED_FIELDS: &[FieldDef] =
    &[FieldDef::new("runtime_id", FieldCodec::VarLong)];

const PACKET_VIOLATION_WARNING_FIELDS: &[FieldDef] = &[
    FieldDef::new("kind", FieldCodec::ZigZag),
    FieldDef::new("severity", FieldCodec::ZigZag),
    FieldDef::new("packet_id", FieldCodec::ZigZag),
    FieldDef::new("context", FieldCodec::VarString),
];

/// Client login. The connection request is an opaque certificate chain.
pub static LOGIN: MessageShape = MessageShape::new(PacketId::Login.raw(), "Login", LOGIN_FIELDS);

/// Status values are [`crate::PlayStatus`].
pub static PLAY_STATUS: MessageShape =
    MessageShape::new(PacketId::PlayStatus.raw(), "PlayStatus", PLAY_STATUS_FIELDS);

/// Messages are present only when the disconnect screen is shown.
pub static DISCONNECT: MessageShape =
    MessageShape::new(PacketId::Disconnect.raw(), "Disconnect", DISCONNECT_FIELDS);

/// Pack identifiers use a legacy 16-bit count.
pub static RESOURCE_PACK_CLIENT_RESPONSE: MessageShape = MessageShape::new(
    PacketId::ResourcePackClientResponse.raw(),
    "ResourcePackClientResponse",
    RESOURCE_PACK_RESPONSE_FIELDS,
);

pub static TRANSFER: MessageShape =
    MessageShape::new(PacketId::Transfer.raw(), "Transfer", TRANSFER_FIELDS);

/// Compression parameters sent before the client turns compression on.
pub static NETWORK_SETTINGS: MessageShape = MessageShape::new(
    PacketId::NetworkSettings.raw(),
    "NetworkSettings",
    NETWORK_SETTINGS_FIELDS,
);

pub static REQUEST_NETWORK_SETTINGS: MessageShape = MessageShape::new(
    PacketId::RequestNetworkSettings.raw(),
    "RequestNetworkSettings",
    REQUEST_NETWORK_SETTINGS_FIELDS,
);

pub static NETWORK_STACK_LATENCY: MessageShape = MessageShape::new(
    PacketId::NetworkStackLatency.raw(),
    "NetworkStackLatency",
    NETWORK_STACK_LATENCY_FIELDS,
);

pub static SET_LOCAL_PLAYER_AS_INITIALIZED: MessageShape = MessageShape::new(
    PacketId::SetLocalPlayerAsInitialized.raw(),
    "SetLocalPlayerAsInitialized",
    SET_LOCAL_PLAYER_AS_INITIALIZED_FIELDS,
);

pub static PACKET_VIOLATION_WARNING: MessageShape = MessageShape::new(
    PacketId::PacketViolationWarning.raw(),
    "PacketViolationWarning",
    PACKET_VIOLATION_WARNING_FIELDS,
);
