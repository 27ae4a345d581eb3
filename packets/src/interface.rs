//! Chat, forms, scoreboards and other player-facing interface packets.

use schema::{FieldCodec, FieldDef, MessageShape, Variant};

use crate::ids::PacketId;
use crate::kinds::{BossEventType, ScoreAction, ScoreIdentityType, TextType};

const TEXT_MESSAGE: &[FieldDef] = &[FieldDef::new("message", FieldCodec::VarString)];

const TEXT_SOURCED: &[FieldDef] = &[
    FieldDef::new("source", FieldCodec::VarString),
    FieldDef::new("message", FieldCodec::VarString),
];

const TEXT_TRANSLATED: &[FieldDef] = &[
    FieldDef::new("message", FieldCodec::VarString),
    FieldDef::new("parameters", FieldCodec::array(&FieldCodec::VarString)),
];

const TEXT_VARIANTS: &[Variant] = &[
    Variant::new(TextType::Raw.raw(), "Raw", TEXT_MESSAGE),
    Variant::new(TextType::Chat.raw(), "Chat", TEXT_SOURCED),
    Variant::new(TextType::Translation.raw(), "Translation", TEXT_TRANSLATED),
    Variant::new(TextType::Popup.raw(), "Popup", TEXT_TRANSLATED),
    Variant::new(TextType::JukeboxPopup.raw(), "JukeboxPopup", TEXT_TRANSLATED),
    Variant::new(TextType::Tip.raw(), "Tip", TEXT_MESSAGE),
    Variant::new(TextType::System.raw(), "System", TEXT_MESSAGE),
    Variant::new(TextType::Whisper.raw(), "Whisper", TEXT_SOURCED),
    Variant::new(TextType::Announcement.raw(), "Announcement", TEXT_SOURCED),
    Variant::new(TextType::JsonWhisper.raw(), "JsonWhisper", TEXT_MESSAGE),
    Variant::new(TextType::Json.raw(), "Json", TEXT_MESSAGE),
    Variant::new(TextType::JsonAnnouncement.raw(), "JsonAnnouncement", TEXT_MESSAGE),
];

const TEXT_FIELDS: &[FieldDef] = &[
    FieldDef::new("text_type", FieldCodec::U8),
    FieldDef::new("needs_translation", FieldCodec::Bool),
    FieldDef::new("payload", FieldCodec::Switch(TEXT_VARIANTS)).depends_on("text_type"),
    FieldDef::new("xuid", FieldCodec::VarString),
    FieldDef::new("platform_chat_id", FieldCodec::VarString),
];

const CONTAINER_OPEN_FIELDS: &[FieldDef] = &[
    FieldDef::new("window_id", FieldCodec::I8),
    FieldDef::new("container_type", FieldCodec::U8),
    FieldDef::new("position", FieldCodec::BlockPosition),
    FieldDef::new("unique_id", FieldCodec::ZigZong),
];

const CONTAINER_CLOSE_FIELDS: &[FieldDef] = &[
    FieldDef::new("window_id", FieldCodec::I8),
    FieldDef::new("container_type", FieldCodec::U8),
    FieldDef::new("server_initiated", FieldCodec::Bool),
];

const PLAYER_HOTBAR_FIELDS: &[FieldDef] = &[
    FieldDef::new("selected_slot", FieldCodec::VarInt),
    FieldDef::new("window_id", FieldCodec::I8),
    FieldDef::new("select_slot", FieldCodec::Bool),
];

const BOSS_PLAYER: &[FieldDef] = &[FieldDef::new("player_unique_id", FieldCodec::ZigZong)];
const BOSS_TITLE: &[FieldDef] = &[FieldDef::new("title", FieldCodec::VarString)];
const BOSS_HEALTH: &[FieldDef] = &[FieldDef::new("health_percent", FieldCodec::F32)];
const BOSS_STYLE: &[FieldDef] = &[
    FieldDef::new("color", FieldCodec::VarInt),
    FieldDef::new("overlay", FieldCodec::VarInt),
];
const BOSS_PROPERTIES: &[FieldDef] = &[
    FieldDef::new("darken_screen", FieldCodec::I16),
    FieldDef::new("color", FieldCodec::VarInt),
    FieldDef::new("overlay", FieldCodec::VarInt),
];
const BOSS_SHOW: &[FieldDef] = &[
    FieldDef::new("title", FieldCodec::VarString),
    FieldDef::new("health_percent", FieldCodec::F32),
    FieldDef::new("darken_screen", FieldCodec::I16),
    FieldDef::new("color", FieldCodec::VarInt),
    FieldDef::new("overlay", FieldCodec::VarInt),
];

const BOSS_VARIANTS: &[Variant] = &[
    Variant::new(BossEventType::Show.raw(), "Show", BOSS_SHOW),
    Variant::new(BossEventType::RegisterPlayer.raw(), "RegisterPlayer", BOSS_PLAYER),
    Variant::new(BossEventType::Hide.raw(), "Hide", &[]),
    Variant::new(BossEventType::UnregisterPlayer.raw(), "UnregisterPlayer", BOSS_PLAYER),
    Variant::new(BossEventType::UpdatePercent.raw(), "UpdatePercent", BOSS_HEALTH),
    Variant::new(BossEventType::UpdateName.raw(), "UpdateName", BOSS_TITLE),
    Variant::new(BossEventType::UpdateProperties.raw(), "UpdateProperties", BOSS_PROPERTIES),
    Variant::new(BossEventType::UpdateStyle.raw(), "UpdateStyle", BOSS_STYLE),
    Variant::new(BossEventType::Query.raw(), "Query", BOSS_PLAYER),
];

const BOSS_EVENT_FIELDS: &[FieldDef] = &[
    FieldDef::new("boss_unique_id", FieldCodec::ZigZong),
    FieldDef::new("event_type", FieldCodec::VarInt),
    FieldDef::new("payload", FieldCodec::Switch(BOSS_VARIANTS)).depends_on("event_type"),
];

const SET_TITLE_FIELDS: &[FieldDef] = &[
    FieldDef::new("action", FieldCodec::ZigZag),
    FieldDef::new("text", FieldCodec::VarString),
    FieldDef::new("fade_in", FieldCodec::ZigZag),
    FieldDef::new("stay", FieldCodec::ZigZag),
    FieldDef::new("fade_out", FieldCodec::ZigZag),
    FieldDef::new("xuid", FieldCodec::VarString),
    FieldDef::new("platform_online_id", FieldCodec::VarString),
    FieldDef::new("filtered_text", FieldCodec::VarString),
];

const MODAL_FORM_REQUEST_FIELDS: &[FieldDef] = &[
    FieldDef::new("form_id", FieldCodec::VarInt),
    FieldDef::new("form_data", FieldCodec::VarString),
];

const MODAL_FORM_RESPONSE_FIELDS: &[FieldDef] = &[
    FieldDef::new("form_id", FieldCodec::VarInt),
    FieldDef::new("response", FieldCodec::optional(&FieldCodec::VarString)),
    FieldDef::new("cancel_reason", FieldCodec::optional(&FieldCodec::U8)),
];

const SCORE_PLAYER: &[FieldDef] = &[FieldDef::new("unique_id", FieldCodec::ZigZong)];
const SCORE_FAKE_PLAYER: &[FieldDef] = &[FieldDef::new("display_name", FieldCodec::VarString)];

const SCORE_IDENTITY_VARIANTS: &[Variant] = &[
    Variant::new(ScoreIdentityType::Player.raw(), "Player", SCORE_PLAYER),
    Variant::new(ScoreIdentityType::Entity.raw(), "Entity", SCORE_PLAYER),
    Variant::new(ScoreIdentityType::FakePlayer.raw(), "FakePlayer", SCORE_FAKE_PLAYER),
];

const SCORE_IDENTITY: &[FieldDef] = &[
    FieldDef::new("identity_type", FieldCodec::U8),
    FieldDef::new("identity", FieldCodec::Switch(SCORE_IDENTITY_VARIANTS))
        .depends_on("identity_type"),
];

const SCORE_ENTRY: &[FieldDef] = &[
    FieldDef::new("entry_id", FieldCodec::ZigZong),
    FieldDef::new("objective", FieldCodec::VarString),
    FieldDef::new("score", FieldCodec::I32),
    FieldDef::new(
        "identity",
        FieldCodec::when(ScoreAction::Change.raw(), &FieldCodec::Struct(SCORE_IDENTITY)),
    )
    .depends_on("action"),
];

const SET_SCORE_FIELDS: &[FieldDef] = &[
    FieldDef::new("action", FieldCodec::U8),
    FieldDef::new("entries", FieldCodec::array(&FieldCodec::Struct(SCORE_ENTRY))),
];

const SCRIPT_MESSAGE_FIELDS: &[FieldDef] = &[
    FieldDef::new("identifier", FieldCodec::VarString),
    FieldDef::new("data", FieldCodec::VarString),
];

const TOAST_REQUEST_FIELDS: &[FieldDef] = &[
    FieldDef::new("title", FieldCodec::VarString),
    FieldDef::new("message", FieldCodec::VarString),
];

const DEBUG_SHAPE: &[FieldDef] = &[
    FieldDef::new("runtime_id", FieldCodec::VarLong),
    FieldDef::new("shape_type", FieldCodec::optional(&FieldCodec::U8)),
    FieldDef::new("location", FieldCodec::optional(&FieldCodec::Vec3f)),
    FieldDef::new("scale", FieldCodec::optional(&FieldCodec::F32)),
    FieldDef::new("rotation", FieldCodec::optional(&FieldCodec::Vec3f)),
    FieldDef::new("time_left", FieldCodec::optional(&FieldCodec::F32)),
    FieldDef::new("color", FieldCodec::optional(&FieldCodec::Color)),
    FieldDef::new("text", FieldCodec::optional(&FieldCodec::VarString)),
    FieldDef::new("box_bound", FieldCodec::optional(&FieldCodec::Vec3f)),
    FieldDef::new("line_end", FieldCodec::optional(&FieldCodec::Vec3f)),
    FieldDef::new("arrow_head_length", FieldCodec::optional(&FieldCodec::F32)),
    FieldDef::new("arrow_head_radius", FieldCodec::optional(&FieldCodec::F32)),
    FieldDef::new("segments", FieldCodec::optional(&FieldCodec::U8)),
];

const SCRIPT_DEBUG_DRAWER_FIELDS: &[FieldDef] = &[FieldDef::new(
    "shapes",
    FieldCodec::array(&FieldCodec::Struct(DEBUG_SHAPE)),
)];

/// Chat and system text. The payload switches on [`TextType`].
pub static TEXT: MessageShape = MessageShape::new(PacketId::Text.raw(), "Text", TEXT_FIELDS);

pub static CONTAINER_OPEN: MessageShape = MessageShape::new(
    PacketId::ContainerOpen.raw(),
    "ContainerOpen",
    CONTAINER_OPEN_FIELDS,
);

pub static CONTAINER_CLOSE: MessageShape = MessageShape::new(
    PacketId::ContainerClose.raw(),
    "ContainerClose",
    CONTAINER_CLOSE_FIELDS,
);

pub static PLAYER_HOTBAR: MessageShape =
    MessageShape::new(PacketId::PlayerHotbar.raw(), "PlayerHotbar", PLAYER_HOTBAR_FIELDS);

/// Boss bar updates; the payload switches on [`BossEventType`].
pub static BOSS_EVENT: MessageShape =
    MessageShape::new(PacketId::BossEvent.raw(), "BossEvent", BOSS_EVENT_FIELDS);

pub static SET_TITLE: MessageShape =
    MessageShape::new(PacketId::SetTitle.raw(), "SetTitle", SET_TITLE_FIELDS);

pub static MODAL_FORM_REQUEST: MessageShape = MessageShape::new(
    PacketId::ModalFormRequest.raw(),
    "ModalFormRequest",
    MODAL_FORM_REQUEST_FIELDS,
);

/// A response or a cancel reason, each behind a presence flag.
pub static MODAL_FORM_RESPONSE: MessageShape = MessageShape::new(
    PacketId::ModalFormResponse.raw(),
    "ModalFormResponse",
    MODAL_FORM_RESPONSE_FIELDS,
);

/// Scoreboard changes.
///
/// Each entry carries an identity only when the packet-level action is
/// [`ScoreAction::Change`]; entries look the action up through the
/// enclosing scope.
pub static SET_SCORE: MessageShape =
    MessageShape::new(PacketId::SetScore.raw(), "SetScore", SET_SCORE_FIELDS);

pub static SCRIPT_MESSAGE: MessageShape = MessageShape::new(
    PacketId::ScriptMessage.raw(),
    "ScriptMessage",
    SCRIPT_MESSAGE_FIELDS,
);

pub static TOAST_REQUEST: MessageShape =
    MessageShape::new(PacketId::ToastRequest.raw(), "ToastRequest", TOAST_REQUEST_FIELDS);

/// Debug shapes drawn by server scripts. Every property after the runtime id
/// is optional so updates can send only what changed.
pub static SERVER_SCRIPT_DEBUG_DRAWER: MessageShape = MessageShape::new(
    PacketId::ServerScriptDebugDrawer.raw(),
    "ServerScriptDebugDrawer",
    SCRIPT_DEBUG_DRAWER_FIELDS,
);
