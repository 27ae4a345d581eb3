//! Packet identifiers for every shape in this crate.

/// Identifier of a packet modeled here.
///
/// Discriminants are the varint values written at the head of each frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum PacketId {
    Login = 1,
    PlayStatus = 2,
    Disconnect = 5,
    ResourcePackClientResponse = 8,
    Text = 9,
    SetTime = 10,
    RemoveEntity = 14,
    MoveActorAbsolute = 18,
    UpdateBlock = 21,
    LevelEvent = 25,
    MobEquipment = 31,
    Interact = 33,
    SetActorData = 39,
    SetActorMotion = 40,
    Animate = 44,
    Respawn = 45,
    ContainerOpen = 46,
    ContainerClose = 47,
    PlayerHotbar = 48,
    InventoryContent = 49,
    InventorySlot = 50,
    BlockActorData = 56,
    SetCommandsEnabled = 59,
    ChangeDimension = 61,
    SetPlayerGameType = 62,
    RequestChunkRadius = 69,
    ChunkRadiusUpdate = 70,
    BossEvent = 74,
    Transfer = 85,
    SetTitle = 88,
    ModalFormRequest = 100,
    ModalFormResponse = 101,
    SetScore = 108,
    SetLocalPlayerAsInitialized = 113,
    NetworkStackLatency = 115,
    NetworkChunkPublisherUpdate = 121,
    NetworkSettings = 143,
    PlayerAuthInput = 144,
    PacketViolationWarning = 156,
    ScriptMessage = 177,
    ToastRequest = 186,
    RequestNetworkSettings = 193,
    ServerScriptDebugDrawer = 328,
}

impl PacketId {
    pub const ALL: [Self; 43] = [
        Self::Login,
        Self::PlayStatus,
        Self::Disconnect,
        Self::ResourcePackClientResponse,
        Self::Text,
        Self::SetTime,
        Self::RemoveEntity,
        Self::MoveActorAbsolute,
        Self::UpdateBlock,
        Self::LevelEvent,
        Self::MobEquipment,
        Self::Interact,
        Self::SetActorData,
        Self::SetActorMotion,
        Self::Animate,
        Self::Respawn,
        Self::ContainerOpen,
        Self::ContainerClose,
        Self::PlayerHotbar,
        Self::InventoryContent,
        Self::InventorySlot,
        Self::BlockActorData,
        Self::SetCommandsEnabled,
        Self::ChangeDimension,
        Self::SetPlayerGameType,
        Self::RequestChunkRadius,
        Self::ChunkRadiusUpdate,
        Self::BossEvent,
        Self::Transfer,
        Self::SetTitle,
        Self::ModalFormRequest,
        Self::ModalFormResponse,
        Self::SetScore,
        Self::SetLocalPlayerAsInitialized,
        Self::NetworkStackLatency,
        Self::NetworkChunkPublisherUpdate,
        Self::NetworkSettings,
        Self::PlayerAuthInput,
        Self::PacketViolationWarning,
        Self::ScriptMessage,
        Self::ToastRequest,
        Self::RequestNetworkSettings,
        Self::ServerScriptDebugDrawer,
    ];

    #[must_use]
    pub const fn raw(self) -> u32 {
        self as u32
    }

    /// Looks up a known identifier.
    #[must_use]
    pub fn from_raw(raw: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|id| id.raw() == raw)
    }
}

impl From<PacketId> for u32 {
    fn from(id: PacketId) -> Self {
        id.raw()
    }
}

impl std::fmt::Display for PacketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}({})", self.raw())
    }
}
