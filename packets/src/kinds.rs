//! Discriminant enums that select packet payload variants.
//!
//! Variant tables use these through [`raw`](TextType::raw) so the numeric
//! values live in one place.

macro_rules! discriminants {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident = $value:expr,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant = $value,)+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            #[must_use]
            pub const fn raw(self) -> i64 {
                self as i64
            }

            #[must_use]
            pub fn from_raw(raw: i64) -> Option<Self> {
                Self::ALL.iter().copied().find(|kind| kind.raw() == raw)
            }
        }
    };
}

discriminants! {
    /// Login outcome reported by the server.
    pub enum PlayStatus {
        LoginSuccess = 0,
        FailedClient = 1,
        FailedServer = 2,
        PlayerSpawn = 3,
        FailedInvalidTenant = 4,
        FailedVanillaEdu = 5,
        FailedIncompatible = 6,
        FailedServerFull = 7,
        FailedEditorVanillaMismatch = 8,
        FailedVanillaEditorMismatch = 9,
    }
}

discriminants! {
    pub enum ResourcePackResponse {
        None = 0,
        Refused = 1,
        SendPacks = 2,
        HaveAllPacks = 3,
        Completed = 4,
    }
}

discriminants! {
    /// Selects the payload of a text packet.
    pub enum TextType {
        Raw = 0,
        Chat = 1,
        Translation = 2,
        Popup = 3,
        JukeboxPopup = 4,
        Tip = 5,
        System = 6,
        Whisper = 7,
        Announcement = 8,
        JsonWhisper = 9,
        Json = 10,
        JsonAnnouncement = 11,
    }
}

discriminants! {
    pub enum InteractAction {
        LeaveVehicle = 3,
        MouseOverEntity = 4,
        NpcOpen = 5,
        OpenInventory = 6,
    }
}

discriminants! {
    /// Arm and boat animations. The rowing actions carry a rowing time.
    pub enum AnimateAction {
        NoAction = 0,
        SwingArm = 1,
        WakeUp = 3,
        CriticalHit = 4,
        MagicCriticalHit = 5,
        RowRight = 128,
        RowLeft = 129,
    }
}

discriminants! {
    pub enum BossEventType {
        Show = 0,
        RegisterPlayer = 1,
        Hide = 2,
        UnregisterPlayer = 3,
        UpdatePercent = 4,
        UpdateName = 5,
        UpdateProperties = 6,
        UpdateStyle = 7,
        Query = 8,
    }
}

discriminants! {
    pub enum ScoreAction {
        Change = 0,
        Remove = 1,
    }
}

discriminants! {
    pub enum ScoreIdentityType {
        Player = 1,
        Entity = 2,
        FakePlayer = 3,
    }
}

discriminants! {
    /// Value type of an actor metadata entry.
    pub enum DataItemType {
        Byte = 0,
        Short = 1,
        Int = 2,
        Float = 3,
        String = 4,
        Compound = 5,
        BlockPos = 6,
        Long = 7,
        Vec3 = 8,
    }
}

discriminants! {
    /// Block actions that can appear inside a player auth input packet.
    pub enum PlayerActionType {
        StartBreak = 0,
        AbortBreak = 1,
        StopBreak = 2,
        CrackBreak = 18,
        PredictBreak = 26,
        ContinueBreak = 27,
    }
}

discriminants! {
    pub enum PlayMode {
        Normal = 0,
        Teaser = 1,
        Screen = 2,
        Viewer = 3,
        Reality = 4,
        Placement = 5,
        LivingRoom = 6,
        ExitLevel = 7,
        ExitLevelLivingRoom = 8,
    }
}

discriminants! {
    /// Where an inventory action takes its item from.
    pub enum InventorySourceType {
        Container = 0,
        Global = 1,
        WorldInteraction = 2,
        Creative = 3,
    }
}

discriminants! {
    /// Action kinds inside an item stack request.
    pub enum ItemStackActionType {
        Take = 0,
        Place = 1,
        Swap = 2,
        Drop = 3,
        Destroy = 4,
        Consume = 5,
        Create = 6,
        PlaceInItemContainer = 7,
        TakeFromItemContainer = 8,
        LabTableCombine = 9,
        BeaconPayment = 10,
        MineBlock = 11,
        CraftRecipe = 12,
        CraftCreative = 14,
    }
}

/// Animate actions with this bit set carry a rowing time.
pub const ANIMATE_ROW_BIT: u64 = 0x80;

/// Bit positions within a player auth input's `input_data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum InputFlag {
    Ascend = 0,
    Descend = 1,
    Jumping = 6,
    Sneaking = 8,
    Up = 10,
    Down = 11,
    Left = 12,
    Right = 13,
    Sprinting = 20,
    StartSprinting = 25,
    StopSprinting = 26,
    StartSneaking = 27,
    StopSneaking = 28,
    StartJumping = 31,
    PerformItemInteraction = 34,
    PerformBlockActions = 35,
    PerformItemStackRequest = 36,
    HandledTeleport = 37,
    Emoting = 38,
    ClientPredictedVehicle = 45,
}

impl InputFlag {
    /// Mask with only this flag's bit set.
    #[must_use]
    pub const fn mask(self) -> u64 {
        1 << self as u8
    }

    #[must_use]
    pub const fn is_set(self, input_data: u64) -> bool {
        input_data & self.mask() != 0
    }
}
