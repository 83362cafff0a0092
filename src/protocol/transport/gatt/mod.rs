//! GATT surface exposed by the bridge: one service, its characteristics and
//! the pairing policy.
//!
//! | Characteristic | UUID                                   | Properties                         |
//! |----------------|----------------------------------------|------------------------------------|
//! | Fast data      | `c6bfeea2-1266-40ef-8191-3c6542d21c1f` | read (encrypted, authenticated), notify |
//! | Slow data      | `5b50e778-9b9e-427d-ba76-2ec4b063bd4c` | read (encrypted, authenticated), notify |
//! | Reboot         | `73b08ee0-66ec-41d8-9c28-3f9e5dbef024` | write without response             |
//!
//! The slow data characteristic only exists in the engine-data variant.
use crate::config::{BridgeConfig, BridgeVariant};

pub const SERVICE_UUID: u128 = 0xdcfcad04_aee4_4a00_b97e_b49fb12a8480;
pub const FAST_DATA_CHARACTERISTIC_UUID: u128 = 0xc6bfeea2_1266_40ef_8191_3c6542d21c1f;
pub const SLOW_DATA_CHARACTERISTIC_UUID: u128 = 0x5b50e778_9b9e_427d_ba76_2ec4b063bd4c;
pub const REBOOT_CHARACTERISTIC_UUID: u128 = 0x73b08ee0_66ec_41d8_9c28_3f9e5dbef024;

/// Client Characteristic Configuration bit enabling notifications.
pub const CCCD_NOTIFY: u16 = 0x0001;

/// Characteristics known to the bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CharacteristicId {
    FastData,
    SlowData,
    Reboot,
}

impl CharacteristicId {
    /// 128-bit UUID of the characteristic.
    pub const fn uuid(self) -> u128 {
        match self {
            Self::FastData => FAST_DATA_CHARACTERISTIC_UUID,
            Self::SlowData => SLOW_DATA_CHARACTERISTIC_UUID,
            Self::Reboot => REBOOT_CHARACTERISTIC_UUID,
        }
    }

    /// Reverse lookup used by drivers that only know the UUID of a written attribute.
    pub fn from_uuid(uuid: u128) -> Option<Self> {
        match uuid {
            FAST_DATA_CHARACTERISTIC_UUID => Some(Self::FastData),
            SLOW_DATA_CHARACTERISTIC_UUID => Some(Self::SlowData),
            REBOOT_CHARACTERISTIC_UUID => Some(Self::Reboot),
            _ => None,
        }
    }
}

/// Attribute properties, combined with `|`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Properties(u16);

impl Properties {
    pub const READ: Self = Self(1 << 0);
    pub const READ_ENC: Self = Self(1 << 1);
    pub const READ_AUTHEN: Self = Self(1 << 2);
    pub const WRITE_NR: Self = Self(1 << 3);
    pub const NOTIFY: Self = Self(1 << 4);

    pub const fn bits(self) -> u16 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl core::ops::BitOr for Properties {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

const DATA_PROPERTIES: Properties = Properties::READ
    .union(Properties::READ_ENC)
    .union(Properties::READ_AUTHEN)
    .union(Properties::NOTIFY);

/// One characteristic to create inside the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacteristicSpec {
    pub id: CharacteristicId,
    pub uuid: u128,
    pub properties: Properties,
}

impl CharacteristicSpec {
    const fn new(id: CharacteristicId, properties: Properties) -> Self {
        Self {
            id,
            uuid: id.uuid(),
            properties,
        }
    }
}

/// Service definition handed to [`BlePeripheral::create_service`](super::traits::ble_peripheral::BlePeripheral::create_service).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceLayout {
    pub uuid: u128,
    pub characteristics: &'static [CharacteristicSpec],
}

static RAW_CHARACTERISTICS: [CharacteristicSpec; 2] = [
    CharacteristicSpec::new(CharacteristicId::FastData, DATA_PROPERTIES),
    CharacteristicSpec::new(CharacteristicId::Reboot, Properties::WRITE_NR),
];

static ENGINE_DATA_CHARACTERISTICS: [CharacteristicSpec; 3] = [
    CharacteristicSpec::new(CharacteristicId::FastData, DATA_PROPERTIES),
    CharacteristicSpec::new(CharacteristicId::SlowData, DATA_PROPERTIES),
    CharacteristicSpec::new(CharacteristicId::Reboot, Properties::WRITE_NR),
];

impl ServiceLayout {
    /// Service layout for a bridge variant.
    pub fn for_variant(variant: &BridgeVariant) -> Self {
        let characteristics: &'static [CharacteristicSpec] = match variant {
            BridgeVariant::RawPassthrough => &RAW_CHARACTERISTICS,
            BridgeVariant::EngineData { .. } => &ENGINE_DATA_CHARACTERISTICS,
        };
        Self {
            uuid: SERVICE_UUID,
            characteristics,
        }
    }

    pub fn contains(&self, id: CharacteristicId) -> bool {
        self.characteristics.iter().any(|spec| spec.id == id)
    }
}

/// Input/output capabilities announced during pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoCapability {
    DisplayOnly,
    DisplayYesNo,
    KeyboardOnly,
    NoInputNoOutput,
    KeyboardDisplay,
}

/// Pairing requirements configured on the BLE stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SecurityPolicy {
    pub bonding: bool,
    pub mitm: bool,
    pub secure_connections: bool,
    /// Fixed numeric passkey, identical on every unit.
    pub passkey: u32,
    pub io_capability: IoCapability,
}

impl SecurityPolicy {
    /// Bonded, MITM-protected secure connection with the configured static passkey.
    pub const fn from_config(config: &BridgeConfig) -> Self {
        Self {
            bonding: true,
            mitm: true,
            secure_connections: true,
            passkey: config.passkey,
            io_capability: IoCapability::DisplayOnly,
        }
    }
}
