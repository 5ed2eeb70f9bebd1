use bitfield_struct::bitfield;

use crate::CrcLength;

/// A cached copy of the CONFIG register.
///
/// The IRQ mask bits are never set by this driver, so all events reach the IRQ pin.
#[bitfield(u8, order = Msb)]
pub(crate) struct Config {
    #[bits(1)]
    _reserved: u8,

    #[bits(3)]
    _irq_mask: u8,

    /// Power-on-reset value is `EN_CRC` only (8 bit CRC).
    #[bits(2, access = None, default = 2)]
    crc_length: u8,

    pub power: bool,

    pub is_rx: bool,
}

impl Config {
    /// Returns [`None`] if the bits describe `CRCO` without `EN_CRC`.
    pub const fn crc_length(&self) -> Option<CrcLength> {
        CrcLength::from_bits(self.into_bits())
    }

    pub fn with_crc_length(self, length: CrcLength) -> Self {
        let new_val = self.into_bits() & !CrcLength::MASK | length.into_bits();
        Self::from_bits(new_val)
    }

    pub fn as_rx(self) -> Self {
        self.with_is_rx(true)
    }

    pub fn as_tx(self) -> Self {
        self.with_is_rx(false)
    }
}

/// A cached copy of the SETUP_RETR register.
#[bitfield(u8, order = Msb)]
pub(crate) struct SetupRetry {
    /// The auto-retry feature's `delay`.
    #[bits(4, default = 5)]
    pub ard: u8,

    /// The auto-retry feature's `count`.
    #[bits(4, default = 15)]
    pub arc: u8,
}

/// A cached copy of the FEATURE register.
///
/// The setters enforce the dependency of ACK payloads on dynamic payloads.
#[bitfield(u8, order = Msb)]
pub(crate) struct Feature {
    #[bits(5)]
    _reserved: u8,

    #[bits(1, access = RO)]
    pub dynamic_payloads: bool,

    #[bits(1, access = RO)]
    pub ack_payloads: bool,

    pub dynamic_ack: bool,
}

impl Feature {
    pub fn with_dynamic_payloads(self, enable: bool) -> Self {
        let mut new_val = self.into_bits() & !(1u8 << Self::DYNAMIC_PAYLOADS_OFFSET);
        if !enable {
            // ACK payloads can't exist without dynamic payloads
            new_val &= !(1u8 << Self::ACK_PAYLOADS_OFFSET);
        } else {
            new_val |= 1u8 << Self::DYNAMIC_PAYLOADS_OFFSET;
        }
        Self::from_bits(new_val)
    }

    pub fn with_ack_payloads(self, enable: bool) -> Self {
        let mut new_value = self.into_bits() & !(1u8 << Self::ACK_PAYLOADS_OFFSET);
        if enable {
            new_value |= (1u8 << Self::ACK_PAYLOADS_OFFSET) | (1u8 << Self::DYNAMIC_PAYLOADS_OFFSET)
        }
        Self::from_bits(new_value)
    }
}
