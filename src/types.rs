//! Plain value types shared by the radio traits and the register layer.

use core::{
    fmt::{Display, Formatter, Result},
    write,
};

use bitfield_struct::bitfield;

/// Transmitter output power (RF_PWR).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PaLevel {
    /// -18 dBm
    Min,
    /// -12 dBm
    Low,
    /// -6 dBm
    High,
    /// 0 dBm
    Max,
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for PaLevel {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            PaLevel::Min => defmt::write!(fmt, "Min"),
            PaLevel::Low => defmt::write!(fmt, "Low"),
            PaLevel::High => defmt::write!(fmt, "High"),
            PaLevel::Max => defmt::write!(fmt, "Max"),
        }
    }
}

impl PaLevel {
    /// The RF_PWR bits of the RF_SETUP register.
    pub(crate) const MASK: u8 = 6;

    /// The level's position within the RF_SETUP register (`level << 1`).
    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            PaLevel::Min => 0,
            PaLevel::Low => 2,
            PaLevel::High => 4,
            PaLevel::Max => 6,
        }
    }

    pub(crate) const fn from_bits(value: u8) -> Self {
        match value & Self::MASK {
            0 => PaLevel::Min,
            2 => PaLevel::Low,
            4 => PaLevel::High,
            _ => PaLevel::Max,
        }
    }
}

impl Display for PaLevel {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            PaLevel::Min => write!(f, "Min"),
            PaLevel::Low => write!(f, "Low"),
            PaLevel::High => write!(f, "High"),
            PaLevel::Max => write!(f, "Max"),
        }
    }
}

/// Air data rate.
///
/// 250 Kbps is only available on the nRF24L01+.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DataRate {
    Mbps1,
    Mbps2,
    Kbps250,
}

impl DataRate {
    /// The RF_DR_LOW and RF_DR_HIGH bits of the RF_SETUP register.
    pub(crate) const MASK: u8 = 0x28;

    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            DataRate::Mbps1 => 0,
            DataRate::Mbps2 => 0x8,
            DataRate::Kbps250 => 0x20,
        }
    }

    /// Decode the data rate bits of a RF_SETUP value.
    ///
    /// Returns [`None`] for the reserved pattern (both bits set).
    pub(crate) const fn from_bits(value: u8) -> Option<Self> {
        match value & Self::MASK {
            0 => Some(DataRate::Mbps1),
            0x8 => Some(DataRate::Mbps2),
            0x20 => Some(DataRate::Kbps250),
            _ => None,
        }
    }
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for DataRate {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            DataRate::Mbps1 => defmt::write!(fmt, "1 Mbps"),
            DataRate::Mbps2 => defmt::write!(fmt, "2 Mbps"),
            DataRate::Kbps250 => defmt::write!(fmt, "250 Kbps"),
        }
    }
}

impl Display for DataRate {
    fn fmt(&self, f: &mut Formatter) -> Result {
        match self {
            DataRate::Mbps1 => write!(f, "1 Mbps"),
            DataRate::Mbps2 => write!(f, "2 Mbps"),
            DataRate::Kbps250 => write!(f, "250 Kbps"),
        }
    }
}

/// CRC appended to every packet.
///
/// The radio forces CRC on while auto-ack is enabled on any pipe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CrcLength {
    Disabled,
    /// 1 byte
    Bit8,
    /// 2 bytes
    Bit16,
}

impl CrcLength {
    /// The EN_CRC and CRCO bits of the CONFIG register.
    pub(crate) const MASK: u8 = 0xC;

    pub(crate) const fn into_bits(self) -> u8 {
        match self {
            CrcLength::Disabled => 0,
            CrcLength::Bit8 => 8,
            CrcLength::Bit16 => 12,
        }
    }

    /// Decode the CRC bits of a CONFIG value.
    ///
    /// CRCO without EN_CRC is meaningless, so it is reported as [`None`].
    pub(crate) const fn from_bits(value: u8) -> Option<Self> {
        match value & Self::MASK {
            0 => Some(CrcLength::Disabled),
            8 => Some(CrcLength::Bit8),
            12 => Some(CrcLength::Bit16),
            _ => None,
        }
    }
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for CrcLength {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            CrcLength::Disabled => defmt::write!(fmt, "disabled"),
            CrcLength::Bit8 => defmt::write!(fmt, "8 bit"),
            CrcLength::Bit16 => defmt::write!(fmt, "16 bit"),
        }
    }
}

impl Display for CrcLength {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            CrcLength::Disabled => write!(f, "disabled"),
            CrcLength::Bit8 => write!(f, "8 bit"),
            CrcLength::Bit16 => write!(f, "16 bit"),
        }
    }
}

/// Occupancy of one of the 3-level FIFOs, as reported by FIFO_STATUS.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FifoState {
    Full,
    Empty,
    /// Holds 1 or 2 payloads.
    Occupied,
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for FifoState {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            FifoState::Empty => defmt::write!(fmt, "Empty"),
            FifoState::Full => defmt::write!(fmt, "Full"),
            FifoState::Occupied => defmt::write!(fmt, "Occupied"),
        }
    }
}

impl Display for FifoState {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            FifoState::Empty => write!(f, "Empty"),
            FifoState::Full => write!(f, "Full"),
            FifoState::Occupied => write!(f, "Occupied"),
        }
    }
}

/// The operating mode of the transceiver.
///
/// This is derived from the cached CONFIG register value and the
/// last level written to the CE pin. It never requires a SPI transaction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RadioMode {
    /// PWR_UP is cleared. The radio can neither transmit nor receive.
    PoweredDown,
    /// Powered up with the CE pin inactive (StandBy-I).
    Standby,
    /// Active RX mode: PRIM_RX is set and the CE pin is active.
    Listening,
    /// Active TX mode: PRIM_RX is cleared and the CE pin is active.
    Transmitting,
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for RadioMode {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            RadioMode::PoweredDown => defmt::write!(fmt, "PoweredDown"),
            RadioMode::Standby => defmt::write!(fmt, "Standby"),
            RadioMode::Listening => defmt::write!(fmt, "Listening"),
            RadioMode::Transmitting => defmt::write!(fmt, "Transmitting"),
        }
    }
}

impl Display for RadioMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            RadioMode::PoweredDown => write!(f, "PoweredDown"),
            RadioMode::Standby => write!(f, "Standby"),
            RadioMode::Listening => write!(f, "Listening"),
            RadioMode::Transmitting => write!(f, "Transmitting"),
        }
    }
}

/// The chip variant detected during initialization.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ChipVariant {
    /// The nRF24L01+ (and compatible clones).
    Nrf24l01Plus,
    /// The older nRF24L01 that requires the `ACTIVATE` command to unlock
    /// the FEATURE, DYNPD and R_RX_PL_WID registers.
    Nrf24l01,
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for ChipVariant {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            ChipVariant::Nrf24l01Plus => defmt::write!(fmt, "nRF24L01+"),
            ChipVariant::Nrf24l01 => defmt::write!(fmt, "nRF24L01"),
        }
    }
}

impl Display for ChipVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            ChipVariant::Nrf24l01Plus => write!(f, "nRF24L01+"),
            ChipVariant::Nrf24l01 => write!(f, "nRF24L01"),
        }
    }
}

/// The STATUS byte clocked out by the radio at the start of every SPI transaction.
///
/// [`StatusFlags::default`] has every IRQ flag cleared and [`StatusFlags::new`]
/// has every IRQ flag set:
/// ```
/// use nrf24::StatusFlags;
/// let only_rx = StatusFlags::default().with_rx_dr(true);
/// assert!(only_rx.rx_dr() && !only_rx.tx_ds());
/// ```
#[bitfield(u8, new = false, order = Msb)]
pub struct StatusFlags {
    #[bits(1)]
    _padding: u8,

    /// RX_DR: a payload arrived in the RX FIFO.
    #[bits(1, access = RO)]
    pub rx_dr: bool,

    /// TX_DS: a payload was sent (and acknowledged, if auto-ack is on).
    #[bits(1, access = RO)]
    pub tx_ds: bool,

    /// MAX_RT: retransmissions ran out without an ACK.
    #[bits(1, access = RO)]
    pub tx_df: bool,

    #[bits(3, access = RO)]
    pub(crate) rx_pipe: u8,

    /// TX_FULL
    #[bits(1, access = RO)]
    pub tx_full: bool,
}

#[cfg(feature = "defmt")]
#[cfg(target_os = "none")]
impl defmt::Format for StatusFlags {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "StatusFlags rx_dr: {}, tx_ds: {}, tx_df: {}, tx_full: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.tx_df(),
            self.tx_full()
        )
    }
}

impl StatusFlags {
    /// RX_DR, TX_DS and MAX_RT share these positions in STATUS and CONFIG.
    pub(crate) const IRQ_MASK: u8 = 0x70;

    /// All three IRQ flags set.
    pub fn new() -> Self {
        Self::from_bits(Self::IRQ_MASK)
    }

    pub fn with_rx_dr(self, flag: bool) -> Self {
        let new_val = self.into_bits() & !(1 << Self::RX_DR_OFFSET);
        Self::from_bits(new_val | ((flag as u8) << Self::RX_DR_OFFSET))
    }

    pub fn with_tx_ds(self, flag: bool) -> Self {
        let new_val = self.into_bits() & !(1 << Self::TX_DS_OFFSET);
        Self::from_bits(new_val | ((flag as u8) << Self::TX_DS_OFFSET))
    }

    pub fn with_tx_df(self, flag: bool) -> Self {
        let new_val = self.into_bits() & !(1 << Self::TX_DF_OFFSET);
        Self::from_bits(new_val | ((flag as u8) << Self::TX_DF_OFFSET))
    }
}

impl Display for StatusFlags {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "StatusFlags rx_dr: {}, tx_ds: {}, tx_df: {}, tx_full: {}",
            self.rx_dr(),
            self.tx_ds(),
            self.tx_df(),
            self.tx_full()
        )
    }
}

#[cfg(test)]
mod test {
    use super::{ChipVariant, CrcLength, DataRate, FifoState, PaLevel, RadioMode, StatusFlags};
    extern crate std;
    use std::{format, string::String};

    #[test]
    fn display_enums() {
        assert_eq!(format!("{}", CrcLength::Bit16), "16 bit");
        assert_eq!(format!("{}", CrcLength::Disabled), "disabled");
        assert_eq!(format!("{}", DataRate::Kbps250), "250 Kbps");
        assert_eq!(format!("{}", PaLevel::Low), "Low");
        assert_eq!(format!("{}", FifoState::Occupied), "Occupied");
        assert_eq!(format!("{}", RadioMode::Listening), "Listening");
        assert_eq!(format!("{}", ChipVariant::Nrf24l01Plus), "nRF24L01+");
    }

    #[test]
    fn data_rate_bits() {
        assert_eq!(DataRate::from_bits(0x27), Some(DataRate::Kbps250));
        assert_eq!(DataRate::from_bits(0x0F), Some(DataRate::Mbps2));
        assert_eq!(DataRate::from_bits(0x07), Some(DataRate::Mbps1));
        // both RF_DR_LOW and RF_DR_HIGH is a reserved combination
        assert_eq!(DataRate::from_bits(0x28), None);
    }

    #[test]
    fn crc_bits() {
        assert_eq!(CrcLength::from_bits(0x0E), Some(CrcLength::Bit16));
        assert_eq!(CrcLength::from_bits(0x0A), Some(CrcLength::Bit8));
        assert_eq!(CrcLength::from_bits(0x03), Some(CrcLength::Disabled));
        assert_eq!(CrcLength::from_bits(0x04), None);
    }

    #[test]
    fn pa_level_bits() {
        for level in [PaLevel::Min, PaLevel::Low, PaLevel::High, PaLevel::Max] {
            // LNA bit must not influence decoding
            assert_eq!(PaLevel::from_bits(level.into_bits() | 1), level);
        }
    }

    #[test]
    fn display_flags() {
        assert_eq!(
            format!("{}", StatusFlags::default()),
            String::from("StatusFlags rx_dr: false, tx_ds: false, tx_df: false, tx_full: false")
        );
    }

    #[test]
    fn status_byte_fields() {
        // RX_DR, MAX_RT, pipe 2 and TX_FULL
        let flags = StatusFlags::from_bits(0x55);
        assert!(flags.rx_dr());
        assert!(!flags.tx_ds());
        assert!(flags.tx_df());
        assert_eq!(flags.rx_pipe(), 2);
        assert!(flags.tx_full());
    }

    #[test]
    fn set_flags() {
        let flags = StatusFlags::default()
            .with_rx_dr(true)
            .with_tx_ds(false)
            .with_tx_df(true);
        assert_eq!(flags.into_bits(), 0x50);
        let flags = flags.with_rx_dr(false).with_tx_ds(true);
        assert_eq!(flags.into_bits(), 0x30);
        assert_eq!(StatusFlags::new().into_bits(), 0x70);
    }
}
