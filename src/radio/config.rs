use super::nrf24::limits;
use crate::{CrcLength, DataRate, PaLevel};

/// An object to configure the radio.
///
/// This struct follows a builder pattern. Since all fields are private, users should
/// start with the [`RadioConfig::default`] constructor, then mutate the object accordingly.
/// ```
/// use nrf24::radio::RadioConfig;
///
/// let config = RadioConfig::default().with_channel(42);
/// assert_eq!(config.channel(), 42);
/// ```
///
/// The builder does not clamp values. Out of range values are reported by
/// [`RadioConfig::is_valid()`], and a driver refuses to apply an invalid
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadioConfig {
    address_width: u8,
    payload_size: u8,
    channel: u8,
    data_rate: DataRate,
    crc_length: CrcLength,
    dynamic_payloads: bool,
    retry_delay: u8,
    retry_count: u8,
    auto_ack: bool,
    ack_payloads: bool,
    dynamic_ack: bool,
    pa_level: PaLevel,
    lna_enable: bool,
}

impl Default for RadioConfig {
    /// Instantiate a [`RadioConfig`] object with library defaults.
    ///
    /// | feature | default value |
    /// |--------:|:--------------|
    /// | [`RadioConfig::address_width()`] | `5` |
    /// | [`RadioConfig::payload_size()`] | `32` |
    /// | [`RadioConfig::channel()`] | `76` |
    /// | [`RadioConfig::data_rate()`] | [`DataRate::Mbps1`] |
    /// | [`RadioConfig::crc_length()`] | [`CrcLength::Bit16`] |
    /// | [`RadioConfig::retry_delay()`] | `5` |
    /// | [`RadioConfig::retry_count()`] | `15` |
    /// | [`RadioConfig::auto_ack()`] | `true` |
    /// | [`RadioConfig::ack_payloads()`] | `false` |
    /// | [`RadioConfig::dynamic_payloads()`] | `false` |
    /// | [`RadioConfig::dynamic_ack()`] | `false` |
    /// | [`RadioConfig::pa_level()`] | [`PaLevel::Min`] |
    /// | [`RadioConfig::lna_enable()`] | `true` |
    fn default() -> Self {
        Self {
            address_width: 5,
            payload_size: 32,
            channel: 76,
            data_rate: DataRate::Mbps1,
            crc_length: CrcLength::Bit16,
            dynamic_payloads: false,
            /*
               - 5 * 250 + 250 = 1500 us delay between attempts
               - 15 max attempts
            */
            retry_delay: 5,
            retry_count: 15,
            auto_ack: true,
            ack_payloads: false,
            dynamic_ack: false,
            pa_level: PaLevel::Min,
            lna_enable: true,
        }
    }
}

impl RadioConfig {
    /// Does every field hold a value the radio can accept?
    ///
    /// - [`RadioConfig::address_width()`] in range [3, 5]
    /// - [`RadioConfig::payload_size()`] in range [0, 32]
    /// - [`RadioConfig::channel()`] in range [0, 125]
    /// - [`RadioConfig::retry_delay()`] and [`RadioConfig::retry_count()`] in range [0, 15]
    pub const fn is_valid(&self) -> bool {
        self.address_width >= limits::MIN_ADDRESS_WIDTH
            && self.address_width <= limits::MAX_ADDRESS_WIDTH
            && self.payload_size <= limits::MAX_PAYLOAD_SIZE
            && self.channel <= limits::MAX_CHANNEL
            && self.retry_delay <= limits::MAX_RETRY_VALUE
            && self.retry_count <= limits::MAX_RETRY_VALUE
    }

    /// Returns the value set by [`RadioConfig::with_address_width()`].
    pub const fn address_width(&self) -> u8 {
        self.address_width
    }

    /// The address width (in bytes) applied to all pipes.
    ///
    /// Valid values are 3, 4, or 5.
    pub fn with_address_width(self, width: u8) -> Self {
        Self {
            address_width: width,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_payload_size()`].
    pub const fn payload_size(&self) -> u8 {
        self.payload_size
    }

    /// The static payload size (in bytes) applied to all pipes.
    ///
    /// This has no effect when dynamic payloads are enabled.
    pub fn with_payload_size(self, size: u8) -> Self {
        Self {
            payload_size: size,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_channel()`].
    pub const fn channel(&self) -> u8 {
        self.channel
    }

    /// Set the channel (over the air frequency).
    ///
    /// Valid values are in range [0, 125].
    /// The radio's frequency can be determined by the following equation:
    /// ```text
    /// frequency (in MHz) = channel + 2400
    /// ```
    pub fn with_channel(self, channel: u8) -> Self {
        Self { channel, ..self }
    }

    /// Returns the value set by [`RadioConfig::with_data_rate()`].
    pub const fn data_rate(&self) -> DataRate {
        self.data_rate
    }

    /// The Data Rate (over the air).
    ///
    /// See [`EsbDataRate::set_data_rate()`](fn@crate::radio::prelude::EsbDataRate::set_data_rate).
    pub fn with_data_rate(self, data_rate: DataRate) -> Self {
        Self { data_rate, ..self }
    }

    /// Returns the value set by [`RadioConfig::with_crc_length()`].
    pub const fn crc_length(&self) -> CrcLength {
        self.crc_length
    }

    /// The Cyclical Redundancy Checksum (CRC) length.
    ///
    /// See [`EsbCrcLength::set_crc_length()`](fn@crate::radio::prelude::EsbCrcLength::set_crc_length).
    pub fn with_crc_length(self, crc_length: CrcLength) -> Self {
        Self { crc_length, ..self }
    }

    /// Returns the value set by [`RadioConfig::with_dynamic_payloads()`].
    pub const fn dynamic_payloads(&self) -> bool {
        self.dynamic_payloads
    }

    /// Enable or disable dynamic payload lengths on all pipes.
    ///
    /// See [`EsbPayloadLength::set_dynamic_payload_length()`](fn@crate::radio::prelude::EsbPayloadLength::set_dynamic_payload_length).
    pub fn with_dynamic_payloads(self, enable: bool) -> Self {
        Self {
            dynamic_payloads: enable,
            ..self
        }
    }

    /// The auto-retry feature's `delay` (set via [`RadioConfig::with_retries()`])
    pub const fn retry_delay(&self) -> u8 {
        self.retry_delay
    }

    /// The auto-retry feature's `count` (set via [`RadioConfig::with_retries()`])
    pub const fn retry_count(&self) -> u8 {
        self.retry_count
    }

    /// Set the auto-retry feature's `delay` and `count` parameters.
    ///
    /// See [`EsbAutoAck::set_retries()`](fn@crate::radio::prelude::EsbAutoAck::set_retries).
    pub fn with_retries(self, delay: u8, count: u8) -> Self {
        Self {
            retry_delay: delay,
            retry_count: count,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_auto_ack()`].
    pub const fn auto_ack(&self) -> bool {
        self.auto_ack
    }

    /// Enable or disable the auto-ack feature on all pipes.
    pub fn with_auto_ack(self, enable: bool) -> Self {
        Self {
            auto_ack: enable,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_ack_payloads()`].
    pub const fn ack_payloads(&self) -> bool {
        self.ack_payloads
    }

    /// Enable or disable payloads attached to ACK packets.
    ///
    /// When applied to a radio, this also enables dynamic payloads and auto-ack.
    pub fn with_ack_payloads(self, enable: bool) -> Self {
        Self {
            ack_payloads: enable,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_dynamic_ack()`].
    pub const fn dynamic_ack(&self) -> bool {
        self.dynamic_ack
    }

    /// Allow the `multicast` parameter of
    /// [`EsbRadio::write()`](fn@crate::radio::prelude::EsbRadio::write)
    /// to skip the ACK of an individual payload.
    pub fn with_dynamic_ack(self, enable: bool) -> Self {
        Self {
            dynamic_ack: enable,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_pa_level()`].
    pub const fn pa_level(&self) -> PaLevel {
        self.pa_level
    }

    /// The Power Amplitude (PA) level.
    ///
    /// See [`EsbPaLevel::set_pa_level()`](fn@crate::radio::prelude::EsbPaLevel::set_pa_level).
    pub fn with_pa_level(self, level: PaLevel) -> Self {
        Self {
            pa_level: level,
            ..self
        }
    }

    /// Returns the value set by [`RadioConfig::with_lna_enable()`].
    pub const fn lna_enable(&self) -> bool {
        self.lna_enable
    }

    /// Enable or disable the chip's Low Noise Amplifier (LNA) feature.
    ///
    /// This value may not be respected depending on the radio module used.
    /// Consult the radio's manufacturer for accurate details.
    pub fn with_lna_enable(self, enable: bool) -> Self {
        Self {
            lna_enable: enable,
            ..self
        }
    }
}

#[cfg(test)]
mod test {
    use super::RadioConfig;
    use crate::{CrcLength, DataRate, PaLevel};

    #[test]
    fn defaults() {
        let config = RadioConfig::default();
        assert!(config.is_valid());
        assert_eq!(config.address_width(), 5);
        assert_eq!(config.payload_size(), 32);
        assert_eq!(config.channel(), 76);
        assert_eq!(config.data_rate(), DataRate::Mbps1);
        assert_eq!(config.crc_length(), CrcLength::Bit16);
        assert_eq!((config.retry_delay(), config.retry_count()), (5, 15));
        assert!(config.auto_ack());
        assert!(!config.ack_payloads());
        assert!(!config.dynamic_payloads());
        assert!(!config.dynamic_ack());
        assert_eq!(config.pa_level(), PaLevel::Min);
        assert!(config.lna_enable());
    }

    #[test]
    fn builder() {
        let config = RadioConfig::default()
            .with_address_width(3)
            .with_payload_size(0)
            .with_channel(125)
            .with_data_rate(DataRate::Kbps250)
            .with_crc_length(CrcLength::Disabled)
            .with_retries(0, 3)
            .with_auto_ack(false)
            .with_ack_payloads(true)
            .with_dynamic_payloads(true)
            .with_dynamic_ack(true)
            .with_pa_level(PaLevel::High)
            .with_lna_enable(false);
        assert!(config.is_valid());
        assert_eq!(config.address_width(), 3);
        assert_eq!(config.payload_size(), 0);
        assert_eq!(config.channel(), 125);
        assert_eq!(config.data_rate(), DataRate::Kbps250);
        assert_eq!(config.crc_length(), CrcLength::Disabled);
        assert_eq!((config.retry_delay(), config.retry_count()), (0, 3));
        assert!(!config.auto_ack());
        assert!(config.ack_payloads());
        assert!(config.dynamic_payloads());
        assert!(config.dynamic_ack());
        assert_eq!(config.pa_level(), PaLevel::High);
        assert!(!config.lna_enable());
    }

    #[test]
    fn out_of_range() {
        let config = RadioConfig::default();
        assert!(!config.with_channel(126).is_valid());
        assert!(!config.with_address_width(2).is_valid());
        assert!(!config.with_address_width(6).is_valid());
        assert!(!config.with_payload_size(33).is_valid());
        assert!(!config.with_retries(16, 0).is_valid());
        assert!(!config.with_retries(0, 16).is_valid());
        // builder doesn't clamp
        assert_eq!(config.with_channel(200).channel(), 200);
    }
}
