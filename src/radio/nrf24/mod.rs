use core::fmt::{Debug, Display, Formatter};

use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};
mod auto_ack;
pub(crate) mod bit_fields;
mod channel;
mod init;
use bit_fields::{Config, Feature};
mod constants;
mod crc_length;
mod data_rate;
mod fifo;
mod pa_level;
mod payload_length;
mod pipe;
mod power;
mod radio;
pub use constants::{commands, limits, mnemonics, registers};
pub use pipe::{PipeEntry, PipeTable};
mod status;
use super::RadioConfig;
use crate::{
    types::{ChipVariant, RadioMode},
    StatusFlags,
};

/// An collection of error types to describe why an operation failed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Nrf24Error<SPI, DO> {
    /// Represents a SPI transaction error.
    Spi(SPI),
    /// Represents a DigitalOutput error.
    Gpo(DO),
    /// A parameter was out of range. Nothing was sent over the SPI bus.
    InvalidArgument,
    /// The operation requires a successful call to
    /// [`init()`](fn@crate::radio::prelude::EsbInit::init).
    NotInitialized,
    /// [`init()`](fn@crate::radio::prelude::EsbInit::init) already succeeded once
    /// for this radio object.
    AlreadyInitialized,
    /// A value read back from the radio did not match what was expected.
    VerificationFailure,
    /// The radio reached the maximum number of auto-retries while the TX FIFO was full.
    TxFailed,
    /// A busy-wait exceeded [`Nrf24::tx_timeout`].
    Timeout,
}

impl<SPI, DO> Nrf24Error<SPI, DO> {
    /// Is this error caused by the bus, the CE pin, or the radio link?
    ///
    /// Returns `true` for [`Nrf24Error::Spi`], [`Nrf24Error::Gpo`],
    /// [`Nrf24Error::TxFailed`] and [`Nrf24Error::Timeout`].
    pub const fn is_bus_failure(&self) -> bool {
        matches!(
            self,
            Nrf24Error::Spi(_) | Nrf24Error::Gpo(_) | Nrf24Error::TxFailed | Nrf24Error::Timeout
        )
    }
}

impl<SPI: Debug, DO: Debug> Display for Nrf24Error<SPI, DO> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Nrf24Error::Spi(e) => write!(f, "SPI error: {e:?}"),
            Nrf24Error::Gpo(e) => write!(f, "CE pin error: {e:?}"),
            Nrf24Error::InvalidArgument => write!(f, "invalid argument"),
            Nrf24Error::NotInitialized => write!(f, "radio is not initialized"),
            Nrf24Error::AlreadyInitialized => write!(f, "radio is already initialized"),
            Nrf24Error::VerificationFailure => write!(f, "register verification failed"),
            Nrf24Error::TxFailed => write!(f, "transmission failed"),
            Nrf24Error::Timeout => write!(f, "timed out"),
        }
    }
}

#[cfg(feature = "std")]
impl<SPI: Debug, DO: Debug> std::error::Error for Nrf24Error<SPI, DO> {}

/// This struct implements the [`Esb*` traits](mod@crate::radio::prelude)
/// for the nRF24L01 transceiver.
///
/// The object owns the SPI device and CE pin for its entire lifetime. It mirrors
/// the radio's configuration (see [`Nrf24::config()`]) so most getters don't need
/// the SPI bus.
pub struct Nrf24<SPI, DO, DELAY> {
    /// The delay (in microseconds) in which
    /// [`EsbRadio::stop_listening()`](fn@crate::radio::prelude::EsbRadio::stop_listening)
    /// will wait for ACK packets to complete.
    ///
    /// Any value less than 130 is treated as 130 (the radio's RX/TX settling time).
    ///
    /// Since this value can be optimized per the radio's data rate, this value is
    /// automatically adjusted when calling
    /// [`EsbDataRate::set_data_rate()`](fn@crate::radio::prelude::EsbDataRate::set_data_rate).
    /// If setting this to a custom value be sure, to set it *after*
    /// changing the radio's data rate.
    pub tx_delay: u32,
    /// An upper bound (in microseconds) on the busy-wait loops in
    /// [`EsbRadio::fast_write()`](fn@crate::radio::prelude::EsbRadio::fast_write) and
    /// [`EsbRadio::send()`](fn@crate::radio::prelude::EsbRadio::send).
    ///
    /// [`None`] (the default) means wait indefinitely.
    pub tx_timeout: Option<u32>,
    _spi: SPI,
    _ce_pin: DO,
    _ce_high: bool,
    _delay_impl: DELAY,
    _buf: [u8; 33],
    _status: StatusFlags,
    _config_reg: Config,
    _feature: Feature,
    _config: RadioConfig,
    _pipes: PipeTable,
    _variant: ChipVariant,
    _initialized: bool,
}

/// Busy-wait granularity (in microseconds) when [`Nrf24::tx_timeout`] is set.
const POLL_INTERVAL_US: u32 = 10;

impl<SPI, DO, DELAY> Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Instantiate an [`Nrf24`] object for use on the specified
    /// `spi` bus with the given `ce_pin`.
    ///
    /// The radio's CSN pin (aka Chip Select pin) shall be defined
    /// when instantiating the [`SpiDevice`](trait@embedded_hal::spi::SpiDevice)
    /// object (passed to the `spi` parameter).
    pub fn new(ce_pin: DO, spi: SPI, delay_impl: DELAY) -> Nrf24<SPI, DO, DELAY> {
        Nrf24 {
            tx_delay: 280,
            tx_timeout: None,
            _spi: spi,
            _ce_pin: ce_pin,
            _ce_high: false,
            _delay_impl: delay_impl,
            _buf: [0u8; 33],
            _status: StatusFlags::from_bits(0),
            _config_reg: Config::default(),
            _feature: Feature::from_bits(0),
            _config: RadioConfig::default(),
            _pipes: PipeTable::default(),
            _variant: ChipVariant::Nrf24l01Plus,
            _initialized: false,
        }
    }

    /// The one and only place where the SPI bus is used.
    ///
    /// The [`SpiDevice`] asserts CSN for the duration of the transfer,
    /// so no transaction outlives this call.
    fn spi_transfer(&mut self, len: usize) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self._spi
            .transfer_in_place(&mut self._buf[..len])
            .map_err(Nrf24Error::Spi)?;
        self._status = StatusFlags::from_bits(self._buf[0]);
        Ok(())
    }

    /// Send a command that consists of 1 byte:
    /// ```ignore
    /// self.command(commands::NOP)?;
    /// // STATUS register is now stored in self._status
    /// ```
    fn command(&mut self, command: u8) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self._buf[0] = command;
        self.spi_transfer(1)
    }

    /// Read `len` bytes (max 32) that follow the given `command`.
    ///
    /// The `command` is a register offset or a read command like
    /// [`commands::R_RX_PAYLOAD`].
    fn read_register_block(
        &mut self,
        command: u8,
        len: usize,
    ) -> Result<&[u8], Nrf24Error<SPI::Error, DO::Error>> {
        let len = len.min(32);
        self._buf[0] = command;
        self._buf[1..=len].fill(commands::NOP);
        self.spi_transfer(len + 1)?;
        Ok(&self._buf[1..=len])
    }

    fn read_register(&mut self, register: u8) -> Result<u8, Nrf24Error<SPI::Error, DO::Error>> {
        self.read_register_block(register, 1)?;
        Ok(self._buf[1])
    }

    fn write_register(
        &mut self,
        register: u8,
        value: u8,
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self._buf[0] = register | commands::W_REGISTER;
        self._buf[1] = value;
        self.spi_transfer(2)
    }

    fn write_register_block(
        &mut self,
        register: u8,
        bytes: &[u8],
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let len = bytes.len().min(32);
        self._buf[0] = register | commands::W_REGISTER;
        self._buf[1..=len].copy_from_slice(&bytes[..len]);
        self.spi_transfer(len + 1)
    }

    /// Write `buf` after the given `command`, padded with zeros up to `len` bytes.
    ///
    /// If `buf` is longer than `len`, then it is truncated.
    fn write_payload(
        &mut self,
        command: u8,
        buf: &[u8],
        len: usize,
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let len = len.min(32);
        let data_len = buf.len().min(len);
        self._buf[0] = command;
        self._buf[1..=data_len].copy_from_slice(&buf[..data_len]);
        self._buf[(data_len + 1)..=len].fill(0);
        self.spi_transfer(len + 1)
    }

    /// A private function to write a special SPI command specific to older
    /// non-plus variants of the nRF24L01 radio module. It has no effect on plus variants.
    fn toggle_features(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self._buf[0] = commands::ACTIVATE;
        self._buf[1] = mnemonics::ACTIVATE_KEY;
        self.spi_transfer(2)
    }

    fn set_ce(&mut self, high: bool) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        if high {
            self._ce_pin.set_high()
        } else {
            self._ce_pin.set_low()
        }
        .map_err(Nrf24Error::Gpo)?;
        self._ce_high = high;
        Ok(())
    }

    fn ensure_initialized(&self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        if self._initialized {
            Ok(())
        } else {
            Err(Nrf24Error::NotInitialized)
        }
    }

    /// Account for one iteration of a busy-wait loop.
    ///
    /// This only delays when [`Nrf24::tx_timeout`] is set, and fails once
    /// the accumulated `elapsed` time reaches that limit.
    fn backoff(&mut self, elapsed: &mut u32) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        if let Some(limit) = self.tx_timeout {
            if *elapsed >= limit {
                #[cfg(feature = "defmt")]
                defmt::warn!("busy-wait timed out after {} us", *elapsed);
                return Err(Nrf24Error::Timeout);
            }
            self._delay_impl.delay_us(POLL_INTERVAL_US);
            *elapsed = elapsed.saturating_add(POLL_INTERVAL_US);
        }
        Ok(())
    }

    /// The configuration that was last applied successfully to the radio.
    ///
    /// Every setter updates this only after the radio accepted the new value.
    pub fn config(&self) -> &RadioConfig {
        &self._config
    }

    /// The pipes' addresses and state as last written to the radio.
    pub fn pipes(&self) -> &PipeTable {
        &self._pipes
    }

    /// The radio's current operating mode.
    ///
    /// This is derived from cached state and does not use the SPI bus.
    pub fn mode(&self) -> RadioMode {
        if !self._config_reg.power() {
            RadioMode::PoweredDown
        } else if !self._ce_high {
            RadioMode::Standby
        } else if self._config_reg.is_rx() {
            RadioMode::Listening
        } else {
            RadioMode::Transmitting
        }
    }

    /// The chip variant detected by
    /// [`init()`](fn@crate::radio::prelude::EsbInit::init).
    pub fn variant(&self) -> ChipVariant {
        self._variant
    }

    /// Is this radio a nRF24L01+ variant?
    ///
    /// The bool that this function returns is only valid _after_ calling
    /// [`init()`](fn@crate::radio::prelude::EsbInit::init).
    pub fn is_plus_variant(&self) -> bool {
        self._variant == ChipVariant::Nrf24l01Plus
    }

    /// Has [`init()`](fn@crate::radio::prelude::EsbInit::init) succeeded?
    pub fn is_initialized(&self) -> bool {
        self._initialized
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{commands, mnemonics, registers, Nrf24Error};
    use crate::{spi_test_expects, test::mk_radio, RadioMode};
    use embedded_hal_mock::eh1::{
        digital::{State as PinState, Transaction as PinTransaction},
        spi::Transaction as SpiTransaction,
    };
    use std::{format, vec};

    #[test]
    fn register_framing() {
        let mut block = vec![0u8; 6];
        block[0] = registers::TX_ADDR | commands::W_REGISTER;
        block[1..].copy_from_slice(b"1Node");

        let spi_expectations = spi_test_expects![
            // read a single register (dummy byte is NOP)
            (vec![registers::RF_CH, 0xFFu8], vec![0xEu8, 76u8]),
            // read a block of 3 bytes
            (
                vec![registers::RX_ADDR_P0, 0xFFu8, 0xFFu8, 0xFFu8],
                vec![0xEu8, 1u8, 2u8, 3u8],
            ),
            // write a single register
            (
                vec![registers::RF_CH | commands::W_REGISTER, 42u8],
                vec![0xEu8, 0u8],
            ),
            // write a block
            (block, vec![0u8; 6]),
            // single byte commands
            (vec![commands::NOP], vec![0x40u8]),
            (
                vec![commands::ACTIVATE, mnemonics::ACTIVATE_KEY],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert_eq!(radio.read_register(registers::RF_CH).unwrap(), 76);
        assert_eq!(
            radio.read_register_block(registers::RX_ADDR_P0, 3).unwrap(),
            &[1u8, 2, 3]
        );
        radio.write_register(registers::RF_CH, 42).unwrap();
        radio
            .write_register_block(registers::TX_ADDR, b"1Node")
            .unwrap();
        assert_eq!(radio._status.into_bits(), 0);
        radio.command(commands::NOP).unwrap();
        // byte 0 of every transaction is cached as the STATUS
        assert!(radio._status.rx_dr());
        radio.toggle_features().unwrap();
        assert!(!radio._status.rx_dr());
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn payload_padding() {
        let mut expected = vec![0u8; 9];
        expected[0] = commands::W_TX_PAYLOAD;
        expected[1..4].copy_from_slice(&[1, 2, 3]);
        let spi_expectations = spi_test_expects![
            (expected, vec![0xEu8; 9]),
            (vec![commands::W_TX_PAYLOAD, 1u8, 2u8], vec![0xEu8; 3]),
        ];
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio
            .write_payload(commands::W_TX_PAYLOAD, &[1, 2, 3], 8)
            .unwrap();
        radio
            .write_payload(commands::W_TX_PAYLOAD, &[1, 2, 3], 2)
            .unwrap();
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn ce_level_is_cached() {
        let ce_expectations = [
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ];
        let mocks = mk_radio(&ce_expectations, &[]);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio._config_reg = radio._config_reg.with_power(true);
        assert_eq!(radio.mode(), RadioMode::Standby);
        radio.set_ce(true).unwrap();
        assert_eq!(radio.mode(), RadioMode::Transmitting);
        radio._config_reg = radio._config_reg.as_rx();
        assert_eq!(radio.mode(), RadioMode::Listening);
        radio.set_ce(false).unwrap();
        assert_eq!(radio.mode(), RadioMode::Standby);
        radio._config_reg = radio._config_reg.with_power(false);
        assert_eq!(radio.mode(), RadioMode::PoweredDown);
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn backoff_without_timeout() {
        let mocks = mk_radio(&[], &[]);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        let mut elapsed = 0;
        for _ in 0..100 {
            radio.backoff(&mut elapsed).unwrap();
        }
        assert_eq!(elapsed, 0);
        radio.tx_timeout = Some(25);
        radio.backoff(&mut elapsed).unwrap();
        radio.backoff(&mut elapsed).unwrap();
        radio.backoff(&mut elapsed).unwrap();
        assert_eq!(elapsed, 30);
        assert_eq!(radio.backoff(&mut elapsed), Err(Nrf24Error::Timeout));
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn error_taxonomy() {
        type Error = Nrf24Error<(), ()>;
        assert!(Error::Spi(()).is_bus_failure());
        assert!(Error::Gpo(()).is_bus_failure());
        assert!(Error::TxFailed.is_bus_failure());
        assert!(Error::Timeout.is_bus_failure());
        assert!(!Error::InvalidArgument.is_bus_failure());
        assert!(!Error::NotInitialized.is_bus_failure());
        assert!(!Error::AlreadyInitialized.is_bus_failure());
        assert!(!Error::VerificationFailure.is_bus_failure());
        assert_eq!(format!("{}", Error::Spi(())), "SPI error: ()");
        assert_eq!(format!("{}", Error::InvalidArgument), "invalid argument");
    }
}
