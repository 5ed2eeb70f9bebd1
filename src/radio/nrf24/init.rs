use super::{bit_fields::Feature, mnemonics, registers, Nrf24, Nrf24Error};
use crate::{
    radio::{
        prelude::{
            EsbAutoAck, EsbChannel, EsbCrcLength, EsbDataRate, EsbFifo, EsbInit, EsbPaLevel,
            EsbPayloadLength, EsbPipe, EsbPower, EsbStatus,
        },
        RadioConfig,
    },
    ChipVariant, CrcLength, StatusFlags,
};
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

impl<SPI, DO, DELAY> Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Detect the chip variant using the `ACTIVATE` command.
    ///
    /// The FEATURE register of older non-plus modules is locked until
    /// `ACTIVATE` is sent, whereas plus variants ignore that command.
    fn detect_variant(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let before_toggle = self.read_register(registers::FEATURE)?;
        self.toggle_features()?;
        let after_toggle = self.read_register(registers::FEATURE)?;
        let is_plus_variant = before_toggle == after_toggle;
        self._variant = if is_plus_variant {
            ChipVariant::Nrf24l01Plus
        } else {
            ChipVariant::Nrf24l01
        };

        if after_toggle != 0 {
            if is_plus_variant {
                // module did not experience a power-on-reset
                self.toggle_features()?;
            }
            self.write_register(registers::FEATURE, 0)?;
            self._feature = Feature::from_bits(0);
        } else if after_toggle < before_toggle {
            // Non-plus chip whose FEATURE register was unlocked before the MCU reset:
            // the first toggle locked it (reads 0), the second unlocks it again.
            // Still at most two toggles. FEATURE ends unlocked and reset_registers()
            // zeroes it.
            self.toggle_features()?;
        }
        #[cfg(feature = "defmt")]
        defmt::debug!("detected plus variant: {}", is_plus_variant);
        Ok(())
    }

    /// Put the radio in a known state, regardless of what it was doing before
    /// the MCU reset.
    fn reset_registers(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.set_dynamic_payload_length(false)?;
        self.set_auto_ack(true)?;
        self.set_payload_size(32)?;
        self.set_address_width(5)?;
        self.set_channel(76)?;
        self.clear_status_flags(StatusFlags::new())?;
        self.flush_rx()?;
        self.flush_tx()?;
        self.set_crc_length(CrcLength::Bit16)?;
        self.power_up()
    }

    /// Apply the parts of a `config` that don't affect the chip's reset sequence.
    ///
    /// Features with dependencies are applied last, so that enabling
    /// ACK payloads also leaves dynamic payloads and auto-ack enabled.
    fn apply_config(
        &mut self,
        config: &RadioConfig,
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.set_address_width(config.address_width())?;
        self.set_payload_size(config.payload_size())?;
        self.set_channel(config.channel())?;
        self.set_crc_length(config.crc_length())?;
        self.set_pa_level(config.pa_level(), config.lna_enable())?;
        self.set_auto_ack(config.auto_ack())?;
        self.set_dynamic_payload_length(config.dynamic_payloads())?;
        self.set_ack_payload(config.ack_payloads())?;
        self.set_dynamic_ack(config.dynamic_ack())
    }
}

impl<SPI, DO, DELAY> EsbInit for Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type ConfigErrorType = Nrf24Error<SPI::Error, DO::Error>;

    /// Initialize the radio's hardware using the [`SpiDevice`] and [`OutputPin`] given
    /// to [`Nrf24::new()`].
    ///
    /// Nothing is sent over the SPI bus if the radio is already initialized or
    /// if the `config` is invalid (see [`RadioConfig::is_valid()`]).
    fn init(&mut self, config: &RadioConfig) -> Result<(), Self::ConfigErrorType> {
        if self._initialized {
            return Err(Nrf24Error::AlreadyInitialized);
        }
        if !config.is_valid() {
            return Err(Nrf24Error::InvalidArgument);
        }
        self.set_ce(false)?;

        // Must allow the radio time to settle else configuration bits will not necessarily stick.
        // Technically we require 4.5ms + 14us as a worst case.
        self._delay_impl.delay_ms(5);

        self.set_retries(config.retry_delay(), config.retry_count())?;
        self.set_data_rate(config.data_rate())?;
        self.detect_variant()?;
        self.reset_registers()?;

        let config_reg = self.read_register(registers::CONFIG)?;
        if config_reg != mnemonics::CONFIG_AFTER_INIT {
            #[cfg(feature = "defmt")]
            defmt::warn!("unexpected CONFIG register value: {=u8:#x}", config_reg);
            return Err(Nrf24Error::VerificationFailure);
        }

        self.apply_config(config)?;
        self._initialized = true;
        #[cfg(feature = "defmt")]
        defmt::debug!("radio initialized");
        Ok(())
    }

    fn with_config(&mut self, config: &RadioConfig) -> Result<(), Self::ConfigErrorType> {
        if !config.is_valid() {
            return Err(Nrf24Error::InvalidArgument);
        }
        self.set_retries(config.retry_delay(), config.retry_count())?;
        self.set_data_rate(config.data_rate())?;
        self.apply_config(config)
    }

    fn is_connected(&mut self) -> Result<bool, Self::ConfigErrorType> {
        self.ensure_initialized()?;
        let setup_aw = self.read_register(registers::SETUP_AW)?;
        Ok(setup_aw == self._config.address_width() - 2)
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{mnemonics::CONFIG_AFTER_INIT, registers, EsbInit};
    use crate::{
        radio::{nrf24::commands, Nrf24Error, RadioConfig},
        spi_test_expects,
        test::mk_radio,
        ChipVariant, CrcLength, DataRate, RadioMode,
    };
    use embedded_hal_mock::eh1::{
        digital::{State as PinState, Transaction as PinTransaction},
        spi::Transaction as SpiTransaction,
    };
    use std::{vec, vec::Vec};

    fn write_reg(register: u8, value: u8) -> Vec<SpiTransaction<u8>> {
        spi_test_expects![(
            vec![register | commands::W_REGISTER, value],
            vec![0xEu8, 0u8],
        ),]
        .to_vec()
    }

    fn read_reg(register: u8, value: u8) -> Vec<SpiTransaction<u8>> {
        spi_test_expects![(vec![register, 0xFFu8], vec![0xEu8, value]),].to_vec()
    }

    fn command(cmd: u8) -> Vec<SpiTransaction<u8>> {
        spi_test_expects![(vec![cmd], vec![0xEu8]),].to_vec()
    }

    fn activate() -> Vec<SpiTransaction<u8>> {
        spi_test_expects![(vec![commands::ACTIVATE, 0x73u8], vec![0xEu8, 0u8]),].to_vec()
    }

    /// The bus traffic of `init(&RadioConfig::default())`.
    ///
    /// The FEATURE register reads `before` and `after` the first `ACTIVATE`
    /// command. The CONFIG register reads `config_reg` after the reset sequence.
    fn init_expectations(before: u8, after: u8, config_reg: u8) -> Vec<SpiTransaction<u8>> {
        let mut expected = Vec::new();
        // set_retries(5, 15)
        expected.extend(write_reg(registers::SETUP_RETR, 0x5F));
        // set_data_rate(1 Mbps) from the power-on-reset value (2 Mbps)
        expected.extend(read_reg(registers::RF_SETUP, 0x0F));
        expected.extend(write_reg(registers::RF_SETUP, 0x07));
        expected.extend(read_reg(registers::RF_SETUP, 0x07));

        // variant detection
        expected.extend(read_reg(registers::FEATURE, before));
        expected.extend(activate());
        expected.extend(read_reg(registers::FEATURE, after));
        if after != 0 {
            if before == after {
                expected.extend(activate());
            }
            expected.extend(write_reg(registers::FEATURE, 0));
        } else if after < before {
            expected.extend(activate());
        }

        // reset sequence
        expected.extend(write_reg(registers::FEATURE, 0));
        expected.extend(write_reg(registers::DYNPD, 0));
        expected.extend(write_reg(registers::EN_AA, 0x3F));
        for pipe in 0..6 {
            expected.extend(write_reg(registers::RX_PW_P0 + pipe, 32));
        }
        expected.extend(write_reg(registers::SETUP_AW, 3));
        expected.extend(write_reg(registers::RF_CH, 76));
        expected.extend(write_reg(registers::STATUS, 0x70));
        expected.extend(command(commands::FLUSH_RX));
        expected.extend(command(commands::FLUSH_TX));
        // 16 bit CRC, then power up
        expected.extend(write_reg(registers::CONFIG, 0x0C));
        expected.extend(write_reg(registers::CONFIG, 0x0E));
        expected.extend(read_reg(registers::CONFIG, config_reg));
        if config_reg != CONFIG_AFTER_INIT {
            return expected;
        }

        // apply the given config
        expected.extend(write_reg(registers::SETUP_AW, 3));
        for pipe in 0..6 {
            expected.extend(write_reg(registers::RX_PW_P0 + pipe, 32));
        }
        expected.extend(write_reg(registers::RF_CH, 76));
        expected.extend(write_reg(registers::CONFIG, 0x0E));
        // PA level min with LNA enabled
        expected.extend(read_reg(registers::RF_SETUP, 0x07));
        expected.extend(write_reg(registers::RF_SETUP, 0x01));
        expected.extend(write_reg(registers::EN_AA, 0x3F));
        expected.extend(write_reg(registers::FEATURE, 0));
        expected.extend(write_reg(registers::DYNPD, 0));
        // ACK payloads and dynamic ACK
        expected.extend(write_reg(registers::FEATURE, 0));
        expected.extend(write_reg(registers::FEATURE, 0));
        expected
    }

    #[test]
    fn init_plus_variant_without_por() {
        let ce_expectations = [PinTransaction::set(PinState::Low)];
        let spi_expectations = init_expectations(5, 5, CONFIG_AFTER_INIT);
        let mocks = mk_radio(&ce_expectations, &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.init(&RadioConfig::default()).unwrap();
        assert!(radio.is_initialized());
        assert!(radio.is_plus_variant());
        assert_eq!(radio.mode(), RadioMode::Standby);
        assert_eq!(radio.config(), &RadioConfig::default());
        assert_eq!(radio.tx_delay, 280);
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn init_plus_variant_after_por() {
        let ce_expectations = [PinTransaction::set(PinState::Low)];
        let spi_expectations = init_expectations(0, 0, CONFIG_AFTER_INIT);
        let mocks = mk_radio(&ce_expectations, &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.init(&RadioConfig::default()).unwrap();
        assert_eq!(radio.variant(), ChipVariant::Nrf24l01Plus);
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn init_non_plus_variant() {
        let ce_expectations = [PinTransaction::set(PinState::Low)];
        // FEATURE was unlocked before the MCU reset, so the first ACTIVATE locks it
        // and a second ACTIVATE is expected to unlock it again
        let spi_expectations = init_expectations(5, 0, CONFIG_AFTER_INIT);
        let mocks = mk_radio(&ce_expectations, &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        radio.init(&RadioConfig::default()).unwrap();
        assert_eq!(radio.variant(), ChipVariant::Nrf24l01);
        assert!(!radio.is_plus_variant());
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn init_config_verification() {
        let ce_expectations = [PinTransaction::set(PinState::Low)];
        // all bits read as 1 when the radio is disconnected
        let spi_expectations = init_expectations(0, 0, 0xFF);
        let mocks = mk_radio(&ce_expectations, &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert_eq!(
            radio.init(&RadioConfig::default()),
            Err(Nrf24Error::VerificationFailure)
        );
        assert!(!radio.is_initialized());
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn init_guards() {
        let mocks = mk_radio(&[], &[]);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        let config = RadioConfig::default().with_channel(126);
        assert_eq!(radio.init(&config), Err(Nrf24Error::InvalidArgument));
        assert_eq!(radio.with_config(&config), Err(Nrf24Error::InvalidArgument));
        radio._initialized = true;
        assert_eq!(
            radio.init(&RadioConfig::default()),
            Err(Nrf24Error::AlreadyInitialized)
        );
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn with_config_dependencies() {
        let mut spi_expectations = write_reg(registers::SETUP_RETR, 0x23);
        // set_data_rate(250 Kbps)
        spi_expectations.extend(read_reg(registers::RF_SETUP, 0x07));
        spi_expectations.extend(write_reg(registers::RF_SETUP, 0x27));
        spi_expectations.extend(read_reg(registers::RF_SETUP, 0x27));
        spi_expectations.extend(write_reg(registers::SETUP_AW, 1));
        for pipe in 0..6 {
            spi_expectations.extend(write_reg(registers::RX_PW_P0 + pipe, 8));
        }
        spi_expectations.extend(write_reg(registers::RF_CH, 42));
        // 8 bit CRC (powered down)
        spi_expectations.extend(write_reg(registers::CONFIG, 0x08));
        spi_expectations.extend(read_reg(registers::RF_SETUP, 0x27));
        spi_expectations.extend(write_reg(registers::RF_SETUP, 0x21));
        // set_auto_ack(false) also disables dynamic payloads and ACK payloads
        spi_expectations.extend(write_reg(registers::EN_AA, 0));
        spi_expectations.extend(write_reg(registers::FEATURE, 0));
        spi_expectations.extend(write_reg(registers::DYNPD, 0));
        // set_dynamic_payload_length(false)
        spi_expectations.extend(write_reg(registers::FEATURE, 0));
        spi_expectations.extend(write_reg(registers::DYNPD, 0));
        // set_ack_payload(true) re-enables dynamic payloads and auto-ack
        spi_expectations.extend(write_reg(registers::EN_AA, 0x3F));
        spi_expectations.extend(write_reg(registers::FEATURE, 4));
        spi_expectations.extend(write_reg(registers::DYNPD, 0x3F));
        spi_expectations.extend(write_reg(registers::FEATURE, 6));
        // set_dynamic_ack(true)
        spi_expectations.extend(write_reg(registers::FEATURE, 7));

        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        let config = RadioConfig::default()
            .with_retries(2, 3)
            .with_data_rate(DataRate::Kbps250)
            .with_address_width(3)
            .with_payload_size(8)
            .with_channel(42)
            .with_crc_length(CrcLength::Bit8)
            .with_auto_ack(false)
            .with_ack_payloads(true)
            .with_dynamic_ack(true);
        radio.with_config(&config).unwrap();
        assert_eq!(radio.tx_delay, 505);
        let applied = radio.config();
        assert!(applied.auto_ack());
        assert!(applied.dynamic_payloads());
        assert!(applied.ack_payloads());
        assert!(applied.dynamic_ack());
        assert_eq!(applied.channel(), 42);
        assert_eq!(applied.address_width(), 3);
        spi.done();
        ce_pin.done();
    }

    #[test]
    fn is_connected() {
        let mut spi_expectations = read_reg(registers::SETUP_AW, 3);
        spi_expectations.extend(read_reg(registers::SETUP_AW, 0));
        let mocks = mk_radio(&[], &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert_eq!(radio.is_connected(), Err(Nrf24Error::NotInitialized));
        radio._initialized = true;
        assert!(radio.is_connected().unwrap());
        assert!(!radio.is_connected().unwrap());
        spi.done();
        ce_pin.done();
    }
}
