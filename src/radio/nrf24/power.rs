use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::radio::{prelude::EsbPower, Nrf24, Nrf24Error};

use super::registers;

impl<SPI, DO, DELAY> EsbPower for Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type PowerErrorType = Nrf24Error<SPI::Error, DO::Error>;

    /// In full power down mode (a sleep state), the radio will consume approximately
    /// 900nA (.0009mA).
    fn power_down(&mut self) -> Result<(), Self::PowerErrorType> {
        self.set_ce(false)?; // Guarantee CE is low on powerDown
        let config_reg = self._config_reg.with_power(false);
        self.write_register(registers::CONFIG, config_reg.into_bits())?;
        self._config_reg = config_reg;
        #[cfg(feature = "defmt")]
        defmt::debug!("radio powered down");
        Ok(())
    }

    fn power_up(&mut self) -> Result<(), Self::PowerErrorType> {
        // if not powered up then power up and wait for the radio to initialize
        if self._config_reg.power() {
            return Ok(());
        }
        let config_reg = self._config_reg.with_power(true);
        self.write_register(registers::CONFIG, config_reg.into_bits())?;
        self._config_reg = config_reg;

        // There must be a delay of Tpd2standby after leaving power down mode
        // before the CE is set high. Tpd2standby can be up to 5ms.
        self._delay_impl.delay_ms(5);
        #[cfg(feature = "defmt")]
        defmt::debug!("radio powered up");
        Ok(())
    }

    /// Is the radio powered up?
    fn is_powered(&self) -> bool {
        self._config_reg.power()
    }
}

/////////////////////////////////////////////////////////////////////////////////
/// unit tests
#[cfg(test)]
mod test {
    extern crate std;
    use super::{registers, EsbPower};
    use crate::radio::nrf24::commands;
    use crate::{spi_test_expects, test::mk_radio, RadioMode};
    use embedded_hal_mock::eh1::{
        digital::{State as PinState, Transaction as PinTransaction},
        spi::Transaction as SpiTransaction,
    };
    use std::vec;

    #[test]
    fn power_up_then_down() {
        let ce_expectations = [PinTransaction::set(PinState::Low)];
        let spi_expectations = spi_test_expects![
            // power_up()
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0xAu8],
                vec![0xEu8, 0u8],
            ),
            // power_down()
            (
                vec![registers::CONFIG | commands::W_REGISTER, 0x8u8],
                vec![0xEu8, 0u8],
            ),
        ];
        let mocks = mk_radio(&ce_expectations, &spi_expectations);
        let (mut radio, mut spi, mut ce_pin) = (mocks.0, mocks.1, mocks.2);
        assert_eq!(radio.mode(), RadioMode::PoweredDown);
        radio.power_up().unwrap();
        assert!(radio.is_powered());
        assert_eq!(radio.mode(), RadioMode::Standby);
        // already powered up; no SPI transaction
        radio.power_up().unwrap();
        radio.power_down().unwrap();
        assert!(!radio.is_powered());
        spi.done();
        ce_pin.done();
    }
}
