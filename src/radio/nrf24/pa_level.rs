use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::registers;
use crate::radio::{prelude::EsbPaLevel, Nrf24, Nrf24Error};
use crate::PaLevel;

/// The RF_PWR bits and the LNA_HCURR bit of the RF_SETUP register.
const PA_LNA_MASK: u8 = 7;

impl<SPI, DO, DELAY> EsbPaLevel for Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type PaLevelErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn get_pa_level(&mut self) -> Result<PaLevel, Self::PaLevelErrorType> {
        let reg_val = self.read_register(registers::RF_SETUP)?;
        Ok(PaLevel::from_bits(reg_val))
    }

    /// The `lna_enable` parameter has no effect on nRF24L01+ modules and PA/LNA
    /// variants because the LNA feature is always enabled.
    fn set_pa_level(
        &mut self,
        pa_level: PaLevel,
        lna_enable: bool,
    ) -> Result<(), Self::PaLevelErrorType> {
        let pa_bin = pa_level.into_bits() | lna_enable as u8;
        let reg_val = self.read_register(registers::RF_SETUP)?;
        self.write_register(registers::RF_SETUP, reg_val & !PA_LNA_MASK | pa_bin)?;
        self._config = self
            ._config
            .with_pa_level(pa_level)
            .with_lna_enable(lna_enable);
        Ok(())
    }
}
