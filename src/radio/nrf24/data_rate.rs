use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::registers;
use crate::radio::{prelude::EsbDataRate, Nrf24, Nrf24Error};
use crate::DataRate;

/// A function to get the [`Nrf24::tx_delay`] in accordance with the desired [`DataRate`].
pub(super) fn tx_delay_for(data_rate: DataRate) -> u32 {
    match data_rate {
        DataRate::Mbps1 => 280,
        DataRate::Mbps2 => 240,
        DataRate::Kbps250 => 505,
    }
}

impl<SPI, DO, DELAY> EsbDataRate for Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type DataRateErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn get_data_rate(&mut self) -> Result<DataRate, Self::DataRateErrorType> {
        let reg_val = self.read_register(registers::RF_SETUP)?;
        DataRate::from_bits(reg_val).ok_or(Nrf24Error::VerificationFailure)
    }

    /// The new value is read back from the radio. A mismatch results in
    /// [`Nrf24Error::VerificationFailure`] (and [`Nrf24::tx_delay`] is left as is).
    fn set_data_rate(&mut self, data_rate: DataRate) -> Result<(), Self::DataRateErrorType> {
        let da_bin = data_rate.into_bits();
        let reg_val = self.read_register(registers::RF_SETUP)?;
        self.write_register(registers::RF_SETUP, reg_val & !DataRate::MASK | da_bin)?;
        if self.read_register(registers::RF_SETUP)? & DataRate::MASK != da_bin {
            #[cfg(feature = "defmt")]
            defmt::warn!("data rate bits did not stick");
            return Err(Nrf24Error::VerificationFailure);
        }
        self.tx_delay = tx_delay_for(data_rate);
        self._config = self._config.with_data_rate(data_rate);
        Ok(())
    }
}
