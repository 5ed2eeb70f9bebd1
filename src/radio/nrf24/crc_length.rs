use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::registers;
use crate::radio::{prelude::EsbCrcLength, Nrf24, Nrf24Error};
use crate::CrcLength;

impl<SPI, DO, DELAY> EsbCrcLength for Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type CrcLengthErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn get_crc_length(&mut self) -> Result<CrcLength, Self::CrcLengthErrorType> {
        let reg_val = self.read_register(registers::CONFIG)?;
        CrcLength::from_bits(reg_val).ok_or(Nrf24Error::VerificationFailure)
    }

    /// This uses the cached CONFIG register value, so it doesn't
    /// disturb the radio's power state nor its RX/TX role.
    fn set_crc_length(&mut self, crc_length: CrcLength) -> Result<(), Self::CrcLengthErrorType> {
        let config_reg = self._config_reg.with_crc_length(crc_length);
        self.write_register(registers::CONFIG, config_reg.into_bits())?;
        self._config_reg = config_reg;
        self._config = self._config.with_crc_length(crc_length);
        Ok(())
    }
}
