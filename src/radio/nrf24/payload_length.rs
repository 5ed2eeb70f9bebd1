use crate::radio::{
    prelude::{EsbAutoAck, EsbFifo, EsbPayloadLength},
    Nrf24, Nrf24Error,
};
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use super::{commands, limits, mnemonics, registers};

impl<SPI, DO, DELAY> EsbPayloadLength for Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type PayloadLengthErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn set_payload_size(&mut self, size: u8) -> Result<(), Self::PayloadLengthErrorType> {
        if size > limits::MAX_PAYLOAD_SIZE {
            return Err(Nrf24Error::InvalidArgument);
        }
        for i in 0..6 {
            self.write_register(registers::RX_PW_P0 + i, size)?;
        }
        self._config = self._config.with_payload_size(size);
        Ok(())
    }

    fn get_payload_size(&mut self) -> Result<u8, Self::PayloadLengthErrorType> {
        Ok(self.read_register(registers::RX_PW_P0)? & 0x3F)
    }

    fn set_dynamic_payload_length(
        &mut self,
        enable: bool,
    ) -> Result<(), Self::PayloadLengthErrorType> {
        if enable {
            // dynamic payloads require auto-ack
            self.set_auto_ack(true)?;
        }
        let feature = self._feature.with_dynamic_payloads(enable);
        self.write_register(registers::FEATURE, feature.into_bits())?;
        self._feature = feature;
        self.write_register(registers::DYNPD, mnemonics::ALL_PIPES * enable as u8)?;
        self._config = self
            ._config
            .with_dynamic_payloads(enable)
            .with_ack_payloads(feature.ack_payloads());
        Ok(())
    }

    fn get_dynamic_payloads(&self) -> bool {
        self._feature.dynamic_payloads()
    }

    /// A length greater than 32 means the RX FIFO is corrupted. In that case
    /// the RX FIFO is flushed and [`Nrf24Error::VerificationFailure`] is returned.
    fn get_dynamic_payload_length(&mut self) -> Result<u8, Self::PayloadLengthErrorType> {
        let len = self.read_register(commands::R_RX_PL_WID)?;
        if len > limits::MAX_PAYLOAD_SIZE {
            self.flush_rx()?;
            return Err(Nrf24Error::VerificationFailure);
        }
        Ok(len)
    }
}
