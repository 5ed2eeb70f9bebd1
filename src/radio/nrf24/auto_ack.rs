use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::radio::{
    prelude::{EsbAutoAck, EsbPayloadLength},
    Nrf24, Nrf24Error,
};

use super::{bit_fields::SetupRetry, commands, limits, mnemonics, registers};

impl<SPI, DO, DELAY> EsbAutoAck for Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type AutoAckErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn set_ack_payload(&mut self, enable: bool) -> Result<(), Self::AutoAckErrorType> {
        if enable {
            self.set_dynamic_payload_length(true)?;
        }
        let feature = self._feature.with_ack_payloads(enable);
        self.write_register(registers::FEATURE, feature.into_bits())?;
        self._feature = feature;
        self._config = self._config.with_ack_payloads(enable);
        Ok(())
    }

    fn get_ack_payload(&self) -> bool {
        self._feature.ack_payloads()
    }

    fn set_auto_ack(&mut self, enable: bool) -> Result<(), Self::AutoAckErrorType> {
        self.write_register(registers::EN_AA, mnemonics::ALL_PIPES * enable as u8)?;
        self._config = self._config.with_auto_ack(enable);
        if !enable {
            // dynamic payloads (and ACK payloads with them) can't work without auto-ack
            self.set_dynamic_payload_length(false)?;
        }
        Ok(())
    }

    fn get_auto_ack(&self) -> bool {
        self._config.auto_ack()
    }

    fn write_ack_payload(&mut self, pipe: u8, buf: &[u8]) -> Result<bool, Self::AutoAckErrorType> {
        if pipe > limits::MAX_PIPE || buf.is_empty() {
            return Err(Nrf24Error::InvalidArgument);
        }
        if !self._feature.ack_payloads() {
            return Ok(false);
        }
        self.write_payload(commands::W_ACK_PAYLOAD | pipe, buf, buf.len())?;
        Ok(!self._status.tx_full())
    }

    fn set_retries(&mut self, delay: u8, count: u8) -> Result<(), Self::AutoAckErrorType> {
        if delay > limits::MAX_RETRY_VALUE || count > limits::MAX_RETRY_VALUE {
            return Err(Nrf24Error::InvalidArgument);
        }
        let setup_retry = SetupRetry::new().with_ard(delay).with_arc(count);
        self.write_register(registers::SETUP_RETR, setup_retry.into_bits())?;
        self._config = self._config.with_retries(delay, count);
        Ok(())
    }

    fn set_dynamic_ack(&mut self, enable: bool) -> Result<(), Self::AutoAckErrorType> {
        let feature = self._feature.with_dynamic_ack(enable);
        self.write_register(registers::FEATURE, feature.into_bits())?;
        self._feature = feature;
        self._config = self._config.with_dynamic_ack(enable);
        Ok(())
    }

    fn get_dynamic_ack(&self) -> bool {
        self._feature.dynamic_ack()
    }
}
