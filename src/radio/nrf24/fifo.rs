use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::radio::{prelude::EsbFifo, Nrf24, Nrf24Error};
use crate::FifoState;

use super::{commands, mnemonics, registers};

impl<SPI, DO, DELAY> EsbFifo for Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type FifoErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn available(&mut self) -> Result<bool, Self::FifoErrorType> {
        let reg_val = self.read_register(registers::FIFO_STATUS)?;
        Ok(reg_val & mnemonics::RX_EMPTY == 0)
    }

    /// The pipe number is taken from the STATUS byte of the same SPI transaction
    /// that read the FIFO_STATUS register.
    fn available_pipe(&mut self, pipe: &mut u8) -> Result<bool, Self::FifoErrorType> {
        if self.available()? {
            *pipe = self._status.rx_pipe();
            return Ok(true);
        }
        Ok(false)
    }

    /// Use this to discard all 3 layers in the radio's RX FIFO.
    fn flush_rx(&mut self) -> Result<(), Self::FifoErrorType> {
        self.command(commands::FLUSH_RX)
    }

    /// Use this to discard all 3 layers in the radio's TX FIFO.
    fn flush_tx(&mut self) -> Result<(), Self::FifoErrorType> {
        self.command(commands::FLUSH_TX)
    }

    /// A FIFO that reports both full and empty is
    /// reported as [`Nrf24Error::VerificationFailure`].
    fn get_fifo_state(&mut self, about_tx: bool) -> Result<FifoState, Self::FifoErrorType> {
        let offset = about_tx as u8 * 4;
        let status = (self.read_register(registers::FIFO_STATUS)? >> offset) & 3;
        match status {
            0 => Ok(FifoState::Occupied),
            1 => Ok(FifoState::Empty),
            2 => Ok(FifoState::Full),
            _ => Err(Nrf24Error::VerificationFailure),
        }
    }
}
