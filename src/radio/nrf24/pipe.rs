use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

use crate::radio::{prelude::EsbPipe, Nrf24, Nrf24Error};

use super::{limits, registers};

/// The address and state of a single RX pipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeEntry {
    address: [u8; 5],
    enabled: bool,
}

impl PipeEntry {
    /// The pipe's address.
    ///
    /// For pipes 2-5, only the first byte is meaningful because
    /// the remaining bytes are shared with pipe 1.
    pub fn address(&self) -> &[u8; 5] {
        &self.address
    }

    /// Is the pipe open for receiving?
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Bookkeeping about the radio's 6 RX pipes and the TX address.
///
/// Pipe 0 is special: its address register is shared by RX and TX operations.
/// Both addresses are cached here, so the correct one can be restored when
/// the radio enters or exits RX mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PipeTable {
    pipes: [PipeEntry; 6],
    tx_address: [u8; 5],
    pipe0_is_rx: bool,
}

impl Default for PipeTable {
    /// The radio's power-on-reset state.
    ///
    /// | pipe number | state  | address     |
    /// |-------------|--------|-------------|
    /// |      0      | open   | `[0xE7; 5]` |
    /// |      1      | open   | `[0xC2; 5]` |
    /// |      2      | closed | `0xC3`      |
    /// |      3      | closed | `0xC4`      |
    /// |      4      | closed | `0xC5`      |
    /// |      5      | closed | `0xC6`      |
    ///
    /// The TX address is `[0xE7; 5]`.
    fn default() -> Self {
        let mut pipes = [PipeEntry {
            address: [0xC2; 5],
            enabled: false,
        }; 6];
        pipes[0] = PipeEntry {
            address: [0xE7; 5],
            enabled: true,
        };
        pipes[1].enabled = true;
        for (pipe, entry) in pipes.iter_mut().enumerate().skip(2) {
            entry.address[0] = 0xC1 + pipe as u8;
        }
        Self {
            pipes,
            tx_address: [0xE7; 5],
            pipe0_is_rx: false,
        }
    }
}

impl PipeTable {
    /// Get the entry for a `pipe` in range [0, 5].
    pub fn get(&self, pipe: u8) -> Option<&PipeEntry> {
        self.pipes.get(pipe as usize)
    }

    /// The cached TX address (also used by pipe 0 when not listening).
    pub fn tx_address(&self) -> &[u8; 5] {
        &self.tx_address
    }

    /// Was pipe 0 opened for receiving?
    ///
    /// If so, its RX address is restored every time the radio starts listening.
    pub fn is_pipe0_rx(&self) -> bool {
        self.pipe0_is_rx
    }

    fn open(&mut self, pipe: u8, address: &[u8]) {
        let entry = &mut self.pipes[pipe as usize];
        let len = address.len().min(5);
        entry.address[..len].copy_from_slice(&address[..len]);
        entry.enabled = true;
        if pipe == 0 {
            self.pipe0_is_rx = true;
        }
    }

    fn close(&mut self, pipe: u8) {
        self.pipes[pipe as usize].enabled = false;
        if pipe == 0 {
            self.pipe0_is_rx = false;
        }
    }

    fn set_tx_address(&mut self, address: &[u8]) {
        let len = address.len().min(5);
        self.tx_address[..len].copy_from_slice(&address[..len]);
    }

    fn clear_tx_address(&mut self) {
        self.tx_address = [0; 5];
    }
}

impl<SPI, DO, DELAY> Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// Set or clear a bit in the EN_RXADDR register.
    fn set_rx_pipe_enabled(
        &mut self,
        pipe: u8,
        enable: bool,
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let mask = 1 << pipe;
        let reg_val = self.read_register(registers::EN_RXADDR)?;
        self.write_register(registers::EN_RXADDR, reg_val & !mask | (mask * enable as u8))
    }

    /// Write the cached address of pipe 0 (RX or TX, whichever applies to the
    /// current mode) to the radio.
    pub(super) fn restore_pipe0_address(
        &mut self,
        as_rx: bool,
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let width = self._config.address_width() as usize;
        let address = if as_rx {
            self._pipes.pipes[0].address
        } else {
            self._pipes.tx_address
        };
        if !as_rx {
            self.write_register_block(registers::TX_ADDR, &address[..width])?;
        }
        self.write_register_block(registers::RX_ADDR_P0, &address[..width])
    }

    /// Pipe 0 must be open in TX mode to receive auto-ack packets.
    pub(super) fn enable_pipe0_for_ack(&mut self) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        self.set_rx_pipe_enabled(0, true)?;
        self._pipes.pipes[0].enabled = true;
        Ok(())
    }
}

impl<SPI, DO, DELAY> EsbPipe for Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type PipeErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn open_reading_pipe(&mut self, pipe: u8, address: &[u8]) -> Result<(), Self::PipeErrorType> {
        let width = self._config.address_width() as usize;
        if pipe > limits::MAX_PIPE
            || address.is_empty()
            || (pipe < 2 && address.len() < width)
        {
            return Err(Nrf24Error::InvalidArgument);
        }

        match pipe {
            // pipe 0 shares its address with TX operations.
            // The cached address is written by start_listening() if not already listening.
            0 => {
                if self._config_reg.is_rx() {
                    self.write_register_block(registers::RX_ADDR_P0, &address[..width])?;
                }
            }
            1 => self.write_register_block(registers::RX_ADDR_P0 + 1, &address[..width])?,
            // For pipes 2-5, only write the LSB
            _ => self.write_register(registers::RX_ADDR_P0 + pipe, address[0])?,
        }
        self.set_rx_pipe_enabled(pipe, true)?;
        let len = if pipe < 2 { width } else { 1 };
        self._pipes.open(pipe, &address[..len]);
        #[cfg(feature = "defmt")]
        defmt::trace!("opened RX pipe {}", pipe);
        Ok(())
    }

    fn open_writing_pipe(&mut self, address: &[u8]) -> Result<(), Self::PipeErrorType> {
        let width = self._config.address_width() as usize;
        if address.len() < width {
            return Err(Nrf24Error::InvalidArgument);
        }
        self.write_register_block(registers::TX_ADDR, &address[..width])?;
        self.write_register_block(registers::RX_ADDR_P0, &address[..width])?;
        self._pipes.set_tx_address(&address[..width]);
        Ok(())
    }

    fn close_writing_pipe(&mut self) -> Result<(), Self::PipeErrorType> {
        let width = self._config.address_width() as usize;
        let null_address = [0u8; 5];
        self.write_register_block(registers::TX_ADDR, &null_address[..width])?;
        // in RX mode, RX_ADDR_P0 belongs to pipe 0's RX address
        if !self._config_reg.is_rx() {
            self.write_register_block(registers::RX_ADDR_P0, &null_address[..width])?;
        }
        self._pipes.clear_tx_address();
        #[cfg(feature = "defmt")]
        defmt::trace!("closed TX pipe");
        Ok(())
    }

    fn close_reading_pipe(&mut self, pipe: u8) -> Result<(), Self::PipeErrorType> {
        if pipe > limits::MAX_PIPE {
            return Err(Nrf24Error::InvalidArgument);
        }
        self.set_rx_pipe_enabled(pipe, false)?;
        self._pipes.close(pipe);
        #[cfg(feature = "defmt")]
        defmt::trace!("closed RX pipe {}", pipe);
        Ok(())
    }

    fn set_address_width(&mut self, width: u8) -> Result<(), Self::PipeErrorType> {
        if !(limits::MIN_ADDRESS_WIDTH..=limits::MAX_ADDRESS_WIDTH).contains(&width) {
            return Err(Nrf24Error::InvalidArgument);
        }
        self.write_register(registers::SETUP_AW, width - 2)?;
        self._config = self._config.with_address_width(width);
        Ok(())
    }

    fn get_address_width(&mut self) -> Result<u8, Self::PipeErrorType> {
        let reg_val = self.read_register(registers::SETUP_AW)? & 3;
        if reg_val == 0 {
            // the "illegal" value
            return Err(Nrf24Error::VerificationFailure);
        }
        Ok(reg_val + 2)
    }

    fn get_rx_address(&mut self, pipe: u8, address: &mut [u8]) -> Result<u8, Self::PipeErrorType> {
        if pipe > limits::MAX_PIPE {
            return Err(Nrf24Error::InvalidArgument);
        }
        let width = if pipe < 2 {
            self._config.address_width() as usize
        } else {
            1
        };
        let len = address.len().min(width);
        let data = self.read_register_block(registers::RX_ADDR_P0 + pipe, width)?;
        address[..len].copy_from_slice(&data[..len]);
        Ok(len as u8)
    }

    fn get_tx_address(&mut self, address: &mut [u8]) -> Result<u8, Self::PipeErrorType> {
        let width = self._config.address_width() as usize;
        let len = address.len().min(width);
        let data = self.read_register_block(registers::TX_ADDR, width)?;
        address[..len].copy_from_slice(&data[..len]);
        Ok(len as u8)
    }
}
