use super::{commands, limits, mnemonics, registers, Nrf24, Nrf24Error};
use crate::{
    radio::prelude::{EsbFifo, EsbPipe, EsbRadio, EsbStatus},
    StatusFlags,
};
use embedded_hal::{delay::DelayNs, digital::OutputPin, spi::SpiDevice};

/// The radio needs at least this many microseconds to settle between RX and TX modes.
const MIN_TX_DELAY_US: u32 = 130;

impl<SPI, DO, DELAY> Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    /// The number of bytes that are clocked over the SPI bus for a payload.
    ///
    /// Static payloads always use the configured payload size.
    /// Dynamic payloads use the `requested` length, limited to 32 bytes.
    fn payload_frame_len(&self, requested: usize) -> usize {
        if self._feature.dynamic_payloads() {
            requested.min(limits::MAX_PAYLOAD_SIZE as usize)
        } else {
            self._config.payload_size() as usize
        }
    }

    /// Load a payload into the TX FIFO and assert the CE pin.
    fn load_payload(
        &mut self,
        buf: &[u8],
        multicast: bool,
    ) -> Result<(), Nrf24Error<SPI::Error, DO::Error>> {
        let command = if multicast {
            commands::W_TX_PAYLOAD_NO_ACK
        } else {
            commands::W_TX_PAYLOAD
        };
        let len = self.payload_frame_len(buf.len());
        self.write_payload(command, buf, len)?;
        self.set_ce(true)
    }
}

impl<SPI, DO, DELAY> EsbRadio for Nrf24<SPI, DO, DELAY>
where
    SPI: SpiDevice,
    DO: OutputPin,
    DELAY: DelayNs,
{
    type RadioErrorType = Nrf24Error<SPI::Error, DO::Error>;

    fn start_listening(&mut self) -> Result<(), Self::RadioErrorType> {
        self.ensure_initialized()?;
        let config_reg = self._config_reg.as_rx();
        self.write_register(registers::CONFIG, config_reg.into_bits())?;
        self._config_reg = config_reg;
        self.clear_status_flags(StatusFlags::new())?;
        self.set_ce(true)?;

        // Restore the pipe0 address, if exists
        if self._pipes.is_pipe0_rx() {
            self.restore_pipe0_address(true)?;
        } else {
            self.close_reading_pipe(0)?;
        }
        #[cfg(feature = "defmt")]
        defmt::trace!("listening");
        Ok(())
    }

    fn stop_listening(&mut self) -> Result<(), Self::RadioErrorType> {
        self.ensure_initialized()?;
        self.set_ce(false)?;

        self._delay_impl.delay_us(self.tx_delay.max(MIN_TX_DELAY_US));
        if self._feature.ack_payloads() {
            self.flush_tx()?;
        }

        let config_reg = self._config_reg.as_tx();
        self.write_register(registers::CONFIG, config_reg.into_bits())?;
        self._config_reg = config_reg;

        self.restore_pipe0_address(false)?;
        self.enable_pipe0_for_ack()?;
        #[cfg(feature = "defmt")]
        defmt::trace!("stopped listening");
        Ok(())
    }

    fn is_listening(&self) -> bool {
        self._config_reg.is_rx()
    }

    /// See [`EsbRadio::write()`] for implementation-agnostic detail.
    /// Remember, the nRF24L01's active TX mode is activated by the nRF24L01's CE pin.
    ///
    /// <div class="warning">
    ///
    /// To transmit a payload the radio's CE pin must be active for at least 10 microseconds.
    /// The caller is required to ensure the CE pin has been active for at least 10
    /// microseconds when using this function, thus non-blocking behavior.
    ///
    /// </div>
    fn write(&mut self, buf: &[u8], multicast: bool) -> Result<(), Self::RadioErrorType> {
        self.ensure_initialized()?;
        if buf.is_empty() {
            return Err(Nrf24Error::InvalidArgument);
        }
        self.load_payload(buf, multicast)
    }

    /// This function refreshes the STATUS byte until there is room in the TX FIFO.
    /// If [`Nrf24::tx_timeout`] is [`None`], then this can spin forever on a radio
    /// that has stopped transmitting.
    fn fast_write(&mut self, buf: &[u8], multicast: bool) -> Result<(), Self::RadioErrorType> {
        self.ensure_initialized()?;
        if buf.is_empty() {
            return Err(Nrf24Error::InvalidArgument);
        }
        let mut elapsed = 0;
        loop {
            self.update()?;
            if !self._status.tx_full() {
                break;
            }
            if self._status.tx_df() {
                #[cfg(feature = "defmt")]
                defmt::warn!("max retries reached while TX FIFO is full");
                return Err(Nrf24Error::TxFailed);
            }
            self.backoff(&mut elapsed)?;
        }
        self.load_payload(buf, multicast)
    }

    /// See [`EsbRadio::send()`] for implementation-agnostic detail.
    ///
    /// Upon exit, the CE pin is inactive and the `tx_ds` and `tx_df` flags are cleared.
    /// A failed payload is flushed from the TX FIFO.
    fn send(&mut self, buf: &[u8], multicast: bool) -> Result<bool, Self::RadioErrorType> {
        self.write(buf, multicast)?;
        let mut elapsed = 0;
        // now block until we get a tx_ds or tx_df event
        loop {
            self.update()?;
            if self._status.into_bits() & (mnemonics::MASK_MAX_RT | mnemonics::MASK_TX_DS) != 0 {
                break;
            }
            self.backoff(&mut elapsed)?;
        }
        let failed = self._status.tx_df();
        self.set_ce(false)?;
        self.clear_status_flags(StatusFlags::default().with_tx_ds(true).with_tx_df(true))?;
        if failed {
            self.flush_tx()?;
            return Ok(false);
        }
        Ok(true)
    }

    /// See [`EsbRadio::read()`] for implementation-agnostic detail.
    ///
    /// With static payloads, the entire payload (as configured by
    /// [`EsbPayloadLength::set_payload_size()`](fn@crate::radio::prelude::EsbPayloadLength::set_payload_size))
    /// is always fetched from the RX FIFO, but only `len` bytes are stored in `buf`.
    ///
    /// With dynamic payloads, `len` bytes (up to 32) are fetched. Nothing is
    /// sent over the SPI bus if `len` is 0.
    /// Use [`EsbPayloadLength::get_dynamic_payload_length()`](fn@crate::radio::prelude::EsbPayloadLength::get_dynamic_payload_length)
    /// to get the length of the next available payload.
    fn read(&mut self, buf: &mut [u8], len: u8) -> Result<u8, Self::RadioErrorType> {
        self.ensure_initialized()?;
        let frame_len = self.payload_frame_len(len as usize);
        if frame_len == 0 && self._feature.dynamic_payloads() {
            return Ok(0);
        }
        let buf_len = buf.len().min(len as usize).min(frame_len);
        let data = self.read_register_block(commands::R_RX_PAYLOAD, frame_len)?;
        buf[..buf_len].copy_from_slice(&data[..buf_len]);
        self.clear_status_flags(StatusFlags::default().with_rx_dr(true))?;
        Ok(buf_len as u8)
    }
}
