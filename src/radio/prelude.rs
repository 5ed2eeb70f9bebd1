//! Traits implemented by [`Nrf24`](crate::radio::Nrf24).
//!
//! Most of the driver's API is reached through these traits, so bring them
//! all into scope with a glob import.
//!
//! ```
//! use nrf24::radio::prelude::*;
//! ```

use crate::types::{CrcLength, DataRate, FifoState, PaLevel, StatusFlags};

use super::RadioConfig;

/// Address and pipe management.
pub trait EsbPipe {
    type PipeErrorType;

    /// Enable RX `pipe` and assign it an `address`.
    ///
    /// All 6 pipes may be open at the same time. Open the pipes first, then
    /// enter RX mode with [`EsbRadio::start_listening()`].
    ///
    /// An error is returned (without any bus activity) if the `pipe` is not in
    /// range [0, 5] or if the `address` is too short.
    ///
    /// ### About pipe addresses
    /// Pipes 0 and 1 will store a full address (see [`EsbPipe::set_address_width()`]).
    /// Pipes 2-5 will only store a single byte, borrowing the remaining bytes from pipe 1.
    ///
    /// So addresses of pipes 1-5 differ only in their first byte:
    /// ```ignore
    /// radio.open_reading_pipe(1, b"1Node")?;
    /// radio.open_reading_pipe(2, b"2")?; // effectively "2Node"
    /// radio.open_reading_pipe(3, b"3xxxx")?; // effectively "3Node"
    /// ```
    ///
    /// <div class="warning">
    ///
    /// Pipe 0 is shared with the TX address (see [`EsbPipe::open_writing_pipe()`]).
    /// While not listening, the address for pipe 0 is only cached. It is written
    /// to the radio at every call to [`EsbRadio::start_listening()`].
    ///
    /// </div>
    fn open_reading_pipe(&mut self, pipe: u8, address: &[u8]) -> Result<(), Self::PipeErrorType>;

    /// Set the address used for transmitting when radio is not listening.
    ///
    /// The same address is written to pipe 0 so auto-ack packets can be received.
    fn open_writing_pipe(&mut self, address: &[u8]) -> Result<(), Self::PipeErrorType>;

    /// Replace the TX address with a null (all-zero) address.
    ///
    /// While listening, pipe 0 keeps its RX address; the null address is only
    /// restored to pipe 0 by [`EsbRadio::stop_listening()`].
    fn close_writing_pipe(&mut self) -> Result<(), Self::PipeErrorType>;

    /// Disable RX `pipe`. Its address is left untouched.
    fn close_reading_pipe(&mut self, pipe: u8) -> Result<(), Self::PipeErrorType>;

    /// Set the address width (applies to all pipes).
    ///
    /// Valid values are in range [3, 5].
    fn set_address_width(&mut self, width: u8) -> Result<(), Self::PipeErrorType>;

    /// Get the currently configured address width (applied to all pipes).
    fn get_address_width(&mut self) -> Result<u8, Self::PipeErrorType>;

    /// Read the RX address of a `pipe` from the radio into `address`.
    ///
    /// Returns the number of bytes stored into `address`.
    /// Pipes 2-5 only have 1 byte of address.
    fn get_rx_address(&mut self, pipe: u8, address: &mut [u8]) -> Result<u8, Self::PipeErrorType>;

    /// Read the TX address from the radio into `address`.
    ///
    /// Returns the number of bytes stored into `address`.
    fn get_tx_address(&mut self, address: &mut [u8]) -> Result<u8, Self::PipeErrorType>;
}

/// RF channel selection.
pub trait EsbChannel {
    type ChannelErrorType;

    /// Tune the radio to `channel`, in range [0, 125].
    ///
    /// The carrier is `2400 + channel` MHz. After a reset the chip uses channel 76.
    fn set_channel(&mut self, channel: u8) -> Result<(), Self::ChannelErrorType>;

    /// Read the RF channel back from the radio.
    fn get_channel(&mut self) -> Result<u8, Self::ChannelErrorType>;
}

/// Access to the IRQ flags of the STATUS register.
pub trait EsbStatus {
    type StatusErrorType;

    /// Copy the flags of the last STATUS byte seen on the bus into `flags`.
    fn get_status_flags(&self, flags: &mut StatusFlags);

    /// Acknowledge IRQ events once they are handled.
    ///
    /// Only the flags set to `true` in `flags` are cleared; the others keep
    /// their current state on the radio.
    fn clear_status_flags(&mut self, flags: StatusFlags) -> Result<(), Self::StatusErrorType>;

    /// Issue a NOP to refresh the cached STATUS byte.
    ///
    /// Every other transaction refreshes it as well.
    fn update(&mut self) -> Result<(), Self::StatusErrorType>;
}

/// RX and TX FIFO handling.
pub trait EsbFifo {
    type FifoErrorType;

    /// Discard every payload in the RX FIFO.
    fn flush_rx(&mut self) -> Result<(), Self::FifoErrorType>;

    /// Discard every payload in the TX FIFO.
    ///
    /// [`EsbRadio::stop_listening()`] does this when ACK payloads are enabled.
    fn flush_tx(&mut self) -> Result<(), Self::FifoErrorType>;

    /// Report the occupancy of the TX FIFO (`about_tx == true`) or the RX FIFO.
    fn get_fifo_state(&mut self, about_tx: bool) -> Result<FifoState, Self::FifoErrorType>;

    /// Does the RX FIFO hold a payload ready for [`EsbRadio::read()`]?
    fn available(&mut self) -> Result<bool, Self::FifoErrorType>;

    /// Like [`EsbFifo::available()`], but also stores the receiving pipe number
    /// into `pipe`. `pipe` is only written when a payload is available.
    ///
    /// ```ignore
    /// let mut pipe = 0xFF;
    /// if radio.available_pipe(&mut pipe)? {
    ///     defmt::info!("payload on pipe {}", pipe);
    /// }
    /// ```
    fn available_pipe(&mut self, pipe: &mut u8) -> Result<bool, Self::FifoErrorType>;
}

/// Static and dynamic payload lengths.
pub trait EsbPayloadLength {
    type PayloadLengthErrorType;

    /// Set the radio's static payload size (in range [0, 32]) for all pipes.
    ///
    /// Ignored by the radio while dynamic payloads are enabled.
    fn set_payload_size(&mut self, size: u8) -> Result<(), Self::PayloadLengthErrorType>;

    /// Read the static payload size of pipe 0 back from the radio.
    fn get_payload_size(&mut self) -> Result<u8, Self::PayloadLengthErrorType>;

    /// Toggle dynamic payload lengths on every pipe.
    ///
    /// Turning this on forces auto-ack on; turning it off also turns ACK payloads off.
    ///
    /// ```ignore
    /// radio.set_dynamic_payload_length(true)?;
    /// if radio.available()? {
    ///     let len = radio.get_dynamic_payload_length()?;
    ///     let mut buf = [0; 32];
    ///     radio.read(&mut buf, len)?;
    /// }
    /// ```
    fn set_dynamic_payload_length(&mut self, enable: bool)
        -> Result<(), Self::PayloadLengthErrorType>;

    /// Is the dynamic payloads feature enabled?
    fn get_dynamic_payloads(&self) -> bool;

    /// Length of the payload at the head of the RX FIFO (R_RX_PL_WID).
    ///
    /// Meaningless unless dynamic payloads are enabled and a payload is
    /// [`EsbFifo::available()`].
    fn get_dynamic_payload_length(&mut self) -> Result<u8, Self::PayloadLengthErrorType>;
}

/// Automatic acknowledgement and retransmission.
pub trait EsbAutoAck: EsbPayloadLength {
    type AutoAckErrorType;

    /// Toggle payloads carried by ACK packets (off by default).
    ///
    /// Turning this on forces dynamic payloads and auto-ack on.
    /// Queue ACK payloads with [`EsbAutoAck::write_ack_payload()`].
    fn set_ack_payload(&mut self, enable: bool) -> Result<(), Self::AutoAckErrorType>;

    /// Is the ACK payloads feature enabled?
    fn get_ack_payload(&self) -> bool;

    /// Queue `buf` to be attached to the next ACK sent on `pipe`.
    ///
    /// Returns `false` when ACK payloads are disabled or the TX FIFO is full
    /// after loading `buf`.
    ///
    /// <div class="warning">
    ///
    /// The ACK payload has to be queued before the packet it answers arrives.
    ///
    /// </div>
    fn write_ack_payload(&mut self, pipe: u8, buf: &[u8]) -> Result<bool, Self::AutoAckErrorType>;

    /// Toggle auto-ack on every pipe (on by default).
    ///
    /// Turning this off also turns dynamic payloads and ACK payloads off.
    fn set_auto_ack(&mut self, enable: bool) -> Result<(), Self::AutoAckErrorType>;

    /// Is auto-ack enabled?
    fn get_auto_ack(&self) -> bool;

    /// Configure automatic retransmission (SETUP_RETR).
    ///
    /// Both values must be in range [0, 15].
    /// - `delay`: wait of `(delay + 1) * 250` us between attempts.
    /// - `count`: retransmissions before MAX_RT is raised; 0 disables retries.
    fn set_retries(&mut self, delay: u8, count: u8) -> Result<(), Self::AutoAckErrorType>;

    /// Allow the functionality of the `multicast` parameter in [`EsbRadio::write()`],
    /// [`EsbRadio::fast_write()`] and [`EsbRadio::send()`].
    fn set_dynamic_ack(&mut self, enable: bool) -> Result<(), Self::AutoAckErrorType>;

    /// Is the dynamic ACK feature enabled?
    fn get_dynamic_ack(&self) -> bool;
}

/// Output power.
pub trait EsbPaLevel {
    type PaLevelErrorType;

    /// Read the PA level back from RF_SETUP.
    fn get_pa_level(&mut self) -> Result<PaLevel, Self::PaLevelErrorType>;

    /// Write the PA level and the LNA bit of RF_SETUP.
    fn set_pa_level(&mut self, pa_level: PaLevel, lna_enable: bool)
        -> Result<(), Self::PaLevelErrorType>;
}

/// PWR_UP control.
pub trait EsbPower {
    type PowerErrorType;

    /// Clear PWR_UP and enter power-down mode.
    ///
    /// <div class="warning">
    ///
    /// Nothing is sent or received until [`EsbPower::power_up()`] is called.
    ///
    /// </div>
    fn power_down(&mut self) -> Result<(), Self::PowerErrorType>;

    /// Set PWR_UP and wait 5 ms for the oscillator to settle (Standby-I).
    ///
    /// No-op when already powered up.
    fn power_up(&mut self) -> Result<(), Self::PowerErrorType>;

    /// Cached PWR_UP bit; no bus access.
    fn is_powered(&self) -> bool;
}

/// CRC encoding scheme.
pub trait EsbCrcLength {
    type CrcLengthErrorType;

    /// Read the CRC scheme back from CONFIG.
    fn get_crc_length(&mut self) -> Result<CrcLength, Self::CrcLengthErrorType>;

    /// Select the CRC scheme.
    fn set_crc_length(&mut self, crc_length: CrcLength) -> Result<(), Self::CrcLengthErrorType>;
}

/// Air data rate.
pub trait EsbDataRate {
    type DataRateErrorType;

    /// Read the data rate back from RF_SETUP.
    fn get_data_rate(&mut self) -> Result<DataRate, Self::DataRateErrorType>;

    /// Select the data rate. This also recomputes the TX settle delay.
    fn set_data_rate(&mut self, data_rate: DataRate) -> Result<(), Self::DataRateErrorType>;
}

/// A trait to represent the initialization and bulk configuration
/// of an ESB capable transceiver.
pub trait EsbInit {
    type ConfigErrorType;

    /// Initialize the radio's hardware using the given `config`.
    ///
    /// This function
    ///
    /// - waits 5 milliseconds for radio to settle
    /// - detects the chip variant
    /// - resets the radio to a known state and flushes the FIFOs
    /// - checks if radio is responding correctly after configuration
    /// - applies the given `config`
    ///
    /// Only the first successful call is allowed; use
    /// [`EsbInit::with_config()`] for later changes.
    fn init(&mut self, config: &RadioConfig) -> Result<(), Self::ConfigErrorType>;

    /// Apply every setting of `config` to an initialized radio.
    fn with_config(&mut self, config: &RadioConfig) -> Result<(), Self::ConfigErrorType>;

    /// Is the radio responding on the SPI bus?
    ///
    /// This reads back the address width register and compares it to the
    /// configured address width.
    fn is_connected(&mut self) -> Result<bool, Self::ConfigErrorType>;
}

/// RX and TX operation.
pub trait EsbRadio {
    type RadioErrorType;

    /// Enter RX mode (PRIM_RX set, CE high).
    ///
    /// Pipe 0 is closed unless it was opened with [`EsbPipe::open_reading_pipe()`].
    fn start_listening(&mut self) -> Result<(), Self::RadioErrorType>;

    /// Put the radio into inactive TX mode (StandBy-I).
    ///
    /// This must be called after [`EsbRadio::start_listening()`] before transmitting.
    /// The TX address (see [`EsbPipe::open_writing_pipe()`]) is restored to pipe 0.
    fn stop_listening(&mut self) -> Result<(), Self::RadioErrorType>;

    /// Cached RX mode state.
    fn is_listening(&self) -> bool;

    /// Non-blocking function to load a payload into the TX FIFO and enter active TX mode.
    ///
    /// With static payloads, the payload is padded with zeros (or truncated) to the
    /// configured payload size. With dynamic payloads, the payload is truncated to 32 bytes.
    ///
    /// If `multicast` is true, then the transmitted payload will not ask for an
    /// acknowledgement. This has no effect unless [`EsbAutoAck::set_dynamic_ack()`]
    /// was enabled.
    fn write(&mut self, buf: &[u8], multicast: bool) -> Result<(), Self::RadioErrorType>;

    /// Similar to [`EsbRadio::write()`], but first waits for room in the TX FIFO.
    ///
    /// An error is returned as soon as a transmission failure (max retries) is
    /// observed while the TX FIFO is full.
    fn fast_write(&mut self, buf: &[u8], multicast: bool) -> Result<(), Self::RadioErrorType>;

    /// Transmit `buf` and block until it is acknowledged or given up on.
    ///
    /// Returns `true` on TX_DS and `false` on MAX_RT.
    fn send(&mut self, buf: &[u8], multicast: bool) -> Result<bool, Self::RadioErrorType>;

    /// Pop the head of the RX FIFO into `buf`.
    ///
    /// At most `len` bytes (bounded by the length of `buf`) are stored.
    /// The count is returned.
    fn read(&mut self, buf: &mut [u8], len: u8) -> Result<u8, Self::RadioErrorType>;
}
