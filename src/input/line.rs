use embedded_io_async::Read;
use heapless::Vec;
use log::{debug, warn};
use tracker_core::{InputError, InputSource, OrientationUpdate};

use super::parser::{parse_update, MAX_LINE_LENGTH};

/// Line-based input source over any async byte reader.
///
/// Reads newline-terminated update lines (`U<field>:<value>*<checksum>\n`)
/// from a serial port, socket or pipe and parses each into an
/// [`OrientationUpdate`]. See [`parse_update`] for the line format.
///
/// End of stream is reported as [`InputError::Disconnected`]; after that the
/// source stays disconnected.
pub struct LineInputSource<R> {
    reader: R,
    buffer: Vec<u8, MAX_LINE_LENGTH>,
    connected: bool,
}

impl<R: Read> LineInputSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            connected: true,
        }
    }

    /// Give back the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    async fn read_byte(&mut self) -> Result<u8, InputError> {
        let mut byte = [0u8; 1];
        match self.reader.read(&mut byte).await {
            Ok(0) => {
                debug!("input reached end of stream");
                self.connected = false;
                Err(InputError::Disconnected)
            }
            Ok(_) => Ok(byte[0]),
            Err(e) => {
                warn!("input read failed: {:?}", embedded_io_async::Error::kind(&e));
                Err(InputError::Io)
            }
        }
    }

    /// Read bytes until a newline is found or buffer is full.
    ///
    /// If a line exceeds the buffer capacity, the rest of the line is
    /// discarded so the next read starts on a fresh line.
    async fn read_line(&mut self) -> Result<(), InputError> {
        self.buffer.clear();

        loop {
            let byte = self.read_byte().await?;
            if byte == b'\n' {
                return Ok(());
            }

            if self.buffer.push(byte).is_err() {
                while self.read_byte().await? != b'\n' {}
                return Err(InputError::BufferOverflow);
            }
        }
    }
}

impl<R: Read> InputSource for LineInputSource<R> {
    async fn receive(&mut self) -> Result<OrientationUpdate, InputError> {
        if !self.connected {
            return Err(InputError::Disconnected);
        }
        self.read_line().await?;
        parse_update(&self.buffer)
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}
