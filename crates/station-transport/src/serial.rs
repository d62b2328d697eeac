//! Serial port transport for the station command link.
//!
//! The station enumerates as a USB CDC device (`/dev/ttyACM*` on Linux,
//! `COM*` on Windows). The link is always 8 data bits, 1 stop bit, no
//! parity, no flow control; only the baud rate is configurable, and for a
//! native CDC port even that is nominal.

use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_serial::{SerialPort, SerialPortBuilderExt, SerialStream};

use station_core::error::{Error, Result};
use station_core::transport::Transport;

/// Nominal baud rate of the CDC link.
pub const DEFAULT_BAUD: u32 = 115_200;

/// Serial port transport for the station command link.
///
/// Implements the [`Transport`] trait over a USB CDC virtual COM port or a
/// physical UART.
pub struct SerialTransport {
    /// The underlying serial port stream, `None` once closed.
    port: Option<SerialStream>,
    /// Port name for logging.
    port_name: String,
}

impl SerialTransport {
    /// Open a serial port with the given baud rate and 8N1 framing.
    ///
    /// # Arguments
    ///
    /// * `port` - Serial port path (e.g., "/dev/ttyACM0" on Linux, "COM3" on Windows)
    /// * `baud_rate` - Baud rate, normally [`DEFAULT_BAUD`]
    pub async fn open(port: &str, baud_rate: u32) -> Result<Self> {
        tracing::debug!(port = %port, baud_rate, "Opening serial port");

        let mut serial_stream = tokio_serial::new(port, baud_rate)
            .data_bits(tokio_serial::DataBits::Eight)
            .stop_bits(tokio_serial::StopBits::One)
            .parity(tokio_serial::Parity::None)
            .flow_control(tokio_serial::FlowControl::None)
            .open_native_async()
            .map_err(|e| {
                tracing::error!(port = %port, error = %e, "Failed to open serial port");
                Error::Transport(format!("Failed to open serial port {}: {}", port, e))
            })?;

        // The Pico's CDC stdio gates its transmitter on DTR: with DTR
        // de-asserted the station buffers output and the host sees nothing.
        if let Err(e) = serial_stream.write_data_terminal_ready(true) {
            tracing::warn!(port = %port, error = %e, "Failed to assert DTR");
        }

        tracing::info!(port = %port, baud_rate, "Serial port opened");

        Ok(Self {
            port: Some(serial_stream),
            port_name: port.to_string(),
        })
    }

    /// Get the name of the serial port.
    pub fn port_name(&self) -> &str {
        &self.port_name
    }
}

#[async_trait]
impl Transport for SerialTransport {
    async fn send(&mut self, data: &[u8]) -> Result<()> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;

        tracing::trace!(
            port = %self.port_name,
            bytes = data.len(),
            "Sending request"
        );

        port.write_all(data).await.map_err(|e| {
            tracing::error!(port = %self.port_name, error = %e, "Failed to send request");
            Error::Io(e)
        })?;

        // Flush so a short request line is not held back by the driver.
        port.flush().await.map_err(|e| {
            tracing::error!(port = %self.port_name, error = %e, "Failed to flush serial port");
            Error::Io(e)
        })?;

        Ok(())
    }

    async fn receive(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;

        let result = tokio::time::timeout(timeout, port.read(buf)).await;

        match result {
            Ok(Ok(n)) => {
                tracing::trace!(port = %self.port_name, bytes = n, "Received data");
                Ok(n)
            }
            Ok(Err(e)) => {
                tracing::error!(port = %self.port_name, error = %e, "Failed to receive data");
                Err(Error::Io(e))
            }
            Err(_) => {
                tracing::trace!(
                    port = %self.port_name,
                    timeout_ms = timeout.as_millis(),
                    "Timeout waiting for data"
                );
                Err(Error::Timeout)
            }
        }
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(mut port) = self.port.take() {
            tracing::debug!(port = %self.port_name, "Closing serial port");

            if let Err(e) = port.flush().await {
                tracing::warn!(
                    port = %self.port_name,
                    error = %e,
                    "Failed to flush before closing (continuing anyway)"
                );
            }
            // Dropping the stream closes the port.
        }

        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.port.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_transport_reports_not_connected() {
        // Construct directly; opening a real port is not possible in CI.
        let transport = SerialTransport {
            port: None,
            port_name: "/dev/ttyACM0".into(),
        };
        assert!(!transport.is_connected());
        assert_eq!(transport.port_name(), "/dev/ttyACM0");
    }

    #[tokio::test]
    async fn send_on_closed_transport_fails() {
        let mut transport = SerialTransport {
            port: None,
            port_name: "/dev/ttyACM0".into(),
        };
        assert!(matches!(
            transport.send(b"board\n").await,
            Err(Error::NotConnected)
        ));
        let mut buf = [0u8; 16];
        assert!(matches!(
            transport.receive(&mut buf, Duration::from_millis(10)).await,
            Err(Error::NotConnected)
        ));
        assert!(transport.close().await.is_ok());
    }
}
