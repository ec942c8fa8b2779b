//! Live telemetry transport used by the console binary.
//!
//! A transport is pumped with [`Transport::process_rx`] and then drained of
//! complete packets and of raw bytes that were not part of a packet. Packet
//! decoding is not implemented here, so the stream transport only ever
//! yields raw bytes.

use std::collections::VecDeque;
use std::fmt;
use std::io::{self, Read};
use std::net::TcpStream;

use log::{debug, info};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("couldn't connect to {addr}")]
    Connect {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("receive failed")]
    Receive(#[from] io::Error),
}

/// An undecoded telemetry packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawPacket(pub Vec<u8>);

impl fmt::Display for RawPacket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "packet ({} bytes):", self.0.len())?;
        for byte in &self.0 {
            write!(f, " {byte:02x}")?;
        }
        Ok(())
    }
}

pub trait Transport {
    /// Move whatever input is pending into the receive queues. Never blocks.
    fn process_rx(&mut self) -> Result<(), TransportError>;

    fn next_rx_packet(&mut self) -> Option<RawPacket>;

    fn next_rx_byte(&mut self) -> Option<u8>;
}

// ---------------------------------------------------------------------------
// StreamTransport – any byte stream, non-blocking TCP in practice
// ---------------------------------------------------------------------------

const READ_CHUNK: usize = 1024;

pub struct StreamTransport<S> {
    stream: S,
    rx_bytes: VecDeque<u8>,
    rx_packets: VecDeque<RawPacket>,
    closed: bool,
}

pub type SocketTransport = StreamTransport<TcpStream>;

impl StreamTransport<TcpStream> {
    pub fn connect(hostname: &str, port: u16) -> Result<Self, TransportError> {
        let addr = format!("{hostname}:{port}");
        let stream = TcpStream::connect(&addr).map_err(|source| TransportError::Connect {
            addr: addr.clone(),
            source,
        })?;
        stream.set_nonblocking(true)?;
        info!("opened network socket on {addr}");
        Ok(Self::new(stream))
    }
}

impl<S: Read> StreamTransport<S> {
    pub fn new(stream: S) -> Self {
        StreamTransport {
            stream,
            rx_bytes: VecDeque::new(),
            rx_packets: VecDeque::new(),
            closed: false,
        }
    }

    /// Whether the peer has closed the stream.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl<S: Read> Transport for StreamTransport<S> {
    fn process_rx(&mut self) -> Result<(), TransportError> {
        let mut buf = [0u8; READ_CHUNK];
        while !self.closed {
            match self.stream.read(&mut buf) {
                Ok(0) => {
                    debug!("transport stream closed");
                    self.closed = true;
                }
                Ok(n) => self.rx_bytes.extend(&buf[..n]),
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    fn next_rx_packet(&mut self) -> Option<RawPacket> {
        self.rx_packets.pop_front()
    }

    fn next_rx_byte(&mut self) -> Option<u8> {
        self.rx_bytes.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn drains_bytes_in_arrival_order() {
        let mut transport = StreamTransport::new(Cursor::new(b"hello".to_vec()));
        assert_eq!(transport.next_rx_byte(), None);

        transport.process_rx().unwrap();
        let received: Vec<u8> = std::iter::from_fn(|| transport.next_rx_byte()).collect();
        assert_eq!(received, b"hello");
        assert!(transport.next_rx_packet().is_none());
        assert!(transport.is_closed());
    }

    #[test]
    fn reads_past_one_chunk() {
        let data = vec![b'x'; READ_CHUNK * 3 + 7];
        let mut transport = StreamTransport::new(Cursor::new(data.clone()));
        transport.process_rx().unwrap();
        assert_eq!(transport.rx_bytes.len(), data.len());
    }

    #[test]
    fn packet_display_is_hex() {
        let packet = RawPacket(vec![0x05, 0x39, 0xff]);
        assert_eq!(packet.to_string(), "packet (3 bytes): 05 39 ff");
    }
}
