//! Command interface transport
//!
//! One connection is accepted per tick at most. The accept never blocks:
//! "nothing pending" is the normal case. The request is read once, answered
//! with a fixed acknowledgement and closed by dropping the connection.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::command::{Commands, MAX_REQUEST_LEN, parse_request, request_text};

/// Reply sent for every request, recognized or not
pub const ACK_RESPONSE: &[u8] = b"HTTP/1.0 200 OK\r\nContent-type: text/plain\r\n\r\nOK";

/// Accepted command connection, closed on drop
pub trait CommandConnection {
    type Error;

    /// Read the request into `buf`, returning the number of bytes read
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Send the whole response
    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

/// Non-blocking source of command connections
pub trait CommandListener {
    type Connection: CommandConnection;

    /// Accept a pending connection, or `None` if there is none
    ///
    /// Transient accept failures are reported as `None` too.
    fn try_accept(&mut self) -> Option<Self::Connection>;
}

/// Accept and answer at most one request
///
/// Returns the commands it carried, or `None` if the read failed. An empty
/// request is still acknowledged and yields no commands.
pub fn service_one<L: CommandListener>(listener: &mut L) -> Option<Commands> {
    let mut connection = listener.try_accept()?;

    let mut buf = [0u8; MAX_REQUEST_LEN];
    let Ok(len) = connection.read(&mut buf) else {
        #[cfg(feature = "esp32-log")]
        println!("[Server] request read failed");
        return None;
    };
    let commands = parse_request(request_text(&buf[..len.min(MAX_REQUEST_LEN)]));

    if connection.write_all(ACK_RESPONSE).is_err() {
        #[cfg(feature = "esp32-log")]
        println!("[Server] acknowledgement write failed");
    }

    #[cfg(feature = "esp32-log")]
    println!("[Server] request with {} command(s)", commands.len());

    Some(commands)
}

#[cfg(feature = "std")]
mod std_net {
    use std::io;
    use std::net::{TcpListener, TcpStream, ToSocketAddrs};
    use std::time::Duration;

    use super::{CommandConnection, CommandListener};

    /// Longest wait for the request bytes once a connection is accepted
    ///
    /// Kept well below the tick interval. A client that has sent nothing by
    /// then is answered with an empty request.
    pub const REQUEST_READ_TIMEOUT: Duration = Duration::from_millis(2);

    /// Longest wait for the acknowledgement to be handed to the socket
    pub const RESPONSE_WRITE_TIMEOUT: Duration = Duration::from_millis(2);

    /// Bind a listener ready to be polled from the control loop
    pub fn bind_listener(addr: impl ToSocketAddrs) -> io::Result<TcpListener> {
        let listener = TcpListener::bind(addr)?;
        listener.set_nonblocking(true)?;
        Ok(listener)
    }

    impl CommandConnection for TcpStream {
        type Error = io::Error;

        /// A request that does not arrive within [`REQUEST_READ_TIMEOUT`]
        /// reads as empty
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            match io::Read::read(self, buf) {
                Err(err)
                    if matches!(
                        err.kind(),
                        io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut
                    ) =>
                {
                    Ok(0)
                }
                result => result,
            }
        }

        fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
            io::Write::write_all(self, data)
        }
    }

    impl CommandListener for TcpListener {
        type Connection = TcpStream;

        fn try_accept(&mut self) -> Option<TcpStream> {
            let (stream, _) = self.accept().ok()?;
            stream.set_nonblocking(false).ok()?;
            stream.set_read_timeout(Some(REQUEST_READ_TIMEOUT)).ok()?;
            stream.set_write_timeout(Some(RESPONSE_WRITE_TIMEOUT)).ok()?;
            Some(stream)
        }
    }
}

#[cfg(feature = "std")]
pub use std_net::{REQUEST_READ_TIMEOUT, RESPONSE_WRITE_TIMEOUT, bind_listener};
