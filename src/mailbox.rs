//! Single-slot request mailbox
//!
//! Hands raw requests from another execution context (a network task, an
//! interrupt, a test) to the control loop. The slot holds one request; a new
//! offer while one is pending is rejected, so nothing is buffered across
//! ticks. Access is guarded by `critical-section`.

use core::cell::RefCell;
use core::convert::Infallible;

use critical_section::Mutex;
use heapless::Vec;

use crate::command::MAX_REQUEST_LEN;
use crate::server::{CommandConnection, CommandListener};

/// Raw request bytes
pub type RequestBuffer = Vec<u8, MAX_REQUEST_LEN>;

/// Error returned when offering to a slot that already holds a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotBusy;

impl core::fmt::Display for SlotBusy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "a request is already pending")
    }
}

/// Mailbox holding at most one pending request
pub struct RequestSlot {
    inner: Mutex<RefCell<Option<RequestBuffer>>>,
}

impl RequestSlot {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(None)),
        }
    }

    /// Store a request for the next poll
    ///
    /// Requests longer than [`MAX_REQUEST_LEN`] are truncated.
    pub fn offer(&self, request: &[u8]) -> Result<(), SlotBusy> {
        let len = request.len().min(MAX_REQUEST_LEN);
        critical_section::with(|cs| {
            let mut slot = self.inner.borrow(cs).borrow_mut();
            if slot.is_some() {
                return Err(SlotBusy);
            }
            *slot = RequestBuffer::from_slice(&request[..len]).ok();
            Ok(())
        })
    }

    pub fn is_pending(&self) -> bool {
        critical_section::with(|cs| self.inner.borrow(cs).borrow().is_some())
    }

    /// Take the pending request, leaving the slot empty
    pub fn take(&self) -> Option<RequestBuffer> {
        critical_section::with(|cs| self.inner.borrow(cs).borrow_mut().take())
    }
}

impl Default for RequestSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// Connection view of a request taken from a [`RequestSlot`]
///
/// The acknowledgement has nowhere to go and is discarded.
pub struct SlotConnection {
    request: RequestBuffer,
    consumed: bool,
}

impl CommandConnection for SlotConnection {
    type Error = Infallible;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Infallible> {
        if self.consumed {
            return Ok(0);
        }
        let len = self.request.len().min(buf.len());
        buf[..len].copy_from_slice(&self.request[..len]);
        self.consumed = true;
        Ok(len)
    }

    fn write_all(&mut self, _data: &[u8]) -> Result<(), Infallible> {
        Ok(())
    }
}

impl CommandListener for &RequestSlot {
    type Connection = SlotConnection;

    fn try_accept(&mut self) -> Option<SlotConnection> {
        self.take().map(|request| SlotConnection {
            request,
            consumed: false,
        })
    }
}
