/*!
    circular receive buffer core and the blocking consumer protocol on top of it

    the ring owns the read cursor, the [ReceiveEngine] owns the write cursor, and
    each cursor has exactly one writer so producer and consumer never collide without
    any mutual exclusion. all consumer access to the pending bytes goes through the
    operations here, nothing else touches the storage.

    blocking calls poll and suspend through an [Idle] policy, they hold no state
    across calls besides the read cursor itself: a poll loop abandoned half way
    leaves the ring consistent for the next call.
*/

use core::convert::Infallible;

use crate::{
    engine::ReceiveEngine,
    error::ReadError,
    idle::{Idle, SpinIdle},
    };


/// default line delimiter
pub const DELIMITER: u8 = b'\n';


/// consumer side of a receive ring, see the [module](self) doc
pub struct RxRing<E, I = SpinIdle> {
    engine: E,
    idle: I,
    /// index of the next byte to consume, mutated only here
    read: usize,
    delimiter: u8,
}

impl<E: ReceiveEngine> RxRing<E> {
    /// ring over the given engine, spinning between polls and delimited by [DELIMITER]
    pub fn new(engine: E) -> Self {
        Self::with_idle(engine, SpinIdle)
    }
}

impl<E: ReceiveEngine, I: Idle> RxRing<E, I> {
    /// ring with an explicit suspension policy for blocking reads
    pub fn with_idle(engine: E, idle: I) -> Self {
        Self {engine, idle, read: 0, delimiter: DELIMITER}
    }

    pub fn delimiter(&self) -> u8  {self.delimiter}
    pub fn set_delimiter(&mut self, delimiter: u8)  {self.delimiter = delimiter}

    /// number of bytes pending between the read cursor and the engine's write position
    pub fn bytes_available(&self) -> usize {
        let write = self.engine.write_position();
        if self.read <= write {
            write - self.read
        }
        else {
            self.engine.capacity() - self.read + write
        }
    }

    /// true when at least one byte is pending
    pub fn is_readable(&self) -> bool {
        self.read != self.engine.write_position()
    }

    /**
        length of the first pending line including its delimiter, or 0 when no
        complete line arrived yet

        the write position is captured once when the scan starts, bytes arriving
        while scanning are left for the next call
    */
    pub fn can_read_line(&self) -> usize {
        let write = self.engine.write_position();
        let capacity = self.engine.capacity();
        let mut index = self.read;
        while index != write {
            let byte = self.engine.byte_at(index);
            index += 1;
            if byte == self.delimiter {
                return if self.read < index {index - self.read}
                    else {capacity - self.read + index}
            }
            if index >= capacity  {index = 0}
        }
        0
    }

    /**
        copy `dst.len()` bytes out of the ring, wrapping, then advance the read cursor

        availability is the caller's precondition: establish it through
        [bytes_available](Self::bytes_available) or [can_read_line](Self::can_read_line)
        first. the copy itself does not check, consuming bytes the engine has not
        written yet reads whatever the storage currently holds.
    */
    pub fn consume(&mut self, dst: &mut [u8]) {
        let capacity = self.engine.capacity();
        debug_assert!(dst.len() < capacity);
        for slot in dst {
            *slot = self.engine.byte_at(self.read);
            self.read += 1;
            if self.read >= capacity  {self.read = 0}
        }
    }

    /// discard all pending bytes, the read cursor catches up to the write position of this very call
    pub fn clear(&mut self) {
        self.read = self.engine.write_position();
    }

    /**
        blocking read of exactly `dst.len()` bytes

        bytes are consumed opportunistically as the engine delivers them, the call
        returns once the destination is full and never before, there is no timeout
    */
    pub fn read_exact(&mut self, dst: &mut [u8]) {
        let mut filled = 0;
        while filled < dst.len() {
            let pending = self.bytes_available();
            if pending == 0 {
                self.idle.idle();
                continue;
            }
            let take = pending.min(dst.len() - filled);
            self.consume(&mut dst[filled .. filled + take]);
            filled += take;
        }
    }

    /**
        blocking read of the next complete line

        blocks until a whole line is pending, then copies it including its delimiter
        into `dst`, writes a NUL terminator after it and returns the line length
        (terminator excluded).

        fails with [ReadError::BufferTooSmall] when the line plus terminator does not
        fit `dst`. nothing is consumed in that case, the same line can be fetched
        again with a larger destination or drained in chunks with
        [read_exact](Self::read_exact).
    */
    pub fn read_line(&mut self, dst: &mut [u8]) -> Result<usize, ReadError> {
        let length = loop {
            let length = self.can_read_line();
            if length > 0  {break length}
            self.idle.idle();
        };
        if length >= dst.len() {
            return Err(ReadError::BufferTooSmall);
        }
        self.consume(&mut dst[.. length]);
        dst[length] = 0;
        Ok(length)
    }
}


impl<E: ReceiveEngine, I: Idle> embedded_io::ErrorType for RxRing<E, I> {
    type Error = Infallible;
}

impl<E: ReceiveEngine, I: Idle> embedded_io::Read for RxRing<E, I> {
    /// blocks until at least one byte is pending, then drains up to `buf.len()`
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Infallible> {
        if buf.is_empty()  {return Ok(0)}
        let pending = loop {
            let pending = self.bytes_available();
            if pending > 0  {break pending}
            self.idle.idle();
        };
        let take = pending.min(buf.len());
        self.consume(&mut buf[.. take]);
        Ok(take)
    }
}

impl<E: ReceiveEngine, I: Idle> embedded_io::ReadReady for RxRing<E, I> {
    fn read_ready(&mut self) -> Result<bool, Infallible> {
        Ok(self.is_readable())
    }
}
