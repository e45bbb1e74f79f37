/*!
    receive engines are the asynchronous producer side of a serial unit

    an engine continuously deposits incoming bytes into fixed circular storage and
    advances a write cursor. the consumer side ([RxRing](crate::ring::RxRing)) only
    ever loads that cursor, it never writes it, so no lock is involved anywhere.
*/

use core::{
    cell::UnsafeCell,
    sync::atomic::AtomicUsize,
    sync::atomic::Ordering::*,
    };


/**
    asynchronous producer filling circular storage behind the consumer's back

    implementors guarantee:

    - [write_position](Self::write_position) never blocks and is safe to call from
      the consumer at any time
    - the write cursor is advanced by a single party only, with a plain store
      (nothing read-modify-write), and at most `capacity() - 1` bytes are pending
      at once so an empty ring is never mistaken for a full one
*/
pub trait ReceiveEngine {
    /// index of the next byte the engine will write, in `[0, capacity())`
    fn write_position(&self) -> usize;
    /// fixed storage capacity in bytes, always non zero
    fn capacity(&self) -> usize;
    /// byte at `index`, only meaningful between the consumer's read cursor and [write_position](Self::write_position)
    fn byte_at(&self, index: usize) -> u8;
}

impl<E: ReceiveEngine> ReceiveEngine for &E {
    fn write_position(&self) -> usize  {(**self).write_position()}
    fn capacity(&self) -> usize  {(**self).capacity()}
    fn byte_at(&self, index: usize) -> u8  {(**self).byte_at(index)}
}


/**
    interrupt-fed receive fifo

    [push](Self::push) is meant to be called from the receive interrupt and is the
    single writer of the write cursor, the consumer only loads it. pushing more than
    `N-1` bytes without the consumer draining overwrites pending bytes, exactly like
    the hardware fifo it stands for.

    on targets where reception is circular DMA instead of an interrupt, implement
    [ReceiveEngine] over the DMA region and its transfer counter rather than using
    this type.
*/
pub struct SoftFifo<const N: usize> {
    storage: [UnsafeCell<u8>; N],
    write: AtomicUsize,
}

// single producer and single consumer, each cursor has exactly one writer
unsafe impl<const N: usize> Sync for SoftFifo<N> {}

impl<const N: usize> SoftFifo<N> {
    pub const fn new() -> Self {
        const { assert!(N > 0) }
        Self {
            storage: [const {UnsafeCell::new(0)}; N],
            write: AtomicUsize::new(0),
        }
    }
    /// deposit one byte then advance the write cursor, producer side only
    pub fn push(&self, byte: u8) {
        let at = self.write.load(Relaxed);
        // SAFETY: the slot at `at` is published to the consumer only by the store below
        unsafe {self.storage[at].get().write_volatile(byte)}
        let mut next = at + 1;
        if next >= N  {next = 0}
        self.write.store(next, Release);
    }
    /// deposit a run of bytes
    pub fn extend(&self, bytes: &[u8]) {
        for &byte in bytes {
            self.push(byte);
        }
    }
}

impl<const N: usize> Default for SoftFifo<N> {
    fn default() -> Self  {Self::new()}
}

impl<const N: usize> ReceiveEngine for SoftFifo<N> {
    fn write_position(&self) -> usize {
        self.write.load(Acquire)
    }
    fn capacity(&self) -> usize  {N}
    fn byte_at(&self, index: usize) -> u8 {
        // volatile because the producer may run in interrupt context
        unsafe {self.storage[index].get().read_volatile()}
    }
}
