/*!
    serial units tie a receive ring, a transmit path and line settings under one
    identifier

    units are built once at startup for every wired port and live for the process
    lifetime, the [Registry] is the fixed table looking them up by id. all receive
    state is volatile and starts empty.
*/

use log::*;

use crate::{
    config::{LineConfig, Parity, SetupRequest, StopBits},
    engine::ReceiveEngine,
    error::{ReadError, UnitError},
    idle::{Idle, SpinIdle},
    ring::RxRing,
    };


/// logical identifier of a serial unit, matching the hardware numbering (1 for UART1, ...)
pub type UnitId = u8;


/// synchronous transmit and configuration seam to the port hardware
pub trait SerialBus {
    type Error;
    /// apply line settings, rejecting combinations the hardware cannot do
    fn apply(&mut self, line: &LineConfig) -> Result<(), Self::Error>;
    /// blocking transmission of the whole buffer, returns once all bytes are out
    /// or the port's fixed timeout elapsed, failure distinguishable through `Error`
    fn send(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;
}


/// one serial port: receive ring, transmit path and current line settings
pub struct Unit<B, E, I = SpinIdle> {
    id: UnitId,
    bus: B,
    ring: RxRing<E, I>,
    line: LineConfig,
}

impl<B: SerialBus, E: ReceiveEngine> Unit<B, E> {
    /// unit with the default spin idle policy, its ring starts empty
    pub fn new(id: UnitId, bus: B, engine: E) -> Self {
        Self::with_idle(id, bus, engine, SpinIdle)
    }
}

impl<B: SerialBus, E: ReceiveEngine, I: Idle> Unit<B, E, I> {
    pub fn with_idle(id: UnitId, bus: B, engine: E, idle: I) -> Self {
        Self {
            id,
            bus,
            ring: RxRing::with_idle(engine, idle),
            line: LineConfig::default(),
        }
    }

    pub fn id(&self) -> UnitId  {self.id}
    /// line settings as last successfully applied
    pub fn line(&self) -> &LineConfig  {&self.line}
    /// the underlying port hardware
    pub fn bus(&self) -> &B  {&self.bus}
    pub fn bus_mut(&mut self) -> &mut B  {&mut self.bus}
    /// the receive ring, for direct access through the `embedded_io` traits
    pub fn ring(&self) -> &RxRing<E, I>  {&self.ring}
    pub fn ring_mut(&mut self) -> &mut RxRing<E, I>  {&mut self.ring}

    /**
        apply a full line configuration

        values are validated first, then pushed to the hardware, the stored settings
        only change once the hardware accepted them
    */
    pub fn configure(&mut self, baud: u32, parity: Parity, stop_bits: StopBits) -> Result<(), UnitError<B::Error>> {
        let line = LineConfig {baud, parity, stop_bits};
        if ! line.is_valid()
            {return Err(UnitError::Config)}
        self.bus.apply(&line) .map_err(|_| UnitError::Config)?;
        self.line = line;
        debug!("unit {} set to {} baud, parity {:?}, stop bits {:?}", self.id, baud, parity, stop_bits);
        Ok(())
    }

    /// partial reconfiguration, see [SetupRequest]
    pub fn setup(&mut self, request: &SetupRequest) -> Result<(), UnitError<B::Error>> {
        if request.unsupported()
            {return Err(UnitError::NotImplemented)}
        self.configure(
            request.baud.unwrap_or(self.line.baud),
            request.parity.unwrap_or(self.line.parity),
            request.stop_bits.unwrap_or(self.line.stop_bits),
            )
    }

    /// synchronous transmission, returns the number of bytes sent
    pub fn write(&mut self, bytes: &[u8]) -> Result<usize, UnitError<B::Error>> {
        self.bus.send(bytes) .map_err(UnitError::Bus)?;
        Ok(bytes.len())
    }

    /// transmission terminated by the delimiter, appended unless the payload already ends with it
    pub fn write_line(&mut self, bytes: &[u8]) -> Result<usize, UnitError<B::Error>> {
        let mut sent = self.write(bytes)?;
        if bytes.last() != Some(&self.ring.delimiter()) {
            sent += self.write(&[self.ring.delimiter()])?;
        }
        Ok(sent)
    }

    /// nothing buffers transmissions, there is never anything waiting
    pub fn bytes_to_write(&self) -> usize  {0}
    /// nothing buffers transmissions, nothing to flush
    pub fn flush(&mut self)  {}
    /// break signal is not supported on this port
    pub fn send_break(&mut self) -> Result<(), UnitError<B::Error>> {
        Err(UnitError::NotImplemented)
    }

    // receive side, delegated to the ring

    pub fn bytes_available(&self) -> usize  {self.ring.bytes_available()}
    pub fn is_readable(&self) -> bool  {self.ring.is_readable()}
    pub fn can_read_line(&self) -> usize  {self.ring.can_read_line()}
    pub fn read_exact(&mut self, dst: &mut [u8])  {self.ring.read_exact(dst)}
    pub fn read_line(&mut self, dst: &mut [u8]) -> Result<usize, ReadError>  {self.ring.read_line(dst)}
    pub fn set_delimiter(&mut self, delimiter: u8)  {self.ring.set_delimiter(delimiter)}

    /// flush stale input, for instance a leftover bootloader prompt before normal operation
    pub fn clear_rx(&mut self) {
        trace!("unit {} receive buffer cleared", self.id);
        self.ring.clear();
    }
}


/**
    fixed capacity table of serial units, built once at system startup

    unit ids may be sparse (1, 2 and 6 on a board with three wired uarts), the table
    only holds the wired ones. there is no removal, units live as long as the process.
*/
pub struct Registry<B, E, I = SpinIdle, const MAX: usize = 8> {
    units: heapless::Vec<Unit<B, E, I>, MAX>,
}

impl<B: SerialBus, E: ReceiveEngine, I: Idle, const MAX: usize> Registry<B, E, I, MAX> {
    pub fn new() -> Self {
        Self {units: heapless::Vec::new()}
    }

    /// add a unit, handing it back when the table is full or the id is already taken
    pub fn register(&mut self, unit: Unit<B, E, I>) -> Result<(), Unit<B, E, I>> {
        if self.get(unit.id()).is_some()
            {return Err(unit)}
        let id = unit.id();
        self.units.push(unit)?;
        debug!("registered serial unit {}", id);
        Ok(())
    }

    pub fn get(&self, id: UnitId) -> Option<&Unit<B, E, I>> {
        self.units.iter().find(|unit| unit.id == id)
    }

    pub fn get_mut(&mut self, id: UnitId) -> Option<&mut Unit<B, E, I>> {
        self.units.iter_mut().find(|unit| unit.id == id)
    }

    /// configure the unit with the given id, an unknown id is a configuration error
    pub fn configure(&mut self, id: UnitId, baud: u32, parity: Parity, stop_bits: StopBits) -> Result<(), UnitError<B::Error>> {
        self.get_mut(id).ok_or(UnitError::Config)?
            .configure(baud, parity, stop_bits)
    }

    /// transmit on the unit with the given id, synchronous
    pub fn transmit(&mut self, id: UnitId, bytes: &[u8]) -> Result<usize, UnitError<B::Error>> {
        self.get_mut(id).ok_or(UnitError::Config)?
            .write(bytes)
    }
}

impl<B: SerialBus, E: ReceiveEngine, I: Idle, const MAX: usize> Default for Registry<B, E, I, MAX> {
    fn default() -> Self  {Self::new()}
}
