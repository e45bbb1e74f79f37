/// lowest accepted baud rate, anything below is assumed to be a caller mistake
pub const MIN_BAUD: u32 = 2400;


/// parity bit setting
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Parity {
    #[default]
    None,
    Odd,
    Even,
}

/// stop bits setting
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum StopBits {
    #[default]
    One,
    Two,
}

/// electrical line settings pushed to the port hardware
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LineConfig {
    pub baud: u32,
    pub parity: Parity,
    pub stop_bits: StopBits,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            baud: 115_200,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

impl LineConfig {
    /// false for baud rates most likely to be caller errors
    pub fn is_valid(&self) -> bool {
        self.baud >= MIN_BAUD
    }
}


/// hardware flow control, part of the request surface so asking for it fails loudly
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlowControl {
    RtsCts,
}

/**
    partial reconfiguration request, `None` fields keep their current value

    options no port implements (data bit count, flow control, pin remapping) are
    still part of the request so that asking for them is a distinct
    [NotImplemented](crate::error::UnitError::NotImplemented) failure rather than a
    silent ignore
*/
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SetupRequest {
    pub baud: Option<u32>,
    pub parity: Option<Parity>,
    pub stop_bits: Option<StopBits>,
    pub data_bits: Option<u8>,
    pub flow_control: Option<FlowControl>,
    pub txd_pin: Option<u8>,
    pub rxd_pin: Option<u8>,
    pub rts_pin: Option<u8>,
    pub cts_pin: Option<u8>,
}

impl SetupRequest {
    /// true when the request names an option this implementation does not support
    pub fn unsupported(&self) -> bool {
        self.data_bits.is_some()
        || self.flow_control.is_some()
        || self.txd_pin.is_some()
        || self.rxd_pin.is_some()
        || self.rts_pin.is_some()
        || self.cts_pin.is_some()
    }
}
