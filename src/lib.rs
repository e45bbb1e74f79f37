#![no_std]
#[cfg(feature = "std")]
extern crate std;

mod idle;


pub mod config;
pub mod engine;
pub mod error;
pub mod ring;
pub mod unit;

pub use idle::{Idle, SpinIdle};
#[cfg(feature = "std")]
pub use idle::YieldIdle;
