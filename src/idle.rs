/// suspension strategy used by blocking reads between polls
///
/// the policy does not change the observable contract: block until satisfied,
/// no timeout, no partial result
pub trait Idle {
    /// called once per unsatisfied poll
    fn idle(&mut self);
}

/// busy spin, the default on bare metal where nothing else runs
#[derive(Default, Clone, Copy, Debug)]
pub struct SpinIdle;

impl Idle for SpinIdle {
    fn idle(&mut self) {
        core::hint::spin_loop();
        core::hint::spin_loop();
        core::hint::spin_loop();
        core::hint::spin_loop();
    }
}

/// leave resources to the kernel between polls
#[cfg(feature = "std")]
#[derive(Default, Clone, Copy, Debug)]
pub struct YieldIdle;

#[cfg(feature = "std")]
impl Idle for YieldIdle {
    fn idle(&mut self) {
        std::thread::yield_now();
    }
}
