// Scheduler module
// Ramp profiles plus the driver that holds virtual-user populations on target

pub mod driver;
pub mod ramp;

pub use driver::{drive, Scenario, UserFlow};
pub use ramp::{Phase, RampProfile, Stage};
