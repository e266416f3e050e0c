// Workload scenarios
// Each module contributes one UserFlow implementation chaining dependent actions

pub mod accounts;
pub mod cards;
pub mod pix;

pub use accounts::AccountFlow;
pub use cards::CardFlow;
pub use pix::PixFlow;
