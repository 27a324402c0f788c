#![forbid(unsafe_code)]

mod entry;
mod reaper;
mod store;

pub use reaper::{Reaper, SweepReport};
pub use store::{Receipt, SecretStore};
pub use zeroize::Zeroizing;
