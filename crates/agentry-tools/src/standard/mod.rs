//! Built-in tools.

#[cfg(feature = "io")]
pub mod io;
#[cfg(feature = "network")]
pub mod network;

#[cfg(feature = "io")]
pub use io::*;
#[cfg(feature = "network")]
pub use network::*;
