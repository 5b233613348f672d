//! Lumped models of the cartridge source and the preamp load.

/// The cartridge-into-preamp network and its user-facing parameters.
pub mod cartridge;
/// Two-terminal branch definitions and the impedance trait.
pub mod component;

pub use cartridge::{CartridgeLoad, CircuitParameters};
pub use component::{divider_ratio, Component, ParallelRc, SeriesRl};
