//! Session persistence types

pub mod snapshot;

pub use snapshot::SessionSnapshot;
