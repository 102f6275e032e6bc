//! Public library API for capturing, encoding, and comparing behavior snapshots.

/// Value model, comparison engine, binary codec, and result containers.
pub mod snap;
