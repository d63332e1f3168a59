//! Trait for device identification

/// Where a device's memory lives relative to the host
///
/// Factorization dispatch keys off this: host tensors go to the host
/// `getrf` kernel, accelerator tensors to the accelerator solver.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    /// Host-addressable memory (CPU)
    Host,
    /// Device memory the host cannot dereference (GPU)
    Accelerator,
}

/// Trait for device identification
pub trait Device: Clone + Send + Sync + 'static {
    /// Unique identifier for this device
    fn id(&self) -> usize;

    /// Check if two devices are the same
    fn is_same(&self, other: &Self) -> bool {
        self.id() == other.id()
    }

    /// Human-readable name
    fn name(&self) -> String {
        format!("Device({})", self.id())
    }
}
