//! Default constants for VM configuration.

/// Initial capacity of the external object binding table.
///
/// Most embeddings bind a handful of host objects at setup; the table
/// grows on demand afterwards.
pub const DEFAULT_EXTERNAL_OBJECTS_CAPACITY: usize = 4;
