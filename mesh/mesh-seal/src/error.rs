//! Error type for the sealing pipeline.

use mesh_region::RegionError;
use mesh_repair::RepairError;
use thiserror::Error;

/// Result type for pipeline operations.
pub type SealResult<T> = Result<T, SealError>;

/// Errors from any stage of the pipeline.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SealError {
    /// Region extraction failed.
    #[error("region extraction failed: {0}")]
    Region(#[from] RegionError),

    /// Boundary tracing or hole capping failed.
    #[error("hole filling failed: {0}")]
    Repair(#[from] RepairError),
}
