use crate::transformation::voxelization::DegenerateInputError;
use alloc::boxed::Box;
use core::fmt;

/// The external service involved in a failure.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ServiceKind {
    /// The signed distance field baker.
    SdfBaker,
    /// The iso-surface extractor.
    IsoSurfaceExtractor,
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceKind::SdfBaker => write!(f, "SDF baker"),
            ServiceKind::IsoSurfaceExtractor => write!(f, "iso-surface extractor"),
        }
    }
}

/// A failure reported by a signed distance field baker or an iso-surface extractor.
#[derive(thiserror::Error, Debug)]
#[error("the {service} failed: {source}")]
pub struct ExternalServiceError {
    /// The service that failed.
    pub service: ServiceKind,
    /// The error reported by the service.
    #[source]
    pub source: Box<dyn core::error::Error + Send + Sync>,
}

impl ExternalServiceError {
    /// Wraps an error reported by `service`.
    pub fn new(
        service: ServiceKind,
        source: impl Into<Box<dyn core::error::Error + Send + Sync>>,
    ) -> Self {
        Self {
            service,
            source: source.into(),
        }
    }
}

/// Error raised while sampling the surface of a mesh.
#[derive(thiserror::Error, Debug)]
pub enum SamplingError {
    /// The mesh bounding box cannot be voxelized.
    #[error(transparent)]
    Degenerate(#[from] DegenerateInputError),
    /// The signed distance field bake failed.
    #[error(transparent)]
    Bake(ExternalServiceError),
    /// The iso-surface extraction failed.
    #[error(transparent)]
    Extract(ExternalServiceError),
}
