use std::fmt::{Display, Formatter, Result as FmtResult};

use reelhost_core::AppError;

/// Steps of a thumbnail upload, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStage {
    Authenticating,
    Receiving,
    OwnerResolving,
    Validating,
    Naming,
    Persisting,
    Recording,
    Succeeded,
}

impl Display for UploadStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            UploadStage::Authenticating => write!(f, "authenticating"),
            UploadStage::Receiving => write!(f, "receiving"),
            UploadStage::OwnerResolving => write!(f, "owner_resolving"),
            UploadStage::Validating => write!(f, "validating"),
            UploadStage::Naming => write!(f, "naming"),
            UploadStage::Persisting => write!(f, "persisting"),
            UploadStage::Recording => write!(f, "recording"),
            UploadStage::Succeeded => write!(f, "succeeded"),
        }
    }
}

/// Terminal failure of an upload: the step that failed and why.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("thumbnail upload failed while {stage}: {error}")]
pub struct UploadFailure {
    pub stage: UploadStage,
    pub error: AppError,
}

impl UploadFailure {
    pub fn new(stage: UploadStage, error: impl Into<AppError>) -> Self {
        Self {
            stage,
            error: error.into(),
        }
    }
}
