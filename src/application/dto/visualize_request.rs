use crate::sbom_analysis::domain::SbomId;
use crate::sbom_analysis::services::{ReducerConfig, TypeFilter};

/// VisualizeRequest - Internal request DTO for graph computation
///
/// Carries the current visibility selection, type filter and reduction
/// thresholds. Threshold changes take effect on the next computation.
#[derive(Debug, Clone, Default)]
pub struct VisualizeRequest {
    /// SBOMs to include; `None` means all currently loaded
    pub visible: Option<Vec<SbomId>>,
    pub filter: TypeFilter,
    pub reducer: ReducerConfig,
}

impl VisualizeRequest {
    pub fn new(visible: Option<Vec<SbomId>>, filter: TypeFilter, reducer: ReducerConfig) -> Self {
        Self {
            visible,
            filter,
            reducer,
        }
    }
}
