use tracing::{info_span, Span};

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Check;

#[derive(Copy, Clone, Debug)]
pub enum Phase {
    LoadState,
    Fetch,
    Detect,
    Notify,
    SaveState,
}

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str {
        match self {
            Phase::LoadState => "load_state",
            Phase::Fetch => "fetch",
            Phase::Detect => "detect",
            Phase::Notify => "notify",
            Phase::SaveState => "save_state",
        }
    }

    fn span(&self) -> Span {
        match self {
            Phase::LoadState => info_span!("load_state"),
            Phase::Fetch => info_span!("fetch"),
            Phase::Detect => info_span!("detect"),
            Phase::Notify => info_span!("notify"),
            Phase::SaveState => info_span!("save_state"),
        }
    }
}

impl OpMarker for Check {
    const NAME: &'static str = "check";
    type Phase = Phase;

    fn root_span() -> Span {
        info_span!("check")
    }
}
