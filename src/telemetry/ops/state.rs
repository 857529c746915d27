use tracing::Span;
use tracing::info_span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct State;

#[derive(Copy, Clone, Debug)]
pub enum Phase { Show, Plan, Reset }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self { Phase::Show => "show", Phase::Plan => "plan", Phase::Reset => "reset" } }
    fn span(&self) -> Span { match self { Phase::Show => info_span!("show"), Phase::Plan => info_span!("plan"), Phase::Reset => info_span!("reset") } }
}

impl OpMarker for State {
    const NAME: &'static str = "state";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("state") }
}
