pub mod config;
pub mod ctx;
pub mod emit;
pub mod ops;

use ctx::LogCtx;

pub fn check() -> LogCtx<ops::check::Check> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
pub fn latest() -> LogCtx<ops::latest::Latest> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
pub fn state() -> LogCtx<ops::state::State> { LogCtx { json: config::logs_are_json(), _marker: std::marker::PhantomData } }
