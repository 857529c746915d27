use anyhow::Result;
use serde::Serialize;

use crate::output::config::OutputConfig;
use crate::output::types::{Envelope, Meta};
use crate::output::Emitter;

use super::config;

fn meta() -> Option<Meta> {
    config::elapsed_ms().map(|ms| Meta { duration_ms: Some(ms) })
}

pub fn print_plan<T: Serialize>(op: &'static str, plan: &T) -> Result<()> {
    let env = Envelope::plan(op, plan, meta())?;
    Emitter::new(OutputConfig::from_env()).emit(&env)?;
    Ok(())
}

pub fn print_result<T: Serialize>(op: &'static str, result: &T) -> Result<()> {
    let env = Envelope::result(op, result, meta())?;
    Emitter::new(OutputConfig::from_env()).emit(&env)?;
    Ok(())
}

pub fn print_error(op: &'static str, message: impl Into<String>) -> Result<()> {
    let env = Envelope::error(op, message, meta());
    Emitter::new(OutputConfig::from_env()).emit(&env)?;
    Ok(())
}
