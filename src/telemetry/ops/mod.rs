pub mod check;
pub mod latest;
pub mod state;
