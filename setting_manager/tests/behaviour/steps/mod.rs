//! Behavioural step modules registered with `rstest-bdd`.

pub mod apply_steps;
pub mod read_steps;
