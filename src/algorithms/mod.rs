//! Network propagation and module expansion
//!
//! Both algorithms are pure, single-threaded computations over a shared
//! `&GeneGraph` and can run concurrently without coordination.

pub mod diamond;
pub mod rwr;

pub use diamond::{expand_module, Module};
pub use rwr::{propagate, propagate_run, restart_distribution, RwrRun, ScoreVector};
