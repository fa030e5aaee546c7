//! Algorithm parameters with validated defaults

use crate::error::{Error, Result};

/// Default restart probability
pub const DEFAULT_RESTART: f64 = 0.5;

/// Default iteration cap for RWR
pub const DEFAULT_MAX_ITER: usize = 50;

/// Default L1 convergence tolerance for RWR
pub const DEFAULT_TOL: f64 = 1e-6;

/// Default target module size
pub const DEFAULT_MODULE_SIZE: usize = 50;

/// Random-walk-with-restart parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RwrConfig {
    /// Fraction of mass reinjected at the seeds each step, in (0, 1)
    pub restart: f64,
    /// Maximum number of synchronous iterations
    pub max_iter: usize,
    /// Stop once the L1 change between iterations is strictly below this
    pub tol: f64,
}

impl Default for RwrConfig {
    fn default() -> Self {
        Self {
            restart: DEFAULT_RESTART,
            max_iter: DEFAULT_MAX_ITER,
            tol: DEFAULT_TOL,
        }
    }
}

impl RwrConfig {
    /// Config with a custom restart probability and default iteration settings
    #[must_use]
    pub fn with_restart(restart: f64) -> Self {
        Self {
            restart,
            ..Self::default()
        }
    }

    /// Check parameter domains
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `restart` is not in the open interval
    /// (0, 1) or `tol` is negative or NaN
    pub fn validate(&self) -> Result<()> {
        if !(self.restart > 0.0 && self.restart < 1.0) {
            return Err(Error::invalid(format!(
                "restart probability must be in (0, 1), got {}",
                self.restart
            )));
        }
        if self.tol.is_nan() || self.tol < 0.0 {
            return Err(Error::invalid(format!(
                "tolerance must be non-negative, got {}",
                self.tol
            )));
        }
        Ok(())
    }
}

/// Module expansion parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpansionConfig {
    /// Target number of distinct module members (seeds included)
    pub k: usize,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            k: DEFAULT_MODULE_SIZE,
        }
    }
}

impl ExpansionConfig {
    /// Check parameter domains
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `k` is zero
    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(Error::invalid("module size k must be positive"));
        }
        Ok(())
    }
}
