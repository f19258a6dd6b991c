//! Golden section search for maximizing a unimodal function of one variable.
//!
//! The search keeps two interior points positioned by the golden ratio,
//! compares their objectives and shrinks the bracket toward the better one.
//! One of the interior points survives each shrink, so every iteration costs
//! a single evaluation.
use thiserror::Error;

/// The inverse golden ratio: 1/φ = φ - 1
const INV_PHI: f64 = 0.618_033_988_749_895;

/// Configuration for the golden section search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    max_iters: usize,
    tolerance: f64,
}

/// Errors that can occur when validating a search config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("tolerance must be finite and non-negative")]
    Tolerance,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            tolerance: 1e-9,
        }
    }
}

impl SearchConfig {
    /// Creates a new config with a validated tolerance.
    ///
    /// # Errors
    ///
    /// Returns an error if the tolerance is negative or non-finite.
    pub fn new(max_iters: usize, tolerance: f64) -> Result<Self, ConfigError> {
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(ConfigError::Tolerance);
        }
        Ok(Self {
            max_iters,
            tolerance,
        })
    }

    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }

    /// Relative bracket width at which the search stops.
    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }
}

/// Indicates whether the search converged or hit the iteration limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Converged,
    MaxIters,
}

/// The best point found by a search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    pub x: f64,
    pub fx: f64,
    pub iters: usize,
    pub status: Status,
}

#[derive(Debug, Clone, Copy)]
struct Bracket {
    left: f64,
    right: f64,
    inner_left: f64,
    inner_right: f64,
}

impl Bracket {
    fn new([a, b]: [f64; 2]) -> Self {
        let (left, right) = if a <= b { (a, b) } else { (b, a) };
        let width = right - left;
        Self {
            left,
            right,
            inner_left: left + (1.0 - INV_PHI) * width,
            inner_right: left + INV_PHI * width,
        }
    }

    fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Shrinks to `[left, inner_right]`; the old `inner_left` becomes `inner_right`.
    fn shrink_right(&mut self) {
        self.right = self.inner_right;
        self.inner_right = self.inner_left;
        self.inner_left = self.left + (1.0 - INV_PHI) * self.width();
    }

    /// Shrinks to `[inner_left, right]`; the old `inner_right` becomes `inner_left`.
    fn shrink_left(&mut self) {
        self.left = self.inner_left;
        self.inner_left = self.inner_right;
        self.inner_right = self.left + INV_PHI * self.width();
    }

    fn is_converged(&self, x: f64, tolerance: f64) -> bool {
        self.width() <= tolerance * x.abs().max(1.0)
    }
}

/// Finds the maximum of `f` within `bracket`.
///
/// The bounds may be given in either order. `f` is assumed unimodal on the
/// bracket; otherwise a local maximum is returned.
pub fn maximize<F>(f: F, bracket: [f64; 2], config: &SearchConfig) -> Solution
where
    F: Fn(f64) -> f64,
{
    let mut bracket = Bracket::new(bracket);
    let mut f_left = f(bracket.inner_left);
    let mut f_right = f(bracket.inner_right);

    for iter in 0..config.max_iters {
        let (x, fx) = best(&bracket, f_left, f_right);
        if bracket.is_converged(x, config.tolerance) {
            return Solution {
                x,
                fx,
                iters: iter,
                status: Status::Converged,
            };
        }

        if f_left >= f_right {
            bracket.shrink_right();
            f_right = f_left;
            f_left = f(bracket.inner_left);
        } else {
            bracket.shrink_left();
            f_left = f_right;
            f_right = f(bracket.inner_right);
        }
    }

    let (x, fx) = best(&bracket, f_left, f_right);
    let status = if bracket.is_converged(x, config.tolerance) {
        Status::Converged
    } else {
        Status::MaxIters
    };
    Solution {
        x,
        fx,
        iters: config.max_iters,
        status,
    }
}

fn best(bracket: &Bracket, f_left: f64, f_right: f64) -> (f64, f64) {
    if f_left >= f_right {
        (bracket.inner_left, f_left)
    } else {
        (bracket.inner_right, f_right)
    }
}
