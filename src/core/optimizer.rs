//! Profit maximizing price search for a single product.
//!
//! Demand is linear in the relative deviation from the base price, so profit
//! is a parabola in the price. For a negative sensitivity the parabola opens
//! downward and its vertex lies halfway between the cost price and the choke
//! price (where demand reaches zero). The vertex is solved for directly by
//! default; a golden section search over `[cost, choke]` is available as the
//! derivative-free alternative.
//!
//! Products without an interior maximum degrade to a fallback price flagged
//! with `converged = false` rather than failing.
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use super::golden_section::{self, SearchConfig, Status};
use super::product::ProductParameters;

/// Units sold at the base price when nothing else is configured.
pub const DEFAULT_REFERENCE_DEMAND: f64 = 1000.0;

/// Errors reported for inputs the optimizer refuses to price.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum OptimizeError {
    #[error("invalid parameters: {field} = {value}")]
    InvalidParameters { field: &'static str, value: f64 },
}

/// Errors that can occur when building an [`Optimizer`] from settings.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum SettingsError {
    #[error("reference_demand must be finite and positive, got {0}")]
    ReferenceDemand(f64),

    #[error(transparent)]
    Search(#[from] golden_section::ConfigError),
}

/// Technique used to locate the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Vertex of the quadratic profit function.
    #[default]
    ClosedForm,
    /// Golden section search over the profitable price range.
    GoldenSection,
}

/// Outcome of optimizing one product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptimizationResult {
    pub optimized_price: f64,
    pub converged: bool,
}

impl OptimizationResult {
    fn found(price: f64) -> Self {
        Self {
            optimized_price: round_currency(price),
            converged: true,
        }
    }

    fn fallback(price: f64) -> Self {
        Self {
            optimized_price: round_currency(price),
            converged: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Optimizer {
    method: Method,
    reference_demand: f64,
    search: SearchConfig,
}

impl Default for Optimizer {
    fn default() -> Self {
        Self {
            method: Method::default(),
            reference_demand: DEFAULT_REFERENCE_DEMAND,
            search: SearchConfig::default(),
        }
    }
}

impl Optimizer {
    /// Creates an optimizer with validated settings.
    ///
    /// # Errors
    ///
    /// Returns an error if `reference_demand` is not positive and finite.
    pub fn new(
        method: Method,
        reference_demand: f64,
        search: SearchConfig,
    ) -> Result<Self, SettingsError> {
        if !reference_demand.is_finite() || reference_demand <= 0.0 {
            return Err(SettingsError::ReferenceDemand(reference_demand));
        }
        Ok(Self {
            method,
            reference_demand,
            search,
        })
    }

    #[must_use]
    pub fn with_method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn reference_demand(&self) -> f64 {
        self.reference_demand
    }

    /// Profit earned at `price` under this optimizer's demand model.
    pub fn profit(&self, params: &ProductParameters, price: f64) -> f64 {
        params.profit(price, self.reference_demand)
    }

    /// Finds the profit maximizing price for `params`.
    ///
    /// The price is rounded to cents and lies between the cost price and the
    /// choke price when the search converges: the vertex is their midpoint and
    /// the golden section search never leaves that bracket.
    ///
    /// # Errors
    ///
    /// Returns [`OptimizeError::InvalidParameters`] for non-positive prices or
    /// non-finite inputs.
    pub fn optimize_parameters(
        &self,
        params: &ProductParameters,
    ) -> Result<OptimizationResult, OptimizeError> {
        params.validate()?;

        let Some(choke) = params.choke_price() else {
            debug!(
                sensitivity = params.demand_sensitivity,
                "Profit has no interior maximum, keeping base price"
            );
            return Ok(OptimizationResult::fallback(params.base_selling_price));
        };

        if !choke.is_finite() {
            debug!(
                base = params.base_selling_price,
                sensitivity = params.demand_sensitivity,
                "Choke price overflows, keeping base price"
            );
            return Ok(OptimizationResult::fallback(params.base_selling_price));
        }

        if choke <= params.cost_price {
            // Every price at or above cost sells nothing or loses money.
            debug!(
                choke,
                cost = params.cost_price,
                "No profitable price exists, using break-even price"
            );
            return Ok(OptimizationResult::fallback(params.cost_price));
        }

        let price = match self.method {
            Method::ClosedForm => (params.cost_price + choke) / 2.0,
            Method::GoldenSection => {
                let solution = golden_section::maximize(
                    |p| self.profit(params, p),
                    [params.cost_price, choke],
                    &self.search,
                );
                debug!(
                    iters = solution.iters,
                    status = ?solution.status,
                    x = solution.x,
                    "Golden section search finished"
                );
                if solution.status != Status::Converged {
                    return Ok(OptimizationResult::fallback(params.base_selling_price));
                }
                solution.x
            }
        };

        // Both methods stay within [cost, choke].
        Ok(OptimizationResult::found(price))
    }

    /// Convenience wrapper over [`Optimizer::optimize_parameters`].
    ///
    /// # Errors
    ///
    /// See [`Optimizer::optimize_parameters`].
    pub fn optimize(
        &self,
        cost_price: f64,
        base_selling_price: f64,
        demand_sensitivity: f64,
    ) -> Result<OptimizationResult, OptimizeError> {
        self.optimize_parameters(&ProductParameters::new(
            cost_price,
            base_selling_price,
            demand_sensitivity,
        ))
    }
}

/// Optimizes a single product with the default closed form optimizer.
///
/// # Errors
///
/// Returns [`OptimizeError::InvalidParameters`] for non-positive prices or
/// non-finite inputs.
pub fn optimize(
    cost_price: f64,
    base_selling_price: f64,
    demand_sensitivity: f64,
) -> Result<OptimizationResult, OptimizeError> {
    Optimizer::default().optimize(cost_price, base_selling_price, demand_sensitivity)
}

/// Rounds to 2 decimal places, midpoint away from zero.
fn round_currency(value: f64) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}
