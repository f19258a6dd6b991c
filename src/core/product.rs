//! Product economics: the inputs to the optimizer and the linear demand model.
use serde::Deserialize;

use super::optimizer::OptimizeError;

/// Economic parameters for a single product.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductParameters {
    pub cost_price: f64,
    pub base_selling_price: f64,
    pub demand_sensitivity: f64,
}

impl ProductParameters {
    pub fn new(cost_price: f64, base_selling_price: f64, demand_sensitivity: f64) -> Self {
        Self {
            cost_price,
            base_selling_price,
            demand_sensitivity,
        }
    }

    /// Checks that both prices are positive and every field is finite.
    ///
    /// # Errors
    ///
    /// Returns [`OptimizeError::InvalidParameters`] naming the first offending field.
    pub fn validate(&self) -> Result<(), OptimizeError> {
        if !self.cost_price.is_finite() || self.cost_price <= 0.0 {
            return Err(OptimizeError::InvalidParameters {
                field: "cost_price",
                value: self.cost_price,
            });
        }
        if !self.base_selling_price.is_finite() || self.base_selling_price <= 0.0 {
            return Err(OptimizeError::InvalidParameters {
                field: "base_selling_price",
                value: self.base_selling_price,
            });
        }
        if !self.demand_sensitivity.is_finite() {
            return Err(OptimizeError::InvalidParameters {
                field: "demand_sensitivity",
                value: self.demand_sensitivity,
            });
        }
        Ok(())
    }

    /// Units sold at `price` given `reference_demand` units sold at the base price.
    pub fn demand(&self, price: f64, reference_demand: f64) -> f64 {
        let relative_change = (price - self.base_selling_price) / self.base_selling_price;
        reference_demand * (1.0 + self.demand_sensitivity * relative_change)
    }

    /// Profit at `price`: margin over cost times demand.
    pub fn profit(&self, price: f64, reference_demand: f64) -> f64 {
        (price - self.cost_price) * self.demand(price, reference_demand)
    }

    /// Price at which demand falls to zero.
    ///
    /// Only exists for a negative sensitivity; `None` otherwise.
    pub fn choke_price(&self) -> Option<f64> {
        let s = self.demand_sensitivity;
        (s < 0.0).then(|| self.base_selling_price * (1.0 - s) / -s)
    }
}

/// A named product as listed in the configuration file.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Product {
    pub name: String,
    pub cost_price: f64,
    pub base_selling_price: f64,
    pub demand_sensitivity: f64,
}

impl Product {
    pub fn parameters(&self) -> ProductParameters {
        ProductParameters::new(
            self.cost_price,
            self.base_selling_price,
            self.demand_sensitivity,
        )
    }
}
