//! Runs the optimizer over a set of products and shapes the results for output.
use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, warn};

use super::optimizer::{OptimizationResult, OptimizeError, Optimizer};
use super::product::Product;

/// Flat record handed to consumers of the pricing data.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingRecord {
    pub product: String,
    pub cost_price: f64,
    pub base_selling_price: f64,
    pub demand_sensitivity: f64,
    pub optimized_price: f64,
    pub converged: bool,
}

/// One product together with its optimization outcome.
#[derive(Debug, Clone)]
pub struct PricingRow {
    pub product: Product,
    pub outcome: Result<OptimizationResult, OptimizeError>,
    pub base_profit: f64,
    pub optimized_profit: Option<f64>,
}

impl PricingRow {
    pub fn record(&self) -> Option<PricingRecord> {
        let result = self.outcome.as_ref().ok()?;
        Some(PricingRecord {
            product: self.product.name.clone(),
            cost_price: self.product.cost_price,
            base_selling_price: self.product.base_selling_price,
            demand_sensitivity: self.product.demand_sensitivity,
            optimized_price: result.optimized_price,
            converged: result.converged,
        })
    }
}

#[derive(Debug, Clone)]
pub struct PricingReport {
    pub rows: Vec<PricingRow>,
}

impl PricingReport {
    /// Optimizes every product independently.
    ///
    /// Invalid products keep their error in the row and do not stop the others.
    pub fn build(products: &[Product], optimizer: &Optimizer) -> Self {
        let rows = products
            .iter()
            .map(|product| {
                let params = product.parameters();
                let outcome = optimizer.optimize_parameters(&params);
                match &outcome {
                    Ok(result) => debug!(
                        product = %product.name,
                        price = result.optimized_price,
                        converged = result.converged,
                        "Optimized product"
                    ),
                    Err(e) => warn!(product = %product.name, error = %e, "Skipping product"),
                }

                let optimized_profit = outcome
                    .as_ref()
                    .ok()
                    .map(|r| optimizer.profit(&params, r.optimized_price));
                PricingRow {
                    product: product.clone(),
                    base_profit: optimizer.profit(&params, product.base_selling_price),
                    optimized_profit,
                    outcome,
                }
            })
            .collect();

        Self { rows }
    }

    /// Records for every product that could be priced.
    pub fn records(&self) -> Vec<PricingRecord> {
        self.rows.iter().filter_map(PricingRow::record).collect()
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.records()).context("Failed to serialize pricing records")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn product(name: &str, cost: f64, base: f64, sensitivity: f64) -> Product {
        Product {
            name: name.to_string(),
            cost_price: cost,
            base_selling_price: base,
            demand_sensitivity: sensitivity,
        }
    }

    fn sample_products() -> Vec<Product> {
        vec![
            product("Product A", 100.0, 150.0, -0.3),
            product("Product B", 250.0, 400.0, -0.4),
            product("Broken", 0.0, 10.0, -0.5),
            product("Flat", 20.0, 30.0, 0.0),
        ]
    }

    #[test]
    fn test_report_keeps_errors_per_row() {
        let report = PricingReport::build(&sample_products(), &Optimizer::default());
        assert_eq!(report.rows.len(), 4);

        assert!(report.rows[0].outcome.is_ok());
        assert!(matches!(
            report.rows[2].outcome,
            Err(OptimizeError::InvalidParameters {
                field: "cost_price",
                ..
            })
        ));
        assert!(report.rows[2].optimized_profit.is_none());

        let records = report.records();
        let names: Vec<_> = records.iter().map(|r| r.product.as_str()).collect();
        assert_eq!(names, ["Product A", "Product B", "Flat"]);
        assert!(!records[2].converged);
        assert_relative_eq!(records[2].optimized_price, 30.0);
    }

    #[test]
    fn test_report_profits() {
        let report = PricingReport::build(&sample_products(), &Optimizer::default());
        let row = &report.rows[0];
        assert_relative_eq!(row.base_profit, 50_000.0);
        // 275 margin, 550 units at 375
        assert_relative_eq!(row.optimized_profit.unwrap(), 151_250.0);
    }

    #[test]
    fn test_json_record_fields() {
        let products = [product("Product A", 100.0, 150.0, -0.3)];
        let report = PricingReport::build(&products, &Optimizer::default());
        let json = report.to_json().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let record = &value.as_array().unwrap()[0];
        assert_eq!(record["product"], "Product A");
        assert_eq!(record["cost_price"], 100.0);
        assert_eq!(record["base_selling_price"], 150.0);
        assert_eq!(record["demand_sensitivity"], -0.3);
        assert_eq!(record["optimized_price"], 375.0);
        assert_eq!(record["converged"], true);
    }

    #[test]
    fn test_json_price_stays_numeric_when_choke_overflows() {
        let products = [product("Tiny Sensitivity", 100.0, 150.0, -1e-310)];
        let report = PricingReport::build(&products, &Optimizer::default());
        let json = report.to_json().unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let record = &value.as_array().unwrap()[0];
        assert_eq!(record["optimized_price"], 150.0);
        assert_eq!(record["converged"], false);
    }
}
