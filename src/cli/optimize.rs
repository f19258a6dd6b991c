use super::ui;
use crate::core::{Optimizer, PricingReport, Product};
use anyhow::Result;
use comfy_table::Cell;

impl PricingReport {
    pub fn display_as_table(&self, currency: &str) -> String {
        let mut table = ui::new_styled_table();

        table.set_header(vec![
            ui::header_cell("Product"),
            ui::header_cell(&format!("Cost ({currency})")),
            ui::header_cell(&format!("Base Price ({currency})")),
            ui::header_cell("Sensitivity"),
            ui::header_cell(&format!("Optimized Price ({currency})")),
            ui::header_cell("Base Profit"),
            ui::header_cell("Optimized Profit"),
            ui::header_cell("Status"),
        ]);

        let mut total_base = 0.0;
        let mut total_optimized = 0.0;

        for row in &self.rows {
            let product = &row.product;
            let (price_cell, status_cell) = match &row.outcome {
                Ok(result) => (
                    ui::number_cell(result.optimized_price, |p| format!("{p:.2}")),
                    ui::status_cell(result.converged),
                ),
                Err(e) => (ui::error_cell(&e.to_string()), Cell::new("")),
            };
            let optimized_profit = match row.optimized_profit {
                Some(profit) => {
                    total_base += row.base_profit;
                    total_optimized += profit;
                    ui::profit_cell(profit, row.base_profit)
                }
                None => ui::format_optional_cell(None::<f64>, |v| format!("{v:.2}")),
            };

            table.add_row(vec![
                Cell::new(&product.name),
                ui::number_cell(product.cost_price, |v| format!("{v:.2}")),
                ui::number_cell(product.base_selling_price, |v| format!("{v:.2}")),
                ui::number_cell(product.demand_sensitivity, |v| format!("{v:.3}")),
                price_cell,
                ui::number_cell(row.base_profit, |v| format!("{v:.2}")),
                optimized_profit,
                status_cell,
            ]);
        }

        let mut output = format!(
            "{}\n\n",
            ui::style_text("Optimized Pricing", ui::StyleType::Title)
        );
        output.push_str(&table.to_string());
        output.push_str(&format!(
            "\n\n{} {} {} {}",
            ui::style_text("Total Profit:", ui::StyleType::TotalLabel),
            ui::style_text(&format!("{total_base:.2}"), ui::StyleType::Subtle),
            ui::style_text("->", ui::StyleType::Subtle),
            ui::style_text(&format!("{total_optimized:.2}"), ui::StyleType::TotalValue)
        ));

        output
    }
}

pub fn run(products: &[Product], optimizer: &Optimizer, currency: &str, json: bool) -> Result<()> {
    if products.is_empty() && !json {
        println!("No products to optimize.");
        return Ok(());
    }

    let report = PricingReport::build(products, optimizer);
    if json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", report.display_as_table(currency));
    }
    Ok(())
}
