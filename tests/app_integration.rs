use std::fs;
use std::thread;

use profitmax::core::{Method, Optimizer, PricingReport, optimize};
use tracing::info;

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    fs::write(config_file.path(), content).expect("Failed to write config file");
    config_file
}

#[test_log::test]
fn test_full_app_flow_with_table_output() {
    let config_file = write_config(
        r#"
        products:
          - name: "Product A"
            cost_price: 100.0
            base_selling_price: 150.0
            demand_sensitivity: -0.3
          - name: "Product B"
            cost_price: 250.0
            base_selling_price: 400.0
            demand_sensitivity: -0.4
        currency: "USD"
    "#,
    );

    let result = profitmax::run_command(
        profitmax::AppCommand::Optimize {
            json: false,
            method: None,
        },
        Some(config_file.path().to_str().unwrap()),
    );
    assert!(
        result.is_ok(),
        "Main function failed with: {:?}",
        result.err()
    );
}

#[test_log::test]
fn test_full_app_flow_with_json_and_golden_section() {
    let config_file = write_config(
        r#"
        products:
          - name: "Product A"
            cost_price: 100.0
            base_selling_price: 150.0
            demand_sensitivity: -0.3
          - name: "Invalid"
            cost_price: 0.0
            base_selling_price: 10.0
            demand_sensitivity: -0.3
        optimizer:
          method: closed_form
    "#,
    );

    let result = profitmax::run_command(
        profitmax::AppCommand::Optimize {
            json: true,
            method: Some(Method::GoldenSection),
        },
        Some(config_file.path().to_str().unwrap()),
    );
    assert!(
        result.is_ok(),
        "Main function failed with: {:?}",
        result.err()
    );
}

#[test_log::test]
fn test_missing_config_fails() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.yaml");

    let result = profitmax::run_command(
        profitmax::AppCommand::Optimize {
            json: false,
            method: None,
        },
        Some(missing.to_str().unwrap()),
    );
    let err = result.unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test_log::test]
fn test_invalid_optimizer_settings_fail() {
    let config_file = write_config(
        r#"
        products: []
        optimizer:
          reference_demand: 0.0
    "#,
    );

    let result = profitmax::run_command(
        profitmax::AppCommand::Optimize {
            json: true,
            method: None,
        },
        Some(config_file.path().to_str().unwrap()),
    );
    assert!(result.is_err());
}

#[test_log::test]
fn test_setup_then_optimize_example_config() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.yaml");

    profitmax::cli::setup::setup_at_path(&config_path).unwrap();
    let config = profitmax::core::config::AppConfig::load_from_path(&config_path).unwrap();
    let report = PricingReport::build(&config.products, &config.optimizer.build().unwrap());

    for row in &report.rows {
        let optimized = row.optimized_profit.expect("example products are valid");
        info!(product = %row.product.name, optimized, base = row.base_profit, "Example product");
        assert!(optimized >= row.base_profit);
    }
}

#[test_log::test]
fn test_concurrent_optimization_matches_sequential() {
    let inputs = [
        (100.0, 150.0, -0.3),
        (250.0, 400.0, -0.4),
        (50.0, 80.0, -0.5),
        (10.0, 12.0, -1.2),
    ];
    let optimizer = Optimizer::default().with_method(Method::GoldenSection);

    let handles: Vec<_> = inputs
        .iter()
        .map(|&(cost, base, sensitivity)| {
            thread::spawn(move || optimizer.optimize(cost, base, sensitivity).unwrap())
        })
        .collect();

    for (handle, &(cost, base, sensitivity)) in handles.into_iter().zip(inputs.iter()) {
        let concurrent = handle.join().unwrap();
        let sequential = optimizer.optimize(cost, base, sensitivity).unwrap();
        assert_eq!(concurrent, sequential);
    }
}

#[test_log::test]
fn test_profit_improves_for_reference_scenarios() {
    let optimizer = Optimizer::default();
    for (cost, base, sensitivity) in [(100.0, 150.0, -0.3), (250.0, 400.0, -0.4)] {
        let params = profitmax::core::ProductParameters::new(cost, base, sensitivity);
        let result = optimize(cost, base, sensitivity).unwrap();
        assert!(result.converged);
        assert!(result.optimized_price > cost);
        assert!(optimizer.profit(&params, result.optimized_price) > optimizer.profit(&params, base));
    }

    assert!(optimize(0.0, 150.0, -0.3).is_err());
}
