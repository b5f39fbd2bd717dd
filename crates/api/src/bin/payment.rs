//! Payment service entry point.

use api::config::Config;

#[tokio::main]
async fn main() {
    // 1. Load configuration and initialize tracing
    let config = Config::from_env();
    api::logging::init(&config);

    // 2. Install Prometheus metrics recorder
    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Build the service from the fault table
    let table = config.fault_table().expect("failed to load fault table");
    tracing::info!(rules = table.payment.len(), "loaded payment fault rules");
    let app = api::create_payment_app(api::create_payment_state(&table), metrics_handle);

    // 4. Serve
    tracing::info!("starting payment service");
    api::server::run(&config, app).await.expect("server error");
}
