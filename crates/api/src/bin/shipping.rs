//! Shipping service entry point.

use api::config::Config;

#[tokio::main]
async fn main() {
    let config = Config::from_env();
    api::logging::init(&config);

    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    let table = config.fault_table().expect("failed to load fault table");
    tracing::info!(rules = table.shipping.len(), "loaded shipping fault rules");
    let app = api::create_shipping_app(api::create_shipping_state(&table), metrics_handle);

    tracing::info!("starting shipping service");
    api::server::run(&config, app).await.expect("server error");
}
