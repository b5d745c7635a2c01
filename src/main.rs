//! MidCity Utilities to Home Assistant Forwarder
//!
//! This application logs in to the MidCity Utilities prepaid portal, scrapes
//! the balance of every meter on the account and publishes it to Home
//! Assistant as sensor state.
//!
//! # Architecture
//!
//! A single poll loop runs one cycle at a time:
//! - **Login**: form login, the session cookie is reused for the fetch
//! - **Fetch + extract**: the meters page is turned into readings
//! - **Publish**: REST state updates or retained MQTT discovery messages
//!
//! # Features
//!
//! - Retry after 60 seconds on a failed login or a crashed cycle
//! - Graceful shutdown on SIGTERM/SIGINT
//! - Log-only mode when no Home Assistant token is available

mod config;
mod error;
mod homeassistant;
mod midcity;
mod model;
mod poller;

#[cfg(test)]
mod test_utils;

use crate::config::{PortalConfig, PublisherKind};
use anyhow::Context;
use crate::homeassistant::{LogOnlyPublisher, MqttPublisher, RestPublisher};
use crate::model::{MeterSource, ReadingPublisher};
use crate::poller::Poller;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal::ctrl_c;
use tokio::signal::unix::{signal, SignalKind};
use tokio::time::Duration;

/// Application entry point.
///
/// Loads configuration, builds the portal session and the publisher, and
/// supervises the poll loop until a shutdown signal arrives. Any startup
/// failure ends the process with that error.
#[tokio::main]
async fn main() -> error::Result<()> {
    let app_config = config::load_app_config()?;
    let options = config::load_options(&app_config.options_path)?;
    tracing_subscriber::fmt()
        .with_max_level(options.log_level(&app_config))
        .init();

    let poller = build_poller(&options, app_config.supervisor_token.as_deref())?;
    let mut sig_term =
        signal(SignalKind::terminate()).context("Failed to register SIGTERM handler")?;

    let mut cycle_task = poller.spawn_cycle(Duration::ZERO);
    tracing::info!("Running... Press Ctrl-C or send SIGTERM to terminate.");
    loop {
        tokio::select! {
            _ = sig_term.recv() => {
                tracing::info!("Received SIGTERM. Exiting...");
                break;
            }
            _ = ctrl_c() => {
                tracing::info!("Received SIGINT. Exiting...");
                break;
            }
            result = &mut cycle_task => {
                let delay = poller.handle_cycle_result(result);
                cycle_task = poller.spawn_cycle(delay);
            }
        }
    }
    cycle_task.abort();
    Ok(())
}

/// Builds the portal session and the publisher and wires them into a poller.
fn build_poller(
    options: &config::Options,
    supervisor_token: Option<&str>,
) -> error::Result<Arc<Poller>> {
    let portal_config = config::portal_config(options)?;
    let source: Arc<dyn MeterSource> = Arc::new(midcity::Client::new(portal_config.clone())?);
    let publisher = build_publisher(options, supervisor_token)?;

    let poller = Arc::new(
        Poller::new(source, publisher, options.scan_interval())
            .with_debug_html_path(options.debug_html_path.as_ref().map(PathBuf::from)),
    );
    log_startup(&portal_config, &poller);
    Ok(poller)
}

/// Picks the publisher from the options.
///
/// REST without any Home Assistant token falls back to logging the readings,
/// so the scraper keeps running and the log shows what would be written.
fn build_publisher(
    options: &config::Options,
    supervisor_token: Option<&str>,
) -> error::Result<Arc<dyn ReadingPublisher>> {
    match options.publisher {
        PublisherKind::Mqtt => {
            let mqtt_config = config::mqtt_config(options);
            tracing::info!(
                "Publishing over MQTT to {}:{}",
                mqtt_config.host,
                mqtt_config.port
            );
            let client = homeassistant::connect_mqtt(&mqtt_config);
            Ok(Arc::new(MqttPublisher::new(client)))
        }
        PublisherKind::Rest => match config::home_assistant_config(options, supervisor_token) {
            Some(ha_config) => {
                tracing::info!("Publishing to Home Assistant API at {}", ha_config.url);
                Ok(Arc::new(RestPublisher::new(ha_config)?))
            }
            None => {
                warn_missing_token();
                Ok(Arc::new(LogOnlyPublisher))
            }
        },
    }
}

fn warn_missing_token() {
    tracing::warn!("{}", "=".repeat(60));
    tracing::warn!("NO HOME ASSISTANT TOKEN CONFIGURED!");
    tracing::warn!("Meter data will be fetched but no sensors can be created.");
    tracing::warn!("Create a Long-Lived Access Token in your Home Assistant profile");
    tracing::warn!("and add it to the add-on configuration as 'ha_token'.");
    tracing::warn!("{}", "=".repeat(60));
}

fn log_startup(portal_config: &PortalConfig, poller: &Poller) {
    tracing::info!("Starting MidCity Utilities sensor for {}", portal_config.url);
    tracing::info!("Scan interval: {} seconds", poller.scan_interval().as_secs());
}
