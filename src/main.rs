use anyhow::Result;
use ipcapture::config::{AppConfig, OutputConfig, OutputFormat};
use ipcapture::{MachineField, MachineInfo, MachineSnapshot};
use std::sync::Arc;
use tokio::time::{Duration, MissedTickBehavior, interval};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let app_config = AppConfig::load()?;
    tracing::debug!(
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
        "starting"
    );

    let snapshot = Arc::new(
        MachineSnapshot::capture_async()
            .await
            .map_err(|e| anyhow::anyhow!("machine snapshot: {}", e))?,
    );
    println!("{}", render(&snapshot.info(), &app_config.output)?);

    if !app_config.watch.enabled {
        return Ok(());
    }

    let observed = Arc::downgrade(&snapshot);
    snapshot.subscribe(move |event| {
        if let Some(snapshot) = observed.upgrade() {
            tracing::info!(
                field = %event.field,
                value = %snapshot.get(event.field),
                "machine field changed"
            );
        }
    });

    let refresh_every = Duration::from_millis(app_config.watch.refresh_interval_ms);
    tracing::info!(interval_ms = app_config.watch.refresh_interval_ms, "watching for changes");

    tokio::select! {
        _ = watch(snapshot.clone(), refresh_every) => {}
        _ = shutdown_signal() => {
            tracing::info!("Received shutdown signal");
        }
    }

    Ok(())
}

async fn watch(snapshot: Arc<MachineSnapshot>, refresh_every: Duration) {
    let mut tick = interval(refresh_every);
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // First tick completes immediately; the initial capture already covered it.
    tick.tick().await;
    loop {
        tick.tick().await;
        match snapshot.refresh_async().await {
            Ok(changed) if !changed.is_empty() => {
                tracing::debug!(changed = ?changed, "refresh applied");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(error = %e, retryable = e.is_retryable(), "refresh failed");
            }
        }
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm = match tokio::signal::unix::signal(
            tokio::signal::unix::SignalKind::terminate(),
        ) {
            Ok(s) => s,
            Err(_) => {
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

fn render(info: &MachineInfo, output: &OutputConfig) -> Result<String> {
    Ok(match output.format {
        OutputFormat::Json if output.pretty => serde_json::to_string_pretty(info)?,
        OutputFormat::Json => serde_json::to_string(info)?,
        OutputFormat::Text => render_text(info),
    })
}

fn render_text(info: &MachineInfo) -> String {
    let width = MachineField::ALL
        .iter()
        .map(|f| f.name().len())
        .max()
        .unwrap_or(0);
    MachineField::ALL
        .iter()
        .map(|f| {
            let dots = ".".repeat(width + 2 - f.name().len());
            format!("{}{}: {}", f.name(), dots, info.get(*f))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
