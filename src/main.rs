use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use mimic::config::ActuatorConfig;
use mimic::console::ConsoleReader;
use mimic::kernel::time::MonotonicClock;
use mimic::outputs::{ActuatorDriver, LogActuator};
use mimic::{EngineConfig, Reactor};

/// Drive an expressive robot head from speech commands and facial emotion.
#[derive(Debug, Parser)]
#[command(name = "mimic", version)]
struct Args {
    /// TOML config file (defaults apply when omitted)
    #[arg(short, long, env = "MIMIC_CONFIG")]
    config: Option<PathBuf>,

    /// Serial port of the head controller, overrides [actuator].port
    #[arg(long, env = "MIMIC_SERIAL_PORT")]
    serial_port: Option<String>,

    /// Log commands instead of talking to hardware
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Setup Logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber failed")?;

    let args = Args::parse();
    let mut config = EngineConfig::load(args.config.as_deref()).context("loading configuration")?;
    if let Some(port) = args.serial_port {
        config.actuator.port = Some(port);
    }

    tracing::info!("Mimic Engine Booting...");

    // 2. Setup Reactor + Channels
    let (tx, rx) = mpsc::channel(100);
    let mut reactor = Reactor::from_config(rx, &config).context("building engine")?;
    let mut actuator = connect_actuator(&config.actuator, args.dry_run);

    let cancel = CancellationToken::new();
    let clock = MonotonicClock::new();

    // 3. Shutdown on Ctrl+C
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            shutdown.cancel();
        }
    });

    // 4. Spawn Input Reader (Stdin)
    // Plain thread: a pending stdin read must not hold up runtime shutdown.
    println!("System ready. Commands: Imitate, Stop, Happy, Sad, Angry, Left, Right, Middle.");
    println!(r#"Feed frames with {{"frame": "happy"}}."#);
    let console = ConsoleReader::new(std::io::BufReader::new(std::io::stdin()), tx, clock, cancel.clone());
    std::thread::Builder::new()
        .name("console".into())
        .spawn(move || console.run())
        .context("spawning console reader")?;

    // 5. Run Kernel
    tracing::info!("Mimic Engine Active. Press Ctrl+C to stop.");
    reactor.run(&mut actuator, cancel).await;

    Ok(())
}

fn connect_actuator(config: &ActuatorConfig, dry_run: bool) -> ActuatorDriver {
    match (&config.port, dry_run) {
        (Some(port), false) => open_serial(port, config),
        _ => ActuatorDriver::new(Box::new(LogActuator)),
    }
}

#[cfg(feature = "serial")]
fn open_serial(port: &str, config: &ActuatorConfig) -> ActuatorDriver {
    use std::time::Duration;
    use mimic::outputs::serial::SerialActuator;

    match SerialActuator::open(port, config.baud_rate, Duration::from_millis(config.settle_ms)) {
        Ok(serial) => ActuatorDriver::new(Box::new(serial)),
        Err(e) => {
            tracing::warn!("Error connecting to actuator on {}: {}", port, e);
            ActuatorDriver::unavailable()
        }
    }
}

#[cfg(not(feature = "serial"))]
fn open_serial(port: &str, _config: &ActuatorConfig) -> ActuatorDriver {
    tracing::warn!(
        "Built without the `serial` feature, cannot open {}; commands will be dropped",
        port
    );
    ActuatorDriver::unavailable()
}
