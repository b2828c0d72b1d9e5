use fern::colors::{Color, ColoredLevelConfig};
use log::info;
use rand::RngExt;
use tokio::sync::watch;
use crate::common::structs::custom_error::CustomError;
use crate::config::structs::configuration::Configuration;
use crate::wire::structs::peer_id::PeerId;

const PEER_ID_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

pub fn setup_logging(config: &Configuration) -> Result<(), CustomError>
{
    let level = match config.log_level.as_str() {
        "off" => log::LevelFilter::Off,
        "trace" => log::LevelFilter::Trace,
        "debug" => log::LevelFilter::Debug,
        "info" => log::LevelFilter::Info,
        "warn" => log::LevelFilter::Warn,
        "error" => log::LevelFilter::Error,
        _ => {
            return Err(CustomError::new(&format!("Unknown log level encountered: '{}'", config.log_level)));
        }
    };

    let colors = ColoredLevelConfig::new()
        .trace(Color::Cyan)
        .debug(Color::Magenta)
        .info(Color::Green)
        .warn(Color::Yellow)
        .error(Color::Red);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} [{:width$}][{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.9f"),
                colors.color(record.level()),
                record.target(),
                message,
                width = 5
            ))
        })
        .level(level)
        .chain(std::io::stdout())
        .apply()
        .map_err(|_| CustomError::new("Failed to initialize logging."))?;
    info!("logging initialized.");
    Ok(())
}

/// Builds a local peer id from an 8 byte client prefix and 12 random alphanumerics.
pub fn generate_peer_id(prefix: &str) -> PeerId {
    let mut rng = rand::rng();
    let mut id = [0u8; 20];
    for (slot, byte) in id.iter_mut().zip(prefix.bytes().take(8)) {
        *slot = byte;
    }
    let start = prefix.len().min(8);
    for slot in id.iter_mut().skip(start) {
        *slot = PEER_ID_CHARSET[rng.random_range(0..PEER_ID_CHARSET.len())];
    }
    PeerId(id)
}

/// Resolves once `flag` reads true or its sender is gone. The `watch::Ref` is
/// dropped before returning, so callers can await this inside `select!` loops.
pub async fn flag_raised(flag: &mut watch::Receiver<bool>) {
    let _ = flag.wait_for(|raised| *raised).await;
}
