use std::process::exit;
use std::sync::Arc;
use std::time::Duration;
use clap::Parser;
use log::{error, info, warn};
use tokio::net::TcpListener;
use tokio::runtime::Builder;
use tokio::sync::{mpsc, watch};
use tokio_shutdown::Shutdown;
use magnet_swarm::announce::enums::tracker_status::TrackerStatus;
use magnet_swarm::announce::structs::announce_coordinator::AnnounceCoordinator;
use magnet_swarm::catalog::catalog::build_catalog;
use magnet_swarm::catalog::structs::catalog_reconciler::CatalogReconciler;
use magnet_swarm::common::common::{flag_raised, setup_logging};
use magnet_swarm::config::structs::configuration::Configuration;
use magnet_swarm::peer::peer::peer_listener;
use magnet_swarm::session::enums::session_status::SessionStatus;
use magnet_swarm::session::structs::ensure_options::EnsureOptions;
use magnet_swarm::session::structs::session_registry::SessionRegistry;
use magnet_swarm::structs::Cli;

#[tracing::instrument(level = "debug")]
fn main() -> std::io::Result<()>
{
    let args = Cli::parse();

    let config = match Configuration::load_from_file(&args.config, args.create_config) {
        Ok(config) => Arc::new(config),
        Err(_) => exit(101)
    };

    if let Err(e) = setup_logging(&config) {
        eprintln!("{e}");
        exit(102);
    }

    info!("{} - Version: {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    info!("[BOOT] Metadata validation: {}", config.swarm.validation);

    Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let tokio_shutdown = match Shutdown::new() {
                Ok(shutdown) => shutdown,
                Err(e) => {
                    error!("[BOOT] Unable to install the shutdown handler: {e}");
                    exit(103);
                }
            };
            let (shutdown_tx, shutdown_rx) = watch::channel(false);

            let backend = build_catalog(&config.catalog);
            let (catalog_tx, catalog_rx) = mpsc::unbounded_channel();
            let coordinator = Arc::new(AnnounceCoordinator::new(&config.announce));
            let registry = Arc::new(SessionRegistry::new(config.clone(), coordinator.clone(), Some(catalog_tx)));
            let reconciler = Arc::new(CatalogReconciler::new(backend, registry.clone()));

            info!("[BOOT] Starting catalog reconciler...");
            let reconciler_task = tokio::spawn(reconciler.clone().run(
                catalog_rx,
                shutdown_rx.clone(),
                Duration::from_secs(config.catalog.retry_interval),
                Duration::from_secs(config.catalog.repair_interval),
            ));

            match reconciler.reload_from_catalog().await {
                Ok(count) => info!("[BOOT] Restored {count} sessions from the catalog"),
                Err(e) => error!("[BOOT] Unable to read the catalog, starting empty: {e}"),
            }

            for magnet in args.magnets.iter() {
                match registry.ensure_session(magnet, EnsureOptions::default()).await {
                    Ok(handle) => info!("[BOOT] Session {} ready for '{}'", handle.content_hash(), handle.display_name()),
                    Err(e) => error!("[BOOT] Unable to add '{magnet}': {e}"),
                }
            }

            let listener_task = match TcpListener::bind(&config.swarm.listen_address).await {
                Ok(listener) => Some(tokio::spawn(peer_listener(listener, registry.clone(), shutdown_rx.clone()))),
                Err(e) => {
                    warn!("[BOOT] Unable to listen on {}: {e}, inbound peers are disabled", config.swarm.listen_address);
                    None
                }
            };

            let console_interval = config.log_console_interval;
            let stats_task = if console_interval > 0 {
                info!("[BOOT] Starting thread for console updates with {console_interval} seconds delay...");
                let registry = registry.clone();
                let coordinator = coordinator.clone();
                let mut stats_shutdown = shutdown_rx.clone();
                Some(tokio::spawn(async move {
                    let mut interval = tokio::time::interval(Duration::from_secs(console_interval));
                    loop {
                        tokio::select! {
                            _ = interval.tick() => {
                                let snapshots: Vec<_> = registry.list().iter().map(|handle| handle.snapshot()).collect();
                                let peers: usize = snapshots.iter().map(|snapshot| snapshot.live_peers()).sum();
                                let awaiting = snapshots.iter().filter(|snapshot| snapshot.status == SessionStatus::AwaitingMetadata).count();
                                let trackers = coordinator.get_tracker_states();
                                let healthy = trackers.iter().filter(|state| state.status == TrackerStatus::Active).count();
                                info!(
                                    "[STATS] Sessions: {} - Peers: {} - Awaiting metadata: {} - Trackers: {}/{} healthy",
                                    snapshots.len(), peers, awaiting, healthy, trackers.len()
                                );
                            }
                            _ = flag_raised(&mut stats_shutdown) => {
                                info!("[BOOT] Shutting down thread for console updates...");
                                return;
                            }
                        }
                    }
                }))
            } else {
                None
            };

            tokio_shutdown.handle().await;
            info!("Shutdown request received, shutting down...");

            let _ = shutdown_tx.send(true);
            let _ = reconciler_task.await;
            if let Some(task) = listener_task {
                let _ = task.await;
            }
            if let Some(task) = stats_task {
                let _ = task.await;
            }
            registry.shutdown_all().await;

            info!("Server shutting down completed");
            Ok(())
        })
}
