use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use crate::provider::ScheduleProvider;
use crate::state::{Delta, ProviderCommand};

/// Runs `provider` on its own thread. Exits when the command channel closes.
pub fn spawn_provider(
    provider: Box<dyn ScheduleProvider>,
    tx: Sender<Delta>,
    cmd_rx: Receiver<ProviderCommand>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let _ = tx.send(Delta::Log(format!(
            "[INFO] Provider ready: {}",
            provider.name()
        )));

        while let Ok(first) = cmd_rx.recv() {
            for cmd in coalesce(first, &cmd_rx) {
                if !handle_command(provider.as_ref(), cmd, &tx) {
                    return;
                }
            }
        }
    })
}

/// Drains whatever else is queued behind `first`, keeping only the newest
/// request of each kind. Older ones would be discarded on arrival anyway.
fn coalesce(first: ProviderCommand, cmd_rx: &Receiver<ProviderCommand>) -> Vec<ProviderCommand> {
    let mut fixtures = None;
    let mut catalog = None;
    let mut keep = |cmd: ProviderCommand| match cmd {
        ProviderCommand::FetchFixtures { .. } => fixtures = Some(cmd),
        ProviderCommand::FetchCatalog { .. } => catalog = Some(cmd),
    };
    keep(first);
    while let Ok(cmd) = cmd_rx.try_recv() {
        keep(cmd);
    }
    catalog.into_iter().chain(fixtures).collect()
}

/// Returns false once the UI side has hung up.
pub fn handle_command(
    provider: &dyn ScheduleProvider,
    cmd: ProviderCommand,
    tx: &Sender<Delta>,
) -> bool {
    let delta = match cmd {
        ProviderCommand::FetchFixtures { request_id, teams } => {
            match provider.fetch_fixtures(&teams) {
                Ok(fixtures) => Delta::SetFixtures {
                    request_id,
                    fixtures,
                },
                Err(err) => Delta::FixturesFailed {
                    request_id,
                    error: format!("{err:#}"),
                },
            }
        }
        ProviderCommand::FetchCatalog { request_id } => match provider.fetch_teams() {
            Ok(teams) => Delta::SetCatalog { request_id, teams },
            Err(err) => Delta::CatalogFailed {
                request_id,
                error: format!("{err:#}"),
            },
        },
    };
    tx.send(delta).is_ok()
}
