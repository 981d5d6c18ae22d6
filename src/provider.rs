use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use crate::record::Dataset;
use crate::sheets_fetch::SheetSource;
use crate::state::{Delta, ProviderCommand};
use crate::summary::Summarizer;

/// Runs fetches and summaries off the UI thread. Commands are handled strictly one
/// at a time, in arrival order; nothing runs unless the UI asked for it.
pub fn spawn_provider<S, M>(source: S, summarizer: M, tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>)
where
    S: SheetSource + Send + 'static,
    M: Summarizer + Send + 'static,
{
    thread::spawn(move || {
        for cmd in cmd_rx {
            if !handle_command(&source, &summarizer, &tx, cmd) {
                break;
            }
        }
    });
}

/// Executes one command and reports through `tx`. Returns `false` once the UI side
/// has hung up.
pub fn handle_command<S, M>(source: &S, summarizer: &M, tx: &Sender<Delta>, cmd: ProviderCommand) -> bool
where
    S: SheetSource + ?Sized,
    M: Summarizer + ?Sized,
{
    match cmd {
        ProviderCommand::FetchSheet => {
            if tx.send(Delta::SheetLoading).is_err() {
                return false;
            }
            let line = format!("[INFO] Fetching stats from {}", source.describe());
            if tx.send(Delta::Log(line)).is_err() {
                return false;
            }
            let delta = match source.fetch() {
                Ok(raw) => {
                    let (dataset, report) = Dataset::from_raw(raw);
                    Delta::SetDataset { dataset, report }
                }
                Err(err) => Delta::SheetFailed(format!("{err:#}")),
            };
            tx.send(delta).is_ok()
        }
        ProviderCommand::Summarize { player, record } => {
            if tx
                .send(Delta::SummaryStarted {
                    player: player.clone(),
                })
                .is_err()
            {
                return false;
            }
            let outcome = summarizer.summarize(&record);
            tx.send(Delta::SetSummary { player, outcome }).is_ok()
        }
    }
}
