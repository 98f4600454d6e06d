use std::path::{Path, PathBuf};
use std::time::Duration;

use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, MouseEvent};
use futures::StreamExt;
use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

#[derive(Clone, Debug)]
pub enum Event {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Tick,
    Resize,
    /// The plan file was written, created or replaced.
    PlanChanged,
}

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    _task: tokio::task::JoinHandle<()>,
    _watcher: Option<RecommendedWatcher>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration, watch: Option<&Path>) -> Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel::<Event>();

        let watcher = match watch {
            Some(path) => Some(watch_plan(path, tx.clone())?),
            None => None,
        };

        let task = tokio::spawn(async move {
            let mut reader = event::EventStream::new();
            let mut tick_interval = tokio::time::interval(tick_rate);

            loop {
                tokio::select! {
                    maybe_event = reader.next() => {
                        match maybe_event {
                            Some(Ok(evt)) => {
                                let mapped = match evt {
                                    CrosstermEvent::Key(key) => Some(Event::Key(key)),
                                    CrosstermEvent::Mouse(mouse) => Some(Event::Mouse(mouse)),
                                    CrosstermEvent::Resize(_, _) => Some(Event::Resize),
                                    _ => None,
                                };
                                if let Some(e) = mapped
                                    && tx.send(e).is_err()
                                {
                                    break;
                                }
                            }
                            Some(Err(_)) => break,
                            None => break,
                        }
                    }
                    _ = tick_interval.tick() => {
                        if tx.send(Event::Tick).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        Ok(Self {
            rx,
            _task: task,
            _watcher: watcher,
        })
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}

/// Watches the plan's directory rather than the file itself, so editors
/// that save by rename are still seen.
fn watch_plan(path: &Path, tx: mpsc::UnboundedSender<Event>) -> Result<RecommendedWatcher> {
    let target: PathBuf = path.to_path_buf();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = target.file_name().map(|f| f.to_os_string());

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        match res {
            Ok(evt) => {
                let relevant = !evt.kind.is_access()
                    && evt
                        .paths
                        .iter()
                        .any(|p| p.file_name().map(|f| f.to_os_string()) == file_name);
                if relevant {
                    let _ = tx.send(Event::PlanChanged);
                }
            }
            Err(err) => tracing::warn!(error = %err, "plan watcher error"),
        }
    })
    .wrap_err("failed to create file watcher")?;

    watcher
        .watch(&dir, RecursiveMode::NonRecursive)
        .wrap_err_with(|| format!("failed to watch {}", dir.display()))?;
    tracing::debug!(path = %target.display(), "watching plan file");
    Ok(watcher)
}
