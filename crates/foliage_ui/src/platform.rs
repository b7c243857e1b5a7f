//! Platform capabilities and the blocking bridge.
//!
//! The window, its file dialogs and its clipboard are provided by the
//! embedding platform. Dialog and clipboard operations are asynchronous;
//! the UI thread consumes them through [`BlockingExecutor::block_on`],
//! which parks the calling thread while a dedicated worker drives the
//! future. The UI thread is never re-entered while it waits.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::thread::JoinHandle;

use crossbeam_channel::{bounded, unbounded, Sender};
use foliage_core::Size;
use tokio::runtime::{Builder, Runtime};

use crate::error::{UiError, UiResult};

/// Boxed future handed out by platform capabilities.
pub type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// The host window.
pub trait PlatformWindow {
    /// Size of the drawable client area.
    fn client_size(&self) -> Size;

    /// Asks the platform for a frame tick.
    fn request_frame(&self);

    /// File dialogs, if the platform has them.
    fn file_dialogs(&self) -> Option<&dyn FileDialogs> {
        None
    }

    /// Clipboard, if the platform has one.
    fn clipboard(&self) -> Option<&dyn Clipboard> {
        None
    }
}

/// Options for a file dialog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileDialogOptions {
    /// Window title.
    pub title: String,
    /// Directory the dialog opens in.
    pub directory: Option<PathBuf>,
    /// Accepted extensions, without the dot. Empty accepts anything.
    pub extensions: Vec<String>,
}

/// Native open/save dialogs. `None` means the user cancelled.
pub trait FileDialogs {
    /// Shows an open dialog.
    fn open_file(&self, options: &FileDialogOptions) -> BoxFuture<Option<PathBuf>>;

    /// Shows a save dialog.
    fn save_file(&self, options: &FileDialogOptions) -> BoxFuture<Option<PathBuf>>;
}

/// System clipboard.
pub trait Clipboard {
    /// Current text content, `None` if the clipboard holds no text.
    fn text(&self) -> BoxFuture<Option<String>>;

    /// Replaces the clipboard content with `text`.
    fn set_text(&self, text: String) -> BoxFuture<()>;
}

type Job = Box<dyn FnOnce(&Runtime) + Send>;

/// Runs futures to completion on a dedicated worker thread.
///
/// Every call blocks the calling thread until the future finishes.
pub struct BlockingExecutor {
    jobs: Option<Sender<Job>>,
    worker: Option<JoinHandle<()>>,
}

impl BlockingExecutor {
    /// Starts the worker thread and its runtime.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::Executor`] if the thread or the runtime cannot be
    /// created.
    pub fn new() -> UiResult<Self> {
        let (jobs, inbox) = unbounded::<Job>();
        let (ready_tx, ready_rx) = bounded::<Result<(), String>>(1);

        let worker = std::thread::Builder::new()
            .name("foliage-blocking".into())
            .spawn(move || {
                let runtime = match Builder::new_current_thread().enable_time().build() {
                    Ok(runtime) => runtime,
                    Err(e) => {
                        let _ = ready_tx.send(Err(e.to_string()));
                        return;
                    }
                };
                let _ = ready_tx.send(Ok(()));
                while let Ok(job) = inbox.recv() {
                    job(&runtime);
                }
                tracing::debug!("blocking executor stopped");
            })
            .map_err(|e| UiError::Executor(e.to_string()))?;

        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(message)) => {
                let _ = worker.join();
                return Err(UiError::Executor(message));
            }
            Err(_) => {
                let _ = worker.join();
                return Err(UiError::Executor("worker exited during startup".into()));
            }
        }
        tracing::debug!("blocking executor started");

        Ok(Self {
            jobs: Some(jobs),
            worker: Some(worker),
        })
    }

    /// Blocks the calling thread until `future` completes on the worker
    /// and returns its output.
    ///
    /// Must not be called from the worker itself.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::Executor`] if the worker is gone or the future
    /// panicked. A panicking future does not stop the worker; later calls
    /// run normally.
    pub fn block_on<F>(&self, future: F) -> UiResult<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        let jobs = self
            .jobs
            .as_ref()
            .ok_or_else(|| UiError::Executor("executor shut down".into()))?;
        let (done_tx, done_rx) = bounded(1);
        let job: Job = Box::new(move |runtime| {
            // Spawned tasks catch their own panics.
            let _ = done_tx.send(runtime.block_on(runtime.spawn(future)));
        });
        jobs.send(job)
            .map_err(|_| UiError::Executor("worker is gone".into()))?;
        match done_rx.recv() {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) if e.is_panic() => {
                tracing::warn!("blocking task panicked");
                Err(UiError::Executor("task panicked".into()))
            }
            Ok(Err(e)) => Err(UiError::Executor(e.to_string())),
            Err(_) => Err(UiError::Executor("task did not complete".into())),
        }
    }
}

impl Drop for BlockingExecutor {
    fn drop(&mut self) {
        // Closing the channel ends the worker loop.
        self.jobs.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::warn!("blocking executor worker panicked");
            }
        }
    }
}

impl std::fmt::Debug for BlockingExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingExecutor")
            .field("running", &self.jobs.is_some())
            .finish()
    }
}

/// Shows an open dialog and waits for the answer.
///
/// # Errors
///
/// [`UiError::CapabilityNotSupported`] if the window has no file dialogs,
/// or an executor error.
pub fn open_file_blocking(
    executor: &BlockingExecutor,
    window: &dyn PlatformWindow,
    options: &FileDialogOptions,
) -> UiResult<Option<PathBuf>> {
    let dialogs = window
        .file_dialogs()
        .ok_or(UiError::CapabilityNotSupported("file dialogs"))?;
    executor.block_on(dialogs.open_file(options))
}

/// Shows a save dialog and waits for the answer.
///
/// # Errors
///
/// [`UiError::CapabilityNotSupported`] if the window has no file dialogs,
/// or an executor error.
pub fn save_file_blocking(
    executor: &BlockingExecutor,
    window: &dyn PlatformWindow,
    options: &FileDialogOptions,
) -> UiResult<Option<PathBuf>> {
    let dialogs = window
        .file_dialogs()
        .ok_or(UiError::CapabilityNotSupported("file dialogs"))?;
    executor.block_on(dialogs.save_file(options))
}

/// Reads the clipboard text, blocking until it is available.
///
/// # Errors
///
/// [`UiError::CapabilityNotSupported`] without a clipboard, or an executor
/// error.
pub fn clipboard_text_blocking(
    executor: &BlockingExecutor,
    window: &dyn PlatformWindow,
) -> UiResult<Option<String>> {
    let clipboard = window
        .clipboard()
        .ok_or(UiError::CapabilityNotSupported("clipboard"))?;
    executor.block_on(clipboard.text())
}

/// Writes the clipboard text, blocking until the platform confirms.
///
/// # Errors
///
/// [`UiError::CapabilityNotSupported`] without a clipboard, or an executor
/// error.
pub fn set_clipboard_text_blocking(
    executor: &BlockingExecutor,
    window: &dyn PlatformWindow,
    text: impl Into<String>,
) -> UiResult<()> {
    let clipboard = window
        .clipboard()
        .ok_or(UiError::CapabilityNotSupported("clipboard"))?;
    executor.block_on(clipboard.set_text(text.into()))
}
