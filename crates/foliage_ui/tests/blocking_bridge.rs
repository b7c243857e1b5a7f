//! # Blocking Bridge Tests
//!
//! Clipboard and dialog futures are driven to completion on the worker
//! while the calling thread waits.

use std::path::PathBuf;
use std::sync::Arc;
use std::thread::ThreadId;
use std::time::Duration;

use foliage_core::Size;
use foliage_ui::platform::{
    clipboard_text_blocking, open_file_blocking, save_file_blocking, set_clipboard_text_blocking,
    BoxFuture,
};
use foliage_ui::{
    BlockingExecutor, Clipboard, FileDialogOptions, FileDialogs, PlatformWindow, UiError,
};
use parking_lot::Mutex;

#[derive(Default)]
struct MemoryClipboard {
    text: Arc<Mutex<Option<String>>>,
    threads: Arc<Mutex<Vec<ThreadId>>>,
}

impl Clipboard for MemoryClipboard {
    fn text(&self) -> BoxFuture<Option<String>> {
        let text = Arc::clone(&self.text);
        let threads = Arc::clone(&self.threads);
        Box::pin(async move {
            tokio::time::sleep(Duration::from_millis(2)).await;
            threads.lock().push(std::thread::current().id());
            text.lock().clone()
        })
    }

    fn set_text(&self, value: String) -> BoxFuture<()> {
        let text = Arc::clone(&self.text);
        Box::pin(async move {
            *text.lock() = Some(value);
        })
    }
}

struct FixedDialogs;

impl FileDialogs for FixedDialogs {
    fn open_file(&self, options: &FileDialogOptions) -> BoxFuture<Option<PathBuf>> {
        let extension = options.extensions.first().map_or("txt", String::as_str);
        let picked = options
            .directory
            .as_ref()
            .map(|dir| dir.join(format!("picked.{extension}")));
        Box::pin(async move { picked })
    }

    fn save_file(&self, _options: &FileDialogOptions) -> BoxFuture<Option<PathBuf>> {
        Box::pin(async { None })
    }
}

#[derive(Default)]
struct Window {
    clipboard: MemoryClipboard,
}

impl PlatformWindow for Window {
    fn client_size(&self) -> Size {
        Size::new(640, 480)
    }

    fn request_frame(&self) {}

    fn file_dialogs(&self) -> Option<&dyn FileDialogs> {
        Some(&FixedDialogs)
    }

    fn clipboard(&self) -> Option<&dyn Clipboard> {
        Some(&self.clipboard)
    }
}

#[test]
fn clipboard_round_trips_on_the_worker_thread() {
    let executor = BlockingExecutor::new().unwrap();
    let window = Window::default();

    assert_eq!(clipboard_text_blocking(&executor, &window).unwrap(), None);
    set_clipboard_text_blocking(&executor, &window, "copied").unwrap();
    assert_eq!(
        clipboard_text_blocking(&executor, &window).unwrap().as_deref(),
        Some("copied")
    );

    let threads = window.clipboard.threads.lock();
    assert_eq!(threads.len(), 2);
    assert!(threads.iter().all(|&id| id != std::thread::current().id()));
}

#[test]
fn dialogs_report_selection_and_cancel() {
    let executor = BlockingExecutor::new().unwrap();
    let window = Window::default();
    let options = FileDialogOptions {
        title: "Open".into(),
        directory: Some(PathBuf::from("/tmp")),
        extensions: vec!["toml".into()],
    };

    assert_eq!(
        open_file_blocking(&executor, &window, &options).unwrap(),
        Some(PathBuf::from("/tmp/picked.toml"))
    );
    assert_eq!(save_file_blocking(&executor, &window, &options).unwrap(), None);
}

#[test]
fn panicking_task_leaves_the_bridge_usable() {
    let executor = BlockingExecutor::new().unwrap();
    let window = Window::default();

    let result = executor.block_on(async {
        panic!("task failed");
    });
    assert!(matches!(result, Err(UiError::Executor(_))));

    assert_eq!(executor.block_on(async { 1 }).unwrap(), 1);
    set_clipboard_text_blocking(&executor, &window, "still here").unwrap();
    assert_eq!(
        clipboard_text_blocking(&executor, &window).unwrap().as_deref(),
        Some("still here")
    );
}
