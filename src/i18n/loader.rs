use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::output;
use crate::ui::Spinner;

/// Something that can be shown while translations load.
pub trait Overlay: Send + 'static {
    fn show(&mut self);
    fn hide(&mut self);
}

/// Terminal spinner overlay. Stays hidden in quiet mode.
pub struct SpinnerOverlay {
    message: String,
    spinner: Option<Spinner>,
}

impl SpinnerOverlay {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            spinner: None,
        }
    }
}

impl Overlay for SpinnerOverlay {
    fn show(&mut self) {
        if self.spinner.is_none() && !output::is_quiet() {
            self.spinner = Some(Spinner::new(&self.message));
        }
    }

    fn hide(&mut self) {
        self.spinner = None;
    }
}

/// Shows an overlay while the language provider has a request in flight.
pub struct TranslationLoader {
    task: JoinHandle<()>,
}

impl TranslationLoader {
    /// Follows `translating` until the provider goes away or the loader is
    /// dropped.
    pub fn spawn<O: Overlay>(mut translating: watch::Receiver<bool>, mut overlay: O) -> Self {
        let task = tokio::spawn(async move {
            let mut visible = false;
            loop {
                let busy = *translating.borrow_and_update();
                if busy != visible {
                    if busy {
                        overlay.show();
                    } else {
                        overlay.hide();
                    }
                    visible = busy;
                }

                if translating.changed().await.is_err() {
                    break;
                }
            }
            if visible {
                overlay.hide();
            }
        });

        Self { task }
    }
}

impl Drop for TranslationLoader {
    fn drop(&mut self) {
        self.task.abort();
    }
}
