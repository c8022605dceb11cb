use std::sync::mpsc::{Receiver, Sender};

use crate::credentials::Credentials;
use crate::error::Result;
use crate::lang::Lang;
use crate::session::Session;

pub struct TranslationJob {
    pub text: String,
    pub from: Lang,
    pub to: Lang,
    pub credentials: Credentials,
}

pub struct TranslationOutcome {
    pub original: String,
    pub result: Result<String>,
}

/// Runs jobs one at a time on a dedicated thread. The thread ends once every
/// job sender is dropped; an outcome whose receiver is gone is discarded.
pub fn spawn_translation_thread(
    job_rx: Receiver<TranslationJob>,
    result_tx: Sender<TranslationOutcome>,
    session: Session,
) -> std::io::Result<std::thread::JoinHandle<()>> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    std::thread::Builder::new()
        .name("translate-worker".into())
        .spawn(move || {
            rt.block_on(async move {
                while let Ok(job) = job_rx.recv() {
                    let result = session
                        .translate(&job.text, job.from, job.to, &job.credentials)
                        .await;
                    match &result {
                        Ok(_) => tracing::info!("Translation complete"),
                        Err(e) => tracing::error!("Translation failed: {}", e),
                    }
                    let outcome = TranslationOutcome {
                        original: job.text,
                        result,
                    };
                    if result_tx.send(outcome).is_err() {
                        break;
                    }
                }
            });
            tracing::debug!("Translation worker stopped");
        })
}
