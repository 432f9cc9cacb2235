//! Dispatch worker: owns the tokio runtime and the request session.

use std::{
    thread::{self, JoinHandle},
    time::Duration,
};

use client_core::{DispatchSession, Dispatcher};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

const RUNTIME_SHUTDOWN_GRACE: Duration = Duration::from_secs(1);

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) -> JoinHandle<()> {
    thread::spawn(move || match Dispatcher::new() {
        Ok(dispatcher) => run_worker(dispatcher, cmd_rx, ui_tx),
        Err(err) => {
            tracing::error!("failed to build http client: {err}");
            let _ = ui_tx.send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                format!("backend worker startup failure: failed to build http client: {err}"),
            )));
        }
    })
}

fn run_worker(dispatcher: Dispatcher, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("dispatch-worker")
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            tracing::error!("failed to build backend runtime: {err}");
            let _ = ui_tx.send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                format!("backend worker startup failure: failed to build runtime: {err}"),
            )));
            return;
        }
    };

    let mut session = DispatchSession::new(dispatcher, runtime.handle().clone());
    tracing::info!("dispatch worker ready");
    let _ = ui_tx.send(UiEvent::Info("Dispatch worker ready".to_string()));

    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            BackendCommand::Dispatch { target, request } => {
                let ui_tx = ui_tx.clone();
                session.spawn(target, request, move |request, outcome| {
                    let _ = ui_tx.send(UiEvent::CommandCompleted { request, outcome });
                });
            }
            BackendCommand::Shutdown => break,
        }
    }

    let cancelled = session.cancel_all();
    tracing::info!(cancelled, "dispatch worker stopping");
    runtime.shutdown_timeout(RUNTIME_SHUTDOWN_GRACE);
}
