//! Panel event loop. Owns the model; everything arrives here as a [`UiEvent`].

use std::io::{self, Write};

use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{notification_for, UiError, UiErrorContext, UiEvent},
    input::{parse_input, PanelInput, HELP},
    orchestration::dispatch_backend_command,
    reducer::PanelModel,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct PanelApp<W: Write> {
    model: PanelModel,
    cmd_tx: Sender<BackendCommand>,
    out: W,
    status: String,
}

impl<W: Write> PanelApp<W> {
    pub fn new(model: PanelModel, cmd_tx: Sender<BackendCommand>, out: W) -> Self {
        Self {
            model,
            cmd_tx,
            out,
            status: String::new(),
        }
    }

    /// Runs until the operator quits or input ends, then tears the worker
    /// down.
    pub fn run(mut self, ui_rx: Receiver<UiEvent>) -> io::Result<()> {
        writeln!(self.out, "Motor panel; device host: {}", display_host(&self.model))?;
        writeln!(self.out, "{}", self.model.state())?;
        self.out.flush()?;

        for event in ui_rx.iter() {
            if self.handle_event(event)? == Flow::Quit {
                break;
            }
        }

        self.shutdown()
    }

    pub fn handle_event(&mut self, event: UiEvent) -> io::Result<Flow> {
        let flow = match event {
            UiEvent::Input(line) => self.handle_input(&line)?,
            UiEvent::InputClosed => Flow::Quit,
            UiEvent::Info(message) => {
                writeln!(self.out, "[info] {message}")?;
                Flow::Continue
            }
            UiEvent::Error(err) => {
                self.render_error(&err)?;
                Flow::Continue
            }
            UiEvent::CommandCompleted { request, outcome } => {
                match notification_for(&outcome) {
                    Ok(text) => writeln!(self.out, "[{request}] {text}")?,
                    Err(err) => {
                        tracing::debug!(path = %request, category = ?err.category(), "command failed");
                        writeln!(self.out, "[{request}] {}", err.message())?
                    }
                }
                Flow::Continue
            }
        };
        self.out.flush()?;
        Ok(flow)
    }

    fn handle_input(&mut self, line: &str) -> io::Result<Flow> {
        let input = match parse_input(line) {
            Ok(input) => input,
            Err(message) => {
                self.render_error(&UiError::from_message(UiErrorContext::Input, message))?;
                return Ok(Flow::Continue);
            }
        };

        match input {
            PanelInput::Intents(intents) => {
                let commands = self.model.reduce(&intents);
                writeln!(self.out, "{}", self.model.state())?;
                for request in commands {
                    let target = self.model.target();
                    dispatch_backend_command(
                        &self.cmd_tx,
                        BackendCommand::Dispatch { target, request },
                        &mut self.status,
                    );
                    self.flush_status()?;
                }
            }
            PanelInput::SetHost(host) => {
                self.model.set_host(host);
                writeln!(self.out, "Device host: {}", display_host(&self.model))?;
            }
            PanelInput::ShowHost => {
                writeln!(self.out, "Device host: {}", display_host(&self.model))?;
            }
            PanelInput::Status => writeln!(self.out, "{}", self.model.state())?,
            PanelInput::Help => writeln!(self.out, "{HELP}")?,
            PanelInput::Quit => return Ok(Flow::Quit),
            PanelInput::Empty => {}
        }
        Ok(Flow::Continue)
    }

    fn shutdown(&mut self) -> io::Result<()> {
        dispatch_backend_command(&self.cmd_tx, BackendCommand::Shutdown, &mut self.status);
        self.flush_status()?;
        self.out.flush()
    }

    fn render_error(&mut self, err: &UiError) -> io::Result<()> {
        match err.context() {
            UiErrorContext::BackendStartup => tracing::error!("{}", err.message()),
            _ => tracing::debug!(category = ?err.category(), "{}", err.message()),
        }
        writeln!(self.out, "[error] {}", err.message())
    }

    fn flush_status(&mut self) -> io::Result<()> {
        if !self.status.is_empty() {
            let status = std::mem::take(&mut self.status);
            writeln!(self.out, "[error] {status}")?;
        }
        Ok(())
    }
}

fn display_host(model: &PanelModel) -> &str {
    if model.host().trim().is_empty() {
        "<unset>"
    } else {
        model.host()
    }
}

#[cfg(test)]
#[path = "../tests/app_tests.rs"]
mod tests;
