//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Queues `cmd`; on failure returns the message for the status line.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), String> {
    let cmd_name = cmd.name();
    let request = cmd.request().0;

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, request, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "ui command queue is full");
            Err("UI command queue is full; please retry".to_string())
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "backend command processor disconnected");
            Err(
                "Backend command processor disconnected (possible startup/runtime failure); restart the dashboard"
                    .to_string(),
            )
        }
    }
}

/// Failure event for a command that never reached the backend, so the view
/// waiting on it stops loading instead of waiting for a reply that cannot come.
pub fn undelivered_event(cmd: &BackendCommand, message: impl Into<String>) -> UiEvent {
    let context = match cmd {
        BackendCommand::ListOrders { .. } => UiErrorContext::LoadOrders,
        BackendCommand::GetOrder { .. } => UiErrorContext::LoadOrder,
        BackendCommand::CreateOrder { .. } => UiErrorContext::CreateOrder,
        BackendCommand::UpdateOrderStatus { .. } => UiErrorContext::UpdateStatus,
        BackendCommand::DeleteOrder { .. } => UiErrorContext::DeleteOrder,
    };
    UiEvent::Failed {
        request: Some(cmd.request()),
        error: UiError::local(context, message),
    }
}
