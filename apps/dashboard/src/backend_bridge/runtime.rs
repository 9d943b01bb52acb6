//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{GatewayError, OrderGateway};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::{BackendCommand, RequestId};
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Starts the backend worker thread. Every command runs as its own task, so
/// a slow request never holds up the others.
pub fn launch(
    gateway: Arc<dyn OrderGateway>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                let _ = ui_tx.try_send(UiEvent::Failed {
                    request: None,
                    error: UiError::local(
                        UiErrorContext::BackendStartup,
                        format!("backend worker startup failure: failed to build runtime: {err}"),
                    ),
                });
                return;
            }
        };

        runtime.block_on(async move {
            tracing::debug!("backend worker ready");
            while let Ok(cmd) = cmd_rx.recv() {
                let gateway = Arc::clone(&gateway);
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    let event = handle_command(gateway.as_ref(), cmd).await;
                    if let Err(err) = ui_tx.try_send(event) {
                        tracing::warn!("dropping backend event, ui queue unavailable: {err}");
                    }
                });
            }
            tracing::debug!("ui command queue closed; backend worker stopping");
        });
    })
}

pub async fn handle_command(gateway: &dyn OrderGateway, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::ListOrders { request } => match gateway.list_orders().await {
            Ok(orders) => UiEvent::OrdersLoaded { request, orders },
            Err(err) => failed(request, UiErrorContext::LoadOrders, &err),
        },
        BackendCommand::GetOrder { request, order_id } => {
            match gateway.get_order(order_id).await {
                Ok(order) => UiEvent::OrderLoaded { request, order },
                Err(err) => failed(request, UiErrorContext::LoadOrder, &err),
            }
        }
        BackendCommand::CreateOrder { request, draft } => {
            match gateway.create_order(&draft).await {
                Ok(order) => UiEvent::OrderCreated { request, order },
                Err(err) => failed(request, UiErrorContext::CreateOrder, &err),
            }
        }
        BackendCommand::UpdateOrderStatus {
            request,
            order_id,
            status,
        } => match gateway.update_order_status(order_id, status).await {
            Ok(()) => UiEvent::OrderStatusUpdated {
                request,
                order_id,
                status,
            },
            Err(err) => failed(request, UiErrorContext::UpdateStatus, &err),
        },
        BackendCommand::DeleteOrder { request, order_id } => {
            match gateway.delete_order(order_id).await {
                Ok(()) => UiEvent::OrderDeleted { request, order_id },
                Err(err) => failed(request, UiErrorContext::DeleteOrder, &err),
            }
        }
    }
}

fn failed(request: RequestId, context: UiErrorContext, err: &GatewayError) -> UiEvent {
    UiEvent::Failed {
        request: Some(request),
        error: UiError::from_gateway(context, err),
    }
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
