use kanal::{AsyncReceiver, AsyncSender};
use lexi_types::{AppEvent, SessionSnapshot};
use tokio_util::sync::CancellationToken;

use crate::search::{Completion, SearchController};

/// Everything the loop reacts to, merged onto one channel
enum Inbound {
    Event(AppEvent),
    Completion(Completion),
}

/// Move messages from `rx` onto the merged inbox until cancelled.
///
/// A kanal receive must only ever race cancellation: a receive future dropped
/// after a sender handed it a value loses that value. `on_close` is delivered
/// when `rx` disconnects.
fn spawn_forwarder<T: Send + 'static>(
    rx: AsyncReceiver<T>,
    inbox: AsyncSender<Inbound>,
    wrap: fn(T) -> Inbound,
    on_close: Option<Inbound>,
    cancel: CancellationToken,
) {
    tokio::spawn(async move {
        loop {
            let message = tokio::select! {
                biased;

                _ = cancel.cancelled() => break,
                message = rx.recv() => message,
            };

            let inbound = match message {
                Ok(message) => wrap(message),
                Err(_) => {
                    if let Some(inbound) = on_close {
                        let _ = inbox.send(inbound).await;
                    }
                    break;
                }
            };

            if inbox.send(inbound).await.is_err() {
                break;
            }
        }
    });
}

/// Controller main loop.
///
/// Feeds presentation events and task completions into the controller and
/// publishes a snapshot after every change.
pub async fn event_loop(
    mut controller: SearchController,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<SessionSnapshot>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let (inbox_tx, inbox) = kanal::unbounded_async::<Inbound>();

    let forwarders = cancel.child_token();
    let _stop_forwarders = forwarders.clone().drop_guard();

    // A vanished presentation is treated as a close request
    spawn_forwarder(
        ui_to_app_rx,
        inbox_tx.clone(),
        Inbound::Event,
        Some(Inbound::Event(AppEvent::Close)),
        forwarders.clone(),
    );
    spawn_forwarder(
        controller.completions(),
        inbox_tx,
        Inbound::Completion,
        None,
        forwarders,
    );

    app_to_ui_tx.send(controller.snapshot()).await?;

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let inbound = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("[EVENT_LOOP] Cancelled");
                break;
            }
            inbound = inbox.recv() => inbound?,
        };

        let changed = match inbound {
            Inbound::Event(AppEvent::Close) => {
                tracing::info!("[EVENT_LOOP] Close requested");
                break;
            }
            Inbound::Event(event) => {
                tracing::debug!("[EVENT_LOOP] Event: {:?}", event);
                controller.handle_event(event)
            }
            Inbound::Completion(completion) => controller.apply(completion),
        };

        if changed {
            tracing::debug!("[EVENT_LOOP] Phase now {:?}", controller.session().phase);
            app_to_ui_tx.send(controller.snapshot()).await?;
        }
    }

    Ok(())
}
