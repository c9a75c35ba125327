use axum::extract::ws::Message;
use futures_util::{Sink, SinkExt};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::analysis::{run_analysis, AnalysisEvent};
use crate::config_manager::all_languages;
use crate::state::AppState;
use crate::translate::TranslateRequest;

/// Messages a WebSocket client may send
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
enum ClientMessage {
    Analyze {
        #[serde(flatten)]
        request: TranslateRequest,
    },
    FetchLanguages,
    Ping,
}

async fn send_json<S>(sender: &mut S, value: &Value) -> anyhow::Result<()>
where
    S: Sink<Message> + Unpin,
    S::Error: std::error::Error + Send + Sync + 'static,
{
    sender.send(Message::Text(value.to_string())).await?;
    Ok(())
}

pub async fn handle_message<S>(
    state: &AppState,
    client_uid: &str,
    text: &str,
    sender: &mut S,
) -> anyhow::Result<()>
where
    S: Sink<Message> + Unpin,
    S::Error: std::error::Error + Send + Sync + 'static,
{
    let msg: ClientMessage = match serde_json::from_str(text) {
        Ok(msg) => msg,
        Err(e) => {
            warn!("Unknown message from {}: {}", client_uid, e);
            return send_json(
                sender,
                &json!({"type": "error", "text": format!("Unrecognized message: {}", e)}),
            )
            .await;
        }
    };

    match msg {
        ClientMessage::Analyze { request } => {
            handle_analyze(state, client_uid, request, sender).await?;
        }
        ClientMessage::FetchLanguages => {
            send_json(sender, &json!({"type": "languages", "languages": all_languages()})).await?;
        }
        ClientMessage::Ping => {
            send_json(sender, &json!({"type": "pong"})).await?;
        }
    }

    Ok(())
}

/// Run one analysis, forwarding progress events as they happen
async fn handle_analyze<S>(
    state: &AppState,
    client_uid: &str,
    request: TranslateRequest,
    sender: &mut S,
) -> anyhow::Result<()>
where
    S: Sink<Message> + Unpin,
    S::Error: std::error::Error + Send + Sync + 'static,
{
    debug!("Analyze request from {}", client_uid);
    let (tx, mut rx) = mpsc::unbounded_channel::<AnalysisEvent>();

    let run = async move {
        let result = run_analysis(state, &request, Some(&tx)).await;
        drop(tx);
        result
    };

    let forward = async {
        while let Some(event) = rx.recv().await {
            let payload = match serde_json::to_value(&event) {
                Ok(payload) => payload,
                Err(e) => {
                    warn!("Could not serialize event: {}", e);
                    continue;
                }
            };
            if send_json(sender, &payload).await.is_err() {
                break;
            }
        }
    };

    let (result, _) = tokio::join!(run, forward);

    match result {
        Ok(report) => {
            send_json(
                sender,
                &json!({"type": "analysis-complete", "errors": report.errors}),
            )
            .await
        }
        Err(e) => send_json(sender, &json!({"type": "error", "text": e.to_string()})).await,
    }
}
