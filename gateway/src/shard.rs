use super::payloads;
use super::payloads::event::Event;
use super::payloads::{HelloData, Opcode, Payload};

use crate::{CloseEvent, EventHandler, GatewayError, Result, ShardInfo};

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpStream;
use tokio::time::{interval_at, sleep, Instant, Interval};
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, warn};

#[cfg(feature = "compression")]
use crate::inflater::Inflater;

type WebSocketTx = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

const GATEWAY_URL: &str = "wss://gateway.discord.gg";
const GATEWAY_VERSION: u8 = 10;
const RECONNECT_DELAY: Duration = Duration::from_secs(5);

pub struct ShardOptions {
    pub token: String,
    pub intents: u64,
    pub shard_info: ShardInfo,
}

/// One websocket connection to the gateway. Session state survives reconnects so that the
/// shard RESUMEs instead of re-IDENTIFYing whenever Discord allows it.
pub struct Shard<H: EventHandler> {
    identify: payloads::Identify,
    handler: Arc<H>,
    session_id: Option<String>,
    resume_url: Option<String>,
    seq: Option<u64>,
    #[cfg(feature = "compression")]
    inflater: Inflater,
}

/// What the read loop should do after a payload has been processed
enum Action {
    Continue,
    StartHeartbeat(Duration),
    Reconnect,
}

impl<H: EventHandler> Shard<H> {
    pub fn new(options: ShardOptions, handler: Arc<H>) -> Shard<H> {
        Shard {
            identify: payloads::Identify::new(options.token, options.shard_info, options.intents),
            handler,
            session_id: None,
            resume_url: None,
            seq: None,
            #[cfg(feature = "compression")]
            inflater: Inflater::new(),
        }
    }

    /// Keeps the shard connected until the gateway closes with a fatal code
    pub async fn run(mut self) -> Result<()> {
        loop {
            match self.connect().await {
                Ok(()) => info!(shard_id = %self.shard_id(), "Connection closed, reconnecting"),
                Err(GatewayError::FatalClose(close)) => {
                    error!(code = close.status_code, reason = %close.error, "Fatal close from gateway");
                    return GatewayError::FatalClose(close).into();
                }
                Err(e) => warn!(shard_id = %self.shard_id(), error = %e, "Connection failed, reconnecting"),
            }

            sleep(RECONNECT_DELAY).await;
        }
    }

    async fn connect(&mut self) -> Result<()> {
        let uri = self.gateway_uri();
        debug!(%uri, "Connecting to gateway");

        let (wss, _) = connect_async(uri.as_str()).await?;
        let (mut ws_tx, mut ws_rx) = wss.split();

        #[cfg(feature = "compression")]
        self.inflater.reset();

        let mut heartbeat: Option<Interval> = None;
        let mut awaiting_ack = false;

        loop {
            let action = tokio::select! {
                _ = tick(&mut heartbeat) => {
                    if awaiting_ack {
                        warn!(shard_id = %self.shard_id(), "Hasn't received heartbeat ack, reconnecting");
                        Action::Reconnect
                    } else {
                        send(&mut ws_tx, &payloads::Heartbeat::new(self.seq)).await?;
                        awaiting_ack = true;
                        Action::Continue
                    }
                }

                message = ws_rx.next() => {
                    match message {
                        None => {
                            info!(shard_id = %self.shard_id(), "Websocket stream ended");
                            Action::Reconnect
                        }

                        Some(Err(e)) => return Err(e.into()),

                        Some(Ok(Message::Close(frame))) => {
                            self.handle_close(frame)?;
                            Action::Reconnect
                        }

                        Some(Ok(Message::Text(text))) => {
                            self.process(text.as_bytes(), &mut ws_tx, &mut awaiting_ack).await?
                        }

                        #[cfg(feature = "compression")]
                        Some(Ok(Message::Binary(data))) => {
                            match self.inflater.inflate(&data)? {
                                Some(raw) => self.process(&raw, &mut ws_tx, &mut awaiting_ack).await?,
                                None => Action::Continue,
                            }
                        }

                        Some(Ok(_)) => Action::Continue,
                    }
                }
            };

            match action {
                Action::Continue => {}
                Action::StartHeartbeat(period) => {
                    heartbeat = Some(interval_at(Instant::now() + period, period));
                    awaiting_ack = false;
                }
                Action::Reconnect => {
                    // best effort, the socket may already be gone
                    let _ = ws_tx.close().await;
                    return Ok(());
                }
            }
        }
    }

    async fn process(
        &mut self,
        raw: &[u8],
        ws_tx: &mut WebSocketTx,
        awaiting_ack: &mut bool,
    ) -> Result<Action> {
        let payload: Payload = match serde_json::from_slice(raw) {
            Ok(payload) => payload,
            Err(e) => {
                // a payload we can't read is not worth dropping the connection over
                error!(error = %e, "Error while deserializing payload");
                return Ok(Action::Continue);
            }
        };

        if let Some(seq) = payload.seq {
            self.seq = Some(seq);
        }

        match payload.opcode {
            Opcode::Dispatch => {
                if let (Some(event_type), Some(data)) = (&payload.event_type, &payload.data) {
                    match Event::decode(event_type, data.get()) {
                        Ok(event) => self.dispatch(event),
                        Err(e) => error!(%event_type, error = %e, "Error decoding dispatch"),
                    }
                }

                Ok(Action::Continue)
            }

            Opcode::Heartbeat => {
                send(ws_tx, &payloads::Heartbeat::new(self.seq)).await?;
                Ok(Action::Continue)
            }

            Opcode::HeartbeatAck => {
                *awaiting_ack = false;
                Ok(Action::Continue)
            }

            Opcode::Reconnect => {
                info!(shard_id = %self.shard_id(), "Received reconnect payload from Discord");
                Ok(Action::Reconnect)
            }

            Opcode::InvalidSession => {
                let resumable = payload
                    .data
                    .as_ref()
                    .and_then(|data| serde_json::from_str::<bool>(data.get()).ok())
                    .unwrap_or(false);

                info!(shard_id = %self.shard_id(), resumable, "Received invalid session payload from Discord");

                if !resumable {
                    self.reset_session();
                }

                Ok(Action::Reconnect)
            }

            Opcode::Hello => {
                let data = payload
                    .data
                    .ok_or(GatewayError::MissingEventData(Opcode::Hello as u8))?;
                let hello: HelloData = serde_json::from_str(data.get())?;

                match (self.session_id.clone(), self.seq) {
                    (Some(session_id), Some(seq)) => {
                        let resume = payloads::Resume::new(
                            self.identify.data.token.clone(),
                            session_id,
                            seq,
                        );

                        send(ws_tx, &resume).await?;
                        info!(shard_id = %self.shard_id(), "Sent RESUME");
                    }
                    _ => {
                        send(ws_tx, &self.identify).await?;
                        info!(shard_id = %self.shard_id(), "Sent IDENTIFY");
                    }
                }

                Ok(Action::StartHeartbeat(Duration::from_millis(hello.heartbeat_interval)))
            }

            _ => Ok(Action::Continue),
        }
    }

    fn dispatch(&mut self, event: Event) {
        match &event {
            Event::Ready(ready) => {
                self.session_id = Some(ready.session_id.clone());
                self.resume_url = Some(ready.resume_gateway_url.clone());

                info!(
                    shard_id = %self.shard_id(),
                    user = %ready.user.username,
                    user_id = %ready.user.id,
                    "Ready"
                );
            }

            Event::Resumed => info!(shard_id = %self.shard_id(), "Resumed"),

            Event::Unknown(event_type) => {
                debug!(%event_type, "Ignoring dispatch");
                return;
            }

            _ => {}
        }

        let handler = Arc::clone(&self.handler);
        tokio::spawn(async move {
            handler.handle_event(event).await;
        });
    }

    fn handle_close(&mut self, frame: Option<CloseFrame<'_>>) -> Result<()> {
        let close = match frame {
            Some(frame) => CloseEvent::new(u16::from(frame.code), frame.reason.to_string()),
            None => {
                info!(shard_id = %self.shard_id(), "Got close from gateway without a frame");
                return Ok(());
            }
        };

        info!(shard_id = %self.shard_id(), code = close.status_code, reason = %close.error, "Got close from gateway");

        if !close.should_reconnect() {
            return GatewayError::FatalClose(close).into();
        }

        if !close.can_resume() {
            self.reset_session();
        }

        Ok(())
    }

    fn reset_session(&mut self) {
        self.session_id = None;
        self.resume_url = None;
        self.seq = None;
    }

    fn gateway_uri(&self) -> String {
        let base = match (&self.session_id, &self.resume_url) {
            (Some(_), Some(url)) => url.as_str(),
            _ => GATEWAY_URL,
        };

        let uri = format!("{}/?v={}&encoding=json", base.trim_end_matches('/'), GATEWAY_VERSION);

        if cfg!(feature = "compression") {
            format!("{}&compress=zlib-stream", uri)
        } else {
            uri
        }
    }

    fn shard_id(&self) -> u16 {
        self.identify.data.shard_info.shard_id
    }
}

async fn send<T: Serialize>(ws_tx: &mut WebSocketTx, payload: &T) -> Result<()> {
    let json = serde_json::to_string(payload)?;
    ws_tx.send(Message::Text(json)).await?;
    Ok(())
}

/// Resolves on the next heartbeat, or never if the heartbeat hasn't been started yet
async fn tick(heartbeat: &mut Option<Interval>) {
    match heartbeat {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending().await,
    }
}
