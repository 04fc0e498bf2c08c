use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{info, warn};
use uuid::Uuid;

use crate::db::txn::SharedTxn;
use crate::extractors::current_user::CurrentUser;
use crate::services::scoreboard::{self, BoardView};
use crate::state::app_state::AppState;
use crate::ws::hub::{BoardBroadcast, ScoreboardRegistry};
use crate::ws::protocol::{ClientMsg, ErrorCode, ServerMsg, Topic, PROTOCOL_VERSION};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let conn_id = Uuid::new_v4();
    let registry = app_state.ws_registry();

    // In tests a shared transaction is injected so the session sees
    // uncommitted rows; in production this is None.
    let shared_txn = SharedTxn::from_req(&req);

    let session = WsSession::new(conn_id, current_user, app_state, registry, shared_txn);
    ws::start(session, &req, stream)
}

pub struct WsSession {
    conn_id: Uuid,
    user_id: i64,
    app_state: web::Data<AppState>,
    registry: Arc<ScoreboardRegistry>,

    // Transaction-per-test hook (None in production)
    shared_txn: Option<SharedTxn>,

    /// Registry tokens per subscribed match.
    subscriptions: HashMap<i64, Uuid>,

    last_heartbeat: Instant,
    hello_done: bool,
}

impl WsSession {
    fn new(
        conn_id: Uuid,
        current_user: CurrentUser,
        app_state: web::Data<AppState>,
        registry: Arc<ScoreboardRegistry>,
        shared_txn: Option<SharedTxn>,
    ) -> Self {
        Self {
            conn_id,
            user_id: current_user.id,
            app_state,
            registry,
            shared_txn,
            subscriptions: HashMap::new(),
            last_heartbeat: Instant::now(),
            hello_done: false,
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn send_error(
        ctx: &mut ws::WebsocketContext<Self>,
        code: ErrorCode,
        message: impl Into<String>,
    ) {
        let msg = ServerMsg::Error {
            code,
            message: message.into(),
        };
        Self::send_json(ctx, &msg);
    }

    fn start_heartbeat(&mut self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(
                    conn_id = %actor.conn_id,
                    user_id = actor.user_id,
                    "[WS SESSION] heartbeat timed out"
                );
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    /// Load the current board and push it to this session.
    fn push_board_state(&self, match_id: i64, ctx: &mut ws::WebsocketContext<Self>) {
        let app_state = self.app_state.clone();
        let shared_txn = self.shared_txn.clone();

        let fut = async move {
            match &shared_txn {
                Some(shared) => scoreboard::board_view(shared.transaction(), match_id).await,
                None => {
                    let db = crate::infra::require_db(&app_state)?;
                    scoreboard::board_view(db, match_id).await
                }
            }
        };

        let fut = actix::fut::wrap_future::<_, Self>(fut).map(
            move |result: Result<BoardView, crate::AppError>, _actor, ctx| match result {
                Ok(board) => {
                    Self::send_json(
                        ctx,
                        &ServerMsg::ScoreboardState {
                            topic: Topic::Scoreboard { match_id },
                            board,
                        },
                    );
                }
                Err(err) => {
                    warn!(match_id, error = %err, "[WS SESSION] failed to load board state");
                    Self::send_error(ctx, ErrorCode::BadTopic, err.to_string());
                }
            },
        );
        ctx.spawn(fut);
    }

    fn handle_client_msg(&mut self, msg: ClientMsg, ctx: &mut ws::WebsocketContext<Self>) {
        match msg {
            ClientMsg::Hello { protocol } => {
                if protocol != PROTOCOL_VERSION {
                    Self::send_error(
                        ctx,
                        ErrorCode::BadProtocol,
                        format!("Unsupported protocol version {protocol}"),
                    );
                    ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                    ctx.stop();
                    return;
                }
                self.hello_done = true;
                Self::send_json(
                    ctx,
                    &ServerMsg::HelloAck {
                        protocol: PROTOCOL_VERSION,
                        user_id: self.user_id,
                    },
                );
            }
            ClientMsg::Subscribe { topic } if self.hello_done => {
                let Topic::Scoreboard { match_id } = topic;
                if self.subscriptions.contains_key(&match_id) {
                    Self::send_json(ctx, &ServerMsg::Ack { message: "already_subscribed" });
                    return;
                }
                let token = self
                    .registry
                    .register(match_id, ctx.address().recipient::<BoardBroadcast>());
                self.subscriptions.insert(match_id, token);
                Self::send_json(ctx, &ServerMsg::Ack { message: "subscribed" });

                // Initial state so the client does not wait for the next edit
                self.push_board_state(match_id, ctx);
            }
            ClientMsg::Unsubscribe { topic } if self.hello_done => {
                let Topic::Scoreboard { match_id } = topic;
                if let Some(token) = self.subscriptions.remove(&match_id) {
                    self.registry.unregister(match_id, token);
                }
                Self::send_json(ctx, &ServerMsg::Ack { message: "unsubscribed" });
            }
            _ => {
                Self::send_error(ctx, ErrorCode::BadRequest, "Hello required first");
            }
        }
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(
            conn_id = %self.conn_id,
            user_id = self.user_id,
            "[WS SESSION] connected"
        );
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        for (match_id, token) in self.subscriptions.drain() {
            self.registry.unregister(match_id, token);
        }
        info!(
            conn_id = %self.conn_id,
            user_id = self.user_id,
            "[WS SESSION] disconnected"
        );
    }
}

impl Handler<BoardBroadcast> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: BoardBroadcast, ctx: &mut Self::Context) {
        // The broadcast only carries the version; fetch the fresh state.
        self.push_board_state(msg.match_id, ctx);
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                match serde_json::from_str::<ClientMsg>(&text) {
                    Ok(client_msg) => self.handle_client_msg(client_msg, ctx),
                    Err(err) => {
                        Self::send_error(
                            ctx,
                            ErrorCode::BadRequest,
                            format!("Unparseable message: {err}"),
                        );
                    }
                }
            }
            Ok(ws::Message::Binary(_)) => {
                Self::send_error(ctx, ErrorCode::BadRequest, "Binary frames are not supported");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(_) => {}
            Err(err) => {
                warn!(
                    conn_id = %self.conn_id,
                    error = %err,
                    "[WS SESSION] protocol error"
                );
                ctx.stop();
            }
        }
    }
}
