use actix::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use log::{debug, info};

use crate::error::ProtocolError;
use crate::models::{ClientMessage, ConnectionId, SocketText};
use crate::state::AppState;

/// One WebSocket connection, player or admin console alike.
pub struct PlayerSocket {
    pub id: ConnectionId,
    pub app_state: web::Data<AppState>,
}

impl PlayerSocket {
    pub fn new(app_state: web::Data<AppState>) -> Self {
        Self {
            id: ConnectionId::new_v4(),
            app_state,
        }
    }

    fn handle_text(&self, text: &str) {
        debug!("Received from {}: {}", self.id, text);
        let id = &self.id;
        match ClientMessage::parse(text) {
            Ok(msg) => self.app_state.with_server(|server| server.handle(id, msg)),
            Err(e) => self.app_state.with_server(|server| server.reject(id, &e)),
        }
    }
}

impl Actor for PlayerSocket {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        // Register the actor so it starts receiving broadcasts
        let addr = ctx.address();
        let id = self.id.clone();
        self.app_state.with_server(|server| server.connect(id, addr));
    }

    fn stopping(&mut self, _: &mut Self::Context) -> Running {
        let id = &self.id;
        self.app_state.with_server(|server| server.disconnect(id));
        Running::Stop
    }
}

impl Handler<SocketText> for PlayerSocket {
    type Result = ();

    fn handle(&mut self, msg: SocketText, ctx: &mut Self::Context) {
        ctx.text(msg.0);
    }
}

// WebSocket message handler
impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for PlayerSocket {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Text(text)) => {
                self.handle_text(&text);
            }
            Ok(ws::Message::Binary(_)) => {
                let id = &self.id;
                self.app_state
                    .with_server(|server| server.reject(id, &ProtocolError::BinaryFrame));
            }
            Ok(ws::Message::Ping(msg)) => {
                ctx.pong(&msg);
            }
            Ok(ws::Message::Pong(_)) => {}
            Ok(ws::Message::Close(reason)) => {
                info!("Connection {} closing: {:?}", self.id, reason);
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {}
            Err(e) => {
                info!("Protocol error on {}: {}", self.id, e);
                ctx.stop();
            }
        }
    }
}

/// WebSocket upgrade for players and the admin console
pub async fn ws_index(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let socket = PlayerSocket::new(app_state);
    info!("New WebSocket connection: {}", socket.id);
    ws::start(socket, &req, stream)
}
