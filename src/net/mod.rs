//! Network plumbing.
//!
//! Requests run on a small background runtime so the UI thread never blocks.
//! Each completion comes back as a [`ServerReply`] on a channel that the UI
//! thread drains between frames; nothing here touches game state.

mod api;

pub use api::{ApiClient, ApiError};

use color_eyre::Result;
use log::{debug, info};
use tokio::runtime::{Builder, Runtime};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::client::GameAction;
use crate::snapshot::GameSnapshot;

/// Issue order of a request. Later requests carry larger ids, so replies
/// that overtake each other on the wire can be put back in order.
pub type RequestId = u64;

/// The outcome of one request, delivered to the UI thread.
#[derive(Debug)]
pub enum ServerReply {
    Snapshot(RequestId, Result<GameSnapshot, ApiError>),
    Action(RequestId, GameAction, Result<GameSnapshot, ApiError>),
}

pub struct Dispatcher {
    runtime: Runtime,
    api: ApiClient,
    replies: UnboundedSender<ServerReply>,
    last_request: RequestId,
}

impl Dispatcher {
    /// Starts the network runtime. Replies arrive on the returned receiver.
    pub fn launch(api: ApiClient) -> Result<(Self, UnboundedReceiver<ServerReply>)> {
        info!("Launching network runtime for {}", api.base_url());
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("openhs-net")
            .enable_all()
            .build()?;
        let (replies, receiver) = unbounded_channel();

        let dispatcher = Self {
            runtime,
            api,
            replies,
            last_request: 0,
        };
        Ok((dispatcher, receiver))
    }

    pub fn fetch_game(&mut self) -> RequestId {
        let id = self.next_request();
        let api = self.api.clone();
        let replies = self.replies.clone();
        self.runtime.spawn(async move {
            let result = api.fetch_game().await;
            deliver(&replies, ServerReply::Snapshot(id, result));
        });
        id
    }

    pub fn send_action(&mut self, action: GameAction) -> RequestId {
        let id = self.next_request();
        let api = self.api.clone();
        let replies = self.replies.clone();
        self.runtime.spawn(async move {
            let result = api.send_action(&action.to_request()).await;
            deliver(&replies, ServerReply::Action(id, action, result));
        });
        id
    }

    fn next_request(&mut self) -> RequestId {
        self.last_request += 1;
        self.last_request
    }
}

fn deliver(replies: &UnboundedSender<ServerReply>, reply: ServerReply) {
    if replies.send(reply).is_err() {
        // the UI has shut down
        debug!("Dropping server reply: receiver closed");
    }
}
