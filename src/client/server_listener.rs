use color_eyre::{eyre::eyre, Result};
use log::{error, info};
use tokio::sync::mpsc::{error::TryRecvError, UnboundedReceiver};

use crate::net::ServerReply;

/// Drains server replies on the UI thread, one per call.
pub struct ServerListener {
    receiver: UnboundedReceiver<ServerReply>,
}

impl ServerListener {
    pub fn from(receiver: UnboundedReceiver<ServerReply>) -> Self {
        Self { receiver }
    }

    pub fn update(&mut self) -> Result<Option<ServerReply>> {
        match self.receiver.try_recv() {
            Ok(reply) => {
                info!("Received reply from server");
                Ok(Some(reply))
            }
            Err(TryRecvError::Empty) => {
                // no reply: keep waiting
                Ok(None)
            }
            Err(TryRecvError::Disconnected) => {
                error!("Network runtime hung up");
                Err(eyre!("network runtime disconnected"))
            }
        }
    }
}
