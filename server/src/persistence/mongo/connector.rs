use std::time::Duration;

use mongodb::bson::doc;
use mongodb::event::cmap::CmapEvent;
use mongodb::event::sdam::SdamEvent;
use mongodb::event::EventHandler;
use mongodb::options::{ClientOptions, Credential};
use mongodb::{Client, Collection, Database};
use tracing::debug;

use crate::persistence::{ConnectionSignal, ConnectionTarget, Connector, SignalSender};

const APP_NAME: &str = "game-catalog-server";
const MAX_POOL_SIZE: u32 = 10;
const SERVER_SELECTION_TIMEOUT: Duration = Duration::from_secs(5);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// A verified client together with the catalog database.
#[derive(Debug, Clone)]
pub struct MongoDatabase {
    client: Client,
    db: Database,
}

impl MongoDatabase {
    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }
}

/// [`Connector`] for the official MongoDB driver.
#[derive(Debug, Clone, Copy, Default)]
pub struct MongoConnector;

impl MongoConnector {
    async fn client_options(
        target: &ConnectionTarget,
        signals: SignalSender,
    ) -> mongodb::error::Result<ClientOptions> {
        let mut options = ClientOptions::parse(target.uri()).await?;
        options.app_name = Some(APP_NAME.to_string());
        options.credential = Some(
            Credential::builder()
                .username(target.account.clone())
                .password(target.secret.clone())
                .build(),
        );
        options.max_pool_size = Some(MAX_POOL_SIZE);
        options.server_selection_timeout = Some(SERVER_SELECTION_TIMEOUT);
        options.connect_timeout = Some(CONNECT_TIMEOUT);

        let sdam = signals.clone();
        options.sdam_event_handler = Some(EventHandler::callback(move |event: SdamEvent| {
            match event {
                SdamEvent::ServerHeartbeatSucceeded(_) => {
                    sdam.send(ConnectionSignal::HeartbeatSucceeded)
                }
                SdamEvent::ServerHeartbeatFailed(failed) => {
                    debug!(server = %failed.server_address, "Heartbeat failed");
                    sdam.send(ConnectionSignal::HeartbeatFailed)
                }
                _ => {}
            }
        }));
        options.cmap_event_handler = Some(EventHandler::callback(move |event: CmapEvent| {
            match event {
                CmapEvent::PoolReady(_) => signals.send(ConnectionSignal::PoolReady),
                CmapEvent::PoolClosed(_) => signals.send(ConnectionSignal::PoolClosed),
                _ => {}
            }
        }));

        Ok(options)
    }
}

impl Connector for MongoConnector {
    type Handle = MongoDatabase;
    type Error = mongodb::error::Error;

    async fn open(
        &self,
        target: &ConnectionTarget,
        signals: SignalSender,
    ) -> Result<MongoDatabase, mongodb::error::Error> {
        let options = Self::client_options(target, signals).await?;
        let client = Client::with_options(options)?;

        if let Err(err) = client.database("admin").run_command(doc! { "ping": 1 }).await {
            client.shutdown().await;
            return Err(err);
        }

        let db = client.database(&target.database);
        Ok(MongoDatabase { client, db })
    }

    async fn close(&self, handle: MongoDatabase) {
        handle.client.shutdown().await;
        debug!("MongoDB client shut down");
    }
}
