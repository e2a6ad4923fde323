//! MQTT transport for display payloads.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use rumqttc::{AsyncClient, ConnectionError, Event, EventLoop, MqttOptions, Packet, QoS};
use subway_time_core::{PublishError, Publisher};
use tracing::{debug, info, warn};

use crate::config::BrokerEndpoint;

pub const CLIENT_ID: &str = "subway-time";

const KEEP_ALIVE: Duration = Duration::from_secs(30);
const REQUEST_CAPACITY: usize = 16;
const RECONNECT_DELAY: Duration = Duration::from_secs(5);

pub struct MqttPublisher {
    client: AsyncClient,
}

impl MqttPublisher {
    /// Waits for the broker to accept the connection, then hands the event
    /// loop to a background task that keeps it (re)connected.
    pub async fn connect(
        endpoint: &BrokerEndpoint,
        username: &str,
        password: &str,
    ) -> Result<Self, ConnectionError> {
        let mut options = MqttOptions::new(CLIENT_ID, endpoint.host.as_str(), endpoint.port);
        options
            .set_credentials(username, password)
            .set_keep_alive(KEEP_ALIVE);

        let (client, mut event_loop) = AsyncClient::new(options, REQUEST_CAPACITY);

        loop {
            if let Event::Incoming(Packet::ConnAck(_)) = event_loop.poll().await? {
                break;
            }
        }

        tokio::spawn(drive(event_loop));

        Ok(Self { client })
    }
}

async fn drive(mut event_loop: EventLoop) {
    loop {
        match event_loop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(_))) => info!("reconnected to MQTT broker"),
            Ok(event) => debug!(?event, "mqtt event"),
            Err(error) => {
                warn!(%error, "MQTT connection error");
                tokio::time::sleep(RECONNECT_DELAY).await;
            }
        }
    }
}

impl Publisher for MqttPublisher {
    fn publish<'a>(
        &'a self,
        topic: &'a str,
        payload: Vec<u8>,
    ) -> Pin<Box<dyn Future<Output = Result<(), PublishError>> + Send + 'a>> {
        // Never waits on the request queue: it stops draining while the broker is down
        Box::pin(async move {
            self.client
                .try_publish(topic, QoS::AtMostOnce, false, payload)
                .map_err(|error| PublishError::Transport(Box::new(error)))
        })
    }
}
