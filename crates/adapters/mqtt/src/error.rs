//! MQTT adapter error type.

use relayhub_domain::error::RelayHubError;

/// Error raised when the rumqttc client rejects a request.
#[derive(Debug, thiserror::Error)]
#[error("MQTT client error")]
pub struct MqttError(#[from] rumqttc::ClientError);

impl MqttError {
    /// Convert into a [`RelayHubError::Session`] for propagation across the
    /// port boundary.
    #[must_use]
    pub fn into_domain(self) -> RelayHubError {
        RelayHubError::Session(Box::new(self))
    }
}

impl From<MqttError> for RelayHubError {
    fn from(err: MqttError) -> Self {
        err.into_domain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rumqttc::{AsyncClient, MqttOptions, QoS};

    // Dropping the event loop closes the request channel, which is the only
    // way to obtain a real ClientError without a broker.
    fn client_error() -> rumqttc::ClientError {
        let (client, event_loop) = AsyncClient::new(MqttOptions::new("t", "localhost", 1883), 1);
        drop(event_loop);
        client
            .try_publish("topic", QoS::AtLeastOnce, false, "1")
            .unwrap_err()
    }

    #[test]
    fn should_convert_client_error_into_session_error() {
        let converted: RelayHubError = MqttError::from(client_error()).into();
        assert!(matches!(converted, RelayHubError::Session(_)));
    }

    #[test]
    fn should_display_client_error_message() {
        assert_eq!(
            MqttError::from(client_error()).to_string(),
            "MQTT client error"
        );
    }
}
