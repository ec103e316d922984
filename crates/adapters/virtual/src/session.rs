//! Virtual session client — an in-memory stand-in for the cloud bridge.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use relayhub_app::ports::SessionClient;
use relayhub_domain::channel::Channel;
use relayhub_domain::command::InboundMessage;
use relayhub_domain::error::RelayHubError;
use relayhub_domain::value::ChannelValue;

/// A simulated session client.
///
/// Publishes are recorded, inbound messages are injected by the caller and
/// drained by the pump, and connectivity is a settable flag. Clones share
/// state, so tests keep a handle while the control loop owns another.
#[derive(Clone)]
pub struct VirtualSession {
    published: Arc<Mutex<Vec<(Channel, ChannelValue)>>>,
    inbound: Arc<Mutex<VecDeque<InboundMessage>>>,
    connected: Arc<AtomicBool>,
}

impl Default for VirtualSession {
    fn default() -> Self {
        Self {
            published: Arc::new(Mutex::new(Vec::new())),
            inbound: Arc::new(Mutex::new(VecDeque::new())),
            connected: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl VirtualSession {
    /// Queue an inbound message for the next pump.
    pub fn inject(&self, channel: Channel, value: ChannelValue) {
        self.inbound
            .lock()
            .expect("inbound queue poisoned")
            .push_back(InboundMessage::new(channel, value));
    }

    /// Flip the simulated connectivity state.
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }

    /// Every publish so far, in order.
    #[must_use]
    pub fn published(&self) -> Vec<(Channel, ChannelValue)> {
        self.published.lock().expect("publish log poisoned").clone()
    }

    /// Every value published on one channel, in order.
    #[must_use]
    pub fn published_on(&self, channel: Channel) -> Vec<ChannelValue> {
        self.published()
            .into_iter()
            .filter(|(ch, _)| *ch == channel)
            .map(|(_, value)| value)
            .collect()
    }

    /// Forget everything published so far.
    pub fn clear_published(&self) {
        self.published.lock().expect("publish log poisoned").clear();
    }
}

impl SessionClient for VirtualSession {
    fn publish(
        &self,
        channel: Channel,
        value: ChannelValue,
    ) -> impl Future<Output = Result<(), RelayHubError>> + Send {
        self.published
            .lock()
            .expect("publish log poisoned")
            .push((channel, value));
        async { Ok(()) }
    }

    fn pump(&self) -> impl Future<Output = Result<Vec<InboundMessage>, RelayHubError>> + Send {
        let drained: Vec<_> = self
            .inbound
            .lock()
            .expect("inbound queue poisoned")
            .drain(..)
            .collect();
        async { Ok(drained) }
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn should_record_publishes_in_order() {
        let session = VirtualSession::default();
        session
            .publish(Channel::TemperatureOut, ChannelValue::Float(27.5))
            .await
            .unwrap();
        session
            .publish(Channel::HumidityOut, ChannelValue::Float(40.0))
            .await
            .unwrap();

        assert_eq!(session.published().len(), 2);
        assert_eq!(
            session.published_on(Channel::TemperatureOut),
            vec![ChannelValue::Float(27.5)]
        );
    }

    #[tokio::test]
    async fn should_drain_injected_messages_on_pump() {
        let session = VirtualSession::default();
        session.inject(Channel::EmergencyIn, ChannelValue::Int(1));

        let first = session.pump().await.unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].channel, Channel::EmergencyIn);

        let second = session.pump().await.unwrap();
        assert!(second.is_empty());
    }

    #[tokio::test]
    async fn should_default_to_connected() {
        let session = VirtualSession::default();
        assert!(session.is_connected());
    }

    #[tokio::test]
    async fn should_report_disconnected_after_flip() {
        let session = VirtualSession::default();
        session.set_connected(false);
        assert!(!session.is_connected());
    }

    #[tokio::test]
    async fn should_share_state_between_clones() {
        let session = VirtualSession::default();
        let handle = session.clone();
        session
            .publish(Channel::BatteryOut, ChannelValue::Int(99))
            .await
            .unwrap();

        assert_eq!(
            handle.published_on(Channel::BatteryOut),
            vec![ChannelValue::Int(99)]
        );
    }

    #[tokio::test]
    async fn should_clear_publish_log() {
        let session = VirtualSession::default();
        session
            .publish(Channel::BatteryOut, ChannelValue::Int(99))
            .await
            .unwrap();
        session.clear_published();
        assert!(session.published().is_empty());
    }
}
