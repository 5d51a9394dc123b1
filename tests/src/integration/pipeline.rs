//! # Ingress Pipeline Flows
//!
//! Cloud client → broker → BusIngressAdapter → IngressService → broker → cloud.
//!
//! ## Flows Tested:
//!
//! 1. **Malformed input**: one error envelope on `/error`, nothing else
//! 2. **Accepted without handler**: no outward traffic at all
//! 3. **Handled requests**: responses on the request's topic

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::watch;
    use tokio::task::JoinHandle;
    use tokio::time::timeout;

    use gc_01_ingress::{
        BusIngressAdapter, DispatchOutcome, Dispatcher, IngressApi, IngressOutcome,
        IngressService, IngressStats, RejectionReason,
    };
    use serde_json::Value;
    use shared_bus::{BrokerClient, InMemoryBroker, Subscription, TopicFilter, Transport};
    use shared_types::{MessageTag, SensorPeriod, Topic};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    struct Harness {
        cloud: BrokerClient,
        replies: Subscription,
        period: SensorPeriod,
        service: Arc<IngressService<BrokerClient>>,
        shutdown: watch::Sender<bool>,
        task: JoinHandle<IngressStats>,
    }

    impl Harness {
        fn start() -> Self {
            let broker = InMemoryBroker::new();
            let hub = broker.client();
            let cloud = broker.client();
            let replies = cloud.subscribe(TopicFilter::all().no_local());

            let period = SensorPeriod::new(SensorPeriod::DEFAULT_MS);
            let service = Arc::new(IngressService::new(
                hub.clone(),
                Dispatcher::with_builtin_handlers(period.clone()),
            ));
            let adapter = BusIngressAdapter::connect(Arc::clone(&service), &hub);

            let (shutdown, rx) = watch::channel(false);
            let task = tokio::spawn(adapter.run(rx));

            Self {
                cloud,
                replies,
                period,
                service,
                shutdown,
                task,
            }
        }

        async fn send(&self, topic: &str, payload: &[u8]) {
            self.cloud.publish(topic, payload.to_vec()).await.unwrap();
        }

        async fn next_reply(&mut self) -> (String, Value) {
            let delivery = timeout(Duration::from_secs(1), self.replies.recv())
                .await
                .expect("reply timed out")
                .expect("subscription closed");
            let record = serde_json::from_slice(&delivery.payload).unwrap();
            (delivery.topic, record)
        }

        async fn assert_silent(&mut self) {
            let quiet = timeout(Duration::from_millis(50), self.replies.recv()).await;
            assert!(quiet.is_err(), "unexpected reply: {:?}", quiet);
        }

        async fn stop(self) -> IngressStats {
            self.shutdown.send(true).unwrap();
            timeout(Duration::from_secs(1), self.task)
                .await
                .unwrap()
                .unwrap()
        }
    }

    fn assert_unknown_message_error(topic: &str, record: &Value) {
        assert_eq!(topic, Topic::Error.as_str());
        assert_eq!(record["mtype"], 2);
        assert_eq!(record["tag"], MessageTag::UnknownMessageError.as_u8());
        assert!(record.get("topic").is_none());
    }

    // =============================================================================
    // TEST GROUP 1: REJECTIONS
    // =============================================================================

    #[tokio::test]
    async fn test_not_json_yields_exactly_one_error() {
        let mut hub = Harness::start();

        hub.send("/network", b"not-json").await;

        let (topic, record) = hub.next_reply().await;
        assert_unknown_message_error(&topic, &record);
        hub.assert_silent().await;

        let stats = hub.stop().await;
        assert_eq!(stats.received, 1);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.published, 1);
    }

    #[tokio::test]
    async fn test_error_goes_to_error_topic_regardless_of_target() {
        let mut hub = Harness::start();

        for topic in ["/config", "/measurement", "/cube", "/network", "/error"] {
            hub.send(topic, b"{oops").await;
            let (reply_topic, record) = hub.next_reply().await;
            assert_unknown_message_error(&reply_topic, &record);
        }

        hub.stop().await;
    }

    #[tokio::test]
    async fn test_unknown_channel_is_rejected() {
        let mut hub = Harness::start();

        hub.send("/telemetry", br#"{"mtype":0,"tag":4,"period":10}"#)
            .await;

        let (topic, record) = hub.next_reply().await;
        assert_unknown_message_error(&topic, &record);
        assert_eq!(hub.period.get_ms(), SensorPeriod::DEFAULT_MS);

        hub.stop().await;
    }

    #[tokio::test]
    async fn test_inbound_signal_is_unexpected_message() {
        let hub = Harness::start();

        let outcome = hub
            .service
            .handle("/network", br#"{"mtype":2,"tag":1,"cube_id":5}"#)
            .await
            .unwrap();

        assert!(matches!(
            outcome,
            IngressOutcome::Rejected(RejectionReason::UnexpectedMessage(_))
        ));
        hub.stop().await;
    }

    #[tokio::test]
    async fn test_bad_handler_input_reported_as_unknown_message() {
        let mut hub = Harness::start();

        hub.send("/measurement", br#"{"mtype":0,"tag":4}"#).await;

        let (topic, record) = hub.next_reply().await;
        assert_unknown_message_error(&topic, &record);

        let stats = hub.stop().await;
        assert_eq!(stats.accepted, 1);
        assert_eq!(stats.handler_failures, 1);
    }

    // =============================================================================
    // TEST GROUP 2: ACCEPTED REQUESTS
    // =============================================================================

    #[tokio::test]
    async fn test_request_without_handler_is_accepted_silently() {
        let mut hub = Harness::start();

        let outcome = hub
            .service
            .handle("/network", br#"{"mtype":0,"tag":1}"#)
            .await
            .unwrap();
        assert_eq!(
            outcome,
            IngressOutcome::Dispatched(DispatchOutcome::NotImplemented(MessageTag::CubeJoined))
        );

        hub.send("/network", br#"{"mtype":0,"tag":1}"#).await;
        hub.assert_silent().await;

        let stats = hub.stop().await;
        assert_eq!(stats.accepted, 2);
        assert_eq!(stats.not_implemented, 2);
        assert_eq!(stats.published, 0);
    }

    #[tokio::test]
    async fn test_sensor_period_request_round_trip() {
        let mut hub = Harness::start();

        hub.send("/measurement", br#"{"mtype":0,"tag":4,"period":250}"#)
            .await;

        let (topic, record) = hub.next_reply().await;
        assert_eq!(topic, Topic::Measurements.as_str());
        assert_eq!(record["mtype"], 1);
        assert_eq!(record["tag"], MessageTag::SensorDataPeriodRes.as_u8());
        assert_eq!(hub.period.get_ms(), 250);

        hub.stop().await;
    }

    #[tokio::test]
    async fn test_config_update_request_round_trip() {
        let mut hub = Harness::start();

        hub.send(
            "/config",
            br##"{"mtype":0,"tag":8,"cube_id":12,"side_idx":3,"color":"#f00"}"##,
        )
        .await;

        let (topic, record) = hub.next_reply().await;
        assert_eq!(topic, Topic::Config.as_str());
        assert_eq!(record["mtype"], 1);
        assert_eq!(record["tag"], MessageTag::CubeUpdateConfigRes.as_u8());
        assert_eq!(record["cube_id"], 12);

        hub.stop().await;
    }

    #[tokio::test]
    async fn test_messages_processed_in_order() {
        let mut hub = Harness::start();

        hub.send("/measurement", br#"{"mtype":0,"tag":4,"period":100}"#)
            .await;
        hub.send("/network", b"garbage").await;
        hub.send("/measurement", br#"{"mtype":0,"tag":4,"period":200}"#)
            .await;

        let tags: Vec<Value> = [
            hub.next_reply().await,
            hub.next_reply().await,
            hub.next_reply().await,
        ]
        .into_iter()
        .map(|(_, record)| record["tag"].clone())
        .collect();

        assert_eq!(tags, vec![Value::from(5), Value::from(12), Value::from(5)]);
        assert_eq!(hub.period.get_ms(), 200);

        hub.stop().await;
    }
}
