//! # Cube Network Flows
//!
//! Simulated cube events published through the broker and observed by a
//! cloud client.
//!
//! ## Flows Tested:
//!
//! 1. **Event sequences**: join, exit and flip produce their fixed envelopes
//! 2. **Feedback**: hub signals fed back into ingress are refused
//! 3. **Runtime**: the full hub emits only well-formed signals

#[cfg(test)]
mod tests {
    use std::time::Duration;
    use tokio::time::timeout;

    use gc_01_ingress::{validate, RejectionReason};
    use gc_02_cube_network::{
        CubeNetwork, CubeNetworkService, NetworkError, ServiceError, SimulationConfig,
    };
    use hub_runtime::{HubConfig, HubRuntime};
    use serde_json::Value;
    use shared_bus::{BrokerClient, Delivery, InMemoryBroker, Subscription, TopicFilter, Transport};
    use shared_types::{MessageTag, Topic};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn network(capacity: usize) -> (CubeNetworkService<BrokerClient>, Subscription) {
        let broker = InMemoryBroker::new();
        let cloud = broker.client().subscribe(TopicFilter::all());
        let service = CubeNetworkService::new(CubeNetwork::with_seed(capacity, 42), broker.client());
        (service, cloud)
    }

    fn drain(subscription: &mut Subscription) -> Vec<Delivery> {
        let mut deliveries = Vec::new();
        while let Ok(Some(delivery)) = subscription.try_recv() {
            deliveries.push(delivery);
        }
        deliveries
    }

    fn decode(delivery: &Delivery) -> Value {
        serde_json::from_slice(&delivery.payload).unwrap()
    }

    fn tags(deliveries: &[Delivery]) -> Vec<u8> {
        deliveries
            .iter()
            .map(|d| decode(d)["tag"].as_u64().unwrap() as u8)
            .collect()
    }

    // =============================================================================
    // TEST GROUP 1: EVENT SEQUENCES
    // =============================================================================

    #[tokio::test]
    async fn test_capacity_two_lifecycle() {
        let (service, mut cloud) = network(2);

        let first = service.join(None).await.unwrap();
        let second = service.join(None).await.unwrap();
        assert_ne!(first, second);
        for id in [first, second] {
            assert!(id.as_u8() > 0x00 && id.as_u8() < 0xFF);
        }
        assert!(matches!(
            service.join(None).await,
            Err(ServiceError::Network(NetworkError::NetworkFull))
        ));

        service.exit(None).await.unwrap();
        service.exit(None).await.unwrap();
        assert!(matches!(
            service.exit(None).await,
            Err(ServiceError::Network(NetworkError::NetworkEmpty))
        ));

        let joined = MessageTag::CubeJoined.as_u8();
        let config = MessageTag::CubeSideConfig.as_u8();
        let left = MessageTag::CubeDisconnected.as_u8();
        assert_eq!(
            tags(&drain(&mut cloud)),
            vec![joined, config, joined, config, left, left]
        );
    }

    #[tokio::test]
    async fn test_reserved_addresses_never_join() {
        let (service, mut cloud) = network(4);

        for raw in [0x00, 0xFF] {
            assert!(matches!(
                service.join(Some(raw)).await,
                Err(ServiceError::Network(NetworkError::InvalidAddress(_)))
            ));
        }
        assert!(service.is_empty());
        assert!(drain(&mut cloud).is_empty());
    }

    #[tokio::test]
    async fn test_flip_emits_flipped_then_side_config() {
        let (service, mut cloud) = network(1);
        let id = service.join(Some(9)).await.unwrap();
        drain(&mut cloud);
        let before = service.get_cube(id).unwrap();

        let flip = service.flip(id, None).await.unwrap();

        let after = service.get_cube(id).unwrap();
        assert!((1..=6).contains(&after.side().as_u8()));
        assert_ne!(after.color(), before.color());
        assert_eq!(flip.old_side, before.side());

        let deliveries = drain(&mut cloud);
        assert_eq!(
            tags(&deliveries),
            vec![MessageTag::CubeFlipped.as_u8(), MessageTag::CubeSideConfig.as_u8()]
        );
        let flipped = decode(&deliveries[0]);
        assert_eq!(deliveries[0].topic, Topic::CubeState.as_str());
        assert_eq!(flipped["cube_id"], 9);
        assert_eq!(flipped["new_side"], after.side().as_u8());
        let side_config = decode(&deliveries[1]);
        assert_eq!(side_config["side_idx"], after.side().as_u8());
        assert_eq!(side_config["color"].as_str().unwrap().len(), 4);
    }

    // =============================================================================
    // TEST GROUP 2: FEEDBACK INTO INGRESS
    // =============================================================================

    #[tokio::test]
    async fn test_hub_signals_are_refused_by_ingress() {
        let (service, mut cloud) = network(3);
        let id = service.join(None).await.unwrap();
        service.flip(id, None).await.unwrap();
        service.measure().await.unwrap();
        service.exit(Some(id.as_u8())).await.unwrap();

        let deliveries = drain(&mut cloud);
        assert_eq!(deliveries.len(), 6);
        for delivery in &deliveries {
            let record = decode(delivery);
            assert!(record.get("topic").is_none());
            assert_eq!(record["mtype"], 2);
            assert!(matches!(
                validate(&delivery.topic, &delivery.payload),
                Err(RejectionReason::UnexpectedMessage(_))
            ));
        }
    }

    // =============================================================================
    // TEST GROUP 3: FULL RUNTIME
    // =============================================================================

    #[tokio::test]
    async fn test_runtime_simulation_traffic_is_well_formed() {
        let mut config = HubConfig::default();
        config.network.capacity = 3;
        config.simulation = SimulationConfig::for_testing();

        let runtime = HubRuntime::new(config);
        let mut cloud = runtime.broker().client().subscribe(TopicFilter::all());
        let network = runtime.network();

        let summary = runtime
            .run_until(tokio::time::sleep(Duration::from_millis(200)))
            .await
            .unwrap();

        let deliveries = drain(&mut cloud);
        assert!(!deliveries.is_empty());
        for delivery in &deliveries {
            let record = decode(delivery);
            let tag = record["tag"].as_u64().unwrap();
            assert!((0x01..=0x0C).contains(&tag));
            assert_eq!(record["mtype"], 2);
            assert!(record["timestamp"].is_number());
            assert!(record.get("topic").is_none());
        }
        assert!(deliveries
            .iter()
            .any(|d| d.topic == Topic::Measurements.as_str()));

        assert!(network.len() <= 3);
        assert_eq!(summary.ingress.received, 0);
        assert!(summary.simulation.unwrap().events > 0);
    }

    #[tokio::test]
    async fn test_runtime_period_request_reaches_simulator() {
        let mut config = HubConfig::default();
        config.simulation = SimulationConfig::for_testing();

        let runtime = HubRuntime::new(config);
        let cloud = runtime.broker().client();
        let mut replies = cloud.subscribe(TopicFilter::topic(Topic::Measurements).no_local());
        let period = runtime.sensor_period();

        let stop = tokio::spawn(async move {
            cloud
                .publish("/measurement", br#"{"mtype":0,"tag":4,"period":60000}"#.to_vec())
                .await
                .unwrap();
            tokio::time::sleep(Duration::from_millis(50)).await;
        });

        let summary = runtime
            .run_until(async {
                let _ = stop.await;
            })
            .await
            .unwrap();

        assert_eq!(period.get_ms(), 60_000);
        assert_eq!(summary.ingress.accepted, 1);

        let response = timeout(Duration::from_millis(100), async {
            loop {
                let delivery = replies.recv().await?;
                let record = decode(&delivery);
                if record["tag"] == MessageTag::SensorDataPeriodRes.as_u8() {
                    return Some(record);
                }
            }
        })
        .await
        .unwrap()
        .unwrap();
        assert_eq!(response["mtype"], 1);
    }
}
