use std::time::Duration;

use dataplane_sched::{
    priority, schedule, Admission, Discipline, Packet, Priority, SchedulerOptions,
};
use futures::{stream, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::{numbered, payloads, traffic, Sink};

#[tokio::test]
async fn priority_drain_first_sorts_the_batch() {
    let _ = tracing_subscriber::fmt::try_init();

    let sink = Sink::default();
    let options = SchedulerOptions::default().admission(Admission::DrainFirst);
    let report = priority(
        stream::iter(traffic()),
        |packet| {
            let sink = sink.clone();
            async move { sink.push(packet) }
        },
        &options,
    )
    .await
    .unwrap();

    assert_eq!(
        payloads(&sink.take()),
        ["VOIP Packet 1", "VOIP Packet 2", "Video Packet 1", "Data Packet 1", "Data Packet 2"]
    );
    assert_eq!(report.delivered, 5);
}

#[tokio::test]
async fn priority_output_matches_packet_ordering() {
    let _ = tracing_subscriber::fmt::try_init();

    let levels = [Priority::Low, Priority::High, Priority::Medium];
    let packets: Vec<Packet> = (0..30)
        .map(|i| {
            Packet::new(levels[i % 3], format!("10.0.{}.1", i % 4), "10.9.9.9", format!("{i}"))
        })
        .collect();
    let mut expected = packets.clone();
    expected.sort();

    let sink = Sink::default();
    let options = SchedulerOptions::default()
        .discipline(Discipline::Priority)
        .admission(Admission::DrainFirst);
    schedule(
        stream::iter(packets),
        |packet| {
            let sink = sink.clone();
            async move { sink.push(packet) }
        },
        &options,
    )
    .await
    .unwrap();

    assert_eq!(sink.take(), expected);
}

#[tokio::test]
async fn priority_drops_when_full_and_sorts_survivors() {
    let _ = tracing_subscriber::fmt::try_init();

    // Only the first three packets fit: two bulk packets and one voice packet.
    let sink = Sink::default();
    let options = SchedulerOptions::default().max_size(3).admission(Admission::DrainFirst);
    let report = priority(
        stream::iter(traffic()),
        |packet| {
            let sink = sink.clone();
            async move { sink.push(packet) }
        },
        &options,
    )
    .await
    .unwrap();

    assert_eq!(payloads(&sink.take()), ["VOIP Packet 1", "Data Packet 1", "Data Packet 2"]);
    assert_eq!(report.admitted, 3);
    assert_eq!(report.dropped, 2);
    assert_eq!(report.delivered, 3);
}

#[tokio::test]
async fn priority_streaming_only_orders_what_is_queued() {
    let _ = tracing_subscriber::fmt::try_init();

    let (tx, rx) = mpsc::channel(8);
    let (delivered_tx, mut delivered_rx) = mpsc::unbounded_channel();

    let [bulk, voice, video]: [Packet; 3] = [
        Packet::new(Priority::Low, "10.0.0.1", "10.0.0.2", "bulk"),
        Packet::new(Priority::High, "10.0.0.1", "10.0.0.2", "voice"),
        Packet::new(Priority::Medium, "10.0.0.1", "10.0.0.2", "video"),
    ];

    // The bulk packet is alone in the heap when it is popped; the better
    // packets only arrive after it has been delivered.
    let producer = tokio::spawn(async move {
        tx.send(bulk).await.unwrap();
        delivered_rx.recv().await.unwrap();
        tx.send(voice).await.unwrap();
        tx.send(video).await.unwrap();
    });

    let sink = Sink::default();
    let report = priority(
        ReceiverStream::new(rx),
        |packet| {
            let sink = sink.clone();
            let delivered_tx = delivered_tx.clone();
            async move {
                sink.push(packet);
                let _ = delivered_tx.send(());
            }
        },
        &SchedulerOptions::default(),
    )
    .await
    .unwrap();

    producer.await.unwrap();

    let delivered = payloads(&sink.take());
    assert_eq!(delivered.len(), 3);
    assert_eq!(delivered[0], "bulk");
    assert!(delivered.contains(&"voice".to_string()));
    assert!(delivered.contains(&"video".to_string()));
    assert_eq!(report.dropped, 0);
}

#[tokio::test]
async fn priority_slow_consumer_loses_packets() {
    let _ = tracing_subscriber::fmt::try_init();

    const N: usize = 20;

    let source = stream::iter(numbered(N)).then(|packet| async move {
        tokio::task::yield_now().await;
        packet
    });

    let sink = Sink::default();
    let options = SchedulerOptions::default().max_size(2);
    let report = priority(
        source,
        |packet| {
            let sink = sink.clone();
            async move {
                tokio::time::sleep(Duration::from_millis(5)).await;
                sink.push(packet);
            }
        },
        &options,
    )
    .await
    .unwrap();

    let delivered = sink.take();
    assert!(!delivered.is_empty());
    assert!(delivered.len() < N);
    // Equal priorities with increasing payloads: survivors stay in order.
    assert!(delivered.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(report.delivered, delivered.len());
    assert_eq!(report.admitted, report.delivered);
    assert_eq!(report.received(), N);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn priority_delivers_everything_on_multi_thread_runtime() {
    let _ = tracing_subscriber::fmt::try_init();

    const N: usize = 500;

    let levels = [Priority::High, Priority::Medium, Priority::Low];
    let packets: Vec<Packet> = (0..N)
        .map(|i| Packet::new(levels[i % 3], "10.0.0.1", "10.0.0.2", format!("{i:04}")))
        .collect();

    let source = stream::iter(packets.clone()).then(|packet| async move {
        tokio::task::yield_now().await;
        packet
    });

    let sink = Sink::default();
    let options = SchedulerOptions::default().max_size(N);
    let report = tokio::spawn({
        let sink = sink.clone();
        async move {
            priority(
                source,
                |packet| {
                    let sink = sink.clone();
                    async move { sink.push(packet) }
                },
                &options,
            )
            .await
        }
    })
    .await
    .unwrap()
    .unwrap();

    let mut delivered = sink.take();
    assert_eq!(report.delivered, N);
    assert_eq!(report.dropped, 0);

    delivered.sort();
    let mut expected = packets;
    expected.sort();
    assert_eq!(delivered, expected);
}
