use std::sync::{Arc, Mutex};

use futures::stream;

use dataplane::{
    forward, Admission, Discipline, FormatError, Forwarded, Hop, Packet, Priority, Router,
    RouterHandle, SchedulerOptions,
};

fn router() -> Router {
    Router::new([
        ("223.1.1.0/24", "Link 0"),
        ("223.1.2.0/24", "Link 1"),
        ("223.1.3.0/24", "Link 2"),
        ("223.1.0.0/16", "Link 4 (ISP)"),
    ])
    .unwrap()
}

async fn run(router: &Router, packets: Vec<Packet>, options: &SchedulerOptions) -> Vec<Forwarded> {
    let out = Arc::new(Mutex::new(Vec::new()));
    forward(
        router,
        stream::iter(packets),
        |forwarded| {
            let out = Arc::clone(&out);
            async move { out.lock().unwrap().push(forwarded) }
        },
        options,
    )
    .await
    .unwrap();

    let out = out.lock().unwrap().clone();
    out
}

#[tokio::test]
async fn forward_routes_every_delivered_packet() {
    let _ = tracing_subscriber::fmt::try_init();

    let packets = vec![
        Packet::new(Priority::Low, "10.0.0.1", "223.1.1.100", "bulk"),
        Packet::new(Priority::High, "10.0.0.1", "223.1.250.1", "voice"),
        Packet::new(Priority::Medium, "10.0.0.1", "198.51.100.1", "video"),
    ];

    let options = SchedulerOptions::default()
        .discipline(Discipline::Priority)
        .admission(Admission::DrainFirst);
    let out = run(&router(), packets, &options).await;

    let hops: Vec<(String, Hop)> = out
        .into_iter()
        .map(|f| (String::from_utf8_lossy(f.packet.payload()).into_owned(), f.hop.unwrap()))
        .collect();

    assert_eq!(
        hops,
        [
            ("voice".to_string(), Hop::link("Link 4 (ISP)")),
            ("video".to_string(), Hop::DefaultGateway),
            ("bulk".to_string(), Hop::link("Link 0")),
        ]
    );
}

#[tokio::test]
async fn forward_reports_malformed_destinations_without_stopping() {
    let _ = tracing_subscriber::fmt::try_init();

    let packets = vec![
        Packet::new(Priority::Low, "10.0.0.1", "223.1.2.5", "first"),
        Packet::new(Priority::Low, "10.0.0.1", "223.1.2", "broken"),
        Packet::new(Priority::Low, "10.0.0.1", "223.1.3.7", "last"),
    ];

    let out = run(&router(), packets, &SchedulerOptions::default()).await;

    assert_eq!(out.len(), 3);
    assert_eq!(out[0].hop, Ok(Hop::link("Link 1")));
    assert!(matches!(out[1].hop, Err(FormatError::OctetCount { found: 3, .. })));
    assert_eq!(out[2].hop, Ok(Hop::link("Link 2")));
}

#[tokio::test]
async fn forward_uses_the_current_snapshot() {
    let _ = tracing_subscriber::fmt::try_init();

    let handle = RouterHandle::new(router());
    handle.replace([("0.0.0.0/0", "backup uplink")]).unwrap();

    let packets = vec![Packet::new(Priority::High, "10.0.0.1", "223.1.1.1", "voice")];
    let out = run(&handle.snapshot(), packets, &SchedulerOptions::default()).await;

    assert_eq!(out[0].hop, Ok(Hop::link("backup uplink")));
}
