use futures::stream;

use dataplane::{schedule, Admission, Discipline, Packet, Priority, SchedulerOptions};

fn traffic() -> Vec<Packet> {
    vec![
        Packet::new(Priority::Low, "192.168.1.1", "192.168.2.1", "Data Packet 1"),
        Packet::new(Priority::Low, "192.168.1.2", "192.168.2.2", "Data Packet 2"),
        Packet::new(Priority::High, "192.168.3.1", "192.168.4.1", "VOIP Packet 1"),
        Packet::new(Priority::Medium, "192.168.5.1", "192.168.6.1", "Video Packet 1"),
        Packet::new(Priority::High, "192.168.7.1", "192.168.8.1", "VOIP Packet 2"),
    ]
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = tracing_subscriber::fmt::try_init();

    for discipline in [Discipline::Fifo, Discipline::Priority] {
        // Hold delivery until the whole batch is queued, so the priority run
        // shows a full sort.
        let options =
            SchedulerOptions::default().discipline(discipline).admission(Admission::DrainFirst);

        tracing::info!("Running {discipline:?} scheduler");
        let report = schedule(
            stream::iter(traffic()),
            |packet| async move {
                tracing::info!(
                    priority = %packet.priority(),
                    src = packet.source_ip(),
                    dst = packet.dest_ip(),
                    "{}",
                    String::from_utf8_lossy(packet.payload())
                );
            },
            &options,
        )
        .await?;
        tracing::info!(?report, "Done");
    }

    Ok(())
}
