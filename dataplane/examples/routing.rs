use dataplane::Router;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = tracing_subscriber::fmt::try_init();

    let router = Router::new([
        ("223.1.1.0/24", "Link 0"),
        ("223.1.2.0/24", "Link 1"),
        ("223.1.3.0/24", "Link 2"),
        ("223.1.0.0/16", "Link 4 (ISP)"),
    ])?;

    for entry in router.table() {
        tracing::info!("{:>18} -> {}", entry.cidr().to_string(), entry.link());
    }

    for dest in ["223.1.1.100", "223.1.2.5", "223.1.250.1", "198.51.100.1"] {
        tracing::info!("{dest} is routed via {}", router.route(dest)?);
    }

    Ok(())
}
