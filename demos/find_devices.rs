use tracing::Level;
use uhppote::{Config, Uhppote};

#[tokio::main]
async fn main() -> uhppote::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    let config = Config::default();
    println!("Searching for controllers:");
    println!("- Broadcast address: {}", config.broadcast_addr);
    println!("- Window: {:?}", config.broadcast_window);

    let u = Uhppote::new(config)?;
    let devices = u.find_devices().await?;

    println!("\nFound {} controller(s)", devices.len());
    for device in &devices {
        println!("  {}", device);
    }

    Ok(())
}
