//! Parse Timer file utility
//! Loads a PSRCHIVE Timer archive and displays the decoded header

use psrtimer_rs::TimerHeader;
use std::env;
use tracing_subscriber::{fmt::format::FmtSpan, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Initialize tracing, bridging anything emitted through `log`
    tracing_log::LogTracer::init().ok();

    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap();

    let format_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(format_layer)
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <file> [--json]", args[0]);
        eprintln!("\nExamples:");
        eprintln!(
            "  {} J0437-4715.ar          # Show the decoded header",
            args[0]
        );
        eprintln!(
            "  {} J0437-4715.ar --json   # Emit the header as JSON",
            args[0]
        );
        std::process::exit(1);
    }

    let filename = &args[1];
    let as_json = args.get(2).map(|s| s.as_str()) == Some("--json");

    let header = TimerHeader::read(filename)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&header)?);
        return Ok(());
    }

    println!("{}\n", header);

    println!("=== Header Keywords ===");
    for line in header.lines() {
        println!("  {}", line);
    }
    println!();

    println!("=== Band ===");
    println!("  {}", header.band());
    for line in header.band().record().lines() {
        println!("  {}", line);
    }
    println!();

    if let Some(position) = header.position() {
        println!("Position: {}", position);
    } else {
        println!("Position: <unknown coordinate type>");
    }
    println!(
        "Channels: {}   Polarisations: {}",
        header.nchan(),
        header.npol()
    );
    if let Some(poly) = header.poly_text() {
        println!("Polyco: {} bytes of text", poly.len());
    }
    if let Some(ephem) = header.ephem_text() {
        println!("Ephemeris: {} bytes of text", ephem.len());
    }
    println!();

    println!("=== Sub-integrations ({}) ===", header.subints().len());
    for (i, subint) in header.subints().iter().enumerate() {
        println!("  #{}: {}", i, subint);
    }

    Ok(())
}
