//! # chatgraph CLI
//!
//! Command-line interface for the chatgraph library.

use std::error::Error;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use chatgraph::cli::Args;
use chatgraph::logging;
use chatgraph::pipeline::{self, Report};

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();
    logging::init(args.verbose);

    let config = args.to_config()?;

    // Print header
    println!("📊 chatgraph v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("💬 Conversation: {}", config.conversation_id());
    println!("📂 Export root:  {}", config.export_root.display());
    println!("💾 Output:       {}", config.output_dir().display());
    if config.aggregate.utc_offset_minutes != 0 {
        println!("🕐 UTC offset:   {}", args.utc_offset);
    }
    println!();

    println!("⏳ Reading export, aggregating and rendering charts...");
    let report = pipeline::run(&config)?;

    println!();
    println!("✅ Done! Output saved to {}", report.output_dir.display());

    print_summary(&report);

    println!();
    println!("⚡ Total time: {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}

fn print_summary(report: &Report) {
    let stats = &report.stats;

    println!();
    println!("📈 Summary:");
    if let Some(title) = &stats.title {
        println!("   Title:        {}", title);
    }
    println!("   Messages:     {}", stats.total_messages);
    println!("   Participants: {}", stats.participants.len());
    println!("   Active days:  {}", stats.daily.len());
    if let Some(streak) = &stats.longest_streak {
        println!(
            "   Streak:       {} days ({} to {})",
            streak.days, streak.start, streak.end
        );
    }

    println!();
    println!("🖼️  Written:");
    for file in report.render.files() {
        if let Some(name) = file.file_name() {
            println!("   {}", name.to_string_lossy());
        }
    }
}
