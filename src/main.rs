use cbuffer::{Allocator, Heap, Malloc, RingBuffer};
use clap::{Parser, ValueEnum};
use std::io::{self, Read, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Streams stdin through a ring buffer and prints the last bytes seen.
#[derive(Parser, Debug)]
#[command(name = "cbuffer", version)]
struct Args {
    /// Number of trailing bytes to keep.
    #[arg(short = 'c', long, default_value_t = 1024)]
    bytes: usize,

    #[arg(long, value_enum, default_value_t = AllocatorKind::Heap)]
    allocator: AllocatorKind,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum AllocatorKind {
    Heap,
    Malloc,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    match args.allocator {
        AllocatorKind::Heap => tail(RingBuffer::with_allocator(args.bytes, Heap)?),
        AllocatorKind::Malloc => tail(RingBuffer::with_allocator(args.bytes, Malloc)?),
    }
}

fn tail<A: Allocator>(mut ring: RingBuffer<A>) -> Result<(), Box<dyn std::error::Error>> {
    let mut stdin = io::stdin().lock();
    let mut chunk = [0u8; 8192];
    let mut total = 0u64;
    let mut dropped = 0u64;

    loop {
        let n = match stdin.read(&mut chunk) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        total += n as u64;
        dropped += ring.extend_from_slice(&chunk[..n]) as u64;
    }

    info!(total, dropped, kept = ring.len(), "input drained");

    let mut stdout = io::stdout().lock();
    while !ring.is_empty() {
        let n = ring.pop_into(&mut chunk);
        stdout.write_all(&chunk[..n])?;
    }
    stdout.flush()?;

    ring.destroy();
    Ok(())
}
