use cbuffer::{Allocator, Heap, Malloc, SpscRingBuffer};
use clap::{Parser, ValueEnum};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// SPSC byte ring stress test: one writer thread, one verifying reader.
#[derive(Parser, Debug)]
#[command(name = "stress")]
struct Args {
    #[arg(long, default_value_t = 64 * 1024)]
    capacity: usize,

    #[arg(long, default_value_t = 5)]
    seconds: u64,

    /// Bytes per bulk write/read.
    #[arg(long, default_value_t = 256)]
    chunk: usize,

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
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .map_err(|e| format!("Failed to set Ctrl+C handler: {}", e))?;

    match args.allocator {
        AllocatorKind::Heap => {
            stress(SpscRingBuffer::with_allocator(args.capacity, Heap)?, &args, &running)
        }
        AllocatorKind::Malloc => {
            stress(SpscRingBuffer::with_allocator(args.capacity, Malloc)?, &args, &running)
        }
    }
}

fn stress<A: Allocator + Sync>(
    mut ring: SpscRingBuffer<A>,
    args: &Args,
    running: &AtomicBool,
) -> Result<(), Box<dyn std::error::Error>> {
    let chunk = args.chunk.max(1);
    let (mut prod, mut cons) = ring.split();
    let writer_done = &AtomicBool::new(false);

    info!(
        capacity = args.capacity,
        seconds = args.seconds,
        chunk,
        "running spsc stress test"
    );
    let started = Instant::now();

    let (written, read) = std::thread::scope(|scope| {
        let writer = scope.spawn(move || {
            let mut out = vec![0u8; chunk];
            let mut seq = 0u8;
            let mut count = 0u64;

            while running.load(Ordering::Relaxed) {
                for byte in &mut out {
                    *byte = seq;
                    seq = seq.wrapping_add(1);
                }
                let mut sent = 0;
                while sent < out.len() && running.load(Ordering::Relaxed) {
                    sent += prod.write(&out[sent..]);
                }
                count += sent as u64;
            }

            writer_done.store(true, Ordering::Release);
            count
        });

        let reader = scope.spawn(move || -> Result<u64, String> {
            let mut buf = vec![0u8; chunk];
            let mut expected = 0u8;
            let mut count = 0u64;

            loop {
                let n = cons.read(&mut buf);
                for &byte in &buf[..n] {
                    if byte != expected {
                        return Err(format!(
                            "sequence broken after {} bytes: expected {}, got {}",
                            count, expected, byte
                        ));
                    }
                    expected = expected.wrapping_add(1);
                    count += 1;
                }

                if n == 0 && writer_done.load(Ordering::Acquire) && cons.is_empty() {
                    break;
                }
            }

            Ok(count)
        });

        let deadline = started + Duration::from_secs(args.seconds);
        while running.load(Ordering::Relaxed) && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(10));
        }
        running.store(false, Ordering::SeqCst);

        let written = writer.join().map_err(|_| "writer thread panicked")?;
        let read = reader.join().map_err(|_| "reader thread panicked")??;
        Ok::<_, Box<dyn std::error::Error>>((written, read))
    })?;

    let elapsed = started.elapsed().as_secs_f64();
    if written != read {
        warn!(written, read, "writer and reader disagree");
    }

    println!("\nResults:");
    println!("  Written to ring: {} bytes", written);
    println!("  Read and verified: {} bytes", read);
    println!(
        "  Throughput: {:.2} MB/sec",
        written as f64 / elapsed / 1024.0 / 1024.0
    );

    Ok(())
}
