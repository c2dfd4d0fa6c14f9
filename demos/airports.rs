use std::num::NonZeroUsize;

use clap::Parser;
use direct_dict::Addressing;
use direct_dict::DictConfig;
use direct_dict::Dictionary;

#[derive(Parser, Debug)]
struct Args {
    /// Use a fixed table of this many buckets instead of direct addressing
    #[arg(short = 'b', long = "buckets")]
    buckets: Option<NonZeroUsize>,

    /// Print bucket and chain statistics at the end
    #[arg(short = 's', long = "stats")]
    stats: bool,
}

fn main() {
    env_logger::Builder::from_default_env()
        .format_timestamp_millis()
        .init();
    let args = Args::parse();

    let addressing = match args.buckets {
        Some(buckets) => Addressing::Modulo(buckets),
        None => Addressing::Direct,
    };
    let mut map = Dictionary::with_config(DictConfig::new().addressing(addressing));

    map.upsert("MCO", "Orlando International");
    map.upsert("STI", "Aeropuerto Cibao");
    map.upsert("SDQ", "Aeropuerto Las Americas");
    println!("\n{map}");

    for key in ["MCO", "STI", "SDQ"] {
        match map.lookup(key) {
            Ok(name) => println!("\nget('{key}') = {name}"),
            Err(err) => println!("\nget('{key}') failed: {err}"),
        }
    }

    for key in ["MCO", "SDQ"] {
        println!("\ndelete('{key}')");
        if let Err(err) = map.remove(key) {
            println!("delete('{key}') failed: {err}");
        }
        println!("\n{map}");
    }

    if args.stats {
        println!();
        print_stats(&map);
    }
}

#[cfg(feature = "stats")]
fn print_stats(map: &Dictionary) {
    map.debug_stats().print();
}

#[cfg(not(feature = "stats"))]
fn print_stats(map: &Dictionary) {
    println!(
        "{} entries in {} buckets (build with --features stats for chain details)",
        map.len(),
        map.capacity()
    );
}
