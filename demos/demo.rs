//! Builds a small skiplist, looks a few keys up, mutates it and prints the
//! level grid after every step.
//!
//! Run with `RUST_LOG=trace cargo run --example demo` to see the splices.

use anyhow::Result;
use coinflip_skiplist::{Fixed, SkipList};
use log::info;

/// Keys and heights of the sample list.
const SAMPLE: [(u32, usize); 7] = [(1, 0), (5, 2), (7, 0), (12, 0), (15, 1), (19, 0), (24, 2)];

fn show(list: &SkipList<u32, String, Fixed>) {
    println!("{list}");
    println!("Size: {}", list.len());
    println!("{}", "=".repeat(80));
}

fn main() -> Result<()> {
    env_logger::init();

    let mut list = SkipList::with_level_generator(Fixed::new(0));
    for (key, height) in SAMPLE {
        list.level_generator_mut().set(height);
        list.insert(key, format!("{key}!"));
    }
    info!("built sample list with {} entries", list.len());
    show(&list);

    for key in [7, 15, 5] {
        println!("Found {} with key {key}", list.lookup(&key)?);
    }
    if let Err(err) = list.lookup(&100) {
        println!("Looking up 100: {err}");
    }

    list.delete(&15);
    show(&list);

    list.level_generator_mut().set(0);
    list.insert(14, "14".to_owned());
    show(&list);

    list.delete(&7);
    show(&list);

    list.delete(&24);
    show(&list);

    Ok(())
}
