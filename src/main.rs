//! Fannkuch benchmark CLI.
//!
//! Usage: `fannkuch [n]` with `n` in `[3, 16]` (default 12).
//!
//! On success, stdout carries exactly two lines:
//!
//! ```text
//! <checksum>
//! Pfannkuchen(<n>) = <max_flips>
//! ```
//!
//! and stderr carries the elapsed wall-clock time of the run as an
//! integer count of microseconds. An out-of-range `n` prints
//! `n should be between [3 and 16]` to stdout and exits with status 0,
//! matching the reference benchmark harness.

use std::env;
use std::time::Instant;

use fannkuch::{DEFAULT_N, MAX_N, MIN_N};

/// Interpret the optional positional argument.
///
/// A missing argument means [`DEFAULT_N`]. A malformed argument maps to 0
/// (the reference uses `atoi`), which the range check then rejects.
fn parse_n(arg: Option<&str>) -> i64 {
    arg.map_or(DEFAULT_N as i64, |s| s.parse().unwrap_or(0))
}

fn main() {
    fannkuch::init_tracing();

    let timer = Instant::now();
    let args: Vec<String> = env::args().collect();
    let n = parse_n(args.get(1).map(String::as_str));

    if n < MIN_N as i64 || n > MAX_N as i64 {
        println!("n should be between [{MIN_N} and {MAX_N}]");
        return;
    }

    #[allow(clippy::cast_sign_loss)] // Range-checked above.
    let result = fannkuch::fannkuch(n as usize);

    println!("{}", result.checksum);
    println!("Pfannkuchen({n}) = {}", result.max_flips);

    eprintln!("{}", timer.elapsed().as_micros());
}
