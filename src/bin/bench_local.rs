//! `bench_local.rs` — quick local timing runner (no Criterion)
//!
//! PURPOSE
//! -------
//! - Fast, ad-hoc timing of every applicable matcher on a handful of
//!   pattern/word pairs on *your* machine.
//! - Runs each case several times and reports the median.
//!
//! HOW TO RUN
//! ----------
//! - Optimized build:                `cargo run --bin bench_local --release`
//! - Multiple repeats:               `cargo run --bin bench_local --release -- -r 5`
//! - Skip the naive matcher:         `cargo run --bin bench_local --release -- --no-naive`
//! - See all flags:                  `cargo run --bin bench_local -- --help`
//!
//! NOTES
//! -----
//! - This is *not* Criterion. It's quick and convenient, not statistically rigorous.
//! - Use the same machine and `--release` for more comparable numbers.
//! - One warm-up run per case and matcher is done (not included in timing).

use std::hint::black_box;
use std::time::Instant;

use clap::Parser;
use varmatch::matchers::{MatcherConfig, MatcherKind};
use varmatch::parser::parse_pattern;

/// Simple local benchmark runner: time each matcher on a few fixed cases.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Number of repeats per case (use >1 to reduce noise; median is reported)
    #[arg(short = 'r', long = "repeats", default_value_t = 3)]
    num_repeats: usize,

    /// Skip the naive matcher (it dominates the running time)
    #[arg(long)]
    no_naive: bool,
}

/// A benchmark case: a pattern and the word to match against it.
#[derive(Clone)]
struct Case {
    pattern: &'static str,
    word: &'static str,
}

/// Edit/add new cases here.
fn get_cases() -> Vec<Case> {
    vec![
        Case { pattern: "x1 x2 as a x3", word: "vasya works as a developer" },
        Case { pattern: "x1 and x1 and x1 or x2 or x2", word: "hel and hel and hel or nohel or nohel" },
        Case { pattern: "x1 x2 x1 x2", word: "abc def abc def" },
        Case { pattern: "x1 x2 x3 x1 x2", word: "ab cd ef ab cd" },
        Case { pattern: "x1 x1 x2 x2", word: "hello hello world different" },
    ]
}

/// Small helper: robust central tendency for small samples.
fn median(mut xs: Vec<f64>) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.sort_by(f64::total_cmp);
    let n = xs.len();
    if n % 2 == 1 {
        xs[n / 2]
    } else {
        0.5 * (xs[n / 2 - 1] + xs[n / 2])
    }
}

const MAX_PATTERN_LEN: usize = 32;

fn main() {
    let cli = Cli::parse();
    let config = MatcherConfig::default();

    // (pattern, matcher, median seconds, matched)
    let mut summary: Vec<(String, MatcherKind, f64, bool)> = Vec::new();

    for (idx, case) in get_cases().iter().enumerate() {
        let pattern = parse_pattern(case.pattern);
        eprintln!("\n[{:02}] {} / {}", idx + 1, case.pattern, case.word);

        for kind in MatcherKind::ALL {
            if cli.no_naive && kind == MatcherKind::Naive {
                continue;
            }
            let matcher = kind.build(&config);
            if let Err(e) = matcher.check(&pattern) {
                eprintln!("  {kind:<12} skipped: {e}");
                continue;
            }

            // warm-up, not timed
            let matched = match matcher.find_match(&pattern, case.word) {
                Ok(result) => result.is_some(),
                Err(e) => {
                    eprintln!("  {kind:<12} failed: {e}");
                    continue;
                }
            };

            let mut times = Vec::with_capacity(cli.num_repeats);
            for _ in 0..cli.num_repeats {
                let t_match = Instant::now();
                let result = matcher.find_match(black_box(&pattern), black_box(case.word));
                times.push(t_match.elapsed().as_secs_f64());
                let _keep = black_box(result);
            }

            let med = median(times);
            eprintln!("  {kind:<12} median {med:.6}s ({})", if matched { "match" } else { "no match" });
            summary.push((case.pattern.to_string(), kind, med, matched));
        }
    }

    eprintln!("\n==== Summary ====");
    eprintln!("{:<MAX_PATTERN_LEN$} | {:<12} | {:>12} | {:>8}", "pattern", "matcher", "median (s)", "matched");
    eprintln!("{:-<MAX_PATTERN_LEN$}-+-{:-<12}-+-{:-<12}-+-{:-<8}", "", "", "", "");
    for (pat, kind, med, matched) in &summary {
        let display = if pat.chars().count() > MAX_PATTERN_LEN {
            format!("{}…", pat.chars().take(MAX_PATTERN_LEN - 1).collect::<String>())
        } else {
            pat.clone()
        };
        eprintln!("{display:<MAX_PATTERN_LEN$} | {:<12} | {med:>12.6} | {matched:>8}", kind.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median() {
        assert_eq!(0.0, median(vec![]));
        assert_eq!(2.0, median(vec![3.0, 1.0, 2.0]));
        assert_eq!(2.5, median(vec![4.0, 1.0, 3.0, 2.0]));
    }

    #[test]
    fn test_cases_match() {
        let config = MatcherConfig::default();
        let matched: Vec<bool> = get_cases()
            .iter()
            .map(|case| {
                let pattern = parse_pattern(case.pattern);
                varmatch::matchers::find_match(&pattern, case.word, &config).unwrap().is_some()
            })
            .collect();
        assert_eq!(vec![true, true, true, true, false], matched);
    }
}
