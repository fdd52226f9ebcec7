use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};

use varmatch::analyzer;
use varmatch::errors::{MatchError, ParseError};
use varmatch::matchers::{select_matcher, MatcherConfig, MatcherKind, SearchBudget};
use varmatch::parser::{parse_pattern, parse_pattern_strict};
use varmatch::render;

/// Which matcher to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MatcherChoice {
    /// Pick the most specific matcher the pattern allows
    Auto,
    Regular,
    NonCrossing,
    Scope,
    Repeated,
    Naive,
}

impl MatcherChoice {
    fn kind(self) -> Option<MatcherKind> {
        match self {
            MatcherChoice::Auto => None,
            MatcherChoice::Regular => Some(MatcherKind::Regular),
            MatcherChoice::NonCrossing => Some(MatcherKind::NonCrossing),
            MatcherChoice::Scope => Some(MatcherKind::ScopeBounded),
            MatcherChoice::Repeated => Some(MatcherKind::RepetitionBounded),
            MatcherChoice::Naive => Some(MatcherKind::Naive),
        }
    }
}

/// Match a word against a pattern with variables
#[derive(Parser, Debug)]
#[command(author, version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")"), about, long_about = None)]
struct Cli {
    /// The pattern: lowercase letters, whitespace and variables x1, x2, ...
    pattern: String,

    /// The word to match
    word: String,

    /// Matcher to use
    #[arg(short = 'm', long, value_enum, default_value_t = MatcherChoice::Auto)]
    matcher: MatcherChoice,

    /// Maximum scope-coincidence degree for the scope-bounded matcher
    #[arg(long = "max-scd", default_value_t = varmatch::matchers::DEFAULT_MAX_SCOPE_COINCIDENCE)]
    max_scope_coincidence: usize,

    /// Maximum number of repeated variables for the repetition-bounded matcher
    #[arg(long = "max-repeated", default_value_t = varmatch::matchers::DEFAULT_MAX_REPEATED_VARIABLES)]
    max_repeated_variables: usize,

    /// Abort after this many search steps
    #[arg(long)]
    max_steps: Option<u64>,

    /// Abort after this many milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Reject characters outside the pattern syntax instead of skipping them
    #[arg(long)]
    strict: bool,

    /// Print the structural metrics of the pattern before matching
    #[arg(long)]
    analyze: bool,
}

impl Cli {
    fn config(&self) -> MatcherConfig {
        let mut budget = SearchBudget::unlimited();
        if let Some(steps) = self.max_steps {
            budget = budget.with_max_steps(steps);
        }
        if let Some(ms) = self.timeout_ms {
            budget = budget.with_time_limit(Duration::from_millis(ms));
        }
        MatcherConfig {
            max_scope_coincidence: self.max_scope_coincidence,
            max_repeated_variables: self.max_repeated_variables,
            budget,
        }
    }
}

/// Entry point of the varmatch CLI.
///
/// Delegates to [`try_main`], printing any error with its code and help
/// text before exiting with code 1.
fn main() -> ExitCode {
    varmatch::log::init_logger(varmatch::log::debug_from_env());

    if let Err(e) = try_main() {
        if let Some(match_err) = e.downcast_ref::<MatchError>() {
            eprintln!("Error: {}", match_err.display_detailed());
        } else if let Some(parse_err) = e.downcast_ref::<ParseError>() {
            eprintln!("Error: {}", parse_err.display_detailed());
        } else {
            eprintln!("Error: {e}");
        }
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Parse the pattern, pick a matcher, match, and print the result.
fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let pattern = if cli.strict {
        parse_pattern_strict(&cli.pattern).map_err(|e| *e)?
    } else {
        parse_pattern(&cli.pattern)
    };

    if cli.analyze {
        println!("{}", analyzer::analyze(&pattern));
    }

    let config = cli.config();
    let matcher = match cli.matcher.kind() {
        Some(kind) => kind.build(&config),
        None => select_matcher(&pattern, &config),
    };
    log::info!("Matching with the {} matcher", matcher.kind());

    let t_match = Instant::now();
    let result = matcher.find_match(&pattern, &cli.word)?;
    let match_secs = t_match.elapsed().as_secs_f64();

    match result {
        Some(substitution) => {
            println!("Match found: {substitution}");
            println!("Origin word: {}", render::apply(&pattern, &substitution));
        }
        None => println!("No match found"),
    }
    log::debug!("matched in {match_secs:.6}s");

    Ok(())
}
