#![forbid(unsafe_code)]

use anyhow::{Context, Result, anyhow};
use common::{UnixSeconds, VoteSource, VoterAddress, current_unix_seconds};
use scorer::{ReportOptions, ScoreEngine, render_report};
use std::env;
use std::io::Write;
use vote_fetch::{VoteFetchConfig, VoteFetcher};

pub const ENV_VERBOSE: &str = "VOTING_SCORE_VERBOSE";

pub const USAGE: &str =
    "usage: voting-score [--quiet|--verbose] [--json] [--now <unix-seconds>] <address>...";
pub const MISSING_ADDRESS_HINT: &str = "input address as an argument";

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CliArgs {
    pub addresses: Vec<VoterAddress>,
    /// `None` defers to the environment.
    pub verbose: Option<bool>,
    pub json: bool,
    pub now: Option<UnixSeconds>,
    pub help: bool,
}

pub fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut parsed = CliArgs::default();

    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--quiet" | "-q" => parsed.verbose = Some(false),
            "--verbose" | "-v" => parsed.verbose = Some(true),
            "--json" => parsed.json = true,
            "--help" | "-h" => parsed.help = true,
            "--now" => {
                i += 1;
                let raw = args.get(i).context("--now requires a unix timestamp in seconds")?;
                parsed.now = Some(raw.parse::<UnixSeconds>().context("invalid --now value")?);
            }
            unknown if unknown.starts_with('-') => {
                return Err(anyhow!("unknown argument '{unknown}'. {USAGE}"));
            }
            address => parsed.addresses.push(VoterAddress::new(address)),
        }
        i += 1;
    }

    Ok(parsed)
}

pub fn parse_bool_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

pub fn verbose_from_env(env_value: Option<&str>) -> bool {
    env_value.and_then(parse_bool_flag).unwrap_or(true)
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct OutputOptions {
    pub report: ReportOptions,
    pub json: bool,
    pub now: Option<UnixSeconds>,
}

/// Scores each address in turn and writes one report per address.
pub async fn score_addresses<S, W>(
    engine: &ScoreEngine<S>,
    addresses: &[VoterAddress],
    options: OutputOptions,
    out: &mut W,
) -> Result<()>
where
    S: VoteSource,
    W: Write,
{
    for address in addresses {
        let now = options.now.unwrap_or_else(current_unix_seconds);
        let result = engine.compute_voting_score(address, now).await;
        tracing::info!(
            address = %address,
            protocols = result.protocol_count(),
            final_score = result.final_score,
            "address scored"
        );

        if options.json {
            let encoded = serde_json::to_string_pretty(&result).context("encode score result")?;
            writeln!(out, "{encoded}").context("write score result")?;
        } else {
            writeln!(out, "{}", render_report(&result, options.report))
                .context("write score report")?;
        }
    }
    Ok(())
}

pub async fn run<W: Write>(args: &[String], out: &mut W) -> Result<()> {
    let args = parse_args(args)?;
    if args.help {
        writeln!(out, "{USAGE}").context("write usage")?;
        return Ok(());
    }
    if args.addresses.is_empty() {
        writeln!(out, "{MISSING_ADDRESS_HINT}").context("write usage hint")?;
        return Ok(());
    }

    let verbose = args
        .verbose
        .unwrap_or_else(|| verbose_from_env(env::var(ENV_VERBOSE).ok().as_deref()));
    let fetch_config = VoteFetchConfig::from_env();
    tracing::debug!(
        api_base_url = %fetch_config.api_base_url,
        max_pages = fetch_config.max_pages,
        request_timeout_ms = fetch_config.request_timeout_ms,
        "vote fetch config"
    );
    let fetcher = VoteFetcher::new(fetch_config).context("build vote fetcher")?;
    let engine = ScoreEngine::new(fetcher);

    let options = OutputOptions {
        report: ReportOptions { verbose },
        json: args.json,
        now: args.now,
    };
    score_addresses(&engine, &args.addresses, options, out).await
}
