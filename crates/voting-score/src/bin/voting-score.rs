use anyhow::Result;
use std::env;
use std::io;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    init_tracing(env::var("RUST_LOG").ok().as_deref());
    let args: Vec<String> = env::args().skip(1).collect();
    let mut stdout = io::stdout().lock();
    voting_score::run(&args, &mut stdout).await
}

fn init_tracing(log_override: Option<&str>) {
    let filter = resolve_log_filter(log_override);
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn resolve_log_filter(env_override: Option<&str>) -> String {
    match env_override.map(str::trim) {
        Some(value) if !value.is_empty() => {
            let has_voting_score_directive = value
                .split(',')
                .map(str::trim)
                .any(|directive| {
                    directive == "voting_score" || directive.starts_with("voting_score=")
                });
            if has_voting_score_directive {
                value.to_owned()
            } else {
                format!("{value},voting_score=info")
            }
        }
        _ => "info,voting_score=info".to_owned(),
    }
}
