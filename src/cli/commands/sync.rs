use std::sync::Arc;

use crate::config::Config;
use crate::services::Scheduler;
use crate::state::SharedState;

pub async fn cmd_sync(config: Config) -> anyhow::Result<()> {
    let state = SharedState::new(config).await?;
    let scheduler = Scheduler::new(
        Arc::clone(&state.sync_service),
        state.config.scheduler.clone(),
    );
    let report = scheduler.run_once().await?;

    if report.cases.is_empty() {
        println!("No cases being tracked.");
        return Ok(());
    }

    for case in &report.cases {
        let detail = match (case.outcome.latest(), case.outcome.error()) {
            (Some(m), _) => format!(" - {}", m.title),
            (None, Some(err)) => format!(" - {err}"),
            (None, None) => String::new(),
        };
        println!(
            "[{}] {} ({}){}",
            case.outcome.label(),
            case.case_number,
            case.tribunal_alias,
            detail
        );
    }

    println!("{:-<70}", "");
    println!(
        "Changed: {} | Digests sent: {} | Digest failures: {}",
        report.changed, report.digests_sent, report.digest_failures
    );

    Ok(())
}
