//! List cases command handler

use crate::config::Config;
use crate::db::Store;

pub async fn cmd_list_cases(config: &Config) -> anyhow::Result<()> {
    let store = Store::from_config(&config.general).await?;
    let cases = store.list_cases().await?;

    if cases.is_empty() {
        println!("No cases being tracked.");
        println!();
        println!("Add one with: docket-watch add <case_number> <tribunal_alias> <email>");
        return Ok(());
    }

    println!("Tracked Cases ({} total)", cases.len());
    println!("{:-<70}", "");

    for case in cases {
        let recorded = store.count_movements(case.id).await.unwrap_or(0);
        let indicator = if case.last_fingerprint.is_some() {
            "●"
        } else {
            "○"
        };

        println!(
            "{} {} [{}]",
            indicator, case.case_number, case.tribunal_alias
        );
        println!(
            "  ID: {} | Recipient: {} | Movements: {}",
            case.id, case.recipient_email, recorded
        );
    }

    println!();
    println!("Legend: ● Synced | ○ Never synced");

    Ok(())
}
