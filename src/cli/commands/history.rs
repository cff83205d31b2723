use crate::config::Config;
use crate::db::Store;

pub async fn cmd_history(config: &Config, case_id: i32, limit: u64) -> anyhow::Result<()> {
    let store = Store::from_config(&config.general).await?;

    let Some(case) = store.get_case(case_id).await? else {
        println!("Case with ID {case_id} not found.");
        println!("Use 'docket-watch list' to see IDs");
        return Ok(());
    };

    let movements = store.list_movements(case_id, limit).await?;
    if movements.is_empty() {
        println!(
            "No movements recorded for {} ({}).",
            case.case_number, case.tribunal_alias
        );
        return Ok(());
    }

    println!(
        "Movements for {} ({}) (last {}):",
        case.case_number,
        case.tribunal_alias,
        movements.len()
    );
    println!("{:-<70}", "");

    for movement in movements {
        let when = movement
            .occurred_at
            .map_or_else(|| "unknown date".to_string(), |dt| dt.to_rfc3339());
        println!("• {} - {}", when, movement.title);
        if !movement.description.is_empty() {
            println!("  {}", movement.description);
        }
    }

    Ok(())
}
