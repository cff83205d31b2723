//! Add case command handler

use crate::config::Config;
use crate::db::Store;
use crate::services::{CaseError, CaseService, NewCase, SeaOrmCaseService};

pub async fn cmd_add_case(
    config: &Config,
    case_number: &str,
    tribunal_alias: &str,
    recipient_email: &str,
) -> anyhow::Result<()> {
    let store = Store::from_config(&config.general).await?;
    let service = SeaOrmCaseService::new(store);

    let input = NewCase::new(case_number, tribunal_alias, recipient_email);
    match service.create_case(input).await {
        Ok(case) => {
            println!(
                "✓ Tracking {} ({}) [ID: {}]",
                case.case_number, case.tribunal_alias, case.id
            );
            println!("  Alerts go to {}", case.recipient_email);
            Ok(())
        }
        Err(CaseError::Conflict {
            case_number,
            tribunal_alias,
        }) => {
            println!("Case {case_number} is already tracked in {tribunal_alias}.");
            Ok(())
        }
        Err(CaseError::Validation(msg)) => {
            println!("Invalid input: {msg}");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
