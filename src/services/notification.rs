use crate::db::TrackedCase;
use crate::domain::Movement;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Per-case alert for a movement that was not seen before.
#[must_use]
pub fn new_movement_message(case: &TrackedCase, movement: &Movement) -> EmailMessage {
    let subject = format!(
        "[NEW MOVEMENT] {} ({})",
        case.case_number, case.tribunal_alias
    );
    let body = format!(
        "Case: {}\nTribunal: {}\n\nLatest movement:\nDate: {}\nTitle: {}\nDescription: {}\n",
        case.case_number,
        case.tribunal_alias,
        movement.date,
        movement.title,
        movement.description
    );

    EmailMessage {
        to: case.recipient_email.clone(),
        subject,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn message_names_case_and_movement() {
        let case = TrackedCase {
            id: 3,
            case_number: "0001".to_string(),
            tribunal_alias: "api_publica_tjsp".to_string(),
            recipient_email: "lawyer@example.com".to_string(),
            last_fingerprint: None,
            created_at: Utc::now(),
        };
        let message = new_movement_message(&case, &Movement::new("2024-02-01", "B", "x"));

        assert_eq!(message.to, "lawyer@example.com");
        assert_eq!(message.subject, "[NEW MOVEMENT] 0001 (api_publica_tjsp)");
        assert!(message.body.contains("Title: B\n"));
        assert!(message.body.contains("Date: 2024-02-01\n"));
    }
}
