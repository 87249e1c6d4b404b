use crate::domain::common::{Record, ResourceDescriptor};

/// Обращения клиентов: только чтение
pub const CONTACTS: ResourceDescriptor = ResourceDescriptor {
    default_limit: 20,
    bulk_refetch_limit: 20,
    read_only: true,
    ..ResourceDescriptor::new("contacts", "Message", "/contacts/admin")
};

/// First line of the message cut to `max` characters for the table cell.
pub fn message_preview(record: &Record, max: usize) -> String {
    let message = record.display("message");
    let first_line = message.lines().next().unwrap_or_default();
    if first_line.chars().count() > max {
        let cut: String = first_line.chars().take(max).collect();
        format!("{}…", cut.trim_end())
    } else {
        first_line.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_is_cut() {
        let r = Record::new().with("message", "Hello there, I would like a quote\nThanks");
        assert_eq!(message_preview(&r, 11), "Hello there…");
        assert_eq!(message_preview(&r, 100), "Hello there, I would like a quote");
        assert_eq!(message_preview(&Record::new(), 10), "");
    }
}
