//! Formatting helpers for user-facing text.

/// Joins activity ids for the validation message: "2", "2 and 5",
/// "2, 5 and 7".
pub fn join_ids(ids: &[u32]) -> String {
    match ids {
        [] => String::new(),
        [only] => only.to_string(),
        [first, last] => format!("{first} and {last}"),
        [head @ .., last] => {
            let head = head
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            format!("{head} and {last}")
        }
    }
}

/// The warning shown while activities are missing compulsory fields, and the
/// rejection message when map generation is attempted with none complete.
pub fn missing_fields_message(ids: &[u32]) -> String {
    format!(
        "Activity {}'s compulsory fields are not keyed in. Fill in the interaction type, \
         active learning process and activity details to place it on the design map.",
        join_ids(ids)
    )
}

/// `used/limit` counter text for the character-limited fields.
pub fn char_counter(used: usize, limit: usize) -> String {
    format!("{used}/{limit}")
}

/// Splits a long key-application label across two lines so it fits the
/// activity box tag. Labels of one or two words stay on a single line.
pub fn split_label(label: &str) -> (String, Option<String>) {
    let words: Vec<&str> = label.split_whitespace().collect();
    if words.len() <= 2 {
        return (label.to_string(), None);
    }
    let mid = words.len().div_ceil(2);
    (words[..mid].join(" "), Some(words[mid..].join(" ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_ids_uses_commas_then_and() {
        assert_eq!(join_ids(&[2]), "2");
        assert_eq!(join_ids(&[2, 5]), "2 and 5");
        assert_eq!(join_ids(&[2, 5, 7]), "2, 5 and 7");
        assert_eq!(join_ids(&[1, 2, 3, 4]), "1, 2, 3 and 4");
    }

    #[test]
    fn missing_fields_message_names_the_ids() {
        let msg = missing_fields_message(&[2]);
        assert!(msg.starts_with("Activity 2's compulsory fields are not keyed in"));
        assert!(missing_fields_message(&[2, 5]).contains("2 and 5"));
        assert!(missing_fields_message(&[2, 5, 7]).contains("2, 5 and 7"));
    }

    #[test]
    fn split_label_halves_longer_labels() {
        assert_eq!(split_label("Embed Scaffolding"), ("Embed Scaffolding".into(), None));
        assert_eq!(
            split_label("Support Assessment for Learning"),
            ("Support Assessment".into(), Some("for Learning".into()))
        );
    }
}
