/// Characters that glue words together in housekeeping descriptions.
const SEPARATORS: [char; 2] = ['-', '|'];

/// Replaces every separator with a single space so keyword matching sees
/// the words on either side. Idempotent.
pub fn normalize_description(value: &str) -> String {
    value.replace(SEPARATORS, " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_dashes_and_pipes_with_spaces() {
        assert_eq!(
            normalize_description("TV-arm broken|needs charger"),
            "TV arm broken needs charger"
        );
        assert_eq!(normalize_description("a--b||c"), "a  b  c");
    }

    #[test]
    fn normalizing_twice_is_a_no_op() {
        for sample in ["TV-arm broken|needs charger", "plain text", "-|-", ""] {
            let once = normalize_description(sample);
            assert_eq!(normalize_description(&once), once);
        }
    }
}
