use nanoid::nanoid;

/// Alphabet of generated id suffixes, valid in XML ids.
const ID_ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y',
    'z',
];

/// Generate an id like `Task_0x1f3ab`.
pub fn prefixed_id(prefix: &str) -> String {
    format!("{}_{}", prefix, nanoid!(7, &ID_ALPHABET))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_id() {
        let id = prefixed_id("Task");
        assert!(id.starts_with("Task_"));
        assert_eq!(id.len(), "Task_".len() + 7);
        assert!(id["Task_".len()..].chars().all(|c| ID_ALPHABET.contains(&c)));
    }
}
