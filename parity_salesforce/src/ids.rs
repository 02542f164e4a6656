//! Salesforce record IDs.
//!
//! The API always reports 18-character IDs. The 15-character form is case
//! sensitive; the three extra characters encode which of its letters are
//! upper case.

const SUFFIX_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ012345";

/// Convert a 15-character ID to its 18-character form. Any other ID is
/// returned unchanged.
pub fn to_18_char_id(id: &str) -> String {
    if id.len() != 15 || !id.is_ascii() {
        return id.to_owned();
    }
    let suffix: String = id
        .as_bytes()
        .chunks(5)
        .map(|chunk| {
            let bits = chunk
                .iter()
                .enumerate()
                .filter(|(_, c)| c.is_ascii_uppercase())
                .fold(0usize, |acc, (i, _)| acc | (1 << i));
            SUFFIX_ALPHABET[bits] as char
        })
        .collect();
    format!("{id}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_case_ids_get_an_all_a_suffix() {
        assert_eq!(to_18_char_id("00e000000000001"), "00e000000000001AAA");
    }

    #[test]
    fn upper_case_letters_set_suffix_bits() {
        assert_eq!(to_18_char_id("001A0000006Vm9r"), "001A0000006Vm9rIAC");
        assert_eq!(to_18_char_id("ABCDEABCDEABCDE"), "ABCDEABCDEABCDE555");
    }

    #[test]
    fn other_lengths_pass_through() {
        assert_eq!(to_18_char_id("00e000000000001AAA"), "00e000000000001AAA");
        assert_eq!(to_18_char_id("00e0000000000011"), "00e0000000000011");
    }
}
