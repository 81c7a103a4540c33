use serde::{Deserialize, Serialize};

use crate::models::generation::GRID_SIZE;

/// One of the four upscale choices on a grid reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionToken {
    U1,
    U2,
    U3,
    U4,
}

impl SelectionToken {
    /// Parse a user reply, case-insensitively. Surrounding whitespace is
    /// ignored; anything else is an invalid selection.
    pub fn parse(input: &str) -> Option<SelectionToken> {
        match input.trim().to_uppercase().as_str() {
            "U1" => Some(SelectionToken::U1),
            "U2" => Some(SelectionToken::U2),
            "U3" => Some(SelectionToken::U3),
            "U4" => Some(SelectionToken::U4),
            _ => None,
        }
    }

    /// Index into the four-element image url list.
    pub fn index(&self) -> usize {
        match self {
            SelectionToken::U1 => 0,
            SelectionToken::U2 => 1,
            SelectionToken::U3 => 2,
            SelectionToken::U4 => 3,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            SelectionToken::U1 => "U1",
            SelectionToken::U2 => "U2",
            SelectionToken::U3 => "U3",
            SelectionToken::U4 => "U4",
        }
    }
}

/// Record registered against a sent grid message so a later reply can be
/// resolved to one of the four variants. Read-once: consumed by the first
/// reply whether or not the token in it is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingSelection {
    pub command_name: String,
    /// Identifier of the sent grid message this record is keyed by.
    pub message_id: String,
    /// User who requested the generation.
    pub author: String,
    pub image_urls: [String; GRID_SIZE],
    pub prompt: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(SelectionToken::parse("u1"), Some(SelectionToken::U1));
        assert_eq!(SelectionToken::parse("U1"), Some(SelectionToken::U1));
        assert_eq!(SelectionToken::parse(" u3 "), Some(SelectionToken::U3));
        assert_eq!(SelectionToken::parse("u4"), Some(SelectionToken::U4));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(SelectionToken::parse("U5"), None);
        assert_eq!(SelectionToken::parse("u"), None);
        assert_eq!(SelectionToken::parse(""), None);
        assert_eq!(SelectionToken::parse("upscale 1"), None);
    }

    #[test]
    fn test_index_mapping() {
        assert_eq!(SelectionToken::U1.index(), 0);
        assert_eq!(SelectionToken::U2.index(), 1);
        assert_eq!(SelectionToken::U3.index(), 2);
        assert_eq!(SelectionToken::U4.index(), 3);
    }

    #[test]
    fn test_code_round_trip() {
        for token in [
            SelectionToken::U1,
            SelectionToken::U2,
            SelectionToken::U3,
            SelectionToken::U4,
        ] {
            assert_eq!(SelectionToken::parse(token.code()), Some(token));
        }
    }
}
