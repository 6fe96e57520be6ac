use serde::{Deserialize, Serialize};

/// The closed set of spending categories the Core banking service assigns to transactions.
///
/// The declaration order is the canonical presentation order and is what `Ord` follows.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Shopping,
    Edu,
    Transport,
    Transfer,
    Ent,
    Food,
    Etc,
}

serde_plain::derive_display_from_serialize!(Category);
serde_plain::derive_fromstr_from_deserialize!(Category);

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Shopping,
        Category::Edu,
        Category::Transport,
        Category::Transfer,
        Category::Ent,
        Category::Food,
        Category::Etc,
    ];

    /// The label shown to users in the app.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Shopping => "쇼핑",
            Category::Edu => "교육",
            Category::Transport => "교통",
            Category::Transfer => "이체",
            Category::Ent => "문화/여가",
            Category::Food => "식비",
            Category::Etc => "기타",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_wire_names() {
        assert_eq!(Category::Shopping.to_string(), "SHOPPING");
        assert_eq!(Category::Ent.to_string(), "ENT");
        assert_eq!(Category::from_str("TRANSFER").unwrap(), Category::Transfer);
        assert_eq!(
            serde_json::to_string(&Category::Etc).unwrap(),
            "\"ETC\"".to_string()
        );
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        assert!(Category::from_str("GAMBLING").is_err());
        assert!(Category::from_str("shopping").is_err());
        assert!(serde_json::from_str::<Category>("\"PETS\"").is_err());
    }

    #[test]
    fn test_every_category_has_a_label() {
        for category in Category::ALL {
            assert!(!category.label().is_empty());
        }
        assert_eq!(Category::Food.label(), "식비");
    }

    #[test]
    fn test_order_follows_declaration() {
        let mut sorted = Category::ALL;
        sorted.sort();
        assert_eq!(sorted, Category::ALL);
        assert!(Category::Shopping < Category::Etc);
    }
}
