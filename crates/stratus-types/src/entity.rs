use std::fmt;

use serde::{Deserialize, Serialize};

/// The level of the store hierarchy an entity belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Account,
    Container,
    Object,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Account => "account",
            EntityKind::Container => "container",
            EntityKind::Object => "object",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_as_str() {
        assert_eq!(EntityKind::Container.to_string(), "container");
        assert_eq!(EntityKind::Object.as_str(), "object");
    }

    #[test]
    fn serde_lowercase() {
        let json = serde_json::to_string(&EntityKind::Account).unwrap();
        assert_eq!(json, "\"account\"");
    }
}
