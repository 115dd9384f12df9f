use serde::{Deserialize, Serialize};

/// A named, isolated identity with its own persistent storage partition.
///
/// Received from the backend and immutable afterwards. `name` is the unique
/// stable key used for the session registry and the storage partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Profile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            display_name: None,
        }
    }

    /// Presentation title: display name if present, otherwise the
    /// uppercased profile name.
    pub fn title(&self) -> String {
        self.display_name
            .clone()
            .unwrap_or_else(|| self.name.to_uppercase())
    }

    /// Storage partition identity for this profile's browsing surface.
    /// Doubles as the per-profile data directory name, so it avoids
    /// characters that are invalid in paths on any supported platform.
    pub fn partition(&self) -> String {
        format!("persist-{}", self.name)
    }
}
