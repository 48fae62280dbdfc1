use std::fmt;

use serde::{Deserialize, Serialize};

/// Client platform a request came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Ps3,
    Ps4,
    Psp,
    Vita,
    Website,
    #[default]
    Unknown,
}

impl Platform {
    /// Infer the platform from a `User-Agent` header value.
    pub fn from_user_agent(agent: &str) -> Self {
        let agent = agent.to_ascii_uppercase();
        if agent.contains("LBPPSP") {
            Self::Psp
        } else if agent.contains("PSVITA") || agent.contains("LBPVITA") {
            Self::Vita
        } else if agent.contains("PS4") {
            Self::Ps4
        } else if agent.contains("PS3") || agent.contains("LBP") {
            Self::Ps3
        } else if agent.contains("MOZILLA") {
            Self::Website
        } else {
            Self::Unknown
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Ps3 => "ps3",
            Self::Ps4 => "ps4",
            Self::Psp => "psp",
            Self::Vita => "vita",
            Self::Website => "website",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Verified caller identity, supplied by the authentication layer.
///
/// The store treats it as opaque: it is recorded for audit and never used
/// for authorization decisions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerIdentity {
    pub name: String,
    pub platform: Platform,
}

impl CallerIdentity {
    pub fn anonymous() -> Self {
        Self { name: "anonymous".into(), platform: Platform::Unknown }
    }

    pub fn user(name: impl Into<String>) -> Self {
        Self { name: name.into(), platform: Platform::Unknown }
    }

    pub fn on(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }
}
