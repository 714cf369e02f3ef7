//! Representative Concentration Pathways.

use crate::LoadError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Greenhouse gas forcing pathway selecting the regional SLR projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rcp {
    Rcp26,
    Rcp45,
    Rcp85,
}

impl Rcp {
    pub const ALL: [Rcp; 3] = [Rcp::Rcp26, Rcp::Rcp45, Rcp::Rcp85];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Rcp::Rcp26 => "rcp26",
            Rcp::Rcp45 => "rcp45",
            Rcp::Rcp85 => "rcp85",
        }
    }

    /// The numeric suffix used in SLR file names (`slr45.csv`).
    pub const fn suffix(&self) -> &'static str {
        match self {
            Rcp::Rcp26 => "26",
            Rcp::Rcp45 => "45",
            Rcp::Rcp85 => "85",
        }
    }
}

impl std::fmt::Display for Rcp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rcp {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let suffix = lower.strip_prefix("rcp").unwrap_or(&lower).replace('.', "");
        Rcp::ALL
            .into_iter()
            .find(|rcp| rcp.suffix() == suffix)
            .ok_or_else(|| LoadError::UnknownRcp(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("rcp45".parse::<Rcp>().unwrap(), Rcp::Rcp45);
        assert_eq!("RCP8.5".parse::<Rcp>().unwrap(), Rcp::Rcp85);
        assert_eq!("26".parse::<Rcp>().unwrap(), Rcp::Rcp26);
        assert!(matches!("rcp60".parse::<Rcp>(), Err(LoadError::UnknownRcp(s)) if s == "rcp60"));
    }

    #[test]
    fn test_names() {
        for rcp in Rcp::ALL {
            assert_eq!(rcp.as_str().parse::<Rcp>().unwrap(), rcp);
            assert_eq!(rcp.as_str(), format!("rcp{}", rcp.suffix()));
        }
    }
}
