use serde::{Deserialize, Serialize};
use std::fmt;

/// Release channel a branch publishes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseChannel {
    Production,
    Uat,
    Develop,
    Custom,
}

impl fmt::Display for ReleaseChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseChannel::Production => write!(f, "production"),
            ReleaseChannel::Uat => write!(f, "uat"),
            ReleaseChannel::Develop => write!(f, "develop"),
            ReleaseChannel::Custom => write!(f, "custom"),
        }
    }
}

/// Branch names mapped to each non-custom channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchNames {
    #[serde(default = "default_production")]
    pub production: Vec<String>,

    #[serde(default = "default_uat")]
    pub uat: Vec<String>,

    #[serde(default = "default_develop")]
    pub develop: Vec<String>,
}

fn default_production() -> Vec<String> {
    vec!["main".to_string(), "master".to_string()]
}

fn default_uat() -> Vec<String> {
    vec!["uat".to_string()]
}

fn default_develop() -> Vec<String> {
    vec!["develop".to_string()]
}

impl Default for BranchNames {
    fn default() -> Self {
        BranchNames {
            production: default_production(),
            uat: default_uat(),
            develop: default_develop(),
        }
    }
}

/// A branch name together with the channel it was classified into
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchClassification {
    pub name: String,
    pub channel: ReleaseChannel,
}

impl BranchClassification {
    /// Classify the effective branch name.
    ///
    /// The explicit override wins over the checked-out branch. Production
    /// names are tested first, then UAT, then develop; anything else is custom.
    pub fn classify(explicit: Option<&str>, current: &str, names: &BranchNames) -> Self {
        let name = explicit.unwrap_or(current);
        let contains = |set: &[String]| set.iter().any(|candidate| candidate == name);

        let channel = if contains(&names.production) {
            ReleaseChannel::Production
        } else if contains(&names.uat) {
            ReleaseChannel::Uat
        } else if contains(&names.develop) {
            ReleaseChannel::Develop
        } else {
            ReleaseChannel::Custom
        };

        BranchClassification {
            name: name.to_string(),
            channel,
        }
    }

    pub fn is_production(&self) -> bool {
        self.channel == ReleaseChannel::Production
    }

    pub fn is_uat(&self) -> bool {
        self.channel == ReleaseChannel::Uat
    }

    pub fn is_develop(&self) -> bool {
        self.channel == ReleaseChannel::Develop
    }

    pub fn is_custom(&self) -> bool {
        self.channel == ReleaseChannel::Custom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(branch: &BranchClassification) -> [bool; 4] {
        [
            branch.is_production(),
            branch.is_uat(),
            branch.is_develop(),
            branch.is_custom(),
        ]
    }

    #[test]
    fn test_production_branches() {
        for name in ["main", "master"] {
            let branch = BranchClassification::classify(None, name, &BranchNames::default());
            assert_eq!(flags(&branch), [true, false, false, false], "{}", name);
        }
    }

    #[test]
    fn test_uat_branch() {
        let branch = BranchClassification::classify(None, "uat", &BranchNames::default());
        assert_eq!(flags(&branch), [false, true, false, false]);
    }

    #[test]
    fn test_develop_branch() {
        let branch = BranchClassification::classify(None, "develop", &BranchNames::default());
        assert_eq!(branch.name, "develop");
        assert_eq!(flags(&branch), [false, false, true, false]);
    }

    #[test]
    fn test_custom_branches() {
        for name in ["feature/login", "release", "Main", ""] {
            let branch = BranchClassification::classify(None, name, &BranchNames::default());
            assert_eq!(flags(&branch), [false, false, false, true], "{:?}", name);
        }
    }

    #[test]
    fn test_explicit_name_overrides_current_branch() {
        let branch =
            BranchClassification::classify(Some("main"), "feature/test", &BranchNames::default());
        assert_eq!(branch.name, "main");
        assert!(branch.is_production());
        assert!(!branch.is_custom());
    }

    #[test]
    fn test_release_alias_when_configured() {
        let mut names = BranchNames::default();
        names.production.push("release".to_string());

        let branch = BranchClassification::classify(None, "release", &names);
        assert!(branch.is_production());
    }

    #[test]
    fn test_production_has_priority_over_other_sets() {
        let names = BranchNames {
            production: vec!["shared".to_string()],
            uat: vec!["shared".to_string()],
            develop: vec!["shared".to_string()],
        };

        let branch = BranchClassification::classify(None, "shared", &names);
        assert_eq!(branch.channel, ReleaseChannel::Production);
    }
}
