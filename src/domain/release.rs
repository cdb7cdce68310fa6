//! Release classification: which kind of bump to apply and with which
//! pre-release identifier.

use crate::domain::branch::{BranchClassification, ReleaseChannel};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic-version increment to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseType {
    Major,
    Minor,
    Patch,
    Premajor,
    Preminor,
    Prepatch,
}

impl ReleaseType {
    /// Pick the release type for a kind of change on a given branch.
    ///
    /// Production branches get plain releases, every other channel gets the
    /// matching pre-release kind.
    pub fn for_change(change: ChangeKind, branch: &BranchClassification) -> Self {
        let production = branch.is_production();
        match (change, production) {
            (ChangeKind::Breaking, true) => ReleaseType::Major,
            (ChangeKind::Breaking, false) => ReleaseType::Premajor,
            (ChangeKind::Feature, true) => ReleaseType::Minor,
            (ChangeKind::Feature, false) => ReleaseType::Preminor,
            (ChangeKind::Fix, true) => ReleaseType::Patch,
            (ChangeKind::Fix, false) => ReleaseType::Prepatch,
        }
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReleaseType::Major => "major",
            ReleaseType::Minor => "minor",
            ReleaseType::Patch => "patch",
            ReleaseType::Premajor => "premajor",
            ReleaseType::Preminor => "preminor",
            ReleaseType::Prepatch => "prepatch",
        };
        write!(f, "{}", name)
    }
}

/// What the operator says the changes are
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Breaking,
    Feature,
    Fix,
}

impl ChangeKind {
    pub const ALL: [ChangeKind; 3] = [ChangeKind::Breaking, ChangeKind::Feature, ChangeKind::Fix];

    /// Prompt wording for this kind of change
    pub fn description(&self) -> &'static str {
        match self {
            ChangeKind::Breaking => "Your changes are breaking changes",
            ChangeKind::Feature => {
                "Your changes do not break anything, but they add a new feature"
            }
            ChangeKind::Fix => "Your changes do not add a new feature, but they fix something",
        }
    }
}

/// Pre-release identifiers used by each non-production channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preids {
    #[serde(default = "default_uat_preid")]
    pub uat: String,

    #[serde(default = "default_develop_preid")]
    pub develop: String,

    #[serde(default = "default_custom_preid")]
    pub custom: String,
}

fn default_uat_preid() -> String {
    "rc".to_string()
}

fn default_develop_preid() -> String {
    "beta".to_string()
}

fn default_custom_preid() -> String {
    "alpha".to_string()
}

impl Default for Preids {
    fn default() -> Self {
        Preids {
            uat: default_uat_preid(),
            develop: default_develop_preid(),
            custom: default_custom_preid(),
        }
    }
}

impl Preids {
    /// Identifier implied by a channel; production releases carry none
    pub fn for_channel(&self, channel: ReleaseChannel) -> Option<&str> {
        match channel {
            ReleaseChannel::Production => None,
            ReleaseChannel::Uat => Some(&self.uat),
            ReleaseChannel::Develop => Some(&self.develop),
            ReleaseChannel::Custom => Some(&self.custom),
        }
    }
}

/// Release type plus the pre-release identifier to use with it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSelection {
    pub release_type: ReleaseType,
    pub preid: Option<String>,
}

impl ReleaseSelection {
    /// Build a selection for a branch. An explicit `preid` always wins over
    /// the channel default.
    pub fn new(
        release_type: ReleaseType,
        branch: &BranchClassification,
        preids: &Preids,
        preid_override: Option<&str>,
    ) -> Self {
        let preid = match preid_override {
            Some(preid) => Some(preid.to_string()),
            None => preids.for_channel(branch.channel).map(str::to_string),
        };

        ReleaseSelection {
            release_type,
            preid,
        }
    }
}
