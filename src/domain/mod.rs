//! Domain logic - pure business rules independent of git and the registry

pub mod branch;
pub mod package;
pub mod release;
pub mod template;
pub mod version;

pub use branch::{BranchClassification, BranchNames, ReleaseChannel};
pub use package::{PackageDescriptor, ResolvedVersion};
pub use release::{ChangeKind, Preids, ReleaseSelection, ReleaseType};
