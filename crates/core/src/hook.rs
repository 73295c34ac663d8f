//! Git hook names
//!
//! Every hook group hookah manages is named after a git hook. The set below
//! follows githooks(5); anything else is rejected before it can become a
//! directory or a file name.

use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// A hook name git knows how to invoke
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum HookName {
    ApplypatchMsg,
    PreApplypatch,
    PostApplypatch,
    PreCommit,
    PreMergeCommit,
    PrepareCommitMsg,
    CommitMsg,
    PostCommit,
    PreRebase,
    PostCheckout,
    PostMerge,
    PrePush,
    PreReceive,
    Update,
    ProcReceive,
    PostReceive,
    PostUpdate,
    ReferenceTransaction,
    PushToCheckout,
    PreAutoGc,
    PostRewrite,
    SendemailValidate,
    FsmonitorWatchman,
    P4Changelist,
    P4PrepareChangelist,
    P4PostChangelist,
    P4PreSubmit,
    PostIndexChange,
}

/// Groups created by `install` when the source directory is first laid out
pub const DEFAULT_GROUPS: [HookName; 2] = [HookName::CommitMsg, HookName::PreCommit];

impl HookName {
    /// All recognized hook names, in githooks(5) order
    pub const ALL: [HookName; 28] = [
        Self::ApplypatchMsg,
        Self::PreApplypatch,
        Self::PostApplypatch,
        Self::PreCommit,
        Self::PreMergeCommit,
        Self::PrepareCommitMsg,
        Self::CommitMsg,
        Self::PostCommit,
        Self::PreRebase,
        Self::PostCheckout,
        Self::PostMerge,
        Self::PrePush,
        Self::PreReceive,
        Self::Update,
        Self::ProcReceive,
        Self::PostReceive,
        Self::PostUpdate,
        Self::ReferenceTransaction,
        Self::PushToCheckout,
        Self::PreAutoGc,
        Self::PostRewrite,
        Self::SendemailValidate,
        Self::FsmonitorWatchman,
        Self::P4Changelist,
        Self::P4PrepareChangelist,
        Self::P4PostChangelist,
        Self::P4PreSubmit,
        Self::PostIndexChange,
    ];

    /// The file name git looks for in `.git/hooks`
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ApplypatchMsg => "applypatch-msg",
            Self::PreApplypatch => "pre-applypatch",
            Self::PostApplypatch => "post-applypatch",
            Self::PreCommit => "pre-commit",
            Self::PreMergeCommit => "pre-merge-commit",
            Self::PrepareCommitMsg => "prepare-commit-msg",
            Self::CommitMsg => "commit-msg",
            Self::PostCommit => "post-commit",
            Self::PreRebase => "pre-rebase",
            Self::PostCheckout => "post-checkout",
            Self::PostMerge => "post-merge",
            Self::PrePush => "pre-push",
            Self::PreReceive => "pre-receive",
            Self::Update => "update",
            Self::ProcReceive => "proc-receive",
            Self::PostReceive => "post-receive",
            Self::PostUpdate => "post-update",
            Self::ReferenceTransaction => "reference-transaction",
            Self::PushToCheckout => "push-to-checkout",
            Self::PreAutoGc => "pre-auto-gc",
            Self::PostRewrite => "post-rewrite",
            Self::SendemailValidate => "sendemail-validate",
            Self::FsmonitorWatchman => "fsmonitor-watchman",
            Self::P4Changelist => "p4-changelist",
            Self::P4PrepareChangelist => "p4-prepare-changelist",
            Self::P4PostChangelist => "p4-post-changelist",
            Self::P4PreSubmit => "p4-pre-submit",
            Self::PostIndexChange => "post-index-change",
        }
    }

    /// Parse a hook name, rejecting anything git would never invoke
    pub fn parse(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|hook| hook.as_str() == name)
            .ok_or_else(|| Error::UnknownHookGroup {
                name: name.to_string(),
            })
    }
}

impl FromStr for HookName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for HookName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for HookName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
