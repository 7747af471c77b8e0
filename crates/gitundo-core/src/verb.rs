use serde::{Deserialize, Serialize};

/// Where a verb comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyntaxClass {
    Porcelain,
    Plumbing,
    /// Verbs provided by this tool (`git undo`, `git back`).
    Custom,
    Unknown,
}

/// How a verb's behavior is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbClass {
    /// Changes durable state regardless of arguments.
    Mutating,
    /// Only inspects state.
    ReadOnly,
    /// `checkout`, `switch`: create, navigate or list depending on arguments.
    BranchSwitch,
    /// `branch`, `tag`: delete, create or list depending on arguments.
    RefNaming,
    /// `remote`, `config` and friends: read-only sub-actions, otherwise writes.
    SubAction,
}

/// Every git verb the classifier knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GitVerb {
    // porcelain, mutating
    Add,
    Am,
    Apply,
    CherryPick,
    Clean,
    Clone,
    Commit,
    Fetch,
    Init,
    Merge,
    Mv,
    Pull,
    Push,
    Rebase,
    Reset,
    Restore,
    Revert,
    Rm,
    Stash,
    Submodule,
    Worktree,
    // porcelain, conditional
    Branch,
    Checkout,
    Config,
    Notes,
    Remote,
    SparseCheckout,
    Switch,
    Tag,
    // porcelain, read-only
    Archive,
    Bisect,
    Blame,
    Bundle,
    Describe,
    Diff,
    FormatPatch,
    Gc,
    Grep,
    Help,
    Log,
    Maintenance,
    RangeDiff,
    Reflog,
    Shortlog,
    Show,
    ShowBranch,
    Status,
    Version,
    Whatchanged,
    // plumbing
    CatFile,
    CheckIgnore,
    Cherry,
    CountObjects,
    DiffFiles,
    DiffIndex,
    DiffTree,
    ForEachRef,
    HashObject,
    LsFiles,
    LsRemote,
    LsTree,
    MergeBase,
    NameRev,
    ReadTree,
    RevList,
    RevParse,
    ShowRef,
    SymbolicRef,
    UpdateRef,
    Var,
    WriteTree,
}

impl GitVerb {
    pub const ALL: [GitVerb; 71] = [
        GitVerb::Add,
        GitVerb::Am,
        GitVerb::Apply,
        GitVerb::CherryPick,
        GitVerb::Clean,
        GitVerb::Clone,
        GitVerb::Commit,
        GitVerb::Fetch,
        GitVerb::Init,
        GitVerb::Merge,
        GitVerb::Mv,
        GitVerb::Pull,
        GitVerb::Push,
        GitVerb::Rebase,
        GitVerb::Reset,
        GitVerb::Restore,
        GitVerb::Revert,
        GitVerb::Rm,
        GitVerb::Stash,
        GitVerb::Submodule,
        GitVerb::Worktree,
        GitVerb::Branch,
        GitVerb::Checkout,
        GitVerb::Config,
        GitVerb::Notes,
        GitVerb::Remote,
        GitVerb::SparseCheckout,
        GitVerb::Switch,
        GitVerb::Tag,
        GitVerb::Archive,
        GitVerb::Bisect,
        GitVerb::Blame,
        GitVerb::Bundle,
        GitVerb::Describe,
        GitVerb::Diff,
        GitVerb::FormatPatch,
        GitVerb::Gc,
        GitVerb::Grep,
        GitVerb::Help,
        GitVerb::Log,
        GitVerb::Maintenance,
        GitVerb::RangeDiff,
        GitVerb::Reflog,
        GitVerb::Shortlog,
        GitVerb::Show,
        GitVerb::ShowBranch,
        GitVerb::Status,
        GitVerb::Version,
        GitVerb::Whatchanged,
        GitVerb::CatFile,
        GitVerb::CheckIgnore,
        GitVerb::Cherry,
        GitVerb::CountObjects,
        GitVerb::DiffFiles,
        GitVerb::DiffIndex,
        GitVerb::DiffTree,
        GitVerb::ForEachRef,
        GitVerb::HashObject,
        GitVerb::LsFiles,
        GitVerb::LsRemote,
        GitVerb::LsTree,
        GitVerb::MergeBase,
        GitVerb::NameRev,
        GitVerb::ReadTree,
        GitVerb::RevList,
        GitVerb::RevParse,
        GitVerb::ShowRef,
        GitVerb::SymbolicRef,
        GitVerb::UpdateRef,
        GitVerb::Var,
        GitVerb::WriteTree,
    ];

    /// Look up a verb by its command-line name.
    pub fn from_name(name: &str) -> Option<GitVerb> {
        GitVerb::ALL.iter().copied().find(|v| v.as_str() == name)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GitVerb::Add => "add",
            GitVerb::Am => "am",
            GitVerb::Apply => "apply",
            GitVerb::CherryPick => "cherry-pick",
            GitVerb::Clean => "clean",
            GitVerb::Clone => "clone",
            GitVerb::Commit => "commit",
            GitVerb::Fetch => "fetch",
            GitVerb::Init => "init",
            GitVerb::Merge => "merge",
            GitVerb::Mv => "mv",
            GitVerb::Pull => "pull",
            GitVerb::Push => "push",
            GitVerb::Rebase => "rebase",
            GitVerb::Reset => "reset",
            GitVerb::Restore => "restore",
            GitVerb::Revert => "revert",
            GitVerb::Rm => "rm",
            GitVerb::Stash => "stash",
            GitVerb::Submodule => "submodule",
            GitVerb::Worktree => "worktree",
            GitVerb::Branch => "branch",
            GitVerb::Checkout => "checkout",
            GitVerb::Config => "config",
            GitVerb::Notes => "notes",
            GitVerb::Remote => "remote",
            GitVerb::SparseCheckout => "sparse-checkout",
            GitVerb::Switch => "switch",
            GitVerb::Tag => "tag",
            GitVerb::Archive => "archive",
            GitVerb::Bisect => "bisect",
            GitVerb::Blame => "blame",
            GitVerb::Bundle => "bundle",
            GitVerb::Describe => "describe",
            GitVerb::Diff => "diff",
            GitVerb::FormatPatch => "format-patch",
            GitVerb::Gc => "gc",
            GitVerb::Grep => "grep",
            GitVerb::Help => "help",
            GitVerb::Log => "log",
            GitVerb::Maintenance => "maintenance",
            GitVerb::RangeDiff => "range-diff",
            GitVerb::Reflog => "reflog",
            GitVerb::Shortlog => "shortlog",
            GitVerb::Show => "show",
            GitVerb::ShowBranch => "show-branch",
            GitVerb::Status => "status",
            GitVerb::Version => "version",
            GitVerb::Whatchanged => "whatchanged",
            GitVerb::CatFile => "cat-file",
            GitVerb::CheckIgnore => "check-ignore",
            GitVerb::Cherry => "cherry",
            GitVerb::CountObjects => "count-objects",
            GitVerb::DiffFiles => "diff-files",
            GitVerb::DiffIndex => "diff-index",
            GitVerb::DiffTree => "diff-tree",
            GitVerb::ForEachRef => "for-each-ref",
            GitVerb::HashObject => "hash-object",
            GitVerb::LsFiles => "ls-files",
            GitVerb::LsRemote => "ls-remote",
            GitVerb::LsTree => "ls-tree",
            GitVerb::MergeBase => "merge-base",
            GitVerb::NameRev => "name-rev",
            GitVerb::ReadTree => "read-tree",
            GitVerb::RevList => "rev-list",
            GitVerb::RevParse => "rev-parse",
            GitVerb::ShowRef => "show-ref",
            GitVerb::SymbolicRef => "symbolic-ref",
            GitVerb::UpdateRef => "update-ref",
            GitVerb::Var => "var",
            GitVerb::WriteTree => "write-tree",
        }
    }

    pub fn class(self) -> VerbClass {
        match self {
            GitVerb::Add
            | GitVerb::Am
            | GitVerb::Apply
            | GitVerb::CherryPick
            | GitVerb::Clean
            | GitVerb::Clone
            | GitVerb::Commit
            | GitVerb::Fetch
            | GitVerb::Init
            | GitVerb::Merge
            | GitVerb::Mv
            | GitVerb::Pull
            | GitVerb::Push
            | GitVerb::Rebase
            | GitVerb::Reset
            | GitVerb::Restore
            | GitVerb::Revert
            | GitVerb::Rm
            | GitVerb::Stash
            | GitVerb::Submodule
            | GitVerb::Worktree
            | GitVerb::ReadTree
            | GitVerb::UpdateRef => VerbClass::Mutating,

            GitVerb::Checkout | GitVerb::Switch => VerbClass::BranchSwitch,
            GitVerb::Branch | GitVerb::Tag => VerbClass::RefNaming,
            GitVerb::Config | GitVerb::Notes | GitVerb::Remote | GitVerb::SparseCheckout => {
                VerbClass::SubAction
            }

            GitVerb::Archive
            | GitVerb::Bisect
            | GitVerb::Blame
            | GitVerb::Bundle
            | GitVerb::Describe
            | GitVerb::Diff
            | GitVerb::FormatPatch
            | GitVerb::Gc
            | GitVerb::Grep
            | GitVerb::Help
            | GitVerb::Log
            | GitVerb::Maintenance
            | GitVerb::RangeDiff
            | GitVerb::Reflog
            | GitVerb::Shortlog
            | GitVerb::Show
            | GitVerb::ShowBranch
            | GitVerb::Status
            | GitVerb::Version
            | GitVerb::Whatchanged
            | GitVerb::CatFile
            | GitVerb::CheckIgnore
            | GitVerb::Cherry
            | GitVerb::CountObjects
            | GitVerb::DiffFiles
            | GitVerb::DiffIndex
            | GitVerb::DiffTree
            | GitVerb::ForEachRef
            | GitVerb::HashObject
            | GitVerb::LsFiles
            | GitVerb::LsRemote
            | GitVerb::LsTree
            | GitVerb::MergeBase
            | GitVerb::NameRev
            | GitVerb::RevList
            | GitVerb::RevParse
            | GitVerb::ShowRef
            | GitVerb::SymbolicRef
            | GitVerb::Var
            | GitVerb::WriteTree => VerbClass::ReadOnly,
        }
    }

    pub fn syntax(self) -> SyntaxClass {
        match self {
            GitVerb::CatFile
            | GitVerb::CheckIgnore
            | GitVerb::Cherry
            | GitVerb::CountObjects
            | GitVerb::DiffFiles
            | GitVerb::DiffIndex
            | GitVerb::DiffTree
            | GitVerb::ForEachRef
            | GitVerb::HashObject
            | GitVerb::LsFiles
            | GitVerb::LsRemote
            | GitVerb::LsTree
            | GitVerb::MergeBase
            | GitVerb::NameRev
            | GitVerb::ReadTree
            | GitVerb::RevList
            | GitVerb::RevParse
            | GitVerb::ShowRef
            | GitVerb::SymbolicRef
            | GitVerb::UpdateRef
            | GitVerb::Var
            | GitVerb::WriteTree => SyntaxClass::Plumbing,
            _ => SyntaxClass::Porcelain,
        }
    }
}

impl std::fmt::Display for GitVerb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
