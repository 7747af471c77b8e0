use crate::error::UndoError;
use crate::types::is_flag;
use crate::verb::{GitVerb, SyntaxClass, VerbClass};
use serde::Serialize;

/// What a command does to the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Behavior {
    ReadOnly,
    /// Moves the current working reference without touching history.
    Navigating,
    Mutating,
}

/// A tokenized, classified git command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub args: Vec<String>,
    pub supported: bool,
    pub syntax: SyntaxClass,
    pub behavior: Behavior,
    pub verb: Option<GitVerb>,
}

impl ParsedCommand {
    pub fn is_mutating(&self) -> bool {
        self.behavior == Behavior::Mutating
    }

    pub fn is_navigating(&self) -> bool {
        self.behavior == Behavior::Navigating
    }

    /// Whether the command should be recorded in the history log.
    pub fn is_loggable(&self) -> bool {
        self.syntax != SyntaxClass::Custom && self.behavior != Behavior::ReadOnly
    }
}

// ── Tokenizing ──

/// Global options taking a separate value (`git -C dir status`).
const GLOBAL_OPTS_WITH_VALUE: &[&str] = &[
    "-C",
    "-c",
    "--git-dir",
    "--work-tree",
    "--namespace",
    "--config-env",
];

const GLOBAL_FLAGS: &[&str] = &[
    "--no-pager",
    "-p",
    "--paginate",
    "-P",
    "--bare",
    "--no-replace-objects",
    "--literal-pathspecs",
    "--glob-pathspecs",
    "--noglob-pathspecs",
    "--icase-pathspecs",
    "--no-optional-locks",
];

fn is_program_token(token: &str) -> bool {
    let base = token.rsplit(['/', '\\']).next().unwrap_or(token);
    base == crate::PROGRAM || base == "git.exe"
}

/// Parse a raw `git ...` command line into a classified command.
pub fn parse_command(raw: &str) -> Result<ParsedCommand, UndoError> {
    let tokens = shlex::split(raw.trim())
        .ok_or_else(|| UndoError::parse(raw, "unbalanced quotes or trailing escape"))?;

    let Some(program) = tokens.first() else {
        return Err(UndoError::parse(raw, "empty command"));
    };
    if !is_program_token(program) {
        return Err(UndoError::parse(
            raw,
            format!("expected `{}` command, got `{program}`", crate::PROGRAM),
        ));
    }

    let mut i = 1;
    while i < tokens.len() {
        let tok = tokens[i].as_str();
        if GLOBAL_OPTS_WITH_VALUE.contains(&tok) {
            i += 2;
        } else if GLOBAL_FLAGS.contains(&tok)
            || GLOBAL_OPTS_WITH_VALUE
                .iter()
                .any(|opt| opt.starts_with("--") && tok.starts_with(&format!("{opt}=")))
        {
            i += 1;
        } else {
            break;
        }
    }

    let Some(name) = tokens.get(i) else {
        return Err(UndoError::parse(raw, "no git verb given"));
    };
    let name = name.clone();
    let args: Vec<String> = tokens[i + 1..].to_vec();

    let verb = GitVerb::from_name(&name);
    let syntax = match verb {
        Some(v) => v.syntax(),
        None if crate::OWN_VERBS.contains(&name.as_str()) => SyntaxClass::Custom,
        None => SyntaxClass::Unknown,
    };
    let behavior = match verb {
        Some(v) => classify(v, &args),
        None => Behavior::ReadOnly,
    };

    Ok(ParsedCommand {
        supported: matches!(syntax, SyntaxClass::Porcelain | SyntaxClass::Plumbing),
        name,
        args,
        syntax,
        behavior,
        verb,
    })
}

// ── Classification ──

/// Derive the behavior of `verb` invoked with `args`.
pub fn classify(verb: GitVerb, args: &[String]) -> Behavior {
    match verb.class() {
        VerbClass::Mutating => Behavior::Mutating,
        VerbClass::ReadOnly => Behavior::ReadOnly,
        VerbClass::BranchSwitch => classify_branch_switch(verb, args),
        VerbClass::RefNaming => classify_ref_naming(verb, args),
        VerbClass::SubAction => classify_sub_action(verb, args),
    }
}

const CREATE_FLAGS: &[&str] = &[
    "-b",
    "-B",
    "-c",
    "-C",
    "--orphan",
    "--create",
    "--force-create",
];

fn classify_branch_switch(verb: GitVerb, args: &[String]) -> Behavior {
    for (i, arg) in args.iter().enumerate() {
        if arg == "--" {
            break;
        }
        if CREATE_FLAGS.contains(&arg.as_str()) {
            if let Some(name) = args.get(i + 1) {
                if !is_flag(name) {
                    return Behavior::Mutating;
                }
            }
        }
    }

    // `checkout [<ref>] -- <paths>` overwrites working-tree files
    if verb == GitVerb::Checkout {
        if let Some(sep) = args.iter().position(|a| a == "--") {
            if sep + 1 < args.len() {
                return Behavior::Mutating;
            }
        }
    }

    if args.iter().any(|a| !is_flag(a)) {
        Behavior::Navigating
    } else {
        Behavior::ReadOnly
    }
}

const DELETE_FLAGS: &[&str] = &["-d", "-D", "--delete"];

const SHARED_LISTING_FLAGS: &[&str] = &[
    "-l",
    "--list",
    "--contains",
    "--no-contains",
    "--merged",
    "--no-merged",
    "--points-at",
    "--sort",
    "--format",
    "--column",
];

/// Flags that turn `branch`/`tag` into a listing. `-a` lists branches but
/// annotates tags, so the sets differ per verb.
fn listing_flags(verb: GitVerb) -> &'static [&'static str] {
    match verb {
        GitVerb::Branch => &[
            "-a",
            "--all",
            "-r",
            "--remotes",
            "-v",
            "-vv",
            "--verbose",
            "--show-current",
        ],
        GitVerb::Tag => &["-n", "-v", "--verify"],
        _ => &[],
    }
}

fn classify_ref_naming(verb: GitVerb, args: &[String]) -> Behavior {
    let flag = |set: &[&str]| {
        args.iter().any(|a| {
            set.contains(&a.as_str())
                || set
                    .iter()
                    .any(|f| f.starts_with("--") && a.starts_with(&format!("{f}=")))
        })
    };
    if flag(DELETE_FLAGS) {
        return Behavior::Mutating;
    }
    if flag(SHARED_LISTING_FLAGS) || flag(listing_flags(verb)) {
        return Behavior::ReadOnly;
    }
    if args.iter().any(|a| !is_flag(a)) {
        Behavior::Mutating
    } else {
        Behavior::ReadOnly
    }
}

/// Read-only sub-actions (first operand) and flags per verb.
fn read_only_surface(verb: GitVerb) -> (&'static [&'static str], &'static [&'static str]) {
    match verb {
        GitVerb::Remote => (&["show", "get-url"], &["-v", "--verbose"]),
        GitVerb::Config => (
            &["get", "list"],
            &[
                "--get",
                "--get-all",
                "--get-regexp",
                "--get-urlmatch",
                "--get-color",
                "--get-colorbool",
                "-l",
                "--list",
            ],
        ),
        GitVerb::Notes => (&["list", "show"], &[]),
        GitVerb::SparseCheckout => (&["list"], &[]),
        _ => (&[], &[]),
    }
}

const CONFIG_WRITE_FLAGS: &[&str] = &[
    "--unset",
    "--unset-all",
    "--add",
    "--replace-all",
    "--rename-section",
    "--remove-section",
    "-e",
    "--edit",
];

fn classify_sub_action(verb: GitVerb, args: &[String]) -> Behavior {
    let (actions, flags) = read_only_surface(verb);
    if args.iter().any(|a| flags.contains(&a.as_str())) {
        return Behavior::ReadOnly;
    }
    let operands: Vec<&String> = args.iter().filter(|a| !is_flag(a)).collect();
    let Some(first) = operands.first() else {
        return Behavior::ReadOnly;
    };
    if actions.contains(&first.as_str()) {
        return Behavior::ReadOnly;
    }
    // `git config user.name` reads a single key
    if verb == GitVerb::Config && operands.len() == 1 {
        if !args.iter().any(|a| CONFIG_WRITE_FLAGS.contains(&a.as_str())) {
            return Behavior::ReadOnly;
        }
    }
    Behavior::Mutating
}
