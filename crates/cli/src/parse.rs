//! ArgMatches → CliAction conversion.

use clap::ArgMatches;
use std::path::PathBuf;
use tailbus::{Cursor, Permission};

/// Settings shared by every subcommand.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalArgs {
    pub dir: PathBuf,
    pub tokens: PathBuf,
    pub token: Option<String>,
    pub strict: bool,
    pub json: bool,
}

/// A fully parsed invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum CliAction {
    Init,
    Create { topic: String },
    Push { topic: String, pairs: Vec<(String, String)> },
    Pull { topic: String, seek: Cursor },
    Topics,
    Info { topic: String },
    Subscribe { topic: String },
    TokenIssue { permission: Permission, topics: Vec<String> },
    TokenRevoke { secret: String },
    TokenShow,
}

impl CliAction {
    /// Whether the action runs without a caller token.
    pub fn is_bootstrap(&self) -> bool {
        matches!(self, CliAction::Init)
    }
}

/// Read the global flags.
pub fn global_args(matches: &ArgMatches) -> GlobalArgs {
    GlobalArgs {
        dir: matches
            .get_one::<String>("dir")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("topics")),
        tokens: matches
            .get_one::<String>("tokens")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("tokens.json")),
        token: matches.get_one::<String>("token").cloned(),
        strict: matches.get_flag("strict"),
        json: matches.get_flag("json"),
    }
}

/// Convert clap matches into a `CliAction`.
pub fn matches_to_action(matches: &ArgMatches) -> Result<CliAction, String> {
    let (name, sub) = matches
        .subcommand()
        .ok_or_else(|| "No command given".to_string())?;

    match name {
        "init" => Ok(CliAction::Init),
        "create" => Ok(CliAction::Create {
            topic: required(sub, "topic")?,
        }),
        "push" => {
            let topic = required(sub, "topic")?;
            let pairs = sub
                .get_many::<String>("pairs")
                .into_iter()
                .flatten()
                .map(|p| parse_pair(p))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(CliAction::Push { topic, pairs })
        }
        "pull" => {
            let topic = required(sub, "topic")?;
            let seek = match sub.get_one::<String>("seek") {
                Some(s) => s
                    .parse::<Cursor>()
                    .map_err(|_| format!("Invalid cursor: {}", s))?,
                None => Cursor::START,
            };
            Ok(CliAction::Pull { topic, seek })
        }
        "topics" => Ok(CliAction::Topics),
        "info" => Ok(CliAction::Info {
            topic: required(sub, "topic")?,
        }),
        "subscribe" => Ok(CliAction::Subscribe {
            topic: required(sub, "topic")?,
        }),
        "token" => token_action(sub),
        other => Err(format!("Unknown command: {}", other)),
    }
}

fn token_action(matches: &ArgMatches) -> Result<CliAction, String> {
    let (name, sub) = matches
        .subcommand()
        .ok_or_else(|| "No token command given".to_string())?;

    match name {
        "issue" => {
            let mut permission = Permission::NONE;
            for perm in sub.get_many::<String>("perm").into_iter().flatten() {
                permission |= Permission::from_name(perm)
                    .ok_or_else(|| format!("Unknown permission: {}", perm))?;
            }
            let topics = sub
                .get_many::<String>("topic")
                .into_iter()
                .flatten()
                .cloned()
                .collect();
            Ok(CliAction::TokenIssue { permission, topics })
        }
        "revoke" => Ok(CliAction::TokenRevoke {
            secret: required(sub, "secret")?,
        }),
        "show" => Ok(CliAction::TokenShow),
        other => Err(format!("Unknown token command: {}", other)),
    }
}

fn required(matches: &ArgMatches, name: &str) -> Result<String, String> {
    matches
        .get_one::<String>(name)
        .cloned()
        .ok_or_else(|| format!("Missing argument: {}", name))
}

/// Split `key=value` at the first `=`.
pub fn parse_pair(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((k, v)) if !k.is_empty() => Ok((k.to_string(), v.to_string())),
        _ => Err(format!("Expected KEY=VALUE, got '{}'", s)),
    }
}
