//! clap command tree.

use clap::{Arg, ArgAction, Command};

/// Build the top-level `tailbus` command.
pub fn build_cli() -> Command {
    Command::new("tailbus")
        .about("Operate on a Tailbus topics directory")
        .subcommand_required(true)
        .arg(
            Arg::new("dir")
                .long("dir")
                .value_name("PATH")
                .default_value("topics")
                .global(true)
                .help("Topics directory"),
        )
        .arg(
            Arg::new("tokens")
                .long("tokens")
                .value_name("PATH")
                .default_value("tokens.json")
                .global(true)
                .help("Token store file"),
        )
        .arg(
            Arg::new("token")
                .long("token")
                .value_name("SECRET")
                .env("TAILBUS_TOKEN")
                .hide_env_values(true)
                .global(true)
                .help("Access token secret"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("fsync after every append"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .global(true)
                .help("Print JSON output"),
        )
        .subcommand(Command::new("init").about("Create the first admin token if none exists"))
        .subcommand(
            Command::new("create")
                .about("Create a topic")
                .arg(Arg::new("topic").required(true)),
        )
        .subcommand(
            Command::new("push")
                .about("Append one event per KEY=VALUE pair")
                .arg(Arg::new("topic").required(true))
                .arg(
                    Arg::new("pairs")
                        .value_name("KEY=VALUE")
                        .required(true)
                        .num_args(1..),
                ),
        )
        .subcommand(
            Command::new("pull")
                .about("Read events appended after a cursor")
                .arg(Arg::new("topic").required(true))
                .arg(
                    Arg::new("seek")
                        .long("seek")
                        .value_name("CURSOR")
                        .default_value("0")
                        .help("Cursor returned by the previous pull"),
                ),
        )
        .subcommand(Command::new("topics").about("List all topics"))
        .subcommand(
            Command::new("info")
                .about("Show a topic's log size")
                .arg(Arg::new("topic").required(true)),
        )
        .subcommand(
            Command::new("subscribe")
                .about("Subscribe the current token to a topic")
                .arg(Arg::new("topic").required(true)),
        )
        .subcommand(
            Command::new("token")
                .about("Manage access tokens")
                .subcommand_required(true)
                .subcommand(
                    Command::new("issue")
                        .about("Issue a new token")
                        .arg(
                            Arg::new("perm")
                                .long("perm")
                                .value_name("NAME")
                                .action(ArgAction::Append)
                                .required(true)
                                .help("read, write, subscribe, createTopic, deleteTopic, createToken, deleteToken or admin"),
                        )
                        .arg(
                            Arg::new("topic")
                                .long("topic")
                                .value_name("NAME")
                                .action(ArgAction::Append)
                                .help("Subscribe the new token to a topic"),
                        ),
                )
                .subcommand(
                    Command::new("revoke")
                        .about("Revoke a token")
                        .arg(Arg::new("secret").required(true)),
                )
                .subcommand(Command::new("show").about("Describe the current token")),
        )
}
