//! Tailbus CLI: operate on a topics directory and its token store.
//!
//! Every command except `init` runs as the token passed with `--token`
//! (or `TAILBUS_TOKEN`) and is checked against that token's permissions.
//!
//! ```text
//! tailbus init
//! tailbus --token $ADMIN create orders
//! tailbus --token $ADMIN push orders id=42 status=paid
//! tailbus --token $ADMIN pull orders --seek 0
//! ```

mod commands;
mod format;
mod parse;

use std::process;

use tailbus::{Broker, Error, Operation, Result, TokenStore};
use tracing_subscriber::EnvFilter;

use commands::build_cli;
use format::{format_error, format_output, Output, OutputMode};
use parse::{global_args, matches_to_action, CliAction, GlobalArgs};

fn main() {
    init_tracing();

    let matches = build_cli().get_matches();
    let globals = global_args(&matches);
    let mode = if globals.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    let action = match matches_to_action(&matches) {
        Ok(action) => action,
        Err(msg) => {
            eprintln!("{}", msg);
            process::exit(2);
        }
    };

    match run(&globals, action) {
        Ok(output) => {
            let formatted = format_output(&output, mode);
            if !formatted.is_empty() {
                println!("{}", formatted);
            }
        }
        Err(e) => {
            eprintln!("{}", format_error(&e, mode));
            process::exit(1);
        }
    }
}

/// Logs go to stderr so stdout stays parseable; `RUST_LOG` overrides the level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_broker(globals: &GlobalArgs) -> Result<Broker> {
    let builder = Broker::builder().path(&globals.dir);
    if globals.strict {
        builder.strict().open()
    } else {
        builder.open()
    }
}

fn run(globals: &GlobalArgs, action: CliAction) -> Result<Output> {
    let store = TokenStore::open(&globals.tokens)?;

    if action.is_bootstrap() {
        return Ok(Output::Initialized(store.init_admin()?));
    }

    let secret = globals.token.as_deref().ok_or_else(|| {
        Error::PermissionDenied("no token given; pass --token or set TAILBUS_TOKEN".into())
    })?;
    let token = store
        .lookup(secret)
        .ok_or_else(|| Error::PermissionDenied("unknown token".into()))?;

    let broker = open_broker(globals)?;
    let session = broker.session(&token);

    match action {
        CliAction::Init => Ok(Output::Initialized(None)),
        CliAction::Create { topic } => {
            session.create_topic(&topic)?;
            Ok(Output::Created(topic))
        }
        CliAction::Push { topic, pairs } => {
            let count = session.push(&topic, pairs)?;
            Ok(Output::Pushed { topic, count })
        }
        CliAction::Pull { topic, seek } => Ok(Output::Batch(session.read_since(&topic, seek)?)),
        CliAction::Topics => Ok(Output::Topics(session.list_topics()?)),
        CliAction::Info { topic } => {
            let bytes = session.topic_size(&topic)?;
            Ok(Output::Info { topic, bytes })
        }
        CliAction::Subscribe { topic } => {
            session.authorize(Operation::Subscribe, None)?;
            // Only existing topics can be subscribed to
            broker.topic_size(&topic)?;
            Ok(Output::Subscribed(store.subscribe(secret, &topic)?))
        }
        CliAction::TokenIssue { permission, topics } => {
            session.authorize(Operation::CreateToken, None)?;
            Ok(Output::TokenIssued(store.issue(permission, topics)?))
        }
        CliAction::TokenRevoke { secret } => {
            session.authorize(Operation::DeleteToken, None)?;
            Ok(Output::Revoked(store.revoke(&secret)?))
        }
        CliAction::TokenShow => Ok(Output::TokenShown(token.clone())),
    }
}
