//! # Tailbus
//!
//! Lightweight publish/subscribe event broker.
//!
//! Named topics are independent append-only event logs. Producers append
//! key/value events; consumers read incrementally with an opaque cursor.
//!
//! ## Quick Start
//!
//! ```ignore
//! use tailbus::prelude::*;
//!
//! let broker = Broker::open("./topics")?;
//! broker.create_topic("orders")?;
//! broker.push("orders", [("order", "42"), ("status", "paid")])?;
//!
//! // First read returns everything and a cursor
//! let batch = broker.read_since("orders", Cursor::START)?;
//!
//! // Later reads return only what was appended since
//! let newer = broker.read_since("orders", batch.cursor)?;
//! ```
//!
//! ## Layers
//!
//! - [`Broker`] - the surface a serving layer calls
//! - [`Session`] - a broker bound to a token's permissions
//! - `tailbus-storage` - topic logs, registry and record framing
//! - `tailbus-security` - permissions and the token store

#![warn(missing_docs)]

mod broker;
mod session;

pub mod prelude;

pub use broker::{Broker, BrokerBuilder};
pub use session::Session;

pub use tailbus_core::{Cursor, Error, Event, Result};
pub use tailbus_security::{AccessMode, OpenOptions, Operation, Permission, Token, TokenStore};
pub use tailbus_storage::{DurabilityMode, ReadBatch};
