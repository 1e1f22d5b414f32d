//! Convenient imports for Tailbus.
//!
//! This module re-exports the most commonly used types so you can get started
//! with a single import:
//!
//! ```ignore
//! use tailbus::prelude::*;
//!
//! let broker = Broker::open("./topics")?;
//! broker.create_topic("orders")?;
//! ```

// Main entry point
pub use crate::broker::{Broker, BrokerBuilder};
pub use crate::session::Session;

// Error handling
pub use crate::{Error, Result};

// Core types
pub use crate::{Cursor, Event, ReadBatch};

// Access control
pub use crate::{Permission, Token, TokenStore};
