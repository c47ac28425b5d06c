//! # cellfin-session: Form Session for the CellFin Converter
//!
//! Wraps the pure engine in what a form host needs: the current field
//! text, snapshots after each change, keystroke debouncing, and product
//! configuration loaded from TOML and the environment.
//!
//! ## Modules
//!
//! - [`session`] - ConverterSession and SessionSnapshot
//! - [`debounce`] - Debounced handler, last call in a burst wins
//! - [`config`] - ConverterConfig (fees, default rate, summary branding)
//! - [`error`] - SessionError
//!
//! ## Example Usage
//!
//! ```rust
//! use cellfin_session::ConverterSession;
//!
//! let mut session = ConverterSession::with_defaults();
//! let snapshot = session.set_usd_text("100");
//!
//! assert!(snapshot.validation.is_clean());
//! assert_eq!(snapshot.display.total_display, "৳ 12,724.35");
//!
//! let reset = session.reset();
//! assert_eq!(reset.inputs.rate_text, "123.00");
//! ```
//!
//! Logging goes through `tracing`; installing a subscriber is left to the
//! host application.

pub mod config;
pub mod debounce;
pub mod error;
pub mod session;

pub use config::{ConverterConfig, FeeSettings, SessionSettings, SummarySettings};
pub use debounce::{Debounced, DEFAULT_DEBOUNCE_MS};
pub use error::{SessionError, SessionResult};
pub use session::{ConverterSession, SessionSnapshot};
