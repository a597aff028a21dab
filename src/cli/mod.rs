//! Command-line interface implementations.
//!
//! One function per subcommand. The CLI layer owns user interaction and the
//! fatal/skip distinction: run-fatal failures exit through `error!`, skips
//! and per-album drops are printed and the run continues. Everything else is
//! delegated to the pipeline and the API clients.
//!
//! - [`auth`] - OAuth 2.0 PKCE authorization flow
//! - [`sync`] - style/year discovery into a playlist
//! - [`bands`] - latest album per artist from a band file

mod auth;
mod bands;
mod sync;

pub use auth::auth;
pub use bands::bands;
pub use sync::sync;
