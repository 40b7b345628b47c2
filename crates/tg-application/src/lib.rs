//! # Application Layer
//!
//! Session resolution and route guarding, shared by the edge server and
//! the client runtime.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`session_resolver`] | Two-tier credential fallback producing a [`Session`](tg_domain::Session) |
//! | [`route_classifier`] | The single route table both guards classify against |
//! | [`guard`] | Edge guard, client guard and landing-route policy |
//! | [`lifecycle`] | Writing credentials at login, clearing them at logout |

pub mod guard;
pub mod lifecycle;
pub mod route_classifier;
pub mod session_resolver;

pub use guard::{
    ClientGuard, ClientGuardConfig, EdgeGuard, GuardRoutes, GuardState,
};
pub use lifecycle::{LoginCredentials, clear_session, persist_login};
pub use route_classifier::{ROUTE_TABLE, RouteTable, classify};
pub use session_resolver::SessionResolver;
