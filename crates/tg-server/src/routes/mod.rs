//! HTTP routes
//!
//! | Route | Description |
//! |-------|-------------|
//! | `GET /live`, `GET /ready` | Health checks |
//! | `GET /session` | Session seen by the edge, without secrets |
//! | `POST /session` | Mirror an `auth-storage` envelope into cookies |
//! | `DELETE /session` | Clear the mirrored cookies |
//! | `GET\|POST /api/<path..>` | Proxy to the backend origin |
//! | `GET /__edge/redirect` | Redirect chosen by the edge fairing |
//! | `GET /<path..>` | App shell fallback |

pub mod health;
pub mod proxy;
pub mod redirect;
pub mod session;
pub mod shell;

use rocket::{Route, routes};

/// Every route except the static file server
pub fn all() -> Vec<Route> {
    routes![
        health::live,
        health::ready,
        session::current,
        session::mirror,
        session::clear,
        proxy::proxy_get,
        proxy::proxy_post,
        redirect::edge_redirect,
        shell::app_shell,
    ]
}
