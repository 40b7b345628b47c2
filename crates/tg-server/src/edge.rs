//! Edge guard fairing
//!
//! Every request passes through [`EdgeGuard`] before routing. A redirect
//! decision stores its location in the request-local cache and rewrites
//! the request to [`EDGE_REDIRECT_PATH`], whose route answers
//! `303 See Other`. Allowed requests are untouched.

use rocket::data::Data;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::uri::Origin;
use rocket::http::{Method, Status};
use rocket::request::{self, FromRequest, Outcome, Request};
use tg_application::EdgeGuard;
use tg_domain::{GuardDecision, Location};
use tracing::{debug, warn};

use crate::constants::EDGE_REDIRECT_PATH;
use crate::cookies::CookieCredentialStore;

/// Location chosen by the fairing for this request
#[derive(Debug, Clone, Default)]
struct PendingRedirect(Option<String>);

/// Runs the edge guard on every request
pub struct EdgeGuardFairing {
    guard: EdgeGuard,
}

impl EdgeGuardFairing {
    pub fn new(guard: EdgeGuard) -> Self {
        Self { guard }
    }

    fn decide(&self, req: &Request<'_>) -> GuardDecision {
        let target = req.uri().to_string();
        let store = CookieCredentialStore::new(req.cookies());
        self.guard.evaluate(&Location::parse(&target), &store)
    }
}

#[rocket::async_trait]
impl Fairing for EdgeGuardFairing {
    fn info(&self) -> Info {
        Info {
            name: "Edge Guard",
            kind: Kind::Request,
        }
    }

    async fn on_request(&self, req: &mut Request<'_>, _data: &mut Data<'_>) {
        let Some(location) = self.decide(req).location().map(str::to_string) else {
            return;
        };

        debug!(path = %req.uri().path(), location = %location, "edge guard redirect");
        req.local_cache(|| PendingRedirect(Some(location)));
        match Origin::parse(EDGE_REDIRECT_PATH) {
            Ok(uri) => {
                req.set_method(Method::Get);
                req.set_uri(uri);
            }
            Err(e) => warn!(error = %e, "edge redirect route is not a valid URI"),
        }
    }
}

/// Redirect location set by [`EdgeGuardFairing`]
///
/// Forwards when the fairing did not redirect, so the internal route is
/// unreachable from outside.
pub struct EdgeRedirect(pub String);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for EdgeRedirect {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> request::Outcome<Self, Self::Error> {
        match &req.local_cache(PendingRedirect::default).0 {
            Some(location) => Outcome::Success(EdgeRedirect(location.clone())),
            None => Outcome::Forward(Status::NotFound),
        }
    }
}
