//! Edge redirect route

use rocket::get;
use rocket::response::Redirect;

use crate::edge::EdgeRedirect;

/// `303 See Other` to the location chosen by the edge fairing
///
/// The path must match [`EDGE_REDIRECT_PATH`](crate::constants::EDGE_REDIRECT_PATH).
#[get("/__edge/redirect")]
pub fn edge_redirect(target: EdgeRedirect) -> Redirect {
    Redirect::to(target.0)
}
