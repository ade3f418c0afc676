pub mod error;
pub mod routes;
pub mod rsvp;

use std::sync::Arc;

use rsvp_db::Database;

pub use crate::routes::build_router;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
}
