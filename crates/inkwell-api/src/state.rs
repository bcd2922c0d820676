use std::sync::Arc;

use chrono_tz::Tz;
use inkwell_db::Database;

use crate::navigation::Navigator;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Arc<Database>,
    pub navigator: Navigator<Database>,
}

impl AppStateInner {
    pub fn new(db: Arc<Database>, display_zone: Tz) -> AppState {
        let navigator = Navigator::new(db.clone(), display_zone);
        Arc::new(Self { db, navigator })
    }
}
