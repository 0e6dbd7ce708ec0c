use chrono::{Local, NaiveDate};
use uuid::Uuid;

/// Per-invocation context. `today` anchors every date-relative computation
/// (active and upcoming leaves, default effective week).
#[derive(Clone, Debug)]
pub struct RequestContext {
    pub today: NaiveDate,
    pub correlation_id: Uuid,
}

impl RequestContext {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            correlation_id: Uuid::new_v4(),
        }
    }

    pub fn now() -> Self {
        Self::new(Local::now().date_naive())
    }
}
