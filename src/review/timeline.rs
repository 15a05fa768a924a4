use chrono::{DateTime, Utc};

use super::types::{EventKind, LifecycleEvent};

/// Earliest "review requested" timestamp in an event history. Input may be
/// unsorted and may repeat entries from overlapping page fetches.
pub fn first_review_request<'a, I>(events: I) -> Option<DateTime<Utc>>
where
    I: IntoIterator<Item = &'a LifecycleEvent>,
{
    events
        .into_iter()
        .filter(|event| event.kind == EventKind::ReviewRequested)
        .map(|event| event.at)
        .min()
}
