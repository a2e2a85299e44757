use std::sync::Arc;

use chrono::{DateTime, Days, Duration, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::{error, info};

use crate::context::AppContext;
use crate::services::alert_service::{self, MessageSink};

/// Longest DST gap we step over when the alert time does not exist locally
const MAX_GAP_MINUTES: i64 = 180;

/// Next instant strictly after `now` at which the local clock in `tz` reads `at`
///
/// A time inside a spring-forward gap fires at the first valid instant after
/// it; an ambiguous fall-back time fires on the earlier of the two.
pub fn next_fire_after(now: DateTime<Utc>, tz: Tz, at: NaiveTime) -> Option<DateTime<Utc>> {
    let today = now.with_timezone(&tz).date_naive();

    (0..=2)
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .filter_map(|date| resolve_local(tz, date.and_time(at)))
        .find(|candidate| *candidate > now)
}

fn resolve_local(tz: Tz, local: NaiveDateTime) -> Option<DateTime<Utc>> {
    (0..=MAX_GAP_MINUTES)
        .find_map(|minutes| tz.from_local_datetime(&(local + Duration::minutes(minutes))).earliest())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Run the daily alert forever at the configured local time
pub async fn run_daily(app: Arc<AppContext>, sink: Arc<dyn MessageSink>) {
    let tz = app.config.timezone;
    let at = app.config.alert_time;

    loop {
        let now = Utc::now();
        let Some(next) = next_fire_after(now, tz, at) else {
            error!("Could not compute next alert time for {} in {}", at, tz);
            return;
        };

        info!("Next daily alert at {} ({})", next.with_timezone(&tz), next);
        let wait = (next - now).to_std().unwrap_or_default();
        tokio::time::sleep(wait).await;

        alert_service::run_daily_alert(&app, sink.as_ref()).await;
    }
}
