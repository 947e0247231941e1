use std::time::Duration;

use chrono::{DateTime, Days, Local, NaiveDateTime, NaiveTime, TimeDelta, TimeZone};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};

use crate::state::AppState;
use crate::wisher::run_daily_scan;

/// The first local midnight strictly after `now`.
pub fn next_midnight(now: NaiveDateTime) -> NaiveDateTime {
    let tomorrow = now.date() + Days::new(1);
    tomorrow.and_time(NaiveTime::MIN)
}

/// Real time from `now` until the wall-clock instant `target` in `now`'s zone.
///
/// Goes through zone-aware instants so DST days are 23h or 25h long. A
/// `target` that falls in a DST gap resolves to the first instant after it.
pub fn until_local<Tz: TimeZone>(target: NaiveDateTime, now: &DateTime<Tz>) -> Duration {
    let tz = now.timezone();
    let resolved = tz
        .from_local_datetime(&target)
        .earliest()
        .or_else(|| tz.from_local_datetime(&(target + TimeDelta::hours(1))).earliest());

    resolved
        .and_then(|at| (at - now.clone()).to_std().ok())
        .unwrap_or_default()
}

/// Spawns the daily job: sleep until local midnight, scan, repeat.
///
/// A failed run is logged and the next attempt is the following midnight.
pub fn spawn_daily_scan(state: AppState) {
    tokio::spawn(async move {
        let mut rng = StdRng::from_os_rng();
        let mut next_run = next_midnight(Local::now().naive_local());
        loop {
            let wait = until_local(next_run, &Local::now());
            info!("Next scan at {next_run} (in {}s)", wait.as_secs());
            tokio::time::sleep(wait).await;

            let today = next_run.date();
            match run_daily_scan(&state, today, &mut rng).await {
                Ok(report) => info!(
                    "Scan for {today} finished: {} birthday(s), {} anniversary(ies)",
                    report.birthdays, report.anniversaries
                ),
                Err(e) => error!("Scan for {today} aborted: {e}"),
            }

            next_run = next_run + Days::new(1);
        }
    });
}
