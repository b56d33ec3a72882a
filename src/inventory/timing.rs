use chrono::{DateTime, Utc};

pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// Calendar days between request and receipt, rounded up.
///
/// Any started day counts as a full one: one hour yields `1`, exactly 24h yields `1`,
/// 24h plus one millisecond yields `2`. Zero elapsed time yields `0`, and so does a receipt
/// stamped before its request (clock skew).
pub fn response_time_days(requested_at: DateTime<Utc>, received_at: DateTime<Utc>) -> i64 {
    let elapsed_ms = (received_at - requested_at).num_milliseconds().max(0);
    let days = elapsed_ms / MILLIS_PER_DAY;
    if elapsed_ms % MILLIS_PER_DAY > 0 {
        days + 1
    } else {
        days
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, h, 0, 0).unwrap()
    }

    #[test]
    fn partial_days_round_up() {
        let requested = at(9);
        assert_eq!(response_time_days(requested, requested + Duration::hours(1)), 1);
        assert_eq!(response_time_days(requested, requested + Duration::milliseconds(1)), 1);
        assert_eq!(response_time_days(requested, requested + Duration::days(1)), 1);
        assert_eq!(
            response_time_days(requested, requested + Duration::days(1) + Duration::milliseconds(1)),
            2
        );
        assert_eq!(response_time_days(requested, requested + Duration::hours(49)), 3);
    }

    #[test]
    fn no_elapsed_time_is_zero_days() {
        assert_eq!(response_time_days(at(9), at(9)), 0);
    }

    #[test]
    fn receipt_before_request_clamps_to_zero() {
        assert_eq!(response_time_days(at(12), at(0)), 0);
        assert_eq!(
            response_time_days(at(12), at(12) - Duration::hours(36)),
            0
        );
    }
}
