use chrono::{DateTime, TimeZone, Utc};

/// Source of the current time. Everything deciding what is due asks this
/// instead of the system clock so that runs can be replayed at a fixed time.
pub trait ISys: Send + Sync {
    fn get_timestamp_millis(&self) -> i64;

    fn now_utc(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.get_timestamp_millis())
            .single()
            .unwrap_or_else(Utc::now)
    }
}

/// Wall clock of the host
pub struct RealSys {}

impl ISys for RealSys {
    fn get_timestamp_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Clock frozen at one instant
pub struct FixedSys(pub DateTime<Utc>);

impl ISys for FixedSys {
    fn get_timestamp_millis(&self) -> i64 {
        self.0.timestamp_millis()
    }
}
