use chrono::{DateTime, Utc};

/// A trait for time sources that return a wall-clock timestamp.
///
/// This abstraction allows you to plug in the real system clock or a mocked
/// time source in tests. The unit is **milliseconds** since the Unix epoch.
///
/// # Example
///
/// ```
/// use idforge::TimeSource;
///
/// struct FixedTime;
/// impl TimeSource<u64> for FixedTime {
///     fn current_millis(&self) -> u64 {
///         1234
///     }
/// }
///
/// let time = FixedTime;
/// assert_eq!(time.current_millis(), 1234);
/// ```
pub trait TimeSource<T> {
    /// Returns the current time in milliseconds since the Unix epoch.
    fn current_millis(&self) -> T;
}

/// Time source backed by the system wall clock.
///
/// Time-derived identifier kinds embed this value, so it is deliberately not
/// monotonic: two identifiers generated in the same millisecond share a
/// timestamp component and differ only in their random part.
#[derive(Default, Clone, Copy, Debug)]
pub struct SystemClock;

impl TimeSource<u64> for SystemClock {
    fn current_millis(&self) -> u64 {
        // Clamped at zero for clocks set before 1970.
        Utc::now().timestamp_millis().max(0) as u64
    }
}

/// Converts a millisecond timestamp into a UTC date-time.
///
/// Values beyond chrono's representable range collapse to the Unix epoch.
pub fn millis_to_datetime(millis: u64) -> DateTime<Utc> {
    i64::try_from(millis)
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}
