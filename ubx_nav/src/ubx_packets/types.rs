use super::packets::*;
use crate::error::DateTimeError;
use chrono::prelude::*;

/// Represents a world position, can be constructed from a [NavSolution]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    /// Longitude in degrees
    pub lon: f64,

    /// Latitude in degrees
    pub lat: f64,

    /// Altitude above mean sea level in meters
    pub alt: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Velocity {
    /// m/s over the ground
    pub speed: f64,

    /// Heading in degrees
    pub heading: f64, // degrees
}

impl From<&NavSolution> for Position {
    fn from(sol: &NavSolution) -> Self {
        Position {
            lon: sol.lon_degrees(),
            lat: sol.lat_degrees(),
            alt: sol.height_msl_meters(),
        }
    }
}

impl From<&NavSolution> for Velocity {
    fn from(sol: &NavSolution) -> Self {
        Velocity {
            speed: sol.ground_speed(),
            heading: sol.heading_motion_degrees(),
        }
    }
}

impl TryFrom<&NavSolution> for DateTime<Utc> {
    type Error = DateTimeError;
    fn try_from(sol: &NavSolution) -> Result<Self, Self::Error> {
        let date = NaiveDate::from_ymd_opt(
            i32::from(sol.year),
            u32::from(sol.month),
            u32::from(sol.day),
        )
        .ok_or(DateTimeError::InvalidDate)?;
        let time = NaiveTime::from_hms_opt(
            u32::from(sol.hour),
            u32::from(sol.min),
            u32::from(sol.sec),
        )
        .ok_or(DateTimeError::InvalidTime)?;
        const NANOS_LIM: u32 = 1_000_000_000;
        if sol.nanosec.unsigned_abs() >= NANOS_LIM {
            return Err(DateTimeError::InvalidNanoseconds);
        }

        let dt = NaiveDateTime::new(date, time)
            + chrono::Duration::nanoseconds(i64::from(sol.nanosec));

        Ok(Utc.from_utc_datetime(&dt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solution() -> NavSolution {
        NavSolution {
            year: 2026,
            month: 1,
            day: 21,
            hour: 12,
            min: 30,
            sec: 15,
            nanosec: -250_000_000,
            lon: 85_000_000,
            lat: -123_456_789,
            height_msl: 1500,
            g_speed: 2500,
            head_motion: 9_000_000,
            ..NavSolution::default()
        }
    }

    #[test]
    fn utc_time_applies_signed_nanos() {
        let time: DateTime<Utc> = (&solution()).try_into().unwrap();
        assert_eq!(
            time,
            Utc.with_ymd_and_hms(2026, 1, 21, 12, 30, 14).unwrap()
                + chrono::Duration::milliseconds(750)
        );
    }

    #[test]
    fn invalid_dates_are_reported() {
        let zeroed = NavSolution::default();
        assert_eq!(
            DateTime::<Utc>::try_from(&zeroed),
            Err(DateTimeError::InvalidDate)
        );

        let sol = NavSolution {
            hour: 24,
            ..solution()
        };
        assert_eq!(
            DateTime::<Utc>::try_from(&sol),
            Err(DateTimeError::InvalidTime)
        );

        let sol = NavSolution {
            nanosec: 1_000_000_000,
            ..solution()
        };
        assert_eq!(
            DateTime::<Utc>::try_from(&sol),
            Err(DateTimeError::InvalidNanoseconds)
        );
    }

    #[test]
    fn position_and_velocity() {
        let sol = solution();
        let pos = Position::from(&sol);
        assert!((pos.lon - 8.5).abs() < 1e-9);
        assert!((pos.lat - -12.3456789).abs() < 1e-9);
        assert!((pos.alt - 1.5).abs() < 1e-9);

        let vel = Velocity::from(&sol);
        assert!((vel.speed - 2.5).abs() < 1e-9);
        assert!((vel.heading - 90.0).abs() < 1e-9);
    }
}
