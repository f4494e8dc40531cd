use bitflags::bitflags;

use crate::frame::MessageClass;

ubx_packet_layout! {
    class = MessageClass::Nav, id = 0x07, payload_len = 92, name = "NAV-PVT";

    /// Navigation Position Velocity Time Solution
    ///
    /// Raw integer fields exactly as the receiver reports them. Every
    /// successful projection replaces the whole record.
    pub struct NavSolution {
        /// GPS Millisecond time of week of the navigation epoch
        itow @ 0: u32,
        /// Year (UTC)
        year @ 4: u16,
        /// Month, range 1..12 (UTC)
        month @ 6: u8,
        /// Day of month, range 1..31 (UTC)
        day @ 7: u8,
        /// Hour of day, range 0..23 (UTC)
        hour @ 8: u8,
        /// Minute of hour, range 0..59 (UTC)
        min @ 9: u8,
        /// Seconds of minute, range 0..60 (UTC)
        sec @ 10: u8,
        /// Validity flags, see [NavPvtValidFlags]
        valid @ 11: u8,
        /// Time accuracy estimate \[ns\]
        time_accuracy @ 12: u32,
        /// Fraction of second, range -1e9 .. 1e9 \[ns\]
        nanosec @ 16: i32,
        /// GNSS fix type, see [GnssFixType]
        fix_type @ 20: u8,
        /// Fix status flags, see [NavPvtFlags]
        flags @ 21: u8,
        /// Additional flags, see [NavPvtFlags2]
        flags2 @ 22: u8,
        /// Number of satellites used in the solution
        num_satellites @ 23: u8,
        /// Longitude \[1e-7 deg\]
        lon @ 24: i32,
        /// Latitude \[1e-7 deg\]
        lat @ 28: i32,
        /// Height above ellipsoid \[mm\]
        height @ 32: i32,
        /// Height above mean sea level \[mm\]
        height_msl @ 36: i32,
        /// Horizontal accuracy estimate \[mm\]
        h_acc @ 40: u32,
        /// Vertical accuracy estimate \[mm\]
        v_acc @ 44: u32,
        /// NED north velocity \[mm/s\]
        vel_north @ 48: i32,
        /// NED east velocity \[mm/s\]
        vel_east @ 52: i32,
        /// NED down velocity \[mm/s\]
        vel_down @ 56: i32,
        /// Ground speed (2-D) \[mm/s\]
        g_speed @ 60: i32,
        /// Heading of motion (2-D) \[1e-5 deg\]
        head_motion @ 64: i32,
        /// Speed accuracy estimate \[mm/s\]
        s_acc @ 68: u32,
        /// Heading accuracy estimate, motion and vehicle \[1e-5 deg\]
        head_acc @ 72: u32,
        /// Position DOP \[0.01\]
        pdop @ 76: u16,
        /// Heading of vehicle (2-D) \[1e-5 deg\], only valid when
        /// [HEAD_VEH_VALID](NavPvtFlags::HEAD_VEH_VALID) is set
        head_vehicle @ 84: i32,
        /// Magnetic declination \[1e-2 deg\]
        magnetic_declination @ 88: i16,
        /// Magnetic declination accuracy \[1e-2 deg\]
        magnetic_declination_accuracy @ 90: u16,
    }
}

ubx_scaled_getters! {
    NavSolution {
        /// Longitude in \[deg\]
        lon_degrees => lon * 1e-7,
        /// Latitude in \[deg\]
        lat_degrees => lat * 1e-7,
        /// Height above ellipsoid in \[m\]
        height_meters => height * 1e-3,
        /// Height above mean sea level in \[m\]
        height_msl_meters => height_msl * 1e-3,
        horizontal_accuracy => h_acc * 1e-3,
        vertical_accuracy => v_acc * 1e-3,
        vel_north_mps => vel_north * 1e-3,
        vel_east_mps => vel_east * 1e-3,
        vel_down_mps => vel_down * 1e-3,
        /// Ground speed in \[m/s\]
        ground_speed => g_speed * 1e-3,
        /// Heading of motion in \[deg\]
        heading_motion_degrees => head_motion * 1e-5,
        speed_accuracy => s_acc * 1e-3,
        heading_accuracy_degrees => head_acc * 1e-5,
        position_dop => pdop * 1e-2,
        heading_vehicle_degrees => head_vehicle * 1e-5,
        magnetic_declination_degrees => magnetic_declination * 1e-2,
        magnetic_declination_accuracy_degrees => magnetic_declination_accuracy * 1e-2,
    }
}

impl NavSolution {
    pub fn gnss_fix_type(&self) -> GnssFixType {
        GnssFixType::from(self.fix_type)
    }

    pub fn valid_flags(&self) -> NavPvtValidFlags {
        NavPvtValidFlags::from_bits_truncate(self.valid)
    }

    pub fn fix_flags(&self) -> NavPvtFlags {
        NavPvtFlags::from_bits_truncate(self.flags)
    }

    pub fn fix_flags2(&self) -> NavPvtFlags2 {
        NavPvtFlags2::from_bits_truncate(self.flags2)
    }

    /// Position and velocity can be trusted
    pub fn has_position(&self) -> bool {
        matches!(
            self.gnss_fix_type(),
            GnssFixType::Fix3D | GnssFixType::GPSPlusDeadReckoning
        ) && self.fix_flags().contains(NavPvtFlags::GPS_FIX_OK)
    }

    /// UTC date and time of day are both valid
    pub fn has_time(&self) -> bool {
        self.valid_flags()
            .contains(NavPvtValidFlags::VALID_DATE | NavPvtValidFlags::VALID_TIME)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GnssFixType {
    NoFix,
    DeadReckoningOnly,
    Fix2D,
    Fix3D,
    GPSPlusDeadReckoning,
    TimeOnlyFix,
    Reserved(u8),
}

impl From<u8> for GnssFixType {
    fn from(v: u8) -> Self {
        match v {
            0 => GnssFixType::NoFix,
            1 => GnssFixType::DeadReckoningOnly,
            2 => GnssFixType::Fix2D,
            3 => GnssFixType::Fix3D,
            4 => GnssFixType::GPSPlusDeadReckoning,
            5 => GnssFixType::TimeOnlyFix,
            x => GnssFixType::Reserved(x),
        }
    }
}

bitflags! {
    /// Fix status flags for [NavSolution]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NavPvtFlags: u8 {
        /// 1 = Position and velocity valid and within DOP and accuracy masks
        const GPS_FIX_OK = 1;
        /// 1 = Differential corrections were applied; DGPS used
        const DIFF_SOLN = 2;
        /// 1 = Heading of vehicle is valid, only set if the receiver is in sensor fusion mode
        const HEAD_VEH_VALID = 0x20;
        /// 1 = Carrier phase range solution with floating ambiguities
        const CARR_SOLN_FLOAT = 0x40;
        /// 1 = Carrier phase range solution with fixed ambiguities
        const CARR_SOLN_FIXED = 0x80;
    }
}

bitflags! {
    /// Additional flags for [NavSolution]
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NavPvtFlags2: u8 {
        /// 1 = information about UTC Date and Time of Day validity confirmation is available
        const CONFIRMED_AVAI = 0x20;
        /// 1 = UTC Date validity could be confirmed
        const CONFIRMED_DATE = 0x40;
        /// 1 = UTC Time of Day could be confirmed
        const CONFIRMED_TIME = 0x80;
    }
}

bitflags! {
    /// Validity flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct NavPvtValidFlags: u8 {
        /// 1 = valid UTC Date
        const VALID_DATE = 0x01;
        /// 1 = valid UTC time of day
        const VALID_TIME = 0x02;
        /// 1 = UTC time of day has been fully resolved (no seconds uncertainty)
        const FULLY_RESOLVED = 0x04;
        /// 1 = valid magnetic declination
        const VALID_MAG = 0x08;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::DispatchError, ubx_packets::UbxPacketMeta};

    fn payload() -> [u8; 92] {
        let mut p = [0u8; 92];
        p[0..4].copy_from_slice(&123_456_000u32.to_le_bytes());
        p[4..6].copy_from_slice(&2026u16.to_le_bytes());
        p[6] = 1;
        p[7] = 21;
        p[11] = 0x07;
        p[20] = 3;
        p[21] = 0x01;
        p[23] = 11;
        p[24..28].copy_from_slice(&(-977_000_000i32).to_le_bytes());
        p[28..32].copy_from_slice(&302_000_000i32.to_le_bytes());
        p[36..40].copy_from_slice(&200_000i32.to_le_bytes());
        p[76..78].copy_from_slice(&156u16.to_le_bytes());
        p[88..90].copy_from_slice(&(-250i16).to_le_bytes());
        p
    }

    #[test]
    fn project_nav_pvt() {
        let sol = NavSolution::from_payload(&payload()).unwrap();
        assert_eq!(sol.itow, 123_456_000);
        assert_eq!(sol.year, 2026);
        assert_eq!(sol.month, 1);
        assert_eq!(sol.day, 21);
        assert_eq!(sol.num_satellites, 11);
        assert_eq!(sol.lon, -977_000_000);
        assert_eq!(sol.lat, 302_000_000);
        assert_eq!(sol.pdop, 156);
        assert_eq!(sol.magnetic_declination, -250);
        assert_eq!(sol.gnss_fix_type(), GnssFixType::Fix3D);
        assert!(sol.has_position());
        assert!(sol.has_time());
        assert!((sol.lon_degrees() - -97.7).abs() < 1e-9);
        assert!((sol.height_msl_meters() - 200.0).abs() < 1e-9);
        assert!((sol.magnetic_declination_degrees() - -2.5).abs() < 1e-9);
    }

    #[test]
    fn short_payload_is_rejected() {
        assert_eq!(
            NavSolution::from_payload(&payload()[..91]),
            Err(DispatchError::InvalidPayloadLen {
                packet: "NAV-PVT",
                expect: 92,
                got: 91
            })
        );
    }

    #[test]
    fn field_table_matches_documented_offsets() {
        let find = |name: &str| {
            NavSolution::FIELDS
                .iter()
                .find(|f| f.name == name)
                .map(|f| (f.offset, f.width))
        };
        assert_eq!(find("itow"), Some((0, 4)));
        assert_eq!(find("num_satellites"), Some((23, 1)));
        assert_eq!(find("pdop"), Some((76, 2)));
        assert_eq!(find("head_vehicle"), Some((84, 4)));
        assert_eq!(find("magnetic_declination_accuracy"), Some((90, 2)));
        assert_eq!(NavSolution::FIELDS.len(), 31);
        assert_eq!(NavSolution::CLASS, MessageClass::Nav);
        assert_eq!(NavSolution::ID, 0x07);
    }

    #[test]
    fn reserved_fix_type() {
        assert_eq!(GnssFixType::from(9), GnssFixType::Reserved(9));
    }
}
