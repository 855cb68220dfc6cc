//! Target zones on the goal face.

use core::fmt;
use core::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};

/// One of the nine aim regions, laid out as a 3x3 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Zone {
    /// TL
    TopLeft,
    /// TM
    TopMiddle,
    /// TR
    TopRight,
    /// CL
    CenterLeft,
    /// CM, where the axes sit at mechanical center.
    #[default]
    CenterMiddle,
    /// CR
    CenterRight,
    /// BL
    BottomLeft,
    /// BM
    BottomMiddle,
    /// BR
    BottomRight,
}

impl Zone {
    /// Every zone, row by row from the top left.
    pub const ALL: [Zone; 9] = [
        Zone::TopLeft,
        Zone::TopMiddle,
        Zone::TopRight,
        Zone::CenterLeft,
        Zone::CenterMiddle,
        Zone::CenterRight,
        Zone::BottomLeft,
        Zone::BottomMiddle,
        Zone::BottomRight,
    ];

    /// Two-letter code used in drill files and aim tables.
    pub const fn code(self) -> &'static str {
        match self {
            Zone::TopLeft => "TL",
            Zone::TopMiddle => "TM",
            Zone::TopRight => "TR",
            Zone::CenterLeft => "CL",
            Zone::CenterMiddle => "CM",
            Zone::CenterRight => "CR",
            Zone::BottomLeft => "BL",
            Zone::BottomMiddle => "BM",
            Zone::BottomRight => "BR",
        }
    }

    /// Parse a two-letter code. Surrounding whitespace and case are ignored.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Zone::ALL
            .iter()
            .copied()
            .find(|z| z.code().eq_ignore_ascii_case(code))
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when a zone code is not recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownZone;

impl fmt::Display for UnknownZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("unknown zone code, expected one of TL TM TR CL CM CR BL BM BR")
    }
}

impl FromStr for Zone {
    type Err = UnknownZone;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Zone::from_code(s).ok_or(UnknownZone)
    }
}

impl<'de> Deserialize<'de> for Zone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ZoneVisitor;

        impl Visitor<'_> for ZoneVisitor {
            type Value = Zone;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a zone code such as \"TR\"")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Zone, E> {
                Zone::from_code(v).ok_or_else(|| E::custom(UnknownZone))
            }
        }

        deserializer.deserialize_str(ZoneVisitor)
    }
}
