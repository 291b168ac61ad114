//! Plane orientation categories and the set of categories a drag may land on.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::define_flags;
use crate::flags::FlagSet;

define_flags!(PlaneType, u8, {
    HorizontalUpwardFacing,
    HorizontalDownwardFacing,
    Vertical,
});

impl PlaneType {
    pub fn is_horizontal(&self) -> bool {
        matches!(
            self,
            PlaneType::HorizontalUpwardFacing | PlaneType::HorizontalDownwardFacing
        )
    }
}

/// Plane types a candidate hit must belong to in order to be accepted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AllowedPlaneSet(FlagSet<PlaneType>);

impl Default for AllowedPlaneSet {
    /// Every plane type is allowed until configured otherwise.
    fn default() -> Self {
        Self::all()
    }
}

impl AllowedPlaneSet {
    pub fn all() -> Self {
        Self(FlagSet::from_flags(PlaneType::ALL))
    }

    pub fn none() -> Self {
        Self(FlagSet::empty())
    }

    pub fn from_types(types: &[PlaneType]) -> Self {
        Self(FlagSet::from_flags(types))
    }

    pub fn allows(&self, plane_type: PlaneType) -> bool {
        self.0.contains(plane_type)
    }

    pub fn insert(&mut self, plane_type: PlaneType) {
        self.0.insert(plane_type);
    }

    pub fn remove(&mut self, plane_type: PlaneType) {
        self.0.remove(plane_type);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Coarse orientation setting exposed to hosts (`"none" | "horizontal" | "vertical" | "both"`).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PlaneOrientation {
    None,
    Horizontal,
    Vertical,
    #[default]
    Both,
}

impl PlaneOrientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaneOrientation::None => "none",
            PlaneOrientation::Horizontal => "horizontal",
            PlaneOrientation::Vertical => "vertical",
            PlaneOrientation::Both => "both",
        }
    }

    /// Cycle none → horizontal → vertical → both → none.
    pub fn next(&self) -> Self {
        match self {
            PlaneOrientation::None => PlaneOrientation::Horizontal,
            PlaneOrientation::Horizontal => PlaneOrientation::Vertical,
            PlaneOrientation::Vertical => PlaneOrientation::Both,
            PlaneOrientation::Both => PlaneOrientation::None,
        }
    }
}

impl From<PlaneOrientation> for AllowedPlaneSet {
    fn from(orientation: PlaneOrientation) -> Self {
        match orientation {
            PlaneOrientation::None => AllowedPlaneSet::none(),
            PlaneOrientation::Horizontal => AllowedPlaneSet::from_types(&[
                PlaneType::HorizontalUpwardFacing,
                PlaneType::HorizontalDownwardFacing,
            ]),
            PlaneOrientation::Vertical => AllowedPlaneSet::from_types(&[PlaneType::Vertical]),
            PlaneOrientation::Both => AllowedPlaneSet::all(),
        }
    }
}

impl fmt::Display for PlaneOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown plane orientation `{0}` (expected none, horizontal, vertical or both)")]
pub struct ParseOrientationError(pub String);

impl FromStr for PlaneOrientation {
    type Err = ParseOrientationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(PlaneOrientation::None),
            "horizontal" => Ok(PlaneOrientation::Horizontal),
            "vertical" => Ok(PlaneOrientation::Vertical),
            "both" => Ok(PlaneOrientation::Both),
            _ => Err(ParseOrientationError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_allows_every_plane_type() {
        let set = AllowedPlaneSet::default();
        for &t in PlaneType::ALL {
            assert!(set.allows(t));
        }
    }

    #[test]
    fn horizontal_admits_both_facings_but_not_walls() {
        let set = AllowedPlaneSet::from(PlaneOrientation::Horizontal);
        assert!(set.allows(PlaneType::HorizontalUpwardFacing));
        assert!(set.allows(PlaneType::HorizontalDownwardFacing));
        assert!(!set.allows(PlaneType::Vertical));
    }

    #[test]
    fn none_rejects_everything() {
        let set = AllowedPlaneSet::from(PlaneOrientation::None);
        assert!(set.is_empty());
        assert!(PlaneType::ALL.iter().all(|&t| !set.allows(t)));
    }

    #[test]
    fn parse_is_case_insensitive_and_rejects_unknown() {
        assert_eq!("Vertical".parse::<PlaneOrientation>(), Ok(PlaneOrientation::Vertical));
        assert_eq!(" both ".parse::<PlaneOrientation>(), Ok(PlaneOrientation::Both));
        let err = "diagonal".parse::<PlaneOrientation>().unwrap_err();
        assert_eq!(err, ParseOrientationError("diagonal".into()));
    }

    #[test]
    fn display_round_trips_through_parse() {
        let mut o = PlaneOrientation::None;
        for _ in 0..4 {
            assert_eq!(o.to_string().parse::<PlaneOrientation>(), Ok(o));
            o = o.next();
        }
        assert_eq!(o, PlaneOrientation::None);
    }
}
