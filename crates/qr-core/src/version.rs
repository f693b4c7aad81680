use crate::error::Error;

/// A QR Code version number, between 1 and 40 (inclusive).
///
/// The version determines the symbol's side length (`4 * version + 17`).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct Version(u8);

impl Version {
    /// The smallest version defined by the standard.
    pub const MIN: Version = Version(1);

    /// The largest version defined by the standard.
    pub const MAX: Version = Version(40);

    /// Creates a version object from the given number.
    ///
    /// Panics if the number is outside the range [1, 40]; this is a
    /// programmer error, not a data-dependent failure, so it is not
    /// reported through `Result`.
    pub fn new(ver: u8) -> Self {
        assert!(
            (Version::MIN.value()..=Version::MAX.value()).contains(&ver),
            "version number out of range"
        );
        Self(ver)
    }

    /// Creates a version object from a host-supplied number, reporting an
    /// out-of-range value as `Error::InvalidArgument` rather than panicking.
    /// Use this at public API boundaries; use `new` once a value is already
    /// known to be in range (e.g. escalating an existing version).
    pub fn try_new(ver: u8) -> Result<Self, Error> {
        if (Version::MIN.value()..=Version::MAX.value()).contains(&ver) {
            Ok(Self(ver))
        } else {
            Err(Error::InvalidArgument(format!(
                "version {ver} out of range 1..=40"
            )))
        }
    }

    /// Returns the value, which is in the range [1, 40].
    pub fn value(self) -> u8 {
        self.0
    }

    /// The side length of the module matrix at this version, in the range [21, 177].
    pub fn size(self) -> i32 {
        i32::from(self.0) * 4 + 17
    }

    /// Returns the next higher version, or `None` if already at `Version::MAX`.
    pub fn next(self) -> Option<Version> {
        (self.0 < Version::MAX.0).then(|| Version(self.0 + 1))
    }

    // Returns 0, 1, or 2 depending on which of the three character-count-indicator
    // bands (1-9, 10-26, 27-40) this version falls into.
    pub(crate) fn band(self) -> usize {
        match self.0 {
            1..=9 => 0,
            10..=26 => 1,
            _ => 2,
        }
    }
}

#[cfg(test)]
mod should {
    use super::*;

    #[test]
    fn report_size_for_version_1() {
        assert_eq!(21, Version::new(1).size());
    }

    #[test]
    fn report_size_for_version_40() {
        assert_eq!(177, Version::new(40).size());
    }

    #[test]
    fn advance_to_next_version() {
        assert_eq!(Some(Version::new(2)), Version::new(1).next());
        assert_eq!(None, Version::MAX.next());
    }

    #[test]
    #[should_panic(expected = "version number out of range")]
    fn reject_version_zero() {
        Version::new(0);
    }

    #[test]
    fn report_error_for_out_of_range_version() {
        assert!(Version::try_new(0).is_err());
        assert!(Version::try_new(41).is_err());
        assert!(Version::try_new(40).is_ok());
    }
}
