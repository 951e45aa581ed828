/// A representation for the day of the week.
///
/// The week starts with Monday. A weekday is obtained from a date with
/// [`Date::weekday`](crate::civil::Date::weekday), and can be converted to
/// an offset in either of the two numbering schemes in wide use:
/// [`Weekday::to_monday_one_offset`] (ISO 8601) or
/// [`Weekday::to_sunday_zero_offset`].
///
/// # Example
///
/// ```
/// use anydate::civil::{Date, Weekday};
///
/// let d = Date::new(2024, 2, 29)?;
/// assert_eq!(d.weekday(), Weekday::Thursday);
/// assert_eq!(d.weekday().to_monday_one_offset(), 4);
/// assert_eq!(d.weekday().to_sunday_zero_offset(), 4);
///
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[allow(missing_docs)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// Returns this weekday as an offset, where Monday is `0`.
    #[inline]
    pub fn to_monday_zero_offset(self) -> i8 {
        self as i8
    }

    /// Returns this weekday as an offset, where Monday is `1`.
    #[inline]
    pub fn to_monday_one_offset(self) -> i8 {
        self.to_monday_zero_offset() + 1
    }

    /// Returns this weekday as an offset, where Sunday is `0`.
    #[inline]
    pub fn to_sunday_zero_offset(self) -> i8 {
        (self.to_monday_zero_offset() + 1) % 7
    }

    /// Returns the number of days from `self` to `other`, in the range
    /// `0..=6`.
    ///
    /// # Example
    ///
    /// ```
    /// use anydate::civil::Weekday;
    ///
    /// assert_eq!(Weekday::Monday.until(Weekday::Sunday), 6);
    /// assert_eq!(Weekday::Sunday.until(Weekday::Monday), 1);
    /// assert_eq!(Weekday::Friday.until(Weekday::Friday), 0);
    /// ```
    #[inline]
    pub fn until(self, other: Weekday) -> i8 {
        (other.to_monday_zero_offset() - self.to_monday_zero_offset())
            .rem_euclid(7)
    }

    /// The offset must be in `0..=6`, with Monday at `0`.
    #[inline]
    pub(crate) fn from_monday_zero_offset_unchecked(offset: i8) -> Weekday {
        match offset {
            0 => Weekday::Monday,
            1 => Weekday::Tuesday,
            2 => Weekday::Wednesday,
            3 => Weekday::Thursday,
            4 => Weekday::Friday,
            5 => Weekday::Saturday,
            6 => Weekday::Sunday,
            _ => unreachable!("weekday offset out of range"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets() {
        for offset in 0..=6 {
            let wd = Weekday::from_monday_zero_offset_unchecked(offset);
            assert_eq!(wd.to_monday_zero_offset(), offset);
            assert_eq!(wd.to_monday_one_offset(), offset + 1);
        }
        assert_eq!(Weekday::Sunday.to_sunday_zero_offset(), 0);
        assert_eq!(Weekday::Monday.to_sunday_zero_offset(), 1);
        assert_eq!(Weekday::Saturday.to_sunday_zero_offset(), 6);
        assert_eq!(Weekday::Sunday.to_monday_one_offset(), 7);
    }

    #[test]
    fn until_wraps() {
        assert_eq!(Weekday::Saturday.until(Weekday::Sunday), 1);
        assert_eq!(Weekday::Sunday.until(Weekday::Saturday), 6);
        for offset in 0..=6 {
            let wd = Weekday::from_monday_zero_offset_unchecked(offset);
            assert_eq!(wd.until(wd), 0);
        }
    }
}
