use crate::error::{tz::Error as E, Error};

macro_rules! identifiers {
    ($($(#[$attr:meta])* $variant:ident => $raw:literal,)*) => {
        /// A closed set of time zone identifiers.
        ///
        /// Each identifier has a stable string form, available via
        /// [`ClockIdentifierName::raw_value`]. For named zones this is the
        /// identifier used by the IANA Time Zone Database, for example
        /// `America/New_York`. The string form is the only key used to look
        /// up offsets in a [`ZoneDatabase`](crate::tz::ZoneDatabase).
        ///
        /// Parsing an identifier from a string that isn't one of the raw
        /// values returns an error for which
        /// [`Error::is_unknown_zone`](crate::Error::is_unknown_zone) is true.
        ///
        /// # Example
        ///
        /// ```
        /// use anydate::tz::ClockIdentifierName;
        ///
        /// let id: ClockIdentifierName = "Europe/London".parse()?;
        /// assert_eq!(id, ClockIdentifierName::EuropeLondon);
        /// assert_eq!(id.raw_value(), "Europe/London");
        /// assert_eq!(id.to_string(), "Europe/London");
        ///
        /// # Ok::<(), Box<dyn std::error::Error>>(())
        /// ```
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
        pub enum ClockIdentifierName {
            $($(#[$attr])* $variant,)*
        }

        impl ClockIdentifierName {
            /// Every identifier, in declaration order.
            pub const ALL: &'static [ClockIdentifierName] =
                &[$(ClockIdentifierName::$variant,)*];

            /// Returns the stable string form of this identifier.
            #[inline]
            pub const fn raw_value(self) -> &'static str {
                match self {
                    $(ClockIdentifierName::$variant => $raw,)*
                }
            }

            /// Looks up an identifier by its raw value.
            ///
            /// The comparison is exact. Use [`str::parse`] to get an error
            /// instead of `None` when the name is not recognized.
            #[inline]
            pub fn from_raw_value(name: &str) -> Option<ClockIdentifierName> {
                match name {
                    $($raw => Some(ClockIdentifierName::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

identifiers! {
    /// Coordinated Universal Time.
    Utc => "UTC",
    /// Greenwich Mean Time, equivalent to UTC.
    Gmt => "GMT",
    AfricaJohannesburg => "Africa/Johannesburg",
    AmericaAnchorage => "America/Anchorage",
    AmericaChicago => "America/Chicago",
    AmericaDenver => "America/Denver",
    AmericaHalifax => "America/Halifax",
    AmericaLosAngeles => "America/Los_Angeles",
    AmericaMexicoCity => "America/Mexico_City",
    AmericaNewYork => "America/New_York",
    AmericaPhoenix => "America/Phoenix",
    AmericaSaoPaulo => "America/Sao_Paulo",
    AmericaStJohns => "America/St_Johns",
    AsiaDubai => "Asia/Dubai",
    AsiaKathmandu => "Asia/Kathmandu",
    AsiaKolkata => "Asia/Kolkata",
    AsiaSeoul => "Asia/Seoul",
    AsiaShanghai => "Asia/Shanghai",
    AsiaSingapore => "Asia/Singapore",
    AsiaTokyo => "Asia/Tokyo",
    AustraliaSydney => "Australia/Sydney",
    EuropeBerlin => "Europe/Berlin",
    EuropeLondon => "Europe/London",
    EuropeMoscow => "Europe/Moscow",
    EuropeParis => "Europe/Paris",
    PacificAuckland => "Pacific/Auckland",
    PacificHonolulu => "Pacific/Honolulu",
    PacificKiritimati => "Pacific/Kiritimati",
    PacificPagoPago => "Pacific/Pago_Pago",
}

impl core::str::FromStr for ClockIdentifierName {
    type Err = Error;

    fn from_str(name: &str) -> Result<ClockIdentifierName, Error> {
        ClockIdentifierName::from_raw_value(name)
            .ok_or_else(|| Error::from(E::UnknownZone { name: name.into() }))
    }
}

impl core::fmt::Display for ClockIdentifierName {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(self.raw_value())
    }
}
