use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::ModelError;

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// Serialized through `as_str` so wire names and log names never drift apart.
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(ModelError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

str_enum!(
    /// The closed vocabulary of cable attributes the pipeline recognizes.
    ParameterKey {
        VoltageRating => "voltage_rating",
        ConductorSize => "conductor_size",
        CurrentRating => "current_rating",
        TemperatureRating => "temperature_rating",
        CoreCount => "core_count",
        InsulationType => "insulation_type",
        SheathMaterial => "sheath_material",
        ConductorMaterial => "conductor_material",
        StandardCompliance => "standard_compliance",
    }
);

str_enum!(
    /// Outcome of engineering validation. Exactly one applies per report.
    ValidationStatus {
        Ready => "READY",
        Unverifiable => "UNVERIFIABLE",
        Violation => "VIOLATION",
        Error => "ERROR",
    }
);

/// Physical quantity carried by a numeric parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Voltage,
    Area,
    Current,
    Temperature,
    Count,
}

impl Quantity {
    /// Unit every value of this quantity is normalized to.
    pub fn canonical_unit(&self) -> &'static str {
        match self {
            Self::Voltage => "V",
            Self::Area => "mm",
            Self::Current => "A",
            Self::Temperature => "°C",
            Self::Count => "",
        }
    }
}

impl ParameterKey {
    /// Numeric quantity for measured parameters, `None` for textual ones.
    pub fn quantity(&self) -> Option<Quantity> {
        match self {
            Self::VoltageRating => Some(Quantity::Voltage),
            Self::ConductorSize => Some(Quantity::Area),
            Self::CurrentRating => Some(Quantity::Current),
            Self::TemperatureRating => Some(Quantity::Temperature),
            Self::CoreCount => Some(Quantity::Count),
            Self::InsulationType
            | Self::SheathMaterial
            | Self::ConductorMaterial
            | Self::StandardCompliance => None,
        }
    }
}
