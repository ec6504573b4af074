use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const KJ_PER_KCAL: f64 = 4.184;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    EnergyPerMole,
    Temperature,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dimension::EnergyPerMole => write!(f, "energy per mole"),
            Dimension::Temperature => write!(f, "temperature"),
        }
    }
}

/// Physical units understood by the report parsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum Unit {
    #[serde(rename = "kJ/mol")]
    KilojoulesPerMole,
    #[serde(rename = "kcal/mol")]
    KilocaloriesPerMole,
    #[serde(rename = "K")]
    Kelvin,
}

impl Unit {
    pub fn dimension(&self) -> Dimension {
        match self {
            Unit::KilojoulesPerMole | Unit::KilocaloriesPerMole => Dimension::EnergyPerMole,
            Unit::Kelvin => Dimension::Temperature,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::KilojoulesPerMole => "kJ/mol",
            Unit::KilocaloriesPerMole => "kcal/mol",
            Unit::Kelvin => "K",
        }
    }

    /// Factor that takes a magnitude in this unit to the base unit of its
    /// dimension (kJ/mol for energies, K for temperatures).
    fn to_base_factor(&self) -> f64 {
        match self {
            Unit::KilojoulesPerMole => 1.0,
            Unit::KilocaloriesPerMole => KJ_PER_KCAL,
            Unit::Kelvin => 1.0,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Unknown unit '{0}'. Expected one of 'kJ/mol', 'kcal/mol' or 'K'.")]
pub struct UnknownUnitError(pub String);

impl FromStr for Unit {
    type Err = UnknownUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kj/mol" | "kilojoules/mole" | "kilojoules_per_mole" => Ok(Unit::KilojoulesPerMole),
            "kcal/mol" | "kilocalories/mole" | "kilocalories_per_mole" => {
                Ok(Unit::KilocaloriesPerMole)
            }
            "k" | "kelvin" => Ok(Unit::Kelvin),
            _ => Err(UnknownUnitError(s.to_string())),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
#[error(
    "Cannot convert {from} ({from_dim}) to {to} ({to_dim})",
    from_dim = from.dimension(),
    to_dim = to.dimension()
)]
pub struct UnitMismatchError {
    pub from: Unit,
    pub to: Unit,
}

/// A magnitude tagged with its physical unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity {
    magnitude: f64,
    unit: Unit,
}

impl Quantity {
    pub fn new(magnitude: f64, unit: Unit) -> Self {
        Self { magnitude, unit }
    }

    pub fn kj_per_mol(magnitude: f64) -> Self {
        Self::new(magnitude, Unit::KilojoulesPerMole)
    }

    pub fn kcal_per_mol(magnitude: f64) -> Self {
        Self::new(magnitude, Unit::KilocaloriesPerMole)
    }

    pub fn kelvin(magnitude: f64) -> Self {
        Self::new(magnitude, Unit::Kelvin)
    }

    #[inline]
    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    #[inline]
    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn dimension(&self) -> Dimension {
        self.unit.dimension()
    }

    /// Returns the magnitude expressed in `target`.
    ///
    /// # Errors
    ///
    /// Returns [`UnitMismatchError`] if `target` measures a different dimension.
    pub fn convert_to(&self, target: Unit) -> Result<f64, UnitMismatchError> {
        if self.unit.dimension() != target.dimension() {
            return Err(UnitMismatchError {
                from: self.unit,
                to: target,
            });
        }
        if self.unit == target {
            return Ok(self.magnitude);
        }
        Ok(self.magnitude * self.unit.to_base_factor() / target.to_base_factor())
    }

    pub fn to(&self, target: Unit) -> Result<Quantity, UnitMismatchError> {
        self.convert_to(target).map(|m| Quantity::new(m, target))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(precision) = f.precision() {
            write!(f, "{:.*} {}", precision, self.magnitude, self.unit)
        } else {
            write!(f, "{} {}", self.magnitude, self.unit)
        }
    }
}
