use super::units::{Dimension, Quantity, Unit, UnitMismatchError};
use indexmap::IndexMap;

pub const TOTAL_ENERGY: &str = "Total Energy";
pub const POTENTIAL: &str = "Potential";

#[derive(Debug, Clone, PartialEq)]
pub struct EnergyTerm {
    name: String,
    quantity: Quantity,
}

impl EnergyTerm {
    pub fn new(name: impl Into<String>, quantity: Quantity) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn quantity(&self) -> Quantity {
        self.quantity
    }
}

/// Energy terms keyed by their canonical name, in the order the backend
/// reported them.
///
/// Key sets differ between backends. Only [`TOTAL_ENERGY`] and [`POTENTIAL`]
/// are meaningful when comparing reports produced by different engines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnergyReport {
    terms: IndexMap<String, EnergyTerm>,
}

impl EnergyReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zips `values` onto `names` position by position.
    ///
    /// Callers must check the lengths beforehand; extra values on either side
    /// are dropped by `zip`.
    pub(crate) fn from_positional(names: &[&str], values: &[f64], unit: Unit) -> Self {
        debug_assert_eq!(names.len(), values.len());
        names
            .iter()
            .zip(values)
            .map(|(name, value)| EnergyTerm::new(*name, Quantity::new(*value, unit)))
            .collect()
    }

    pub fn insert(&mut self, term: EnergyTerm) -> Option<EnergyTerm> {
        self.terms.insert(term.name.clone(), term)
    }

    pub fn get(&self, name: &str) -> Option<&EnergyTerm> {
        self.terms.get(name)
    }

    pub fn quantity(&self, name: &str) -> Option<Quantity> {
        self.get(name).map(EnergyTerm::quantity)
    }

    pub fn total_energy(&self) -> Option<Quantity> {
        self.quantity(TOTAL_ENERGY)
    }

    pub fn potential(&self) -> Option<Quantity> {
        self.quantity(POTENTIAL)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnergyTerm> {
        self.terms.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Re-expresses every energy-per-mole term in `target`, leaving
    /// temperatures untouched.
    pub fn to_energy_unit(&self, target: Unit) -> Result<EnergyReport, UnitMismatchError> {
        if target.dimension() != Dimension::EnergyPerMole {
            return Err(UnitMismatchError {
                from: Unit::KilojoulesPerMole,
                to: target,
            });
        }
        self.iter()
            .map(|term| -> Result<EnergyTerm, UnitMismatchError> {
                let quantity = match term.quantity.dimension() {
                    Dimension::EnergyPerMole => term.quantity.to(target)?,
                    Dimension::Temperature => term.quantity,
                };
                Ok(EnergyTerm::new(term.name.clone(), quantity))
            })
            .collect()
    }
}

impl FromIterator<EnergyTerm> for EnergyReport {
    fn from_iter<I: IntoIterator<Item = EnergyTerm>>(iter: I) -> Self {
        let mut report = EnergyReport::new();
        for term in iter {
            report.insert(term);
        }
        report
    }
}

impl<'a> IntoIterator for &'a EnergyReport {
    type Item = &'a EnergyTerm;
    type IntoIter = indexmap::map::Values<'a, String, EnergyTerm>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.values()
    }
}
