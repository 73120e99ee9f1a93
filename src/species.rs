use std::collections::HashMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::TrapError;
use crate::units;

/// Immutable (mass, charge) pair describing the simulated particle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ChargedParticle {
    mass: f64,
    charge: f64,
}

impl ChargedParticle {
    pub fn new(mass: f64, charge: f64) -> Result<Self, TrapError> {
        if !mass.is_finite() || !charge.is_finite() || mass <= 0.0 {
            return Err(TrapError::InvalidParticle { mass, charge });
        }
        Ok(Self { mass, charge })
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn charge(&self) -> f64 {
        self.charge
    }

    /// Charge-to-mass ratio (C/kg), the factor turning field into acceleration.
    pub fn charge_to_mass(&self) -> f64 {
        self.charge / self.mass
    }
}

/// Named particle presets.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize, Deserialize)]
pub enum Species {
    /// Singly ionised strontium-88
    Sr88Ion,
    Electron,
}

pub static SPECIES_PROPERTIES: Lazy<HashMap<Species, ChargedParticle>> = Lazy::new(|| {
    use Species::*;
    let mut m = HashMap::new();
    m.insert(
        Sr88Ion,
        ChargedParticle {
            mass: units::SR88_ION_MASS,
            charge: units::ELEMENTARY_CHARGE,
        },
    );
    m.insert(
        Electron,
        ChargedParticle {
            mass: units::ELECTRON_MASS,
            charge: -units::ELEMENTARY_CHARGE,
        },
    );
    m
});

impl Species {
    pub const ALL: [Species; 2] = [Species::Sr88Ion, Species::Electron];

    /// Look up the particle record for this preset.
    pub fn particle(self) -> ChargedParticle {
        SPECIES_PROPERTIES[&self]
    }

    pub fn name(self) -> &'static str {
        match self {
            Species::Sr88Ion => "Sr-88+",
            Species::Electron => "e-",
        }
    }
}

impl From<Species> for ChargedParticle {
    fn from(species: Species) -> Self {
        species.particle()
    }
}
