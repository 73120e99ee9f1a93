// Trap-level tests: construction, particle attachment and the field chain.

use super::*;
use crate::species::Species;

fn reference_trap() -> Trap {
    Trap::new(TrapConfig::default()).unwrap()
}

#[test]
fn construction_rejects_degenerate_geometry() {
    let cfg = TrapConfig::new(1e-3, 1e-3, 56.0, [0.0, -0.3, 0.0, -0.3], 1e6);
    match Trap::new(cfg) {
        Err(TrapError::InvalidGeometry { spacing, radius }) => {
            assert_eq!(spacing, 1e-3);
            assert_eq!(radius, 1e-3);
        }
        Err(e) => panic!("unexpected error {}", e),
        Ok(_) => panic!("d <= 2r must not build a trap"),
    }
}

#[test]
fn new_trap_has_no_particle_and_no_trajectory() {
    let trap = reference_trap();
    assert!(trap.ion().is_none());
    assert!(trap.trajectory().is_empty());
    assert_eq!(trap.capacitance().c_next, trap.capacitance().c_diag);
}

#[test]
fn add_ion_overwrites_previous_particle() {
    let mut trap = reference_trap();
    trap.add_ion(Species::Sr88Ion.particle(), 1e-3, 2e-3, 3.0, 4.0);
    trap.add_ion(Species::Electron.particle(), 4e-3, 4e-3, 0.0, -1.0);
    let ion = trap.ion().unwrap();
    assert_eq!(ion.particle, Species::Electron.particle());
    assert_eq!(ion.position, DVec2::new(4e-3, 4e-3));
    assert_eq!(ion.velocity, DVec2::new(0.0, -1.0));
}

#[test]
fn charges_vanish_without_any_drive() {
    let cfg = TrapConfig::new(7.778e-3, 2.5e-3, 0.0, [0.0; 4], 1e6);
    let trap = Trap::new(cfg).unwrap();
    for t in [0.0, 1.3e-7, 5e-3] {
        assert_eq!(trap.charges_at(t), ElectrodeCharges::default());
    }
}

#[test]
fn acceleration_is_field_times_charge_over_mass() {
    let trap = reference_trap();
    let ion = Species::Sr88Ion.particle();
    let pos = DVec2::new(4.5e-3, 4.1e-3);
    let t = 2.5e-7;
    let e = trap.e_field_at(pos, t);
    let a = trap.acceleration_at(pos, t, ion.charge_to_mass());
    assert_eq!(a, e * ion.charge_to_mass());
}

#[test]
fn electron_accelerates_against_the_field() {
    let trap = reference_trap();
    let pos = DVec2::new(4.5e-3, 3.3e-3);
    let ion = Species::Sr88Ion.particle();
    let e = Species::Electron.particle();
    let a_ion = trap.acceleration_at(pos, 0.0, ion.charge_to_mass());
    let a_e = trap.acceleration_at(pos, 0.0, e.charge_to_mass());
    assert!(a_ion.dot(a_e) < 0.0);
}

#[test]
fn confinement_bound_is_strict() {
    let trap = reference_trap();
    let r = trap.config().electrode_radius;
    let hi = trap.config().spacing - r;
    let mid = trap.config().center();
    assert!(trap.is_confined(DVec2::new(mid, mid)));
    assert!(!trap.is_confined(DVec2::new(r, mid)));
    assert!(!trap.is_confined(DVec2::new(mid, hi)));
    assert!(!trap.is_confined(DVec2::new(hi + 1e-9, mid)));
    assert!(!trap.is_confined(DVec2::new(mid, f64::NAN)));
}
