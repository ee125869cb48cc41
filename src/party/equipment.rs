//! Equip and unequip, round-tripping gear through the shared bag. Both
//! operations refuse without side effects when preconditions fail.

use crate::content::gear::{get_gear, EquipmentSlot};
use crate::party::stats::clamp_hero_vitals;
use crate::party::{Bag, Hero};

/// Equips `gear_id` into `slot`, consuming one unit from the bag and
/// returning any previously equipped piece to it. Fails (no state change)
/// when the gear is unknown, fits a different slot, or is not in the bag.
pub fn equip_gear(hero: &mut Hero, slot: EquipmentSlot, gear_id: &str, bag: &mut Bag) -> bool {
    let Some(gear) = get_gear(gear_id) else {
        return false;
    };
    if gear.slot != slot {
        return false;
    }
    if !bag.consume(gear_id) {
        return false;
    }
    if let Some(previous) = hero.equipment.insert(slot, gear_id.to_string()) {
        bag.add(&previous, 1);
    }
    clamp_hero_vitals(hero);
    true
}

/// Removes the piece in `slot` back into the bag. Fails if the slot is
/// empty.
pub fn unequip_gear(hero: &mut Hero, slot: EquipmentSlot, bag: &mut Bag) -> bool {
    let Some(current) = hero.equipment.remove(&slot) else {
        return false;
    };
    bag.add(&current, 1);
    clamp_hero_vitals(hero);
    true
}
