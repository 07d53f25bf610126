//! Reassembles a formation's converted regiments into divisions, air wings
//! and support groups.
//!
//! Land formations go through a fixed sequence of passes. Each pass takes
//! the regiments still unassigned and returns the groups it built plus a
//! smaller remainder; whatever survives the last pass becomes a group of its
//! own, so no converted regiment is lost.

use crate::basing::air_location;
use crate::force::{Basing, ForceGroup};
use crate::regiment::Regiment;
use hoi4data::{AdjacencyGraph, ForceType, MAX_AIR_BASE, ProvinceId, Provinces};
use serde::Serialize;

/// Support slots in a standard division, shared by support and engineers.
const SUPPORT_SLOTS: usize = 2;
/// Engineers attached to a cavalry group.
const CAVALRY_ENGINEERS: usize = 2;
/// Air base levels needed per air wing regiment.
const AIR_BASE_PER_WING: u32 = 2;

const ARMORED: &[&str] = &[
    "light_armor_brigade",
    "armor_brigade",
    "armored_car_brigade",
    "tank_destroyer_brigade",
    "motorized_brigade",
];
const SPECIALIST: &[&str] = &["bergsjaeger_brigade", "marine_brigade", "police_brigade"];
const LINE: &[&str] = &["infantry_brigade", "militia_brigade"];
const SUPPORT: &[&str] = &["anti_air_brigade", "anti_tank_brigade", "artillery_brigade"];
const ENGINEER: &str = "engineer_brigade";
const CAVALRY: &str = "cavalry_brigade";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Air,
    Armored,
    Specialist,
    Line,
    Support,
    Engineer,
    Cavalry,
    Other,
}

fn role(regiment: &Regiment) -> Role {
    if regiment.domain() == ForceType::Air {
        return Role::Air;
    }
    let name = regiment.type_name();
    if ARMORED.contains(&name) {
        Role::Armored
    } else if SPECIALIST.contains(&name) {
        Role::Specialist
    } else if LINE.contains(&name) {
        Role::Line
    } else if SUPPORT.contains(&name) {
        Role::Support
    } else if name == ENGINEER {
        Role::Engineer
    } else if name == CAVALRY {
        Role::Cavalry
    } else {
        Role::Other
    }
}

/// Regiments not yet assigned to a group, in working order.
#[derive(Debug, Default)]
struct Remainder(Vec<Regiment>);

impl Remainder {
    fn take_first(&mut self, wanted: Role) -> Option<Regiment> {
        let pos = self.0.iter().position(|r| role(r) == wanted)?;
        Some(self.0.remove(pos))
    }

    fn take_up_to(&mut self, wanted: Role, limit: usize) -> Vec<Regiment> {
        let mut taken = Vec::new();
        while taken.len() < limit {
            match self.take_first(wanted) {
                Some(r) => taken.push(r),
                None => break,
            }
        }
        taken
    }

    fn take_all(self, wanted: Role) -> (Vec<Regiment>, Remainder) {
        let (taken, kept) = self.0.into_iter().partition(|r| role(r) == wanted);
        (taken, Remainder(kept))
    }

    fn count(&self, wanted: Role) -> usize {
        self.0.iter().filter(|r| role(r) == wanted).count()
    }

    fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// An air base level the destination province must provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AirBaseRequirement {
    pub province: ProvinceId,
    pub level: u32,
}

/// Result of organizing one land formation.
#[derive(Debug, Clone, PartialEq)]
pub struct OrganizedArmy {
    pub group: ForceGroup,
    pub air_base_requirements: Vec<AirBaseRequirement>,
    /// Regiments that fit no pattern and got a group of their own.
    pub leftovers: usize,
}

/// English ordinal suffix: 1st, 2nd, 3rd, 4th, 11th, 21st, 112th.
pub fn ordinal_suffix(n: u32) -> &'static str {
    if (11..=13).contains(&(n % 100)) {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// Everything of a navy goes into one fleet.
pub fn organize_navy(name: &str, regiments: Vec<Regiment>, basing: Basing) -> ForceGroup {
    ForceGroup::with_regiments(name, ForceType::Navy, basing, regiments)
}

struct AirContext<'a> {
    tag: &'a str,
    provinces: &'a Provinces,
    adjacency: &'a AdjacencyGraph,
    air_force_index: &'a mut u32,
}

fn air_pass(
    remainder: Remainder,
    basing: Basing,
    ctx: &mut AirContext<'_>,
) -> (Vec<ForceGroup>, Option<AirBaseRequirement>, Remainder) {
    let (wing, remainder) = remainder.take_all(Role::Air);
    if wing.is_empty() {
        return (Vec::new(), None, remainder);
    }

    *ctx.air_force_index += 1;
    let n = *ctx.air_force_index;
    let name = format!("{}{} Air Force", n, ordinal_suffix(n));

    let base = basing
        .province()
        .and_then(|start| air_location(start, ctx.tag, ctx.provinces, ctx.adjacency));
    let (wing_basing, requirement) = match base {
        Some(province) => {
            let current = ctx.provinces.get(province).map_or(0, |p| p.air_base);
            let level = (current + AIR_BASE_PER_WING * wing.len() as u32).min(MAX_AIR_BASE);
            (
                Basing::Province(province),
                Some(AirBaseRequirement { province, level }),
            )
        }
        None => {
            if !basing.is_production_queue() {
                log::debug!(
                    "No air base owned by {} reachable for {}, placing it in the production queue",
                    ctx.tag,
                    name
                );
            }
            (Basing::ProductionQueue, None)
        }
    };

    let group = ForceGroup::with_regiments(&name, ForceType::Air, wing_basing, wing);
    (vec![group], requirement, remainder)
}

/// One group of every regiment with the given role.
fn block_pass(remainder: Remainder, wanted: Role, basing: Basing) -> (Vec<ForceGroup>, Remainder) {
    let (taken, remainder) = remainder.take_all(wanted);
    if taken.is_empty() {
        return (Vec::new(), remainder);
    }
    let group = ForceGroup::with_regiments("", ForceType::Land, basing, taken);
    (vec![group], remainder)
}

/// Line regiments in pairs with up to two support regiments, engineers
/// filling the support slots left open.
fn division_pass(mut remainder: Remainder, basing: Basing) -> (Vec<ForceGroup>, Remainder) {
    let mut divisions = Vec::new();
    while let Some(core) = remainder.take_first(Role::Line) {
        let mut members = vec![core];
        members.extend(remainder.take_first(Role::Line));
        let support = remainder.take_up_to(Role::Support, SUPPORT_SLOTS);
        let open_slots = SUPPORT_SLOTS - support.len();
        members.extend(support);
        members.extend(remainder.take_up_to(Role::Engineer, open_slots));
        divisions.push(ForceGroup::with_regiments("", ForceType::Land, basing, members));
    }
    (divisions, remainder)
}

/// Cavalry in pairs with up to two engineers. A lone cavalry regiment stays
/// in the remainder.
fn cavalry_pass(mut remainder: Remainder, basing: Basing) -> (Vec<ForceGroup>, Remainder) {
    let mut groups = Vec::new();
    while remainder.count(Role::Cavalry) >= 2 {
        let mut members = remainder.take_up_to(Role::Cavalry, 2);
        members.extend(remainder.take_up_to(Role::Engineer, CAVALRY_ENGINEERS));
        groups.push(ForceGroup::with_regiments("", ForceType::Land, basing, members));
    }
    (groups, remainder)
}

fn leftover_pass(remainder: Remainder, basing: Basing) -> Vec<ForceGroup> {
    remainder
        .0
        .into_iter()
        .map(|r| {
            let domain = r.domain();
            ForceGroup::with_regiments("", domain, basing, vec![r])
        })
        .collect()
}

/// Organize a land formation's regiments under one top-level group named
/// after the formation.
///
/// `air_force_index` numbers air wings across all formations of a country
/// and is advanced only when this formation has an air wing.
pub fn organize_land(
    name: &str,
    regiments: Vec<Regiment>,
    basing: Basing,
    tag: &str,
    provinces: &Provinces,
    adjacency: &AdjacencyGraph,
    air_force_index: &mut u32,
) -> OrganizedArmy {
    let mut air = AirContext {
        tag,
        provinces,
        adjacency,
        air_force_index,
    };
    let mut children = Vec::new();

    let remainder = Remainder(regiments);
    let (groups, requirement, remainder) = air_pass(remainder, basing, &mut air);
    children.extend(groups);
    let (groups, remainder) = block_pass(remainder, Role::Armored, basing);
    children.extend(groups);
    let (groups, remainder) = block_pass(remainder, Role::Specialist, basing);
    children.extend(groups);
    let (groups, remainder) = division_pass(remainder, basing);
    children.extend(groups);
    let (groups, remainder) = cavalry_pass(remainder, basing);
    children.extend(groups);

    let leftovers = remainder.0.len();
    if !remainder.is_empty() {
        log::warn!(
            "Leftover regiments in {}'s army {}. Likely too many support units.",
            tag,
            name
        );
        children.extend(leftover_pass(remainder, basing));
    }

    OrganizedArmy {
        group: ForceGroup::with_groups(name, ForceType::Land, basing, children),
        air_base_requirements: requirement.into_iter().collect(),
        leftovers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MapBuilder, regiments, standard_catalog};

    fn types(group: &ForceGroup) -> Vec<&str> {
        group.regiments().iter().map(|r| r.type_name()).collect()
    }

    fn organize(regs: Vec<Regiment>, map: &crate::testing::TestMap, basing: Basing) -> (OrganizedArmy, u32) {
        let mut index = 0;
        let army = organize_land(
            "First Army",
            regs,
            basing,
            "GER",
            &map.provinces,
            &map.adjacency,
            &mut index,
        );
        (army, index)
    }

    #[test]
    fn test_ordinal_suffix() {
        let cases = [
            (1, "st"),
            (2, "nd"),
            (3, "rd"),
            (4, "th"),
            (11, "th"),
            (12, "th"),
            (13, "th"),
            (21, "st"),
            (22, "nd"),
            (23, "rd"),
            (101, "st"),
            (111, "th"),
            (112, "th"),
        ];
        for (n, suffix) in cases {
            assert_eq!(ordinal_suffix(n), suffix, "n = {}", n);
        }
    }

    #[test]
    fn test_standard_division() {
        let catalog = standard_catalog();
        let map = MapBuilder::new().land(1, "GER").build();
        let regs = regiments(
            &catalog,
            &["infantry_brigade", "engineer_brigade", "artillery_brigade", "infantry_brigade"],
        );
        let (army, _) = organize(regs, &map, Basing::Province(1));
        assert_eq!(army.group.name, "First Army");
        assert_eq!(army.group.children().len(), 1);
        assert_eq!(
            types(&army.group.children()[0]),
            vec!["infantry_brigade", "infantry_brigade", "artillery_brigade", "engineer_brigade"]
        );
        assert_eq!(army.leftovers, 0);
    }

    #[test]
    fn test_support_fills_slots_before_engineers() {
        let catalog = standard_catalog();
        let map = MapBuilder::new().land(1, "GER").build();
        let regs = regiments(
            &catalog,
            &[
                "militia_brigade",
                "anti_tank_brigade",
                "engineer_brigade",
                "anti_air_brigade",
                "artillery_brigade",
                "infantry_brigade",
            ],
        );
        let (army, _) = organize(regs, &map, Basing::Province(1));
        let children = army.group.children();
        assert_eq!(
            types(&children[0]),
            vec!["militia_brigade", "infantry_brigade", "anti_tank_brigade", "anti_air_brigade"]
        );
        // artillery and the engineer never found a line regiment
        assert_eq!(children.len(), 3);
        assert_eq!(army.leftovers, 2);
    }

    #[test]
    fn test_three_cavalry_leave_one_over() {
        let catalog = standard_catalog();
        let map = MapBuilder::new().land(1, "GER").build();
        let regs = regiments(&catalog, &["cavalry_brigade"; 3]);
        let (army, _) = organize(regs, &map, Basing::Province(1));
        let children = army.group.children();
        assert_eq!(children.len(), 2);
        assert_eq!(types(&children[0]), vec!["cavalry_brigade", "cavalry_brigade"]);
        assert_eq!(types(&children[1]), vec!["cavalry_brigade"]);
        assert_eq!(army.leftovers, 1);
    }

    #[test]
    fn test_cavalry_takes_engineers() {
        let catalog = standard_catalog();
        let map = MapBuilder::new().land(1, "GER").build();
        let regs = regiments(
            &catalog,
            &[
                "cavalry_brigade",
                "engineer_brigade",
                "engineer_brigade",
                "engineer_brigade",
                "cavalry_brigade",
            ],
        );
        let (army, _) = organize(regs, &map, Basing::Province(1));
        let children = army.group.children();
        assert_eq!(
            types(&children[0]),
            vec!["cavalry_brigade", "cavalry_brigade", "engineer_brigade", "engineer_brigade"]
        );
        assert_eq!(types(&children[1]), vec!["engineer_brigade"]);
    }

    #[test]
    fn test_armored_and_specialists_are_separate_groups() {
        let catalog = standard_catalog();
        let map = MapBuilder::new().land(1, "GER").build();
        let regs = regiments(
            &catalog,
            &[
                "marine_brigade",
                "armor_brigade",
                "motorized_brigade",
                "bergsjaeger_brigade",
                "infantry_brigade",
            ],
        );
        let (army, _) = organize(regs, &map, Basing::Province(1));
        let children = army.group.children();
        assert_eq!(children.len(), 3);
        assert_eq!(types(&children[0]), vec!["armor_brigade", "motorized_brigade"]);
        assert_eq!(types(&children[1]), vec!["marine_brigade", "bergsjaeger_brigade"]);
        assert_eq!(types(&children[2]), vec!["infantry_brigade"]);
        assert!(children.iter().all(|g| g.basing == Basing::Province(1)));
    }

    #[test]
    fn test_air_wing_finds_base_and_raises_requirement() {
        let catalog = standard_catalog();
        let map = MapBuilder::new()
            .land(1, "GER")
            .air_base(2, "GER", 3)
            .adjacent(1, 2)
            .build();
        let regs = regiments(&catalog, &["fighter", "infantry_brigade", "fighter"]);
        let (army, index) = organize(regs, &map, Basing::Province(1));
        assert_eq!(index, 1);
        let wing = &army.group.children()[0];
        assert_eq!(wing.name, "1st Air Force");
        assert_eq!(wing.force_type, ForceType::Air);
        assert_eq!(wing.basing, Basing::Province(2));
        assert_eq!(wing.regiment_count(), 2);
        assert_eq!(
            army.air_base_requirements,
            vec![AirBaseRequirement { province: 2, level: 7 }]
        );
    }

    #[test]
    fn test_air_base_requirement_is_capped() {
        let catalog = standard_catalog();
        let map = MapBuilder::new().air_base(1, "GER", 8).build();
        let regs = regiments(&catalog, &["fighter", "tactical_bomber"]);
        let (army, _) = organize(regs, &map, Basing::Province(1));
        assert_eq!(army.air_base_requirements[0].level, MAX_AIR_BASE);
    }

    #[test]
    fn test_air_wing_without_base_is_production_queue() {
        let catalog = standard_catalog();
        let map = MapBuilder::new().land(1, "GER").air_base(2, "FRA", 4).adjacent(1, 2).build();
        let regs = regiments(&catalog, &["fighter"]);
        let (army, _) = organize(regs, &map, Basing::Province(1));
        assert_eq!(army.group.children()[0].basing, Basing::ProductionQueue);
        assert!(army.air_base_requirements.is_empty());

        let (army, index) = organize(regiments(&catalog, &["fighter"]), &map, Basing::ProductionQueue);
        assert_eq!(army.group.children()[0].basing, Basing::ProductionQueue);
        assert_eq!(index, 1);
    }

    #[test]
    fn test_air_force_index_advances_only_for_wings() {
        let catalog = standard_catalog();
        let map = MapBuilder::new().air_base(1, "GER", 1).build();
        let mut index = 0;
        for (regs, expected) in [
            (vec!["fighter"], "1st Air Force"),
            (vec!["infantry_brigade"], ""),
            (vec!["fighter"], "2nd Air Force"),
        ] {
            let army = organize_land(
                "Army",
                regiments(&catalog, &regs),
                Basing::Province(1),
                "GER",
                &map.provinces,
                &map.adjacency,
                &mut index,
            );
            let wing = army.group.children().iter().find(|g| g.force_type == ForceType::Air);
            assert_eq!(wing.map_or("", |g| g.name.as_str()), expected);
        }
        assert_eq!(index, 2);
    }

    #[test]
    fn test_every_regiment_is_placed() {
        let catalog = standard_catalog();
        let map = MapBuilder::new().land(1, "GER").build();
        let names = [
            "infantry_brigade",
            "artillery_brigade",
            "artillery_brigade",
            "artillery_brigade",
            "engineer_brigade",
            "cavalry_brigade",
            "police_brigade",
            "light_armor_brigade",
            "destroyer",
        ];
        let (army, _) = organize(regiments(&catalog, &names), &map, Basing::Province(1));
        assert_eq!(army.group.regiment_count(), names.len());
        // artillery x1, engineer, cavalry, destroyer
        assert_eq!(army.leftovers, 4);
    }

    #[test]
    fn test_navy_is_flat() {
        let catalog = standard_catalog();
        let fleet = organize_navy(
            "Home Fleet",
            regiments(&catalog, &["destroyer", "battleship"]),
            Basing::Province(900),
        );
        assert_eq!(fleet.force_type, ForceType::Navy);
        assert_eq!(types(&fleet), vec!["destroyer", "battleship"]);
        assert!(fleet.children().is_empty());
    }
}
