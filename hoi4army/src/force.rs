//! The output hierarchy.

use crate::regiment::Regiment;
use hoi4data::{ForceType, ProvinceId};
use serde::Serialize;

/// Where a force group is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Basing {
    Province(ProvinceId),
    /// No confirmed field position; the group waits to be built.
    ProductionQueue,
}

impl Basing {
    pub fn province(self) -> Option<ProvinceId> {
        match self {
            Basing::Province(id) => Some(id),
            Basing::ProductionQueue => None,
        }
    }

    pub fn is_production_queue(self) -> bool {
        self == Basing::ProductionQueue
    }
}

/// A group holds either regiments or child groups, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Members {
    Regiments(Vec<Regiment>),
    Groups(Vec<ForceGroup>),
}

/// Division, air wing, army or fleet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForceGroup {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub force_type: ForceType,
    pub basing: Basing,
    pub members: Members,
}

impl ForceGroup {
    pub fn with_regiments(
        name: &str,
        force_type: ForceType,
        basing: Basing,
        regiments: Vec<Regiment>,
    ) -> Self {
        Self {
            name: name.to_string(),
            force_type,
            basing,
            members: Members::Regiments(regiments),
        }
    }

    pub fn with_groups(
        name: &str,
        force_type: ForceType,
        basing: Basing,
        groups: Vec<ForceGroup>,
    ) -> Self {
        Self {
            name: name.to_string(),
            force_type,
            basing,
            members: Members::Groups(groups),
        }
    }

    /// Regiments held directly by this group.
    pub fn regiments(&self) -> &[Regiment] {
        match &self.members {
            Members::Regiments(r) => r,
            Members::Groups(_) => &[],
        }
    }

    pub fn children(&self) -> &[ForceGroup] {
        match &self.members {
            Members::Regiments(_) => &[],
            Members::Groups(g) => g,
        }
    }

    /// Regiments anywhere below this group, depth first.
    pub fn all_regiments(&self) -> Vec<&Regiment> {
        let mut out = Vec::new();
        self.collect_regiments(&mut out);
        out
    }

    fn collect_regiments<'a>(&'a self, out: &mut Vec<&'a Regiment>) {
        match &self.members {
            Members::Regiments(r) => out.extend(r.iter()),
            Members::Groups(groups) => {
                for g in groups {
                    g.collect_regiments(out);
                }
            }
        }
    }

    pub fn regiment_count(&self) -> usize {
        match &self.members {
            Members::Regiments(r) => r.len(),
            Members::Groups(groups) => groups.iter().map(ForceGroup::regiment_count).sum(),
        }
    }

    /// True when no regiment is held anywhere below this group.
    pub fn is_empty(&self) -> bool {
        self.regiment_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hoi4data::{MappedType, UnitType};

    fn regiment(name: &str) -> Regiment {
        let mapped = MappedType {
            unit_type: UnitType::new("infantry_brigade", ForceType::Land, "infantry_practical", 1.0),
            tier: 0,
        };
        Regiment::new(name, &mapped)
    }

    #[test]
    fn test_counts_recurse() {
        let div1 = ForceGroup::with_regiments(
            "",
            ForceType::Land,
            Basing::Province(5),
            vec![regiment("a"), regiment("b")],
        );
        let div2 =
            ForceGroup::with_regiments("", ForceType::Land, Basing::Province(5), vec![regiment("c")]);
        let army = ForceGroup::with_groups(
            "First Army",
            ForceType::Land,
            Basing::Province(5),
            vec![div1, div2],
        );
        assert_eq!(army.regiment_count(), 3);
        assert!(army.regiments().is_empty());
        assert_eq!(army.children().len(), 2);
        let names: Vec<&str> = army.all_regiments().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_group() {
        let army = ForceGroup::with_groups("Empty", ForceType::Land, Basing::ProductionQueue, vec![]);
        assert!(army.is_empty());
        assert_eq!(army.basing.province(), None);
        assert!(army.basing.is_production_queue());
    }

    #[test]
    fn test_json_shape() {
        let div =
            ForceGroup::with_regiments("", ForceType::Land, Basing::Province(7), vec![regiment("a")]);
        let json = serde_json::to_value(&div).unwrap();
        assert!(json.get("name").is_none());
        assert_eq!(json["force_type"], "land");
        assert_eq!(json["basing"]["province"], 7);
        assert_eq!(json["members"]["regiments"][0]["type"], "infantry_brigade");
        assert_eq!(json["members"]["regiments"][0]["reserve"], true);

        let queued = ForceGroup::with_groups("Fleet", ForceType::Navy, Basing::ProductionQueue, vec![]);
        let json = serde_json::to_value(&queued).unwrap();
        assert_eq!(json["basing"], "production_queue");
    }
}
