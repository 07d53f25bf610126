//! Per-country and whole-world drivers.

use crate::basing::{CandidatePicker, resolve_basing};
use crate::config::ConverterConfig;
use crate::force::ForceGroup;
use crate::organizer::{AirBaseRequirement, organize_land, organize_navy};
use crate::practicals::Practicals;
use crate::regiment::{Conversion, Regiment, TypeCounters, convert_regiment};
use hoi4data::{
    AdjacencyGraph, LocationMapping, Provinces, SourceFormation, SourceRegiment, Tag,
    TypeMappingTable, WorldSnapshot,
};
use serde::Serialize;
use tracing::instrument;

/// State that lives for one country's conversion and no longer.
#[derive(Debug, Clone, Default)]
pub struct CountryConversion {
    pub tag: Tag,
    pub counters: TypeCounters,
    pub practicals: Practicals,
    /// Number of the last air force created.
    pub air_force_index: u32,
}

impl CountryConversion {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            ..Default::default()
        }
    }

    /// Convert one regiment and credit its practicals.
    pub fn convert(
        &mut self,
        source: &SourceRegiment,
        table: &TypeMappingTable,
        practicals_scale: f64,
    ) -> Conversion {
        let conversion = convert_regiment(source, table, &mut self.counters, &self.tag);
        if let Conversion::Converted(regiment) = &conversion {
            self.practicals.add(
                &regiment.unit_type.practical,
                practicals_scale * regiment.unit_type.practical_factor,
            );
        }
        conversion
    }

    /// Take back what [`CountryConversion::convert`] credited for `regiment`.
    pub fn refund(&mut self, regiment: &Regiment, practicals_scale: f64) {
        self.practicals.add(
            &regiment.unit_type.practical,
            -practicals_scale * regiment.unit_type.practical_factor,
        );
    }
}

/// Counters for the conversion summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConversionStats {
    pub formations: usize,
    /// Formations attached to their country (non-empty).
    pub attached: usize,
    /// Attached formations without a field position.
    pub production_queue: usize,
    pub converted_regiments: usize,
    /// Unmapped or exclusive to other countries.
    pub dropped_regiments: usize,
    /// Regiments deliberately mapped to nothing.
    pub unneeded_regiments: usize,
    pub leftover_regiments: usize,
}

impl ConversionStats {
    pub fn absorb(&mut self, other: &ConversionStats) {
        self.formations += other.formations;
        self.attached += other.attached;
        self.production_queue += other.production_queue;
        self.converted_regiments += other.converted_regiments;
        self.dropped_regiments += other.dropped_regiments;
        self.unneeded_regiments += other.unneeded_regiments;
        self.leftover_regiments += other.leftover_regiments;
    }
}

/// Converted forces of one country.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountryForces {
    pub tag: Tag,
    pub armies: Vec<ForceGroup>,
    pub practicals: Practicals,
    pub stats: ConversionStats,
}

/// Converts formations using shared, read-only map data.
pub struct ArmyConverter<'a> {
    table: &'a TypeMappingTable,
    config: &'a ConverterConfig,
    adjacency: &'a AdjacencyGraph,
    locations: &'a LocationMapping,
    picker: CandidatePicker,
}

impl<'a> ArmyConverter<'a> {
    pub fn new(
        table: &'a TypeMappingTable,
        config: &'a ConverterConfig,
        adjacency: &'a AdjacencyGraph,
        locations: &'a LocationMapping,
    ) -> Self {
        Self {
            table,
            config,
            adjacency,
            locations,
            picker: config.picker(),
        }
    }

    /// Replace the picker built from the configuration.
    pub fn with_picker(mut self, picker: CandidatePicker) -> Self {
        self.picker = picker;
        self
    }

    /// Convert every formation of one country, in order.
    ///
    /// Air base requirements are written to `provinces` as air wings are
    /// placed. Formations left with no regiments are not attached.
    #[instrument(skip_all, fields(tag = %tag))]
    pub fn convert_country(
        &mut self,
        tag: &str,
        formations: &[SourceFormation],
        provinces: &mut Provinces,
    ) -> CountryForces {
        let mut country = CountryConversion::new(tag);
        let mut stats = ConversionStats::default();
        let mut armies = Vec::new();

        for formation in formations {
            stats.formations += 1;
            let group = self.convert_formation(&mut country, formation, provinces, &mut stats);
            if group.is_empty() {
                log::debug!("{}'s {} has no regiments left, not attaching it", tag, formation.name);
                continue;
            }
            if self.config.refund_queued_practicals {
                for regiment in queued_regiments(&group) {
                    country.refund(regiment, self.config.practicals_scale);
                }
            }
            stats.attached += 1;
            if group.basing.is_production_queue() {
                stats.production_queue += 1;
            }
            armies.push(group);
        }

        log::debug!(
            "{}: {} of {} formations attached, {} regiments dropped",
            tag,
            stats.attached,
            stats.formations,
            stats.dropped_regiments
        );

        CountryForces {
            tag: tag.to_string(),
            armies,
            practicals: country.practicals,
            stats,
        }
    }

    fn convert_formation(
        &mut self,
        country: &mut CountryConversion,
        formation: &SourceFormation,
        provinces: &mut Provinces,
        stats: &mut ConversionStats,
    ) -> ForceGroup {
        let basing = resolve_basing(
            formation,
            self.locations,
            provinces,
            self.adjacency,
            &mut self.picker,
        );

        let mut regiments = Vec::new();
        for source in &formation.regiments {
            match country.convert(source, self.table, self.config.practicals_scale) {
                Conversion::Converted(regiment) => regiments.push(regiment),
                Conversion::Unmapped | Conversion::Exhausted => stats.dropped_regiments += 1,
                Conversion::NotNeeded => stats.unneeded_regiments += 1,
            }
        }
        stats.converted_regiments += regiments.len();

        if formation.navy {
            return organize_navy(&formation.name, regiments, basing);
        }

        let organized = organize_land(
            &formation.name,
            regiments,
            basing,
            &country.tag,
            provinces,
            self.adjacency,
            &mut country.air_force_index,
        );
        for requirement in &organized.air_base_requirements {
            if let Some(province) = provinces.get_mut(requirement.province) {
                province.require_air_base(requirement.level);
            }
        }
        stats.leftover_regiments += organized.leftovers;
        organized.group
    }
}

/// Regiments whose nearest enclosing group is in the production queue.
fn queued_regiments(group: &ForceGroup) -> Vec<&Regiment> {
    if group.basing.is_production_queue() {
        return group.all_regiments();
    }
    group.children().iter().flat_map(queued_regiments).collect()
}

/// Result of converting every country in a world snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionReport {
    pub countries: Vec<CountryForces>,
    /// Every province whose required air base level was raised.
    pub air_bases: Vec<AirBaseRequirement>,
    pub stats: ConversionStats,
}

/// Convert every country in `world`, in tag order.
///
/// Writes required air base levels into `world.provinces`.
pub fn convert_world(
    table: &TypeMappingTable,
    config: &ConverterConfig,
    world: &mut WorldSnapshot,
) -> ConversionReport {
    convert_world_with(table, config, world, config.picker())
}

/// [`convert_world`] with an explicit candidate picker.
pub fn convert_world_with(
    table: &TypeMappingTable,
    config: &ConverterConfig,
    world: &mut WorldSnapshot,
    picker: CandidatePicker,
) -> ConversionReport {
    let WorldSnapshot {
        provinces,
        adjacency,
        location_mapping,
        countries,
    } = world;

    let mut converter =
        ArmyConverter::new(table, config, adjacency, location_mapping).with_picker(picker);
    let mut stats = ConversionStats::default();
    let mut converted = Vec::with_capacity(countries.len());
    for (tag, formations) in countries.iter() {
        let forces = converter.convert_country(tag, formations, provinces);
        stats.absorb(&forces.stats);
        converted.push(forces);
    }

    let air_bases: Vec<AirBaseRequirement> = provinces
        .iter()
        .filter(|(_, p)| p.required_air_base > 0)
        .map(|(province, p)| AirBaseRequirement {
            province,
            level: p.required_air_base,
        })
        .collect();

    log::info!(
        "Converted {} formations of {} countries: {} attached ({} in production queue), {} regiments converted, {} dropped, {} leftover, {} air bases raised",
        stats.formations,
        converted.len(),
        stats.attached,
        stats.production_queue,
        stats.converted_regiments,
        stats.dropped_regiments,
        stats.leftover_regiments,
        air_bases.len()
    );

    ConversionReport {
        countries: converted,
        air_bases,
        stats,
    }
}
