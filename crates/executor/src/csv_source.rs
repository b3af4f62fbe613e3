use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, error};

use super::error::Error;
use super::types::{LocationSource, RegionId};
use common::types::{LocationId, RawLocationRecord};

/// One row of the systems export.
///
/// `neighbors` holds the ids of adjacent systems separated by `;`.
#[derive(Debug, Deserialize)]
pub struct SystemRow {
    pub system_id: LocationId,
    pub region_id: RegionId,
    pub name: String,
    pub security: f64,
    #[serde(default)]
    pub neighbors: String,
}

/// One row of the activity export. Systems without activity have no row, and
/// a row may carry only kills or only jumps.
#[derive(Debug, Deserialize)]
pub struct ActivityRow {
    pub system_id: LocationId,
    pub ship_kills: Option<u32>,
    pub npc_kills: Option<u32>,
    pub ship_jumps: Option<u32>,
}

/// Location catalog backed by CSV exports, held fully in memory.
#[derive(Debug, Default)]
pub struct CsvSource {
    regions: HashMap<RegionId, Vec<LocationId>>,
    records: HashMap<LocationId, RawLocationRecord>,
}

impl CsvSource {
    /// Reads the systems file and, if given, the activity file.
    pub fn open(systems_path: &Path, activity_path: Option<&Path>) -> Result<Self, Error> {
        let mut source = Self::from_systems_reader(open_file(systems_path)?)?;
        if let Some(path) = activity_path {
            source.apply_activity(open_file(path)?)?;
        }
        Ok(source)
    }

    pub fn from_systems_reader<R: Read>(reader: R) -> Result<Self, Error> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut source = CsvSource::default();

        for result in rdr.deserialize() {
            let row: SystemRow = result?;
            let neighbors = parse_neighbors(row.system_id, &row.neighbors)?;

            source
                .regions
                .entry(row.region_id)
                .or_default()
                .push(row.system_id);
            source.records.insert(
                row.system_id,
                RawLocationRecord {
                    name: row.name,
                    security: row.security,
                    neighbors,
                    ship_kills: None,
                    npc_kills: None,
                    jumps: None,
                },
            );
        }

        debug!(
            regions = source.regions.len(),
            systems = source.records.len(),
            "parsed systems export"
        );
        Ok(source)
    }

    /// Merges activity statistics into the loaded systems. Rows for systems
    /// that are not loaded are ignored.
    pub fn apply_activity<R: Read>(&mut self, reader: R) -> Result<(), Error> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut applied = 0;
        for result in rdr.deserialize() {
            let row: ActivityRow = result?;
            let Some(record) = self.records.get_mut(&row.system_id) else {
                continue;
            };

            if row.ship_kills.is_some() {
                record.ship_kills = row.ship_kills;
            }
            if row.npc_kills.is_some() {
                record.npc_kills = row.npc_kills;
            }
            if row.ship_jumps.is_some() {
                record.jumps = row.ship_jumps;
            }
            applied += 1;
        }

        debug!(rows = applied, "merged activity export");
        Ok(())
    }
}

fn open_file(path: &Path) -> Result<File, Error> {
    File::open(path).map_err(|e| {
        error!("Failed to read file {}: {:?}", path.display(), e);
        Error::IoError(e)
    })
}

fn parse_neighbors(system_id: LocationId, field: &str) -> Result<Vec<LocationId>, Error> {
    field
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<LocationId>().map_err(|_| {
                Error::MalformedRecord(format!(
                    "system {} lists invalid neighbor id '{}'",
                    system_id, s
                ))
            })
        })
        .collect()
}

#[async_trait::async_trait]
impl LocationSource for CsvSource {
    async fn region_locations(&self, region: RegionId) -> Result<Vec<LocationId>, Error> {
        self.regions
            .get(&region)
            .cloned()
            .ok_or(Error::UnknownRegion(region))
    }

    async fn get_location(&self, id: LocationId) -> Result<RawLocationRecord, Error> {
        self.records
            .get(&id)
            .cloned()
            .ok_or(Error::UnknownLocation(id))
    }
}
