use std::io::{self, Write};

use serde::Serialize;

use crate::domain::{AggregatedDetail, CatalogEntryDetail, STAT_NAMES};

#[derive(Debug, Clone, Copy)]
pub enum OutputMode {
    Table,
    Json,
}

pub struct JsonOutput;

impl JsonOutput {
    pub fn print_entries(entries: &[&CatalogEntryDetail]) -> io::Result<()> {
        Self::print_json(&entries)
    }

    pub fn print_aggregate(aggregate: &AggregatedDetail) -> io::Result<()> {
        Self::print_json(aggregate)
    }

    fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

pub struct TableOutput;

impl TableOutput {
    /// Pokedex list table: one row per entry, stat columns resolved by name.
    pub fn print_entries(entries: &[&CatalogEntryDetail]) -> io::Result<()> {
        let mut stdout = io::stdout();
        writeln!(
            stdout,
            "{:>5}  {:<14} {:<16} {:>5} {:>5} {:>5} {:>5} {:>6} {:>6} {:>5}",
            "id", "name", "types", "total", "hp", "atk", "def", "sp.atk", "sp.def", "speed"
        )?;
        for entry in entries {
            writeln!(
                stdout,
                "{:>5}  {:<14} {:<16} {:>5} {:>5} {:>5} {:>5} {:>6} {:>6} {:>5}",
                entry.id,
                entry.name,
                entry.types.join(", "),
                entry.stat_total(),
                entry.stat(STAT_NAMES[0]),
                entry.stat(STAT_NAMES[1]),
                entry.stat(STAT_NAMES[2]),
                entry.stat(STAT_NAMES[3]),
                entry.stat(STAT_NAMES[4]),
                entry.stat(STAT_NAMES[5]),
            )?;
        }
        Ok(())
    }

    /// Detail panels for one entry: data, training, breeding, lineage.
    pub fn print_aggregate(aggregate: &AggregatedDetail) -> io::Result<()> {
        let mut stdout = io::stdout();
        let detail = &aggregate.detail;
        let species = &aggregate.species;

        writeln!(stdout, "{} (#{})", detail.name, detail.id)?;
        if let Some(url) = &detail.artwork_url {
            writeln!(stdout, "  artwork:       {url}")?;
        }
        writeln!(stdout, "  types:         {}", detail.types.join(", "))?;
        if let Some(genus) = species.english_genus() {
            writeln!(stdout, "  species:       {genus}")?;
        }
        writeln!(
            stdout,
            "  height:        {:.1} m",
            f64::from(detail.height_decimeters) / 10.0
        )?;
        writeln!(
            stdout,
            "  weight:        {:.1} kg",
            f64::from(detail.weight_hectograms) / 10.0
        )?;
        writeln!(stdout, "  abilities:     {}", detail.abilities.join(", "))?;

        writeln!(stdout, "training")?;
        if let Some(base_experience) = detail.base_experience {
            writeln!(stdout, "  base exp:      {base_experience}")?;
        }
        writeln!(stdout, "  catch rate:    {}", species.capture_rate)?;
        if let Some(base_happiness) = species.base_happiness {
            writeln!(stdout, "  friendship:    {base_happiness}")?;
        }
        writeln!(stdout, "  growth rate:   {}", species.growth_rate)?;

        writeln!(stdout, "breeding")?;
        writeln!(stdout, "  egg groups:    {}", species.egg_groups.join(", "))?;
        match species.gender_split() {
            Some((male, female)) => {
                writeln!(stdout, "  gender:        {male:.1}% male, {female:.1}% female")?
            }
            None => writeln!(stdout, "  gender:        genderless")?,
        }
        if let Some(steps) = species.hatch_steps() {
            writeln!(stdout, "  egg cycles:    {steps} steps")?;
        }

        writeln!(stdout, "stats")?;
        for stat in &detail.stats {
            writeln!(stdout, "  {:<14} {}", stat.name, stat.base_value)?;
        }
        writeln!(stdout, "  {:<14} {}", "total", detail.stat_total())?;

        if aggregate.lineage.len() > 1 {
            writeln!(stdout, "evolution")?;
            let mut line = String::new();
            for (index, stage) in aggregate.lineage.iter().enumerate() {
                if index > 0 {
                    match aggregate.lineage[index - 1].min_level_to_evolve {
                        Some(level) => line.push_str(&format!(" -(lvl {level})-> ")),
                        None => line.push_str(" -> "),
                    }
                }
                line.push_str(&stage.species_name);
            }
            writeln!(stdout, "  {line}")?;
        }
        Ok(())
    }
}
