//! CSV drill and goalie profiles on disk.
//!
//! Layout under the store root:
//!
//! ```text
//! drill_profiles/<drill>/<drill>.csv     index,zone,speed,rof (one header row)
//! goalie_profiles/<goalie>/<goalie>.csv  "<Drill Display Name>",MM/DD/YYYY
//! ```

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};

use crate::aim::Zone;
use crate::config::{Mph, Seconds};
use crate::error::{truncated, ProfileError, Result};
use crate::sequencing::{DrillDefinition, ShotCommand};

use super::SessionRecorder;

/// Date format used in goalie logs.
const LOG_DATE_FORMAT: &str = "%m/%d/%Y";

/// Drill and goalie profiles rooted at one directory.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    root: PathBuf,
}

impl ProfileStore {
    /// Store rooted at `root`.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of a drill profile.
    pub fn drill_path(&self, drill_name: &str) -> PathBuf {
        self.root
            .join("drill_profiles")
            .join(drill_name)
            .join(format!("{drill_name}.csv"))
    }

    /// Path of a goalie log.
    pub fn goalie_path(&self, goalie: &str) -> PathBuf {
        self.root
            .join("goalie_profiles")
            .join(goalie)
            .join(format!("{goalie}.csv"))
    }

    /// Read a drill profile.
    ///
    /// Shots keep file order. The rate of fire is taken from the first row.
    ///
    /// # Errors
    ///
    /// `ProfileError::Missing` if the file does not exist,
    /// `ProfileError::Malformed` for a bad row, `ProfileError::EmptyDrill` if
    /// there are no rows after the header.
    pub fn load_drill(&self, drill_name: &str) -> Result<DrillDefinition> {
        let path = self.drill_path(drill_name);
        let mut reader = match csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(&path)
        {
            Ok(reader) => reader,
            Err(err) => return Err(open_error(&path, err).into()),
        };

        let mut drill: Option<DrillDefinition> = None;
        let mut seen: Vec<String> = Vec::new();

        for (i, record) in reader.records().enumerate() {
            // header is row 1
            let row = i + 2;
            let record = record.map_err(|e| ProfileError::Io(truncated(&e.to_string())))?;
            if record.len() < 4 {
                return Err(malformed(row, "expected index,zone,speed,rof").into());
            }

            let index = &record[0];
            if seen.iter().any(|s| s == index) {
                return Err(malformed(row, "duplicate ball index").into());
            }
            seen.push(index.to_string());

            let zone = Zone::from_code(&record[1]).ok_or_else(|| malformed(row, "unknown zone"))?;
            let speed: f32 = record[2]
                .parse()
                .map_err(|_| malformed(row, "speed is not a number"))?;
            let shot = ShotCommand::new(zone, Mph(speed))
                .map_err(|_| malformed(row, "speed must be positive"))?;

            if drill.is_none() {
                let rof: f32 = record[3]
                    .parse()
                    .map_err(|_| malformed(row, "rate of fire is not a number"))?;
                if !rof.is_finite() || rof < 0.0 {
                    return Err(malformed(row, "rate of fire must not be negative").into());
                }
                drill = Some(DrillDefinition::new(drill_name, Seconds(rof))?);
            }
            if let Some(drill) = drill.as_mut() {
                drill.push(shot)?;
            }
        }

        let drill = drill.ok_or(ProfileError::EmptyDrill)?;
        log::info!(
            "loaded drill '{}' ({} shots) from {}",
            drill.name(),
            drill.len(),
            path.display()
        );
        Ok(drill)
    }

    /// Append a completion row dated `date` to the goalie log.
    pub fn record_completion_on(&mut self, goalie: &str, drill_name: &str, date: NaiveDate) -> Result<()> {
        let path = self.goalie_path(goalie);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| io_error(&e))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| io_error(&e))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        let date = date.format(LOG_DATE_FORMAT).to_string();
        writer
            .write_record([display_name(drill_name).as_str(), date.as_str()])
            .map_err(|e| ProfileError::Io(truncated(&e.to_string())))?;
        writer.flush().map_err(|e| io_error(&e))?;

        log::debug!("appended '{}' to {}", drill_name, path.display());
        Ok(())
    }

    /// Every completion logged for `goalie`, oldest first.
    pub fn completions(&self, goalie: &str) -> Result<Vec<(String, NaiveDate)>> {
        let path = self.goalie_path(goalie);
        let mut reader = match csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(&path)
        {
            Ok(reader) => reader,
            Err(err) => return Err(open_error(&path, err).into()),
        };

        let mut out = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let row = i + 1;
            let record = record.map_err(|e| ProfileError::Io(truncated(&e.to_string())))?;
            if record.len() < 2 {
                return Err(malformed(row, "expected drill,date").into());
            }
            let date = NaiveDate::parse_from_str(&record[1], LOG_DATE_FORMAT)
                .map_err(|_| malformed(row, "date is not MM/DD/YYYY"))?;
            out.push((record[0].to_string(), date));
        }
        Ok(out)
    }
}

impl SessionRecorder for ProfileStore {
    fn record_completion(&mut self, goalie: &str, drill_name: &str) -> Result<()> {
        let today = Local::now().date_naive();
        self.record_completion_on(goalie, drill_name, today)
    }
}

/// Human-readable drill name: `_` becomes a space and each word is
/// capitalized (`left_post_warmup` -> `Left Post Warmup`).
pub fn display_name(drill_name: &str) -> String {
    let mut out = String::with_capacity(drill_name.len());
    let mut word_start = true;
    for c in drill_name.chars() {
        let c = if c == '_' { ' ' } else { c };
        if c.is_alphabetic() {
            if word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            word_start = false;
        } else {
            out.push(c);
            word_start = true;
        }
    }
    out
}

fn malformed(row: usize, reason: &str) -> ProfileError {
    ProfileError::Malformed {
        row,
        reason: truncated(reason),
    }
}

fn io_error(err: &io::Error) -> ProfileError {
    ProfileError::Io(truncated(&err.to_string()))
}

fn open_error(path: &Path, err: csv::Error) -> ProfileError {
    match err.kind() {
        csv::ErrorKind::Io(io) if io.kind() == io::ErrorKind::NotFound => {
            ProfileError::Missing(truncated(&path.display().to_string()))
        }
        _ => ProfileError::Io(truncated(&err.to_string())),
    }
}
