//! The in-memory character dataset.
//!
//! The dataset is read once at startup from a flat comma-delimited file without a header row.
//! Columns are positional:
//!
//! | column | field |
//! |---|---|
//! | 0 | name |
//! | 1 | gender |
//! | 3 | birth date (`YYYYMMDD`) |
//! | 6 | grade |
//! | 7 | location |
//! | 9 | hobby (space separated) |
//!
//! Lines with fewer than four columns are ignored, and rows whose name fails
//! [`Entity::is_valid`] never make it into the dataset.
//!
//! > ⚠️ The file is split on plain commas. Quoted fields containing commas are not supported.
//!
//! If the file cannot be read, the built-in roster from [`crate::fallback`] is served instead
//! so the game stays playable. The [`DataSource`] of a [`Dataset`] tells which one was used.

use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

use anyhow::Context;
use rand::{seq::IndexedRandom, Rng};
use tracing::{error, info, instrument, warn};

use crate::{entity::Entity, fallback::fallback_characters};

/// Maximum number of results returned by a non-empty search.
pub const SEARCH_LIMIT: usize = 20;

const NAME_COLUMN: usize = 0;
const GENDER_COLUMN: usize = 1;
const BIRTH_DATE_COLUMN: usize = 3;
const GRADE_COLUMN: usize = 6;
const LOCATION_COLUMN: usize = 7;
const HOBBY_COLUMN: usize = 9;
const MIN_COLUMNS: usize = 4;

/// Where the characters of a [`Dataset`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Read from this file.
    File(PathBuf),
    /// The embedded roster, after the file could not be read.
    Fallback,
    /// Built directly from a list, without any file involved.
    Memory,
}

impl Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "file '{}'", path.display()),
            DataSource::Fallback => write!(f, "embedded roster"),
            DataSource::Memory => write!(f, "memory"),
        }
    }
}

/// Read-only list of valid characters.
#[derive(Debug, Clone)]
pub struct Dataset {
    characters: Vec<Entity>,
    source: DataSource,
}

impl Dataset {
    /// Loads the dataset from `path`, falling back to the embedded roster if it cannot be read.
    #[instrument]
    pub fn load(path: impl AsRef<Path> + std::fmt::Debug) -> Dataset {
        let path = path.as_ref();
        match read_characters(path) {
            Ok(characters) => {
                info!(count = characters.len(), "dataset loaded from {}", path.display());
                if characters.is_empty() {
                    warn!("'{}' holds no valid character", path.display());
                }
                Dataset {
                    characters,
                    source: DataSource::File(path.to_path_buf()),
                }
            }
            Err(e) => {
                error!("failed to read dataset: {e:#}");
                warn!("using the embedded roster instead");
                Dataset::fallback()
            }
        }
    }

    /// The embedded 30 character roster.
    pub fn fallback() -> Dataset {
        Dataset {
            characters: fallback_characters(),
            source: DataSource::Fallback,
        }
    }

    /// Builds a dataset from already parsed records, dropping invalid ones.
    pub fn from_characters(characters: impl IntoIterator<Item = Entity>) -> Dataset {
        Dataset {
            characters: characters.into_iter().filter(Entity::is_valid).collect(),
            source: DataSource::Memory,
        }
    }

    /// Where the characters came from.
    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// True if no character survived loading.
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Every character, in file order.
    pub fn all(&self) -> &[Entity] {
        &self.characters
    }

    /// Case-insensitive substring search on names.
    ///
    /// A blank query returns everything. Otherwise at most [`SEARCH_LIMIT`] matches are returned,
    /// or `limit` if that is smaller, in dataset order.
    pub fn search(&self, query: &str, limit: Option<usize>) -> Vec<Entity> {
        if query.trim().is_empty() {
            return self.characters.clone();
        }
        let limit = limit.map_or(SEARCH_LIMIT, |l| l.min(SEARCH_LIMIT));
        let needle = query.to_lowercase();
        self.characters
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .take(limit)
            .cloned()
            .collect()
    }

    /// One uniformly drawn character, `None` if the dataset is empty.
    pub fn random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Entity> {
        self.characters.choose(rng)
    }
}

fn read_characters(path: &Path) -> anyhow::Result<Vec<Entity>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read '{}'", path.display()))?;
    Ok(parse_characters(&content))
}

/// Parses the positional comma-separated format described in the module documentation.
pub fn parse_characters(content: &str) -> Vec<Entity> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(parse_line)
        .filter(Entity::is_valid)
        .collect()
}

fn parse_line(line: &str) -> Option<Entity> {
    let columns: Vec<&str> = line.split(',').collect();
    if columns.len() < MIN_COLUMNS {
        return None;
    }
    let column = |i: usize| columns.get(i).copied().unwrap_or_default();
    Some(Entity::new(
        column(NAME_COLUMN),
        column(GENDER_COLUMN),
        column(BIRTH_DATE_COLUMN),
        column(GRADE_COLUMN),
        column(LOCATION_COLUMN),
        column(HOBBY_COLUMN),
    ))
}

#[cfg(test)]
mod dataset_tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::entity::NOT_RECORDED;

    const SAMPLE: &str = "\
刘锦东,男,x,20081219,x,x,大二,安徽,x,uuu 足球
孙瑜,女,x,20090330,x,x,大二,江苏,x,摄影

数据未收录,男,x,20080101,x,x,大一,北京,x,
(),男,x,20080101
too,short,row
  ,男,x,20080101
张熙泰,男,x,20081222
";

    #[test]
    fn parses_positional_columns() {
        let characters = parse_characters(SAMPLE);
        let names: Vec<_> = characters.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["刘锦东", "孙瑜", "张熙泰"]);

        let first = &characters[0];
        assert_eq!(first.gender, "男");
        assert_eq!(first.birth_date, "20081219");
        assert_eq!(first.grade, "大二");
        assert_eq!(first.location, "安徽");
        assert_eq!(first.hobby, "uuu 足球");

        // short rows keep missing columns blank
        let last = &characters[2];
        assert_eq!(last.birth_date, "20081222");
        assert_eq!(last.grade, "");
        assert_eq!(last.hobby, "");
    }

    #[test]
    fn sentinel_rows_never_surface() {
        let dataset = Dataset::from_characters(parse_characters(SAMPLE));
        assert!(dataset.all().iter().all(|c| c.name != NOT_RECORDED && c.name != "()"));
        assert_eq!(dataset.len(), 3);
    }

    #[test]
    fn missing_file_falls_back_to_roster() {
        let dataset = Dataset::load("/definitely/not/here/data.csv");
        assert_eq!(dataset.source(), &DataSource::Fallback);
        assert_eq!(dataset.len(), 30);
    }

    #[test]
    fn reads_file_from_disk() {
        let path = std::env::temp_dir().join(format!("guess-classmate-{}.csv", std::process::id()));
        std::fs::write(&path, SAMPLE).unwrap();
        let dataset = Dataset::load(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(dataset.source(), &DataSource::File(path));
        assert_eq!(dataset.len(), 3);
    }

    #[test]
    fn blank_search_returns_everything() {
        let dataset = Dataset::fallback();
        assert_eq!(dataset.search("", None).len(), 30);
        assert_eq!(dataset.search("   ", Some(3)).len(), 30);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let dataset = Dataset::from_characters([
            Entity::new("Alice", "", "", "", "", ""),
            Entity::new("bob", "", "", "", "", ""),
            Entity::new("ALINA", "", "", "", "", ""),
        ]);
        let names: Vec<_> = dataset
            .search("aLi", None)
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["Alice", "ALINA"]);
        assert!(dataset.search("zzz", None).is_empty());
    }

    #[test]
    fn search_is_capped() {
        let dataset = Dataset::from_characters(
            (0..40).map(|i| Entity::new(format!("student{i}"), "", "", "", "", "")),
        );
        let hits = dataset.search("student", None);
        assert_eq!(hits.len(), SEARCH_LIMIT);
        assert_eq!(hits[0].name, "student0");
        assert_eq!(dataset.search("student", Some(5)).len(), 5);
        assert_eq!(dataset.search("student", Some(500)).len(), SEARCH_LIMIT);
    }

    #[test]
    fn random_draw() {
        let mut rng = StdRng::seed_from_u64(7);
        let dataset = Dataset::fallback();
        let drawn = dataset.random(&mut rng).unwrap();
        assert!(dataset.all().contains(drawn));
        assert!(Dataset::from_characters([]).random(&mut rng).is_none());
    }
}
