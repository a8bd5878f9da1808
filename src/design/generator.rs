//! Design generator — samples the factorial under a level-coverage
//! constraint and chunks the sample into labeled choice tasks.

use std::sync::Arc;

use rand::Rng;
use rand::seq::SliceRandom;
use rand::seq::index;
use tracing::{debug, warn};

use super::factorial;
use super::model::{Design, LABEL_ALPHABET_SIZE, Profile, ProfileLabel};
use crate::catalog::Catalog;
use crate::error::ConfigError;

/// Knobs for design generation.
#[derive(Debug, Clone)]
pub struct DesignConfig {
    /// How many factorial rows each respondent sees in total.
    pub sample_size: usize,
    /// Profiles shown side by side in one choice task.
    pub profiles_per_task: usize,
    /// Re-sample attempts before accepting a sample with missing levels.
    pub max_tries: u32,
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            sample_size: 24,
            profiles_per_task: 3,
            max_tries: 100,
        }
    }
}

/// Generates one design per session from a fixed catalog.
pub struct DesignGenerator {
    catalog: Arc<Catalog>,
    config: DesignConfig,
}

impl DesignGenerator {
    /// Build a generator, validating the config against the catalog.
    pub fn new(catalog: Arc<Catalog>, config: DesignConfig) -> Result<Self, ConfigError> {
        if catalog.is_empty() || catalog.level_counts().contains(&0) {
            return Err(ConfigError::InvalidValue {
                key: "catalog".into(),
                message: "every attribute needs at least one level".into(),
            });
        }
        if config.profiles_per_task == 0 || config.profiles_per_task > LABEL_ALPHABET_SIZE {
            return Err(ConfigError::InvalidValue {
                key: "profiles_per_task".into(),
                message: format!("must be between 1 and {LABEL_ALPHABET_SIZE}"),
            });
        }
        if config.sample_size == 0 || config.sample_size % config.profiles_per_task != 0 {
            return Err(ConfigError::InvalidValue {
                key: "sample_size".into(),
                message: format!(
                    "must be a non-zero multiple of profiles_per_task ({})",
                    config.profiles_per_task
                ),
            });
        }
        if config.sample_size > catalog.factorial_size() {
            return Err(ConfigError::InvalidValue {
                key: "sample_size".into(),
                message: format!(
                    "cannot exceed the full factorial ({} rows)",
                    catalog.factorial_size()
                ),
            });
        }
        Ok(Self { catalog, config })
    }

    pub fn generate(&self) -> Design {
        self.generate_with(&mut rand::thread_rng())
    }

    /// Generate with a caller-supplied RNG. Seeded RNGs make tests
    /// deterministic; production goes through [`generate`](Self::generate).
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Design {
        let level_counts = self.catalog.level_counts();
        let total = factorial::size(&level_counts);

        let mut sample = Vec::new();
        let mut covered = false;
        for attempt in 1..=self.config.max_tries {
            sample = self.draw(rng, total, &level_counts);
            if covers_all_levels(&sample, &level_counts) {
                covered = true;
                if attempt > 1 {
                    debug!(attempt, "Reached full level coverage");
                }
                break;
            }
        }
        if !covered {
            // Accepted fallback: the design is still usable, some levels
            // just never get shown to this respondent.
            warn!(
                tries = self.config.max_tries,
                "Level coverage not reached; keeping the last sample"
            );
        }

        let per_task = self.config.profiles_per_task;
        let profiles = sample
            .iter()
            .enumerate()
            .map(|(pos, row)| Profile {
                task: (pos / per_task) as u32 + 1,
                label: ProfileLabel::from_index(pos % per_task)
                    .expect("profiles_per_task fits the label alphabet"),
                levels: row
                    .iter()
                    .zip(self.catalog.attributes())
                    .map(|(&level, attr)| attr.levels[level].clone())
                    .collect(),
            })
            .collect();

        Design::new(profiles, per_task)
    }

    /// Draw `sample_size` distinct factorial rows. The draw is shuffled so
    /// that sampled order, not factorial order, decides task grouping.
    fn draw<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        total: usize,
        level_counts: &[usize],
    ) -> Vec<Vec<usize>> {
        let mut rows = index::sample(rng, total, self.config.sample_size).into_vec();
        rows.shuffle(rng);
        rows.into_iter()
            .map(|row| factorial::decode(row, level_counts))
            .collect()
    }
}

/// True when every level of every attribute appears in at least one row.
fn covers_all_levels(rows: &[Vec<usize>], level_counts: &[usize]) -> bool {
    level_counts.iter().enumerate().all(|(attr, &count)| {
        let mut seen = vec![false; count];
        for row in rows {
            seen[row[attr]] = true;
        }
        seen.into_iter().all(|s| s)
    })
}
