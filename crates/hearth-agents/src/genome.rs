//! Heritable traits and their inheritance.
//!
//! A [`Genome`] holds one value per [`Gene`]. Each gene has a fixed
//! [`GeneRange`]; values never leave it. Children take the mean of their
//! parents' values plus a uniform mutation scaled to the gene's span.

use rand::Rng;
use serde::{Deserialize, Serialize};

use hearth_types::Gene;

/// The legal span of a gene and how far it may drift per generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneRange {
    /// Lowest legal value.
    pub min: f64,
    /// Highest legal value.
    pub max: f64,
    /// Mutation draw is `uniform(-rate, rate) * (max - min)`.
    pub mutation_rate: f64,
}

impl GeneRange {
    /// Width of the range.
    pub fn span(self) -> f64 {
        self.max - self.min
    }

    /// Pull `value` into the range.
    pub fn clamp(self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Range table for every gene.
pub const fn gene_range(gene: Gene) -> GeneRange {
    let (min, max, mutation_rate) = match gene {
        Gene::Vision => (3.0, 10.0, 0.1),
        Gene::Speed => (1.0, 3.0, 0.1),
        Gene::Metabolism => (0.5, 2.0, 0.1),
        Gene::Aggression => (0.0, 0.5, 0.1),
        Gene::Builder | Gene::Sociability | Gene::Farming => (0.0, 1.0, 0.1),
        Gene::MatingDrive => (60.0, 130.0, 5.0),
    };
    GeneRange {
        min,
        max,
        mutation_rate,
    }
}

/// Metabolism band for founders, kept low so the first generation survives.
const FOUNDER_METABOLISM: (f64, f64) = (0.5, 0.8);

/// An agent's heritable traits.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    /// Sight radius in cells.
    pub vision: f64,
    /// Steps per move.
    pub speed: f64,
    /// Base energy burned per tick.
    pub metabolism: f64,
    /// Base attack chance.
    pub aggression: f64,
    /// Building tendency.
    pub builder: f64,
    /// Energy required to mate.
    pub mating_drive: f64,
    /// Need for company.
    pub sociability: f64,
    /// Planting tendency.
    pub farming: f64,
}

impl Genome {
    /// Every gene drawn uniformly from its range.
    pub fn random(rng: &mut impl Rng) -> Self {
        let mut draw = |gene: Gene| {
            let range = gene_range(gene);
            rng.random_range(range.min..=range.max)
        };
        Self {
            vision: draw(Gene::Vision),
            speed: draw(Gene::Speed),
            metabolism: draw(Gene::Metabolism),
            aggression: draw(Gene::Aggression),
            builder: draw(Gene::Builder),
            mating_drive: draw(Gene::MatingDrive),
            sociability: draw(Gene::Sociability),
            farming: draw(Gene::Farming),
        }
    }

    /// A random genome with metabolism held in the founder band and speed
    /// redrawn across its full range.
    pub fn founder(rng: &mut impl Rng) -> Self {
        let mut genome = Self::random(rng);
        genome.metabolism = rng.random_range(FOUNDER_METABOLISM.0..=FOUNDER_METABOLISM.1);
        let speed = gene_range(Gene::Speed);
        genome.speed = rng.random_range(speed.min..=speed.max);
        genome
    }

    /// Child genome: per gene, the parents' mean plus mutation, clamped.
    pub fn crossover(a: &Self, b: &Self, rng: &mut impl Rng) -> Self {
        let mut child = *a;
        for gene in Gene::ALL {
            let range = gene_range(gene);
            let mean = (a.get(gene) + b.get(gene)) / 2.0;
            let drift = rng.random_range(-range.mutation_rate..=range.mutation_rate) * range.span();
            child.set(gene, range.clamp(mean + drift));
        }
        child
    }

    /// Value of one gene.
    pub const fn get(&self, gene: Gene) -> f64 {
        match gene {
            Gene::Vision => self.vision,
            Gene::Speed => self.speed,
            Gene::Metabolism => self.metabolism,
            Gene::Aggression => self.aggression,
            Gene::Builder => self.builder,
            Gene::MatingDrive => self.mating_drive,
            Gene::Sociability => self.sociability,
            Gene::Farming => self.farming,
        }
    }

    /// Overwrite one gene, clamped to its range.
    pub fn set(&mut self, gene: Gene, value: f64) {
        let value = gene_range(gene).clamp(value);
        match gene {
            Gene::Vision => self.vision = value,
            Gene::Speed => self.speed = value,
            Gene::Metabolism => self.metabolism = value,
            Gene::Aggression => self.aggression = value,
            Gene::Builder => self.builder = value,
            Gene::MatingDrive => self.mating_drive = value,
            Gene::Sociability => self.sociability = value,
            Gene::Farming => self.farming = value,
        }
    }

    /// Whole cells of sight: the vision gene truncated.
    pub fn vision_radius(&self) -> f64 {
        self.vision.trunc()
    }

    /// Steps taken per move at `factor` of full speed, at least one.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn steps(&self, factor: f64) -> u32 {
        ((self.speed * factor).trunc().max(1.0)) as u32
    }

    /// Whether every gene lies within its range.
    pub fn is_valid(&self) -> bool {
        Gene::ALL.iter().all(|gene| {
            let range = gene_range(*gene);
            let value = self.get(*gene);
            value >= range.min && value <= range.max
        })
    }
}
