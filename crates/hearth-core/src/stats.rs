//! End-of-tick statistics.
//!
//! Gene and skill averages describe the established population: they are
//! taken over adults, or over everyone while no adult is alive. An empty
//! world reports zeros for every average.

use std::collections::BTreeMap;

use hearth_agents::{Agent, AgentConfig, Population};
use hearth_types::{Gene, PopulationStats, Skill};
use hearth_world::Terrain;

/// Recompute [`PopulationStats`] from live state.
pub fn compute_stats(population: &Population, terrain: &Terrain, config: &AgentConfig) -> PopulationStats {
    let adults: Vec<&Agent> = population.iter().filter(|a| !a.is_child(config)).collect();
    let sample: Vec<&Agent> = if adults.is_empty() {
        population.iter().collect()
    } else {
        adults
    };

    let gene_averages = Gene::ALL
        .iter()
        .map(|gene| (*gene, mean(sample.iter().map(|a| a.genome.get(*gene)))))
        .collect::<BTreeMap<_, _>>();
    let skill_averages = Skill::ALL
        .iter()
        .map(|skill| (*skill, mean(sample.iter().map(|a| a.skills.get(*skill)))))
        .collect::<BTreeMap<_, _>>();

    PopulationStats {
        population: count(population.len()),
        homes_built: count(terrain.home_count()),
        active_campfires: count(terrain.campfire_count()),
        gene_averages,
        skill_averages,
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0_u32), |(sum, n), v| (sum + v, n.saturating_add(1)));
    if n == 0 { 0.0 } else { sum / f64::from(n) }
}

fn count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use hearth_agents::Genome;
    use hearth_types::{AgentId, Cell};

    use super::*;

    fn population_with_ages(ages: &[(u32, f64)]) -> Population {
        let config = AgentConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut pop = Population::new();
        for (age, vision) in ages {
            let mut genome = Genome::founder(&mut rng);
            genome.vision = *vision;
            let id = pop.spawn(Cell::new(0, 0), genome, &config, &mut rng).unwrap();
            pop.get_mut(id).unwrap().age = *age;
        }
        pop
    }

    #[test]
    fn empty_world_reports_zeros() {
        let terrain = Terrain::new(10, 10).unwrap();
        let stats = compute_stats(&Population::new(), &terrain, &AgentConfig::default());
        assert_eq!(stats.population, 0);
        assert!(stats.gene(Gene::Vision).abs() < f64::EPSILON);
        assert!(stats.skill(Skill::Foraging).abs() < f64::EPSILON);
        assert_eq!(stats.gene_averages.len(), Gene::ALL.len());
    }

    #[test]
    fn averages_use_adults_when_present() {
        let terrain = Terrain::new(10, 10).unwrap();
        let pop = population_with_ages(&[(5, 10.0), (150, 4.0), (300, 6.0)]);
        let stats = compute_stats(&pop, &terrain, &AgentConfig::default());
        assert_eq!(stats.population, 3);
        assert!((stats.gene(Gene::Vision) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn averages_fall_back_to_children() {
        let terrain = Terrain::new(10, 10).unwrap();
        let pop = population_with_ages(&[(5, 3.0), (10, 7.0)]);
        let stats = compute_stats(&pop, &terrain, &AgentConfig::default());
        assert!((stats.gene(Gene::Vision) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn structures_are_counted() {
        let mut terrain = Terrain::new(10, 10).unwrap();
        terrain.build_home(Cell::new(1, 1), AgentId(1), 3);
        terrain.light_campfire(Cell::new(4, 4), 300);
        terrain.light_campfire(Cell::new(6, 6), 300);
        let stats = compute_stats(&Population::new(), &terrain, &AgentConfig::default());
        assert_eq!(stats.homes_built, 1);
        assert_eq!(stats.active_campfires, 2);
    }
}
