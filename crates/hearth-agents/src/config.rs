//! Fixed constants for agent behavior.
//!
//! Every threshold the vitals, decision, and action code compares against
//! lives in [`AgentConfig`], grouped by the stage of the agent update that
//! reads it. The simulation builds one with [`Default`] at start-up and
//! hands out shared references; tests override individual fields.

use serde::Serialize;

use hearth_types::Skill;

/// All agent constants.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AgentConfig {
    /// Ages and starting values.
    pub life: LifeConfig,
    /// Per-tick needs: metabolism, buffs, social drift, struggle.
    pub needs: NeedsConfig,
    /// Decision thresholds.
    pub decision: DecisionConfig,
    /// Magnitudes applied by actions.
    pub actions: ActionConfig,
    /// Per-skill ceilings.
    pub skill_caps: SkillCaps,
}

// ---------------------------------------------------------------------------
// Life
// ---------------------------------------------------------------------------

/// Ages, death lines, and what a newborn starts with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LifeConfig {
    /// Age at which a child becomes an adult (default: 100).
    pub adult_age: u32,
    /// Age at which an adult becomes old (default: 1500).
    pub old_age: u32,
    /// Age at which every agent dies (default: 2000).
    pub max_age: u32,
    /// Old agents below this energy die of frailty (default: 100).
    pub frailty_energy: f64,
    /// Children below this energy starve (default: 50).
    pub child_starvation_energy: f64,
    /// Energy of a new agent (default: 150).
    pub starting_energy: f64,
    /// Love of a new agent and the love ceiling (default: 10).
    pub starting_love: f64,
    /// Social meter ceiling (default: 100).
    pub max_social: f64,
    /// Lowest starting social meter (default: 30).
    pub starting_social_min: f64,
    /// Highest starting social meter (default: 80).
    pub starting_social_max: f64,
    /// Most food seeds a new agent may carry (default: 2).
    pub starting_seeds_max: u32,
    /// Most wood seeds a new agent may carry (default: 1).
    pub starting_wood_seeds_max: u32,
    /// Food an agent can carry (default: 2).
    pub food_capacity: u32,
    /// Wood an agent can carry (default: 3).
    pub wood_capacity: u32,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            adult_age: 100,
            old_age: 1500,
            max_age: 2000,
            frailty_energy: 100.0,
            child_starvation_energy: 50.0,
            starting_energy: 150.0,
            starting_love: 10.0,
            max_social: 100.0,
            starting_social_min: 30.0,
            starting_social_max: 80.0,
            starting_seeds_max: 2,
            starting_wood_seeds_max: 1,
            food_capacity: 2,
            wood_capacity: 3,
        }
    }
}

// ---------------------------------------------------------------------------
// Needs
// ---------------------------------------------------------------------------

/// Constants for the per-tick vitals pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NeedsConfig {
    /// Extra metabolism per dependent child (default: 0.2).
    pub parental_cost_per_child: f64,
    /// Metabolism multiplier on an own or family home (default: 0.5).
    pub home_metabolism_factor: f64,
    /// Energy regained per tick at home (default: 2).
    pub home_energy_regen: f64,
    /// Home regen stops at this energy (default: 150).
    pub home_energy_ceiling: f64,
    /// Social gained per tick at home (default: 0.5).
    pub home_social_gain: f64,
    /// Metabolism multiplier while a social buff runs (default: 0.8).
    pub social_buff_metabolism_factor: f64,
    /// Distance at which a campfire warms an agent (default: 2).
    pub cozy_radius: f64,
    /// Metabolism multiplier near a campfire (default: 0.9).
    pub campfire_metabolism_factor: f64,
    /// Social gained per tick near a campfire (default: 0.5).
    pub campfire_social_gain: f64,
    /// Isolation costs `sociability * factor` social per tick (default: 0.5).
    pub isolation_social_factor: f64,
    /// Social gained per tick in company (default: 0.1).
    pub company_social_gain: f64,
    /// Energy below which an agent struggles (default: 30).
    pub struggle_energy: f64,
    /// Social below which an agent struggles (default: 20).
    pub struggle_social: f64,
    /// Love lost per struggling tick (default: 2.5).
    pub struggle_love_loss: f64,
    /// Skill drift toward the knowledge pool per tick (default: 0.0001).
    pub library_learning_rate: f64,
}

impl Default for NeedsConfig {
    fn default() -> Self {
        Self {
            parental_cost_per_child: 0.2,
            home_metabolism_factor: 0.5,
            home_energy_regen: 2.0,
            home_energy_ceiling: 150.0,
            home_social_gain: 0.5,
            social_buff_metabolism_factor: 0.8,
            cozy_radius: 2.0,
            campfire_metabolism_factor: 0.9,
            campfire_social_gain: 0.5,
            isolation_social_factor: 0.5,
            company_social_gain: 0.1,
            struggle_energy: 30.0,
            struggle_social: 20.0,
            struggle_love_loss: 2.5,
            library_learning_rate: 0.0001,
        }
    }
}

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// Thresholds read by the decision engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionConfig {
    /// Hopeless below this energy (default: 20).
    pub hopeless_energy: f64,
    /// Hopeless below this social (default: 10).
    pub hopeless_social: f64,
    /// Adults forage below this energy (default: 70).
    pub forage_energy_adult: f64,
    /// Children forage below this energy (default: 100).
    pub forage_energy_child: f64,
    /// Carried food is eaten below this energy (default: 150).
    pub eat_energy_ceiling: f64,
    /// Energy-conserving genomes have metabolism below this (default: 0.8).
    pub conserve_metabolism: f64,
    /// Energy-conserving genomes forage first below this energy (default: 100).
    pub conserve_energy: f64,
    /// Seek company below this social (default: 60).
    pub seek_social_below: f64,
    /// Only agents with sociability above this seek company (default: 0.2).
    pub seek_social_sociability: f64,
    /// Wood for a home or campfire before skill discounts (default: 3).
    pub structure_wood_cost: u32,
    /// Wood saved per building skill point (default: 0.5).
    pub building_discount: f64,
    /// Community radius is vision plus this (default: 5).
    pub community_radius_bonus: f64,
    /// Sociability above which an agent builds near others (default: 0.5).
    pub communal_sociability: f64,
    /// Planting needs more energy than this (default: 80).
    pub planting_energy: f64,
    /// Walk home before planting when farther than this (default: 5).
    pub farm_home_radius: f64,
    /// Campfires need more energy than this (default: 120).
    pub campfire_energy: f64,
    /// Campfires need more social than this (default: 50).
    pub campfire_social: f64,
    /// Campfires need a builder gene above this (default: 0.5).
    pub campfire_builder: f64,
    /// No campfire is built within this distance of another (default: 5).
    pub campfire_spacing: f64,
    /// Sharing needs more energy than this (default: 100).
    pub share_energy: f64,
    /// Sharing needs more social than this (default: 50).
    pub share_social: f64,
    /// Wood beyond this count counts as surplus (default: 3).
    pub share_wood_surplus: u32,
    /// Neighbors below this energy with no food are needy (default: 70).
    pub needy_energy: f64,
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self {
            hopeless_energy: 20.0,
            hopeless_social: 10.0,
            forage_energy_adult: 70.0,
            forage_energy_child: 100.0,
            eat_energy_ceiling: 150.0,
            conserve_metabolism: 0.8,
            conserve_energy: 100.0,
            seek_social_below: 60.0,
            seek_social_sociability: 0.2,
            structure_wood_cost: 3,
            building_discount: 0.5,
            community_radius_bonus: 5.0,
            communal_sociability: 0.5,
            planting_energy: 80.0,
            farm_home_radius: 5.0,
            campfire_energy: 120.0,
            campfire_social: 50.0,
            campfire_builder: 0.5,
            campfire_spacing: 5.0,
            share_energy: 100.0,
            share_social: 50.0,
            share_wood_surplus: 3,
            needy_energy: 70.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// Magnitudes applied when actions execute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionConfig {
    /// Actions on a target need a distance below this (default: 2).
    pub interaction_range: f64,
    /// Energy per movement step before navigation discount (default: 0.05).
    pub step_energy: f64,
    /// Navigation gained per step (default: 0.01).
    pub navigation_gain: f64,
    /// Step cost shrinks by this per navigation point (default: 0.15).
    pub navigation_discount: f64,
    /// Step cost never drops below this fraction (default: 0.25).
    pub step_cost_floor: f64,
    /// Chance to keep the current heading while exploring (default: 0.8).
    pub explore_persistence: f64,
    /// Speed factor for slow searching moves (default: 0.5).
    pub slow_speed_factor: f64,
    /// Energy from one food before skill bonus (default: 120).
    pub food_energy: f64,
    /// Extra energy per foraging point (default: 20).
    pub foraging_energy_bonus: f64,
    /// Foraging gained per meal (default: 0.1).
    pub foraging_gain: f64,
    /// Love gained per meal (default: 2.5).
    pub eat_love_gain: f64,
    /// Base chance a meal yields a seed (default: 0.1).
    pub seed_chance_base: f64,
    /// Extra seed chance per foraging point (default: 0.05).
    pub seed_chance_per_skill: f64,
    /// Chance collected wood yields a wood seed (default: 0.5).
    pub wood_seed_chance: f64,
    /// Building gained per home (default: 0.5).
    pub build_home_gain: f64,
    /// Building gained per campfire or repair (default: 0.2).
    pub build_minor_gain: f64,
    /// Energy spent planting (default: 10).
    pub plant_energy: f64,
    /// Farming gained per planting (default: 0.2).
    pub farming_gain: f64,
    /// Attack cost before combat discount (default: 10).
    pub attack_cost: f64,
    /// Attack cost floor (default: 2).
    pub attack_cost_floor: f64,
    /// Energy returned to the attacker (default: 10).
    pub attack_rebate: f64,
    /// Damage before combat bonus (default: 15).
    pub attack_damage: f64,
    /// Extra damage per combat point (default: 8).
    pub attack_damage_per_skill: f64,
    /// Combat gained per attack (default: 0.2).
    pub combat_gain: f64,
    /// Love lost per attack (default: 5).
    pub attack_love_loss: f64,
    /// Attacks need more energy than this (default: 80).
    pub aggression_energy: f64,
    /// Aggression gained per struggling tick (default: 0.0005).
    pub struggle_aggression: f64,
    /// Cap on struggle aggression (default: 0.5).
    pub struggle_aggression_cap: f64,
    /// Energy each parent spends mating (default: 10).
    pub mate_energy: f64,
    /// Ticks before a parent can mate again (default: 65).
    pub mate_cooldown: u32,
    /// Fewest children per litter (default: 1).
    pub litter_min: u32,
    /// Most children per litter before the bonus roll (default: 3).
    pub litter_max: u32,
    /// Chance of one extra child (default: 0.2).
    pub litter_bonus_chance: f64,
    /// Absolute litter ceiling (default: 4).
    pub litter_cap: u32,
    /// Parents' social after mating (default: 100).
    pub mate_social: f64,
    /// Contentment ticks after mating (default: 25).
    pub mate_contentment: u32,
    /// Energy each party spends talking (default: 1).
    pub talk_energy: f64,
    /// Social skill gained per conversation (default: 0.2).
    pub talk_skill_gain: f64,
    /// Initiator's base social gain (default: 50).
    pub talk_initiator_gain: f64,
    /// Initiator's social gain per social point (default: 10).
    pub talk_initiator_per_skill: f64,
    /// Partner's base social gain (default: 20).
    pub talk_partner_gain: f64,
    /// Partner's social gain per social point (default: 5).
    pub talk_partner_per_skill: f64,
    /// Social buff ticks after a conversation (default: 20).
    pub talk_buff: u32,
    /// Love gained per conversation (default: 5).
    pub talk_love_gain: f64,
    /// Skill passed to the weaker party per conversation (default: 0.1).
    pub teach_rate: f64,
    /// Teachers above this level feed the knowledge pool (default: 2).
    pub teach_contribution_threshold: f64,
    /// Pool gain per qualifying lesson (default: 0.05).
    pub knowledge_contribution: f64,
    /// Combined seeds needed for communal planting (default: 3).
    pub communal_seed_total: u32,
    /// Chance a content agent heads to the library (default: 0.2).
    pub library_visit_chance: f64,
    /// Library trips only start farther than this (default: 5).
    pub library_visit_radius: f64,
    /// Social skill gained at the library (default: 0.1).
    pub library_social_gain: f64,
    /// Content agents have more energy than this (default: 100).
    pub content_energy: f64,
    /// Content agents have more social than this (default: 80).
    pub content_social: f64,
    /// Love regained per hopeless tick (default: 0.5).
    pub hopeless_love_gain: f64,
}

impl Default for ActionConfig {
    fn default() -> Self {
        Self {
            interaction_range: 2.0,
            step_energy: 0.05,
            navigation_gain: 0.01,
            navigation_discount: 0.15,
            step_cost_floor: 0.25,
            explore_persistence: 0.8,
            slow_speed_factor: 0.5,
            food_energy: 120.0,
            foraging_energy_bonus: 20.0,
            foraging_gain: 0.1,
            eat_love_gain: 2.5,
            seed_chance_base: 0.1,
            seed_chance_per_skill: 0.05,
            wood_seed_chance: 0.5,
            build_home_gain: 0.5,
            build_minor_gain: 0.2,
            plant_energy: 10.0,
            farming_gain: 0.2,
            attack_cost: 10.0,
            attack_cost_floor: 2.0,
            attack_rebate: 10.0,
            attack_damage: 15.0,
            attack_damage_per_skill: 8.0,
            combat_gain: 0.2,
            attack_love_loss: 5.0,
            aggression_energy: 80.0,
            struggle_aggression: 0.0005,
            struggle_aggression_cap: 0.5,
            mate_energy: 10.0,
            mate_cooldown: 65,
            litter_min: 1,
            litter_max: 3,
            litter_bonus_chance: 0.2,
            litter_cap: 4,
            mate_social: 100.0,
            mate_contentment: 25,
            talk_energy: 1.0,
            talk_skill_gain: 0.2,
            talk_initiator_gain: 50.0,
            talk_initiator_per_skill: 10.0,
            talk_partner_gain: 20.0,
            talk_partner_per_skill: 5.0,
            talk_buff: 20,
            talk_love_gain: 5.0,
            teach_rate: 0.1,
            teach_contribution_threshold: 2.0,
            knowledge_contribution: 0.05,
            communal_seed_total: 3,
            library_visit_chance: 0.2,
            library_visit_radius: 5.0,
            library_social_gain: 0.1,
            content_energy: 100.0,
            content_social: 80.0,
            hopeless_love_gain: 0.5,
        }
    }
}

// ---------------------------------------------------------------------------
// Skill caps
// ---------------------------------------------------------------------------

/// Ceiling for each skill. Every gain is clamped to these.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillCaps {
    /// Foraging ceiling (default: 10).
    pub foraging: f64,
    /// Social ceiling (default: 10).
    pub social: f64,
    /// Building ceiling (default: 4).
    pub building: f64,
    /// Navigation ceiling (default: 5).
    pub navigation: f64,
    /// Combat ceiling (default: 10).
    pub combat: f64,
    /// Farming ceiling (default: 10).
    pub farming: f64,
}

impl Default for SkillCaps {
    fn default() -> Self {
        Self {
            foraging: 10.0,
            social: 10.0,
            building: 4.0,
            navigation: 5.0,
            combat: 10.0,
            farming: 10.0,
        }
    }
}

impl SkillCaps {
    /// Ceiling for `skill`.
    pub const fn cap(&self, skill: Skill) -> f64 {
        match skill {
            Skill::Foraging => self.foraging,
            Skill::Social => self.social,
            Skill::Building => self.building,
            Skill::Navigation => self.navigation,
            Skill::Combat => self.combat,
            Skill::Farming => self.farming,
        }
    }
}

impl AgentConfig {
    /// Wood needed for a home or campfire at a given building level:
    /// the base cost minus `floor(building * discount)`, at least one.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn structure_cost(&self, building: f64) -> u32 {
        let discount = (building * self.decision.building_discount).floor().max(0.0) as u32;
        self.decision
            .structure_wood_cost
            .saturating_sub(discount)
            .max(1)
    }
}
