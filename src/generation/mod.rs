//! Random instance generation.
//!
//! Used by the binary's `generate` subcommand and by tests which need many instances. The
//! generator is deterministic: the same [`GeneratorConfig`] always produces the same
//! [`Instance`].

use std::num::NonZero;

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::Rng;
use rand::SeedableRng;

use crate::model::Instance;
use crate::model::Step;
use crate::model::User;
use crate::warrant_assert_simple;

/// Dimensions, per-family constraint counts, and the seed of one generated instance.
#[derive(Debug, Clone, Copy)]
pub struct GeneratorConfig {
    step_count: usize,
    user_count: usize,
    authorisation_count: usize,
    separation_of_duty_count: usize,
    binding_of_duty_count: usize,
    at_most_k_count: usize,
    one_team_count: usize,
    seed: u64,
}

impl GeneratorConfig {
    /// A configuration without any constraints and with a fixed default seed.
    pub fn new(step_count: usize, user_count: usize) -> GeneratorConfig {
        warrant_assert_simple!(
            step_count >= 1 && user_count >= 1,
            "generated instances need at least one step and one user"
        );
        GeneratorConfig {
            step_count,
            user_count,
            authorisation_count: 0,
            separation_of_duty_count: 0,
            binding_of_duty_count: 0,
            at_most_k_count: 0,
            one_team_count: 0,
            seed: 42,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_authorisations(mut self, count: usize) -> Self {
        self.authorisation_count = count;
        self
    }

    pub fn with_separation_of_duty(mut self, count: usize) -> Self {
        self.separation_of_duty_count = count;
        self
    }

    pub fn with_binding_of_duty(mut self, count: usize) -> Self {
        self.binding_of_duty_count = count;
        self
    }

    pub fn with_at_most_k(mut self, count: usize) -> Self {
        self.at_most_k_count = count;
        self
    }

    pub fn with_one_team(mut self, count: usize) -> Self {
        self.one_team_count = count;
        self
    }

    /// Generates the instance described by this configuration.
    pub fn generate(&self) -> Instance {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut instance = Instance::new(self.step_count, self.user_count);
        let steps: Vec<Step> = instance.steps().collect();
        let users: Vec<User> = instance.users().collect();

        for _ in 0..self.authorisation_count {
            let user = users[rng.gen_range(0..users.len())];
            let size = rng.gen_range(1..=steps.len());
            let authorised: Vec<Step> =
                steps.choose_multiple(&mut rng, size).copied().collect();
            instance.add_authorisations(user, authorised);
        }

        if self.separation_of_duty_count > 0
            || self.binding_of_duty_count > 0
            || self.at_most_k_count > 0
        {
            warrant_assert_simple!(
                self.step_count >= 2,
                "inter-step constraints need at least two steps"
            );
        }
        for _ in 0..self.separation_of_duty_count {
            let (first, second) = step_pair(&steps, &mut rng);
            instance.add_separation_of_duty(first, second);
        }
        for _ in 0..self.binding_of_duty_count {
            let (first, second) = step_pair(&steps, &mut rng);
            instance.add_binding_of_duty(first, second);
        }
        for _ in 0..self.at_most_k_count {
            let k = rng.gen_range(1..=(self.step_count - 1).min(2)) as u32;
            let size = rng.gen_range(k as usize + 1..=steps.len());
            let constraint_steps: Vec<Step> =
                steps.choose_multiple(&mut rng, size).copied().collect();
            instance.add_at_most_k(
                NonZero::new(k).unwrap_or(NonZero::<u32>::MIN),
                constraint_steps,
            );
        }
        for _ in 0..self.one_team_count {
            let step_size = rng.gen_range(1..=steps.len().min(2));
            let constraint_steps: Vec<Step> =
                steps.choose_multiple(&mut rng, step_size).copied().collect();
            let team_count = rng.gen_range(1..=users.len().min(3));
            let pool_size = rng.gen_range(team_count..=users.len());
            let pool: Vec<User> =
                users.choose_multiple(&mut rng, pool_size).copied().collect();
            // Round-robin distribution keeps the teams disjoint and non-empty.
            let mut teams: Vec<Vec<User>> = vec![Vec::new(); team_count];
            for (position, user) in pool.into_iter().enumerate() {
                teams[position % team_count].push(user);
            }
            instance.add_one_team(constraint_steps, teams);
        }

        instance
    }
}

fn step_pair(steps: &[Step], rng: &mut SmallRng) -> (Step, Step) {
    let chosen: Vec<Step> = steps.choose_multiple(rng, 2).copied().collect();
    (chosen[0], chosen[1])
}
