//! Headless demo: seeds a prey flock and a few predators, runs the
//! simulation at a fixed step and reports summary statistics.

use glam::Vec3;
use rand::Rng;
use tracing::info;

use collective::simulation::agent::AgentState;
use collective::simulation::params::SimParams;
use collective::simulation::world::World;

const NUM_PREY: usize = 200;
const NUM_PREDATORS: usize = 3;
const STEPS: usize = 2000;
const DT: f32 = 1.0 / 60.0;
const REPORT_EVERY: usize = 240;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let params = SimParams::default();
    let spread = params.prey.attraction_radius;
    let mut rng = rand::rng();

    let mut agents = Vec::with_capacity(NUM_PREY + NUM_PREDATORS);
    for _ in 0..NUM_PREY {
        let mut prey = AgentState::prey(random_planar(&mut rng, spread));
        prey.vel = random_planar(&mut rng, 1.0);
        agents.push(prey);
    }
    for _ in 0..NUM_PREDATORS {
        agents.push(AgentState::predator(random_planar(&mut rng, spread)));
    }

    let mut world = World::new(params, agents)?;
    info!(
        cruise_speed = world.params.prey.cruise_speed(),
        "starting collective behaviour simulation"
    );

    for step in 0..STEPS {
        world.tick(DT)?;

        if step % REPORT_EVERY == 0 {
            let mean_speed = world
                .agents
                .iter()
                .map(|a| a.vel.length())
                .sum::<f32>()
                / world.agents.len() as f32;
            info!(
                step,
                time = world.time,
                mean_speed,
                prey = world.prey_count(),
                predators = world.predator_count(),
                "progress"
            );
        }
    }

    info!(time = world.time, "simulation finished");
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn random_planar(rng: &mut impl Rng, extent: f32) -> Vec3 {
    Vec3::new(
        rng.random_range(-extent..extent),
        rng.random_range(-extent..extent),
        0.0,
    )
}
