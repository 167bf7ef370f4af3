use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use parking_sim::simulation::{
    build_demo_lot, AgentId, ControlSensor, ParkingConfig, ParkingLotScheduler,
    ParkingSpawnPoints, CONTROL_SENSOR_PREFIX,
};

#[derive(Parser)]
#[command(name = "parking_sim")]
#[command(about = "Headless parking lot occupancy simulation")]
struct Cli {
    /// Number of parking spaces in the demo lot
    #[arg(long, default_value = "20")]
    spaces: usize,

    /// Number of simulation ticks to run
    #[arg(long, default_value = "1000")]
    ticks: u32,

    /// Time delta per tick in seconds
    #[arg(long, default_value = "0.1")]
    delta: f32,

    /// Target fill-rate of the lot
    #[arg(long, default_value = "0.8")]
    max_fill_rate: f32,

    /// Seconds an agent stays parked before it may leave on its own
    #[arg(long, default_value = "30")]
    min_parked: f32,

    /// Spawn attempts per minute
    #[arg(long)]
    spawn_rate: Option<u32>,

    /// Despawn attempts per minute
    #[arg(long)]
    despawn_rate: Option<u32>,

    /// Base traffic pool size (slack for the lot is added on top)
    #[arg(long, default_value = "10")]
    base_pool: usize,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

/// Stand-in for the sensor on the controlled vehicle; just logs
struct LoggingControlSensor;

impl ControlSensor for LoggingControlSensor {
    fn name(&self) -> &str {
        CONTROL_SENSOR_PREFIX
    }

    fn do_not_track(&mut self, agent: AgentId) {
        info!("Control sensor stops tracking {}", agent);
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    run_headless(&cli)
}

/// Run the simulation in headless mode (no graphics)
fn run_headless(cli: &Cli) -> Result<()> {
    let mut config = ParkingConfig {
        max_fill_rate: cli.max_fill_rate,
        min_parked_duration: cli.min_parked,
        base_pool_size: cli.base_pool,
        ..Default::default()
    };
    if let Some(rate) = cli.spawn_rate {
        config.set_spawn_rate(rate).context("Invalid spawn rate")?;
    }
    if let Some(rate) = cli.despawn_rate {
        config.set_despawn_rate(rate).context("Invalid despawn rate")?;
    }

    let lot = build_demo_lot(cli.spaces).context("Failed to build demo lot")?;
    let registry = Box::new(lot.registry);
    let lanes = Box::new(lot.lanes);
    let scheduler = match cli.seed {
        Some(seed) => ParkingLotScheduler::new_with_seed(
            config,
            registry,
            Box::new(ParkingSpawnPoints::new_with_seed(seed)),
            lanes,
            seed,
        ),
        None => ParkingLotScheduler::new(
            config,
            registry,
            Box::new(ParkingSpawnPoints::new()),
            lanes,
        ),
    };
    let mut scheduler = scheduler.context("Invalid parking configuration")?;
    scheduler.attach_control_sensor(Box::new(LoggingControlSensor));

    info!("Running parking simulation in headless mode...");
    info!("Ticks: {}, Delta: {}s", cli.ticks, cli.delta);

    scheduler.set_npc_on_map();
    scheduler.enable_workers(true);
    scheduler.log_summary();

    // Summarise every ten seconds of simulated time
    let ticks_per_report = (10.0 / cli.delta).ceil().max(1.0) as u32;
    for tick in 1..=cli.ticks {
        scheduler.tick(cli.delta);
        if tick % ticks_per_report == 0 {
            scheduler.log_summary();
        }
    }

    info!("=== SIMULATION COMPLETE ===");
    scheduler.log_summary();
    Ok(())
}
