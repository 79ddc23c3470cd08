//! Paper Flight headless demo
//!
//! Flies a scripted session with a seeded wind model and prints the terminal
//! record as JSON. Optional argument: path to a flight config JSON file.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use paper_flight::consts::SIM_DT;
    use paper_flight::hangar::{AirplaneType, FoldType, PlaneSpec};
    use paper_flight::services::{MemoryRecordStore, Services, SystemClock};
    use paper_flight::sim::{Category, Flight, GameMode, TickInput, WindDirective, WindModel};
    use paper_flight::FlightConfig;

    env_logger::init();
    log::info!("Paper Flight (headless) starting...");

    let config = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => FlightConfig::from_json(&json),
            Err(err) => {
                log::warn!("Could not read {path} ({err}), using default config");
                FlightConfig::default()
            }
        },
        None => FlightConfig::default(),
    };

    let spec = PlaneSpec::resolve(AirplaneType::Glider, FoldType::WideWing);
    let store = MemoryRecordStore::new();
    let mut flight = Flight::new(
        GameMode::FreePlay,
        "meadow",
        spec,
        &config,
        WindModel::new(0x5eed),
        SystemClock,
        Services::silent().with_records(store.clone()),
    );

    flight.start();
    let ticks = 10 * 60;
    for i in 0..ticks {
        let t = i as f32 * SIM_DT;
        let mut input = TickInput::tilt((t * 0.8).sin() * 0.5, (t * 0.3).cos() * 0.2);
        if i == 60 {
            input.wind = Some(WindDirective {
                direction_degrees: 30.0,
                strength: 250.0,
                duration: 3.0,
            });
        }
        if i % 90 == 45 {
            input = input.with_contact(Category::FlyingBody, Category::Collectible);
        }
        if i == 400 {
            input = input.with_contact(Category::Obstacle, Category::FlyingBody);
        }
        flight.tick(&input, SIM_DT);
    }

    match flight.end() {
        Some(record) => match serde_json::to_string_pretty(&record) {
            Ok(json) => println!("{json}"),
            Err(err) => log::warn!("Could not serialize record: {err}"),
        },
        None => log::warn!("Session did not end cleanly"),
    }
    log::info!("Stored {} session record(s)", store.records().len());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Library-only on wasm; the host embeds `paper_flight::sim` directly
}
