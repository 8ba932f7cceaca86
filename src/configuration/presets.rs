//! Built-in scenarios, so the binary runs without a YAML file.
//!
//! Dimensions follow the usual screen setup: an 800x600 (or 1000x700) window
//! with `sim_min_width` simulation units across its shorter side.

use super::config::{
    BeadsConfig, BodyConfig, BoundsConfig, BroadPhaseConfig, EngineConfig, KindConfig,
    ParametersConfig, RandomBodiesConfig, ScenarioConfig, SegmentConfig, WireConfig,
};

pub const PRESET_NAMES: [&str; 3] = ["house", "wire", "ball_pit"];

/// Look a preset up by name
pub fn preset(name: &str) -> Option<ScenarioConfig> {
    match name {
        "house" => Some(house()),
        "wire" => Some(wire_beads()),
        "ball_pit" | "ball-pit" => Some(ball_pit(200)),
        _ => None,
    }
}

/// Sim-space size of a `width` x `height` pixel screen showing at least
/// `sim_min_width` units across its shorter side
fn sim_size(width: f64, height: f64, sim_min_width: f64) -> (f64, f64) {
    let scale = width.min(height) / sim_min_width;
    (width / scale, height / scale)
}

fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> SegmentConfig {
    SegmentConfig {
        p1: vec![x1, y1],
        p2: vec![x2, y2],
    }
}

/// Ten balls launched from the lower-left corner at increasing speed and
/// angle, over a house made of line segments
pub fn house() -> ScenarioConfig {
    let (sim_width, sim_height) = sim_size(800.0, 600.0, 20.0);

    let speeds = [10.0, 12.0, 14.0, 16.0, 18.0, 20.0, 22.0, 24.0, 26.0, 28.0];
    let angles = [30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0, 110.0, 120.0];
    let bodies = speeds
        .iter()
        .zip(angles.iter())
        .map(|(&speed, &angle)| BodyConfig {
            x: vec![0.2, 0.2],
            v: None,
            speed: Some(speed),
            angle_deg: Some(angle),
            m: 1.0,
            radius: 0.3,
            color: None,
        })
        .collect();

    let cx = sim_width / 2.0;
    let (house_width, house_height, roof_height) = (8.0, 5.0, 2.5);
    let (y1, y2) = (0.0, house_height);
    let (x1, x2) = (cx - house_width / 2.0, cx + house_width / 2.0);

    let segments = vec![
        // walls and floor
        seg(x1, y1, x1, y2),
        seg(x2, y1, x2, y2),
        seg(x1, y1, x2, y1),
        // roof
        seg(x1, y2, cx, y2 + roof_height),
        seg(cx, y2 + roof_height, x2, y2),
        // door
        seg(cx - 1.0, y1, cx - 1.0, y1 + 2.5),
        seg(cx + 1.0, y1, cx + 1.0, y1 + 2.5),
        seg(cx - 1.0, y1 + 2.5, cx + 1.0, y1 + 2.5),
        // window
        seg(cx - 2.0, y1 + 3.0, cx - 2.0, y1 + 4.0),
        seg(cx - 1.0, y1 + 3.0, cx - 1.0, y1 + 4.0),
        seg(cx - 2.0, y1 + 3.0, cx - 1.0, y1 + 3.0),
        seg(cx - 2.0, y1 + 4.0, cx - 1.0, y1 + 4.0),
    ];

    ScenarioConfig {
        name: Some("house".to_string()),
        engine: EngineConfig {
            kind: KindConfig::FreeFlight,
            broad_phase: BroadPhaseConfig::BruteForce,
            vertical_filter: false,
        },
        parameters: ParametersConfig {
            gravity: vec![0.0, -9.8],
            air_resistance: 0.025,
            bounciness: 0.95,
            kick_force: 10.0,
            kick_force_min: 0.0,
            kick_force_max: 30.0,
            ..ParametersConfig::default()
        },
        bounds: Some(BoundsConfig {
            width: sim_width,
            height: sim_height,
        }),
        wire: None,
        segments,
        bodies,
        random_bodies: None,
        beads: None,
        events: Vec::new(),
    }
}

/// Five beads on a wire of radius 0.8, 100 sub-steps per tick
pub fn wire_beads() -> ScenarioConfig {
    let sim_min_width = 2.0;
    let (sim_width, sim_height) = sim_size(800.0, 600.0, sim_min_width);

    ScenarioConfig {
        name: Some("wire".to_string()),
        engine: EngineConfig {
            kind: KindConfig::Wire,
            broad_phase: BroadPhaseConfig::BruteForce,
            vertical_filter: false,
        },
        parameters: ParametersConfig {
            substeps: 100,
            gravity: vec![0.0, -10.0],
            restitution: 1.0,
            ..ParametersConfig::default()
        },
        bounds: Some(BoundsConfig {
            width: sim_width,
            height: sim_height,
        }),
        wire: Some(WireConfig {
            center: vec![sim_width / 2.0, sim_height / 2.0],
            radius: sim_min_width * 0.4,
        }),
        segments: Vec::new(),
        bodies: Vec::new(),
        random_bodies: None,
        beads: Some(BeadsConfig {
            count: 5,
            first_radius: 0.1,
            radius_min: 0.05,
            radius_max: 0.15,
            color: Some([255, 0, 0]),
        }),
        events: Vec::new(),
    }
}

/// `count` balls drifting in a 1000x700 box, sweep and prune with the
/// vertical early-out
pub fn ball_pit(count: usize) -> ScenarioConfig {
    ScenarioConfig {
        name: Some("ball_pit".to_string()),
        engine: EngineConfig {
            kind: KindConfig::BallPit,
            broad_phase: BroadPhaseConfig::SweepAndPrune,
            vertical_filter: true,
        },
        parameters: ParametersConfig {
            gravity: vec![0.0, 0.0],
            restitution: 1.0,
            flash_time: 0.12,
            ..ParametersConfig::default()
        },
        bounds: Some(BoundsConfig {
            width: 1000.0,
            height: 700.0,
        }),
        wire: None,
        segments: Vec::new(),
        bodies: Vec::new(),
        random_bodies: Some(RandomBodiesConfig {
            count,
            radius_min: 6.0,
            radius_max: 14.0,
            speed_max: 150.0,
            color: Some([0, 200, 0]),
        }),
        beads: None,
        events: Vec::new(),
    }
}
