//! Host-side melody engine simulator.
//!
//! Stands in for the device main loop: feeds melody text through the
//! in-memory transport, polls the engine against the monotonic clock and
//! reports actuator activity through the logger. Useful for trying out
//! melody strings without flashing hardware.
//!
//! Usage:
//!   carillon [--config <file.json>] "<melody text>"
//!   carillon "440@500 494@500 523@1000"

use std::env;
use std::fs;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context};
use carillon::{
    Actuators, BufferChannel, Clock, EngineConfig, MelodyEngine, Rgb, SystemClock,
};
use log::info;

/// Actuators that report what the hardware would do.
struct ConsoleActuators;

impl Actuators for ConsoleActuators {
    fn set_tone(&mut self, frequency_hz: u16) {
        info!("buzzer on: {frequency_hz} Hz");
    }

    fn stop_tone(&mut self) {
        info!("buzzer off");
    }

    fn set_color(&mut self, color: Rgb) {
        info!("leds: #{:02X}{:02X}{:02X}", color.r, color.g, color.b);
    }

    fn clear_color(&mut self) {
        info!("leds off");
    }
}

struct Options {
    config: EngineConfig,
    melody: String,
}

fn parse_args() -> anyhow::Result<Options> {
    let mut config = EngineConfig::default();
    let mut melody = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args
                    .next()
                    .context("--config requires a path to a JSON file")?;
                let text = fs::read_to_string(&path)
                    .with_context(|| format!("cannot read config file {path}"))?;
                config = serde_json::from_str(&text)
                    .with_context(|| format!("cannot parse config file {path}"))?;
            }
            "--help" | "-h" => {
                eprintln!("Usage: carillon [--config <file.json>] \"<melody text>\"");
                std::process::exit(0);
            }
            text if melody.is_none() => melody = Some(text.to_string()),
            other => bail!("unexpected argument: {other}"),
        }
    }

    let Some(melody) = melody else {
        bail!("no melody given; try: carillon \"440@500 494@500 523@1000\"");
    };

    Ok(Options { config, melody })
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = parse_args()?;

    let mut engine = MelodyEngine::new(BufferChannel::new(), options.config)?;
    engine
        .transport_mut()
        .push_inbound(options.melody.as_bytes());

    if !engine.handle_inbound_update() {
        bail!("transport reported no pending melody data");
    }
    if engine.note_count() == 0 {
        bail!("no playable notes in {:?}", options.melody);
    }

    if let Some(echo) = engine.transport().last_outbound() {
        info!("accepted melody: {}", String::from_utf8_lossy(echo));
    }

    let clock = SystemClock::new();
    let mut actuators = ConsoleActuators;

    engine.start_playback();
    while engine.is_playing() {
        engine.poll(clock.now_ms(), &mut actuators);
        thread::sleep(Duration::from_millis(1));
    }

    info!("melody complete");
    Ok(())
}
