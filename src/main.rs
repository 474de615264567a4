//! sonaplot - plots you can hear

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use sonaplot::config::{self, EXAMPLE_CONFIG};
use sonaplot::engine::{self, Player, ToneChain};
use sonaplot::interactive::{self, TranscriptSpeaker};
use sonaplot::locale::Language;
use sonaplot::playable::{self, Lines, RenderMode};
use sonaplot::series::SeriesInput;
use sonaplot::viz::{self, Explorer};
use tracing::Level;

mod cli;

use cli::{Cli, Commands};

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read data file: {:?}", path))?;
    serde_json::from_str(&contents).with_context(|| format!("failed to parse data file: {:?}", path))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    match cli.command {
        Commands::Render {
            data,
            config: config_path,
            mode,
            output,
            duration,
            labels,
            language,
            no_description,
        } => {
            let cfg = config::load_or_default(config_path.as_deref())?;
            let mut options = cfg.render_options();
            if let Some(mode) = mode {
                options.mode = mode.parse::<RenderMode>()?;
            }
            if let Some(duration) = duration {
                options.duration_ms = duration;
            }
            if let Some(language) = language {
                options.language = language.parse::<Language>()?;
            }
            if labels.is_some() {
                options.labels = labels;
            }
            if no_description {
                options.description = false;
            }
            if output.is_some() {
                options.autoplay = false;
            }

            let lines: Lines = read_json(&data)?;
            println!(
                "Rendering {} line(s) x {} values ({})...",
                lines.channels(),
                lines.rows(),
                options.mode
            );

            let speech = cfg.speech.synth();
            let player = Player::new(cfg.audio.device.clone());

            let running = player.running_flag();
            ctrlc::set_handler(move || running.store(false, Ordering::SeqCst))
                .context("failed to install Ctrl-C handler")?;

            match playable::plot(&lines, &options, speech.as_ref(), &player)? {
                Some(track) => match output {
                    Some(path) => {
                        engine::write_clip(&path, &track)?;
                        println!(
                            "Wrote {:.1}s to {:?}",
                            track.duration_ms() / 1000.0,
                            path
                        );
                    }
                    None => {
                        println!("Autoplay is off and no --output was given; nothing written.");
                    }
                },
                None => println!("Done."),
            }
        }

        Commands::Explore {
            data,
            config: config_path,
            title,
            multiple_axes,
            language,
        } => {
            let cfg = config::load_or_default(config_path.as_deref())?;
            let mut options = cfg.plot_options();
            if let Some(title) = title {
                options.title = title;
            }
            if multiple_axes {
                options.multiple_axes = true;
            }
            if let Some(language) = language {
                options.language = language.parse::<Language>()?;
            }

            let input: SeriesInput = read_json(&data)?;
            let (y, x, label) = input.into_parts();

            // Delayed slider narration runs on this runtime
            let rt = tokio::runtime::Runtime::new()?;
            let _guard = rt.enter();

            let transcript = Arc::new(TranscriptSpeaker::new());
            let speaker = cfg.speech.speaker(Arc::clone(&transcript));
            let output = ToneChain::from_options(&options, cfg.audio.device.clone());

            let session = interactive::plot(y, x, label.as_deref(), options, output, speaker)?;

            let running = Arc::new(AtomicBool::new(true));
            let flag = Arc::clone(&running);
            ctrlc::set_handler(move || flag.store(false, Ordering::SeqCst))
                .context("failed to install Ctrl-C handler")?;

            viz::run_explore(Explorer::new(session, transcript, running))?;
        }

        Commands::Devices => {
            println!("Available audio devices:\n");

            if let Some(name) = engine::default_device_name() {
                println!("Default output: {}\n", name);
            }

            println!("Output devices:");
            let devices = engine::list_output_devices();
            if devices.is_empty() {
                println!("  (none found)");
            }
            for (name, config) in devices {
                println!(
                    "  - {} ({} Hz, {} ch)",
                    name, config.sample_rate.0, config.channels
                );
            }
        }

        Commands::Check { config: config_path } => {
            println!("Checking configuration at {:?}...", config_path);

            match config::load_config(&config_path) {
                Ok(cfg) => {
                    println!("Configuration is valid!");
                    println!("  Sample rate: {} Hz", cfg.audio.sample_rate);
                    println!(
                        "  Device: {}",
                        cfg.audio.device.as_deref().unwrap_or("(default)")
                    );
                    println!("  Language: {}", cfg.language);
                    println!("  Speech: {:?} ({})", cfg.speech.engine, cfg.speech.command);
                    println!(
                        "  Interactive: {}x{}, gain {:.2}, {} slider steps{}",
                        cfg.interactive.width,
                        cfg.interactive.height,
                        cfg.interactive.gain,
                        cfg.interactive.slider_partitions,
                        if cfg.interactive.multiple_axes { ", multiple axes" } else { "" }
                    );
                    println!(
                        "  Render: {}, {} ms per value, {:.1} - {:.1} Hz",
                        cfg.render.mode,
                        cfg.render.duration_ms,
                        cfg.render.min_freq,
                        cfg.render.max_freq
                    );
                }
                Err(e) => {
                    println!("Configuration is invalid: {:#}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Init => {
            let path = "sonaplot.yaml";
            if Path::new(path).exists() {
                println!("sonaplot.yaml already exists. Not overwriting.");
            } else {
                std::fs::write(path, EXAMPLE_CONFIG)?;
                println!("Created sonaplot.yaml with example configuration.");
            }
        }
    }

    Ok(())
}
