mod app;
mod cli;
mod config;
mod features;
mod gfx;
mod scroll;

use anyhow::Result;
use app::{App, UiEvent};
use clap::Parser;
use cli::Args;
use config::Config;
use gfx::draw::DrawContext;
use log::{info, warn};
use std::time::{Duration, Instant};

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config_path = match args.config {
        Some(path) => path,
        None => Config::default_path()?,
    };

    let config = Config::load_from(&config_path).unwrap_or_else(|e| {
        warn!("Falling back to default config: {:#}", e);
        Config::default()
    });

    if args.write_config {
        config.save_to(&config_path)?;
        println!("Wrote {}", config_path.display());
        return Ok(());
    }

    let mut app = App::new(config)?;

    if args.schedule {
        println!("{}", app.hero.schedule());
        return Ok(());
    }

    let mut draw = DrawContext::new(app.session.viewport);
    let frame_dt = app.config.frame_dt();

    let mut script = app.config.scroll_script.clone();
    script.sort_by(|a, b| a.at.total_cmp(&b.at));
    let mut next_input = 0;
    let mut next_print = 0.0f32;

    info!(
        "Running {:?} for {:.1}s at {} fps, schedule spans {:.2} units",
        app.feature_names(),
        app.config.run_seconds,
        app.config.fps_cap,
        app.hero.schedule().duration()
    );

    let mut last_frame = Instant::now();
    while app.session.time < app.config.run_seconds {
        while let Some(input) = script.get(next_input) {
            if input.at > app.session.time {
                break;
            }
            app.handle_event(UiEvent::Scroll { delta: input.delta });
            next_input += 1;
        }

        let dt = if app.config.realtime {
            let now = Instant::now();
            let dt = now.duration_since(last_frame).as_secs_f32();
            last_frame = now;
            dt
        } else {
            frame_dt
        };

        app.update(dt);
        let frame = app.render(&mut draw);

        if app.session.time >= next_print {
            let binding = app.hero.binding();
            println!(
                "/* scroll {} progress {:.3}{} */",
                app.session.scroll_y,
                app.hero.progress(),
                if binding.is_pinned(app.session.scroll_y) { " pinned" } else { "" }
            );
            print!("{}", frame);
            next_print += app.config.print_interval.max(frame_dt);
        }

        if app.config.realtime {
            std::thread::sleep(Duration::from_secs_f32(frame_dt));
        }
    }

    Ok(())
}
