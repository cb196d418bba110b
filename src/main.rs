//! Evo Trace CLI - Render `progress.json` into `progress.gif`.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::error::Error;
use std::process::ExitCode;
use std::time::Instant;

use evo_trace::schema::{CONFIG_FILE_NAME, RenderConfig};

/// Exit status when there is no trace to render yet.
const EXIT_MISSING_TRACE: u8 = 2;

fn main() -> ExitCode {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let config = match RenderConfig::load_or_default(CONFIG_FILE_NAME) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading {}: {}", CONFIG_FILE_NAME, e);
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();
    match evo_trace::render(&config) {
        Ok(stats) => {
            println!(
                "Wrote {} ({} frames at {} fps) in {:.2}s",
                stats.path.display(),
                stats.frame_count,
                stats.fps,
                start.elapsed().as_secs_f32()
            );
            ExitCode::SUCCESS
        }
        Err(e) if e.is_missing_trace() => {
            println!(
                "{} does not exist, execute \"{}\" first",
                config.trace_path.display(),
                config.producer_command
            );
            ExitCode::from(EXIT_MISSING_TRACE)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
