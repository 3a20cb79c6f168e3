//! Digit Pad
//!
//! A line-driven front end for the digit pad session. Each input line is one
//! drawing or control command; the model loads in the background while
//! commands are processed.
//!
//! # Usage
//!
//! ```bash
//! digit-pad [OPTIONS]
//! ```
//!
//! # Commands
//!
//! * `down X Y`, `move X Y`, `up`, `leave` - pointer input in client coordinates
//! * `touchstart X Y`, `touchmove X Y`, `touchend`, `touchcancel` - touch input
//! * `predict` - classify the drawing and print the label
//! * `clear` - wipe the surface and unset the label
//! * `show` - print the current label (`N/A` when unset)
//! * `quit` - stop reading commands
//!
//! Blank lines and lines starting with `#` are skipped.
//!
//! # Example
//!
//! ```bash
//! printf 'down 150 40\nmove 150 200\nup\npredict\n' | \
//!     RUST_LOG=info digit-pad --model models/digit_classifier.onnx --wait
//! ```

use clap::Parser;
use oar_digits::core::DigitError;
use oar_digits::core::config::ConfigValidatorExt;
use oar_digits::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{error, info, warn};

/// Command-line arguments for the digit pad
#[derive(Parser)]
#[command(name = "digit-pad")]
#[command(about = "Handwritten digit pad - draw with pointer or touch commands, then predict")]
struct Args {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Path to the ONNX digit classifier (overrides the configuration)
    #[arg(short, long)]
    model: Option<PathBuf>,

    /// Read commands from this file instead of stdin
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Horizontal offset of the surface in client coordinates
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    left: f32,

    /// Vertical offset of the surface in client coordinates
    #[arg(long, default_value = "0", allow_negative_numbers = true)]
    top: f32,

    /// Number of ranked alternatives to print with each prediction
    #[arg(long)]
    topk: Option<usize>,

    /// Save the surface as PNG after the last command
    #[arg(long)]
    save_surface: Option<PathBuf>,

    /// Save the normalized 28x28 input as PNG after the last command
    #[arg(long)]
    save_input: Option<PathBuf>,

    /// Block until the model has loaded before processing commands
    #[arg(long)]
    wait: bool,
}

/// One line of the command stream.
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Input(InputEvent),
    Predict,
    Clear,
    Show,
    Quit,
}

impl FromStr for Command {
    type Err = DigitError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let args: Vec<&str> = parts.collect();

        let coords = || -> Result<(f32, f32), DigitError> {
            match args.as_slice() {
                [x, y] => {
                    let parse = |value: &str| -> Result<f32, DigitError> {
                        let coord = value.parse::<f32>().map_err(|e| {
                            DigitError::invalid_input(format!(
                                "'{}' is not a coordinate: {}",
                                value, e
                            ))
                        })?;
                        if coord.is_finite() {
                            Ok(coord)
                        } else {
                            Err(DigitError::invalid_input(format!(
                                "'{}' is not a finite coordinate",
                                value
                            )))
                        }
                    };
                    Ok((parse(*x)?, parse(*y)?))
                }
                _ => Err(DigitError::invalid_input(format!(
                    "'{}' expects two coordinates",
                    name
                ))),
            }
        };
        let bare = |command: Command| {
            if args.is_empty() {
                Ok(command)
            } else {
                Err(DigitError::invalid_input(format!(
                    "'{}' takes no arguments",
                    name
                )))
            }
        };

        match name.to_ascii_lowercase().as_str() {
            "down" => {
                let (x, y) = coords()?;
                Ok(Command::Input(InputEvent::pointer(PointerPhase::Down, x, y)))
            }
            "move" => {
                let (x, y) = coords()?;
                Ok(Command::Input(InputEvent::pointer(PointerPhase::Move, x, y)))
            }
            "up" => bare(Command::Input(InputEvent::pointer(PointerPhase::Up, 0.0, 0.0))),
            "leave" => bare(Command::Input(InputEvent::pointer(
                PointerPhase::Leave,
                0.0,
                0.0,
            ))),
            "touchstart" => {
                let (x, y) = coords()?;
                Ok(Command::Input(InputEvent::touch(TouchPhase::Start, x, y)))
            }
            "touchmove" => {
                let (x, y) = coords()?;
                Ok(Command::Input(InputEvent::touch(TouchPhase::Move, x, y)))
            }
            "touchend" => bare(Command::Input(InputEvent::touch_released(TouchPhase::End))),
            "touchcancel" => bare(Command::Input(InputEvent::touch_released(
                TouchPhase::Cancel,
            ))),
            "predict" => bare(Command::Predict),
            "clear" => bare(Command::Clear),
            "show" => bare(Command::Show),
            "quit" | "exit" => bare(Command::Quit),
            _ => Err(DigitError::invalid_input(format!(
                "unknown command '{}'",
                name
            ))),
        }
    }
}

/// Returns the command on `line`, or `None` for blank lines and comments.
fn parse_line(line: &str) -> Option<Result<Command, DigitError>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    Some(trimmed.parse())
}

fn load_config(args: &Args) -> DigitResult<DigitPadConfig> {
    let mut config = match &args.config {
        Some(path) => DigitPadConfig::from_json_file(path)?,
        None => DigitPadConfig::default(),
    };
    if let Some(model) = &args.model {
        config = config.with_model_path(model);
    }
    if let Some(topk) = args.topk {
        config.topk = Some(topk);
    }
    Ok(config.validated()?)
}

fn run_commands(
    session: &mut Session<OnnxDigitClassifier>,
    rect: &SurfaceRect,
    reader: impl BufRead,
    out: &mut impl Write,
) -> DigitResult<()> {
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let command = match parse_line(&line) {
            None => continue,
            Some(Ok(command)) => command,
            Some(Err(err)) => {
                warn!(line = line_no + 1, "{}", err);
                writeln!(out, "error: {}", err)?;
                continue;
            }
        };

        match command {
            Command::Input(event) => {
                session.handle_input(&event, rect);
            }
            Command::Predict => match session.predict() {
                Ok(prediction) => {
                    let ranking: Vec<String> = prediction
                        .ranking
                        .iter()
                        .map(|r| format!("{}:{:.3}", r.name, r.score))
                        .collect();
                    writeln!(out, "{} [{}]", prediction.label_name, ranking.join(" "))?;
                }
                Err(err) if err.is_not_ready() => {
                    writeln!(out, "model still loading, try again")?;
                }
                Err(err) => {
                    error!("prediction failed: {}", err);
                    writeln!(out, "error: {}", err)?;
                }
            },
            Command::Clear => session.clear(),
            Command::Show => writeln!(out, "{}", session.label_text())?,
            Command::Quit => break,
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    oar_digits::utils::init_tracing();

    let args = Args::parse();
    let config = load_config(&args)?;

    info!(
        model = %config.model.model_path.display(),
        width = config.surface.width,
        height = config.surface.height,
        "starting digit pad"
    );

    let model_config = config.model.clone();
    let loader = ModelLoader::spawn("digit-classifier", move || {
        OnnxDigitClassifier::load(&model_config)
    })?;
    let mut session = Session::with_loader(&config, loader)?;

    if args.wait {
        match session.wait_for_model() {
            ModelState::Failed(reason) => {
                error!("model failed to load: {}", reason);
                return Err(reason.clone().into());
            }
            state => info!(?state, "model load finished"),
        }
    }

    let rect = SurfaceRect::new(args.left, args.top);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match &args.script {
        Some(path) => {
            let reader = BufReader::new(File::open(path)?);
            run_commands(&mut session, &rect, reader, &mut out)?;
        }
        None => {
            let stdin = std::io::stdin();
            run_commands(&mut session, &rect, stdin.lock(), &mut out)?;
        }
    }

    if let Some(path) = &args.save_surface {
        session.surface().save_png(path)?;
        info!("surface saved to {}", path.display());
    }
    if let Some(path) = &args.save_input {
        let input = session.normalized_input()?;
        input
            .to_gray_image(session.normalizer().scale())
            .save(path)?;
        info!("normalized input saved to {}", path.display());
    }

    Ok(())
}
