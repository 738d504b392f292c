use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use tessera_core::input::NavKey;
use tessera_core::session::ViewerSession;
use tessera_core::source::image_pyramid::ImagePyramid;
use tessera_core::viewport::{RegionRequest, ScreenPoint};
use tracing::debug;

#[derive(Args)]
pub struct ReplayArgs {
    /// Input image file
    pub file: PathBuf,

    /// Navigation script, one event per line:
    /// `key <w|a|s|d|q|e>`, `wheel <notches> <x> <y>`, `drag <dx> <dy>`,
    /// `resize <w> <h>`, `level <n> [<x> <y>]`
    pub script: PathBuf,

    /// Viewer config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Decode every emitted region into this directory
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

/// One line of a navigation script.
#[derive(Clone, Debug, PartialEq)]
pub enum ScriptEvent {
    Key(NavKey),
    Wheel { notches: f64, x: f64, y: f64 },
    Drag { dx: f64, dy: f64 },
    Resize { width: u32, height: u32 },
    Level { level: usize, anchor: Option<ScreenPoint> },
}

impl FromStr for ScriptEvent {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&name, rest)) = parts.split_first() else {
            anyhow::bail!("empty event");
        };

        let numbers = |expected: usize| -> Result<Vec<f64>> {
            if rest.len() != expected {
                anyhow::bail!("'{name}' takes {expected} argument(s), got {}", rest.len());
            }
            rest.iter()
                .map(|s| s.parse::<f64>().with_context(|| format!("invalid number '{s}'")))
                .collect()
        };

        match name {
            "key" => {
                let [key] = rest else {
                    anyhow::bail!("'key' takes exactly one key");
                };
                let key = key.parse::<NavKey>().map_err(anyhow::Error::msg)?;
                Ok(Self::Key(key))
            }
            "wheel" => {
                let v = numbers(3)?;
                Ok(Self::Wheel {
                    notches: v[0],
                    x: v[1],
                    y: v[2],
                })
            }
            "drag" => {
                let v = numbers(2)?;
                Ok(Self::Drag { dx: v[0], dy: v[1] })
            }
            "resize" => {
                let [w, h] = rest else {
                    anyhow::bail!("'resize' takes a width and a height");
                };
                Ok(Self::Resize {
                    width: w.parse().context("invalid width")?,
                    height: h.parse().context("invalid height")?,
                })
            }
            "level" => {
                let (level, anchor) = match rest {
                    [level] => (level, None),
                    [level, x, y] => {
                        let x: f64 = x.parse().context("invalid anchor x")?;
                        let y: f64 = y.parse().context("invalid anchor y")?;
                        (level, Some(ScreenPoint::new(x, y)))
                    }
                    _ => anyhow::bail!("'level' takes a level and an optional anchor"),
                };
                Ok(Self::Level {
                    level: level.parse().context("invalid level")?,
                    anchor,
                })
            }
            other => anyhow::bail!("unknown event '{other}'"),
        }
    }
}

/// Parse a script, skipping blank lines and `#` comments.
pub fn parse_script(text: &str) -> Result<Vec<ScriptEvent>> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i, line.split('#').next().unwrap_or("").trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(i, line)| {
            line.parse::<ScriptEvent>()
                .with_context(|| format!("line {}: '{line}'", i + 1))
        })
        .collect()
}

fn apply(session: &mut ViewerSession<ImagePyramid>, event: &ScriptEvent) -> Option<RegionRequest> {
    match *event {
        ScriptEvent::Key(key) => session.on_key(key),
        ScriptEvent::Wheel { notches, x, y } => session.on_wheel(notches, x, y),
        ScriptEvent::Drag { dx, dy } => session.on_drag_delta(dx, dy),
        ScriptEvent::Resize { width, height } => session.on_resize(width, height),
        ScriptEvent::Level { level, anchor } => session.navigator_mut().zoom_to_level(level, anchor),
    }
}

pub fn run(args: &ReplayArgs) -> Result<()> {
    let config = super::load_config(args.config.as_deref())?;
    let text = std::fs::read_to_string(&args.script)
        .with_context(|| format!("Failed to read script {}", args.script.display()))?;
    let events = parse_script(&text)?;
    debug!(events = events.len(), script = %args.script.display(), "Parsed navigation script");

    let (mut session, initial) = ViewerSession::<ImagePyramid>::on_open(&args.file, &config)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;

    if let Some(ref dir) = args.output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    println!("open      -> {initial}");
    let mut emitted = vec![initial];

    for event in &events {
        match apply(&mut session, event) {
            Some(request) => {
                println!("{:<9} -> {request}", event_name(event));
                emitted.push(request);
            }
            None => println!("{:<9} -> no change", event_name(event)),
        }
    }

    let Some(ref dir) = args.output_dir else {
        return Ok(());
    };

    let pb = ProgressBar::new(emitted.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Decoding [{bar:40}] {pos}/{len}")?
            .progress_chars("=> "),
    );

    for (i, request) in emitted.iter().enumerate() {
        let region = session.decode(request)?;
        let path = dir.join(format!("{i:04}_id{}_level{}.png", request.id, request.level));
        region
            .save_png(&path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        pb.set_position(i as u64 + 1);
    }
    pb.finish();
    println!("Saved {} region(s) to {}", emitted.len(), dir.display());

    Ok(())
}

fn event_name(event: &ScriptEvent) -> &'static str {
    match event {
        ScriptEvent::Key(_) => "key",
        ScriptEvent::Wheel { .. } => "wheel",
        ScriptEvent::Drag { .. } => "drag",
        ScriptEvent::Resize { .. } => "resize",
        ScriptEvent::Level { .. } => "level",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_event_kinds() {
        let script = "\
            # pan right then zoom in at the cursor
            key d
            wheel 1 375 375
            drag -12.5 4
            resize 800 780   # window grew
            level 0
            level 2 10 20
        ";
        let events = parse_script(script).unwrap();
        assert_eq!(
            events,
            vec![
                ScriptEvent::Key(NavKey::Right),
                ScriptEvent::Wheel {
                    notches: 1.0,
                    x: 375.0,
                    y: 375.0
                },
                ScriptEvent::Drag { dx: -12.5, dy: 4.0 },
                ScriptEvent::Resize {
                    width: 800,
                    height: 780
                },
                ScriptEvent::Level {
                    level: 0,
                    anchor: None
                },
                ScriptEvent::Level {
                    level: 2,
                    anchor: Some(ScreenPoint::new(10.0, 20.0))
                },
            ]
        );
    }

    #[test]
    fn test_parse_errors_name_the_line() {
        let err = parse_script("key d\nwheel 1 2\n").unwrap_err();
        assert!(format!("{err:#}").contains("line 2"), "got: {err:#}");

        assert!("key x".parse::<ScriptEvent>().is_err());
        assert!("resize -1 10".parse::<ScriptEvent>().is_err());
        assert!("zoom 1".parse::<ScriptEvent>().is_err());
    }
}
