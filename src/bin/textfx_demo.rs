//! `textfx_demo` - animated text transitions in the terminal
//!
//! Cycles through a list of strings, animating each change with one or all
//! of the built-in effects.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin textfx_demo
//! cargo run --bin textfx_demo -- --effect elastic --fps 30
//! cargo run --bin textfx_demo -- --text hello --text "hello, world"
//! cargo run --bin textfx_demo -- --headless-smoke
//! ```

use std::ffi::OsString;
use std::io::{self, IsTerminal, Write};
use std::thread;
use std::time::{Duration, Instant};

use textfx::ansi::sequences;
use textfx::{
    AnimatedText, AnsiWriter, EffectKind, FrameBuffer, FrameTiming, Rgba, Style,
    TextAlignment, TextFormat, set_log_callback,
};

// ============================================================================
// CLI Parsing
// ============================================================================

const HELP_TEXT: &str = "textfx_demo - animated text transitions

USAGE:
    textfx_demo [OPTIONS]

OPTIONS:
    -h, --help              Print this help message and exit
    --effect <NAME>         fade, motion-blur, elastic, zoom or all (default: all)
    --text <TEXT>           Add a string to cycle through (repeatable)
    --fps <N>               Frames per second (default: 60)
    --size <WxH>            Text box size (default: 40x3)
    --hold <MS>             Pause between changes once idle (default: 900)
    --cycles <N>            Passes over the string list per effect (default: 1)
    --max-frames <N>        Exit after presenting N frames
    --no-alt-screen         Don't enter alternate screen
    --verbose               Print library debug logs to stderr
    --headless-smoke        Run without a terminal and print a summary

EXAMPLES:
    textfx_demo --effect zoom
    textfx_demo --text 'Wöörd 👍🏽' --text 'Word 👍'
";

const DEFAULT_TEXTS: [&str; 5] = [
    "textfx",
    "text effects",
    "grapheme clusters",
    "clusters that move",
    "👋 héllo, wörld",
];

/// Demo configuration from the command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub effects: Vec<EffectKind>,
    pub texts: Vec<String>,
    pub fps: u32,
    pub size: (u32, u32),
    pub hold: Duration,
    pub cycles: u32,
    pub max_frames: Option<u64>,
    pub use_alt_screen: bool,
    pub verbose: bool,
    pub headless_smoke: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            effects: EffectKind::ALL.to_vec(),
            texts: Vec::new(),
            fps: 60,
            size: (40, 3),
            hold: Duration::from_millis(900),
            cycles: 1,
            max_frames: None,
            use_alt_screen: true,
            verbose: false,
            headless_smoke: false,
        }
    }
}

/// Result of CLI parsing.
pub enum ParseResult {
    Config(Config),
    Help,
    Error(String),
}

fn parse_size(s: &str) -> Option<(u32, u32)> {
    let (w, h) = s.split_once(['x', 'X'])?;
    let (w, h) = (w.parse().ok()?, h.parse().ok()?);
    (w > 0 && h > 0).then_some((w, h))
}

impl Config {
    /// Parse configuration from command-line arguments.
    pub fn from_args<I>(args: I) -> ParseResult
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter();

        // Skip program name
        args.next();

        while let Some(arg) = args.next() {
            let arg_str = arg.to_string_lossy().to_string();
            let mut value = |name: &str| {
                args.next()
                    .map(|v| v.to_string_lossy().to_string())
                    .ok_or_else(|| format!("{name} requires a value"))
            };

            let step = match arg_str.as_str() {
                "-h" | "--help" => return ParseResult::Help,
                "--effect" => value("--effect").and_then(|v| {
                    if v.eq_ignore_ascii_case("all") {
                        config.effects = EffectKind::ALL.to_vec();
                        Ok(())
                    } else {
                        let kind = v.parse::<EffectKind>().map_err(|e| e.to_string())?;
                        config.effects = vec![kind];
                        Ok(())
                    }
                }),
                "--text" => value("--text").map(|v| config.texts.push(v)),
                "--fps" => value("--fps").and_then(|v| match v.parse::<u32>() {
                    Ok(n) if n > 0 => {
                        config.fps = n;
                        Ok(())
                    }
                    _ => Err(format!(
                        "Invalid --fps value: {v} (must be positive integer)"
                    )),
                }),
                "--size" => value("--size").and_then(|v| {
                    config.size = parse_size(&v)
                        .ok_or_else(|| format!("Invalid --size: {v} (use WxH, e.g. 40x3)"))?;
                    Ok(())
                }),
                "--hold" => value("--hold").and_then(|v| {
                    let ms = v
                        .parse::<u64>()
                        .map_err(|_| format!("Invalid --hold value: {v}"))?;
                    config.hold = Duration::from_millis(ms);
                    Ok(())
                }),
                "--cycles" => value("--cycles").and_then(|v| match v.parse::<u32>() {
                    Ok(n) if n > 0 => {
                        config.cycles = n;
                        Ok(())
                    }
                    _ => Err(format!("Invalid --cycles value: {v}")),
                }),
                "--max-frames" => value("--max-frames").and_then(|v| {
                    let n = v
                        .parse::<u64>()
                        .map_err(|_| format!("Invalid --max-frames value: {v}"))?;
                    config.max_frames = Some(n);
                    Ok(())
                }),
                "--no-alt-screen" => {
                    config.use_alt_screen = false;
                    Ok(())
                }
                "--verbose" => {
                    config.verbose = true;
                    Ok(())
                }
                "--headless-smoke" => {
                    config.headless_smoke = true;
                    Ok(())
                }
                other => Err(format!("Unknown option: {other}")),
            };

            if let Err(msg) = step {
                return ParseResult::Error(msg);
            }
        }

        ParseResult::Config(config)
    }

    /// The strings to cycle through.
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        if self.texts.is_empty() {
            DEFAULT_TEXTS.iter().map(ToString::to_string).collect()
        } else {
            self.texts.clone()
        }
    }

    fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps
    }
}

// ============================================================================
// Entry Point
// ============================================================================

fn main() -> textfx::Result<()> {
    match Config::from_args(std::env::args_os()) {
        ParseResult::Config(config) => {
            if config.verbose {
                set_log_callback(|level, message| eprintln!("[{level:?}] {message}"));
            }
            if config.headless_smoke {
                run_headless_smoke(&config)
            } else {
                run_interactive(&config)
            }
        }
        ParseResult::Help => {
            print!("{HELP_TEXT}");
            Ok(())
        }
        ParseResult::Error(msg) => {
            eprintln!("Error: {msg}");
            eprintln!("Run with --help for usage information.");
            std::process::exit(1);
        }
    }
}

// ============================================================================
// Playback
// ============================================================================

/// One effect's pass over the string list, driven by a frame clock.
struct Playback {
    text: AnimatedText,
    queue: Vec<String>,
    next: usize,
    idle_for: Duration,
}

impl Playback {
    fn new(config: &Config, effect: EffectKind) -> Self {
        let (width, height) = config.size;
        let format = TextFormat::default()
            .with_alignment(TextAlignment::Center)
            .with_style(Style::fg(Rgba::from_rgb_u8(255, 215, 0)).with_bold());
        let text = AnimatedText::new(width, height)
            .with_format(format)
            .with_effect(Some(effect.build()));

        let texts = config.texts();
        let queue = (0..config.cycles).flat_map(|_| texts.iter().cloned()).collect();
        Self {
            text,
            queue,
            next: 0,
            // Start the first change immediately.
            idle_for: config.hold,
        }
    }

    /// Advance one frame. Returns `false` once every string has been shown.
    fn step(&mut self, timing: FrameTiming, hold: Duration) -> bool {
        if !self.text.is_animating() {
            self.idle_for += timing.elapsed;
            if self.idle_for >= hold {
                let Some(next) = self.queue.get(self.next) else {
                    return false;
                };
                self.text.set_text(next.as_str());
                self.next += 1;
                self.idle_for = Duration::ZERO;
            }
        }
        self.text.update(timing);
        true
    }
}

fn draw_frame(frame: &mut FrameBuffer, playback: &Playback, effect: EffectKind) {
    frame.clear(Rgba::TRANSPARENT);
    let label = format!("effect: {effect}");
    let (_, text_height) = playback.text.size();
    let mut text_frame = FrameBuffer::new(frame.width(), text_height);
    playback.text.draw(&mut text_frame);
    for (x, y, cell) in text_frame.iter_cells() {
        frame.set(x, y + 1, cell.clone());
    }
    frame.draw_text(
        0,
        text_height + 2,
        &label,
        Style::fg(Rgba::from_rgb_u8(120, 120, 140)),
    );
}

// ============================================================================
// Headless Smoke Test
// ============================================================================

/// Play every configured effect against an in-memory writer.
fn run_headless_smoke(config: &Config) -> textfx::Result<()> {
    let (width, height) = config.size;
    eprintln!("Running headless smoke test ({width}x{height})...");

    let mut writer = AnsiWriter::new(Vec::new());
    let mut frame = FrameBuffer::try_new(width, height + 3)?;
    let interval = config.frame_interval();
    let mut frames = 0u64;

    for &effect in &config.effects {
        let mut playback = Playback::new(config, effect);
        let mut timing = FrameTiming::default();
        loop {
            timing = timing.next(interval);
            if !playback.step(timing, config.hold) {
                break;
            }
            draw_frame(&mut frame, &playback, effect);
            writer.write_frame(&frame);
            writer.flush()?;
            frames += 1;
            if config.max_frames.is_some_and(|max| frames >= max) {
                break;
            }
        }
        eprintln!("  {effect}: final text {:?}", playback.text.text());
    }

    eprintln!("Headless smoke test PASSED");
    eprintln!("  Frames: {frames}");
    eprintln!("  Bytes written: {}", writer.get_ref().len());
    Ok(())
}

// ============================================================================
// Interactive Mode
// ============================================================================

fn run_interactive(config: &Config) -> textfx::Result<()> {
    let stdout = io::stdout();
    if !stdout.is_terminal() {
        eprintln!("Error: stdout is not a terminal");
        eprintln!("Use --headless-smoke to run without one.");
        std::process::exit(1);
    }

    let (width, height) = config.size;
    let mut writer = AnsiWriter::new(stdout.lock());
    if config.use_alt_screen {
        writer.write_str(sequences::ALT_SCREEN_ON);
    }
    writer.write_str(sequences::CURSOR_HIDE);
    writer.write_str(sequences::CLEAR_SCREEN);

    let result = play(config, &mut writer, width, height);

    writer.write_str(sequences::RESET);
    writer.write_str(sequences::CURSOR_SHOW);
    if config.use_alt_screen {
        writer.write_str(sequences::ALT_SCREEN_OFF);
    }
    writer.flush()?;
    result
}

fn play<W: Write>(
    config: &Config,
    writer: &mut AnsiWriter<W>,
    width: u32,
    height: u32,
) -> textfx::Result<()> {
    let mut frame = FrameBuffer::try_new(width, height + 3)?;
    let interval = config.frame_interval();
    let started = Instant::now();
    let mut last = started;
    let mut frames = 0u64;

    for &effect in &config.effects {
        let mut playback = Playback::new(config, effect);
        loop {
            let now = Instant::now();
            let timing = FrameTiming::new(now - started, now - last);
            last = now;

            if !playback.step(timing, config.hold) {
                break;
            }
            draw_frame(&mut frame, &playback, effect);
            writer.write_frame_at(&frame, 1, 2);
            writer.flush()?;

            frames += 1;
            if config.max_frames.is_some_and(|max| frames >= max) {
                return Ok(());
            }
            let spent = now.elapsed();
            if spent < interval {
                thread::sleep(interval - spent);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    fn parsed(list: &[&str]) -> Config {
        match Config::from_args(args(list)) {
            ParseResult::Config(c) => c,
            _ => panic!("Expected Config"),
        }
    }

    #[test]
    fn test_default_config() {
        let config = parsed(&["textfx_demo"]);
        assert_eq!(config, Config::default());
        assert_eq!(config.effects.len(), EffectKind::ALL.len());
        assert_eq!(config.texts().len(), DEFAULT_TEXTS.len());
    }

    #[test]
    fn test_help() {
        assert!(matches!(
            Config::from_args(args(&["textfx_demo", "--help"])),
            ParseResult::Help
        ));
    }

    #[test]
    fn test_effect_and_texts() {
        let config = parsed(&[
            "textfx_demo",
            "--effect",
            "motion_blur",
            "--text",
            "a",
            "--text",
            "b",
        ]);
        assert_eq!(config.effects, vec![EffectKind::MotionBlur]);
        assert_eq!(config.texts(), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_invalid_values() {
        for bad in [
            &["textfx_demo", "--effect", "sparkle"][..],
            &["textfx_demo", "--fps", "0"],
            &["textfx_demo", "--size", "0x3"],
            &["textfx_demo", "--fps"],
            &["textfx_demo", "--bogus"],
        ] {
            assert!(
                matches!(Config::from_args(args(bad)), ParseResult::Error(_)),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn test_size_and_frames() {
        let config = parsed(&["textfx_demo", "--size", "20x2", "--max-frames", "5"]);
        assert_eq!(config.size, (20, 2));
        assert_eq!(config.max_frames, Some(5));
    }

    #[test]
    fn test_playback_shows_every_string() {
        let config = Config {
            texts: vec!["one".into(), "two".into()],
            hold: Duration::ZERO,
            ..Config::default()
        };
        let mut playback = Playback::new(&config, EffectKind::Fade);
        let mut timing = FrameTiming::default();
        let mut steps = 0;
        while playback.step(timing, config.hold) {
            timing = timing.next(Duration::from_millis(16));
            steps += 1;
            assert!(steps < 10_000, "playback did not finish");
        }
        assert_eq!(playback.text.text(), "two");
    }
}
