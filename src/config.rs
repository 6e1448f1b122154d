//! Startup configuration, from defaults plus command-line flags.
//!
//! ```text
//! pinch-paint [--camera N] [--no-camera] [--fps N] [--video-opacity F]
//!             [--tracker sim|process] [--tracker-cmd "PROGRAM ARGS..."]
//!             [--tracker-arg ARG]... [--no-autostart]
//! ```
//!
//! `--tracker-cmd` is split on whitespace with no quoting, so an argument
//! containing spaces has to go through `--tracker-arg`, which is appended
//! verbatim after the command's own words and may be repeated.
//!
//! Logging is configured separately through `RUST_LOG`.

use crate::error::Error;

#[derive(Clone, Debug, PartialEq)]
pub enum TrackerKind {
    /// Mouse and keyboard stand in for the hand tracker.
    Sim,
    /// External program printing JSON snapshots, one per line.
    Process { program: String, args: Vec<String> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    /// `None` runs without a camera (plain background frame).
    pub camera: Option<u32>,
    pub fps: usize,
    pub video_opacity: f32,
    pub tracker: TrackerKind,
    /// Start the tracker immediately instead of waiting for the start key.
    pub autostart: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            camera: Some(0),
            fps: 60,
            video_opacity: 0.5,
            tracker: TrackerKind::Sim,
            autostart: true,
        }
    }
}

impl Config {
    /// Parse flags (without the program name) on top of the defaults.
    pub fn from_args<I>(args: I) -> Result<Config, Error>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut cfg = Config::default();
        let mut want_process = false;
        let mut command: Option<Vec<String>> = None;
        let mut extra_args = Vec::new();

        let mut args = args.into_iter().map(Into::<String>::into);
        while let Some(flag) = args.next() {
            let mut value = |name: &str| {
                args.next().ok_or_else(|| Error::Config(format!("{name} needs a value")))
            };
            match flag.as_str() {
                "--camera" => cfg.camera = Some(parse(&value("--camera")?, "--camera")?),
                "--no-camera" => cfg.camera = None,
                "--fps" => {
                    cfg.fps = parse(&value("--fps")?, "--fps")?;
                    if cfg.fps == 0 {
                        return Err(Error::Config("--fps must be at least 1".into()));
                    }
                }
                "--video-opacity" => {
                    let v: f32 = parse(&value("--video-opacity")?, "--video-opacity")?;
                    if !(0.0..=1.0).contains(&v) {
                        return Err(Error::Config(format!("--video-opacity {v} is outside 0..1")));
                    }
                    cfg.video_opacity = v;
                }
                "--tracker" => match value("--tracker")?.as_str() {
                    "sim" => want_process = false,
                    "process" => want_process = true,
                    other => return Err(Error::Config(format!("unknown tracker `{other}` (sim|process)"))),
                },
                "--tracker-cmd" => {
                    let words: Vec<String> = value("--tracker-cmd")?.split_whitespace().map(String::from).collect();
                    if words.is_empty() {
                        return Err(Error::Config("--tracker-cmd is empty".into()));
                    }
                    command = Some(words);
                    want_process = true;
                }
                "--tracker-arg" => {
                    extra_args.push(value("--tracker-arg")?);
                    want_process = true;
                }
                "--no-autostart" => cfg.autostart = false,
                other => return Err(Error::Config(format!("unknown flag `{other}`"))),
            }
        }

        if want_process {
            let mut words = command
                .ok_or_else(|| Error::Config("--tracker process needs --tracker-cmd".into()))?
                .into_iter();
            // --tracker-cmd rejects empty commands
            let program = words.next().unwrap_or_default();
            let args = words.chain(extra_args).collect();
            cfg.tracker = TrackerKind::Process { program, args };
        }

        Ok(cfg)
    }
}

fn parse<T: std::str::FromStr>(raw: &str, flag: &str) -> Result<T, Error> {
    raw.parse().map_err(|_| Error::Config(format!("bad value `{raw}` for {flag}")))
}
