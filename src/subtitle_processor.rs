use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use regex::Regex;
use once_cell::sync::Lazy;
use anyhow::{Result, Context, anyhow};
use log::{warn, debug};

// @module: Subtitle parsing into timed dialogue cues

// @const: SRT timestamp-range regex, anchored at the start of the line
static TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2}):(\d{2}):(\d{2}),(\d{3}) --> (\d{2}):(\d{2}):(\d{2}),(\d{3})").unwrap()
});

// @const: Blank-line block separator (one or more empty/whitespace lines)
static BLOCK_SEPARATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n\s*\n").unwrap()
});

// @struct: Single timed dialogue cue
#[derive(Debug, Clone, PartialEq)]
pub struct SubtitleCue {
    // @field: Start time in ms
    pub start_ms: u64,

    // @field: End time in ms
    pub end_ms: u64,

    // @field: Dialogue text, lines joined with a single space
    pub text: String,
}

impl SubtitleCue {
    /// Creates a new cue - used by tests and external consumers
    #[allow(dead_code)]
    pub fn new(start_ms: u64, end_ms: u64, text: String) -> Self {
        SubtitleCue {
            start_ms,
            end_ms,
            text,
        }
    }

    /// Start time in decimal seconds (`h*3600 + m*60 + s + ms/1000`)
    pub fn start_seconds(&self) -> f64 {
        self.start_ms as f64 / 1000.0
    }

    /// Parse an SRT timestamp (HH:MM:SS,mmm) to milliseconds
    pub fn parse_timestamp(timestamp: &str) -> Result<u64> {
        let parts: Vec<&str> = timestamp.split(&[':', ','][..]).collect();

        if parts.len() != 4 {
            return Err(anyhow!("Invalid timestamp format: {}", timestamp));
        }

        let hours: u64 = parts[0].parse().context("Failed to parse hours")?;
        let minutes: u64 = parts[1].parse().context("Failed to parse minutes")?;
        let seconds: u64 = parts[2].parse().context("Failed to parse seconds")?;
        let millis: u64 = parts[3].parse().context("Failed to parse milliseconds")?;

        Ok(hours * 3_600_000 + minutes * 60_000 + seconds * 1_000 + millis)
    }

    /// Format a timestamp in milliseconds to SRT format (HH:MM:SS,mmm)
    pub fn format_timestamp(ms: u64) -> String {
        let hours = ms / 3_600_000;
        let minutes = (ms % 3_600_000) / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        let millis = ms % 1_000;

        format!("{:02}:{:02}:{:02},{:03}", hours, minutes, seconds, millis)
    }
}

/// Collection of dialogue cues parsed from one subtitle file
#[derive(Debug)]
pub struct SubtitleCollection {
    /// Source filename
    pub source_file: PathBuf,

    /// Parsed cues, in file order
    pub cues: Vec<SubtitleCue>,
}

impl SubtitleCollection {
    /// Create an empty collection for a source file
    pub fn new(source_file: PathBuf) -> Self {
        SubtitleCollection {
            source_file,
            cues: Vec::new(),
        }
    }

    /// Read and parse a subtitle file.
    ///
    /// Reading a missing or unreadable file is fatal; malformed content is
    /// not - unparsable blocks are skipped and an empty file yields an
    /// empty collection.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read subtitle file: {}", path.display()))?;

        let cues = Self::parse_srt_string(&content);
        debug!("Parsed {} cue(s) from {}", cues.len(), path.display());

        Ok(SubtitleCollection {
            source_file: path.to_path_buf(),
            cues,
        })
    }

    /// Parse SRT content into timed cues.
    ///
    /// Content is split into blocks on blank lines. A well-formed block is
    /// a sequence number, a timestamp-range line, and one or more text
    /// lines; blocks that don't fit are skipped without error (metadata
    /// blocks, stray fragments). Cue order follows file order and is not
    /// re-sorted.
    pub fn parse_srt_string(content: &str) -> Vec<SubtitleCue> {
        let mut cues = Vec::new();

        for block in BLOCK_SEPARATOR.split(content) {
            let lines: Vec<&str> = block
                .trim()
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect();

            // A cue needs at least a sequence number and a timestamp line
            if lines.len() < 2 {
                continue;
            }

            let Some(caps) = TIMESTAMP_REGEX.captures(lines[1]) else {
                debug!("Skipping non-cue block starting with: {}", lines[0]);
                continue;
            };

            let (Ok(start_ms), Ok(end_ms)) = (
                Self::captured_timestamp_to_ms(&caps, 1),
                Self::captured_timestamp_to_ms(&caps, 5),
            ) else {
                warn!("Skipping cue with unparsable timestamp: {}", lines[1]);
                continue;
            };

            let text = lines[2..].join(" ").trim().to_string();
            if text.is_empty() {
                // Formatting-only cues carry no dialogue
                continue;
            }

            cues.push(SubtitleCue {
                start_ms,
                end_ms,
                text,
            });
        }

        if cues.is_empty() {
            warn!("No valid subtitle cues found in content");
        }

        cues
    }

    /// Convert one captured timestamp (4 consecutive groups) to milliseconds
    fn captured_timestamp_to_ms(caps: &regex::Captures, start_idx: usize) -> Result<u64> {
        let hours: u64 = caps.get(start_idx)
            .map_or(0, |m| m.as_str().parse().unwrap_or(0));
        let minutes: u64 = caps.get(start_idx + 1)
            .map_or(0, |m| m.as_str().parse().unwrap_or(0));
        let seconds: u64 = caps.get(start_idx + 2)
            .map_or(0, |m| m.as_str().parse().unwrap_or(0));
        let millis: u64 = caps.get(start_idx + 3)
            .map_or(0, |m| m.as_str().parse().unwrap_or(0));

        Ok((hours * 3600 + minutes * 60 + seconds) * 1000 + millis)
    }
}

impl fmt::Display for SubtitleCollection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Subtitle Collection")?;
        writeln!(f, "Source: {:?}", self.source_file)?;
        writeln!(f, "Cues: {}", self.cues.len())?;
        Ok(())
    }
}
