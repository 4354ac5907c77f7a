//! Replayable recorded-sample feed
//!
//! The [`DataFeed`] is a restartable, lazily-advancing source of sample
//! frames. It replays a line-delimited JSON recording (the bundled
//! gzip-compressed dataset by default, or an external file) and
//! transparently restarts from the beginning when the recording runs out,
//! so long-running simulations never see an empty read.
//!
//! The only terminal condition is a source that cannot be opened at all:
//! the feed then goes permanently inert and every later [`DataFeed::advance`]
//! fails without touching the previously delivered frame.

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::PathBuf;

use flate2::read::GzDecoder;
use log::{debug, error, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::frame::Frame;

/// Recorded samples bundled with the crate (96 frames, all sensor fields)
static BUNDLED_DATA: &[u8] = include_bytes!("../data/replay-data.ndjson.gz");

/// Where the recording comes from
enum FeedSource {
    /// The dataset compiled into the crate
    Bundled,
    /// An external recording; `.gz` paths are gunzipped, anything else
    /// is read as plain NDJSON
    File(PathBuf),
}

impl FeedSource {
    fn open(&self) -> io::Result<Box<dyn BufRead + Send>> {
        match self {
            FeedSource::Bundled => Ok(Box::new(BufReader::new(GzDecoder::new(Cursor::new(
                BUNDLED_DATA,
            ))))),
            FeedSource::File(path) => {
                let file = File::open(path)?;
                if path.extension().is_some_and(|ext| ext == "gz") {
                    Ok(Box::new(BufReader::new(GzDecoder::new(file))))
                } else {
                    Ok(Box::new(BufReader::new(file)))
                }
            }
        }
    }

    fn describe(&self) -> String {
        match self {
            FeedSource::Bundled => "bundled replay dataset".to_string(),
            FeedSource::File(path) => path.display().to_string(),
        }
    }
}

/// All-or-nothing fault injection
///
/// One uniform draw in `[0, 100)` per advance; a hit replaces the whole
/// frame with a uniform anomaly frame, never individual fields.
struct AnomalyInjector {
    enabled: bool,
    percentage: u8,
    value: f32,
    rng: StdRng,
}

impl AnomalyInjector {
    fn from_config(config: &EngineConfig) -> Self {
        Self {
            enabled: config.anomaly_enabled,
            percentage: config.effective_percentage(),
            value: config.anomaly_value,
            rng: StdRng::from_entropy(),
        }
    }

    fn hit(&mut self) -> bool {
        self.enabled && self.rng.gen_range(0u32..100) < u32::from(self.percentage)
    }
}

/// Lazily-advancing replay source of sample frames
pub struct DataFeed {
    source: FeedSource,
    reader: Option<Box<dyn BufRead + Send>>,
    frame: Frame,
    cursor: usize,
    anomaly: AnomalyInjector,
    inert_reason: Option<String>,
}

impl DataFeed {
    /// Open the recording named by the configuration
    ///
    /// A source that cannot be opened leaves the feed inert instead of
    /// failing construction; the hosting lifecycle stays up and reads
    /// degrade per item.
    pub fn open(config: &EngineConfig) -> Self {
        let source = match &config.dataset_path {
            Some(path) => FeedSource::File(path.clone()),
            None => FeedSource::Bundled,
        };

        let (reader, inert_reason) = match source.open() {
            Ok(reader) => (Some(reader), None),
            Err(e) => {
                let reason = format!("unable to open {}: {}", source.describe(), e);
                error!("{}", reason);
                (None, Some(reason))
            }
        };

        Self {
            source,
            reader,
            frame: Frame::default(),
            cursor: 0,
            anomaly: AnomalyInjector::from_config(config),
            inert_reason,
        }
    }

    /// Advance to the next recorded frame
    ///
    /// Exhaustion restarts the recording transparently. Lines that fail
    /// JSON decode are skipped with a warning. An anomaly hit substitutes
    /// a synthetic frame where every field equals the configured value.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::FeedUnavailable`] if the feed is inert; the
    /// previously delivered frame is left unchanged.
    pub fn advance(&mut self) -> Result<&Frame> {
        if let Some(reason) = &self.inert_reason {
            return Err(EngineError::FeedUnavailable(reason.clone()));
        }

        let mut restarted = false;
        loop {
            let Some(reader) = self.reader.as_mut() else {
                return Err(EngineError::FeedUnavailable(
                    "replay reader closed".to_string(),
                ));
            };

            let mut line = String::new();
            let read = match reader.read_line(&mut line) {
                Ok(read) => read,
                Err(e) => {
                    if restarted {
                        return Err(self.make_inert(format!("replay read failed: {}", e)));
                    }
                    warn!("Replay read failed ({}), reopening recording", e);
                    self.reopen()?;
                    restarted = true;
                    continue;
                }
            };

            if read == 0 {
                if restarted {
                    // A full pass produced nothing usable
                    return Err(self.make_inert("replay dataset contains no frames".to_string()));
                }
                info!("Replay data ended, starting from the beginning");
                self.reopen()?;
                restarted = true;
                continue;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }

            match serde_json::from_str::<HashMap<String, String>>(trimmed) {
                Ok(fields) => {
                    self.cursor += 1;
                    self.frame = if self.anomaly.hit() {
                        debug!("injecting anomaly frame at position {}", self.cursor);
                        Frame::uniform(self.anomaly.value)
                    } else {
                        Frame::new(fields)
                    };
                    return Ok(&self.frame);
                }
                Err(e) => {
                    warn!("Skipping malformed replay line: {}", e);
                    continue;
                }
            }
        }
    }

    /// The most recently delivered frame
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Frames delivered since the recording was last (re)opened
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the feed can still deliver frames
    pub fn is_available(&self) -> bool {
        self.inert_reason.is_none()
    }

    /// Permanently disable the feed
    pub(crate) fn make_inert(&mut self, reason: String) -> EngineError {
        error!("Replay feed going inert: {}", reason);
        self.reader = None;
        self.inert_reason = Some(reason.clone());
        EngineError::FeedUnavailable(reason)
    }

    fn reopen(&mut self) -> Result<()> {
        match self.source.open() {
            Ok(reader) => {
                self.reader = Some(reader);
                self.cursor = 0;
                Ok(())
            }
            Err(e) => Err(self.make_inert(format!(
                "unable to reopen {}: {}",
                self.source.describe(),
                e
            ))),
        }
    }
}
