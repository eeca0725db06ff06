//! On-disk form of an [`InputJournal`]: one JSON object per line.
//!
//! The first line describes the run (format version, build, config fingerprint
//! and seed). Every later line is an accepted input stamped with the tick it
//! was applied on and linked to its predecessor by SHA-256, so an edited,
//! dropped or reordered line stops the load at that line.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::journal::{InputJournal, InputPayload, InputRecord, JOURNAL_FORMAT_VERSION};

/// Link carried by the first record. No record digests to it.
pub const CHAIN_ORIGIN: &str = "0000000000000000000000000000000000000000000000000000000000000000";

#[derive(Serialize, Deserialize)]
struct RunLine {
    format_version: u16,
    build_id: String,
    config_hash: u64,
    seed: u64,
}

impl RunLine {
    fn into_journal(self) -> InputJournal {
        InputJournal {
            format_version: self.format_version,
            build_id: self.build_id,
            config_hash: self.config_hash,
            seed: self.seed,
            inputs: Vec::new(),
        }
    }
}

/// The digested part of a record line.
#[derive(Serialize, Deserialize)]
struct Entry {
    seq: u64,
    tick: u64,
    payload: InputPayload,
}

#[derive(Serialize, Deserialize)]
struct ChainedLine {
    #[serde(flatten)]
    entry: Entry,
    prev_sha256_hex: String,
    sha256_hex: String,
}

enum LinkFault {
    OutOfSequence { expected: u64, found: u64 },
    Broken,
    Encode(serde_json::Error),
}

impl LinkFault {
    fn at(self, line: usize) -> JournalLoadError {
        match self {
            LinkFault::OutOfSequence { expected, found } => JournalLoadError::BadRecord {
                line,
                reason: format!("expected seq {expected}, found {found}"),
            },
            LinkFault::Broken => JournalLoadError::ChainBroken { line },
            LinkFault::Encode(err) => JournalLoadError::BadRecord { line, reason: err.to_string() },
        }
    }
}

/// Tip of a hash chain: the digest the next record links to and the seq it
/// must carry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashChain {
    tip: String,
    next_seq: u64,
}

impl Default for HashChain {
    fn default() -> Self {
        Self { tip: CHAIN_ORIGIN.to_string(), next_seq: 0 }
    }
}

impl HashChain {
    pub fn tip(&self) -> &str {
        &self.tip
    }

    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }

    /// `hex(SHA-256(entry_json || tip))`.
    fn digest(&self, entry: &Entry) -> serde_json::Result<String> {
        let entry_json = serde_json::to_string(entry)?;
        let mut hasher = Sha256::new();
        hasher.update(entry_json.as_bytes());
        hasher.update(self.tip.as_bytes());
        Ok(format!("{:064x}", hasher.finalize()))
    }

    fn seal(&self, tick: u64, payload: &InputPayload) -> serde_json::Result<ChainedLine> {
        let entry = Entry { seq: self.next_seq, tick, payload: payload.clone() };
        let sha256_hex = self.digest(&entry)?;
        Ok(ChainedLine { entry, prev_sha256_hex: self.tip.clone(), sha256_hex })
    }

    fn advance_past(&mut self, line: ChainedLine) -> Entry {
        self.tip = line.sha256_hex;
        self.next_seq = line.entry.seq + 1;
        line.entry
    }

    fn follow(&mut self, line: ChainedLine) -> Result<Entry, LinkFault> {
        if line.entry.seq != self.next_seq {
            return Err(LinkFault::OutOfSequence { expected: self.next_seq, found: line.entry.seq });
        }
        if line.prev_sha256_hex != self.tip {
            return Err(LinkFault::Broken);
        }
        if self.digest(&line.entry).map_err(LinkFault::Encode)? != line.sha256_hex {
            return Err(LinkFault::Broken);
        }
        Ok(self.advance_past(line))
    }
}

/// Appends accepted inputs to a journal file. Every line is flushed before
/// the call that wrote it returns.
pub struct JournalWriter {
    out: BufWriter<File>,
    chain: HashChain,
}

impl JournalWriter {
    /// Starts a fresh journal at `path`, replacing any file already there.
    pub fn create(path: &Path, seed: u64, build_id: &str, config_hash: u64) -> io::Result<Self> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let mut writer =
            Self { out: BufWriter::new(File::create(path)?), chain: HashChain::default() };
        writer.write_line(&RunLine {
            format_version: JOURNAL_FORMAT_VERSION,
            build_id: build_id.to_string(),
            config_hash,
            seed,
        })?;
        Ok(writer)
    }

    /// Reopens `path` for appending after the chain a load ended on.
    pub fn resume(path: &Path, chain: HashChain) -> io::Result<Self> {
        let file = OpenOptions::new().append(true).open(path)?;
        Ok(Self { out: BufWriter::new(file), chain })
    }

    pub fn append(&mut self, tick: u64, payload: &InputPayload) -> io::Result<()> {
        let line = self.chain.seal(tick, payload)?;
        self.write_line(&line)?;
        self.chain.advance_past(line);
        Ok(())
    }

    pub fn chain(&self) -> &HashChain {
        &self.chain
    }

    fn write_line(&mut self, value: &impl Serialize) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, value)?;
        self.out.write_all(b"\n")?;
        self.out.flush()
    }
}

#[derive(Debug)]
pub struct LoadedJournal {
    pub journal: InputJournal,
    /// Where a resumed writer picks up.
    pub chain: HashChain,
}

#[derive(Debug, Error)]
pub enum JournalLoadError {
    #[error("could not read journal: {0}")]
    Io(#[from] io::Error),
    #[error("journal has no header line")]
    Empty,
    #[error("unreadable journal header: {0}")]
    BadHeader(String),
    #[error("journal format {found} is not supported (expected {JOURNAL_FORMAT_VERSION})")]
    UnsupportedVersion { found: u16 },
    #[error("line {line}: {reason}")]
    BadRecord { line: usize, reason: String },
    #[error("line {line} ends before its newline")]
    Truncated { line: usize },
    #[error("line {line} does not continue the hash chain")]
    ChainBroken { line: usize },
}

fn terminated(raw: &str, line: usize) -> Result<&str, JournalLoadError> {
    let text = raw.strip_suffix('\n').ok_or(JournalLoadError::Truncated { line })?;
    Ok(text.strip_suffix('\r').unwrap_or(text))
}

/// Reads and verifies a whole journal file.
pub fn load_journal_from_file(path: &Path) -> Result<LoadedJournal, JournalLoadError> {
    let text = fs::read_to_string(path)?;
    let mut lines = text.split_inclusive('\n').zip(1..);

    let Some((first, _)) = lines.next() else {
        return Err(JournalLoadError::Empty);
    };
    let run: RunLine = serde_json::from_str(terminated(first, 1)?)
        .map_err(|err| JournalLoadError::BadHeader(err.to_string()))?;
    if run.format_version != JOURNAL_FORMAT_VERSION {
        return Err(JournalLoadError::UnsupportedVersion { found: run.format_version });
    }

    let mut journal = run.into_journal();
    let mut chain = HashChain::default();
    for (raw, line) in lines {
        let record: ChainedLine = serde_json::from_str(terminated(raw, line)?)
            .map_err(|err| JournalLoadError::BadRecord { line, reason: err.to_string() })?;
        let entry = chain.follow(record).map_err(|fault| fault.at(line))?;
        journal.inputs.push(InputRecord { seq: entry.seq, payload: entry.payload });
    }

    Ok(LoadedJournal { journal, chain })
}
