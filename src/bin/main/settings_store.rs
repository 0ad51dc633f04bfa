use std::{
    fs, io,
    path::{Path, PathBuf},
};

use flashread_core::{
    settings::{PersistedSettings, SettingsStore},
    tokenizer::ReadingMode,
};
use log::debug;

const SETTINGS_MAGIC: u32 = 0x3153_5246; // "FRS1"
const SETTINGS_VERSION: u8 = 1;
const SETTINGS_RECORD_LEN: usize = 16;
const CHECKSUM_OFFSET: usize = SETTINGS_RECORD_LEN - 4;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub(super) enum SettingsFileError {
    Io(io::ErrorKind),
    Corrupted,
    Unsupported,
}

impl From<io::Error> for SettingsFileError {
    fn from(err: io::Error) -> Self {
        Self::Io(err.kind())
    }
}

/// Settings record kept in a small binary file next to the user's config.
#[derive(Debug)]
pub(super) struct FileSettingsStore {
    path: PathBuf,
}

impl FileSettingsStore {
    pub(super) fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub(super) fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for FileSettingsStore {
    type Error = SettingsFileError;

    fn load(&mut self) -> Result<Option<PersistedSettings>, Self::Error> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        decode_record(&bytes)
    }

    fn save(&mut self, settings: &PersistedSettings) -> Result<(), Self::Error> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        // Write a sibling file first so a crash never leaves a torn record.
        let staging = self.path.with_extension("tmp");
        fs::write(&staging, encode_record(settings))?;
        fs::rename(&staging, &self.path)?;
        debug!(
            "settings: saved path={} wpm={} mode={} chunk_size={}",
            self.path.display(),
            settings.wpm,
            settings.mode.label(),
            settings.chunk_size
        );
        Ok(())
    }
}

fn encode_record(settings: &PersistedSettings) -> [u8; SETTINGS_RECORD_LEN] {
    let mut buf = [0u8; SETTINGS_RECORD_LEN];
    buf[0..4].copy_from_slice(&SETTINGS_MAGIC.to_le_bytes());
    buf[4] = SETTINGS_VERSION;
    buf[5] = mode_code(settings.mode);
    buf[6] = settings.chunk_size;
    buf[8..10].copy_from_slice(&settings.wpm.to_le_bytes());

    let checksum = checksum32(&buf[..CHECKSUM_OFFSET]);
    buf[CHECKSUM_OFFSET..].copy_from_slice(&checksum.to_le_bytes());
    buf
}

fn decode_record(buf: &[u8]) -> Result<Option<PersistedSettings>, SettingsFileError> {
    if buf.is_empty() {
        return Ok(None);
    }
    if buf.len() < SETTINGS_RECORD_LEN {
        return Err(SettingsFileError::Corrupted);
    }

    let magic = u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    if magic != SETTINGS_MAGIC {
        return Err(SettingsFileError::Corrupted);
    }

    if buf[4] != SETTINGS_VERSION {
        return Err(SettingsFileError::Unsupported);
    }

    let expected_checksum = u32::from_le_bytes([
        buf[CHECKSUM_OFFSET],
        buf[CHECKSUM_OFFSET + 1],
        buf[CHECKSUM_OFFSET + 2],
        buf[CHECKSUM_OFFSET + 3],
    ]);
    if checksum32(&buf[..CHECKSUM_OFFSET]) != expected_checksum {
        return Err(SettingsFileError::Corrupted);
    }

    let mode = mode_from_code(buf[5]).ok_or(SettingsFileError::Corrupted)?;
    let chunk_size = buf[6];
    let wpm = u16::from_le_bytes([buf[8], buf[9]]);

    Ok(Some(PersistedSettings::new(wpm, mode, chunk_size)))
}

fn mode_code(mode: ReadingMode) -> u8 {
    match mode {
        ReadingMode::Rsvp => 0,
        ReadingMode::Bionic => 1,
        ReadingMode::Chunk => 2,
        ReadingMode::Guided => 3,
        ReadingMode::DualColumn => 4,
    }
}

fn mode_from_code(code: u8) -> Option<ReadingMode> {
    match code {
        0 => Some(ReadingMode::Rsvp),
        1 => Some(ReadingMode::Bionic),
        2 => Some(ReadingMode::Chunk),
        3 => Some(ReadingMode::Guided),
        4 => Some(ReadingMode::DualColumn),
        _ => None,
    }
}

// FNV-1a
fn checksum32(bytes: &[u8]) -> u32 {
    let mut hash = 0x811C_9DC5u32;
    for b in bytes {
        hash ^= *b as u32;
        hash = hash.wrapping_mul(16_777_619);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "flashread-settings-{}-{}",
            std::process::id(),
            name
        ));
        let _ = fs::remove_dir_all(&dir);
        dir.join("settings.bin")
    }

    #[test]
    fn record_decodes_what_it_encodes() {
        let settings = PersistedSettings::new(475, ReadingMode::DualColumn, 4);
        let record = encode_record(&settings);

        assert_eq!(&record[0..4], b"FRS1");
        assert_eq!(decode_record(&record), Ok(Some(settings)));
    }

    #[test]
    fn flipped_byte_is_corruption() {
        let mut record = encode_record(&PersistedSettings::default());
        record[8] ^= 0x40;
        assert_eq!(decode_record(&record), Err(SettingsFileError::Corrupted));
    }

    #[test]
    fn unknown_mode_code_is_corruption() {
        let mut record = encode_record(&PersistedSettings::default());
        record[5] = 9;
        let checksum = checksum32(&record[..CHECKSUM_OFFSET]);
        record[CHECKSUM_OFFSET..].copy_from_slice(&checksum.to_le_bytes());
        assert_eq!(decode_record(&record), Err(SettingsFileError::Corrupted));
    }

    #[test]
    fn newer_version_is_unsupported() {
        let mut record = encode_record(&PersistedSettings::default());
        record[4] = SETTINGS_VERSION + 1;
        assert_eq!(decode_record(&record), Err(SettingsFileError::Unsupported));
    }

    #[test]
    fn truncated_record_is_corruption() {
        let record = encode_record(&PersistedSettings::default());
        assert_eq!(
            decode_record(&record[..10]),
            Err(SettingsFileError::Corrupted)
        );
        assert_eq!(decode_record(&[]), Ok(None));
    }

    #[test]
    fn file_store_round_trips() {
        let path = scratch_path("round-trip");
        let mut store = FileSettingsStore::new(&path);
        assert_eq!(store.load(), Ok(None));

        let settings = PersistedSettings::new(650, ReadingMode::Chunk, 5);
        assert_eq!(store.save(&settings), Ok(()));
        assert_eq!(store.load(), Ok(Some(settings)));
        assert!(!path.with_extension("tmp").exists());

        if let Some(dir) = store.path().parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }
}
