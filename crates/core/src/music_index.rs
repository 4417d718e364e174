//! Album index keyed by release date.
//!
//! A music library is laid out as `<library>/<artist>/<album>/`, where each
//! album folder holds a `details.txt` (first line: release date, `YYYY-MM`)
//! and the track files. [`create_index`] scans such a library into a
//! [`MusicIndex`], which stores a list of albums per release date in a
//! [`Hashtable`]. Playlists are written by copying tracks into one folder.
//!
//! # Scan Rules
//! - Album folders without a readable, valid `details.txt` are skipped and
//!   reported as warnings; the rest of the library still loads.
//! - Stray files at the artist or album-folder level are ignored.
//! - Entries are visited in name order so scans are repeatable.
//! - Only an unreadable library root is an error.
//!
//! # Example
//! ```no_run
//! use huffdex_core::music_index::{create_index, ReleaseDate};
//!
//! let (index, warnings) = create_index("MyMusic").unwrap();
//! for warning in &warnings {
//!     eprintln!("warning: {warning}");
//! }
//! let start: ReleaseDate = "2004-01".parse().unwrap();
//! let end: ReleaseDate = "2004-12".parse().unwrap();
//! index.write_playlist("MyPlaylists", &start, &end).unwrap();
//! ```

use crate::error::{MusicIndexError, Result};
use crate::hashtable::Hashtable;
use std::fmt;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// File in each album folder holding the release date.
pub const DETAILS_FILE: &str = "details.txt";

/// Default inclusive playlist range.
pub const DEFAULT_START: &str = "1900-01";
pub const DEFAULT_END: &str = "2025-01";

/// A `YYYY-MM` release date.
///
/// Validated dates compare correctly as strings, so ordering is derived.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReleaseDate(String);

impl ReleaseDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ReleaseDate {
    type Err = MusicIndexError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let b = s.as_bytes();
        let valid = b.len() == 7
            && b[4] == b'-'
            && b[..4].iter().all(u8::is_ascii_digit)
            && b[5..].iter().all(u8::is_ascii_digit);

        if !valid {
            return Err(MusicIndexError::InvalidReleaseDate(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for ReleaseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Read the release date from the first line of a details file.
pub fn read_release_date(reader: impl BufRead) -> Result<ReleaseDate> {
    let line = reader.lines().next().transpose()?.unwrap_or_default();
    Ok(line.trim().parse()?)
}

/// One audio file of an album.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// File name including extension, e.g. `04 Okay.m4p`
    pub name: String,
    /// Location of the audio file
    pub path: PathBuf,
}

impl Track {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Copy the audio file to `dir/<prefix><name>`, creating `dir` if needed.
    ///
    /// Returns the path written.
    pub fn copy_to(&self, dir: impl AsRef<Path>, prefix: &str) -> Result<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let target = dir.join(format!("{prefix}{}", self.name));
        fs::copy(&self.path, &target)?;
        Ok(target)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    pub artist: String,
    pub release_date: ReleaseDate,
    pub album_name: String,
    pub tracks: Vec<Track>,
}

impl Album {
    pub fn new(
        artist: impl Into<String>,
        release_date: ReleaseDate,
        album_name: impl Into<String>,
        tracks: Vec<Track>,
    ) -> Self {
        Self {
            artist: artist.into(),
            release_date,
            album_name: album_name.into(),
            tracks,
        }
    }

    /// Prefix given to every track copied out of this album.
    pub fn track_prefix(&self) -> String {
        format!("{}_{}_{}_", self.release_date, self.artist, self.album_name)
    }

    /// Copy every track into `dir`, named `<date>_<artist>_<album>_<track>`.
    ///
    /// Returns the number of tracks written.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<usize> {
        let dir = dir.as_ref();
        let prefix = self.track_prefix();
        for track in &self.tracks {
            track.copy_to(dir, &prefix)?;
        }
        Ok(self.tracks.len())
    }

    /// Load the album stored in `album_dir`.
    ///
    /// Every regular file other than [`DETAILS_FILE`] is a track.
    ///
    /// # Errors
    /// - `MusicIndexError::MissingDetails` if `details.txt` is absent
    /// - `MusicIndexError::InvalidReleaseDate` if its first line is not `YYYY-MM`
    /// - `Error::Io` if the folder cannot be read
    pub fn load(artist: impl Into<String>, album_name: impl Into<String>, album_dir: impl AsRef<Path>) -> Result<Self> {
        let album_dir = album_dir.as_ref();
        let details = album_dir.join(DETAILS_FILE);
        if !details.is_file() {
            return Err(MusicIndexError::MissingDetails(details).into());
        }
        let release_date = read_release_date(BufReader::new(fs::File::open(&details)?))?;

        let mut tracks = Vec::new();
        for (name, path) in sorted_entries(album_dir)? {
            if path.is_file() && name != DETAILS_FILE {
                tracks.push(Track::new(name, path));
            }
        }

        Ok(Self::new(artist, release_date, album_name, tracks))
    }
}

impl fmt::Display for Album {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\" by ~{}~ released on [{}]",
            self.album_name, self.artist, self.release_date
        )
    }
}

/// Directory entries as `(file name, path)`, sorted by name.
///
/// Names that are not valid UTF-8 are skipped.
fn sorted_entries(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if let Ok(name) = entry.file_name().into_string() {
            entries.push((name, entry.path()));
        }
    }
    entries.sort();
    Ok(entries)
}

/// Where a playlist was written and how much went into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub dir: PathBuf,
    pub albums: usize,
    pub tracks: usize,
}

/// Albums grouped by release date.
///
/// The underlying table holds one entry per distinct date, so its element
/// count is the number of dates, not albums.
#[derive(Debug, Default)]
pub struct MusicIndex {
    table: Hashtable<Vec<Album>>,
}

impl MusicIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `album` to the list for its release date, starting a new list if
    /// the date is not yet indexed.
    pub fn add_album(&mut self, album: Album) {
        let date = album.release_date.as_str();
        if let Some(albums) = self.table.get_mut(date) {
            albums.push(album);
        } else {
            let key = date.to_string();
            self.table.put(key, vec![album]);
        }
    }

    /// Albums released on `release_date`; empty when none are indexed.
    pub fn get_albums(&self, release_date: &str) -> &[Album] {
        self.table.get(release_date).map(Vec::as_slice).unwrap_or(&[])
    }

    /// `(release date, albums)` entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Album])> + '_ {
        self.table.iter().map(|(date, albums)| (date, albums.as_slice()))
    }

    /// Number of distinct release dates.
    pub fn num_dates(&self) -> usize {
        self.table.len()
    }

    pub fn num_albums(&self) -> usize {
        self.table.iter().map(|(_, albums)| albums.len()).sum()
    }

    /// The backing table, for inspection.
    pub fn table(&self) -> &Hashtable<Vec<Album>> {
        &self.table
    }

    /// Copy every album released in `start..=end` into
    /// `base_dir/Music <start> through <end>`.
    ///
    /// The playlist folder is created even if no album falls in range.
    pub fn write_playlist(
        &self,
        base_dir: impl AsRef<Path>,
        start: &ReleaseDate,
        end: &ReleaseDate,
    ) -> Result<Playlist> {
        let dir = base_dir
            .as_ref()
            .join(format!("Music {start} through {end}"));
        fs::create_dir_all(&dir)?;

        let mut playlist = Playlist {
            dir,
            albums: 0,
            tracks: 0,
        };
        for (date, albums) in self.iter() {
            if start.as_str() <= date && date <= end.as_str() {
                for album in albums {
                    playlist.tracks += album.write_to_dir(&playlist.dir)?;
                    playlist.albums += 1;
                }
            }
        }
        Ok(playlist)
    }
}

impl FromIterator<Album> for MusicIndex {
    fn from_iter<I: IntoIterator<Item = Album>>(iter: I) -> Self {
        let mut index = Self::new();
        for album in iter {
            index.add_album(album);
        }
        index
    }
}

impl fmt::Display for MusicIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (date, albums) in self.iter() {
            writeln!(f, "Key: {date}")?;
            for album in albums {
                writeln!(f, "  {album}")?;
            }
        }
        Ok(())
    }
}

/// Albums found by [`scan_library`] plus the folders that were skipped.
#[derive(Debug, Default)]
pub struct LibraryScan {
    pub albums: Vec<Album>,
    pub warnings: Vec<String>,
}

/// Load every album under `library_dir`.
///
/// # Errors
/// Returns `Error::Io` only if `library_dir` itself cannot be read. Problems
/// with individual artist or album folders become warnings.
pub fn scan_library(library_dir: impl AsRef<Path>) -> Result<LibraryScan> {
    let mut scan = LibraryScan::default();

    for (artist, artist_dir) in sorted_entries(library_dir.as_ref())? {
        if !artist_dir.is_dir() {
            continue;
        }
        let album_dirs = match sorted_entries(&artist_dir) {
            Ok(entries) => entries,
            Err(e) => {
                scan.warnings
                    .push(format!("skipping artist folder {}: {e}", artist_dir.display()));
                continue;
            }
        };

        for (album_name, album_dir) in album_dirs {
            if !album_dir.is_dir() {
                continue;
            }
            match Album::load(artist.as_str(), album_name, &album_dir) {
                Ok(album) => scan.albums.push(album),
                Err(e) => scan
                    .warnings
                    .push(format!("skipping album folder {}: {e}", album_dir.display())),
            }
        }
    }

    Ok(scan)
}

/// Scan `library_dir` and index every album found.
///
/// Returns the index together with the scan warnings.
pub fn create_index(library_dir: impl AsRef<Path>) -> Result<(MusicIndex, Vec<String>)> {
    let scan = scan_library(library_dir)?;
    let index = scan.albums.into_iter().collect();
    Ok((index, scan.warnings))
}
