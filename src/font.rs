//! Bitmap fonts.
//!
//! A font size is a table from character code to a [`Glyph`]: an advance
//! width plus the list of pixels the glyph lights up, relative to its own
//! origin.
//!
//! On disk every size lives in its own JSON file, `font_{size}.json`:
//!
//! ```json
//! { "65": { "width": 5, "data": "0a1b..." } }
//! ```
//!
//! Keys are decimal character codes. `data` is a hex string, one byte per
//! lit pixel, with `dx` in the high nibble and `dy` in the low nibble.
//!
//! Tables are loaded lazily through a [`FontCache`], once per size.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use serde::Deserialize;
use tracing::{debug, trace, warn};

use crate::error::{Error, Result};

/// Environment variable naming the font directory.
pub const FONT_DIR_ENV: &str = "QUADCANVAS_FONT_DIR";

/// Font directory used when [`FONT_DIR_ENV`] is unset.
pub const DEFAULT_FONT_DIR: &str = "font";

// =============================================================================
// Glyphs
// =============================================================================

/// One character of a bitmap font.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Glyph {
    /// Horizontal advance, excluding the inter-character gap.
    pub width: i32,
    /// Lit pixels as `(dx, dy)` offsets from the glyph origin, in order.
    pub offsets: Vec<(u8, u8)>,
}

impl Glyph {
    pub fn new(width: i32, offsets: Vec<(u8, u8)>) -> Self {
        Self { width, offsets }
    }

    /// Decode the packed hex representation used by font files.
    ///
    /// A trailing lone digit is read as a byte on its own, so `"123"` gives
    /// `[(1, 2), (0, 3)]`. Returns `None` for non-hex input.
    pub fn decode_offsets(data: &str) -> Option<Vec<(u8, u8)>> {
        let bytes = data.as_bytes();
        let (pairs, tail) = bytes.split_at(bytes.len() - bytes.len() % 2);

        let mut decoded = hex::decode(pairs).ok()?;
        if let [last] = tail {
            decoded.extend(hex::decode([b'0', *last]).ok()?);
        }
        Some(decoded.into_iter().map(|b| (b >> 4, b & 0x0F)).collect())
    }
}

/// All glyphs of one font size, keyed by character code.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GlyphTable {
    glyphs: HashMap<u32, Glyph>,
}

#[derive(Deserialize)]
struct RawGlyph {
    width: i32,
    data: String,
}

impl GlyphTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the JSON font format. `size` is only used for diagnostics.
    ///
    /// Entries with a non-numeric key or non-hex data are skipped with a
    /// warning; the rest of the size stays usable.
    pub fn from_json(size: u8, json: &str) -> Result<Self> {
        let raw: HashMap<String, RawGlyph> =
            serde_json::from_str(json).map_err(|source| Error::FontParse { size, source })?;

        let mut table = Self::new();
        for (key, glyph) in raw {
            let Ok(code) = key.trim().parse::<u32>() else {
                warn!(size, key = %key, "skipping glyph: key is not a character code");
                continue;
            };
            let Some(offsets) = Glyph::decode_offsets(&glyph.data) else {
                warn!(size, code, "skipping glyph: data is not hex");
                continue;
            };
            table.insert(code, Glyph::new(glyph.width, offsets));
        }
        Ok(table)
    }

    /// Add or replace a glyph.
    pub fn insert(&mut self, code: u32, glyph: Glyph) {
        self.glyphs.insert(code, glyph);
    }

    /// Look up the glyph for a character.
    #[inline]
    pub fn get(&self, ch: char) -> Option<&Glyph> {
        self.glyphs.get(&(ch as u32))
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

// =============================================================================
// Sources
// =============================================================================

/// Where glyph tables come from.
///
/// `Ok(None)` means the size does not exist, which is not an error: text in
/// that size simply draws nothing.
pub trait FontSource: Send + Sync {
    fn load(&self, size: u8) -> Result<Option<GlyphTable>>;
}

/// A source with no fonts at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFonts;

impl FontSource for NoFonts {
    fn load(&self, _size: u8) -> Result<Option<GlyphTable>> {
        Ok(None)
    }
}

/// Fonts stored as `font_{size}.json` files in one directory.
#[derive(Debug, Clone)]
pub struct FontDir {
    root: PathBuf,
}

impl FontDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory from `QUADCANVAS_FONT_DIR`, or `./font`.
    pub fn from_env() -> Self {
        let root = std::env::var_os(FONT_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_FONT_DIR));
        Self::new(root)
    }

    /// Path of the file holding `size`.
    pub fn path_for(&self, size: u8) -> PathBuf {
        self.root.join(format!("font_{size}.json"))
    }
}

impl FontSource for FontDir {
    fn load(&self, size: u8) -> Result<Option<GlyphTable>> {
        let path = self.path_for(size);
        let json = match fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "font file not found");
                return Ok(None);
            }
            Err(source) => return Err(Error::FontLoad { size, source }),
        };
        GlyphTable::from_json(size, &json).map(Some)
    }
}

impl FontSource for HashMap<u8, GlyphTable> {
    fn load(&self, size: u8) -> Result<Option<GlyphTable>> {
        Ok(self.get(&size).cloned())
    }
}

// =============================================================================
// FontCache
// =============================================================================

/// Memoizing front of a [`FontSource`].
///
/// Each size is loaded at most once; afterwards the table is shared
/// read-only. Loading happens under the write lock, so concurrent first
/// requests for the same size do not load twice.
pub struct FontCache {
    source: Box<dyn FontSource>,
    tables: RwLock<HashMap<u8, Arc<GlyphTable>>>,
}

impl FontCache {
    pub fn new(source: impl FontSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            tables: RwLock::new(HashMap::new()),
        }
    }

    /// A cache that never finds any font.
    pub fn empty() -> Self {
        Self::new(NoFonts)
    }

    /// Glyph table for `size`, loading it on first use.
    ///
    /// A missing size yields an empty table. A failed load is returned once
    /// and the size is then remembered as empty, so a broken font file is
    /// not re-read on every call.
    pub fn glyph_set(&self, size: u8) -> Result<Arc<GlyphTable>> {
        {
            let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(table) = tables.get(&size) {
                trace!(size, "font cache hit");
                return Ok(Arc::clone(table));
            }
        }

        let mut tables = self.tables.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(table) = tables.get(&size) {
            return Ok(Arc::clone(table));
        }

        match self.source.load(size) {
            Ok(loaded) => {
                let table = Arc::new(loaded.unwrap_or_default());
                debug!(size, glyphs = table.len(), "font loaded");
                tables.insert(size, Arc::clone(&table));
                Ok(table)
            }
            Err(e) => {
                warn!(size, error = %e, "font unusable, size will draw nothing");
                tables.insert(size, Arc::new(GlyphTable::new()));
                Err(e)
            }
        }
    }

    /// Pre-populate a size, bypassing the source.
    pub fn insert(&self, size: u8, table: GlyphTable) {
        self.tables
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(size, Arc::new(table));
    }

    /// Whether `size` has been loaded already.
    pub fn is_loaded(&self, size: u8) -> bool {
        self.tables
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&size)
    }
}

impl Default for FontCache {
    fn default() -> Self {
        Self::new(FontDir::from_env())
    }
}

impl std::fmt::Debug for FontCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tables = self.tables.read().unwrap_or_else(PoisonError::into_inner);
        let mut sizes: Vec<u8> = tables.keys().copied().collect();
        sizes.sort_unstable();
        f.debug_struct("FontCache").field("loaded", &sizes).finish()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_decode_offsets() {
        assert_eq!(Glyph::decode_offsets(""), Some(vec![]));
        assert_eq!(Glyph::decode_offsets("0a1B"), Some(vec![(0, 10), (1, 11)]));
        assert_eq!(Glyph::decode_offsets("123"), Some(vec![(1, 2), (0, 3)]));
        assert_eq!(Glyph::decode_offsets("zz"), None);
        assert_eq!(Glyph::decode_offsets("12z"), None);
    }

    #[test]
    fn test_table_from_json() {
        let table = GlyphTable::from_json(5, r#"{"65": {"width": 3, "data": "000102"}}"#).unwrap();
        let glyph = table.get('A').unwrap();
        assert_eq!(glyph.width, 3);
        assert_eq!(glyph.offsets, vec![(0, 0), (0, 1), (0, 2)]);
        assert!(table.get('B').is_none());
    }

    #[test]
    fn test_table_skips_bad_entries() {
        let json = r#"{
            "x": {"width": 1, "data": ""},
            "66": {"width": 1, "data": "0g"},
            "67": {"width": 2, "data": "123"},
            "65": {"width": 3, "data": "00"}
        }"#;
        let table = GlyphTable::from_json(1, json).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.get('B').is_none());
        assert_eq!(table.get('C').unwrap().offsets, vec![(1, 2), (0, 3)]);
        assert_eq!(table.get('A').unwrap().offsets, vec![(0, 0)]);

        let err = GlyphTable::from_json(2, "[1, 2]").unwrap_err();
        assert!(matches!(err, Error::FontParse { size: 2, .. }));
    }

    struct Broken {
        loads: AtomicUsize,
    }

    impl FontSource for Broken {
        fn load(&self, size: u8) -> Result<Option<GlyphTable>> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            GlyphTable::from_json(size, "not json").map(Some)
        }
    }

    #[test]
    fn test_failed_load_is_not_retried() {
        let source = Arc::new(Broken {
            loads: AtomicUsize::new(0),
        });

        struct Shared(Arc<Broken>);
        impl FontSource for Shared {
            fn load(&self, size: u8) -> Result<Option<GlyphTable>> {
                self.0.load(size)
            }
        }

        let cache = FontCache::new(Shared(Arc::clone(&source)));
        let err = cache.glyph_set(6).unwrap_err();
        assert!(matches!(err, Error::FontParse { size: 6, .. }));

        assert!(cache.glyph_set(6).unwrap().is_empty());
        assert!(cache.glyph_set(6).unwrap().is_empty());
        assert_eq!(source.loads.load(Ordering::SeqCst), 1);
    }

    struct Counting {
        loads: AtomicUsize,
    }

    impl FontSource for Counting {
        fn load(&self, size: u8) -> Result<Option<GlyphTable>> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            let mut table = GlyphTable::new();
            table.insert('x' as u32, Glyph::new(size as i32, vec![]));
            Ok(Some(table))
        }
    }

    #[test]
    fn test_cache_loads_each_size_once() {
        let source = Arc::new(Counting {
            loads: AtomicUsize::new(0),
        });

        struct Shared(Arc<Counting>);
        impl FontSource for Shared {
            fn load(&self, size: u8) -> Result<Option<GlyphTable>> {
                self.0.load(size)
            }
        }

        let cache = FontCache::new(Shared(Arc::clone(&source)));
        assert!(!cache.is_loaded(3));

        let a = cache.glyph_set(3).unwrap();
        let b = cache.glyph_set(3).unwrap();
        let c = cache.glyph_set(4).unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(c.get('x').unwrap().width, 4);
        assert_eq!(source.loads.load(Ordering::SeqCst), 2);
        assert!(cache.is_loaded(3));
    }

    #[test]
    fn test_missing_size_is_empty() {
        let cache = FontCache::empty();
        assert!(cache.glyph_set(9).unwrap().is_empty());
    }

    #[test]
    fn test_insert_preloads() {
        let cache = FontCache::empty();
        let mut table = GlyphTable::new();
        table.insert('A' as u32, Glyph::new(2, vec![(1, 1)]));
        cache.insert(5, table);
        assert_eq!(cache.glyph_set(5).unwrap().len(), 1);
    }

    #[test]
    fn test_map_source() {
        let mut fonts = HashMap::new();
        fonts.insert(1u8, GlyphTable::new());
        let cache = FontCache::new(fonts);
        assert!(cache.glyph_set(1).unwrap().is_empty());
        assert!(cache.glyph_set(2).unwrap().is_empty());
    }
}
