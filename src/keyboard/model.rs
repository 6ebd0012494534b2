use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TyperError};
use crate::keyboard::display::upper_of;
use crate::keyboard::layout::Row;

/// One selectable unit of a character row.
///
/// A variant entry bundles a primary character with its alternates (accented
/// forms); the primary is what the carousel shows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGlyph", into = "RawGlyph")]
pub enum GlyphEntry {
    Single(char),
    Variants { primary: char, alternates: Vec<char> },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum RawGlyph {
    Char(char),
    Digit(u32),
    List(Vec<char>),
}

impl TryFrom<RawGlyph> for GlyphEntry {
    type Error = TyperError;

    fn try_from(raw: RawGlyph) -> Result<Self> {
        match raw {
            RawGlyph::Char(ch) => Ok(GlyphEntry::Single(ch)),
            RawGlyph::Digit(n) => char::from_digit(n, 10)
                .map(GlyphEntry::Single)
                .ok_or(TyperError::NotADigit(n)),
            RawGlyph::List(chars) => {
                GlyphEntry::from_variants(chars).ok_or_else(|| TyperError::EmptyGlyph {
                    entry: "[]".to_string(),
                })
            }
        }
    }
}

impl From<GlyphEntry> for RawGlyph {
    fn from(entry: GlyphEntry) -> Self {
        match entry {
            GlyphEntry::Single(ch) => RawGlyph::Char(ch),
            GlyphEntry::Variants { primary, alternates } => {
                let mut chars = vec![primary];
                chars.extend(alternates);
                RawGlyph::List(chars)
            }
        }
    }
}

impl GlyphEntry {
    /// Build from an ordered variant list; element 0 is the primary.
    pub fn from_variants(chars: Vec<char>) -> Option<Self> {
        let mut it = chars.into_iter();
        let primary = it.next()?;
        let alternates: Vec<char> = it.collect();
        if alternates.is_empty() {
            Some(GlyphEntry::Single(primary))
        } else {
            Some(GlyphEntry::Variants { primary, alternates })
        }
    }

    pub fn primary(&self) -> char {
        match self {
            GlyphEntry::Single(ch) => *ch,
            GlyphEntry::Variants { primary, .. } => *primary,
        }
    }

    pub fn alternates(&self) -> &[char] {
        match self {
            GlyphEntry::Single(_) => &[],
            GlyphEntry::Variants { alternates, .. } => alternates,
        }
    }

    /// Alternates in order, each followed by its upper-case form when one exists.
    pub fn variants(&self) -> Vec<char> {
        let mut out = Vec::with_capacity(self.alternates().len() * 2);
        for &alt in self.alternates() {
            out.push(alt);
            if let Some(up) = upper_of(alt) {
                out.push(up);
            }
        }
        out
    }
}

impl From<char> for GlyphEntry {
    fn from(ch: char) -> Self {
        GlyphEntry::Single(ch)
    }
}

/// Character sets for every list row. `secondary` is derived at runtime from
/// the selected alpha glyph and is normally empty in a stored definition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyboardDefinition {
    #[serde(default)]
    pub alpha: Vec<GlyphEntry>,
    #[serde(default)]
    pub nums: Vec<GlyphEntry>,
    #[serde(default)]
    pub symbols: Vec<GlyphEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secondary: Vec<GlyphEntry>,
}

impl KeyboardDefinition {
    /// Latin alphabet with common accented variants, digits and punctuation.
    pub fn latin() -> Self {
        let variants = |s: &str| GlyphEntry::from_variants(s.chars().collect());
        let alpha = [
            "aàáâãäå", "b", "cç", "d", "eèéêë", "f", "g", "h", "iíîï", "j", "k", "l", "m", "nñ",
            "oòóôõö", "p", "q", "r", "s", "t", "uùúûü", "v", "w", "x", "yýÿ", "z",
        ]
        .iter()
        .filter_map(|s| variants(s))
        .collect();

        Self {
            alpha,
            nums: ('0'..='9').map(GlyphEntry::Single).collect(),
            symbols: ".,-()$#@!?&:/;\"'*^%<>{}[]|\\`~_+="
                .chars()
                .map(GlyphEntry::Single)
                .collect(),
            secondary: Vec::new(),
        }
    }

    /// Load a definition from a `.json` or `.toml` file (by extension, TOML otherwise).
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| TyperError::ReadKeyboard {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(toml::from_str(&content)?)
        }
    }

    /// Glyph list for a row; rows without glyphs (`buttons`, `value`) are empty.
    pub fn row(&self, row: Row) -> &[GlyphEntry] {
        match row {
            Row::Alpha => &self.alpha,
            Row::Nums => &self.nums,
            Row::Symbols => &self.symbols,
            Row::Secondary => &self.secondary,
            Row::Buttons | Row::Value => &[],
        }
    }

    pub fn glyph_at(&self, row: Row, index: usize) -> Option<&GlyphEntry> {
        self.row(row).get(index)
    }

    pub fn len(&self, row: Row) -> usize {
        self.row(row).len()
    }
}

impl Default for KeyboardDefinition {
    fn default() -> Self {
        Self::latin()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_latin_primaries_distinct() {
        let kb = KeyboardDefinition::latin();
        for row in [Row::Alpha, Row::Nums, Row::Symbols] {
            let primaries: Vec<char> = kb.row(row).iter().map(GlyphEntry::primary).collect();
            let unique: HashSet<char> = primaries.iter().copied().collect();
            assert_eq!(primaries.len(), unique.len(), "duplicate primary in {row}");
        }
        assert_eq!(kb.len(Row::Alpha), 26);
        assert_eq!(kb.len(Row::Nums), 10);
        assert!(kb.row(Row::Secondary).is_empty());
    }

    #[test]
    fn test_glyph_lookup() {
        let kb = KeyboardDefinition::latin();
        let a = kb.glyph_at(Row::Alpha, 0).unwrap();
        assert_eq!(a.primary(), 'a');
        assert_eq!(a.alternates().len(), 6);
        assert_eq!(kb.glyph_at(Row::Alpha, 1).unwrap().primary(), 'b');
        assert!(kb.glyph_at(Row::Alpha, 26).is_none());
        assert!(kb.glyph_at(Row::Value, 0).is_none());
        assert!(kb.glyph_at(Row::Buttons, 0).is_none());
    }

    #[test]
    fn test_variants_pair_upper_forms() {
        let c = GlyphEntry::from_variants(vec!['c', 'ç']).unwrap();
        assert_eq!(c.primary(), 'c');
        assert_eq!(c.variants(), vec!['ç', 'Ç']);
        assert!(GlyphEntry::Single('b').variants().is_empty());
    }

    #[test]
    fn test_single_element_list_collapses() {
        assert_eq!(GlyphEntry::from_variants(vec!['q']), Some(GlyphEntry::Single('q')));
        assert_eq!(GlyphEntry::from_variants(Vec::new()), None);
    }

    #[test]
    fn test_deserialize_json_mixed_entries() {
        let json = r#"{"alpha": [["a", "á"], "b"], "nums": [0, 1, 2], "symbols": ["."]}"#;
        let kb: KeyboardDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(kb.alpha[0].alternates(), &['á']);
        assert_eq!(kb.alpha[1], GlyphEntry::Single('b'));
        assert_eq!(kb.nums[2], GlyphEntry::Single('2'));
        assert_eq!(kb.symbols[0].primary(), '.');
    }

    #[test]
    fn test_deserialize_rejects_empty_variant_list() {
        let json = r#"{"alpha": [[]]}"#;
        assert!(serde_json::from_str::<KeyboardDefinition>(json).is_err());
    }

    #[test]
    fn test_invalid_entries_name_the_entry() {
        let err = GlyphEntry::try_from(RawGlyph::Digit(12)).unwrap_err();
        assert!(matches!(err, TyperError::NotADigit(12)));
        assert_eq!(err.to_string(), "numeric glyph 12 is not a single digit");

        let err = GlyphEntry::try_from(RawGlyph::List(Vec::new())).unwrap_err();
        assert_eq!(err.to_string(), "glyph entry `[]` has no characters");

        let err = serde_json::from_str::<KeyboardDefinition>(r#"{"nums": [7, 12]}"#).unwrap_err();
        assert!(err.to_string().contains("not a single digit"));
    }

    #[test]
    fn test_load_toml_and_json_files() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("kb.toml");
        fs::write(&toml_path, "alpha = [[\"o\", \"ö\"], \"p\"]\nnums = [\"1\"]\n").unwrap();
        let kb = KeyboardDefinition::load(&toml_path).unwrap();
        assert_eq!(kb.alpha.len(), 2);
        assert_eq!(kb.nums[0].primary(), '1');
        assert!(kb.symbols.is_empty());

        let json_path = dir.path().join("kb.json");
        fs::write(&json_path, r#"{"symbols": ["!", "?"]}"#).unwrap();
        let kb = KeyboardDefinition::load(&json_path).unwrap();
        assert_eq!(kb.symbols.len(), 2);
    }

    #[test]
    fn test_load_missing_file_errors() {
        let err = KeyboardDefinition::load(Path::new("/nonexistent/kb.toml")).unwrap_err();
        assert!(matches!(err, TyperError::ReadKeyboard { .. }));
    }
}
