//! Cyrillic to Latin transliteration for cache keys.
//!
//! The mapping is lossy (`ъ` and `ы` both become `y`), so keys produced by
//! [`cache_key`] also carry a CRC32 of the original word.

use crate::error::{FalseFriendsError, Result};
use crate::language::Language;

fn map_char(c: char) -> Option<&'static str> {
    let latin = match c {
        'а' => "a",
        'б' => "b",
        'в' => "v",
        'г' => "g",
        'д' => "d",
        'е' => "e",
        'ж' => "zh",
        'з' => "z",
        'и' => "i",
        'й' => "j",
        'к' => "k",
        'л' => "l",
        'м' => "m",
        'н' => "n",
        'о' => "o",
        'п' => "p",
        'р' => "r",
        'с' => "s",
        'т' => "t",
        'у' => "u",
        'ф' => "f",
        'х' => "h",
        'ч' => "ch",
        'ц' => "c",
        'ш' => "sh",
        'щ' => "sht",
        'ъ' => "y",
        'ь' => "x",
        'э' => "_",
        'ы' => "y",
        'ю' => "yu",
        'я' => "ya",
        'ё' => "yo",
        _ => return None,
    };
    Some(latin)
}

/// Transliterate a word (or space-separated phrase) to ASCII.
pub fn transliterate(word: &str) -> Result<String> {
    let mut out = String::with_capacity(word.len());
    for c in word.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c == '-' || c == ' ' {
            out.push(c);
        } else if let Some(latin) = map_char(c) {
            out.push_str(latin);
        } else {
            return Err(FalseFriendsError::analysis(format!(
                "Cannot transliterate character '{c}' in \"{word}\""
            )));
        }
    }
    Ok(out)
}

/// Filesystem-safe cache key for a word of the given language.
pub fn cache_key(word: &str, language: Language) -> Result<String> {
    let normalized = word.to_lowercase();
    let latin = transliterate(&normalized)?.replace(' ', "_");
    let checksum = crc32fast::hash(normalized.as_bytes());
    Ok(format!("{}-{latin}-{checksum:08x}", language.code()))
}
