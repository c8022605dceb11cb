use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Language codes accepted by the translation endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Lang {
    Auto,
    Zh,
    En,
    Jp,
    Kor,
    Fra,
    Spa,
    Th,
    Ara,
    Ru,
    Pt,
    De,
    It,
    El,
    Nl,
    Pl,
    Bul,
    Est,
    Dan,
    Fin,
    Cs,
    Rom,
    Slo,
    Swe,
    Hu,
    Vie,
    Yue,
    Wyw,
    ZhTw,
}

impl Lang {
    pub const ALL: [Lang; 29] = [
        Lang::Auto,
        Lang::Zh,
        Lang::En,
        Lang::Jp,
        Lang::Kor,
        Lang::Fra,
        Lang::Spa,
        Lang::Th,
        Lang::Ara,
        Lang::Ru,
        Lang::Pt,
        Lang::De,
        Lang::It,
        Lang::El,
        Lang::Nl,
        Lang::Pl,
        Lang::Bul,
        Lang::Est,
        Lang::Dan,
        Lang::Fin,
        Lang::Cs,
        Lang::Rom,
        Lang::Slo,
        Lang::Swe,
        Lang::Hu,
        Lang::Vie,
        Lang::Yue,
        Lang::Wyw,
        Lang::ZhTw,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Lang::Auto => "auto",
            Lang::Zh => "zh",
            Lang::En => "en",
            Lang::Jp => "jp",
            Lang::Kor => "kor",
            Lang::Fra => "fra",
            Lang::Spa => "spa",
            Lang::Th => "th",
            Lang::Ara => "ara",
            Lang::Ru => "ru",
            Lang::Pt => "pt",
            Lang::De => "de",
            Lang::It => "it",
            Lang::El => "el",
            Lang::Nl => "nl",
            Lang::Pl => "pl",
            Lang::Bul => "bul",
            Lang::Est => "est",
            Lang::Dan => "dan",
            Lang::Fin => "fin",
            Lang::Cs => "cs",
            Lang::Rom => "rom",
            Lang::Slo => "slo",
            Lang::Swe => "swe",
            Lang::Hu => "hu",
            Lang::Vie => "vie",
            Lang::Yue => "yue",
            Lang::Wyw => "wyw",
            Lang::ZhTw => "zh-TW",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Lang::Auto => "Auto detect",
            Lang::Zh => "Chinese",
            Lang::En => "English",
            Lang::Jp => "Japanese",
            Lang::Kor => "Korean",
            Lang::Fra => "French",
            Lang::Spa => "Spanish",
            Lang::Th => "Thai",
            Lang::Ara => "Arabic",
            Lang::Ru => "Russian",
            Lang::Pt => "Portuguese",
            Lang::De => "German",
            Lang::It => "Italian",
            Lang::El => "Greek",
            Lang::Nl => "Dutch",
            Lang::Pl => "Polish",
            Lang::Bul => "Bulgarian",
            Lang::Est => "Estonian",
            Lang::Dan => "Danish",
            Lang::Fin => "Finnish",
            Lang::Cs => "Czech",
            Lang::Rom => "Romanian",
            Lang::Slo => "Slovenian",
            Lang::Swe => "Swedish",
            Lang::Hu => "Hungarian",
            Lang::Vie => "Vietnamese",
            Lang::Yue => "Cantonese",
            Lang::Wyw => "Classical Chinese",
            Lang::ZhTw => "Traditional Chinese",
        }
    }

    /// `auto` only makes sense on the source side.
    pub fn is_valid_target(self) -> bool {
        self != Lang::Auto
    }
}

impl FromStr for Lang {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Lang::ALL
            .iter()
            .copied()
            .find(|l| l.code() == s)
            .ok_or_else(|| Error::UnsupportedLanguage(s.to_string()))
    }
}

impl TryFrom<String> for Lang {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Lang> for String {
    fn from(l: Lang) -> Self {
        l.code().to_string()
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
