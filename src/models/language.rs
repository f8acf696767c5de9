use serde::{Deserialize, Serialize};

/// Supported attendee locales. The public contract only ever exposes codes
/// from this set; anything else stored on an attendee maps to no language.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingLanguage {
    Ar,
    Ca,
    Cs,
    Da,
    De,
    El,
    En,
    Es,
    Et,
    Eu,
    Fi,
    Fr,
    He,
    Hr,
    Hu,
    Id,
    It,
    Ja,
    Km,
    Ko,
    Lv,
    Nl,
    No,
    Pl,
    Pt,
    #[serde(rename = "pt-BR")]
    PtBr,
    Ro,
    Ru,
    Sk,
    Sr,
    Sv,
    Th,
    Tr,
    Uk,
    Vi,
    #[serde(rename = "zh-CN")]
    ZhCn,
    #[serde(rename = "zh-TW")]
    ZhTw,
}

impl BookingLanguage {
    pub fn from_locale(locale: &str) -> Option<Self> {
        match locale {
            "ar" => Some(BookingLanguage::Ar),
            "ca" => Some(BookingLanguage::Ca),
            "cs" => Some(BookingLanguage::Cs),
            "da" => Some(BookingLanguage::Da),
            "de" => Some(BookingLanguage::De),
            "el" => Some(BookingLanguage::El),
            "en" => Some(BookingLanguage::En),
            "es" => Some(BookingLanguage::Es),
            "et" => Some(BookingLanguage::Et),
            "eu" => Some(BookingLanguage::Eu),
            "fi" => Some(BookingLanguage::Fi),
            "fr" => Some(BookingLanguage::Fr),
            "he" => Some(BookingLanguage::He),
            "hr" => Some(BookingLanguage::Hr),
            "hu" => Some(BookingLanguage::Hu),
            "id" => Some(BookingLanguage::Id),
            "it" => Some(BookingLanguage::It),
            "ja" => Some(BookingLanguage::Ja),
            "km" => Some(BookingLanguage::Km),
            "ko" => Some(BookingLanguage::Ko),
            "lv" => Some(BookingLanguage::Lv),
            "nl" => Some(BookingLanguage::Nl),
            "no" => Some(BookingLanguage::No),
            "pl" => Some(BookingLanguage::Pl),
            "pt" => Some(BookingLanguage::Pt),
            "pt-BR" => Some(BookingLanguage::PtBr),
            "ro" => Some(BookingLanguage::Ro),
            "ru" => Some(BookingLanguage::Ru),
            "sk" => Some(BookingLanguage::Sk),
            "sr" => Some(BookingLanguage::Sr),
            "sv" => Some(BookingLanguage::Sv),
            "th" => Some(BookingLanguage::Th),
            "tr" => Some(BookingLanguage::Tr),
            "uk" => Some(BookingLanguage::Uk),
            "vi" => Some(BookingLanguage::Vi),
            "zh-CN" => Some(BookingLanguage::ZhCn),
            "zh-TW" => Some(BookingLanguage::ZhTw),
            _ => None,
        }
    }
}
