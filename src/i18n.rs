//! Localization table and dotted-path lookup

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::paths::get_language_path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    En,
    #[serde(rename = "hi")]
    Hi,
    #[serde(rename = "te")]
    Te,
    #[serde(rename = "ta")]
    Ta,
    #[serde(rename = "bn")]
    Bn,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Te => "te",
            Language::Ta => "ta",
            Language::Bn => "bn",
        }
    }

    pub fn from_code(code: &str) -> Option<Language> {
        match code {
            "en" => Some(Language::En),
            "hi" => Some(Language::Hi),
            "te" => Some(Language::Te),
            "ta" => Some(Language::Ta),
            "bn" => Some(Language::Bn),
            _ => None,
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::En
    }
}

/// Loads the active language code, defaulting to English when the file is
/// missing or holds an unknown code
pub fn load_language() -> Language {
    let path = match get_language_path() {
        Ok(p) => p,
        Err(_) => return Language::default(),
    };
    if !path.exists() {
        return Language::default();
    }
    std::fs::read_to_string(&path)
        .ok()
        .and_then(|content| Language::from_code(content.trim()))
        .unwrap_or_default()
}

/// Persists the active language code
pub fn save_language(language: Language) -> Result<(), String> {
    let path = get_language_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create directory: {}", e))?;
    }
    std::fs::write(&path, language.code())
        .map_err(|e| format!("Failed to save language: {}", e))
}

/// Resolves a dotted key path against the active language's table. Any
/// missing segment returns the path string itself.
pub fn translate(language: Language, path: &str) -> String {
    let mut node = table(language);
    for key in path.split('.') {
        match node.get(key) {
            Some(next) => node = next,
            None => return path.to_string(),
        }
    }
    match node.as_str() {
        Some(text) => text.to_string(),
        None => path.to_string(),
    }
}

/// Returns the full nested table for a language, for bulk consumption by
/// the view shell
pub fn table(language: Language) -> &'static Value {
    static TABLES: OnceLock<HashMap<Language, Value>> = OnceLock::new();
    let tables = TABLES.get_or_init(build_tables);
    &tables[&language]
}

fn build_tables() -> HashMap<Language, Value> {
    let mut tables = HashMap::new();

    tables.insert(
        Language::En,
        json!({
            "nav": { "home": "Home", "about": "About", "services": "Services", "destinations": "Destinations", "contact": "Contact", "login": "Login", "logout": "Logout" },
            "home": {
                "hero_tag": "National Smart Travel Agency",
                "hero_title_1": "WAY",
                "hero_title_2": "TRUST",
                "hero_subtitle": "India, Planned Smarter.",
                "cta": "CUSTOMIZE MY SMART PLAN",
                "launch": "LAUNCH AI PLANNER",
                "stats_heritage": "Heritage Destinations",
                "stats_ai": "Proprietary Routing",
                "featured_title": "Neural Circuits",
                "featured_sub": "Calculated paths through India's most iconic heritage sites.",
                "access_db": "Access Database"
            },
            "common": { "loading": "Processing...", "back": "Back", "hi": "Hi" }
        }),
    );

    tables.insert(
        Language::Hi,
        json!({
            "nav": { "home": "होम", "about": "हमारे बारे में", "services": "सेवाएं", "destinations": "गंतव्य", "contact": "संपर्क", "login": "लॉगिन", "logout": "लॉगआउट" },
            "home": {
                "hero_tag": "राष्ट्रीय स्मार्ट ट्रैवल एजेंसी",
                "hero_title_1": "WAY",
                "hero_title_2": "TRUST",
                "hero_subtitle": "भारत, बेहतर योजना के साथ।",
                "cta": "मेरी स्मार्ट योजना बनाएं",
                "launch": "AI प्लानर लॉन्च करें",
                "stats_heritage": "विरासत स्थल",
                "stats_ai": "मालिकाना रूटिंग",
                "featured_title": "न्यूरल सर्किट",
                "featured_sub": "भारत के सबसे प्रतिष्ठित विरासत स्थलों के माध्यम से गणना किए गए पथ।",
                "access_db": "डेटाबेस एक्सेस करें"
            },
            "common": { "loading": "प्रसंस्करण...", "back": "पीछे", "hi": "नमस्ते" }
        }),
    );

    tables.insert(
        Language::Te,
        json!({
            "nav": { "home": "హోమ్", "about": "గురించి", "services": "సేవలు", "destinations": "గమ్యస్థానాలు", "contact": "సంప్రదించండి", "login": "లాగిన్", "logout": "లాగ్అవుట్" },
            "home": {
                "hero_tag": "నేషనల్ స్మార్ట్ ట్రావెల్ ఏజెన్సీ",
                "hero_title_1": "WAY",
                "hero_title_2": "TRUST",
                "hero_subtitle": "భారతదేశం, తెలివిగా ప్లాన్ చేయబడింది.",
                "cta": "నా స్మార్ట్ ప్లాన్ అనుకూలీకరించండి",
                "launch": "AI ప్లానర్ ప్రారంభించండి",
                "stats_heritage": "వారసత్వ గమ్యస్థానాలు",
                "stats_ai": "ప్రొప్రైటరీ రూటింగ్",
                "featured_title": "న్యూరల్ సర్క్యూట్లు",
                "featured_sub": "భారతదేశం యొక్క అత్యంత ప్రసిద్ధ వారసత్వ ప్రదేశాల ద్వారా లెక్కించబడిన మార్గాలు.",
                "access_db": "డేటాబేస్ యాక్సెస్"
            },
            "common": { "loading": "ప్రక్రియలో ఉంది...", "back": "వెనుకకు", "hi": "హలో" }
        }),
    );

    tables.insert(
        Language::Ta,
        json!({
            "nav": { "home": "முகப்பு", "about": "பற்றி", "services": "சேவைகள்", "destinations": "இடங்கள்", "contact": "தொடர்பு", "login": "உள்நுழை", "logout": "வெளியேறு" },
            "home": {
                "hero_tag": "தேசிய ஸ்மார்ட் பயண நிறுவனம்",
                "hero_title_1": "WAY",
                "hero_title_2": "TRUST",
                "hero_subtitle": "இந்தியா, சிறந்த திட்டமிடலுடன்.",
                "cta": "எனது ஸ்மார்ட் திட்டத்தை உருவாக்கு",
                "launch": "AI திட்டமிடுபவரைத் தொடங்கு",
                "stats_heritage": "பாரம்பரிய இடங்கள்",
                "stats_ai": "தனியுரிம ரூட்டிங்",
                "featured_title": "நியூரல் சுற்றுகள்",
                "featured_sub": "இந்தியாவின் மிகவும் புகழ்பெற்ற பாரம்பரிய தளங்கள் வழியாக கணக்கிடப்பட்ட பாதைகள்.",
                "access_db": "தரவுத்தளத்தை அணுகவும்"
            },
            "common": { "loading": "செயலாக்கம்...", "back": "பின்செல்", "hi": "வணக்கம்" }
        }),
    );

    tables.insert(
        Language::Bn,
        json!({
            "nav": { "home": "হোম", "about": "সম্পর্কে", "services": "পরিষেবা", "destinations": "গন্তব্য", "contact": "যোগাযোগ", "login": "লগইন", "logout": "লগআউট" },
            "home": {
                "hero_tag": "জাতীয় স্মার্ট ট্রাভেল এজেন্সি",
                "hero_title_1": "WAY",
                "hero_title_2": "TRUST",
                "hero_subtitle": "ভারত, স্মার্ট পরিকল্পনায়।",
                "cta": "আমার স্মার্ট প্ল্যান কাস্টমাইজ করুন",
                "launch": "AI প্ল্যানার লঞ্চ করুন",
                "stats_heritage": "ঐতিহ্যবাহী গন্তব্য",
                "stats_ai": "মালিকানাধীন রাউটিং",
                "featured_title": "নিউরাল সার্কিট",
                "featured_sub": "ভারতের সবচেয়ে আইকনিক ঐতিহ্যবাহী স্থানগুলির মাধ্যমে গণনাকৃত পথ।",
                "access_db": "ডেটাবেস অ্যাক্সেস করুন"
            },
            "common": { "loading": "প্রক্রিয়াকরণ...", "back": "পেছনে", "hi": "হ্যালো" }
        }),
    );

    tables
}
