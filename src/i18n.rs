use std::collections::HashMap;

const EN: &[(&str, &str)] = &[
    ("add", "Add"),
    ("service", "Service"),
    ("id", "ID"),
    ("name", "Name"),
    ("image", "Image"),
    ("status", "Status"),
    ("no_services", "No services deployed"),
];

const DE: &[(&str, &str)] = &[
    ("add", "Hinzufügen"),
    ("service", "Dienst"),
    ("id", "ID"),
    ("name", "Name"),
    ("image", "Image"),
    ("status", "Status"),
    ("no_services", "Keine Dienste bereitgestellt"),
];

/// Localized ui strings. Unknown keys translate to themselves.
#[derive(Debug, Clone)]
pub struct Translations {
    strings: HashMap<&'static str, &'static str>,
}

impl Default for Translations {
    fn default() -> Self {
        Self::english()
    }
}

impl Translations {
    pub fn english() -> Self {
        Self::from_table(EN)
    }

    /// Falls back to english for unsupported locales.
    pub fn for_locale(locale: &str) -> Self {
        let language = locale
            .split(['-', '_', '.'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "de" => Self::from_table(DE),
            _ => Self::english(),
        }
    }

    fn from_table(table: &[(&'static str, &'static str)]) -> Self {
        Self {
            strings: table.iter().copied().collect(),
        }
    }

    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        self.strings.get(key).copied().unwrap_or(key)
    }
}
