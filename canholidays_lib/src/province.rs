//! Static table of Canadian provinces and territories.
//!
//! Codes are ISO-3166-2 subdivision codes, which is what the holiday API puts
//! in a holiday's `counties` list.

use serde::Serialize;

/// A province or territory: its subdivision code and display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Province {
    pub code: &'static str,
    pub label: &'static str,
}

/// All 13 provinces and territories, ordered by code.
pub const PROVINCES: &[Province] = &[
    Province {
        code: "CA-AB",
        label: "Alberta",
    },
    Province {
        code: "CA-BC",
        label: "British Columbia",
    },
    Province {
        code: "CA-MB",
        label: "Manitoba",
    },
    Province {
        code: "CA-NB",
        label: "New Brunswick",
    },
    Province {
        code: "CA-NL",
        label: "Newfoundland and Labrador",
    },
    Province {
        code: "CA-NS",
        label: "Nova Scotia",
    },
    Province {
        code: "CA-NT",
        label: "Northwest Territories",
    },
    Province {
        code: "CA-NU",
        label: "Nunavut",
    },
    Province {
        code: "CA-ON",
        label: "Ontario",
    },
    Province {
        code: "CA-PE",
        label: "Prince Edward Island",
    },
    Province {
        code: "CA-QC",
        label: "Quebec",
    },
    Province {
        code: "CA-SK",
        label: "Saskatchewan",
    },
    Province {
        code: "CA-YT",
        label: "Yukon",
    },
];

/// Ontario, the default selection.
pub fn default_province() -> &'static Province {
    &PROVINCES[8]
}

/// Exact lookup by subdivision code (`"CA-ON"`).
pub fn by_code(code: &str) -> Option<&'static Province> {
    PROVINCES.iter().find(|p| p.code == code)
}

/// Exact lookup by display label (`"Ontario"`).
pub fn by_label(label: &str) -> Option<&'static Province> {
    PROVINCES.iter().find(|p| p.label == label)
}

/// Lenient lookup for user-typed input: a code or a label, ignoring case and
/// surrounding whitespace. Codes win over labels.
pub fn resolve(input: &str) -> Option<&'static Province> {
    let trimmed = input.trim();
    PROVINCES
        .iter()
        .find(|p| p.code.eq_ignore_ascii_case(trimmed))
        .or_else(|| {
            PROVINCES
                .iter()
                .find(|p| p.label.eq_ignore_ascii_case(trimmed))
        })
}
