// src/weather/regions.rs
//! Forecast office codes offered by the panel settings.

pub const DEFAULT_REGION: &str = "130000";
pub const UNKNOWN_REGION_NAME: &str = "Unknown";

const REGION_NAMES: &[(&str, &str)] = &[
    ("016000", "Sapporo"),
    ("017000", "Hakodate"),
    ("020000", "Aomori"),
    ("030000", "Iwate"),
    ("040000", "Miyagi"),
    ("050000", "Akita"),
    ("060000", "Yamagata"),
    ("070000", "Fukushima"),
    ("080000", "Ibaraki"),
    ("090000", "Tochigi"),
    ("100000", "Gunma"),
    ("110000", "Saitama"),
    ("120000", "Chiba"),
    ("130000", "Tokyo"),
    ("140000", "Kanagawa"),
    ("150000", "Niigata"),
    ("160000", "Toyama"),
    ("170000", "Ishikawa"),
    ("180000", "Fukui"),
    ("190000", "Yamanashi"),
    ("200000", "Nagano"),
    ("210000", "Gifu"),
    ("220000", "Shizuoka"),
    ("230000", "Aichi"),
    ("240000", "Mie"),
    ("250000", "Shiga"),
    ("260000", "Kyoto"),
    ("270000", "Osaka"),
    ("280000", "Hyogo"),
    ("290000", "Nara"),
    ("300000", "Wakayama"),
    ("310000", "Tottori"),
    ("320000", "Shimane"),
    ("330000", "Okayama"),
    ("340000", "Hiroshima"),
    ("350000", "Yamaguchi"),
    ("360000", "Tokushima"),
    ("370000", "Kagawa"),
    ("380000", "Ehime"),
    ("390000", "Kochi"),
    ("400000", "Fukuoka"),
    ("410000", "Saga"),
    ("420000", "Nagasaki"),
    ("430000", "Kumamoto"),
    ("440000", "Oita"),
    ("450000", "Miyazaki"),
    ("460100", "Kagoshima"),
    ("471000", "Okinawa"),
];

fn lookup(code: &str) -> Option<&'static str> {
    let code = code.trim();
    REGION_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

pub fn region_name(code: &str) -> &'static str {
    lookup(code).unwrap_or(UNKNOWN_REGION_NAME)
}

pub fn is_known_region(code: &str) -> bool {
    lookup(code).is_some()
}

/// Region code to request: `code` if known, else `fallback`.
pub fn resolve_region<'a>(code: &'a str, fallback: &'a str) -> &'a str {
    if is_known_region(code) {
        code.trim()
    } else {
        fallback
    }
}

pub fn all_regions() -> impl Iterator<Item = (&'static str, &'static str)> {
    REGION_NAMES.iter().copied()
}
