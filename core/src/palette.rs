//! Fixed colors: fallbacks and the per-slug palettes used by the timeline.

/// Period/sub-period chip when nothing better is known.
pub const PERIOD_FALLBACK: &str = "#94a3b8";
/// Map markers whose period has no color.
pub const MAP_MARKER_FALLBACK: &str = "#667eea";
/// Timeline items whose period has no slug color.
pub const TIMELINE_FALLBACK: &str = "#3b82f6";

const PERIOD_COLORS: &[(&str, &str)] = &[
    ("ancient", "#8B4513"),
    ("domination", "#8B0000"),
    ("monarchical", "#FFD700"),
    ("colonial", "#8B4513"),
    ("indochina", "#DC143C"),
    ("war", "#8B0000"),
    ("modern", "#FF6B35"),
];

const SUB_PERIOD_PALETTES: &[(&str, [&str; 3])] = &[
    ("ancient", ["#A0522D", "#8B4513", "#654321"]),
    ("domination", ["#8B0000", "#A52A2A", "#B22222"]),
    ("monarchical", ["#FFD700", "#FFA500", "#FF8C00"]),
    ("colonial", ["#D2691E", "#CD853F", "#8B4513"]),
    ("indochina", ["#DC143C", "#C71585", "#FF1493"]),
    ("war", ["#8B0000", "#B22222", "#CD5C5C"]),
    ("modern", ["#FF6B35", "#FF8C42", "#FFA94D"]),
];

/// Signature color of a period slug.
pub fn slug_color(slug: &str) -> Option<&'static str> {
    PERIOD_COLORS
        .iter()
        .find(|(s, _)| *s == slug)
        .map(|(_, c)| *c)
}

/// Shades for the sub-periods of a period slug.
pub fn sub_period_palette(slug: &str) -> Option<&'static [&'static str]> {
    SUB_PERIOD_PALETTES
        .iter()
        .find(|(s, _)| *s == slug)
        .map(|(_, p)| p.as_slice())
}

/// Shade for the `index`-th sub-period (by order), cycling through the palette.
pub fn sub_period_shade(slug: &str, index: usize) -> Option<&'static str> {
    let palette = sub_period_palette(slug)?;
    palette.get(index % palette.len()).copied()
}
