/// Colors of the land-cover classes known in advance, as an ordered association list.
///
/// Both the long class names and the three letter codes used by some datasets are listed.
pub const CLASS_COLORS: &[(&str, &str)] = &[
    ("WATER", "#0077be"),
    ("TREES", "#228b22"),
    ("GRASS", "#00ff00"),
    ("FOREST", "#006400"),
    ("WETLAND", "#dda0dd"),
    ("SHRUBS", "#a0522d"),
    ("FLOODED_VEGETATION", "#a020f0"),
    ("CROPS", "#daa520"),
    ("BUILT", "#808080"),
    ("BARE", "#d2b48c"),
    ("SNOW_AND_ICE", "#fffafa"),
    ("GREEN_INFRASTRUCTURE", "#00ff7f"),
    ("PARKS_AND_OPEN_SPACES", "lightgreen"),
    ("TURF", "palegreen"),
    ("RIPARIAN", "purple"),
    ("DRAINAGE_SWALES", "#c3cd32"),
    ("OK_PARKS", "#ff6347"),
    ("AGR", "#daa520"),
    ("BLT", "#808080"),
    ("BRE", "#d2b48c"),
    ("FRT", "#006400"),
    ("GRS", "#00ff00"),
    ("SHR", "#a0522d"),
    ("WTD", "#dda0dd"),
    ("WTR", "#0077be"),
];

/// Round-robin colors for classes missing from [`CLASS_COLORS`] and for unclassified files.
pub const FALLBACK_PALETTE: &[&str] = &[
    "#e41a1c", "#377eb8", "#4daf4a", "#984ea3", "#ff7f00", "#ffff33", "#a65628", "#f781bf",
];

/// Fixed color of a known class.
#[must_use]
pub fn class_color(class: &str) -> Option<&'static str> {
    CLASS_COLORS
        .iter()
        .find_map(|&(name, color)| (name == class).then_some(color))
}

/// Hands out fallback palette colors in the order they are requested.
///
/// One assigner is shared by all files of a load pass, so two files without
/// classes get different colors.
#[derive(Debug, Clone, Default)]
pub struct ColorAssigner {
    next: usize,
}

impl ColorAssigner {
    /// The next palette color. Wraps around after the last one.
    pub fn next_fallback(&mut self) -> &'static str {
        let color = FALLBACK_PALETTE[self.next % FALLBACK_PALETTE.len()];
        self.next += 1;
        color
    }

    /// Fixed color of a known class, otherwise the next palette color.
    pub fn for_class(&mut self, class: &str) -> &'static str {
        class_color(class).unwrap_or_else(|| self.next_fallback())
    }

    /// How many palette colors were handed out so far.
    #[must_use]
    pub fn fallbacks_used(&self) -> usize {
        self.next
    }
}
