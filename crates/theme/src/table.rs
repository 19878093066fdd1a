use crate::colors::Color;

/// Number of compiled-in themes.
pub const THEME_COUNT: usize = 6;

/// One compiled-in popup theme.  Only its position in [`ThemeTable`] is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeDefinition {
    /// Stable id, also the body class and the asset name component.
    pub id:      &'static str,
    /// Emphasised part of the label.
    pub name:    &'static str,
    /// `Dark` / `Light` suffix of the label.
    pub variant: &'static str,
    /// Accent colour of the emphasised label part.
    pub accent:  &'static str,
}

impl ThemeDefinition {
    /// Body class selecting this theme's stylesheet rules.
    #[inline]
    pub fn class(&self) -> &'static str {
        self.id
    }

    /// Label markup shown next to the theme stepper.
    pub fn label(&self) -> String {
        format!(
            "<b style=\"color: {};\">{}</b>{}",
            self.accent_color().to_hex(),
            self.name,
            self.variant
        )
    }

    pub fn accent_color(&self) -> Color {
        Color::from_hex(self.accent).unwrap_or(Color::WHITE)
    }
}

const BUILTIN: [ThemeDefinition; THEME_COUNT] = [
    ThemeDefinition { id: "luxury",  name: "Luxury",  variant: "Dark",  accent: "#ffff9f" },
    ThemeDefinition { id: "enigma",  name: "Enigma",  variant: "Dark",  accent: "#53b4e8" },
    ThemeDefinition { id: "scarlet", name: "Scarlet", variant: "Dark",  accent: "#9b2234" },
    ThemeDefinition { id: "azure",   name: "Azure",   variant: "Light", accent: "#53b4e8" },
    ThemeDefinition { id: "blossom", name: "Blossom", variant: "Light", accent: "#ef9fcf" },
    ThemeDefinition { id: "eden",    name: "Eden",    variant: "Light", accent: "#6fb95f" },
];

/// Ordered, immutable list of themes handed to the cycle engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeTable {
    themes: &'static [ThemeDefinition],
}

impl ThemeTable {
    /// The six themes shipped with the popup.
    pub fn builtin() -> Self {
        Self { themes: &BUILTIN }
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    /// Theme at `index`, wrapping out-of-range indices.
    pub fn get(&self, index: usize) -> &ThemeDefinition {
        &self.themes[index % self.themes.len()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ThemeDefinition> {
        self.themes.iter()
    }

    /// Map a stored index onto the table.  Absent values select the first
    /// theme; out-of-range values wrap.
    pub fn normalize(&self, stored: Option<i64>) -> usize {
        stored.map_or(0, |raw| raw.rem_euclid(self.len() as i64) as usize)
    }

    /// `(index + delta + N) mod N`, non-negative for any sign of `delta`.
    pub fn step(&self, index: usize, delta: i64) -> usize {
        let n = self.len() as i64;
        (index as i64 + delta + n).rem_euclid(n) as usize
    }
}

impl Default for ThemeTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn builtin_order() {
        let ids: Vec<_> = ThemeTable::builtin().iter().map(|t| t.id).collect();
        assert_eq!(ids, ["luxury", "enigma", "scarlet", "azure", "blossom", "eden"]);
    }

    #[test]
    fn label_markup() {
        assert_eq!(
            ThemeTable::builtin().get(0).label(),
            "<b style=\"color: #ffff9f;\">Luxury</b>Dark"
        );
    }

    #[test]
    fn previous_from_first_wraps_to_last() {
        assert_eq!(ThemeTable::builtin().step(0, -1), THEME_COUNT - 1);
        assert_eq!(ThemeTable::builtin().step(THEME_COUNT - 1, 1), 0);
    }

    #[test]
    fn normalize_stored_values() {
        let table = ThemeTable::builtin();
        assert_eq!(table.normalize(None), 0);
        assert_eq!(table.normalize(Some(4)), 4);
        assert_eq!(table.normalize(Some(7)), 1);
        assert_eq!(table.normalize(Some(-1)), 5);
    }

    proptest! {
        #[test]
        fn next_then_previous_round_trips(start in 0usize..THEME_COUNT) {
            let table = ThemeTable::builtin();
            prop_assert_eq!(table.step(table.step(start, 1), -1), start);
        }

        #[test]
        fn stepping_n_times_is_identity(start in 0usize..THEME_COUNT, back in any::<bool>()) {
            let table = ThemeTable::builtin();
            let delta = if back { -1 } else { 1 };
            let end = (0..table.len()).fold(start, |i, _| table.step(i, delta));
            prop_assert_eq!(end, start);
        }

        #[test]
        fn step_stays_in_range(start in 0usize..THEME_COUNT, delta in -1i64..=1) {
            prop_assert!(ThemeTable::builtin().step(start, delta) < THEME_COUNT);
        }
    }
}
