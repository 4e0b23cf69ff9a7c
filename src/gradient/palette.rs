/// Stable identity of a shade within a palette.
///
/// Layouts store shade ids, not display letters; how a shade is printed is
/// the palette's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShadeId(pub usize);

/// One colour class in a gradient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shade {
    pub id: ShadeId,
    /// Single-letter label used in text and typeset output.
    pub label: char,
    pub rgb: (u8, u8, u8),
}

/// An ordered set of shades, darkest to lightest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    shades: Vec<Shade>,
}

impl Palette {
    /// Build a palette from RGB triples; labels are assigned 'A' onward.
    pub fn from_rgb(colours: &[(u8, u8, u8)]) -> Self {
        let shades = colours
            .iter()
            .enumerate()
            .map(|(i, &rgb)| Shade {
                id: ShadeId(i),
                label: (b'A' + i as u8) as char,
                rgb,
            })
            .collect();
        Self { shades }
    }

    /// The five-shade purple-to-straw gradient the generator was built for.
    pub fn purple_dawn() -> Self {
        Self::from_rgb(&[
            (65, 60, 90),
            (180, 140, 175),
            (225, 190, 200),
            (250, 250, 225),
            (250, 245, 155),
        ])
    }

    pub fn len(&self) -> usize {
        self.shades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shades.is_empty()
    }

    pub fn get(&self, id: ShadeId) -> Option<&Shade> {
        self.shades.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Shade> {
        self.shades.iter()
    }

    /// Map a placement back to display letters.
    pub fn labels(&self, placement: &[ShadeId]) -> Vec<char> {
        placement
            .iter()
            .map(|id| self.get(*id).map(|s| s.label).unwrap_or('?'))
            .collect()
    }
}
