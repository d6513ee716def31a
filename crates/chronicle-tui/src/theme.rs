use ratatui::style::Color;

// Ink on parchment, dark variant
const INK: Color = Color::Rgb(0x1e, 0x1b, 0x18);
const INK_RAISED: Color = Color::Rgb(0x2a, 0x25, 0x20);
const INK_EDGE: Color = Color::Rgb(0x3d, 0x35, 0x2c);
const PARCHMENT: Color = Color::Rgb(0xe6, 0xd5, 0xb8);
const PARCHMENT_BRIGHT: Color = Color::Rgb(0xf2, 0xe6, 0xcf);
const FADED: Color = Color::Rgb(0x7a, 0x6c, 0x5b);
const FADED_LIGHT: Color = Color::Rgb(0xa3, 0x93, 0x7d);
const VERMILION: Color = Color::Rgb(0xd0, 0x5a, 0x3c);
const AMBER: Color = Color::Rgb(0xe0, 0x9b, 0x3d);
const GOLD: Color = Color::Rgb(0xd9, 0xb5, 0x5a);
const JADE: Color = Color::Rgb(0x6f, 0xaa, 0x8c);
const PLUM: Color = Color::Rgb(0xb5, 0x7a, 0xa6);
const SKY: Color = Color::Rgb(0x76, 0xa3, 0xc4);

/// Colors shared by every widget
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,
    pub fg0: Color,
    pub fg1: Color,
    pub grey0: Color,
    pub grey2: Color,
    pub orange: Color,
    pub yellow: Color,
    pub aqua: Color,
    pub purple: Color,

    /// Selected card border and list row
    pub selection: Color,
    /// Star marker on bookmarked eras
    pub favorite: Color,
    // Highlight kinds
    pub epic: Color,
    pub emotional: Color,
    pub cool: Color,
    pub accent: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg0: INK,
            bg1: INK_RAISED,
            bg2: INK_EDGE,
            fg0: PARCHMENT,
            fg1: PARCHMENT_BRIGHT,
            grey0: FADED,
            grey2: FADED_LIGHT,
            orange: AMBER,
            yellow: GOLD,
            aqua: JADE,
            purple: PLUM,
            selection: INK_EDGE,
            favorite: GOLD,
            epic: VERMILION,
            emotional: PLUM,
            cool: SKY,
            accent: JADE,
        }
    }
}
