use eframe::egui::{self, Color32};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// Colors that change with the theme.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub text: Color32,
    pub device: Color32,
    pub danger: Color32,
    pub success: Color32,
    pub wireframe: Color32,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Dark => Palette {
                text: Color32::from_rgb(0xe0, 0xff, 0xe0),
                device: Color32::from_rgb(0x00, 0xff, 0x88),
                danger: Color32::from_rgb(0xff, 0x4d, 0x4d),
                success: Color32::from_rgb(0x00, 0xff, 0x88),
                wireframe: Color32::from_white_alpha(51),
            },
            Theme::Light => Palette {
                text: Color32::from_rgb(0x00, 0x37, 0x3d),
                device: Color32::from_rgb(0x00, 0xbc, 0xd4),
                danger: Color32::from_rgb(0xd3, 0x2f, 0x2f),
                success: Color32::from_rgb(0x00, 0xa3, 0x5c),
                wireframe: Color32::from_black_alpha(51),
            },
        }
    }

    pub fn visuals(self) -> egui::Visuals {
        let mut visuals = match self {
            Theme::Dark => egui::Visuals::dark(),
            Theme::Light => egui::Visuals::light(),
        };
        visuals.override_text_color = Some(self.palette().text);
        visuals
    }

    /// Label for the toggle button: names the theme it switches to.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Dark => "☀ Light",
            Theme::Light => "🌙 Dark",
        }
    }
}
