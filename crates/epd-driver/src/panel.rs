//! Supported panel models.

use epd_common::{EpdError, EpdResult};

/// Resolution and identity of a panel model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panel {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
}

impl Panel {
    /// Waveshare 7.5" V2, the default panel.
    pub const EPD_7IN5_V2: Panel = Panel {
        name: "7in5_v2",
        width: 800,
        height: 480,
    };

    /// Waveshare 7.5" V1.
    pub const EPD_7IN5: Panel = Panel {
        name: "7in5",
        width: 640,
        height: 384,
    };

    /// Waveshare 4.2".
    pub const EPD_4IN2: Panel = Panel {
        name: "4in2",
        width: 400,
        height: 300,
    };

    /// Every known model.
    pub const ALL: [Panel; 3] = [Self::EPD_7IN5_V2, Self::EPD_7IN5, Self::EPD_4IN2];

    /// Look a model up by name, case-insensitively.
    pub fn from_name(name: &str) -> EpdResult<Panel> {
        let wanted = name.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .find(|p| p.name == wanted)
            .copied()
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|p| p.name).collect();
                EpdError::ConfigError(format!(
                    "Unknown panel '{}', expected one of: {}",
                    name,
                    known.join(", ")
                ))
            })
    }

    /// Bytes per packed row.
    pub fn row_stride(&self) -> usize {
        (self.width as usize + 7) / 8
    }

    /// Bytes in one packed frame.
    pub fn buffer_len(&self) -> usize {
        self.row_stride() * self.height as usize
    }
}

impl Default for Panel {
    fn default() -> Self {
        Self::EPD_7IN5_V2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(Panel::from_name("7in5_v2").unwrap(), Panel::EPD_7IN5_V2);
        assert_eq!(Panel::from_name(" 4IN2 ").unwrap(), Panel::EPD_4IN2);
    }

    #[test]
    fn test_unknown_panel_lists_known() {
        let err = Panel::from_name("2in13").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("2in13"));
        assert!(message.contains("7in5_v2"));
    }

    #[test]
    fn test_buffer_len() {
        assert_eq!(Panel::EPD_7IN5_V2.buffer_len(), 100 * 480);
        assert_eq!(Panel::EPD_7IN5.buffer_len(), 80 * 384);
        // 400 / 8 = 50
        assert_eq!(Panel::EPD_4IN2.buffer_len(), 50 * 300);
    }

    #[test]
    fn test_row_stride_rounds_up() {
        let odd = Panel {
            name: "odd",
            width: 13,
            height: 2,
        };
        assert_eq!(odd.row_stride(), 2);
        assert_eq!(odd.buffer_len(), 4);
    }

    #[test]
    fn test_default_panel() {
        assert_eq!(Panel::default().name, "7in5_v2");
    }
}
