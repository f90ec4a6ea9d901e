#[derive(Debug, Clone)]
pub struct SettingsInteraction {
    /// Node dragging
    pub node_drag: bool,

    /// Clicking a node reports it as the new selection
    pub node_select: bool,

    /// Tooltips for hovered nodes and links
    pub hover: bool,
}

impl Default for SettingsInteraction {
    fn default() -> Self {
        Self {
            node_drag: true,
            node_select: true,
            hover: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SettingsNavigation {
    /// Fit graph to the screen on every frame
    pub fit_to_screen: bool,

    /// Zoom and pan
    pub zoom_and_pan: bool,

    /// Padding around the graph when fitting to screen
    pub screen_padding: f32,

    /// Zoom step
    pub zoom_step: f32,
}

impl Default for SettingsNavigation {
    fn default() -> Self {
        Self {
            screen_padding: 0.3,
            zoom_step: 0.1,
            fit_to_screen: false,
            zoom_and_pan: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SettingsStyle {
    /// Show every node label, not only hovered and selected ones
    pub labels_always: bool,

    /// Bend of link curves relative to their length
    pub edge_curvature: f32,

    /// Dim links not touching the selected node
    pub edge_deemphasis: bool,
}

impl Default for SettingsStyle {
    fn default() -> Self {
        Self {
            labels_always: false,
            edge_curvature: 0.3,
            edge_deemphasis: true,
        }
    }
}
