//! The dashboard's start-up panel set.

use super::{PanelKind, WindowId, WindowRegistry, WindowState};
use crate::config::LayoutDefaults;
use crate::layout::{Point, Size};

pub const SETTINGS: WindowId = WindowId::new("settings");
pub const RESPONSE_PLOT: WindowId = WindowId::new("response-plot");
pub const BATHYMETRY: WindowId = WindowId::new("bathymetry");
pub const CUSTOM_PLOT: WindowId = WindowId::new("custom-plot");
pub const MISFIT_STATS: WindowId = WindowId::new("misfit-stats");

/// Id of the single panel registered for `kind`.
pub fn window_id_for(kind: PanelKind) -> WindowId {
    match kind {
        PanelKind::Settings => SETTINGS,
        PanelKind::ResponsePlot => RESPONSE_PLOT,
        PanelKind::Bathymetry => BATHYMETRY,
        PanelKind::CustomPlot => CUSTOM_PLOT,
        PanelKind::MisfitStats => MISFIT_STATS,
    }
}

/// Initial panels, authored in pixels and rescaled into the units of
/// `defaults`.
pub fn initial_windows(defaults: &LayoutDefaults) -> Vec<WindowState> {
    let place = |state: WindowState, x: i32, y: i32, w: i32, h: i32| {
        state.with_frame(
            defaults.scale_point(Point::new(x, y)),
            defaults.scale_size(Size::new(w, h)),
        )
    };
    vec![
        WindowState::new(SETTINGS, PanelKind::Settings, "Control Panel")
            .docked()
            .with_z_index(10)
            .opened(true),
        place(
            WindowState::new(RESPONSE_PLOT, PanelKind::ResponsePlot, "CSEM Responses"),
            100,
            100,
            600,
            400,
        )
        .with_z_index(10),
        place(
            WindowState::new(
                BATHYMETRY,
                PanelKind::Bathymetry,
                "Bathymetry & Survey Geometry",
            ),
            600,
            50,
            500,
            600,
        )
        .with_z_index(10)
        .opened(true),
        place(
            WindowState::new(CUSTOM_PLOT, PanelKind::CustomPlot, "Custom Plot"),
            400,
            400,
            600,
            400,
        )
        .with_z_index(11),
        place(
            WindowState::new(MISFIT_STATS, PanelKind::MisfitStats, "Misfit Statistics"),
            150,
            150,
            900,
            700,
        )
        .with_z_index(10),
    ]
}

/// Registry seeded with [`initial_windows`].
pub fn initial_registry(defaults: LayoutDefaults) -> WindowRegistry {
    WindowRegistry::with_windows(defaults, initial_windows(&defaults))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Container;

    #[test]
    fn initial_set_matches_dashboard_layout() {
        let reg = initial_registry(LayoutDefaults::pixels());
        assert_eq!(reg.global_z_index(), 100);
        assert_eq!(reg.sidebar_order(), &[SETTINGS]);
        assert_eq!(reg.main_draw_order(), vec![BATHYMETRY]);
        let bathy = reg.window(BATHYMETRY).unwrap();
        assert_eq!(bathy.position(), Point::new(600, 50));
        assert_eq!(bathy.size(), Size::new(500, 600));
        assert_eq!(reg.window(SETTINGS).unwrap().container(), Container::Sidebar);
        assert_eq!(reg.check_invariants(), Ok(()));
    }

    #[test]
    fn every_kind_has_one_panel() {
        let windows = initial_windows(&LayoutDefaults::pixels());
        for kind in PanelKind::ALL {
            let id = window_id_for(kind);
            let found: Vec<_> = windows.iter().filter(|w| w.id() == id).collect();
            assert_eq!(found.len(), 1);
            assert_eq!(found[0].kind(), kind);
        }
    }

    #[test]
    fn cell_units_scale_geometry() {
        let reg = initial_registry(LayoutDefaults::cells());
        let bathy = reg.window(BATHYMETRY).unwrap();
        assert_eq!(bathy.position(), Point::new(60, 2));
        assert_eq!(bathy.size(), Size::new(50, 24));
        // the never-placed docked panel stays at the origin sentinel
        assert!(reg.window(SETTINGS).unwrap().position().is_origin());
    }
}
