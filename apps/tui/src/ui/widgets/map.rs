use ratatui::style::Color;
use renewables_core::{Bounds, ProjectType};

/// Center of the initial view (continental US) in degrees.
pub const DEFAULT_CENTER: (f64, f64) = (39.8283, -98.5795);
const DEFAULT_HALF_SPAN_LAT: f64 = 15.0;
const DEFAULT_HALF_SPAN_LON: f64 = 30.0;
const PADDING_DEGREES: f64 = 2.0;

pub fn type_color(kind: Option<ProjectType>) -> Color {
    match kind {
        Some(ProjectType::Solar) => Color::Yellow,
        Some(ProjectType::Wind) => Color::Cyan,
        Some(ProjectType::Hydroelectric) => Color::Rgb(0, 120, 238),
        None => Color::Gray,
    }
}

/// Canvas bounds: `x` is longitude, `y` is latitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

/// The default US view, widened just enough to keep every marker visible.
pub fn viewport(bounds: Option<Bounds>) -> Viewport {
    let (center_lat, center_lon) = DEFAULT_CENTER;
    let mut view = Viewport {
        x_bounds: [
            center_lon - DEFAULT_HALF_SPAN_LON,
            center_lon + DEFAULT_HALF_SPAN_LON,
        ],
        y_bounds: [
            center_lat - DEFAULT_HALF_SPAN_LAT,
            center_lat + DEFAULT_HALF_SPAN_LAT,
        ],
    };

    if let Some(bounds) = bounds {
        view.x_bounds[0] = view.x_bounds[0].min(bounds.min_longitude - PADDING_DEGREES);
        view.x_bounds[1] = view.x_bounds[1].max(bounds.max_longitude + PADDING_DEGREES);
        view.y_bounds[0] = view.y_bounds[0].min(bounds.min_latitude - PADDING_DEGREES);
        view.y_bounds[1] = view.y_bounds[1].max(bounds.max_latitude + PADDING_DEGREES);
    }

    view.x_bounds = [view.x_bounds[0].max(-180.0), view.x_bounds[1].min(180.0)];
    view.y_bounds = [view.y_bounds[0].max(-90.0), view.y_bounds[1].min(90.0)];
    view
}
