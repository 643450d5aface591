mod radar;
mod sliders;

pub use radar::{RadarChart, RadarTrace, build_radar_chart};
pub use sliders::{SliderSpec, slider_specs};
