use std::path::Path;

use console::Style;
use tessera_core::config::ViewerConfig;
use tessera_core::geometry::PyramidGeometry;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_geometry_summary(path: &Path, geometry: &PyramidGeometry, config: &ViewerConfig) {
    let s = Styles::new();
    let base = geometry.base_dimensions();

    println!();
    println!("  {}", s.title.apply_to("Tessera Pyramid"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(15)));
    println!();

    println!("  {:<14}{}", s.label.apply_to("File"), s.path.apply_to(path.display()));
    println!(
        "  {:<14}{}",
        s.label.apply_to("Level 0"),
        s.value.apply_to(format!("{}x{}", base.width, base.height))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Levels"),
        s.value.apply_to(geometry.level_count())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Filter"),
        s.value.apply_to(config.pyramid.filter)
    );
    println!();

    println!(
        "  {}",
        s.header
            .apply_to(format!("{:<7}{:>14}{:>13}{:>10}", "Level", "Dimensions", "Downsample", "Step"))
    );
    for (level, dims) in geometry.level_dimensions().iter().enumerate() {
        let downsample = geometry.downsample(level);
        let step = (f64::from(config.navigation.base_step) * downsample).floor() as i64;
        println!(
            "  {:<7}{:>14}{:>13.3}{:>10}",
            level,
            format!("{}x{}", dims.width, dims.height),
            downsample,
            step
        );
    }
    println!();
}
