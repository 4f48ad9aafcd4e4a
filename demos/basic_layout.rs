// demos/basic_layout.rs

use rs_layout::layout::Layout;
use rs_layout::utils::LayoutError;

fn main() -> Result<(), LayoutError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Two squares joined at one corner: 1-2-3-4-1 and 4-5-6-7-4
    let links = [-1, 2, -2, 3, -3, 4, -4, 1, 5, -5, 6, -6, 7, -7, 4];
    let mut layout = Layout::builder(&links).seed(2024).build()?;

    println!("Initial positions:");
    for (i, p) in layout.positions().iter().enumerate() {
        println!("  {}: ({:.1}, {:.1}, {:.1})", i + 1, p.x, p.y, p.z);
    }

    let mut converged = false;
    while !converged && layout.iteration() < 2000 {
        converged = layout.step();
    }

    println!(
        "\nAfter {} iterations (converged: {}, movement: {:.5}):",
        layout.iteration(),
        converged,
        layout.last_movement()
    );
    for (i, p) in layout.positions().iter().enumerate() {
        println!("  {}: ({:.1}, {:.1}, {:.1})", i + 1, p.x, p.y, p.z);
    }

    Ok(())
}
