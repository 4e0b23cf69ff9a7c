use crate::gradient::{Palette, ShadeId};

/// Render a warp preview as an SVG stripe image: one 1-unit column per
/// thread, height a fifth of the width. Consecutive threads of the same
/// shade are merged into a single rect.
pub fn warp_preview(palette: &Palette, placement: &[ShadeId]) -> String {
    let width = placement.len();
    let height = (width / 5).max(1);

    let mut out = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    out.push('\n');

    let mut x = 0usize;
    while x < placement.len() {
        let id = placement[x];
        let mut run = 1usize;
        while x + run < placement.len() && placement[x + run] == id {
            run += 1;
        }
        let rgb = palette.get(id).map(|s| s.rgb).unwrap_or((0, 0, 0));
        out.push_str(&format!(
            r#"  <rect x="{x}" y="0" width="{run}" height="{height}" fill="rgb({},{},{})"/>"#,
            rgb.0, rgb.1, rgb.2
        ));
        out.push('\n');
        x += run;
    }

    out.push_str("</svg>\n");
    out
}
