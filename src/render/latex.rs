use crate::gradient::{Palette, ShadeId};

/// Typeset a warp (or a single braid) as a LaTeX card: one coloured box per
/// thread, `|` every ten and a fresh line every thirty, matching the ruled
/// text rendering so the printout can be counted against the loom.
pub fn warp_card(palette: &Palette, placement: &[ShadeId]) -> String {
    let mut lines = vec![header()];
    for (i, id) in placement.iter().enumerate() {
        let (label, rgb) = match palette.get(*id) {
            Some(shade) => (shade.label, shade.rgb),
            None => ('?', (0, 0, 0)),
        };
        lines.push(format!(
            r"\colorbox[RGB]{{{},{},{}}}{{{}}}",
            rgb.0, rgb.1, rgb.2, label
        ));
        let count = i + 1;
        if count % 30 == 0 {
            lines.push(r"\newline".to_string());
            continue;
        }
        if count % 10 == 0 {
            lines.push("|".to_string());
        }
    }
    lines.push(footer());
    lines.join("\n")
}

fn header() -> String {
    [
        r"\documentclass[landscape,a4paper,ms,12pt]{memoir}",
        r"\usepackage[margin=1cm]{geometry}",
        r"\renewcommand{\baselinestretch}{2.5}",
        r"\usepackage{xcolor}",
        r"\usepackage[T1]{fontenc}",
        r"\def\rangeRGB{255}",
        r"\renewcommand{\seriesdefault}{\bfdefault}",
        r"\setlength\parindent{0pt}",
        r"\pagenumbering{gobble}",
        r"\begin{document}",
        r"\begin{Large}",
    ]
    .join("\n")
}

fn footer() -> String {
    [r"\end{Large}", r"\end{document}"].join("\n")
}
