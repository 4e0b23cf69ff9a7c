use super::*;
use crate::gradient::{Palette, ShadeId};

#[test]
fn test_separator() {
    assert_eq!(separator(), "-".repeat(25));
}

#[test]
fn test_ruled_line_markers() {
    let labels = vec!['A'; 35];
    let out = ruled_line(&labels);

    // One break after thread 30, | markers after 10 and 20 only.
    assert_eq!(out.matches('\n').count(), 1);
    assert_eq!(out.matches('|').count(), 2);
    assert_eq!(out.matches('A').count(), 35);
}

#[test]
fn test_ruled_line_short_run_has_no_markers() {
    let out = ruled_line(&['A', 'B', 'C']);
    assert_eq!(out, "A   B   C   ");
}

#[test]
fn test_pattern_grid_breaks_on_repeat() {
    let labels = vec!['B'; 24];
    let out = pattern_grid(&labels, 12, 6);

    // Two full repeats of 12, each split into rows of 6; repeats separated
    // by a blank line.
    assert_eq!(out.matches("\n\n").count(), 2);
    assert_eq!(out.matches('B').count(), 24);
    assert_eq!(out.matches('|').count(), 2);
}

#[test]
fn test_pattern_grid_degenerates_to_ruled_line() {
    let labels = vec!['A'; 12];
    assert_eq!(pattern_grid(&labels, 0, 6), ruled_line(&labels));
}

#[test]
fn test_warp_card_structure() {
    let palette = Palette::purple_dawn();
    let placement = vec![ShadeId(0), ShadeId(1), ShadeId(4)];
    let card = warp_card(&palette, &placement);

    assert!(card.starts_with(r"\documentclass"));
    assert!(card.ends_with(r"\end{document}"));
    assert!(card.contains(r"\colorbox[RGB]{65,60,90}{A}"));
    assert!(card.contains(r"\colorbox[RGB]{250,245,155}{E}"));
    assert_eq!(card.matches(r"\colorbox").count(), 3);
}

#[test]
fn test_warp_card_ruling() {
    let palette = Palette::purple_dawn();
    let placement = vec![ShadeId(2); 30];
    let card = warp_card(&palette, &placement);

    assert_eq!(card.matches(r"\newline").count(), 1);
    // | after 10 and 20; the 30th thread takes the newline instead.
    assert_eq!(card.matches("\n|\n").count(), 2);
}

#[test]
fn test_svg_preview_merges_runs() {
    let palette = Palette::purple_dawn();
    let mut placement = vec![ShadeId(0); 10];
    placement.extend(vec![ShadeId(1); 10]);
    let svg = warp_preview(&palette, &placement);

    assert!(svg.starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert_eq!(svg.matches("<rect").count(), 2);
    assert!(svg.contains(r#"width="20" height="4""#));
    assert!(svg.contains("rgb(65,60,90)"));
    assert!(svg.contains("rgb(180,140,175)"));
}
