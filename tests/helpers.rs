use deskpins::{dark, format_placeholders, light, rem_accel};

#[test]
fn light_moves_channels_towards_white() {
    assert_eq!(light((0, 0, 0)), (127, 127, 127));
    assert_eq!(light((255, 255, 255)), (255, 255, 255));
    assert_eq!(light((100, 200, 0)), (177, 227, 127));
}

#[test]
fn dark_scales_channels_down() {
    assert_eq!(dark((255, 255, 255)), (170, 170, 170));
    assert_eq!(dark((0, 0, 0)), (0, 0, 0));
    assert_eq!(dark((90, 30, 3)), (60, 20, 2));
}

#[test]
fn rem_accel_strips_marker() {
    assert_eq!(rem_accel("&File"), "File");
    assert_eq!(rem_accel("E&xit"), "Exit");
}

#[test]
fn rem_accel_keeps_literal_ampersand() {
    assert_eq!(rem_accel("Pin && Track"), "Pin & Track");
}

#[test]
fn rem_accel_drops_parenthesized_accelerator() {
    assert_eq!(rem_accel("Open (&O)"), "Open");
    assert_eq!(rem_accel("Open (&O)..."), "Open...");
}

#[test]
fn rem_accel_plain_text_unchanged() {
    assert_eq!(rem_accel("Language"), "Language");
}

#[test]
fn format_placeholders_substitutes_in_order() {
    assert_eq!(
        format_placeholders("%1 of %2 pins", &["3", "8"]),
        "3 of 8 pins"
    );
}

#[test]
fn format_placeholders_repeats_and_reorders() {
    assert_eq!(format_placeholders("%2, %1, %2", &["a", "b"]), "b, a, b");
}

#[test]
fn format_placeholders_missing_argument_expands_empty() {
    assert_eq!(format_placeholders("x%3y", &["a"]), "xy");
}

#[test]
fn format_placeholders_literal_percent() {
    assert_eq!(format_placeholders("100%%", &[]), "100%");
    assert_eq!(format_placeholders("trailing %", &[]), "trailing %");
}
