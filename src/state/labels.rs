/// Left-axis unit fallback, checked in order against the cell title.
/// The first rule with any matching substring wins.
pub const UNIT_RULES: &[(&[&str], &str)] = &[
    (&["12V", "80V"], "[V]"),
    (&["current"], "[A]"),
    (&["temperature", "joint_angle", "attitude", "tracking"], "[deg]"),
    (&["joint_velocity"], "[deg/s]"),
    (&["watt"], "[W]"),
];

/// Guess the unit label from a title. Case sensitive, like the config keys it matches.
pub fn infer_unit(title: &str) -> Option<&'static str> {
    UNIT_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| title.contains(n)))
        .map(|(_, unit)| *unit)
}

/// Explicit `left_label` first, otherwise the title heuristic.
pub fn left_label(explicit: Option<&str>, title: &str) -> Option<String> {
    match explicit {
        Some(label) if !label.is_empty() => Some(label.to_string()),
        _ => infer_unit(title).map(str::to_string),
    }
}
