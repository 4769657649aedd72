/// Base points from the fixed raw-score bands. Deliberately independent of the
/// course par; only the bonus point looks at other players' scores.
pub fn base_points(raw_score: i32) -> i32 {
    match raw_score {
        s if s >= 100 => 0,
        96..=99 => 1,
        90..=95 => 2,
        85..=89 => 3,
        80..=84 => 4,
        75..=79 => 5,
        _ => 6,
    }
}
