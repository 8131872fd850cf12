/// Curve mapping linear progress in `[0, 1]` to eased progress in `[0, 1]`.
pub type Easing = fn(f32) -> f32;

/// Fifth-order ease-in-ease-out: slow start, fast middle, slow end.
///
/// Input is clamped, so callers may pass overshooting progress.
pub fn quintic_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        16.0 * t * t * t * t * t
    } else {
        let u = 2.0 * t - 2.0;
        0.5 * u * u * u * u * u + 1.0
    }
}
