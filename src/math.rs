/// Normalizes an angle in degrees to the range [0, 360).
///
/// This function takes any bearing value (positive or negative) and converts it
/// to an equivalent bearing in the range [0, 360). Values outside this range
/// are wrapped around using floored modulo arithmetic.
///
/// # Arguments
///
/// * `degrees` - The angle in degrees to normalize
///
/// # Returns
///
/// The normalized angle in degrees, in the range [0, 360)
pub(crate) fn normalize_degrees_360(degrees: f64) -> f64 {
    floored_mod(degrees, 360.0)
}

/// Wraps a longitude in degrees into the range [-180, 180].
///
/// Points reached by walking east or west across the antimeridian come out of
/// the destination formula with longitudes such as 181° or -183°; this maps them
/// back onto the canonical range so they remain valid coordinates.
/// Values already inside the range (including both endpoints) are returned unchanged.
pub(crate) fn normalize_longitude_180(degrees: f64) -> f64 {
    if (-180.0..=180.0).contains(&degrees) {
        return degrees;
    }
    floored_mod(degrees + 180.0, 360.0) - 180.0
}

/// Computes the floored modulo operation (Python-style modulo).
///
/// Unlike Rust's `%` operator which can return negative values, this function
/// always returns a non-negative result in the range [0, m). This matches
/// Python's modulo behavior and is useful for normalizing values to a positive range.
///
/// # Arguments
///
/// * `x` - The dividend
/// * `m` - The modulus (must be positive)
///
/// # Returns
///
/// The remainder `x mod m` in the range [0, m)
///
/// # Examples
///
/// ```
/// # fn floored_mod(x: f64, m: f64) -> f64 { ((x % m) + m) % m }
/// assert_eq!(floored_mod(7.0, 3.0), 1.0);
/// assert_eq!(floored_mod(-7.0, 3.0), 2.0);  // Unlike -7 % 3 which would be -1
/// assert_eq!(floored_mod(0.5, 1.0), 0.5);
/// assert_eq!(floored_mod(1.5, 1.0), 0.5);
/// ```
pub(crate) fn floored_mod(x: f64, m: f64) -> f64 {
    ((x % m) + m) % m
}
